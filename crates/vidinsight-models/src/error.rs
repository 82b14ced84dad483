//! Validation errors raised while normalizing user-supplied video input.

use thiserror::Error;

use crate::utils::YoutubeIdError;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Local, deterministic rejection of a video input.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a valid video file.")]
    NotAVideo { declared_type: String },

    #[error("File size exceeds {} limit.", display_limit(.max))]
    TooLarge { size: u64, max: u64 },

    #[error("Failed to read video file: {reason}")]
    ReadFailed { reason: String },

    #[error("Invalid YouTube URL. Please use a standard YouTube link.")]
    InvalidUrl {
        url: String,
        #[source]
        source: YoutubeIdError,
    },
}

impl ValidationError {
    pub fn not_a_video(declared_type: impl Into<String>) -> Self {
        Self::NotAVideo {
            declared_type: declared_type.into(),
        }
    }

    pub fn read_failed(reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            reason: reason.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, source: YoutubeIdError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}

/// `20971520` → `20MB`, `1024` → `1KB`, `1000` → `1000 bytes`.
fn display_limit(max: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    match *max {
        n if n >= MB && n % MB == 0 => format!("{}MB", n / MB),
        n if n >= KB && n % KB == 0 => format!("{}KB", n / KB),
        n => format!("{} bytes", n),
    }
}

impl From<std::io::Error> for ValidationError {
    fn from(err: std::io::Error) -> Self {
        Self::read_failed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::not_a_video("image/png").to_string(),
            "Please upload a valid video file."
        );
        assert_eq!(
            ValidationError::TooLarge {
                size: 21 * 1024 * 1024,
                max: 20 * 1024 * 1024,
            }
            .to_string(),
            "File size exceeds 20MB limit."
        );
        assert_eq!(
            ValidationError::invalid_url("nope", YoutubeIdError::VideoIdNotFound).to_string(),
            "Invalid YouTube URL. Please use a standard YouTube link."
        );
    }

    #[test]
    fn test_small_limits_stay_readable() {
        let too_large = |max: u64| ValidationError::TooLarge { size: max + 1, max }.to_string();

        assert_eq!(too_large(1024), "File size exceeds 1KB limit.");
        assert_eq!(too_large(1000), "File size exceeds 1000 bytes limit.");
        assert_eq!(too_large(1536 * 1024), "File size exceeds 1536KB limit.");
        assert_eq!(too_large(5 * 1024 * 1024), "File size exceeds 5MB limit.");
    }

    #[test]
    fn test_io_error_becomes_read_failed() {
        let err: ValidationError =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "early eof").into();
        assert!(matches!(err, ValidationError::ReadFailed { .. }));
        assert!(err.to_string().contains("early eof"));
    }
}
