//! Utility functions for YouTube URL parsing and validation.
//!
//! Extraction is purely syntactic: no network request is made and the
//! domain is not resolved. A single pattern covers the supported URL shapes:
//! - https://youtu.be/VIDEO_ID
//! - https://youtube.com/embed/VIDEO_ID
//! - https://youtube.com/v/VIDEO_ID
//! - https://youtube.com/shorts/VIDEO_ID
//! - https://youtube.com/user/NAME#p/u/1/VIDEO_ID (channel-qualified)
//! - https://youtube.com/watch?v=VIDEO_ID and `...&v=VIDEO_ID`

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Length of every YouTube video ID.
pub const YOUTUBE_ID_LEN: usize = 11;

/// The prefix is greedy, so the last recognised marker in the URL wins.
static YOUTUBE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|shorts/|watch\?v=|&v=)([^#&?]*).*")
        .unwrap()
});

/// Errors that can occur during YouTube ID extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YoutubeIdError {
    /// No supported URL shape matched, or the ID segment is empty
    #[error("Video ID not found in URL")]
    VideoIdNotFound,
    /// A candidate was found but it is not a well-formed 11-character ID
    #[error("Video ID has invalid format")]
    InvalidVideoId,
}

/// Result type for YouTube ID extraction.
pub type YoutubeIdResult<T> = Result<T, YoutubeIdError>;

/// Extract the 11-character YouTube video ID from a URL.
///
/// Surrounding whitespace is ignored.
pub fn extract_youtube_id(url: &str) -> YoutubeIdResult<String> {
    let candidate = candidate_id(url.trim()).ok_or(YoutubeIdError::VideoIdNotFound)?;
    validate_youtube_id(candidate)
}

/// Find the raw ID segment following the last recognised URL marker.
fn candidate_id(url: &str) -> Option<&str> {
    let captures = YOUTUBE_URL_PATTERN.captures(url)?;
    let id = captures.get(2)?.as_str();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Check if string contains only valid YouTube ID characters
fn is_valid_youtube_id_chars(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validate YouTube video ID format and return it
fn validate_youtube_id(id: &str) -> YoutubeIdResult<String> {
    if id.len() != YOUTUBE_ID_LEN || !is_valid_youtube_id_chars(id) {
        return Err(YoutubeIdError::InvalidVideoId);
    }

    Ok(id.to_string())
}
