//! Normalized video input models.
//!
//! A [`VideoInput`] is either an uploaded file carried inline as base64, or a
//! YouTube link reduced to its video ID. Both variants are only constructible
//! through validating constructors, so a value that exists is always
//! complete.

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::utils::extract_youtube_id;

/// Default upper bound for inline uploads (20 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Where a video came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VideoSource {
    /// Uploaded file sent inline
    File,
    /// YouTube link resolved through web search
    Youtube,
}

impl VideoSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoSource::File => "file",
            VideoSource::Youtube => "youtube",
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An uploaded video file, fully read and base64-encoded.
#[derive(Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FileVideo {
    display_label: String,
    byte_size: u64,
    mime_type: String,
    payload: String,
}

impl FileVideo {
    /// Build a file video from already-encoded data.
    ///
    /// Fails with `NotAVideo` unless `mime_type` starts with `video/`, and
    /// with `ReadFailed` when the payload or size is empty.
    pub fn new(
        display_label: impl Into<String>,
        byte_size: u64,
        mime_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> ValidationResult<Self> {
        let mime_type = mime_type.into();
        if !mime_type.starts_with("video/") {
            return Err(ValidationError::not_a_video(mime_type));
        }

        let payload = payload.into();
        if payload.is_empty() || byte_size == 0 {
            return Err(ValidationError::read_failed("video file is empty"));
        }

        Ok(Self {
            display_label: display_label.into(),
            byte_size,
            mime_type,
            payload,
        })
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    /// Size of the original file in bytes (before encoding).
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64-encoded file contents.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

// The payload can be tens of megabytes; keep it out of logs.
impl fmt::Debug for FileVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileVideo")
            .field("display_label", &self.display_label)
            .field("byte_size", &self.byte_size)
            .field("mime_type", &self.mime_type)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// A YouTube video referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RemoteVideo {
    display_label: String,
    source_url: String,
    external_id: String,
}

impl RemoteVideo {
    /// Validate a pasted URL and extract its video ID.
    ///
    /// Purely syntactic; no network request is made.
    pub fn from_url(url: &str) -> ValidationResult<Self> {
        let source_url = url.trim();
        let external_id = extract_youtube_id(source_url)
            .map_err(|e| ValidationError::invalid_url(source_url, e))?;

        Ok(Self {
            display_label: format!("YouTube Video ({})", external_id),
            source_url: source_url.to_string(),
            external_id,
        })
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The 11-character YouTube video ID.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }
}

/// Canonical video input handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum VideoInput {
    File(FileVideo),
    Youtube(RemoteVideo),
}

impl VideoInput {
    pub fn source(&self) -> VideoSource {
        match self {
            VideoInput::File(_) => VideoSource::File,
            VideoInput::Youtube(_) => VideoSource::Youtube,
        }
    }

    pub fn display_label(&self) -> &str {
        match self {
            VideoInput::File(file) => file.display_label(),
            VideoInput::Youtube(remote) => remote.display_label(),
        }
    }
}

impl From<FileVideo> for VideoInput {
    fn from(file: FileVideo) -> Self {
        VideoInput::File(file)
    }
}

impl From<RemoteVideo> for VideoInput {
    fn from(remote: RemoteVideo) -> Self {
        VideoInput::Youtube(remote)
    }
}
