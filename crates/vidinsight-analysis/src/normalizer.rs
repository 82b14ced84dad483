//! Video ingestion normalizer.
//!
//! Turns a raw user selection (a file or a pasted link) into a validated
//! [`FileVideo`] or [`RemoteVideo`]. Validation is local: the file is read
//! into memory, URLs are checked syntactically, and nothing is sent over the
//! network.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;
use vidinsight_models::{
    FileVideo, RemoteVideo, ValidationError, ValidationResult, DEFAULT_MAX_FILE_BYTES,
};

use crate::config::AnalysisConfig;

/// Where the bytes of a raw file live.
#[derive(Clone, PartialEq, Eq)]
pub enum FileSource {
    /// On disk; read asynchronously
    Path(PathBuf),
    /// Already in memory (e.g. an upload body)
    Bytes(Vec<u8>),
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// A user-selected file before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// File name shown to the user
    pub name: String,
    /// Media type reported by the caller, e.g. `video/mp4`
    pub declared_type: String,
    pub source: FileSource,
}

impl RawFile {
    /// A file on disk; the declared type is guessed from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let declared_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Self {
            name,
            declared_type,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Override the guessed media type.
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = declared_type.into();
        self
    }
}

/// Validates raw inputs into canonical video values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    max_file_bytes: u64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl Normalizer {
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.max_file_bytes)
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    /// Validate, read and base64-encode a video file.
    ///
    /// Checks run in order: media type, size, then the read itself. The size
    /// check happens before any bytes are read.
    pub async fn normalize_file(&self, raw: RawFile) -> ValidationResult<FileVideo> {
        let RawFile {
            name,
            declared_type,
            source,
        } = raw;

        let mime_type = media_type_essence(&declared_type);
        if !mime_type.starts_with("video/") {
            return Err(ValidationError::not_a_video(declared_type));
        }

        let bytes = match source {
            FileSource::Path(path) => {
                let expected = tokio::fs::metadata(&path).await?.len();
                self.check_size(expected)?;

                let file = tokio::fs::File::open(&path).await?;
                self.read_bounded(file, expected).await?
            }
            FileSource::Bytes(bytes) => {
                self.check_size(bytes.len() as u64)?;
                bytes
            }
        };

        let byte_size = bytes.len() as u64;
        let payload = STANDARD.encode(&bytes);
        debug!(
            file = %name,
            mime_type = %mime_type,
            byte_size,
            "Normalized video file"
        );

        FileVideo::new(name, byte_size, mime_type, payload)
    }

    /// Validate a pasted YouTube URL.
    pub fn normalize_url(&self, raw_url: &str) -> ValidationResult<RemoteVideo> {
        RemoteVideo::from_url(raw_url)
    }

    /// Read at most one byte past the limit, so pipes and files that grow
    /// after the metadata check still fail with `TooLarge`. Ending short of
    /// `expected` means the file was truncated mid-read.
    async fn read_bounded<R>(&self, reader: R, expected: u64) -> ValidationResult<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let mut bytes = Vec::new();
        reader
            .take(self.max_file_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .await?;

        let read = bytes.len() as u64;
        self.check_size(read)?;
        if read < expected {
            return Err(ValidationError::read_failed(format!(
                "expected {} bytes but read {}",
                expected, read
            )));
        }
        Ok(bytes)
    }

    fn check_size(&self, size: u64) -> ValidationResult<()> {
        if size > self.max_file_bytes {
            return Err(ValidationError::TooLarge {
                size,
                max: self.max_file_bytes,
            });
        }
        Ok(())
    }
}

/// `video/MP4; codecs="avc1"` → `video/mp4`.
fn media_type_essence(declared: &str) -> String {
    declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
