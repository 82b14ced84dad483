//! Shared data models for VidInsight.
//!
//! This crate provides Serde-serializable types for:
//! - Normalized video inputs (uploaded files and YouTube links)
//! - Analysis modes and their instruction directives
//! - Analysis outcomes returned to callers
//! - YouTube video ID extraction

pub mod analysis;
pub mod error;
pub mod utils;
pub mod video;

// Re-export common types
pub use analysis::{
    AnalysisDirective, AnalysisMode, AnalysisModeParseError, AnalysisOutcome, DirectiveTable,
    EMPTY_RESULT_MARKDOWN, FALLBACK_INSTRUCTION, GENERIC_FAILURE_REASON,
};
pub use error::{ValidationError, ValidationResult};
pub use utils::{extract_youtube_id, YoutubeIdError, YoutubeIdResult, YOUTUBE_ID_LEN};
pub use video::{FileVideo, RemoteVideo, VideoInput, VideoSource, DEFAULT_MAX_FILE_BYTES};
