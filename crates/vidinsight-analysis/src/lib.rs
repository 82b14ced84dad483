//! Video analysis core.
//!
//! This crate provides:
//! - Normalization of uploaded files and YouTube links into [`VideoInput`]s
//! - Dispatch of a `(video, mode)` pair to Gemini as a single request
//! - Configuration, credentials and tracing setup for hosts
//!
//! [`VideoInput`]: vidinsight_models::VideoInput

pub mod backend;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod normalizer;
pub mod wire;

pub use backend::InferenceBackend;
pub use config::AnalysisConfig;
pub use credentials::Credentials;
pub use dispatcher::{build_request, Dispatcher, MISSING_CREDENTIALS_REASON};
pub use error::{AnalysisError, AnalysisResult};
pub use gemini::GeminiClient;
pub use logging::{init_tracing, init_tracing_with, LogFormat};
pub use normalizer::{FileSource, Normalizer, RawFile};
