//! Inference service seam.

use async_trait::async_trait;

use crate::error::AnalysisResult;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// A remote multimodal model that answers `generateContent` requests.
///
/// Implementations perform exactly one attempt per call; no retries and no
/// internal timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        api_key: &str,
    ) -> AnalysisResult<GenerateContentResponse>;
}
