//! Gemini AI client for video analysis.
//!
//! Sends one `generateContent` call per request to the Gemini REST API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::backend::InferenceBackend;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::wire::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
}

impl GeminiClient {
    /// Create a client against `base_url` (scheme and host, optionally a
    /// path prefix).
    pub fn new(base_url: &str) -> AnalysisResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            AnalysisError::config(format!("Invalid Gemini base URL '{}': {}", base_url, e))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> AnalysisResult<Self> {
        Self::new(&config.api_base_url)
    }

    fn endpoint(&self, model: &str) -> AnalysisResult<Url> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", model))
            .map_err(|e| AnalysisError::config(format!("Invalid model '{}': {}", model, e)))
    }
}

#[async_trait]
impl InferenceBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        api_key: &str,
    ) -> AnalysisResult<GenerateContentResponse> {
        let url = self.endpoint(model)?;
        debug!(%url, "Calling Gemini generateContent");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| error_text.trim().to_string());
            return Err(AnalysisError::api(status.as_u16(), message));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AnalysisError::decode(e.to_string()))
    }
}
