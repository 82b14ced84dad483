//! Analysis dispatcher.
//!
//! Builds one `generateContent` request for a `(video, mode)` pair, sends it
//! through an [`InferenceBackend`], and folds the response or error into an
//! [`AnalysisOutcome`]. Uploaded files travel inline. YouTube links travel
//! as text with the search tool enabled, since the service cannot fetch the
//! video itself.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vidinsight_models::{
    AnalysisMode, AnalysisOutcome, DirectiveTable, RemoteVideo, VideoInput, FALLBACK_INSTRUCTION,
};

use crate::backend::InferenceBackend;
use crate::config::AnalysisConfig;
use crate::credentials::Credentials;
use crate::error::AnalysisResult;
use crate::gemini::GeminiClient;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, Part, Tool};

/// Failure reason when no API key is available.
pub const MISSING_CREDENTIALS_REASON: &str = "missing credentials";

/// Sends analysis requests; holds no per-call state.
pub struct Dispatcher {
    backend: Arc<dyn InferenceBackend>,
    directives: Arc<DirectiveTable>,
    model: String,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        directives: Arc<DirectiveTable>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            directives,
            model: model.into(),
        }
    }

    /// Gemini-backed dispatcher with the configured directive table.
    pub fn from_config(config: &AnalysisConfig) -> AnalysisResult<Self> {
        let backend = GeminiClient::from_config(config)?;
        let directives = config.directive_table()?;
        Ok(Self::new(
            Arc::new(backend),
            Arc::new(directives),
            config.model.clone(),
        ))
    }

    pub fn directives(&self) -> &DirectiveTable {
        &self.directives
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one analysis. Never retries; every failure comes back as
    /// `AnalysisOutcome::Failure`.
    pub async fn dispatch(
        &self,
        video: &VideoInput,
        mode: AnalysisMode,
        credentials: &Credentials,
    ) -> AnalysisOutcome {
        let instruction = self.directives.instruction_for(mode);
        self.run(video, mode.as_str(), instruction, credentials)
            .await
    }

    /// Like [`dispatch`](Self::dispatch), but takes a raw mode name. Unknown
    /// names are analyzed with the generic fallback instruction.
    pub async fn dispatch_named(
        &self,
        video: &VideoInput,
        mode_name: &str,
        credentials: &Credentials,
    ) -> AnalysisOutcome {
        let instruction = match mode_name.parse::<AnalysisMode>() {
            Ok(mode) => self.directives.instruction_for(mode),
            Err(e) => {
                debug!(error = %e, "Using generic instruction");
                FALLBACK_INSTRUCTION
            }
        };
        self.run(video, mode_name, instruction, credentials).await
    }

    async fn run(
        &self,
        video: &VideoInput,
        mode: &str,
        instruction: &str,
        credentials: &Credentials,
    ) -> AnalysisOutcome {
        let Some(api_key) = credentials.api_key() else {
            warn!(mode, "No API key configured; skipping analysis");
            return AnalysisOutcome::failure(MISSING_CREDENTIALS_REASON);
        };

        let request = build_request(video, instruction);
        info!(
            mode,
            source = %video.source(),
            model = %self.model,
            search = request.uses_google_search(),
            "Dispatching video analysis"
        );

        match self
            .backend
            .generate_content(&self.model, &request, api_key)
            .await
        {
            Ok(response) => {
                if let VideoInput::Youtube(remote) = video {
                    trace_grounding(remote, &response);
                }
                let text = response.text();
                if text.is_empty() {
                    info!(mode, "Model returned no text");
                }
                AnalysisOutcome::success(text)
            }
            Err(e) => {
                warn!(mode, error = %e, "Video analysis failed");
                AnalysisOutcome::failure(e.failure_reason())
            }
        }
    }
}

/// Build the request for `video`.
///
/// Files become an inline-data part followed by the instruction, with no
/// tools. YouTube links become a single text part with the search tool
/// enabled.
pub fn build_request(video: &VideoInput, instruction: &str) -> GenerateContentRequest {
    match video {
        VideoInput::File(file) => GenerateContentRequest::user(
            vec![
                Part::inline_data(file.mime_type(), file.payload()),
                Part::text(instruction),
            ],
            Vec::new(),
        ),
        VideoInput::Youtube(remote) => GenerateContentRequest::user(
            vec![Part::text(youtube_prompt(remote, instruction))],
            vec![Tool::google_search()],
        ),
    }
}

fn youtube_prompt(remote: &RemoteVideo, instruction: &str) -> String {
    format!(
        "I have provided a YouTube video URL below.\n\n\
         Video URL: {url}\n\n\
         Task: {instruction}\n\n\
         Please use the Google Search tool to find information, transcripts, or summaries \
         about this video to answer the request accurately.",
        url = remote.source_url(),
    )
}

/// Advisory only.
fn trace_grounding(remote: &RemoteVideo, response: &GenerateContentResponse) {
    for chunk in response.grounding_chunks() {
        if let Some(web) = &chunk.web {
            info!(
                video_id = remote.external_id(),
                uri = web.uri.as_deref().unwrap_or_default(),
                title = web.title.as_deref().unwrap_or_default(),
                "Used grounding chunk"
            );
        }
    }
}
