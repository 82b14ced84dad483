//! Analysis modes, their instruction directives, and analysis outcomes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Instruction used when a mode has no directive in the active table.
pub const FALLBACK_INSTRUCTION: &str = "Analyze this video.";

/// Markdown returned when the model answers with no text.
pub const EMPTY_RESULT_MARKDOWN: &str =
    "No analysis generated. The model might not have found enough information about this video.";

/// Failure reason used when the underlying error carries no message.
pub const GENERIC_FAILURE_REASON: &str = "Failed to analyze video";

/// Canned analyses a user can request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    Summary,
    Flashcards,
    KeyLessons,
    Quiz,
    TranscriptHighlights,
}

impl AnalysisMode {
    /// All modes in presentation order.
    pub const ALL: &'static [AnalysisMode] = &[
        AnalysisMode::Summary,
        AnalysisMode::Flashcards,
        AnalysisMode::KeyLessons,
        AnalysisMode::Quiz,
        AnalysisMode::TranscriptHighlights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Summary => "SUMMARY",
            AnalysisMode::Flashcards => "FLASHCARDS",
            AnalysisMode::KeyLessons => "KEY_LESSONS",
            AnalysisMode::Quiz => "QUIZ",
            AnalysisMode::TranscriptHighlights => "TRANSCRIPT_HIGHLIGHTS",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = AnalysisModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUMMARY" => Ok(AnalysisMode::Summary),
            "FLASHCARDS" => Ok(AnalysisMode::Flashcards),
            "KEY_LESSONS" => Ok(AnalysisMode::KeyLessons),
            "QUIZ" => Ok(AnalysisMode::Quiz),
            "TRANSCRIPT_HIGHLIGHTS" => Ok(AnalysisMode::TranscriptHighlights),
            _ => Err(AnalysisModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown analysis mode: {0}")]
pub struct AnalysisModeParseError(String);

/// Static instruction text paired with an analysis mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisDirective {
    pub mode: AnalysisMode,
    /// Short name shown on the option button
    pub label: String,
    /// One-line explanation shown under the label
    #[serde(default)]
    pub description: String,
    /// Prompt text sent to the model
    pub instruction: String,
}

impl AnalysisDirective {
    pub fn new(
        mode: AnalysisMode,
        label: impl Into<String>,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            label: label.into(),
            description: description.into(),
            instruction: instruction.into(),
        }
    }
}

/// Immutable mode → directive lookup, injected into the dispatcher.
///
/// A table may be partial; lookups for a missing mode fall back to
/// [`FALLBACK_INSTRUCTION`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectiveTable {
    directives: BTreeMap<AnalysisMode, AnalysisDirective>,
}

impl DirectiveTable {
    /// The built-in directives for every mode.
    pub fn builtin() -> Self {
        Self::from_directives([
            AnalysisDirective::new(
                AnalysisMode::Summary,
                "Summary",
                "Get a concise summary of the video content.",
                "Analyze the uploaded video and provide a comprehensive summary of its content. \
                 Organize the summary with a main overview followed by bullet points for key details.",
            ),
            AnalysisDirective::new(
                AnalysisMode::Flashcards,
                "Flashcards",
                "Generate study flashcards from the video.",
                "Create a set of study flashcards based on the information in this video. \
                 Format the output strictly as a list where each item has a 'Front' (Question/Concept) \
                 and a 'Back' (Answer/Explanation). Use markdown for clear separation.",
            ),
            AnalysisDirective::new(
                AnalysisMode::KeyLessons,
                "Key Lessons",
                "Extract the main educational points or life lessons.",
                "Identify and list the key lessons, takeaways, or educational points from this video. \
                 Explain why each lesson is important based on the video context.",
            ),
            AnalysisDirective::new(
                AnalysisMode::Quiz,
                "Quiz",
                "Generate a multiple-choice quiz.",
                "Generate a multiple-choice quiz (5 questions) based on the video content. \
                 Provide the question, 4 options (A, B, C, D), and then reveal the correct answer \
                 with a brief explanation for each.",
            ),
            AnalysisDirective::new(
                AnalysisMode::TranscriptHighlights,
                "Highlights",
                "Extract key quotes and timestamps.",
                "List the most significant quotes or moments from the video. If visual timestamps \
                 are visible or inferable, include estimated timestamps. Focus on the most impactful \
                 parts of the dialogue or visual narrative.",
            ),
        ])
    }

    /// Build a table from directives. Later entries replace earlier ones for
    /// the same mode.
    pub fn from_directives(directives: impl IntoIterator<Item = AnalysisDirective>) -> Self {
        Self {
            directives: directives
                .into_iter()
                .map(|directive| (directive.mode, directive))
                .collect(),
        }
    }

    /// Append an output-language requirement to every instruction.
    pub fn with_output_language(mut self, language: &str) -> Self {
        let language = language.trim();
        if language.is_empty() {
            return self;
        }

        let suffix = format!(
            " PLEASE PROVIDE THE OUTPUT ENTIRELY IN {}.",
            language.to_uppercase()
        );
        for directive in self.directives.values_mut() {
            directive.instruction.push_str(&suffix);
        }
        self
    }

    pub fn get(&self, mode: AnalysisMode) -> Option<&AnalysisDirective> {
        self.directives.get(&mode)
    }

    /// Instruction text for `mode`, or the generic fallback.
    pub fn instruction_for(&self, mode: AnalysisMode) -> &str {
        self.get(mode)
            .map(|directive| directive.instruction.as_str())
            .unwrap_or(FALLBACK_INSTRUCTION)
    }

    /// Directives in presentation order.
    pub fn options(&self) -> impl Iterator<Item = &AnalysisDirective> {
        self.directives.values()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Result of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success { markdown: String },
    Failure { reason: String },
}

impl AnalysisOutcome {
    /// Successful outcome; empty model output becomes [`EMPTY_RESULT_MARKDOWN`].
    pub fn success(markdown: impl Into<String>) -> Self {
        let markdown = markdown.into();
        if markdown.is_empty() {
            return AnalysisOutcome::Success {
                markdown: EMPTY_RESULT_MARKDOWN.to_string(),
            };
        }
        AnalysisOutcome::Success { markdown }
    }

    /// Failed outcome; a blank reason becomes [`GENERIC_FAILURE_REASON`].
    pub fn failure(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return AnalysisOutcome::Failure {
                reason: GENERIC_FAILURE_REASON.to_string(),
            };
        }
        AnalysisOutcome::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success { .. })
    }

    pub fn markdown(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success { markdown } => Some(markdown),
            AnalysisOutcome::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success { .. } => None,
            AnalysisOutcome::Failure { reason } => Some(reason),
        }
    }
}
