//! Analysis configuration.

use std::path::{Path, PathBuf};

use vidinsight_models::{AnalysisDirective, DirectiveTable, DEFAULT_MAX_FILE_BYTES};

use crate::error::{AnalysisError, AnalysisResult};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Gemini model identifier
    pub model: String,
    /// Base URL of the Gemini REST API
    pub api_base_url: String,
    /// Maximum accepted upload size in bytes
    pub max_file_bytes: u64,
    /// Language every answer must be written in, if any
    pub output_language: Option<String>,
    /// JSON file with replacement directives
    pub directives_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            output_language: None,
            directives_path: None,
        }
    }
}

impl AnalysisConfig {
    /// Load `.env` (if present), then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load a specific env file, then read the environment. Variables already
    /// set in the process take precedence over the file.
    pub fn load_from(path: &Path) -> AnalysisResult<Self> {
        dotenvy::from_path(path).map_err(|e| {
            AnalysisError::config(format!(
                "Failed to load env file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_env())
    }

    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source. Unset, blank or
    /// unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            model: var("VIDINSIGHT_MODEL").unwrap_or(defaults.model),
            api_base_url: var("VIDINSIGHT_API_BASE_URL").unwrap_or(defaults.api_base_url),
            max_file_bytes: var("VIDINSIGHT_MAX_FILE_MB")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .and_then(|mb| mb.checked_mul(1024 * 1024))
                .unwrap_or(defaults.max_file_bytes),
            output_language: var("VIDINSIGHT_OUTPUT_LANGUAGE"),
            directives_path: var("VIDINSIGHT_DIRECTIVES_PATH").map(PathBuf::from),
        }
    }

    /// Build the directive table this configuration describes.
    ///
    /// Uses the built-in directives unless `directives_path` is set.
    pub fn directive_table(&self) -> AnalysisResult<DirectiveTable> {
        let table = match &self.directives_path {
            Some(path) => load_directives(path)?,
            None => DirectiveTable::builtin(),
        };

        Ok(match &self.output_language {
            Some(language) => table.with_output_language(language),
            None => table,
        })
    }
}

/// Read a JSON array of directives.
fn load_directives(path: &Path) -> AnalysisResult<DirectiveTable> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AnalysisError::config(format!(
            "Failed to read directives file {}: {}",
            path.display(),
            e
        ))
    })?;

    let directives: Vec<AnalysisDirective> = serde_json::from_str(&raw).map_err(|e| {
        AnalysisError::config(format!(
            "Invalid directives file {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(DirectiveTable::from_directives(directives))
}
