//! Pre-issued API credentials.

use std::fmt;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

/// API key used to authenticate against the inference service.
///
/// Absence is not an error here; it is reported by the dispatcher at the
/// first dispatch.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
        }
    }

    /// No credentials at all.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Read `API_KEY`, falling back to `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        API_KEY_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .map(Self::new)
            .find(Self::is_present)
            .unwrap_or_default()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<missing>"
        };
        f.debug_struct("Credentials").field("api_key", &key).finish()
    }
}
