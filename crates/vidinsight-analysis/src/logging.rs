//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; hosts call [`init_tracing`]
//! once to get colored output for dev, or JSON with `LOG_FORMAT=json`.

use tracing::Dispatch;
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

/// Filter directive applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_DIRECTIVE: &str = "vidinsight=info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `LOG_FORMAT=json` (any case) selects JSON; anything else is pretty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("LOG_FORMAT") {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed, so repeated calls
/// (tests, embedding hosts) are harmless.
pub fn init_tracing() -> bool {
    init_tracing_with(LogFormat::from_env())
}

pub fn init_tracing_with(format: LogFormat) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    build_dispatch(format, env_filter, std::io::stdout)
        .try_init()
        .is_ok()
}

fn build_dispatch<W>(format: LogFormat, env_filter: EnvFilter, writer: W) -> Dispatch
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(writer))
                .with(env_filter),
        ),
        LogFormat::Pretty => Dispatch::new(
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(true)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(env_filter),
        ),
    }
}
