use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Farz";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the triage API server.
pub const DEFAULT_PORT: u16 = 7420;

/// Default base URL of the speech-to-text sidecar.
pub const DEFAULT_TRANSCRIPTION_URL: &str = "http://127.0.0.1:9000";

/// Default base URL of the local LLM runtime.
pub const DEFAULT_REASONING_URL: &str = "http://127.0.0.1:11434";

/// Default reasoning model name.
pub const DEFAULT_REASONING_MODEL: &str = "medgemma:4b";

/// Default wall-clock budget for the whole AI assist path, in seconds.
pub const DEFAULT_AI_DEADLINE_SECS: u64 = 10;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,farz=debug"
}

/// Runtime settings, read once at startup.
///
/// Every field falls back to its default when the corresponding
/// environment variable is missing or unparsable.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub transcription_url: String,
    pub reasoning_url: String,
    pub reasoning_model: String,
    pub ai_deadline: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            transcription_url: DEFAULT_TRANSCRIPTION_URL.to_string(),
            reasoning_url: DEFAULT_REASONING_URL.to_string(),
            reasoning_model: DEFAULT_REASONING_MODEL.to_string(),
            ai_deadline: Duration::from_secs(DEFAULT_AI_DEADLINE_SECS),
        }
    }
}

impl Settings {
    /// Load settings from `FARZ_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: parsed_env("FARZ_BIND_ADDR", defaults.bind_addr),
            transcription_url: string_env("FARZ_TRANSCRIPTION_URL", defaults.transcription_url),
            reasoning_url: string_env("FARZ_REASONING_URL", defaults.reasoning_url),
            reasoning_model: string_env("FARZ_REASONING_MODEL", defaults.reasoning_model),
            ai_deadline: Duration::from_secs(parsed_env(
                "FARZ_AI_DEADLINE_SECS",
                DEFAULT_AI_DEADLINE_SECS,
            )),
        }
    }
}

fn string_env(name: &str, default: String) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default,
    }
}

fn parsed_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(var = name, value = %raw, error = %e, "unparsable setting, using default");
                default
            }
        },
        Err(_) => default,
    }
}
