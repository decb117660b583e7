//! Application-wide constants.
//!
//! Centralizes API defaults, terminal escape codes, and well-known paths.

use std::path::PathBuf;

// ── Completion API ────────────────────────────────────────────────
/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Default chat model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
/// Default completion token cap -- enough for a short number, nothing more.
pub const DEFAULT_MAX_TOKENS: u32 = 10;
/// Upper bound accepted for `max_tokens` from the config file.
pub const MAX_TOKENS_CEILING: u32 = 64;
/// Sampling temperature. Fixed: replies must be deterministic.
pub const TEMPERATURE: f32 = 0.0;
/// Default HTTP request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Maximum length of a raw error body echoed back to the user.
pub const ERROR_BODY_MAX_LEN: usize = 300;

// ── Scores ────────────────────────────────────────────────────────
/// Lowest accepted polarity.
pub const MIN_POLARITY: f64 = -1.0;
/// Highest accepted polarity.
pub const MAX_POLARITY: f64 = 1.0;

// ── Terminal colors ───────────────────────────────────────────────
/// Bold red.
pub const ANSI_RED: &str = "\x1b[1;31m";
/// Bold yellow.
pub const ANSI_YELLOW: &str = "\x1b[1;33m";
/// Bold green.
pub const ANSI_GREEN: &str = "\x1b[1;32m";
/// Back to plain light gray.
pub const ANSI_RESET: &str = "\x1b[0;37m";

// ── Interactive loop ──────────────────────────────────────────────
/// Inputs (compared case-insensitively) that end the session.
pub const EXIT_KEYWORDS: &[&str] = &["salir", "exit", "quit"];

// ── Logging ───────────────────────────────────────────────────────
/// Default tracing filter when RUST_LOG is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// ── Supported Languages ───────────────────────────────────────────
/// Available UI languages.
pub const LANGUAGES: &[&str] = &["en", "es"];
/// Language used when none (or an unknown one) is configured.
pub const DEFAULT_LANG: &str = "en";

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/sentiment/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("sentiment")
}

/// Returns `~/.config/sentiment/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/sentiment/.env` (API key, never committed).
pub fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}
