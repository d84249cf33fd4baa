use thiserror::Error;

/// Errors raised by the fallible parts of the registry.
///
/// Cell reads, writes and subscriptions never fail; only parsing and
/// snapshot decoding do.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid theme mode: {0:?} (expected \"light\" or \"dark\")")]
    InvalidThemeMode(String),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T, E = StateError> = std::result::Result<T, E>;
