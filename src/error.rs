use thiserror::Error;

/// Central error type for the demucs-stems crate.
///
/// These only surface from the fallible internals. The separation entry
/// points fold every one of them into absence markers.
#[derive(Debug, Error)]
pub enum SeparationError {
    // Generic fallback (wraps anyhow)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio error: {0}")]
    Audio(#[from] hound::Error),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SeparationError {
    fn from(e: serde_json::Error) -> Self {
        SeparationError::Registry(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SeparationError>;
