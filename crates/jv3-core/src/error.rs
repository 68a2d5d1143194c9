//! Error types for the jv3 core library

use thiserror::Error;

/// Result type alias using Jv3Error
pub type Result<T> = std::result::Result<T, Jv3Error>;

/// Errors raised by the collaborators around the core (clipboard, files, config).
///
/// Classification and view routing never fail; only the glue that talks to
/// the outside world does.
#[derive(Debug, Error)]
pub enum Jv3Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A clipboard helper ran but reported failure
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// None of the known clipboard helpers could be started
    #[error("No clipboard tool available (tried {0})")]
    NoClipboardTool(String),

    /// The platform opener could not be launched
    #[error("Could not open preview: {0}")]
    Opener(String),

    /// Platform config directory could not be determined
    #[error("Could not determine config directory")]
    ConfigDir,
}

impl Jv3Error {
    /// Create a clipboard error with a message
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }
}
