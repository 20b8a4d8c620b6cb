//! Adapter error types.

use thiserror::Error;

/// Errors surfaced while bringing the adapter up.
///
/// Per-frame work never fails: blits are memory copies and the toolkit's
/// flip/poll calls are trusted.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("failed to connect to compositor: {0}")]
    Connect(String),

    #[error("failed to create window: {0}")]
    WindowCreate(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AdapterError {
    /// Connection failure with a message.
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }

    /// Window creation failure with a message.
    pub fn window_create(msg: impl Into<String>) -> Self {
        Self::WindowCreate(msg.into())
    }
}

/// Result type for adapter setup.
pub type Result<T> = std::result::Result<T, AdapterError>;
