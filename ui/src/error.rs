//! UI error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("widget {widget} failed to render: {message}")]
    Render { widget: String, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid layout config: {0}")]
    Config(#[from] serde_json::Error),
}

impl UiError {
    /// Convenience for widgets reporting a render failure.
    pub fn render(widget: impl Into<String>, message: impl Into<String>) -> Self {
        UiError::Render {
            widget: widget.into(),
            message: message.into(),
        }
    }
}
