//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error (transport, handler, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Stable, low-cardinality name of the failure kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Transport(_) => "transport",
            BotError::Handler(e) => e.kind(),
            BotError::Config(_) => "config",
            BotError::Io(_) => "io",
        }
    }
}

/// Errors produced by handlers (missing update field, bad input, panic).
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing field on update: {0}")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::MissingField(_) => "missing_field",
            HandlerError::InvalidInput(_) => "invalid_input",
            HandlerError::Panicked(_) => "panicked",
        }
    }
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(BotError::Transport("timeout".into()).kind(), "transport");
        assert_eq!(BotError::Config("bad".into()).kind(), "config");
        assert_eq!(
            BotError::from(HandlerError::MissingField("photo")).kind(),
            "missing_field"
        );
        assert_eq!(
            BotError::from(HandlerError::Panicked("boom".into())).kind(),
            "panicked"
        );
    }

    #[test]
    fn test_handler_error_display_is_wrapped() {
        let err = BotError::from(HandlerError::InvalidInput("empty".into()));
        assert_eq!(err.to_string(), "Handler error: Invalid input: empty");
    }
}
