//! Terminal sink for failures from handlers and from the dispatch loop.

use tracing::error;

use crate::error::BotError;
use crate::types::Update;

/// Where a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub update_id: i64,
    pub user_id: i64,
    pub chat_id: i64,
    /// Dispatch key of the handler (`command:roll`, `photo`, `callback:stats`, ...).
    pub key: String,
    /// Stage that failed (`handler`, `error_reply`, `callback_ack`).
    pub stage: &'static str,
}

impl ErrorContext {
    pub fn for_update(update: &Update, key: impl Into<String>, stage: &'static str) -> Self {
        Self {
            update_id: update.id,
            user_id: update.user.id,
            chat_id: update.chat.id,
            key: key.into(),
            stage,
        }
    }
}

/// Records a failure. Implementations must not panic and must not retry.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &ErrorContext, error: &BotError);
}

/// Production reporter: one structured `error!` event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: &ErrorContext, error: &BotError) {
        error!(
            update_id = context.update_id,
            user_id = context.user_id,
            chat_id = context.chat_id,
            key = %context.key,
            stage = context.stage,
            error_kind = error.kind(),
            error = %error,
            "Unhandled error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chat, MessageContent, UpdateContent, User};

    #[test]
    fn test_context_from_update() {
        let update = Update {
            id: 10,
            user: User {
                id: 42,
                first_name: "Bob".to_string(),
                username: None,
            },
            chat: Chat { id: 99 },
            message_id: Some(1),
            content: UpdateContent::Message(MessageContent::default()),
        };
        let ctx = ErrorContext::for_update(&update, "command:roll", "handler");
        assert_eq!(ctx.update_id, 10);
        assert_eq!(ctx.user_id, 42);
        assert_eq!(ctx.chat_id, 99);
        assert_eq!(ctx.key, "command:roll");
        assert_eq!(ctx.stage, "handler");
    }

    #[test]
    fn test_tracing_reporter_does_not_panic_without_subscriber() {
        let ctx = ErrorContext {
            update_id: 1,
            user_id: 2,
            chat_id: 3,
            key: "text".to_string(),
            stage: "handler",
        };
        TracingErrorReporter.report(&ctx, &BotError::Transport("down".to_string()));
    }
}
