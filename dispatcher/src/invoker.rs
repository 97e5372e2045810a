//! Runs one handler with failure isolation.
//!
//! Nothing escapes [`SafeInvoker::run`]: handler errors and panics are reported and turned into an
//! [`InvokeOutcome`], so one bad handler cannot take down the dispatch loop.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use featbot_core::{
    deliver, Bot, ErrorContext, ErrorReporter, Handler, HandlerError, HandlerResponse, Reply,
    Update,
};
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::registry::DispatchKey;

/// What happened to one handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// Handler produced a reply and it was sent.
    Replied,
    /// Handler chose not to reply.
    NoReply,
    /// Handler or reply send failed; `kind` is [`featbot_core::BotError::kind`].
    Failed { kind: &'static str },
}

pub struct SafeInvoker {
    bot: Arc<dyn Bot>,
    reporter: Arc<dyn ErrorReporter>,
    error_reply: Option<String>,
}

impl SafeInvoker {
    /// `error_reply` is the generic text sent after a handler failure. `None` or empty sends
    /// nothing.
    pub fn new(
        bot: Arc<dyn Bot>,
        reporter: Arc<dyn ErrorReporter>,
        error_reply: Option<String>,
    ) -> Self {
        Self {
            bot,
            reporter,
            error_reply: error_reply.filter(|text| !text.is_empty()),
        }
    }

    pub async fn run(
        &self,
        handler: &dyn Handler,
        update: &Update,
        key: &DispatchKey,
    ) -> InvokeOutcome {
        let result = AssertUnwindSafe(handler.handle(update))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload)).into()));

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                let kind = error.kind();
                self.reporter
                    .report(&ErrorContext::for_update(update, key.to_string(), "handler"), &error);
                self.send_error_reply(update, key).await;
                return InvokeOutcome::Failed { kind };
            }
        };

        let reply = match response {
            HandlerResponse::Ignore => {
                debug!(update_id = update.id, key = %key, "step: handler returned no reply");
                return InvokeOutcome::NoReply;
            }
            HandlerResponse::Reply(reply) => reply,
        };

        match deliver(self.bot.as_ref(), &update.chat, &reply).await {
            Ok(()) => {
                info!(
                    update_id = update.id,
                    user_id = update.user.id,
                    chat_id = update.chat.id,
                    key = %key,
                    "step: reply sent"
                );
                InvokeOutcome::Replied
            }
            Err(error) => {
                let kind = error.kind();
                self.reporter
                    .report(&ErrorContext::for_update(update, key.to_string(), "reply"), &error);
                InvokeOutcome::Failed { kind }
            }
        }
    }

    // One attempt; a failure here is reported and dropped.
    async fn send_error_reply(&self, update: &Update, key: &DispatchKey) {
        let Some(text) = &self.error_reply else {
            return;
        };
        if let Err(error) = self.bot.send_reply(&update.chat, &Reply::text(text.as_str())).await {
            warn!(update_id = update.id, key = %key, "step: error reply failed");
            self.reporter
                .report(&ErrorContext::for_update(update, key.to_string(), "error_reply"), &error);
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl std::fmt::Debug for SafeInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeInvoker")
            .field("error_reply", &self.error_reply)
            .finish_non_exhaustive()
    }
}
