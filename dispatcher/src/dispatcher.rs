//! Per-update dispatch: classify, rate-check, invoke.

use std::sync::Arc;
use std::time::Instant;

use featbot_core::{Bot, ErrorContext, ErrorReporter, Update};
use tracing::{debug, info, instrument};

use crate::invoker::{InvokeOutcome, SafeInvoker};
use crate::rate_limiter::{Decision, RateLimiter};
use crate::registry::{DispatchKey, HandlerRegistry};

/// Everything the dispatcher needs, passed in explicitly.
#[derive(Clone)]
pub struct DispatchContext {
    pub registry: Arc<HandlerRegistry>,
    pub limiter: Arc<RateLimiter>,
    pub bot: Arc<dyn Bot>,
    pub reporter: Arc<dyn ErrorReporter>,
    /// Generic reply after a handler failure; `None` or empty disables it.
    pub error_reply: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Nothing registered for the update's kind, command or callback token.
    NoHandler,
    /// Rate-limited handler and the user is still inside the window.
    RateLimited,
}

/// Terminal state of one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dropped(DropReason),
    Handled {
        key: DispatchKey,
        outcome: InvokeOutcome,
    },
}

impl DispatchOutcome {
    pub fn is_dropped(&self) -> bool {
        matches!(self, DispatchOutcome::Dropped(_))
    }
}

/// Shared across concurrent updates via `Arc`; holds no per-update state.
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    limiter: Arc<RateLimiter>,
    bot: Arc<dyn Bot>,
    reporter: Arc<dyn ErrorReporter>,
    invoker: SafeInvoker,
}

impl Dispatcher {
    pub fn new(ctx: DispatchContext) -> Self {
        let invoker = SafeInvoker::new(ctx.bot.clone(), ctx.reporter.clone(), ctx.error_reply);
        Self {
            registry: ctx.registry,
            limiter: ctx.limiter,
            bot: ctx.bot,
            reporter: ctx.reporter,
            invoker,
        }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub async fn on_update(&self, update: &Update) -> DispatchOutcome {
        self.on_update_at(update, Instant::now()).await
    }

    /// Dispatches `update` as if it arrived at `now` (the instant given to the rate limiter).
    #[instrument(skip_all, fields(update_id = update.id, user_id = update.user.id))]
    pub async fn on_update_at(&self, update: &Update, now: Instant) -> DispatchOutcome {
        info!(chat_id = update.chat.id, "step: update received");

        if let Some(query) = update.callback_query() {
            if let Err(error) = self.bot.answer_callback(&query.id).await {
                let key = DispatchKey::Callback(query.data.clone().unwrap_or_default());
                self.reporter.report(
                    &ErrorContext::for_update(update, key.to_string(), "callback_ack"),
                    &error,
                );
            }
        }

        let Some(route) = self.registry.lookup(update) else {
            debug!("step: no handler, update dropped");
            return DispatchOutcome::Dropped(DropReason::NoHandler);
        };

        if route.registration.rate_limited
            && self.limiter.check(update.user.id, now) == Decision::Reject
        {
            debug!(key = %route.key, "step: rate limited, update dropped");
            return DispatchOutcome::Dropped(DropReason::RateLimited);
        }

        info!(key = %route.key, "step: handler processing");
        let outcome = self
            .invoker
            .run(route.registration.handler.as_ref(), update, &route.key)
            .await;
        info!(key = %route.key, outcome = ?outcome, "step: update handled");

        DispatchOutcome::Handled {
            key: route.key,
            outcome,
        }
    }
}
