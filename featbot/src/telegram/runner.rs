//! Long-polling runner: converts teloxide updates to core updates and hands them to the
//! [`dispatcher::Dispatcher`]. Blocks until Ctrl-C.

use std::sync::Arc;

use teloxide::dispatching::{Dispatcher as TelegramDispatcher, UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message};
use tracing::{debug, info, instrument};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

type CoreDispatcher = dispatcher::Dispatcher;

/// Starts polling with the given teloxide Bot. Each message, edited message or button press becomes
/// one `on_update` call; teloxide runs updates from different chats concurrently.
#[instrument(skip_all)]
pub async fn run_polling(bot: teloxide::Bot, dispatcher: Arc<CoreDispatcher>) {
    info!("step: polling started");
    TelegramDispatcher::builder(bot, schema())
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update kind");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("featbot"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("step: polling stopped");
}

fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_edited_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query))
}

async fn on_message(
    upd: Update,
    msg: Message,
    dispatcher: Arc<CoreDispatcher>,
) -> ResponseResult<()> {
    match TelegramMessageWrapper(&msg).to_core(upd.id.0 as i64) {
        Some(update) => {
            dispatcher.on_update(&update).await;
        }
        None => debug!(chat_id = msg.chat.id.0, "Message without sender ignored"),
    }
    Ok(())
}

async fn on_callback_query(
    upd: Update,
    q: CallbackQuery,
    dispatcher: Arc<CoreDispatcher>,
) -> ResponseResult<()> {
    let update = TelegramCallbackWrapper(&q).to_core(upd.id.0 as i64);
    dispatcher.on_update(&update).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use dispatcher::{DispatchContext, DispatchKey, HandlerRegistry, RateLimiter};
    use featbot_core::{
        Handler, HandlerResponse, Result as CoreResult, TracingErrorReporter, Update as CoreUpdate,
    };
    use serde_json::json;

    use crate::telegram::TelegramBotAdapter;

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Handler for Counting {
        async fn handle(&self, _update: &CoreUpdate) -> CoreResult<HandlerResponse> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResponse::Ignore)
        }
    }

    fn core_dispatcher(location_calls: Arc<AtomicUsize>) -> Arc<CoreDispatcher> {
        let registry = HandlerRegistry::builder()
            .register(DispatchKey::Location, Arc::new(Counting(location_calls)), false)
            .build();
        Arc::new(CoreDispatcher::new(DispatchContext {
            registry: Arc::new(registry),
            limiter: Arc::new(RateLimiter::default()),
            bot: Arc::new(TelegramBotAdapter::new(teloxide::Bot::new("123:test"))),
            reporter: Arc::new(TracingErrorReporter),
            error_reply: None,
        }))
    }

    fn location_message() -> serde_json::Value {
        json!({
            "message_id": 10,
            "date": 1_700_000_000,
            "edit_date": 1_700_000_060,
            "chat": { "id": 42, "type": "private", "first_name": "Ann" },
            "from": { "id": 42, "is_bot": false, "first_name": "Ann" },
            "location": { "latitude": 48.85, "longitude": 2.35, "live_period": 900 }
        })
    }

    /// **Test: Live-location edits reach the dispatcher like new messages.**
    #[tokio::test]
    async fn test_edited_message_is_dispatched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = core_dispatcher(calls.clone());
        let upd: Update = serde_json::from_str(
            &json!({
                "update_id": 900,
                "edited_message": location_message()
            })
            .to_string(),
        )
        .unwrap();

        let flow = schema().dispatch(dptree::deps![upd, dispatcher]).await;

        assert!(matches!(flow, ControlFlow::Break(Ok(()))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_new_message_is_dispatched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = core_dispatcher(calls.clone());
        let upd: Update = serde_json::from_str(
            &json!({
                "update_id": 901,
                "message": location_message()
            })
            .to_string(),
        )
        .unwrap();

        let flow = schema().dispatch(dptree::deps![upd, dispatcher]).await;

        assert!(matches!(flow, ControlFlow::Break(Ok(()))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
