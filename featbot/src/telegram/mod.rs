//! Telegram layer: adapters, Bot implementation, polling runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_keyboard, TelegramBotAdapter};
pub use runner::run_polling;
