//! # featbot
//!
//! Telegram front end for the dispatcher: loads config from env, registers the leaf handlers,
//! adapts teloxide updates to [`featbot_core::Update`] and runs long polling.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig, DispatchConfig, LinksConfig};
pub use handlers::build_registry;
pub use runner::{build_dispatcher, build_telegram_bot, run_bot};
pub use telegram::{run_polling, TelegramBotAdapter};
