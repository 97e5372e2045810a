//! Bot configuration: BaseConfig (Telegram + log) + DispatchConfig (rate limiting, error reply)
//! + LinksConfig (start keyboard URLs).

mod base;
mod bot_config;
mod dispatch;
mod links;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use dispatch::{DispatchConfig, DEFAULT_ERROR_REPLY};
pub use links::LinksConfig;
