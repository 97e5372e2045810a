//! Leaf handlers and the registry that maps commands, content kinds and callback tokens to them.

mod callbacks;
mod commands;
mod content;

use std::sync::Arc;

use dispatcher::{DispatchKey, HandlerRegistry};
use featbot_core::Handler;

use crate::config::BotConfig;

pub use callbacks::{DiceCallback, StatsCallback, DICE, STATS};
pub use commands::{
    CapsHandler, EchoHandler, FlipHandler, HelpHandler, JokeHandler, RollHandler, StartHandler,
    TimeHandler, JOKES,
};
pub use content::{LocationHandler, PhotoHandler, StickerHandler, TextHandler};

/// Builds the handler table. Commands listed in `RATE_LIMITED_COMMANDS` are registered as
/// rate-limited.
pub fn build_registry(config: &BotConfig, bot_username: Option<String>) -> HandlerRegistry {
    let commands: [(&str, Arc<dyn Handler>); 8] = [
        ("start", Arc::new(StartHandler::new(config.links.clone()))),
        ("help", Arc::new(HelpHandler)),
        ("echo", Arc::new(EchoHandler)),
        ("caps", Arc::new(CapsHandler)),
        ("time", Arc::new(TimeHandler)),
        ("roll", Arc::new(RollHandler)),
        ("flip", Arc::new(FlipHandler)),
        ("joke", Arc::new(JokeHandler)),
    ];

    let builder = commands
        .into_iter()
        .fold(HandlerRegistry::builder(), |builder, (name, handler)| {
            let limited = config.dispatch.is_rate_limited(name);
            builder.register(DispatchKey::Command(name.to_string()), handler, limited)
        });

    builder
        .bot_username(bot_username)
        .register(DispatchKey::Text, Arc::new(TextHandler), false)
        .register(DispatchKey::Photo, Arc::new(PhotoHandler), false)
        .register(DispatchKey::Sticker, Arc::new(StickerHandler), false)
        .register(DispatchKey::Location, Arc::new(LocationHandler), false)
        .callback(DICE, Arc::new(DiceCallback))
        .callback(STATS, Arc::new(StatsCallback))
        .build()
}
