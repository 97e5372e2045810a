//! # featbot-core
//!
//! Core types and traits for the bot: [`Update`], [`Reply`], the [`Bot`] transport, [`Handler`],
//! [`ErrorReporter`], error types and tracing initialization. Transport-agnostic; used by the
//! dispatcher and by the Telegram layer in `featbot`.

pub mod bot;
pub mod error;
pub mod logger;
pub mod reporter;
pub mod types;

pub use bot::{deliver, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use reporter::{ErrorContext, ErrorReporter, TracingErrorReporter};
pub use types::{
    Button, ButtonAction, CallbackQuery, Chat, Command, Handler, HandlerResponse, Location,
    MessageContent, ParseMode, PhotoSize, Reply, ReplyBody, Update, UpdateContent, User,
};
