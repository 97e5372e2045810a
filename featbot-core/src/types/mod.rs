//! Core types: user, chat, update, command, reply, handler response, and Handler trait.
//!
//! One file per main type, as in the rest of the workspace.

mod chat;
mod command;
mod handler;
mod reply;
mod response;
mod update;
mod user;

pub use chat::Chat;
pub use command::Command;
pub use handler::Handler;
pub use reply::{Button, ButtonAction, ParseMode, Reply, ReplyBody};
pub use response::HandlerResponse;
pub use update::{CallbackQuery, Location, MessageContent, PhotoSize, Update, UpdateContent};
pub use user::User;
