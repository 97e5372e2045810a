//! Transport abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in `featbot::telegram`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Chat, Reply, ReplyBody};

/// Outbound calls the core needs from the messaging transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text reply (parse mode, inline keyboard and link preview flag taken from `reply`).
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()>;
    /// Sends a sticker by file id.
    async fn send_sticker(&self, chat: &Chat, sticker_id: &str) -> Result<()>;
    /// Acknowledges a button press so the client clears its loading indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}

/// Sends `reply` with the transport call matching its body. One outward attempt.
pub async fn deliver(bot: &dyn Bot, chat: &Chat, reply: &Reply) -> Result<()> {
    match &reply.body {
        ReplyBody::Text { .. } => bot.send_reply(chat, reply).await,
        ReplyBody::Sticker { file_id } => bot.send_sticker(chat, file_id).await,
    }
}
