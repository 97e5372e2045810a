//! Wraps teloxide::Bot and implements [`featbot_core::Bot`]. Production code sends messages via
//! Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use featbot_core::{
    Bot as CoreBot, BotError, Button, ButtonAction, Chat, HandlerError, ParseMode, Reply,
    ReplyBody, Result,
};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
    LinkPreviewOptions, ParseMode as TelegramParseMode,
};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn transport(e: teloxide::RequestError) -> BotError {
    BotError::Transport(e.to_string())
}

fn to_button(button: &Button) -> Result<InlineKeyboardButton> {
    match &button.action {
        ButtonAction::Callback(token) => Ok(InlineKeyboardButton::callback(
            button.label.clone(),
            token.clone(),
        )),
        ButtonAction::Url(url) => {
            let url = reqwest::Url::parse(url).map_err(|e| {
                HandlerError::InvalidInput(format!("button url {}: {}", url, e))
            })?;
            Ok(InlineKeyboardButton::url(button.label.clone(), url))
        }
    }
}

/// Converts rows of core buttons to a Telegram inline keyboard.
pub fn to_keyboard(rows: &[Vec<Button>]) -> Result<InlineKeyboardMarkup> {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(to_button).collect::<Result<Vec<_>>>())
        .collect::<Result<Vec<_>>>()?;
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        let ReplyBody::Text { text, parse_mode } = &reply.body else {
            let msg = "send_reply called with a non-text reply".to_string();
            return Err(HandlerError::InvalidInput(msg).into());
        };

        let mut request = self.bot.send_message(ChatId(chat.id), text.clone());
        if *parse_mode == ParseMode::Html {
            request = request.parse_mode(TelegramParseMode::Html);
        }
        if !reply.buttons.is_empty() {
            request = request.reply_markup(to_keyboard(&reply.buttons)?);
        }
        if reply.disable_link_preview {
            request = request.link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }

        request.await.map_err(transport)?;
        Ok(())
    }

    async fn send_sticker(&self, chat: &Chat, sticker_id: &str) -> Result<()> {
        self.bot
            .send_sticker(
                ChatId(chat.id),
                InputFile::file_id(FileId(sticker_id.to_string())),
            )
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(transport)?;
        Ok(())
    }
}
