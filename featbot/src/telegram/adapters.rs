//! Conversion from teloxide types to core [`featbot_core::Update`].

use featbot_core::{
    CallbackQuery, Chat, Location, MessageContent, PhotoSize, Update, UpdateContent, User,
};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl TelegramUserWrapper<'_> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            first_name: self.0.first_name.clone(),
            username: self.0.username.clone(),
        }
    }
}

/// Telegram message to core update. Messages without a sender (channel posts) have no
/// rate-limit identity and are skipped.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl TelegramMessageWrapper<'_> {
    pub fn to_core(&self, update_id: i64) -> Option<Update> {
        let msg = self.0;
        let user = TelegramUserWrapper(msg.from.as_ref()?).to_core();

        Some(Update {
            id: update_id,
            user,
            chat: Chat { id: msg.chat.id.0 },
            message_id: Some(msg.id.0),
            content: UpdateContent::Message(self.content()),
        })
    }

    fn content(&self) -> MessageContent {
        let msg = self.0;
        let photo = msg
            .photo()
            .map(|sizes| {
                sizes
                    .iter()
                    .map(|p| PhotoSize {
                        width: p.width,
                        height: p.height,
                        file_size: Some(p.file.size).filter(|s| *s > 0),
                    })
                    .collect()
            })
            .unwrap_or_default();
        // Venues carry a location too.
        let location = msg
            .location()
            .or_else(|| msg.venue().map(|v| &v.location))
            .map(|l| Location {
                latitude: l.latitude,
                longitude: l.longitude,
            });

        let mut content = MessageContent {
            text: msg.text().map(str::to_string),
            photo,
            sticker_id: msg.sticker().map(|s| s.file.id.0.clone()),
            location,
            other: None,
        };
        if content.text.is_none()
            && content.photo.is_empty()
            && content.sticker_id.is_none()
            && content.location.is_none()
        {
            content.other = Some(self.unsupported_kind().to_string());
        }
        content
    }

    fn unsupported_kind(&self) -> &'static str {
        let msg = self.0;
        if msg.document().is_some() {
            "document"
        } else if msg.video().is_some() {
            "video"
        } else if msg.audio().is_some() {
            "audio"
        } else if msg.voice().is_some() {
            "voice"
        } else if msg.animation().is_some() {
            "animation"
        } else if msg.contact().is_some() {
            "contact"
        } else {
            "unsupported"
        }
    }
}

/// Telegram callback query to core update. The reply goes to the chat of the message carrying the
/// button, or to the user's private chat when that message is unavailable.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl TelegramCallbackWrapper<'_> {
    pub fn to_core(&self, update_id: i64) -> Update {
        let q = self.0;
        let user = TelegramUserWrapper(&q.from).to_core();
        let chat_id = q.message.as_ref().map(|m| m.chat().id.0).unwrap_or(user.id);

        Update {
            id: update_id,
            chat: Chat { id: chat_id },
            user,
            message_id: q.message.as_ref().map(|m| m.id().0),
            content: UpdateContent::CallbackQuery(CallbackQuery {
                id: q.id.0.clone(),
                data: q.data.clone(),
            }),
        }
    }
}
