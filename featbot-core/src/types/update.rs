//! Inbound event from the transport.

use serde::{Deserialize, Serialize};

use super::{chat::Chat, command::Command, user::User};

/// One inbound event. Immutable once received; owned by the dispatch call that processes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: i64,
    pub user: User,
    pub chat: Chat,
    /// Id of the originating message, when there is one.
    pub message_id: Option<i32>,
    pub content: UpdateContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UpdateContent {
    Message(MessageContent),
    CallbackQuery(CallbackQuery),
}

/// Payload of a message update. Several fields may be set at once (e.g. photo with caption);
/// classification decides which one wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: Option<String>,
    /// All sizes of a photo, smallest first (transport order).
    pub photo: Vec<PhotoSize>,
    pub sticker_id: Option<String>,
    pub location: Option<Location>,
    /// Tag of media this bot does not handle (`document`, `video`, ...).
    pub other: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Inline button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Transport id used to acknowledge the press.
    pub id: String,
    /// Opaque token attached to the button.
    pub data: Option<String>,
}

impl Update {
    /// Message payload, if this is a message update.
    pub fn message(&self) -> Option<&MessageContent> {
        match &self.content {
            UpdateContent::Message(m) => Some(m),
            UpdateContent::CallbackQuery(_) => None,
        }
    }

    /// Callback payload, if this is a button press.
    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        match &self.content {
            UpdateContent::CallbackQuery(q) => Some(q),
            UpdateContent::Message(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.message().and_then(|m| m.text.as_deref())
    }

    /// Parsed command, if the message text is one.
    pub fn command(&self) -> Option<Command> {
        self.text().and_then(Command::parse)
    }

    /// Largest photo size (the last one the transport sent).
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.message().and_then(|m| m.photo.last())
    }

    pub fn sticker_id(&self) -> Option<&str> {
        self.message().and_then(|m| m.sticker_id.as_deref())
    }

    pub fn location(&self) -> Option<&Location> {
        self.message().and_then(|m| m.location.as_ref())
    }

    pub fn callback_data(&self) -> Option<&str> {
        self.callback_query().and_then(|q| q.data.as_deref())
    }
}
