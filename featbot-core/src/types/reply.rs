//! Outbound content a handler wants sent.

use serde::{Deserialize, Serialize};

/// Formatting mode for text replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseMode {
    #[default]
    Plain,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyBody {
    Text { text: String, parse_mode: ParseMode },
    Sticker { file_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    /// Sends the token back as a callback query.
    Callback(String),
    /// Opens a URL.
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(token.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// A reply: body, optional inline keyboard (rows of buttons), link preview flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub body: ReplyBody,
    pub buttons: Vec<Vec<Button>>,
    pub disable_link_preview: bool,
}

impl Reply {
    /// Plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_body(ReplyBody::Text {
            text: text.into(),
            parse_mode: ParseMode::Plain,
        })
    }

    /// HTML-formatted text reply.
    pub fn html(text: impl Into<String>) -> Self {
        Self::with_body(ReplyBody::Text {
            text: text.into(),
            parse_mode: ParseMode::Html,
        })
    }

    /// Re-send a sticker by file id.
    pub fn sticker(file_id: impl Into<String>) -> Self {
        Self::with_body(ReplyBody::Sticker {
            file_id: file_id.into(),
        })
    }

    fn with_body(body: ReplyBody) -> Self {
        Self {
            body,
            buttons: Vec::new(),
            disable_link_preview: false,
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Vec<Button>>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }

    /// Text of the reply, if it is a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text { text, .. } => Some(text),
            ReplyBody::Sticker { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_reply_with_keyboard() {
        let reply = Reply::html("<b>hi</b>")
            .with_buttons(vec![vec![Button::callback("Roll", "dice")]])
            .without_link_preview();
        assert_eq!(reply.as_text(), Some("<b>hi</b>"));
        assert!(reply.disable_link_preview);
        assert_eq!(
            reply.buttons[0][0].action,
            ButtonAction::Callback("dice".to_string())
        );
    }

    #[test]
    fn test_sticker_reply_has_no_text() {
        let reply = Reply::sticker("CAACAgI");
        assert!(reply.as_text().is_none());
        assert!(reply.buttons.is_empty());
    }
}
