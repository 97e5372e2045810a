//! Shared fixtures: recording Bot, recording reporter, update builders.

#![allow(dead_code)]

use std::sync::{Mutex, Once};

use async_trait::async_trait;
use featbot::BotConfig;
use featbot_core::{
    Bot, BotError, CallbackQuery, Chat, ErrorContext, ErrorReporter, MessageContent, Reply,
    Result, Update, UpdateContent, User,
};

pub const TOKEN: &str = "123456:TEST-token";

static TRACING: Once = Once::new();

/// Test-writer subscriber so `RUST_LOG=debug cargo test` shows dispatch steps.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
pub struct MockBot {
    pub replies: Mutex<Vec<(i64, Reply)>>,
    pub stickers: Mutex<Vec<(i64, String)>>,
    pub acks: Mutex<Vec<String>>,
}

impl MockBot {
    pub fn replies(&self) -> Vec<(i64, Reply)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies()
            .iter()
            .filter_map(|(_, r)| r.as_text().map(str::to_string))
            .collect()
    }

    pub fn stickers(&self) -> Vec<(i64, String)> {
        self.stickers.lock().unwrap().clone()
    }

    pub fn acks(&self) -> Vec<String> {
        self.acks.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        self.replies.lock().unwrap().push((chat.id, reply.clone()));
        Ok(())
    }

    async fn send_sticker(&self, chat: &Chat, sticker_id: &str) -> Result<()> {
        self.stickers
            .lock()
            .unwrap()
            .push((chat.id, sticker_id.to_string()));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.acks.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub entries: Mutex<Vec<(ErrorContext, String)>>,
}

impl RecordingReporter {
    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: &ErrorContext, error: &BotError) {
        self.entries
            .lock()
            .unwrap()
            .push((context.clone(), error.to_string()));
    }
}

/// Config with defaults and a valid token, without reading the environment.
pub fn test_config() -> BotConfig {
    BotConfig {
        base: featbot::BaseConfig {
            bot_token: TOKEN.to_string(),
            telegram_api_url: None,
            log_file: None,
            bot_username: Some("featbot".to_string()),
        },
        dispatch: featbot::DispatchConfig::default(),
        links: featbot::LinksConfig::default(),
    }
}

pub fn user(id: i64, first_name: &str, username: Option<&str>) -> User {
    User {
        id,
        first_name: first_name.to_string(),
        username: username.map(str::to_string),
    }
}

pub fn message(id: i64, from: User, content: MessageContent) -> Update {
    Update {
        id,
        chat: Chat { id: from.id },
        user: from,
        message_id: Some(id as i32),
        content: UpdateContent::Message(content),
    }
}

pub fn text(id: i64, from: User, t: &str) -> Update {
    message(
        id,
        from,
        MessageContent {
            text: Some(t.to_string()),
            ..Default::default()
        },
    )
}

pub fn callback(id: i64, from: User, data: &str) -> Update {
    Update {
        id,
        chat: Chat { id: from.id },
        user: from,
        message_id: Some(1),
        content: UpdateContent::CallbackQuery(CallbackQuery {
            id: format!("cb{}", id),
            data: Some(data.to_string()),
        }),
    }
}
