//! Slash-command handlers.

use async_trait::async_trait;
use featbot_core::{Button, Handler, HandlerError, HandlerResponse, Reply, Result, Update};
use rand::Rng;
use teloxide::utils::html;

use crate::config::LinksConfig;

pub const JOKES: [&str; 3] = [
    "Why do programmers hate nature? Too many bugs 🐛",
    "It works on my machine 🤡",
    "Cache cleared. Brain not found 💀",
];

fn command_args(update: &Update) -> Result<String> {
    let command = update.command().ok_or(HandlerError::MissingField("command"))?;
    Ok(command.joined_args())
}

/// `/start`: welcome, command list and the main keyboard.
pub struct StartHandler {
    links: LinksConfig,
}

impl StartHandler {
    pub fn new(links: LinksConfig) -> Self {
        Self { links }
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let text = format!(
            "🤖 <b>Welcome, {}!</b>\n\n\
             I'm a feature-rich Telegram bot built with Rust.\n\n\
             <b>Commands</b>\n\
             /start - Menu\n\
             /help - Help\n\
             /echo &lt;text&gt;\n\
             /joke\n\
             /time\n\
             /caps &lt;text&gt;\n",
            html::escape(&update.user.first_name)
        );
        let keyboard = vec![
            vec![
                Button::callback("🎲 Roll Dice", "dice"),
                Button::callback("📊 Stats", "stats"),
            ],
            vec![
                Button::url("🌐 Website", self.links.website_url.as_str()),
                Button::url("📢 Channel", self.links.channel_url.as_str()),
            ],
        ];
        Ok(Reply::html(text).with_buttons(keyboard).into())
    }
}

/// `/help`
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
        Ok(Reply::html(
            "🆘 <b>Help Center</b>\n\n\
             <b>Basic</b>\n\
             /start /help /time /echo\n\n\
             <b>Fun</b>\n\
             /joke /roll /flip /caps\n",
        )
        .into())
    }
}

/// `/echo <text>`: repeats the arguments in italics.
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let args = command_args(update)?;
        if args.is_empty() {
            return Ok(Reply::text("Usage: /echo <text>").into());
        }
        Ok(Reply::html(format!("📢 <i>{}</i>", html::escape(&args))).into())
    }
}

/// `/caps <text>`
pub struct CapsHandler;

#[async_trait]
impl Handler for CapsHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let args = command_args(update)?;
        if args.is_empty() {
            return Ok(Reply::text("Usage: /caps <text>").into());
        }
        Ok(Reply::html(format!("🔊 {}", html::escape(&args.to_uppercase()))).into())
    }
}

/// `/time`: current UTC time.
pub struct TimeHandler;

#[async_trait]
impl Handler for TimeHandler {
    async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        Ok(Reply::html(format!("🕐 <code>{}</code>", now)).into())
    }
}

/// `/roll`: uniform 1..=6.
pub struct RollHandler;

#[async_trait]
impl Handler for RollHandler {
    async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
        let value: u8 = rand::thread_rng().gen_range(1..=6);
        Ok(Reply::html(format!("🎲 <b>{}</b>", value)).into())
    }
}

/// `/flip`
pub struct FlipHandler;

#[async_trait]
impl Handler for FlipHandler {
    async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
        let side = if rand::thread_rng().gen_bool(0.5) {
            "Heads"
        } else {
            "Tails"
        };
        Ok(Reply::html(format!("🪙 <b>{}</b>", side)).into())
    }
}

/// `/joke`: one of [`JOKES`].
pub struct JokeHandler;

#[async_trait]
impl Handler for JokeHandler {
    async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
        let index = rand::thread_rng().gen_range(0..JOKES.len());
        Ok(Reply::text(JOKES[index]).into())
    }
}
