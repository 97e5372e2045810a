//! Inline button handlers, keyed by callback token.

use async_trait::async_trait;
use featbot_core::{Handler, HandlerResponse, Reply, Result, Update};
use rand::Rng;
use teloxide::utils::html;

pub const DICE: &str = "dice";
pub const STATS: &str = "stats";

/// `dice` button.
pub struct DiceCallback;

#[async_trait]
impl Handler for DiceCallback {
    async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
        let value: u8 = rand::thread_rng().gen_range(1..=6);
        Ok(Reply::text(format!("🎲 {}", value)).into())
    }
}

/// `stats` button: who pressed it.
pub struct StatsCallback;

#[async_trait]
impl Handler for StatsCallback {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let user = &update.user;
        let username = user.username.as_deref().unwrap_or("N/A");
        Ok(Reply::html(format!(
            "📊 <b>Your Stats</b>\n\n\
             👤 {}\n\
             🆔 <code>{}</code>\n\
             📛 @{}",
            html::escape(&user.first_name),
            user.id,
            html::escape(username)
        ))
        .into())
    }
}
