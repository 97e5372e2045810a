//! Handlers for non-command messages: text, photo, sticker, location.

use async_trait::async_trait;
use featbot_core::{Handler, HandlerError, HandlerResponse, Reply, Result, Update};
use teloxide::utils::html;

const GREETINGS: [&str; 3] = ["hi", "hello", "hey"];

/// Plain text: greets on hi/hello/hey, otherwise echoes in a code block.
pub struct TextHandler;

#[async_trait]
impl Handler for TextHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let text = update.text().ok_or(HandlerError::MissingField("text"))?;
        let lower = text.to_lowercase();

        if GREETINGS.iter().any(|g| lower.contains(g)) {
            return Ok(Reply::html(format!(
                "👋 Hello {}",
                html::escape(&update.user.first_name)
            ))
            .into());
        }
        Ok(Reply::html(format!("You said:\n<code>{}</code>", html::escape(text))).into())
    }
}

/// Photo: reports dimensions and size of the largest variant.
pub struct PhotoHandler;

#[async_trait]
impl Handler for PhotoHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let photo = update
            .largest_photo()
            .ok_or(HandlerError::MissingField("photo"))?;
        let size = match photo.file_size {
            Some(bytes) => format!("{} bytes", bytes),
            None => "unknown size".to_string(),
        };
        Ok(Reply::text(format!("📸 {}x{} | {}", photo.width, photo.height, size)).into())
    }
}

/// Sticker: sends the same sticker back.
pub struct StickerHandler;

#[async_trait]
impl Handler for StickerHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let file_id = update
            .sticker_id()
            .ok_or(HandlerError::MissingField("sticker"))?;
        Ok(Reply::sticker(file_id).into())
    }
}

/// Location: coordinates and a map link, without link preview.
pub struct LocationHandler;

#[async_trait]
impl Handler for LocationHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let loc = update
            .location()
            .ok_or(HandlerError::MissingField("location"))?;
        let text = format!(
            "📍 <code>{lat}, {lon}</code>\n\
             <a href=\"https://maps.google.com/?q={lat},{lon}\">Open Map</a>",
            lat = loc.latitude,
            lon = loc.longitude
        );
        Ok(Reply::html(text).without_link_preview().into())
    }
}
