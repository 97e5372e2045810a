//! Immutable table from dispatch key to handler, built once at startup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use featbot_core::{Handler, Update, UpdateContent};
use tracing::debug;

/// Classification result used to select a handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DispatchKey {
    /// Command name, lowercase, without slash or `@bot` suffix.
    Command(String),
    Photo,
    Sticker,
    Location,
    Text,
    /// Callback token attached to an inline button.
    Callback(String),
}

impl DispatchKey {
    /// Classifies `update`. Priority: callback, command, photo, sticker, location, text.
    ///
    /// A message that is a command never falls back to text. Commands addressed to another bot
    /// (`/start@otherbot`) are not ours and classify to `None`, as does unsupported media.
    pub fn classify(update: &Update, bot_username: Option<&str>) -> Option<Self> {
        let message = match &update.content {
            UpdateContent::CallbackQuery(query) => {
                return Some(DispatchKey::Callback(query.data.clone().unwrap_or_default()));
            }
            UpdateContent::Message(message) => message,
        };

        if let Some(command) = update.command() {
            return command
                .is_addressed_to(bot_username)
                .then_some(DispatchKey::Command(command.name));
        }
        if !message.photo.is_empty() {
            return Some(DispatchKey::Photo);
        }
        if message.sticker_id.is_some() {
            return Some(DispatchKey::Sticker);
        }
        if message.location.is_some() {
            return Some(DispatchKey::Location);
        }
        if message.text.is_some() && message.other.is_none() {
            return Some(DispatchKey::Text);
        }
        None
    }
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchKey::Command(name) => write!(f, "command:{}", name),
            DispatchKey::Photo => write!(f, "photo"),
            DispatchKey::Sticker => write!(f, "sticker"),
            DispatchKey::Location => write!(f, "location"),
            DispatchKey::Text => write!(f, "text"),
            DispatchKey::Callback(token) => write!(f, "callback:{}", token),
        }
    }
}

/// A registered handler and whether it goes through the rate limiter.
#[derive(Clone)]
pub struct Registration {
    pub handler: Arc<dyn Handler>,
    pub rate_limited: bool,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("rate_limited", &self.rate_limited)
            .finish_non_exhaustive()
    }
}

/// Lookup result: the key the update classified to and its registration.
#[derive(Debug)]
pub struct Route<'a> {
    pub key: DispatchKey,
    pub registration: &'a Registration,
}

/// Read-only after [`HandlerRegistryBuilder::build`]; needs no synchronization.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: HashMap<DispatchKey, Registration>,
    bot_username: Option<String>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Classifies `update` and returns its handler, or `None` when nothing is registered for it.
    pub fn lookup(&self, update: &Update) -> Option<Route<'_>> {
        let key = DispatchKey::classify(update, self.bot_username.as_deref())?;
        let registration = self.entries.get(&key)?;
        Some(Route { key, registration })
    }

    pub fn get(&self, key: &DispatchKey) -> Option<&Registration> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .keys()
            .filter_map(|key| match key {
                DispatchKey::Command(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names
    }
}

#[derive(Default)]
pub struct HandlerRegistryBuilder {
    entries: HashMap<DispatchKey, Registration>,
    bot_username: Option<String>,
}

impl HandlerRegistryBuilder {
    /// Username used to ignore commands addressed to other bots (`/cmd@other`).
    pub fn bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username.map(|u| u.trim_start_matches('@').to_string());
        self
    }

    /// Registers `handler` under `key`. A later registration for the same key replaces the
    /// earlier one.
    pub fn register(
        mut self,
        key: DispatchKey,
        handler: Arc<dyn Handler>,
        rate_limited: bool,
    ) -> Self {
        let key = match key {
            DispatchKey::Command(name) => DispatchKey::Command(name.to_lowercase()),
            other => other,
        };
        if self.entries.contains_key(&key) {
            debug!(key = %key, "replacing handler registration");
        }
        self.entries.insert(
            key,
            Registration {
                handler,
                rate_limited,
            },
        );
        self
    }

    pub fn command(self, name: &str, handler: Arc<dyn Handler>) -> Self {
        self.register(DispatchKey::Command(name.to_string()), handler, false)
    }

    pub fn rate_limited_command(self, name: &str, handler: Arc<dyn Handler>) -> Self {
        self.register(DispatchKey::Command(name.to_string()), handler, true)
    }

    pub fn callback(self, token: &str, handler: Arc<dyn Handler>) -> Self {
        self.register(DispatchKey::Callback(token.to_string()), handler, false)
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            entries: self.entries,
            bot_username: self.bot_username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use featbot_core::{
        CallbackQuery, Chat, HandlerResponse, Location, MessageContent, PhotoSize, Result, User,
    };

    struct Named;

    #[async_trait]
    impl Handler for Named {
        async fn handle(&self, _update: &Update) -> Result<HandlerResponse> {
            Ok(HandlerResponse::Ignore)
        }
    }

    fn update(content: UpdateContent) -> Update {
        Update {
            id: 1,
            user: User {
                id: 42,
                first_name: "Test".to_string(),
                username: None,
            },
            chat: Chat { id: 42 },
            message_id: Some(1),
            content,
        }
    }

    fn text(t: &str) -> Update {
        update(UpdateContent::Message(MessageContent {
            text: Some(t.to_string()),
            ..Default::default()
        }))
    }

    #[test]
    fn test_command_takes_precedence_over_text() {
        assert_eq!(
            DispatchKey::classify(&text("/start"), None),
            Some(DispatchKey::Command("start".to_string()))
        );
        assert_eq!(DispatchKey::classify(&text("start"), None), Some(DispatchKey::Text));
    }

    #[test]
    fn test_media_priority() {
        let all = update(UpdateContent::Message(MessageContent {
            text: Some("caption".to_string()),
            photo: vec![PhotoSize {
                width: 10,
                height: 10,
                file_size: None,
            }],
            sticker_id: Some("STK".to_string()),
            location: Some(Location {
                latitude: 1.0,
                longitude: 2.0,
            }),
            other: None,
        }));
        assert_eq!(DispatchKey::classify(&all, None), Some(DispatchKey::Photo));

        let sticker_and_location = update(UpdateContent::Message(MessageContent {
            sticker_id: Some("STK".to_string()),
            location: Some(Location {
                latitude: 1.0,
                longitude: 2.0,
            }),
            ..Default::default()
        }));
        assert_eq!(
            DispatchKey::classify(&sticker_and_location, None),
            Some(DispatchKey::Sticker)
        );
    }

    #[test]
    fn test_unsupported_media_is_unclassified() {
        let document = update(UpdateContent::Message(MessageContent {
            other: Some("document".to_string()),
            ..Default::default()
        }));
        assert_eq!(DispatchKey::classify(&document, None), None);
    }

    #[test]
    fn test_command_for_other_bot_is_dropped() {
        assert_eq!(DispatchKey::classify(&text("/roll@otherbot"), Some("featbot")), None);
        assert_eq!(
            DispatchKey::classify(&text("/roll@featbot"), Some("featbot")),
            Some(DispatchKey::Command("roll".to_string()))
        );
    }

    #[test]
    fn test_callback_classification() {
        let press = update(UpdateContent::CallbackQuery(CallbackQuery {
            id: "cb1".to_string(),
            data: Some("dice".to_string()),
        }));
        assert_eq!(
            DispatchKey::classify(&press, None),
            Some(DispatchKey::Callback("dice".to_string()))
        );
    }

    #[test]
    fn test_lookup_and_unregistered_command() {
        let registry = HandlerRegistry::builder()
            .command("Roll", Arc::new(Named))
            .rate_limited_command("joke", Arc::new(Named))
            .register(DispatchKey::Text, Arc::new(Named), false)
            .build();

        let route = registry.lookup(&text("/roll")).unwrap();
        assert_eq!(route.key, DispatchKey::Command("roll".to_string()));
        assert!(!route.registration.rate_limited);
        assert!(registry.lookup(&text("/joke")).unwrap().registration.rate_limited);

        // Unknown command does not fall back to the text handler.
        assert!(registry.lookup(&text("/unknown")).is_none());
        assert_eq!(registry.lookup(&text("hello")).unwrap().key, DispatchKey::Text);
        assert_eq!(registry.command_names(), vec!["joke", "roll"]);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(DispatchKey::Command("roll".into()).to_string(), "command:roll");
        assert_eq!(DispatchKey::Callback("stats".into()).to_string(), "callback:stats");
        assert_eq!(DispatchKey::Photo.to_string(), "photo");
    }
}
