//! URLs behind the start keyboard's second row.

use anyhow::{bail, Result};

use super::base::non_empty_var;

#[derive(Debug, Clone)]
pub struct LinksConfig {
    /// WEBSITE_URL
    pub website_url: String,
    /// CHANNEL_URL
    pub channel_url: String,
}

impl LinksConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            website_url: non_empty_var("WEBSITE_URL").unwrap_or(defaults.website_url),
            channel_url: non_empty_var("CHANNEL_URL").unwrap_or(defaults.channel_url),
        }
    }

    /// URL buttons are rejected by Telegram when the URL does not parse.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("WEBSITE_URL", &self.website_url),
            ("CHANNEL_URL", &self.channel_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                bail!("{} is not a valid URL: {}", name, url);
            }
        }
        Ok(())
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            website_url: "https://example.com".to_string(),
            channel_url: "https://t.me/channel".to_string(),
        }
    }
}
