//! Dispatch config: rate limiter sizing, which commands are rate-limited, generic error reply.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

use super::base::non_empty_var;

pub const DEFAULT_ERROR_REPLY: &str = "Something went wrong, please try again later.";

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// RATE_LIMIT_WINDOW_SECS
    pub rate_limit_window_secs: u64,
    /// RATE_LIMIT_CAPACITY: max users tracked by the limiter
    pub rate_limit_capacity: usize,
    /// RATE_LIMITED_COMMANDS: comma-separated command names, lowercase
    pub rate_limited_commands: Vec<String>,
    /// ERROR_REPLY_TEXT; `None` when set to an empty string
    pub error_reply: Option<String>,
}

impl DispatchConfig {
    pub fn from_env() -> Result<Self> {
        let rate_limit_window_secs = match non_empty_var("RATE_LIMIT_WINDOW_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("RATE_LIMIT_WINDOW_SECS is not a number: {}", v))?,
            None => 2,
        };
        let rate_limit_capacity = match non_empty_var("RATE_LIMIT_CAPACITY") {
            Some(v) => v
                .parse()
                .with_context(|| format!("RATE_LIMIT_CAPACITY is not a number: {}", v))?,
            None => dispatcher::DEFAULT_CAPACITY,
        };
        let rate_limited_commands = env::var("RATE_LIMITED_COMMANDS")
            .map(|v| parse_command_list(&v))
            .unwrap_or_else(|_| vec!["joke".to_string()]);
        // Set-but-empty disables the reply; unset uses the default text.
        let error_reply = match env::var("ERROR_REPLY_TEXT") {
            Ok(v) if v.trim().is_empty() => None,
            Ok(v) => Some(v),
            Err(_) => Some(DEFAULT_ERROR_REPLY.to_string()),
        };

        Ok(Self {
            rate_limit_window_secs,
            rate_limit_capacity,
            rate_limited_commands,
            error_reply,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_window_secs == 0 {
            bail!("RATE_LIMIT_WINDOW_SECS must be greater than 0");
        }
        if self.rate_limit_capacity == 0 {
            bail!("RATE_LIMIT_CAPACITY must be greater than 0");
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn is_rate_limited(&self, command: &str) -> bool {
        self.rate_limited_commands
            .iter()
            .any(|c| c.eq_ignore_ascii_case(command))
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            rate_limit_window_secs: 2,
            rate_limit_capacity: dispatcher::DEFAULT_CAPACITY,
            rate_limited_commands: vec!["joke".to_string()],
            error_reply: Some(DEFAULT_ERROR_REPLY.to_string()),
        }
    }
}

fn parse_command_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().trim_start_matches('/').to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}
