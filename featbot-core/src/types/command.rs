//! Bot command parsed from message text: `/name[@bot] arg1 arg2 ...`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Lowercased command name without the leading slash.
    pub name: String,
    /// Bot username after `@`, when the command was addressed explicitly.
    pub addressed_to: Option<String>,
    /// Whitespace-separated argument tokens.
    pub args: Vec<String>,
}

impl Command {
    /// Parses `text` as a command. Returns `None` when the text does not start with `/`
    /// or the command name is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('/')?;
        let mut tokens = rest.split_whitespace();
        let head = tokens.next()?;
        let (name, addressed_to) = match head.split_once('@') {
            Some((name, bot)) => (name, Some(bot.to_string())),
            None => (head, None),
        };
        if name.is_empty() || rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(Self {
            name: name.to_lowercase(),
            addressed_to,
            args: tokens.map(str::to_string).collect(),
        })
    }

    /// Returns true when the command is meant for `bot_username`, or for any bot when not
    /// addressed.
    pub fn is_addressed_to(&self, bot_username: Option<&str>) -> bool {
        match (&self.addressed_to, bot_username) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(target), Some(me)) => target.eq_ignore_ascii_case(me.trim_start_matches('@')),
        }
    }

    /// Arguments joined by single spaces.
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_command() {
        let cmd = Command::parse("/roll").unwrap();
        assert_eq!(cmd.name, "roll");
        assert!(cmd.args.is_empty());
        assert!(cmd.addressed_to.is_none());
    }

    #[test]
    fn test_parse_command_with_args_and_bot() {
        let cmd = Command::parse("/Echo@FeatBot  hello   world").unwrap();
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.addressed_to.as_deref(), Some("FeatBot"));
        assert_eq!(cmd.args, vec!["hello", "world"]);
        assert_eq!(cmd.joined_args(), "hello world");
    }

    #[test]
    fn test_parse_not_a_command() {
        assert!(Command::parse("hello /roll").is_none());
        assert!(Command::parse("/").is_none());
        assert!(Command::parse("/ roll").is_none());
        assert!(Command::parse("/@bot").is_none());
    }

    #[test]
    fn test_is_addressed_to() {
        let cmd = Command::parse("/start@featbot").unwrap();
        assert!(cmd.is_addressed_to(Some("FeatBot")));
        assert!(cmd.is_addressed_to(Some("@featbot")));
        assert!(!cmd.is_addressed_to(Some("otherbot")));
        assert!(cmd.is_addressed_to(None));
        assert!(Command::parse("/start").unwrap().is_addressed_to(Some("otherbot")));
    }
}
