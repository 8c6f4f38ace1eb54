//! Slash-command parser for incoming chat text.
//!
//! Anything that does not start with `/` is a free-text query. Commands may
//! carry a `@BotName` suffix (`/run@IsaacBot`) as group chats send them; the
//! suffix is ignored. List commands take no arguments and `/achievement`
//! takes exactly one number; anything else yields [`BotCommand::Usage`].
use log::trace;

use crate::resolver::MAX_ACHIEVEMENT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Run,
    Challenge,
    Spin,
    Curses,
    Runes,
    SoulStones,
    Pickups,
    Achievement(u32),
    /// Known command with bad arguments; carries the usage line.
    Usage(String),
    /// Unrecognised slash command.
    Unknown(String),
    /// Free-text lookup.
    Query(String),
}

/// Stateless parser for chat messages
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str) -> BotCommand {
        let trimmed = raw.trim();
        let Some(body) = trimmed.strip_prefix('/') else {
            trace!("Parsed query from '{}'", raw);
            return BotCommand::Query(trimmed.to_string());
        };

        let (head, args) = match body.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (body, ""),
        };
        let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();

        let bare = |cmd: BotCommand| {
            if args.is_empty() {
                cmd
            } else {
                BotCommand::Usage(format!("Usage: /{}", name))
            }
        };

        let parsed = match name.as_str() {
            "start" => BotCommand::Start,
            "run" => bare(BotCommand::Run),
            "challenge" => bare(BotCommand::Challenge),
            "spin" => bare(BotCommand::Spin),
            "curses" => bare(BotCommand::Curses),
            "runes" => bare(BotCommand::Runes),
            "soulstones" => bare(BotCommand::SoulStones),
            "pickups" => bare(BotCommand::Pickups),
            "achievement" => match args.parse::<u32>() {
                Ok(n) => BotCommand::Achievement(n),
                _ => BotCommand::Usage(format!(
                    "Usage: /achievement <number> (1-{})",
                    MAX_ACHIEVEMENT
                )),
            },
            _ => BotCommand::Unknown(name.clone()),
        };
        trace!("Parsed {:?} from '{}'", parsed, raw);
        parsed
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_query() {
        let p = CommandParser::new();
        assert_eq!(p.parse("  Sad Onion "), BotCommand::Query("Sad Onion".into()));
        assert_eq!(p.parse("Options?"), BotCommand::Query("Options?".into()));
    }

    #[test]
    fn recognises_commands_case_insensitively() {
        let p = CommandParser::new();
        assert_eq!(p.parse("/start"), BotCommand::Start);
        assert_eq!(p.parse("/RUN"), BotCommand::Run);
        assert_eq!(p.parse("/spin@IsaacBot"), BotCommand::Spin);
        assert_eq!(p.parse("/soulstones"), BotCommand::SoulStones);
    }

    #[test]
    fn achievement_takes_one_number() {
        let p = CommandParser::new();
        assert_eq!(p.parse("/achievement 42"), BotCommand::Achievement(42));
        assert!(matches!(p.parse("/achievement"), BotCommand::Usage(_)));
        assert!(matches!(p.parse("/achievement forty"), BotCommand::Usage(_)));
        assert!(matches!(p.parse("/achievement 4 2"), BotCommand::Usage(_)));
    }

    #[test]
    fn list_commands_reject_arguments() {
        let p = CommandParser::new();
        assert_eq!(p.parse("/runes all"), BotCommand::Usage("Usage: /runes".into()));
    }

    #[test]
    fn unknown_commands_are_flagged() {
        assert_eq!(CommandParser::new().parse("/help"), BotCommand::Unknown("help".into()));
    }
}
