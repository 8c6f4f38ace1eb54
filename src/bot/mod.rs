//! # Chat Front End
//!
//! Transport-neutral request handling. A chat adapter feeds in message text
//! ([`Bot::handle_message`]) or button payloads ([`Bot::handle_callback`]) and
//! gets back a [`Reply`]: Markdown text, an optional image and a column of
//! buttons whose `data` comes back as the next callback.
//!
//! Button payloads are callback keys:
//!
//! - `entityType/entityName` - confirm one of the suggested candidates
//! - `section/entityType/entityName` - show one section of a resolved entity
//!
//! One request runs one resolution to completion; the bot keeps no state
//! between requests.

pub mod command;
pub mod run;

use log::{debug, info};

use crate::catalog::matcher::title_case;
use crate::catalog::EntityType;
use crate::config::BotConfig;
use crate::errors::ResolveError;
use crate::record::ElementRecord;
use crate::resolver::{
    CallbackKey, Candidate, Resolution, Resolver, SectionOutcome, DESCRIPTION_SECTION, MAX_ACHIEVEMENT,
};
use crate::source::DataSource;

pub use command::{BotCommand, CommandParser};

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Payload handed back to [`Bot::handle_callback`].
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub image: Option<String>,
    pub buttons: Vec<Button>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }
}

pub struct Bot<S> {
    resolver: Resolver<S>,
    parser: CommandParser,
    config: BotConfig,
}

impl<S: DataSource> Bot<S> {
    pub fn new(resolver: Resolver<S>, config: BotConfig) -> Self {
        Self {
            resolver,
            parser: CommandParser::new(),
            config,
        }
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Answer a chat message: a slash command or a free-text query.
    pub async fn handle_message(&self, text: &str) -> Result<Reply, ResolveError> {
        match self.parser.parse(text) {
            BotCommand::Start => Ok(Reply {
                text: self.config.welcome_message.clone(),
                image: self.config.start_photo.clone(),
                buttons: Vec::new(),
            }),
            BotCommand::Run => Ok(Reply::text(run::new_run())),
            BotCommand::Challenge => Ok(Reply::text(run::new_challenge())),
            BotCommand::Spin => Ok(Reply::text(run::new_spin())),
            BotCommand::Curses => self.listing(EntityType::Curse, "Curses").await,
            BotCommand::Runes => self.listing(EntityType::Rune, "Runes").await,
            BotCommand::SoulStones => self.listing(EntityType::SoulStone, "Soul Stones").await,
            BotCommand::Pickups => self.listing(EntityType::Pickup, "Pickups").await,
            BotCommand::Achievement(number) => self.achievement(number).await,
            BotCommand::Usage(usage) => Ok(Reply::text(usage)),
            BotCommand::Unknown(name) => {
                debug!("unknown command /{}", name);
                Ok(Reply::text(format!(
                    "Unknown command /{}. Send me the name of anything from the game instead.",
                    name
                )))
            }
            BotCommand::Query(query) => {
                if query.is_empty() {
                    return Ok(Reply::text("Send me the name of anything from the game."));
                }
                let resolution = self.resolver.resolve(&query, false).await?;
                Ok(self.resolution_reply(&query, resolution))
            }
        }
    }

    /// Answer a button press carrying a callback key.
    pub async fn handle_callback(&self, data: &str) -> Result<Reply, ResolveError> {
        info!("callback {}", crate::logutil::escape_log(data));
        match data.parse::<CallbackKey>()? {
            CallbackKey::Element { kind, name } => {
                if self.resolver.is_link_only(&name) {
                    return Ok(self.link_reply(&name));
                }
                let resolution = self.resolver.resolve_in(kind, &name, true).await?;
                Ok(self.resolution_reply(&name, resolution))
            }
            CallbackKey::Section { name, .. } => match self.resolver.resolve_section(data, true).await? {
                SectionOutcome::Unresolved(candidates) => Ok(self.similar_reply(&name, candidates)),
                outcome => Ok(Reply::text(outcome.message())),
            },
        }
    }

    /// Article URL for `name` under the configured wiki base.
    pub fn wiki_link(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.config.wiki_link_base.trim_end_matches('/'),
            urlencoding::encode(&name.replace(' ', "_"))
        )
    }

    fn resolution_reply(&self, query: &str, resolution: Resolution) -> Reply {
        match resolution {
            Resolution::Found { kind, name, record } => self.found_reply(kind, &name, &record),
            Resolution::Similar(candidates) => self.similar_reply(query, candidates),
        }
    }

    fn found_reply(&self, kind: EntityType, name: &str, record: &ElementRecord) -> Reply {
        let mut buttons: Vec<Button> = record
            .sections()
            .into_iter()
            .flatten()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(key, _)| {
                let title = title_case(key);
                let data = CallbackKey::section(title.clone(), kind, name).to_string();
                Button::new(title, data)
            })
            .collect();
        if !buttons.is_empty() {
            buttons.push(Button::new(
                DESCRIPTION_SECTION,
                CallbackKey::section(DESCRIPTION_SECTION, kind, name).to_string(),
            ));
        }
        Reply {
            text: self.resolver.formatter().render(record),
            image: record.image().map(str::to_string),
            buttons,
        }
    }

    fn similar_reply(&self, query: &str, candidates: Vec<Candidate>) -> Reply {
        if candidates.is_empty() {
            return Reply::text(format!("\"{}\" was not found.", query));
        }
        let buttons = candidates
            .iter()
            .map(|c| Button::new(c.name.clone(), c.key().to_string()))
            .collect();
        Reply::text(format!(
            "\"{}\" was not found, but here are some similar possibilities.",
            query
        ))
        .with_buttons(buttons)
    }

    fn link_reply(&self, name: &str) -> Reply {
        Reply::text(format!(
            "Since we cannot process this entry, here is the direct link to [{}]({})",
            name,
            self.wiki_link(name)
        ))
    }

    async fn listing(&self, kind: EntityType, header: &str) -> Result<Reply, ResolveError> {
        let catalog = self.resolver.catalog(kind).await?;
        let buttons = catalog
            .names
            .iter()
            .map(|name| Button::new(name.clone(), CallbackKey::element(kind, name.clone()).to_string()))
            .collect();
        Ok(Reply::text(format!("*{}*", header)).with_buttons(buttons))
    }

    async fn achievement(&self, number: u32) -> Result<Reply, ResolveError> {
        Ok(match self.resolver.achievement(number).await? {
            Some(record) => Reply {
                text: self.resolver.formatter().render(&record),
                image: record.image().map(str::to_string),
                buttons: Vec::new(),
            },
            None => Reply::text(format!(
                "There is no achievement {}. Achievements are numbered 1 to {}.",
                number, MAX_ACHIEVEMENT
            )),
        })
    }
}
