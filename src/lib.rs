//! # isaacbot - The Binding of Isaac reference bot
//!
//! Answers free-text chat queries about game entities (items, trinkets, cards,
//! pills, curses, runes, soul stones, transformations, challenges, characters,
//! pickups and achievements) from a JSON document store or the community wiki.
//!
//! ## Features
//!
//! - **Fuzzy Resolution**: verbatim, title-cased, similarity-ranked and substring
//!   matching across every entity catalog, in a configurable priority order.
//! - **Suggestions**: inconclusive queries return ranked candidates, each a button
//!   that confirms the entity with a callback key.
//! - **Sections**: resolved entities expose their categorized lists (Effects,
//!   Notes, Synergies, ...) as follow-up callbacks.
//! - **Two Sources**: per-type routing between JSON collections and the
//!   MediaWiki API (feature `wiki`), each call bounded by a timeout.
//! - **Fun Commands**: random run, challenge and spin suggestions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use isaacbot::bot::Bot;
//! use isaacbot::config::Config;
//! use isaacbot::format::Formatter;
//! use isaacbot::resolver::Resolver;
//! use isaacbot::source::Sources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let sources = Sources::from_config(&config)?;
//!     let formatter = Formatter::new(sources.documents().emojis().await?);
//!     let resolver = Resolver::new(sources, formatter, &config.resolver)?;
//!     let bot = Bot::new(resolver, config.bot.clone());
//!
//!     let reply = bot.handle_message("sad onion").await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - entity types, name normalization and the similarity matcher
//! - [`resolver`] - multi-catalog resolution, sections and callback keys
//! - [`record`] - per-entity record shapes
//! - [`format`] - record and section rendering
//! - [`source`] - the data-source capability and its backends
//! - [`bot`] - transport-neutral chat front end
//! - [`config`] - TOML configuration
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Bot           │ ← commands, replies, buttons
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Resolver      │ ← catalogs, matcher, formatter
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Sources       │ ← JSON documents / wiki
//! └─────────────────┘
//! ```

pub mod bot;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod format;
pub mod logutil;
pub mod record;
pub mod resolver;
pub mod source;
