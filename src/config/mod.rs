//! # Configuration
//!
//! TOML configuration for the bot, organised into sections:
//!
//! - [`BotConfig`] - greeting text, start photo and wiki link base
//! - [`SourceConfig`] - document store location and the per-call fetch timeout
//! - [`WikiConfig`] - optional community wiki backend
//! - [`ResolverConfig`] - entity-type priority, similarity threshold, exclusions
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use isaacbot::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!     println!("data dir: {}", config.source.data_dir);
//!     Ok(())
//! }
//! ```
//!
//! Every section is optional in the file; missing sections and fields take the
//! values of [`Config::default`].

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::catalog::{normalize, EntityType};
use crate::errors::ResolveError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub source: SourceConfig,
    pub wiki: WikiConfig,
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub name: String,
    pub welcome_message: String,
    /// Photo sent along with the `/start` greeting.
    pub start_photo: Option<String>,
    /// Article links are `<wiki_link_base>/<Page_Name>`.
    pub wiki_link_base: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Isaac".to_string(),
            welcome_message: "Hi! My name is Isaac! Send me the name of an item, trinket, card, pill \
                              or anything else from the basement and I will tell you what it does."
                .to_string(),
            start_photo: Some(
                "https://static.wikia.nocookie.net/bindingofisaacre_gamepedia/images/8/8d/Isaac_App.png"
                    .to_string(),
            ),
            wiki_link_base: "https://bindingofisaacrebirth.fandom.com/wiki".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub data_dir: String,
    /// Upper bound for every catalog or record fetch.
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    pub enabled: bool,
    pub base_url: String,
    /// Entity type keys served by the wiki instead of the document store.
    pub entity_types: Vec<String>,
    pub item_category: String,
    pub trinket_category: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://bindingofisaacrebirth.fandom.com".to_string(),
            entity_types: vec!["items".to_string(), "trinkets".to_string()],
            item_category: "Category:Collectibles".to_string(),
            trinket_category: "Category:Trinkets".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Catalog search order; the first entity type to produce an exact hit wins.
    pub priority: Vec<String>,
    /// Fuzzy matches must score strictly above this ratio.
    pub similarity_threshold: f64,
    /// Names that resolve but are answered with a wiki link only.
    pub link_only: Vec<String>,
    /// Per entity type, names never offered by that catalog.
    pub exclusions: BTreeMap<String, Vec<String>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let mut exclusions = BTreeMap::new();
        exclusions.insert(EntityType::Item.key().to_string(), vec!["Tonsil".to_string()]);
        Self {
            priority: DEFAULT_PRIORITY.iter().map(|k| k.key().to_string()).collect(),
            similarity_threshold: crate::catalog::matcher::DEFAULT_THRESHOLD,
            link_only: vec!["Options?".to_string()],
            exclusions,
        }
    }
}

const DEFAULT_PRIORITY: [EntityType; 12] = [
    EntityType::Item,
    EntityType::Trinket,
    EntityType::Card,
    EntityType::Pill,
    EntityType::Curse,
    EntityType::Rune,
    EntityType::SoulStone,
    EntityType::Transformation,
    EntityType::Challenge,
    EntityType::Character,
    EntityType::Pickup,
    EntityType::Achievement,
];

impl ResolverConfig {
    /// Parsed priority list, duplicates dropped.
    pub fn entity_priority(&self) -> Result<Vec<EntityType>, ResolveError> {
        let mut order = Vec::with_capacity(self.priority.len());
        for key in &self.priority {
            let kind: EntityType = key.parse()?;
            if !order.contains(&kind) {
                order.push(kind);
            }
        }
        Ok(order)
    }

    /// Parsed exclusion table with names normalized.
    pub fn exclusion_table(&self) -> Result<BTreeMap<EntityType, Vec<String>>, ResolveError> {
        let mut table: BTreeMap<EntityType, Vec<String>> = BTreeMap::new();
        for (key, names) in &self.exclusions {
            let kind: EntityType = key.parse()?;
            table
                .entry(kind)
                .or_default()
                .extend(names.iter().map(|n| normalize(n)));
        }
        Ok(table)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("isaacbot.log".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config
            .resolver
            .entity_priority()
            .and_then(|_| config.resolver.exclusion_table())
            .map_err(|e| anyhow!("Invalid resolver section in {}: {}", path, e))?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// Any other failure (unreadable file, bad TOML, unknown entity type key)
    /// is still an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        match fs::metadata(path).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path);
                Ok(Config::default())
            }
            _ => Self::load(path).await,
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
