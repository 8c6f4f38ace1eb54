//! # Entity Resolver
//!
//! Turns free text into a confirmed game entity, or into a ranked list of
//! suggestions when no single entity fits.
//!
//! ```text
//! query ──► items ──► trinkets ──► cards ──► ... ──► achievements
//!             │          │           │
//!             ▼          ▼           ▼
//!          Found? ── first Found wins, its record is fetched
//!          Ambiguous ── candidates accumulate in priority order
//! ```
//!
//! Each entity type's catalog is listed from the [`DataSource`], normalized and
//! exclusion-filtered, then handed to the similarity matcher. Catalogs and
//! records are fetched fresh for every call. Only a confirmed name ever leads
//! to a record fetch; a failure there aborts the call with
//! [`ResolveError::Source`].
//!
//! Ambiguity, absence and missing sections are ordinary outcomes
//! ([`Resolution`], [`SectionOutcome`]), not errors.

pub mod key;

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};

use crate::catalog::{Catalog, EntityType, MatchResult};
use crate::config::ResolverConfig;
use crate::errors::{ResolveError, SourceError};
use crate::format::{render_section, Formatter};
use crate::logutil::{escape_log, name_list};
use crate::record::ElementRecord;
use crate::source::DataSource;

pub use key::CallbackKey;

/// Highest achievement number in the game.
pub const MAX_ACHIEVEMENT: u32 = 637;

/// Section title that selects the whole formatted record.
pub const DESCRIPTION_SECTION: &str = "Description";

/// Fallback section keys tried when the requested one is absent.
const SECTION_ALIASES: [(&str, &str); 1] = [("effects", "effect")];

/// One suggestion offered after an inconclusive lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: EntityType,
    pub name: String,
}

impl Candidate {
    pub fn new(kind: EntityType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Callback key that confirms this candidate (`entityType/entityName`).
    pub fn key(&self) -> CallbackKey {
        CallbackKey::element(self.kind, self.name.clone())
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Outcome of [`Resolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A single confirmed entity with its full record. `name` is the
    /// normalized catalog name, which may differ from the stored record name.
    Found {
        kind: EntityType,
        name: String,
        record: ElementRecord,
    },

    /// Suggestions in priority order; empty when nothing matched at all.
    Similar(Vec<Candidate>),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Resolution::Found { .. } => &[],
            Resolution::Similar(candidates) => candidates,
        }
    }
}

/// Outcome of [`Resolver::resolve_section`].
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    /// Rendered section (or full description).
    Text(String),

    /// The entity resolved but has no content for this section.
    Missing(String),

    /// The entity named in the key did not resolve.
    Unresolved(Vec<Candidate>),
}

impl SectionOutcome {
    /// User-facing text for this outcome.
    pub fn message(&self) -> String {
        match self {
            SectionOutcome::Text(text) => text.clone(),
            SectionOutcome::Missing(section) => {
                format!("No information was found for section {}", section)
            }
            SectionOutcome::Unresolved(_) => "Nothing was found for this entity".to_string(),
        }
    }
}

/// Multi-catalog resolver over a data source.
pub struct Resolver<S> {
    source: S,
    formatter: Formatter,
    priority: Vec<EntityType>,
    exclusions: BTreeMap<EntityType, Vec<String>>,
    link_only: Vec<String>,
    threshold: f64,
}

impl<S: DataSource> Resolver<S> {
    /// Build a resolver; fails on unknown entity type keys in `config`.
    pub fn new(source: S, formatter: Formatter, config: &ResolverConfig) -> Result<Self, ResolveError> {
        Ok(Self {
            source,
            formatter,
            priority: config.entity_priority()?,
            exclusions: config.exclusion_table()?,
            link_only: config.link_only.clone(),
            threshold: config.similarity_threshold,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn priority(&self) -> &[EntityType] {
        &self.priority
    }

    /// Whether `name` resolves but is answered with a link instead of a record.
    pub fn is_link_only(&self, name: &str) -> bool {
        self.link_only.iter().any(|n| n == name)
    }

    /// Normalized, exclusion-filtered catalog for `kind`.
    pub async fn catalog(&self, kind: EntityType) -> Result<Catalog, ResolveError> {
        let raw = self.source.list_names(kind).await?;
        let excluded = self.exclusions.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Catalog::from_raw(kind, raw, excluded))
    }

    /// Resolve `query` across every catalog in priority order.
    pub async fn resolve(&self, query: &str, exact: bool) -> Result<Resolution, ResolveError> {
        info!("resolve \"{}\" (exact={})", escape_log(query), exact);
        self.resolve_across(&self.priority, query, exact).await
    }

    /// Resolve `name` in the catalog of `kind` only.
    pub async fn resolve_in(&self, kind: EntityType, name: &str, exact: bool) -> Result<Resolution, ResolveError> {
        debug!("resolve \"{}\" in {} (exact={})", escape_log(name), kind.key(), exact);
        self.resolve_across(&[kind], name, exact).await
    }

    /// Confirm an `entityType/entityName` key in exact mode.
    pub async fn resolve_key(&self, key: &str) -> Result<Resolution, ResolveError> {
        match key.parse::<CallbackKey>()? {
            CallbackKey::Element { kind, name } => self.resolve_in(kind, &name, true).await,
            CallbackKey::Section { .. } => Err(ResolveError::InvalidKey(key.to_string())),
        }
    }

    /// Render one section of the entity named by `section/entityType/entityName`.
    ///
    /// The entity is re-resolved within its own entity type. `Description`
    /// yields the whole formatted record; a missing `Effects` section falls
    /// back to `Effect`.
    pub async fn resolve_section(&self, key: &str, exact: bool) -> Result<SectionOutcome, ResolveError> {
        let (section, kind, name) = match key.parse::<CallbackKey>()? {
            CallbackKey::Section { section, kind, name } => (section, kind, name),
            CallbackKey::Element { .. } => return Err(ResolveError::InvalidKey(key.to_string())),
        };
        let record = match self.resolve_in(kind, &name, exact).await? {
            Resolution::Found { record, .. } => record,
            Resolution::Similar(candidates) => return Ok(SectionOutcome::Unresolved(candidates)),
        };

        if section.eq_ignore_ascii_case(DESCRIPTION_SECTION) {
            return Ok(SectionOutcome::Text(self.formatter.render(&record)));
        }

        let wanted = section.to_lowercase();
        let lines = record.section(&wanted).or_else(|| {
            SECTION_ALIASES
                .iter()
                .filter(|(from, _)| *from == wanted)
                .find_map(|(_, to)| record.section(to))
        });
        Ok(match lines {
            Some(lines) => SectionOutcome::Text(render_section(&section, lines)),
            None => {
                debug!("{} has no section {}", record.name(), section);
                SectionOutcome::Missing(section)
            }
        })
    }

    /// Achievement by number; `None` when outside `1..=MAX_ACHIEVEMENT`.
    pub async fn achievement(&self, number: u32) -> Result<Option<ElementRecord>, ResolveError> {
        if !(1..=MAX_ACHIEVEMENT).contains(&number) {
            return Ok(None);
        }
        let record = self
            .source
            .fetch_record(EntityType::Achievement, &number.to_string())
            .await?;
        Ok(Some(record))
    }

    async fn resolve_across(
        &self,
        order: &[EntityType],
        query: &str,
        exact: bool,
    ) -> Result<Resolution, ResolveError> {
        let mut similar = Vec::new();
        for &kind in order {
            let catalog = match self.catalog(kind).await {
                Ok(catalog) => catalog,
                Err(ResolveError::Source(SourceError::Unsupported(_))) => {
                    debug!("{} not served by source, skipped", kind.key());
                    continue;
                }
                Err(e) => {
                    warn!("listing {} failed: {}", kind.key(), e);
                    return Err(e);
                }
            };
            match catalog.find(query, exact, self.threshold) {
                MatchResult::Found(name) => {
                    if self.is_link_only(&name) {
                        info!("{} \"{}\" is link-only", kind.key(), name);
                        return Ok(Resolution::Similar(vec![Candidate::new(kind, name)]));
                    }
                    debug!("{}: found \"{}\"", kind.key(), name);
                    let record = self.source.fetch_record(kind, &name).await.map_err(|e| {
                        warn!("fetching {} \"{}\" failed: {}", kind.key(), name, e);
                        e
                    })?;
                    info!("resolved \"{}\" as {} \"{}\"", escape_log(query), kind, name);
                    return Ok(Resolution::Found { kind, name, record });
                }
                MatchResult::Ambiguous(names) => {
                    debug!("{}: similar {}", kind.key(), name_list(&names));
                    similar.extend(names.into_iter().map(|name| Candidate::new(kind, name)));
                }
                MatchResult::NotFound => {}
            }
        }
        info!("\"{}\" unresolved, {} suggestions", escape_log(query), similar.len());
        Ok(Resolution::Similar(similar))
    }
}
