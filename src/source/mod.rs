//! # Data Sources
//!
//! The resolver never talks to a database or web page directly. It is handed a
//! [`DataSource`], a capability offering two operations per entity type:
//!
//! - [`DataSource::list_names`] - the ordered catalog of names
//! - [`DataSource::fetch_record`] - the full record for one confirmed name
//!
//! Two backends exist:
//!
//! - [`document::DocumentStore`] - one JSON collection file per entity type
//!   under the data directory (`data/items.json`, `data/cards.json`, ...)
//! - [`wiki::WikiSource`] - the community wiki via the MediaWiki API (feature `wiki`)
//!
//! [`Sources`] routes each entity type to the backend configured for it.
//! Every call is bounded by the configured timeout; exceeding it is a
//! [`SourceError::Timeout`]. Nothing is cached between calls.

pub mod document;
#[cfg(feature = "wiki")]
pub mod wiki;
#[cfg(feature = "wiki")]
pub mod wikitext;

use std::future::Future;
use std::time::Duration;

use crate::catalog::EntityType;
use crate::config::Config;
use crate::errors::{ResolveError, SourceError};
use crate::record::ElementRecord;

pub use document::DocumentStore;

/// Entity types the wiki backend can list and parse.
pub const WIKI_ENTITY_TYPES: [EntityType; 2] = [EntityType::Item, EntityType::Trinket];

/// Catalog and record access for every entity type.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Ordered raw names for `kind`, as the source presents them.
    async fn list_names(&self, kind: EntityType) -> Result<Vec<String>, SourceError>;

    /// Full record for a name previously returned by [`DataSource::list_names`].
    async fn fetch_record(&self, kind: EntityType, name: &str) -> Result<ElementRecord, SourceError>;
}

impl<T: DataSource> DataSource for &T {
    async fn list_names(&self, kind: EntityType) -> Result<Vec<String>, SourceError> {
        (**self).list_names(kind).await
    }

    async fn fetch_record(&self, kind: EntityType, name: &str) -> Result<ElementRecord, SourceError> {
        (**self).fetch_record(kind, name).await
    }
}

/// Run `fut`, turning an elapsed `limit` into [`SourceError::Timeout`].
pub(crate) async fn bounded<T, F>(what: &str, limit: Duration, fut: F) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| SourceError::Timeout {
            what: what.to_string(),
            seconds: limit.as_secs(),
        })?
}

/// Per-entity-type routing between the document store and the wiki.
pub struct Sources {
    documents: DocumentStore,
    #[cfg(feature = "wiki")]
    wiki: Option<wiki::WikiSource>,
    wiki_types: Vec<EntityType>,
}

impl Sources {
    /// Document store only.
    pub fn documents_only(documents: DocumentStore) -> Self {
        Self {
            documents,
            #[cfg(feature = "wiki")]
            wiki: None,
            wiki_types: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        let timeout = Duration::from_secs(config.source.timeout_seconds);
        let documents = DocumentStore::new(&config.source.data_dir, timeout);
        if !config.wiki.enabled {
            return Ok(Self::documents_only(documents));
        }
        let wiki_types = config
            .wiki
            .entity_types
            .iter()
            .map(|k| k.parse::<EntityType>())
            .collect::<Result<Vec<_>, _>>()?;
        // Routing a type the wiki cannot serve would drop it from resolution.
        if let Some(kind) = wiki_types.iter().find(|k| !WIKI_ENTITY_TYPES.contains(*k)) {
            return Err(SourceError::Unsupported(*kind).into());
        }
        #[cfg(feature = "wiki")]
        {
            log::debug!("wiki source serves {:?}", wiki_types);
            Ok(Self {
                documents,
                wiki: Some(wiki::WikiSource::new(&config.wiki, timeout)),
                wiki_types,
            })
        }
        #[cfg(not(feature = "wiki"))]
        {
            log::warn!(
                "wiki source enabled in config but built without the 'wiki' feature; serving {:?} from documents",
                wiki_types
            );
            Ok(Self::documents_only(documents))
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    #[cfg(feature = "wiki")]
    fn uses_wiki(&self, kind: EntityType) -> bool {
        self.wiki_types.contains(&kind)
    }
}

impl DataSource for Sources {
    async fn list_names(&self, kind: EntityType) -> Result<Vec<String>, SourceError> {
        #[cfg(feature = "wiki")]
        if let Some(wiki) = self.wiki.as_ref().filter(|_| self.uses_wiki(kind)) {
            return wiki.list_names(kind).await;
        }
        self.documents.list_names(kind).await
    }

    async fn fetch_record(&self, kind: EntityType, name: &str) -> Result<ElementRecord, SourceError> {
        #[cfg(feature = "wiki")]
        if let Some(wiki) = self.wiki.as_ref().filter(|_| self.uses_wiki(kind)) {
            return wiki.fetch_record(kind, name).await;
        }
        self.documents.fetch_record(kind, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiki_config(types: &[&str]) -> Config {
        let mut config = Config::default();
        config.wiki.enabled = true;
        config.wiki.entity_types = types.iter().map(|t| t.to_string()).collect();
        config
    }

    #[test]
    fn wiki_routing_accepts_items_and_trinkets() {
        assert!(Sources::from_config(&wiki_config(&["items", "trinkets"])).is_ok());
    }

    #[test]
    fn wiki_routing_rejects_types_the_wiki_cannot_serve() {
        match Sources::from_config(&wiki_config(&["items", "cards"])) {
            Err(ResolveError::Source(SourceError::Unsupported(kind))) => assert_eq!(kind, EntityType::Card),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("cards must not be routed to the wiki"),
        }
    }

    #[test]
    fn wiki_routing_rejects_unknown_keys() {
        assert!(matches!(
            Sources::from_config(&wiki_config(&["bosses"])),
            Err(ResolveError::InvalidEntityType(_))
        ));
    }

    #[test]
    fn disabled_wiki_ignores_its_type_list() {
        let mut config = wiki_config(&["cards"]);
        config.wiki.enabled = false;
        assert!(Sources::from_config(&config).is_ok());
    }
}
