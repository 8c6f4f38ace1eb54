//! Community wiki backend (MediaWiki API).
//!
//! Catalogs come from `list=categorymembers` (paged via `cmcontinue`), records
//! from `action=parse&prop=wikitext` run through [`super::wikitext`]. Only items
//! and trinkets have a page layout this reader understands; every other entity
//! type is [`SourceError::Unsupported`].

use std::time::Duration;

use log::{debug, trace};
use serde::Deserialize;

use super::wikitext::{item_from_page, parse_page, trinket_from_page};
use super::{bounded, DataSource};
use crate::catalog::EntityType;
use crate::config::WikiConfig;
use crate::errors::SourceError;
use crate::record::ElementRecord;

/// Main article namespace.
const ARTICLE_NAMESPACE: i64 = 0;
const PAGE_LIMIT: &str = "500";

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    #[serde(default, rename = "continue")]
    next: Option<Continue>,
    query: CategoryQuery,
}

#[derive(Debug, Deserialize)]
struct Continue {
    cmcontinue: String,
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct CategoryMember {
    ns: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    title: String,
    wikitext: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

pub struct WikiSource {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    item_category: String,
    trinket_category: String,
}

impl WikiSource {
    pub fn new(config: &WikiConfig, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api.php", config.base_url.trim_end_matches('/')),
            timeout,
            item_category: config.item_category.clone(),
            trinket_category: config.trinket_category.clone(),
        }
    }

    fn category(&self, kind: EntityType) -> Result<&str, SourceError> {
        match kind {
            EntityType::Item => Ok(&self.item_category),
            EntityType::Trinket => Ok(&self.trinket_category),
            other => Err(SourceError::Unsupported(other)),
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, params: &[(&str, &str)]) -> Result<T, SourceError> {
        let what = format!("GET {}", self.endpoint);
        bounded(&what, self.timeout, async {
            let response = self
                .client
                .get(&self.endpoint)
                .query(params)
                .send()
                .await
                .map_err(|e| SourceError::Http(format!("request failed: {}", e)))?;
            if !response.status().is_success() {
                return Err(SourceError::Http(format!("wiki returned status: {}", response.status())));
            }
            response
                .json::<T>()
                .await
                .map_err(|e| SourceError::Malformed(format!("unexpected wiki response: {}", e)))
        })
        .await
    }
}

impl DataSource for WikiSource {
    async fn list_names(&self, kind: EntityType) -> Result<Vec<String>, SourceError> {
        let category = self.category(kind)?;
        let mut names = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut params = vec![
                ("action", "query"),
                ("format", "json"),
                ("list", "categorymembers"),
                ("cmtitle", category),
                ("cmlimit", PAGE_LIMIT),
            ];
            if let Some(c) = cursor.as_deref() {
                params.push(("cmcontinue", c));
            }
            let page: CategoryResponse = self.get(&params).await?;
            trace!("{} members in batch of {}", page.query.categorymembers.len(), category);
            names.extend(
                page.query
                    .categorymembers
                    .into_iter()
                    .filter(|m| m.ns == ARTICLE_NAMESPACE)
                    .map(|m| m.title),
            );
            match page.next {
                Some(next) => cursor = Some(next.cmcontinue),
                None => break,
            }
        }
        debug!("wiki catalog {} has {} entries", category, names.len());
        Ok(names)
    }

    async fn fetch_record(&self, kind: EntityType, name: &str) -> Result<ElementRecord, SourceError> {
        self.category(kind)?;
        let params = [
            ("action", "parse"),
            ("format", "json"),
            ("formatversion", "2"),
            ("prop", "wikitext"),
            ("redirects", "1"),
            ("page", name),
        ];
        let response: ParseResponse = self.get(&params).await?;
        if let Some(err) = response.error {
            debug!("wiki parse error {}: {}", err.code, err.info);
            return Err(SourceError::MissingRecord {
                kind,
                name: name.to_string(),
            });
        }
        let parsed = response
            .parse
            .ok_or_else(|| SourceError::Malformed(format!("no parse result for {}", name)))?;
        let page = parse_page(&parsed.wikitext);
        Ok(match kind {
            EntityType::Item => ElementRecord::Item(item_from_page(&parsed.title, page)),
            _ => ElementRecord::Trinket(trinket_from_page(&parsed.title, page)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> WikiSource {
        let config = WikiConfig {
            base_url: "https://example.invalid/".to_string(),
            ..WikiConfig::default()
        };
        WikiSource::new(&config, Duration::from_secs(1))
    }

    #[test]
    fn endpoint_drops_trailing_slash() {
        assert_eq!(source().endpoint, "https://example.invalid/api.php");
    }

    #[tokio::test]
    async fn only_items_and_trinkets_are_served() {
        let err = source().list_names(EntityType::Pill).await.unwrap_err();
        assert!(matches!(err, SourceError::Unsupported(EntityType::Pill)));
        let err = source().fetch_record(EntityType::Card, "The Fool").await.unwrap_err();
        assert!(matches!(err, SourceError::Unsupported(EntityType::Card)));
    }

    #[test]
    fn decodes_category_batches() {
        let body = r#"{"continue":{"cmcontinue":"page|X","continue":"-||"},
            "query":{"categorymembers":[{"pageid":1,"ns":0,"title":"A Pony"},{"pageid":2,"ns":14,"title":"Category:Sub"}]}}"#;
        let page: CategoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.next.unwrap().cmcontinue, "page|X");
        assert_eq!(page.query.categorymembers[1].ns, 14);
    }
}
