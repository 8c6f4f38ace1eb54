//! JSON document store.
//!
//! ```text
//! data/
//! ├── items.json          ← array of item documents
//! ├── trinkets.json
//! ├── cards.json
//! ├── ...
//! └── emojis.json         ← optional { "Red Heart": "❤️", ... }
//! ```
//!
//! Each collection file is read fresh on every call; editing a file takes effect
//! on the next query. Documents are matched by their `name` field (normalized)
//! and, for achievements, also by their `number`.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, trace};
use serde_json::Value;
use tokio::fs;

use super::{bounded, DataSource};
use crate::catalog::{normalize, EntityType};
use crate::errors::SourceError;
use crate::format::Emojis;
use crate::record::ElementRecord;

const EMOJI_FILE: &str = "emojis.json";

pub struct DocumentStore {
    data_dir: PathBuf,
    timeout: Duration,
}

impl DocumentStore {
    pub fn new(data_dir: impl AsRef<Path>, timeout: Duration) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            timeout,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn collection_path(&self, kind: EntityType) -> PathBuf {
        self.data_dir.join(format!("{}.json", kind.key()))
    }

    async fn load_collection(&self, kind: EntityType) -> Result<Vec<Value>, SourceError> {
        let path = self.collection_path(kind);
        let what = format!("reading {}", path.display());
        bounded(&what, self.timeout, async {
            let content = fs::read_to_string(&path).await?;
            let docs: Vec<Value> = serde_json::from_str(&content)?;
            trace!("loaded {} {} documents", docs.len(), kind.key());
            Ok::<_, SourceError>(docs)
        })
        .await
    }

    /// Emoji table; a missing file yields an empty table.
    pub async fn emojis(&self) -> Result<Emojis, SourceError> {
        let path = self.data_dir.join(EMOJI_FILE);
        let what = format!("reading {}", path.display());
        bounded(&what, self.timeout, async {
            match fs::read_to_string(&path).await {
                Ok(content) => {
                    let table: HashMap<String, String> = serde_json::from_str(&content)?;
                    Ok::<_, SourceError>(Emojis::new(table))
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("no emoji table at {}", path.display());
                    Ok(Emojis::default())
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }
}

fn doc_name(doc: &Value) -> Option<&str> {
    doc.get("name").and_then(Value::as_str)
}

fn doc_matches(kind: EntityType, doc: &Value, name: &str) -> bool {
    if doc_name(doc).map(normalize).as_deref() == Some(name) {
        return true;
    }
    kind == EntityType::Achievement
        && doc
            .get("number")
            .and_then(Value::as_u64)
            .is_some_and(|n| n.to_string() == name)
}

impl DataSource for DocumentStore {
    async fn list_names(&self, kind: EntityType) -> Result<Vec<String>, SourceError> {
        let docs = self.load_collection(kind).await?;
        docs.iter()
            .map(|doc| {
                doc_name(doc).map(str::to_string).ok_or_else(|| {
                    SourceError::Malformed(format!("{} document without a name: {}", kind.key(), doc))
                })
            })
            .collect()
    }

    async fn fetch_record(&self, kind: EntityType, name: &str) -> Result<ElementRecord, SourceError> {
        let name = normalize(name);
        let docs = self.load_collection(kind).await?;
        let doc = docs
            .into_iter()
            .find(|doc| doc_matches(kind, doc, &name))
            .ok_or_else(|| SourceError::MissingRecord {
                kind,
                name: name.clone(),
            })?;
        Ok(ElementRecord::from_document(kind, doc)?)
    }
}
