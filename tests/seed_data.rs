//! The shipped `data/` store must load completely.

use std::path::Path;
use std::time::Duration;

use isaacbot::catalog::{normalize, EntityType};
use isaacbot::source::{DataSource, DocumentStore};

fn seed_store() -> DocumentStore {
    DocumentStore::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"), Duration::from_secs(5))
}

#[tokio::test]
async fn every_seed_record_parses() {
    let store = seed_store();
    for kind in EntityType::ALL {
        let names = store.list_names(kind).await.unwrap();
        assert!(!names.is_empty(), "{} collection is empty", kind);
        for name in names {
            let record = store.fetch_record(kind, &normalize(&name)).await.unwrap();
            assert_eq!(record.kind(), kind);
        }
    }
}

#[tokio::test]
async fn seed_emoji_table_loads() {
    let emojis = seed_store().emojis().await.unwrap();
    assert!(emojis.get("Red Heart").is_some());
}
