mod common;

use std::collections::HashSet;

use isaacbot::catalog::{normalize, EntityType};
use isaacbot::errors::{ResolveError, SourceError};
use isaacbot::record::ElementRecord;
use isaacbot::resolver::{Candidate, Resolution};

#[tokio::test]
async fn every_catalog_entry_resolves_to_itself_in_exact_mode() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    for kind in EntityType::ALL {
        let catalog = resolver.catalog(kind).await.unwrap();
        for name in &catalog.names {
            if resolver.is_link_only(name) {
                continue;
            }
            match resolver.resolve(name, true).await.unwrap() {
                Resolution::Found { name: found, record, .. } => {
                    assert_eq!(found, *name);
                    assert_eq!(normalize(record.name()), *name);
                }
                other => panic!("{} {} did not resolve: {:?}", kind, name, other),
            }
        }
    }
}

#[tokio::test]
async fn lowercase_query_is_title_cased() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    for query in ["dead eye", "DEAD EYE", "mom's knife"] {
        match resolver.resolve(query, false).await.unwrap() {
            Resolution::Found { kind, .. } => assert_eq!(kind, EntityType::Item),
            other => panic!("{} did not resolve: {:?}", query, other),
        }
    }
}

#[tokio::test]
async fn partial_query_lists_best_matches_first() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    let candidates = match resolver.resolve("A Po", false).await.unwrap() {
        Resolution::Similar(c) => c,
        other => panic!("expected suggestions, got {:?}", other),
    };
    assert_eq!(
        &candidates[..2],
        &[
            Candidate::new(EntityType::Item, "A Pony"),
            Candidate::new(EntityType::Item, "A Pound of Flesh"),
        ]
    );
    let unique: HashSet<_> = candidates.iter().map(|c| (c.kind, c.name.clone())).collect();
    assert_eq!(unique.len(), candidates.len());
}

#[tokio::test]
async fn dlc_tagged_names_match_on_their_clean_form() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    match resolver.resolve("Lil Spewer", true).await.unwrap() {
        Resolution::Found { name, record, .. } => {
            assert_eq!(name, "Lil Spewer");
            assert_eq!(record.name(), "(Added in Afterbirth †)Lil Spewer");
        }
        other => panic!("expected Lil Spewer, got {:?}", other),
    }
    match resolver.resolve("sad onion", false).await.unwrap() {
        Resolution::Similar(c) => assert_eq!(c[0], Candidate::new(EntityType::Item, "The Sad Onion")),
        other => panic!("expected suggestions, got {:?}", other),
    }
}

#[tokio::test]
async fn non_item_types_resolve_after_items() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    match resolver.resolve("guppy", false).await.unwrap() {
        Resolution::Found { kind, .. } => assert_eq!(kind, EntityType::Transformation),
        other => panic!("unexpected {:?}", other),
    }
    match resolver.resolve("Magdalene", true).await.unwrap() {
        Resolution::Found { kind, .. } => assert_eq!(kind, EntityType::Character),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn excluded_item_resolves_as_trinket() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    for (query, exact) in [("Tonsil", true), ("tonsil", false)] {
        match resolver.resolve(query, exact).await.unwrap() {
            Resolution::Found { kind, record, .. } => {
                assert_eq!(kind, EntityType::Trinket);
                assert!(matches!(record, ElementRecord::Trinket(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
    let items = resolver.catalog(EntityType::Item).await.unwrap();
    assert!(!items.names.iter().any(|n| n == "Tonsil"));
    assert!(items.names.iter().any(|n| n == "The Sad Onion"));
}

#[tokio::test]
async fn unrelated_query_yields_no_suggestions() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    assert_eq!(
        resolver.resolve("xyzzy", false).await.unwrap(),
        Resolution::Similar(Vec::new())
    );
}

#[tokio::test]
async fn missing_collection_aborts_resolution() {
    let (tmp, config) = common::fixture();
    std::fs::remove_file(tmp.path().join("cards.json")).unwrap();
    let resolver = common::resolver(&config).await;
    let err = resolver.resolve("xyzzy", false).await.unwrap_err();
    assert!(matches!(err, ResolveError::Source(SourceError::Io(_))));
}

#[tokio::test]
async fn achievements_by_number() {
    let (_tmp, config) = common::fixture();
    let resolver = common::resolver(&config).await;
    let record = resolver.achievement(1).await.unwrap().unwrap();
    assert_eq!(record.name(), "Magdalene");
    assert_eq!(record.kind(), EntityType::Achievement);
    assert!(resolver.achievement(638).await.unwrap().is_none());
    assert!(matches!(
        resolver.achievement(2).await,
        Err(ResolveError::Source(SourceError::MissingRecord { .. }))
    ));
}
