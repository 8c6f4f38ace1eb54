use isaacbot::catalog::EntityType;
use isaacbot::config::Config;

#[tokio::test]
async fn default_file_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    let path = path.to_str().unwrap();
    Config::create_default(path).await.unwrap();
    let config = Config::load(path).await.unwrap();
    assert_eq!(config.source.timeout_seconds, 10);
    assert_eq!(config.resolver.similarity_threshold, 0.5);
    assert_eq!(
        config.resolver.exclusion_table().unwrap()[&EntityType::Item],
        vec!["Tonsil".to_string()]
    );
    assert_eq!(config.wiki.entity_types, vec!["items", "trinkets"]);
}

#[tokio::test]
async fn unknown_entity_type_in_priority_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolver]\npriority = [\"items\", \"bosses\"]\n").unwrap();
    let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("bosses"));
}

#[tokio::test]
async fn unknown_exclusion_key_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolver.exclusions]\nbosses = [\"Mom\"]\n").unwrap();
    assert!(Config::load(path.to_str().unwrap()).await.is_err());
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nope.toml");
    assert!(Config::load(path.to_str().unwrap()).await.is_err());
}

#[tokio::test]
async fn absent_file_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("absent.toml");
    let config = Config::load_or_default(path.to_str().unwrap()).await.unwrap();
    assert_eq!(config.source.timeout_seconds, 10);
}

#[tokio::test]
async fn present_but_invalid_file_is_not_replaced_by_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolver]\npriority = [\"items\", \"weapons\"]\n").unwrap();
    let err = Config::load_or_default(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("weapons"));
    std::fs::write(&path, "[source\ndata_dir = ").unwrap();
    assert!(Config::load_or_default(path.to_str().unwrap()).await.is_err());
}
