use super::*;

#[test]
fn test_default_budget_is_the_stock_skill_point_pool() {
    let config = BuildForgeConfig::default();
    assert_eq!(config.budget.combined_cap, Some(595));
    assert_eq!(config.budget.resources.len(), 5);
    let strength = &config.budget.resources[0];
    assert_eq!(strength.stat, "strength");
    assert_eq!(strength.cap, 320);
    let agility = &config.budget.resources[4];
    assert_eq!(agility.stat, "agility");
    assert_eq!(agility.cap, 333);
}

#[test]
fn test_default_search_settings() {
    let config = SearchConfig::default();
    assert_eq!(config.top_k, 10);
    assert_eq!(config.worker_count, WorkerCountConfig::Auto);
}

#[test]
fn test_from_toml_str() {
    let config = BuildForgeConfig::from_toml_str(
        r#"
        [search]
        top_k = 3
        worker_count = "unlimited"

        [budget]
        combined_cap = 100

        [[budget.resources]]
        stat = "strength"
        cap = 40

        [[budget.resources]]
        stat = "agility"
        cap = 60
        "#,
    )
    .unwrap();

    assert_eq!(config.search.top_k, 3);
    assert_eq!(config.search.worker_count, WorkerCountConfig::Unlimited);
    assert_eq!(config.budget.combined_cap, Some(100));
    assert_eq!(config.budget.resources.len(), 2);
    assert_eq!(config.budget.resources[1].stat, "agility");
}

#[test]
fn test_toml_specific_worker_count() {
    let config = BuildForgeConfig::from_toml_str(
        r#"
        [search]
        worker_count = { count = 4 }
        "#,
    )
    .unwrap();
    assert_eq!(config.search.worker_count, WorkerCountConfig::Count(4));
}

#[test]
fn test_from_yaml_str() {
    let config = BuildForgeConfig::from_yaml_str(
        r#"
        search:
          top_k: 7
        budget:
          combined_cap: 250
          resources:
            - stat: intelligence
              cap: 120
        "#,
    )
    .unwrap();

    assert_eq!(config.search.top_k, 7);
    assert_eq!(config.budget.combined_cap, Some(250));
    assert_eq!(config.budget.resources[0].stat, "intelligence");
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let config = BuildForgeConfig::from_toml_str("").unwrap();
    assert_eq!(config.search.top_k, 10);
    assert_eq!(config.budget.combined_cap, Some(595));
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(matches!(
        BuildForgeConfig::from_toml_str("search = 3"),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_validate_rejects_zero_top_k() {
    let config = BuildForgeConfig::new().with_top_k(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_zero_worker_count() {
    let config = BuildForgeConfig::new().with_worker_count(WorkerCountConfig::Count(0));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_builder_style_configuration() {
    let mut config = BuildForgeConfig::new().with_combined_cap(None);
    config.budget.resources.clear();
    let config = config.with_resource("strength", 50).with_top_k(2);

    assert!(config.validate().is_ok());
    assert_eq!(config.budget.resources.len(), 1);
    assert_eq!(config.budget.combined_cap, None);
    assert_eq!(config.search.top_k, 2);
}

#[test]
fn test_toml_roundtrip() {
    let config = BuildForgeConfig::default();
    let serialized = toml::to_string(&config).unwrap();
    let parsed = BuildForgeConfig::from_toml_str(&serialized).unwrap();
    assert_eq!(parsed.search.top_k, config.search.top_k);
    assert_eq!(parsed.budget.resources, config.budget.resources);
}
