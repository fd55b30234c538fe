use pagewire_core::config::{ConfigError, ConfigProperties, ConfigValue, PagewireConfig};
use pagewire_core::{PageError, PaginationInterceptor, PaginationProperties};
use serial_test::serial;

#[test]
fn test_empty_config() {
    let config = PagewireConfig::empty();
    assert!(config.get::<String>("nonexistent").is_err());
    assert_eq!(config.profile(), "test");
}

#[test]
fn test_set_and_get() {
    let mut config = PagewireConfig::empty();
    config.set("pagewire.pagination.pattern", ConfigValue::String("find.*".into()));
    assert_eq!(
        config.get::<String>("pagewire.pagination.pattern").unwrap(),
        "find.*"
    );
    assert!(config.contains_key("pagewire.pagination.pattern"));
}

#[test]
fn test_get_or_default() {
    let config = PagewireConfig::empty();
    assert_eq!(config.get_or("missing", 20u32), 20);
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
pagewire:
  pagination:
    pattern: ".*ByPage$"
  defaults:
    page_size: 25
    need_count: false
    ids: [a, b]
"#;
    let config = PagewireConfig::from_yaml_str(yaml, "test").unwrap();

    assert_eq!(
        config.get::<String>("pagewire.pagination.pattern").unwrap(),
        ".*ByPage$"
    );
    assert_eq!(config.get::<u32>("pagewire.defaults.page_size").unwrap(), 25);
    assert!(!config.get::<bool>("pagewire.defaults.need_count").unwrap());
    assert_eq!(
        config.get::<Vec<String>>("pagewire.defaults.ids").unwrap(),
        vec!["a", "b"]
    );
}

#[test]
fn test_invalid_yaml() {
    let err = PagewireConfig::from_yaml_str("pagewire: [unclosed", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_pagination_properties_default() {
    let properties = PaginationProperties::from_config(&PagewireConfig::empty()).unwrap();
    assert_eq!(properties, PaginationProperties::default());
    assert_eq!(properties.pattern, ".*Page$");
}

#[test]
fn test_pagination_properties_from_yaml() {
    let yaml = r#"
pagewire:
  pagination:
    pattern: "list.*"
"#;
    let config = PagewireConfig::from_yaml_str(yaml, "test")
        .unwrap()
        .with_typed::<PaginationProperties>()
        .unwrap();
    assert_eq!(config.pattern, "list.*");
    assert_eq!(PaginationProperties::key("pattern"), "pagewire.pagination.pattern");
}

#[test]
fn test_pagination_properties_type_mismatch() {
    let mut config = PagewireConfig::empty();
    config.set(
        "pagewire.pagination.pattern",
        ConfigValue::List(vec![ConfigValue::String("a".into())]),
    );
    let err = PaginationProperties::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
}

#[test]
fn test_interceptor_from_config() {
    let yaml = r#"
pagewire:
  pagination:
    pattern: "report\\..*"
"#;
    let config = PagewireConfig::from_yaml_str(yaml, "test").unwrap();
    let interceptor = PaginationInterceptor::from_config(&config).unwrap();
    assert!(interceptor.matches(Some("report.monthly")));
    assert!(!interceptor.matches(Some("user.findPage")));
}

#[test]
fn test_interceptor_from_config_bad_pattern() {
    let mut config = PagewireConfig::empty();
    config.set("pagewire.pagination.pattern", ConfigValue::String("[".into()));
    let err = PaginationInterceptor::from_config(&config).unwrap_err();
    assert!(matches!(err, PageError::InvalidPattern(_)));
}

#[test]
#[serial]
fn test_load_from_dir_with_profile_and_env() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "pagewire:\n  pagination:\n    pattern: \".*Page$\"\n  name: base\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-prod.yaml"),
        "pagewire:\n  name: prod\n",
    )
    .unwrap();

    std::env::remove_var("PAGEWIRE_PROFILE");
    std::env::set_var("PAGEWIRE_PAGINATION_PATTERN", "env.*");

    let config = PagewireConfig::load_from_dir(dir.path(), "prod").unwrap();

    std::env::remove_var("PAGEWIRE_PAGINATION_PATTERN");

    assert_eq!(config.profile(), "prod");
    assert_eq!(config.get::<String>("pagewire.name").unwrap(), "prod");
    // environment variables take priority over YAML
    assert_eq!(
        config.get::<String>("pagewire.pagination.pattern").unwrap(),
        "env.*"
    );
}

#[test]
#[serial]
fn test_profile_env_var_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "pagewire:\n  pagination:\n    pattern: \"staging.*\"\n",
    )
    .unwrap();

    std::env::set_var("PAGEWIRE_PROFILE", "staging");
    let config = PagewireConfig::load_from_dir(dir.path(), "dev").unwrap();
    std::env::remove_var("PAGEWIRE_PROFILE");

    assert_eq!(config.profile(), "staging");
    let interceptor = PaginationInterceptor::from_config(&config).unwrap();
    assert_eq!(interceptor.pattern(), "staging.*");
}

#[test]
#[serial]
fn test_profile_dotenv_overrides_base_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "PAGEWIRE_PAGINATION_PATTERN=base.*\n").unwrap();
    std::fs::write(dir.path().join(".env.prod"), "PAGEWIRE_PAGINATION_PATTERN=prod.*\n").unwrap();

    std::env::remove_var("PAGEWIRE_PROFILE");
    std::env::remove_var("PAGEWIRE_PAGINATION_PATTERN");
    let config = PagewireConfig::load_from_dir(dir.path(), "prod");
    std::env::remove_var("PAGEWIRE_PAGINATION_PATTERN");

    assert_eq!(
        config.unwrap().get::<String>("pagewire.pagination.pattern").unwrap(),
        "prod.*"
    );
}

#[test]
#[serial]
fn test_base_dotenv_applies_without_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "PAGEWIRE_PAGINATION_PATTERN=base.*\n").unwrap();

    std::env::remove_var("PAGEWIRE_PROFILE");
    std::env::remove_var("PAGEWIRE_PAGINATION_PATTERN");
    let config = PagewireConfig::load_from_dir(dir.path(), "dev");
    std::env::remove_var("PAGEWIRE_PAGINATION_PATTERN");

    assert_eq!(
        config.unwrap().get::<String>("pagewire.pagination.pattern").unwrap(),
        "base.*"
    );
}

#[test]
#[serial]
fn test_malformed_dotenv_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "PAGEWIRE_BROKEN VALUE\n").unwrap();

    std::env::remove_var("PAGEWIRE_PROFILE");
    let err = PagewireConfig::load_from_dir(dir.path(), "dev").unwrap_err();

    match err {
        ConfigError::Load(msg) => assert!(msg.contains(".env"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}
