//! Integration tests for configuration and logging setup.

use std::fs;

use codex::prelude::*;

#[test]
fn test_config_drives_registry() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        r#"
[app]
name = "codex"
option_prefix = "codex_"

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(dir.path(), "test").unwrap();
    assert_eq!(config.logging.format, "json");

    let options = std::sync::Arc::new(MemoryOptions::new(std::sync::Arc::new(
        MemoryDispatcher::new(),
    )));
    let registry = Registry::for_app(&config.app, "general", options).unwrap();

    assert_eq!(registry.setting_group(), "codex/general");
    assert_eq!(registry.prefix(), "codex_");
}

#[test]
fn test_init_logging_twice_fails() {
    let config = LoggingConfig::default();

    init_logging(&config).unwrap();
    tracing::info!("logging initialized");

    let err = init_logging(&config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
}
