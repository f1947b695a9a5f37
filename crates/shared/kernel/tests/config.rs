use persona_kernel::config::{ConfigError, load_config};
use persona_kernel::domain::config::ApiConfig;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("temp dir");
    let cfg: ApiConfig = load_config(Some(dir.path().join("absent"))).expect("defaults");
    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
#[serial]
fn file_values_override_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("persona.toml");
    fs::write(&path, "[server]\nport = 9100\n\n[logging]\nlevel = \"debug\"\njson = true\n")
        .expect("write config");

    let cfg: ApiConfig = load_config(Some(&path)).expect("config loads");
    assert_eq!(cfg.server.port, 9100);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.console);
}

#[test]
#[serial]
fn malformed_values_are_reported_with_context() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("persona.toml");
    fs::write(&path, "[server]\nport = \"not-a-port\"\n").expect("write config");

    let err = load_config::<ApiConfig>(Some(&path)).expect_err("port must be numeric");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    assert!(err.to_string().contains("Failed to deserialize config"), "{err}");
}
