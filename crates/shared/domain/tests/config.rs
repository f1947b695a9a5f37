use persona_domain::config::{ApiConfig, LoggingConfig, ServerConfig};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr};

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(server.port, 8000);
    assert!(server.ssl.is_none());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(!logging.json);
    assert!(logging.directory.is_none());
    assert_eq!(logging.max_files, 10);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080, "ssl": { "cert": "/tmp/c.pem", "key": "/tmp/k.pem" } },
        "logging": { "level": "debug", "json": true, "directory": "/tmp/logs" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.ssl.as_ref().map(|s| s.key.clone()), Some("/tmp/k.pem".into()));
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.console, "unspecified fields keep their defaults");
    assert_eq!(cfg.logging.max_files, 10);
}

#[test]
fn empty_document_yields_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn deref_mut_clones_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 9000;

    assert_eq!(original.server.port, 8000);
    assert_eq!(changed.server.port, 9000);
}
