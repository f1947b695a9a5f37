//! Shared string constants (`OpenAPI` tags, config sources).

/// `OpenAPI` tag for infrastructure endpoints (greeting, health).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the person endpoints.
pub const PEOPLE_TAG: &str = "People";

/// Default configuration file stem, resolved relative to the working directory.
pub const CONFIG_FILE: &str = "persona";
/// Prefix for environment overrides (`PERSONA__SERVER__PORT`).
pub const ENV_PREFIX: &str = "PERSONA";
