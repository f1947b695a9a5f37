use crate::domain::constants::{CONFIG_FILE, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors raised while assembling the layered configuration.
#[persona_derive::persona_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from an optional file overlaid with environment variables.
///
/// Layers, lowest precedence first:
/// 1. **Defaults**: whatever `T` deserializes to from an empty document
///    (use `#[serde(default)]` on the target type).
/// 2. **File**: `path` (extension optional, e.g. `persona` resolves `persona.toml`),
///    defaulting to [`CONFIG_FILE`] in the working directory. A missing file is not an error.
/// 3. **Environment**: variables prefixed with `PERSONA__`; nested keys use double
///    underscores (`PERSONA__SERVER__PORT=9000` maps to `server.port`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or the merged values
/// do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use persona_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), |p| p.as_ref().to_path_buf());

    debug!(path = %effective_path.display(), "Loading config");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
