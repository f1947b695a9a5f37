//! # Logger
//!
//! Configures the global `tracing` subscriber for the workspace binaries:
//! compact console output, an optional daily rolling file (plain or JSON)
//! written through a non-blocking worker, and level/directive filtering.
//! `RUST_LOG` still applies when no explicit filter is given.
//!
//! ## Example
//!
//! ```rust
//! use persona_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("my_app=trace,hyper=info")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct FileOutput {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
#[must_use = "The builder must be configured before it can be used to initialize the logger."]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Minimum level emitted when no directive matches.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds explicit filter directives (e.g., `persona_people=debug,tower_http=info`).
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes daily rotated files named `<name>.<date>.log` under `directory`.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        self
    }

    /// Log file rotation strategy. No-op without [`LoggerBuilder::directory`].
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Number of rotated files kept. No-op without [`LoggerBuilder::directory`].
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// JSON lines in the log file. No-op without [`LoggerBuilder::directory`].
    pub fn json(mut self, enabled: bool) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.json = enabled;
        }
        self
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// The returned [`Logger`] owns the file worker guard; keep it alive for the
    /// lifetime of the program so buffered lines are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set,
    /// [`LoggerError::InvalidConfiguration`] for invalid builder settings and
    /// [`LoggerError::Appender`] if the rolling file cannot be opened.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;

        let env_filter = self.build_env_filter()?;
        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match self.file {
            Some(file) => {
                fs::create_dir_all(&file.directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(
                        format!("Failed to create path: {}", file.directory.display()).into(),
                    ),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.directory)
                    .context("Failed to open log file")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            }),
        }
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard; drop it only when the application is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] with console output at `INFO`.
    ///
    /// `name` prefixes rolling log files (e.g., `my-app.2026-10-19.log`).
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            file: None,
        }
    }

    /// Returns the file worker guard, if file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a textual level (`info`, `DEBUG`, `off`, ...) into a [`LevelFilter`].
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown level names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_console_info() {
        let builder = Logger::builder("test-app");
        assert!(builder.console);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert!(builder.env_filter.is_none());
        assert!(builder.file.is_none());
    }

    #[test]
    fn file_options_apply_only_after_directory() {
        let builder = Logger::builder("test-app").max_files(3).json(true);
        assert!(builder.file.is_none());

        let builder = Logger::builder("test-app")
            .directory("/tmp/persona-logs")
            .max_files(3)
            .json(true)
            .rotation(Rotation::HOURLY);
        let file = builder.file.as_ref().expect("file output configured");
        assert_eq!(file.max_files, 3);
        assert!(file.json);
    }

    #[test]
    fn validation_rejects_empty_name_and_zero_files() {
        let err = Logger::builder("  ").validate().expect_err("empty name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder("app").directory("/tmp").max_files(0).validate();
        assert!(matches!(err, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn invalid_directive_is_reported() {
        let err = Logger::builder("app").env_filter("persona=chatty").build_env_filter();
        assert!(matches!(err, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn parse_level_accepts_known_names() {
        assert_eq!(parse_level("debug").ok(), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level(" WARN ").ok(), Some(LevelFilter::WARN));
        assert_eq!(parse_level("off").ok(), Some(LevelFilter::OFF));
        assert!(parse_level("chatty").is_err());
    }
}
