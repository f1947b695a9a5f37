//! # Persona Server
//!
//! HTTP entry point: person and location validation endpoints, a health
//! probe, and the API reference served at `/api`.
//!
//! ## Example
//! ```no_run
//! use persona_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder().port(8000).build()?.run().await
//! }
//! ```

mod router;

pub use crate::router::DOCS_PATH;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use persona::domain::config::{ApiConfig, LoggingConfig};
use persona::kernel::server::ApiState;
use persona_logger::{Logger, parse_level};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Installs the global subscriber described by the `logging` config section.
///
/// # Errors
/// Fails on an unknown level, an invalid filter, or an unusable log directory.
pub fn init_logging(cfg: &LoggingConfig) -> Result<Logger> {
    let mut builder = Logger::builder(env!("CARGO_PKG_NAME"))
        .level(parse_level(&cfg.level)?)
        .console(cfg.console);

    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }
    if let Some(directory) = &cfg.directory {
        builder = builder.directory(directory).max_files(cfg.max_files).json(cfg.json);
    }

    builder.init().context("Failed to initialize logging")
}

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL private key {} is readable by group or others",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Validates TLS paths, initializes feature slices and assembles the state.
    ///
    /// # Errors
    /// Returns an error if a configured certificate or key is missing, or a
    /// feature slice fails to initialize.
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let slices =
            persona::init(&self.cfg).map_err(|e| anyhow!("Feature bootstrap failed: {e}"))?;

        let state = ApiState::builder()
            .config(self.cfg)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        info!(slices = ?state.slice_names(), "Feature slices registered");
        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete router (endpoints, tracing layer and API reference),
    /// without binding a socket.
    #[must_use]
    pub fn app(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Serves until SIGINT or SIGTERM, then drains in-flight requests.
    ///
    /// # Errors
    /// Returns an error if binding fails or TLS material cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);
        let app = self.app();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address} (docs at {DOCS_PATH})");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address} (docs at {DOCS_PATH})");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
