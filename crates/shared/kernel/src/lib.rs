//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, the shared API state,
//! validated request extractors and the system routes.
//!
//! ## Config loading
//! ```rust
//! use persona_kernel::config::load_config;
//! use persona_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("persona")).unwrap_or_default();
//! assert!(cfg.server.port > 0);
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use persona_domain as domain;
