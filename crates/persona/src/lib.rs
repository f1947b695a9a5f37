//! Facade crate for the persona features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates and holds no endpoint logic.

pub use persona_domain as domain;
use persona_domain::config::ApiConfig;
pub use persona_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use persona_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes merged with every enabled feature router.
        pub fn api_router<S>() -> OpenApiRouter<S>
        where
            S: Send + Sync + Clone + 'static,
        {
            system_router::<S>().merge(crate::features::people::router::<S>())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use persona_people as people;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "people",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled feature slices.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    tracing::debug!(port = config.server.port, "Initializing feature slices");

    let slices = vec![features::people::init()?];

    Ok(slices)
}
