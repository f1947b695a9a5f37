use super::{health, home};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Greeting and health probe.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new()
        .routes(routes!(home::home_handler))
        .routes(routes!(health::health_handler))
}
