use crate::handlers;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Person endpoints, one `routes!` per path so each keeps its own OpenAPI entry.
pub fn router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new()
        .routes(routes!(handlers::create_person))
        .routes(routes!(handlers::show_person_query))
        .routes(routes!(handlers::show_person_path))
        .routes(routes!(handlers::update_person))
}
