use axum::Router;
use persona::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Persona", description = "Person and location validation API"))]
struct ApiDoc;

/// Mount path of the interactive API reference.
pub const DOCS_PATH: &str = "/api";

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(persona::server::router::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(api_routes).merge(Scalar::with_url(DOCS_PATH, api_doc))
}
