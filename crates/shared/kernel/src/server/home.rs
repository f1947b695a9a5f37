use axum::Json;
use persona_derive::{api_handler, api_model};
use persona_domain::constants::SYSTEM_TAG;

/// Static greeting served at the root.
#[api_model(validate = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Greeting {
    #[serde(rename = "Hello")]
    #[cfg_attr(feature = "server", schema(example = "World"))]
    pub hello: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self { hello: "World".to_owned() }
    }
}

#[api_handler(
    get,
    path = "/",
    responses((status = OK, description = "Static greeting", body = Greeting)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn home_handler() -> Json<Greeting> {
    Json(Greeting::default())
}
