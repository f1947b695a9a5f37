//! HTTP building blocks shared by the server app and the feature slices.

mod error;
mod extract;
mod health;
mod home;
pub mod router;
mod state;

pub use error::{ApiError, ApiErrorExt, ErrorBody, FieldViolation, Source};
pub use extract::{ValidatedJson, ValidatedPath, ValidatedPathJson, ValidatedQuery};
pub use health::HealthResponse;
pub use home::Greeting;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
