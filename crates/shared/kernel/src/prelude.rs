//! Common imports for feature slices.

pub use crate::config::{ConfigError, load_config};
pub use crate::domain::config::ApiConfig;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
#[cfg(feature = "server")]
pub use crate::server::{
    ApiError, ApiState, FieldViolation, ValidatedJson, ValidatedPath, ValidatedPathJson,
    ValidatedQuery,
};
