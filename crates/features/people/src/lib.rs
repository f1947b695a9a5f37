//! People feature slice: person and location schemas plus the endpoints that
//! accept, validate and echo them.

mod error;
#[cfg(feature = "server")]
pub mod handlers;
pub mod models;
#[cfg(feature = "server")]
mod router;

pub use crate::error::{PeopleError, PeopleErrorExt};
pub use crate::models::{
    HairColor, Location, Person, PersonDetailQuery, PersonPath, PersonWithLocation,
    UpdatePersonRequest,
};
#[cfg(feature = "server")]
pub use crate::router::router;

use persona_kernel::domain::registry::InitializedSlice;

/// People feature state. Nothing is persisted; the slice only marks the
/// feature as mounted.
#[persona_derive::persona_slice]
pub struct People {}

/// Initialize the people feature.
///
/// # Errors
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice, PeopleError> {
    tracing::info!("People slice initialized");

    Ok(InitializedSlice::new(People::new(PeopleInner {})))
}
