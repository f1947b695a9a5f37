//! Request and response schemas for the person endpoints.
//!
//! Constraints live on the types (`validator` attributes); the kernel
//! extractors enforce them before any handler runs.

use persona_derive::api_model;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use validator::Validate as _;

/// Hair colors accepted by [`Person::hair_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HairColor {
    White,
    Brown,
    Black,
    Blonde,
    Red,
}

impl HairColor {
    /// Wire names of every variant, comma separated.
    #[must_use]
    pub fn allowed() -> String {
        Self::iter().map(|color| color.to_string()).collect::<Vec<_>>().join(", ")
    }
}

impl<'de> Deserialize<'de> for HairColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| {
            de::Error::custom(format!("`{raw}` is not a hair color, expected one of: {}", Self::allowed()))
        })
    }
}

/// Where a person lives.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Location {
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(feature = "server", schema(example = "Neza", min_length = 1, max_length = 50))]
    pub city: String,
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(feature = "server", schema(example = "Mexico", min_length = 1, max_length = 50))]
    pub state: String,
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(feature = "server", schema(example = "Mexico", min_length = 1, max_length = 50))]
    pub country: String,
}

/// A person profile. Absent optional fields are echoed back as `null`.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Person {
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(feature = "server", schema(example = "Carlos", min_length = 1, max_length = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(
        feature = "server",
        schema(example = "Vazquez Lara", min_length = 1, max_length = 50)
    )]
    pub last_name: String,
    /// Strictly between 0 and 115.
    #[validate(range(exclusive_min = 0, exclusive_max = 115))]
    #[cfg_attr(
        feature = "server",
        schema(example = 33, exclusive_minimum = 0, exclusive_maximum = 115)
    )]
    pub age: i64,
    pub hair_color: Option<HairColor>,
    #[cfg_attr(feature = "server", schema(example = false))]
    pub is_married: Option<bool>,
}

/// Query string of `GET /person/detail`.
#[api_model(deny_unknown_fields = false)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams), into_params(parameter_in = Query))]
pub struct PersonDetailQuery {
    /// This is the person name. It's between 1 and 50 characters
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(feature = "server", param(example = "Jesus", min_length = 1, max_length = 50))]
    pub name: Option<String>,
    /// This is the person age. It's required
    #[cfg_attr(feature = "server", param(example = "29"))]
    pub age: String,
}

impl PersonDetailQuery {
    /// Key used when no name was given.
    pub const MISSING_NAME: &'static str = "null";

    /// The `(name, age)` pair echoed by the endpoint.
    #[must_use]
    pub fn into_entry(self) -> (String, String) {
        (self.name.unwrap_or_else(|| Self::MISSING_NAME.to_owned()), self.age)
    }
}

/// Path segment carrying a person id.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams), into_params(parameter_in = Path))]
pub struct PersonPath {
    /// This is the person ID
    #[validate(range(exclusive_min = 0))]
    #[cfg_attr(feature = "server", param(example = 12, minimum = 1))]
    pub person_id: i64,
}

/// Body of `PUT /person/{person_id}`: both parts are validated recursively.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct UpdatePersonRequest {
    #[validate(nested)]
    pub person: Person,
    #[validate(nested)]
    pub location: Location,
}

/// Flat union of every [`Person`] and [`Location`] field.
#[api_model(validate = false, deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct PersonWithLocation {
    #[serde(flatten)]
    pub person: Person,
    #[serde(flatten)]
    pub location: Location,
}

impl From<UpdatePersonRequest> for PersonWithLocation {
    fn from(request: UpdatePersonRequest) -> Self {
        Self { person: request.person, location: request.location }
    }
}
