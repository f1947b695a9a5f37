//! Handlers for the person endpoints. Input is already validated by the
//! kernel extractors when these run, so each one only shapes the reply.

use crate::models::{Person, PersonDetailQuery, PersonPath, PersonWithLocation, UpdatePersonRequest};
use axum::Json;
use persona_derive::api_handler;
use persona_kernel::domain::constants::PEOPLE_TAG;
use persona_kernel::server::{
    ErrorBody, ValidatedJson, ValidatedPath, ValidatedPathJson, ValidatedQuery,
};
use std::collections::HashMap;
use tracing::debug;

/// Reply of `GET /person/detail/{person_id}`.
pub const EXISTS: &str = "It exists!";

/// Accepts a person and echoes it back unchanged.
#[api_handler(
    post,
    path = "/person/new",
    request_body = Person,
    responses(
        (status = OK, description = "The person as received", body = Person),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid person", body = ErrorBody),
    ),
    tag = PEOPLE_TAG,
)]
pub async fn create_person(ValidatedJson(person): ValidatedJson<Person>) -> Json<Person> {
    debug!(first_name = %person.first_name, age = person.age, "Person accepted");
    Json(person)
}

/// Echoes the optional name and the required age as a single-entry object.
#[api_handler(
    get,
    path = "/person/detail",
    params(PersonDetailQuery),
    responses(
        (status = OK, description = "`{name: age}`, keyed `null` when no name is given", body = HashMap<String, String>),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid query", body = ErrorBody),
    ),
    tag = PEOPLE_TAG,
)]
pub async fn show_person_query(
    ValidatedQuery(query): ValidatedQuery<PersonDetailQuery>,
) -> Json<HashMap<String, String>> {
    let (name, age) = query.into_entry();
    debug!(%name, %age, "Person detail by query");
    Json(HashMap::from([(name, age)]))
}

/// Confirms that a positive person id exists.
#[api_handler(
    get,
    path = "/person/detail/{person_id}",
    params(PersonPath),
    responses(
        (status = OK, description = "`{person_id: \"It exists!\"}`", body = HashMap<String, String>),
        (status = UNPROCESSABLE_ENTITY, description = "Non-positive or non-numeric id", body = ErrorBody),
    ),
    tag = PEOPLE_TAG,
)]
pub async fn show_person_path(
    ValidatedPath(path): ValidatedPath<PersonPath>,
) -> Json<HashMap<String, String>> {
    debug!(person_id = path.person_id, "Person detail by id");
    Json(HashMap::from([(path.person_id.to_string(), EXISTS.to_owned())]))
}

/// Merges a person and a location into one flat object.
///
/// The id is validated together with the body, so both sets of violations
/// are reported at once. It does not otherwise affect the reply.
#[api_handler(
    put,
    path = "/person/{person_id}",
    params(PersonPath),
    request_body = UpdatePersonRequest,
    responses(
        (status = OK, description = "Union of the person and location fields", body = PersonWithLocation),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid id or body", body = ErrorBody),
    ),
    tag = PEOPLE_TAG,
)]
pub async fn update_person(
    ValidatedPathJson(path, request): ValidatedPathJson<PersonPath, UpdatePersonRequest>,
) -> Json<PersonWithLocation> {
    debug!(person_id = path.person_id, city = %request.location.city, "Person updated");
    Json(PersonWithLocation::from(request))
}
