//! Extractors that deserialize with the stock axum extractor, then run
//! [`validator::Validate`]. Any failure becomes [`ApiError::Validation`].

use super::error::{ApiError, Source};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON request body, validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Query string, validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

/// Path segments, validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

/// Path segments and a JSON body validated together, so a request with a
/// bad id and a bad body reports both.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPathJson<P, T>(pub P, pub T);

fn validated<T: Validate>(source: Source, value: T) -> Result<T, ApiError> {
    value.validate().map_err(|errors| ApiError::from_validation(source, &errors))?;
    Ok(value)
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                rejection_error(Source::Body, rejection.status(), rejection.body_text())
            })?;
        validated(Source::Body, value).map(Self)
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                rejection_error(Source::Query, rejection.status(), rejection.body_text())
            })?;
        validated(Source::Query, value).map(Self)
    }
}

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                rejection_error(Source::Path, rejection.status(), rejection.body_text())
            })?;
        validated(Source::Path, value).map(Self)
    }
}

impl<P, T, S> FromRequest<S> for ValidatedPathJson<P, T>
where
    P: DeserializeOwned + Validate + Send,
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let path = ValidatedPath::<P>::from_request_parts(&mut parts, state).await;
        let json = ValidatedJson::<T>::from_request(Request::from_parts(parts, body), state).await;

        match (path, json) {
            (Ok(ValidatedPath(path)), Ok(ValidatedJson(body))) => Ok(Self(path, body)),
            (Err(path), Err(body)) => Err(path.merge(body)),
            (Err(error), Ok(_)) | (Ok(_), Err(error)) => Err(error),
        }
    }
}

/// Client-side rejections are input errors; anything else is a server fault.
fn rejection_error(source: Source, status: axum::http::StatusCode, text: String) -> ApiError {
    if status.is_server_error() {
        ApiError::Internal { message: text.into(), context: Some(source.as_str().into()) }
    } else {
        ApiError::rejected(source, text)
    }
}
