use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use stt_domain::{JobId, UserId};
use validator::Validate;

use crate::{AppState, HttpError};

/// Caller identity taken from the gateway header. Rejects with 401 before
/// any body or query parsing happens.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(&state.user_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(HttpError::Unauthorized)?;

        Ok(Self(UserId::new(user_id)))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JobIdPath(pub JobId);

impl<S> FromRequestParts<S> for JobIdPath
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<JobId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| HttpError::Validation {
                message: format!("invalid job id: {}", rejection.body_text()),
            })?;
        Ok(Self(id))
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| HttpError::Validation {
                message: rejection.body_text(),
            })?;
        value.validate().map_err(|errors| HttpError::Validation {
            message: errors.to_string(),
        })?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| HttpError::Validation {
                message: rejection.body_text(),
            })?;
        value.validate().map_err(|errors| HttpError::Validation {
            message: errors.to_string(),
        })?;
        Ok(Self(value))
    }
}
