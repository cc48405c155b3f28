//! Actor extraction
//!
//! The upstream gateway authenticates callers and forwards their identity in
//! headers; the back office consumes that identity as an explicit [`Actor`]
//! value. Missing headers yield an anonymous actor; individual operations
//! decide what anonymity means for them.
//!
//! Headers: `x-actor-id`, `x-actor-user`, `x-actor-role`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::{Actor, Role};
use crate::utils::AppError;

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let role = match header("x-actor-role") {
            Some(raw) => Some(Role::parse(&raw).ok_or_else(|| {
                AppError::Validation(format!("Unknown actor role: {}", raw))
            })?),
            None => None,
        };

        let id = match header("x-actor-id") {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::Validation(format!("Invalid actor id: {}", raw))
            })?),
            None => None,
        };

        Ok(Actor {
            id,
            username: header("x-actor-user"),
            role,
        })
    }
}
