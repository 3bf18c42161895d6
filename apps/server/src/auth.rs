//! Request user scoping.
//!
//! The upstream auth provider is outside this service; what reaches us is
//! its output, the authenticated user's id, carried in the `X-User-Id`
//! header. Every record access is scoped by it.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};

const USER_HEADER: &str = "x-user-id";

/// The authenticated user's id, extracted from the request headers.
pub struct UserScope(pub String);

impl<S> FromRequestParts<S> for UserScope
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| UserScope(value.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "missing X-User-Id header"))
    }
}
