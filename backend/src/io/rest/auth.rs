//! Bearer token authentication for handlers.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use log::warn;

use crate::io::rest::ApiError;
use crate::storage::Credential;
use crate::AppState;

/// The signed-in caller, resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct AuthUser(pub Credential);

impl AuthUser {
    pub fn uid(&self) -> &str {
        &self.0.uid
    }

    pub fn token(&self) -> &str {
        &self.0.token
    }
}

/// Token carried by the `Authorization` header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            warn!("Rejected {} {}: missing bearer token", parts.method, parts.uri.path());
            ApiError::unauthorized()
        })?;

        let credential = state.account_service.authenticate(token).await.map_err(|e| {
            warn!("Rejected {} {}: {}", parts.method, parts.uri.path(), e);
            ApiError::from(e)
        })?;
        Ok(AuthUser(credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("bearer  abc123 ")), Some("abc123"));
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
