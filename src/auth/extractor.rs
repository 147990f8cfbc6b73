// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated principals.
//!
//! Use the `Auth` extractor as the first argument of a handler to require
//! authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal is Principal
//! }
//! ```
//!
//! Extractors run in argument order, so a request without a valid credential
//! is rejected with 401 before any path, body or store access happens.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, errors::ErrorKind};

use super::{AuthConfig, AuthError, Principal, TokenClaims};
use crate::state::AppState;

/// Extractor for authenticated principals.
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_principal(&parts.headers, &state.auth_config).map(Auth)
    }
}

/// Resolve request headers to a principal.
///
/// # Errors
/// Any missing, malformed, expired or untrusted credential yields an
/// [`AuthError`]. No partial identity is ever returned.
pub fn resolve_principal(headers: &HeaderMap, config: &AuthConfig) -> Result<Principal, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)?;

    verify_token(token, config)
}

/// Verify a bearer token and extract the principal.
fn verify_token(token: &str, config: &AuthConfig) -> Result<Principal, AuthError> {
    let token_data = decode::<TokenClaims>(token, config.decoding_key(), &config.validation())
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
            ErrorKind::InvalidAudience => AuthError::InvalidAudience,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            _ => AuthError::MalformedToken,
        })?;

    let claims = token_data.claims;
    if claims.sub.trim().is_empty() {
        return Err(AuthError::UnknownPrincipal);
    }

    Ok(Principal::from_claims(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, TEST_SECRET};
    use axum::http::{HeaderValue, Request};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        let result = resolve_principal(&HeaderMap::new(), &testing::auth_config());
        assert_eq!(result, Err(AuthError::MissingAuthHeader));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let config = testing::auth_config();
        assert_eq!(
            resolve_principal(&headers_with("Basic dXNlcjpwYXNz"), &config),
            Err(AuthError::InvalidAuthHeader)
        );
        assert_eq!(
            resolve_principal(&headers_with("Bearer    "), &config),
            Err(AuthError::InvalidAuthHeader)
        );
    }

    #[test]
    fn valid_token_resolves_to_subject() {
        let token = testing::mint_token("user_123");
        let principal =
            resolve_principal(&headers_with(&format!("Bearer {token}")), &testing::auth_config())
                .unwrap();
        assert_eq!(principal.id, "user_123");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let claims = testing::claims_for("user_123");
        let token = testing::sign(&claims, "some-other-secret");
        let result =
            resolve_principal(&headers_with(&format!("Bearer {token}")), &testing::auth_config());
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = testing::claims_for("user_123");
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        let token = testing::sign(&claims, TEST_SECRET);
        let result =
            resolve_principal(&headers_with(&format!("Bearer {token}")), &testing::auth_config());
        assert_eq!(result, Err(AuthError::TokenExpired));
    }

    #[test]
    fn unsigned_token_is_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"user_123","exp":9999999999}"#);
        let token = format!("{header}.{claims}.fake_signature");

        let result =
            resolve_principal(&headers_with(&format!("Bearer {token}")), &testing::auth_config());
        assert!(result.is_err());
    }

    #[test]
    fn garbage_token_is_malformed() {
        let result = resolve_principal(&headers_with("Bearer abc"), &testing::auth_config());
        assert_eq!(result, Err(AuthError::MalformedToken));
    }

    #[test]
    fn empty_subject_is_unknown_principal() {
        let token = testing::sign(&testing::claims_for(""), TEST_SECRET);
        let result =
            resolve_principal(&headers_with(&format!("Bearer {token}")), &testing::auth_config());
        assert_eq!(result, Err(AuthError::UnknownPrincipal));
    }

    #[test]
    fn issuer_is_enforced_when_configured() {
        let config = testing::auth_config().with_issuer("https://issuer.example.com");

        let mut claims = testing::claims_for("user_123");
        claims.iss = "https://elsewhere.example.com".into();
        let token = testing::sign(&claims, TEST_SECRET);

        let result = resolve_principal(&headers_with(&format!("Bearer {token}")), &config);
        assert_eq!(result, Err(AuthError::InvalidIssuer));
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = testing::state();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }
}
