// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared test fixtures: signing keys, token minting and in-memory state.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::auth::{AuthConfig, TokenClaims};
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";

pub fn auth_config() -> AuthConfig {
    AuthConfig::hmac(TEST_SECRET)
}

/// Claims for `sub`, valid for the next hour.
pub fn claims_for(sub: &str) -> TokenClaims {
    let now = Utc::now().timestamp();
    TokenClaims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
        nbf: None,
        iss: String::new(),
        aud: None,
    }
}

/// HS256-sign `claims` with `secret`.
pub fn sign(claims: &TokenClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// A valid token for `sub` accepted by [`auth_config`].
pub fn mint_token(sub: &str) -> String {
    sign(&claims_for(sub), TEST_SECRET)
}

/// Fresh state over an empty in-memory store.
pub fn state() -> AppState {
    AppState::in_memory(auth_config())
}
