// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the resolved principal.

use serde::{Deserialize, Serialize};

/// Claims read from a bearer token.
///
/// Only `sub` identifies the caller. `exp`, `nbf`, `iss` and `aud` are
/// checked by `jsonwebtoken` during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (principal ID)
    pub sub: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(default)]
    pub iss: String,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,
}

/// The authenticated identity making a request.
///
/// Every article operation takes a `&Principal` explicitly; there is no
/// ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable principal ID (token `sub` claim)
    pub id: String,
}

impl Principal {
    /// Build a principal from validated claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self { id: claims.sub }
    }

    /// Principal with only an ID. Used where the credential is already trusted.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
