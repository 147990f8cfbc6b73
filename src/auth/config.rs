// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification settings.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

/// Clock skew tolerance (60 seconds).
pub const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Key material and claim expectations used to verify bearer tokens.
///
/// Tokens are minted by an external identity provider; this service only
/// checks them.
#[derive(Clone)]
pub struct AuthConfig {
    key: DecodingKey,
    algorithm: Algorithm,
    /// Expected `iss` claim (unchecked when `None`)
    pub issuer: Option<String>,
    /// Expected `aud` claim (unchecked when `None`)
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Verify HS256 tokens signed with a shared secret.
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            algorithm: Algorithm::HS256,
            issuer: None,
            audience: None,
        }
    }

    /// Verify RS256 tokens against a PEM-encoded RSA public key.
    ///
    /// # Errors
    /// Fails when the PEM cannot be parsed as an RSA public key.
    pub fn rsa_pem(pem: impl AsRef<[u8]>) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self {
            key: DecodingKey::from_rsa_pem(pem.as_ref())?,
            algorithm: Algorithm::RS256,
            issuer: None,
            audience: None,
        })
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.key
    }

    /// Validation rules for a single decode. `exp` is always required.
    pub(crate) fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_nbf = true;

        if let Some(ref issuer) = self.issuer {
            validation.set_issuer(&[issuer]);
        }

        if let Some(ref audience) = self.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        validation
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
