// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Resolves request credentials to a [`Principal`].
//!
//! ## Auth Flow
//!
//! 1. An external identity provider issues a signed JWT
//! 2. The client sends `Authorization: Bearer <JWT>`
//! 3. The server:
//!    - Verifies signature, expiry, and (when configured) issuer and audience
//!    - Takes `sub` as the canonical principal ID
//!
//! ## Security
//!
//! - Every article endpoint requires authentication
//! - Authentication is resolved before any resource lookup, so an
//!   unauthenticated request only ever sees 401
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod config;
pub mod error;
pub mod extractor;

pub use claims::{Principal, TokenClaims};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractor::{resolve_principal, Auth};
