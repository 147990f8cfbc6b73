// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API version negotiation via vendor media types.
//!
//! Clients select a version with `Accept: application/vnd.blog.v1`. A request
//! that names no vendor media type (plain `application/json`, `*/*`, or no
//! `Accept` at all) is served by [`DEFAULT_VERSION`]. Naming a version this
//! server does not implement is answered with 406.

use axum::{
    extract::Request,
    http::{header::ACCEPT, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Vendor media type prefix; the version number follows directly.
pub const VENDOR_MEDIA_TYPE_PREFIX: &str = "application/vnd.blog.v";

pub const DEFAULT_VERSION: u32 = 1;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Version a request is served with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion(pub u32);

/// Outcome of reading the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requested {
    /// No vendor media type present
    Unspecified,
    /// A vendor media type naming this version
    Version(u32),
    /// A vendor media type whose version could not be parsed
    Unparseable,
}

/// Find the first vendor media type in the `Accept` header.
pub fn requested_version(headers: &HeaderMap) -> Requested {
    for value in headers.get_all(ACCEPT) {
        let Ok(value) = value.to_str() else {
            continue;
        };

        for media_range in value.split(',') {
            // Drop parameters such as `; q=0.9` or `+json` suffixes
            let essence = media_range.split(';').next().unwrap_or_default().trim();
            let essence = essence.split('+').next().unwrap_or_default();

            if let Some(rest) = essence.strip_prefix(VENDOR_MEDIA_TYPE_PREFIX) {
                return match rest.parse::<u32>() {
                    Ok(version) => Requested::Version(version),
                    Err(_) => Requested::Unparseable,
                };
            }
        }
    }

    Requested::Unspecified
}

/// Resolve the version a request should be served with.
///
/// Returns `None` when the client asked for a version this server does not
/// serve.
pub fn negotiate_version(headers: &HeaderMap) -> Option<ApiVersion> {
    match requested_version(headers) {
        Requested::Unspecified => Some(ApiVersion(DEFAULT_VERSION)),
        Requested::Version(v) if SUPPORTED_VERSIONS.contains(&v) => Some(ApiVersion(v)),
        Requested::Version(_) | Requested::Unparseable => None,
    }
}

/// Middleware that rejects requests for versions this server does not serve.
pub async fn require_supported_version(request: Request, next: Next) -> Response {
    match negotiate_version(request.headers()) {
        Some(_) => next.run(request).await,
        None => {
            tracing::debug!("Rejected request for unsupported API version");
            ApiError::not_acceptable("Unsupported API version").into_response()
        }
    }
}
