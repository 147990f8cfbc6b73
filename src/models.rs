// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the article API. All public types
//! derive `ToSchema` for the OpenAPI document.
//!
//! ## Write payloads
//!
//! Writes are wrapped in an `article` envelope:
//!
//! ```json
//! { "article": { "title": "Hello", "body": "First post" } }
//! ```
//!
//! Only `title` and `body` are read from the envelope. Any other key
//! (including an attempt to set the owner) is ignored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// Article Identifier
// =============================================================================

/// Identifier of a stored article.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ArticleId(pub Uuid);

impl ArticleId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        ArticleId(Uuid::new_v4())
    }

    /// Parse an identifier taken from a request path.
    ///
    /// Returns `None` for anything that is not a UUID, so callers can treat a
    /// garbage id exactly like an id that does not exist.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::from_str(raw).ok().map(ArticleId)
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ArticleId {
    fn from(value: Uuid) -> Self {
        ArticleId(value)
    }
}

// =============================================================================
// Article
// =============================================================================

/// A persisted article.
///
/// `owner_id` is fixed at creation and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Article {
    /// Unique identifier.
    pub id: ArticleId,
    /// Article title.
    pub title: String,
    /// Article body.
    pub body: String,
    /// Identifier of the principal that created the article.
    pub owner_id: String,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// When the article was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Current attribute values, as seen by the validator.
    pub fn attributes(&self) -> ArticleAttributes {
        ArticleAttributes {
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// The complete set of validated article attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleAttributes {
    pub title: String,
    pub body: String,
}

impl ArticleAttributes {
    /// Attributes for a new article. Missing fields become empty strings and
    /// are then rejected by validation.
    pub fn from_changes(changes: ArticleChanges) -> Self {
        Self {
            title: changes.title.unwrap_or_default(),
            body: changes.body.unwrap_or_default(),
        }
    }

    /// Overlay the supplied changes; fields left out keep their value.
    pub fn merged(mut self, changes: ArticleChanges) -> Self {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        self
    }
}

// =============================================================================
// Write Payloads
// =============================================================================

/// Attributes submitted by a create or update request.
///
/// Every field is optional: create treats an absent field as empty, update
/// leaves it untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct ArticleChanges {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Request body for create and update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleParams {
    /// The submitted article attributes.
    pub article: ArticleChanges,
}
