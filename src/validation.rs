// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Field validation for article attributes.
//!
//! Validation is a pure function of the submitted attributes. Create and
//! update run the same rules; update validates the record as it would look
//! after the changes are applied.
//!
//! | Field | Rules |
//! |-------|-------|
//! | `title` | required, not blank, at most [`MAX_TITLE_LEN`] characters |
//! | `body` | required, not blank, at most [`MAX_BODY_LEN`] characters |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ArticleAttributes;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Longest accepted body, in characters.
pub const MAX_BODY_LEN: usize = 65_535;

pub const BLANK: &str = "can't be blank";

/// Field name to list of human-readable violations.
///
/// Serializes as a plain JSON object, e.g. `{"title":["can't be blank"]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set holding a single violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a violation for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Violations recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Validate a complete attribute set.
///
/// # Errors
/// Returns every violation found, grouped by field.
pub fn validate_article(attributes: &ArticleAttributes) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_text(&mut errors, "title", &attributes.title, MAX_TITLE_LEN);
    check_text(&mut errors, "body", &attributes.body, MAX_BODY_LEN);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, BLANK);
        return;
    }

    if value.chars().count() > max_len {
        errors.add(
            field,
            format!("is too long (maximum is {max_len} characters)"),
        );
    }
}
