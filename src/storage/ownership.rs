// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership scoping for all article lookups.
//!
//! Every read or write of an existing article passes through an
//! [`OwnerScope`]. A record that exists but belongs to somebody else is
//! reported exactly like a record that does not exist, so callers cannot
//! probe which IDs are in use by other principals.

use crate::auth::Principal;
use crate::models::Article;

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's principal ID.
    fn owner_id(&self) -> &str;
}

impl OwnedResource for Article {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// The single outcome for "absent" and "owned by someone else".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFoundOrForeign;

impl std::fmt::Display for NotFoundOrForeign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource not found")
    }
}

impl std::error::Error for NotFoundOrForeign {}

/// Restricts visibility and mutability to resources owned by one principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope {
    owner_id: String,
}

impl OwnerScope {
    /// Scope for the principal making the request.
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            owner_id: principal.id.clone(),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// The scope predicate: `owner_id == principal.id`.
    pub fn permits<R: OwnedResource>(&self, resource: &R) -> bool {
        resource.owner_id() == self.owner_id
    }

    /// Admit the result of a raw lookup into this scope.
    ///
    /// # Errors
    /// Returns [`NotFoundOrForeign`] both when nothing was found and when the
    /// record belongs to another principal.
    pub fn admit<R: OwnedResource>(&self, found: Option<R>) -> Result<R, NotFoundOrForeign> {
        match found {
            None => Err(NotFoundOrForeign),
            Some(resource) if !self.permits(&resource) => {
                tracing::debug!(
                    principal = %self.owner_id,
                    "Lookup matched a resource outside the caller's scope"
                );
                Err(NotFoundOrForeign)
            }
            Some(resource) => Ok(resource),
        }
    }
}
