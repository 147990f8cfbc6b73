// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Article operations.
//!
//! [`ArticleService`] runs list, get, create, update and delete for an
//! explicit [`Principal`]. Checks always run in the same order:
//!
//! 1. authentication (the caller already holds a `Principal`)
//! 2. ownership-scoped existence
//! 3. validation (writes only)
//!
//! A request failing an earlier check never reaches a later one.

use chrono::Utc;
use thiserror::Error;

use crate::auth::Principal;
use crate::models::{Article, ArticleAttributes, ArticleChanges, ArticleId};
use crate::storage::{ArticleStore, NotFoundOrForeign, OwnerScope, StorageError};
use crate::validation::{validate_article, FieldErrors};

/// Failure outcomes of an article operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The article does not exist or belongs to another principal.
    #[error("article not found")]
    NotFoundOrForeign,
    /// Submitted attributes were rejected.
    #[error("validation failed")]
    ValidationFailed(FieldErrors),
    /// The persistence layer failed.
    #[error("storage failure: {0}")]
    Internal(#[from] StorageError),
}

impl From<NotFoundOrForeign> for OperationError {
    fn from(_: NotFoundOrForeign) -> Self {
        OperationError::NotFoundOrForeign
    }
}

pub type OperationResult<T> = Result<T, OperationError>;

/// Attributes of a write request, or the reason they could not be decoded.
pub type Submission = Result<ArticleChanges, FieldErrors>;

/// Owner-scoped article operations over a store.
pub struct ArticleService<'a> {
    store: &'a dyn ArticleStore,
}

impl<'a> ArticleService<'a> {
    pub fn new(store: &'a dyn ArticleStore) -> Self {
        Self { store }
    }

    /// Every article owned by `principal`, oldest first.
    pub fn list(&self, principal: &Principal) -> OperationResult<Vec<Article>> {
        let scope = OwnerScope::for_principal(principal);
        Ok(self.store.list(&scope)?)
    }

    /// A single owned article.
    pub fn get(&self, principal: &Principal, id: &str) -> OperationResult<Article> {
        let scope = OwnerScope::for_principal(principal);
        self.find_scoped(&scope, id)
    }

    /// Create an article owned by `principal`.
    pub fn create(&self, principal: &Principal, submission: Submission) -> OperationResult<Article> {
        let changes = submission.map_err(OperationError::ValidationFailed)?;
        let attributes = ArticleAttributes::from_changes(changes);
        validate_article(&attributes).map_err(OperationError::ValidationFailed)?;

        let now = Utc::now();
        let article = Article {
            id: ArticleId::generate(),
            title: attributes.title,
            body: attributes.body,
            owner_id: principal.id.clone(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert(&article)?;
        tracing::info!(article_id = %article.id, owner_id = %article.owner_id, "Article created");

        Ok(article)
    }

    /// Apply the submitted changes to an owned article.
    ///
    /// Only supplied fields change. The merged record is validated with the
    /// same rules as create.
    pub fn update(
        &self,
        principal: &Principal,
        id: &str,
        submission: Submission,
    ) -> OperationResult<Article> {
        let scope = OwnerScope::for_principal(principal);
        let current = self.find_scoped(&scope, id)?;

        let changes = submission.map_err(OperationError::ValidationFailed)?;
        let attributes = current.attributes().merged(changes);
        validate_article(&attributes).map_err(OperationError::ValidationFailed)?;

        let updated = Article {
            title: attributes.title,
            body: attributes.body,
            updated_at: Utc::now(),
            ..current
        };

        if !self.store.replace(&scope, &updated)? {
            // Deleted between lookup and write
            return Err(OperationError::NotFoundOrForeign);
        }
        tracing::info!(article_id = %updated.id, owner_id = %updated.owner_id, "Article updated");

        Ok(updated)
    }

    /// Delete an owned article.
    pub fn delete(&self, principal: &Principal, id: &str) -> OperationResult<()> {
        let scope = OwnerScope::for_principal(principal);
        let article = self.find_scoped(&scope, id)?;

        if !self.store.remove(&scope, &article.id)? {
            return Err(OperationError::NotFoundOrForeign);
        }
        tracing::info!(article_id = %article.id, owner_id = %article.owner_id, "Article deleted");

        Ok(())
    }

    /// Look up `id` and admit it into `scope`. Unparseable IDs are absent.
    fn find_scoped(&self, scope: &OwnerScope, id: &str) -> OperationResult<Article> {
        let found = match ArticleId::parse(id) {
            Some(article_id) => self.store.find(&article_id)?,
            None => None,
        };
        Ok(scope.admit(found)?)
    }
}
