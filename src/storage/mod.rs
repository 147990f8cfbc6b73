// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Article Storage
//!
//! Persistence sits behind the [`ArticleStore`] trait. Two implementations
//! ship with the service:
//!
//! - [`MemoryArticleStore`] - process-local, used when no data directory is
//!   configured and in tests
//! - [`FileArticleStore`] - one JSON document per article under
//!   `DATA_DIR/articles/`, written atomically via rename
//!
//! ## Scoping
//!
//! Stores never decide visibility on their own. Listing and every write to an
//! existing record take an [`OwnerScope`]; `find` is a raw lookup whose
//! result must be passed through [`OwnerScope::admit`].
//!
//! ## Atomicity
//!
//! Each method is a single atomic call with respect to other calls on the
//! same store. Callers hold no locks between calls.

pub mod error;
pub mod file;
pub mod memory;
pub mod ownership;
pub mod paths;

pub use error::{StorageError, StorageResult};
pub use file::FileArticleStore;
pub use memory::MemoryArticleStore;
pub use ownership::{NotFoundOrForeign, OwnedResource, OwnerScope};
pub use paths::StoragePaths;

use crate::models::{Article, ArticleId};

/// Persistence collaborator for articles.
pub trait ArticleStore: Send + Sync {
    /// All articles the scope permits, ordered by `(created_at, id)`.
    fn list(&self, scope: &OwnerScope) -> StorageResult<Vec<Article>>;

    /// Raw lookup by ID, regardless of owner.
    fn find(&self, id: &ArticleId) -> StorageResult<Option<Article>>;

    /// Persist a new article.
    ///
    /// # Errors
    /// `StorageError::AlreadyExists` if the ID is taken.
    fn insert(&self, article: &Article) -> StorageResult<()>;

    /// Overwrite an existing article if it is still within `scope`.
    ///
    /// Returns `false` when the record is gone or no longer permitted.
    fn replace(&self, scope: &OwnerScope, article: &Article) -> StorageResult<bool>;

    /// Delete an article if it exists within `scope`.
    ///
    /// Returns `false` when there was nothing permitted to delete.
    fn remove(&self, scope: &OwnerScope, id: &ArticleId) -> StorageResult<bool>;

    /// Total number of stored articles, across all owners.
    fn count(&self) -> StorageResult<usize>;

    /// Verify the backing store is usable.
    fn health_check(&self) -> StorageResult<()>;
}

/// Stable listing order shared by all stores.
pub(crate) fn sort_articles(articles: &mut [Article]) {
    articles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}
