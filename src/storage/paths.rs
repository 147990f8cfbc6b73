// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path layout for the file-backed article store.
//!
//! ```text
//! DATA_DIR/
//!   articles/
//!     {article_id}.json
//! ```

use std::path::{Path, PathBuf};

use crate::models::ArticleId;

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Layout rooted at the configured data directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory containing all articles.
    pub fn articles_dir(&self) -> PathBuf {
        self.root.join("articles")
    }

    /// Path to a specific article file.
    pub fn article(&self, article_id: &ArticleId) -> PathBuf {
        self.articles_dir().join(format!("{article_id}.json"))
    }

    /// Scratch file used by the storage health probe.
    pub fn health_probe(&self) -> PathBuf {
        self.root.join(".health_check")
    }
}
