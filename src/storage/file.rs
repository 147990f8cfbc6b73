// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed article store.
//!
//! Each article is a pretty-printed JSON document at
//! `DATA_DIR/articles/{id}.json`. Writes go to a temporary sibling first and
//! are renamed into place, so a reader never sees a half-written record.
//!
//! A process-wide `RwLock` serializes writers against readers of the same
//! store, which keeps the scope check and the write inside `replace` and
//! `remove` a single atomic step.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use super::{sort_articles, ArticleStore, OwnerScope, StoragePaths, StorageError, StorageResult};
use crate::models::{Article, ArticleId};

#[derive(Debug)]
pub struct FileArticleStore {
    paths: StoragePaths,
    initialized: bool,
    lock: RwLock<()>,
}

impl FileArticleStore {
    /// Create a new store rooted at `paths`.
    ///
    /// Does NOT create the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
            lock: RwLock::new(()),
        }
    }

    /// Create and initialize a store in one step.
    pub fn open(paths: StoragePaths) -> StorageResult<Self> {
        let mut store = Self::new(paths);
        store.initialize()?;
        Ok(store)
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Create the directory layout. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        fs::create_dir_all(self.paths.articles_dir())?;
        self.initialized = true;
        Ok(())
    }

    fn ensure_initialized(&self) -> StorageResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StorageError::NotInitialized)
        }
    }

    // ========== Generic JSON Operations ==========

    /// Read and deserialize a JSON file, `None` if it does not exist.
    fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<Option<T>> {
        let file = match File::open(path.as_ref()) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Write a JSON file (atomic write via rename).
    fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// IDs of all article files on disk. Stray files are skipped.
    fn article_ids(&self) -> StorageResult<Vec<ArticleId>> {
        let dir = self.paths.articles_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(ArticleId::parse)
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn read_article(&self, id: &ArticleId) -> StorageResult<Option<Article>> {
        self.read_json(self.paths.article(id))
    }
}

impl ArticleStore for FileArticleStore {
    fn list(&self, scope: &OwnerScope) -> StorageResult<Vec<Article>> {
        self.ensure_initialized()?;
        let _guard = self.lock.read()?;

        let mut owned = Vec::new();
        for id in self.article_ids()? {
            // An unreadable record fails the listing, the same as `find` would
            if let Some(article) = self.read_article(&id)? {
                if scope.permits(&article) {
                    owned.push(article);
                }
            }
        }

        sort_articles(&mut owned);
        Ok(owned)
    }

    fn find(&self, id: &ArticleId) -> StorageResult<Option<Article>> {
        self.ensure_initialized()?;
        let _guard = self.lock.read()?;
        self.read_article(id)
    }

    fn insert(&self, article: &Article) -> StorageResult<()> {
        self.ensure_initialized()?;
        let _guard = self.lock.write()?;

        let path = self.paths.article(&article.id);
        if path.exists() {
            return Err(StorageError::AlreadyExists(format!("Article {}", article.id)));
        }
        self.write_json(path, article)
    }

    fn replace(&self, scope: &OwnerScope, article: &Article) -> StorageResult<bool> {
        self.ensure_initialized()?;
        let _guard = self.lock.write()?;

        let permitted = self
            .read_article(&article.id)?
            .is_some_and(|existing| scope.permits(&existing) && scope.permits(article));
        if permitted {
            self.write_json(self.paths.article(&article.id), article)?;
        }
        Ok(permitted)
    }

    fn remove(&self, scope: &OwnerScope, id: &ArticleId) -> StorageResult<bool> {
        self.ensure_initialized()?;
        let _guard = self.lock.write()?;

        let permitted = self
            .read_article(id)?
            .is_some_and(|existing| scope.permits(&existing));
        if permitted {
            fs::remove_file(self.paths.article(id))?;
        }
        Ok(permitted)
    }

    fn count(&self) -> StorageResult<usize> {
        self.ensure_initialized()?;
        let _guard = self.lock.read()?;
        Ok(self.article_ids()?.len())
    }

    /// Write-read-delete probe against the data directory.
    fn health_check(&self) -> StorageResult<()> {
        self.ensure_initialized()?;
        // Probes share one scratch file
        let _guard = self.lock.write()?;

        let probe = self.paths.health_probe();
        let data = b"health_check_data";

        fs::write(&probe, data)?;
        let read_back = fs::read(&probe)?;
        fs::remove_file(&probe)?;

        if read_back != data {
            return Err(StorageError::IntegrityViolation(
                "Health check data mismatch".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use chrono::Utc;
    use tempfile::TempDir;

    fn test_store() -> (FileArticleStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileArticleStore::open(StoragePaths::new(temp_dir.path()))
            .expect("Failed to initialize store");
        (store, temp_dir)
    }

    fn article(owner: &str, title: &str) -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::generate(),
            title: title.to_string(),
            body: "body".to_string(),
            owner_id: owner.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn scope(owner: &str) -> OwnerScope {
        OwnerScope::for_principal(&Principal::with_id(owner))
    }

    #[test]
    fn initialize_creates_directories() {
        let (store, _dir) = test_store();
        assert!(store.is_initialized());
        assert!(store.paths().articles_dir().exists());
    }

    #[test]
    fn uninitialized_store_refuses_access() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileArticleStore::new(StoragePaths::new(temp_dir.path()));
        assert!(matches!(
            store.count(),
            Err(StorageError::NotInitialized)
        ));
    }

    #[test]
    fn insert_find_and_count() {
        let (store, _dir) = test_store();
        let a = article("user_1", "Hello");
        store.insert(&a).unwrap();

        assert_eq!(store.find(&a.id).unwrap(), Some(a.clone()));
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.paths().article(&a.id).exists());
    }

    #[test]
    fn find_missing_returns_none() {
        let (store, _dir) = test_store();
        assert_eq!(store.find(&ArticleId::generate()).unwrap(), None);
    }

    #[test]
    fn list_is_scoped_and_skips_stray_files() {
        let (store, _dir) = test_store();
        store.insert(&article("user_1", "mine")).unwrap();
        store.insert(&article("user_2", "theirs")).unwrap();
        fs::write(store.paths().articles_dir().join("notes.txt"), "x").unwrap();
        fs::write(store.paths().articles_dir().join("not-an-id.json"), "{}").unwrap();

        let listed = store.list(&scope("user_1")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "mine");
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn replace_and_remove_respect_scope() {
        let (store, _dir) = test_store();
        let original = article("user_2", "theirs");
        store.insert(&original).unwrap();

        let mut edited = original.clone();
        edited.title = "edited".into();
        assert!(!store.replace(&scope("user_1"), &edited).unwrap());
        assert!(!store.remove(&scope("user_1"), &original.id).unwrap());
        assert_eq!(store.find(&original.id).unwrap(), Some(original.clone()));

        assert!(store.replace(&scope("user_2"), &edited).unwrap());
        assert_eq!(store.find(&original.id).unwrap().unwrap().title, "edited");

        assert!(store.remove(&scope("user_2"), &original.id).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn reopening_sees_existing_articles() {
        let (store, dir) = test_store();
        let a = article("user_1", "persisted");
        store.insert(&a).unwrap();

        let reopened = FileArticleStore::open(StoragePaths::new(dir.path())).unwrap();
        assert_eq!(reopened.find(&a.id).unwrap(), Some(a));
    }

    #[test]
    fn list_fails_on_corrupt_article_file() {
        let (store, _dir) = test_store();
        let a = article("user_1", "mine");
        store.insert(&a).unwrap();
        fs::write(store.paths().article(&ArticleId::generate()), "not json").unwrap();

        assert!(matches!(
            store.list(&scope("user_1")),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn concurrent_health_checks_all_pass() {
        let (store, _dir) = test_store();

        std::thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        (0..200)
                            .filter(|_| store.health_check().is_err())
                            .count()
                    })
                })
                .collect();

            let failures: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
            assert_eq!(failures, 0);
        });
        assert!(!store.paths().health_probe().exists());
    }

    #[test]
    fn health_check_round_trips() {
        let (store, _dir) = test_store();
        store.health_check().unwrap();
        assert!(!store.paths().health_probe().exists());
    }
}
