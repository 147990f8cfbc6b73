// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory article store.
//!
//! All data is lost when the store is dropped. Thread-safe via `RwLock`.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{sort_articles, ArticleStore, OwnerScope, StorageError, StorageResult};
use crate::models::{Article, ArticleId};

#[derive(Debug, Default)]
pub struct MemoryArticleStore {
    articles: RwLock<HashMap<ArticleId, Article>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleStore for MemoryArticleStore {
    fn list(&self, scope: &OwnerScope) -> StorageResult<Vec<Article>> {
        let articles = self.articles.read()?;
        let mut owned: Vec<Article> = articles
            .values()
            .filter(|article| scope.permits(*article))
            .cloned()
            .collect();
        sort_articles(&mut owned);
        Ok(owned)
    }

    fn find(&self, id: &ArticleId) -> StorageResult<Option<Article>> {
        Ok(self.articles.read()?.get(id).cloned())
    }

    fn insert(&self, article: &Article) -> StorageResult<()> {
        let mut articles = self.articles.write()?;
        if articles.contains_key(&article.id) {
            return Err(StorageError::AlreadyExists(format!("Article {}", article.id)));
        }
        articles.insert(article.id, article.clone());
        Ok(())
    }

    fn replace(&self, scope: &OwnerScope, article: &Article) -> StorageResult<bool> {
        let mut articles = self.articles.write()?;
        match articles.get_mut(&article.id) {
            Some(existing) if scope.permits(&*existing) && scope.permits(article) => {
                *existing = article.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn remove(&self, scope: &OwnerScope, id: &ArticleId) -> StorageResult<bool> {
        let mut articles = self.articles.write()?;
        let permitted = articles
            .get(id)
            .is_some_and(|existing| scope.permits(existing));
        if permitted {
            articles.remove(id);
        }
        Ok(permitted)
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.articles.read()?.len())
    }

    fn health_check(&self) -> StorageResult<()> {
        let _articles = self.articles.read()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use chrono::{Duration, Utc};

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
    fn insert_and_find() {
        let store = MemoryArticleStore::new();
        let a = article("user_1", "Hello");
        store.insert(&a).unwrap();

        assert_eq!(store.find(&a.id).unwrap(), Some(a));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let store = MemoryArticleStore::new();
        let a = article("user_1", "Hello");
        store.insert(&a).unwrap();

        assert!(matches!(
            store.insert(&a),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn list_filters_by_scope_in_creation_order() {
        let store = MemoryArticleStore::new();
        let mut first = article("user_1", "first");
        let mut second = article("user_1", "second");
        first.created_at = Utc::now() - Duration::minutes(5);
        second.created_at = Utc::now();

        store.insert(&second).unwrap();
        store.insert(&article("user_2", "foreign")).unwrap();
        store.insert(&first).unwrap();

        let titles: Vec<String> = store
            .list(&scope("user_1"))
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn replace_refuses_foreign_record() {
        let store = MemoryArticleStore::new();
        let original = article("user_2", "theirs");
        store.insert(&original).unwrap();

        let mut hijacked = original.clone();
        hijacked.title = "mine now".into();
        assert!(!store.replace(&scope("user_1"), &hijacked).unwrap());
        assert_eq!(store.find(&original.id).unwrap(), Some(original));
    }

    #[test]
    fn replace_refuses_owner_change() {
        let store = MemoryArticleStore::new();
        let original = article("user_1", "mine");
        store.insert(&original).unwrap();

        let mut reassigned = original.clone();
        reassigned.owner_id = "user_2".into();
        assert!(!store.replace(&scope("user_1"), &reassigned).unwrap());
    }

    #[test]
    fn remove_is_scoped() {
        let store = MemoryArticleStore::new();
        let a = article("user_2", "theirs");
        store.insert(&a).unwrap();

        assert!(!store.remove(&scope("user_1"), &a.id).unwrap());
        assert_eq!(store.count().unwrap(), 1);

        assert!(store.remove(&scope("user_2"), &a.id).unwrap());
        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.remove(&scope("user_2"), &a.id).unwrap());
    }
}
