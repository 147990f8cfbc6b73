// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::articles::ArticleService;
use crate::auth::AuthConfig;
use crate::storage::{ArticleStore, MemoryArticleStore};

/// Shared handler state.
///
/// Holds no per-request data; the store is the only thing shared between
/// concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: impl ArticleStore + 'static, auth_config: AuthConfig) -> Self {
        Self {
            store: Arc::new(store),
            auth_config: Arc::new(auth_config),
        }
    }

    /// In-memory state, used when no data directory is configured.
    pub fn in_memory(auth_config: AuthConfig) -> Self {
        Self::new(MemoryArticleStore::new(), auth_config)
    }

    /// Article operations over the shared store.
    pub fn articles(&self) -> ArticleService<'_> {
        ArticleService::new(self.store.as_ref())
    }
}
