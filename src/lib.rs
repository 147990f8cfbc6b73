// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blog Articles API - owner-scoped article service
//!
//! Authenticated principals create, read, update and delete their own
//! articles. Articles owned by anyone else are indistinguishable from
//! articles that do not exist.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and version negotiation
//! - `articles` - Owner-scoped article operations
//! - `auth` - Bearer token verification
//! - `storage` - Article persistence (in-memory or JSON files)
//! - `validation` - Field rules for article attributes

pub mod api;
pub mod articles;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
