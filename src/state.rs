// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! The state is the dependency container built once at startup and cloned
//! into every request task: no ambient singletons. The record store is the
//! only mutable member; everything else is immutable shared configuration.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{ExemptPaths, TokenAuthority};
use crate::config::AppConfig;
use crate::keys::ApiKeyIssuer;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<RecordStore>>,
    pub tokens: Arc<TokenAuthority>,
    pub exempt: Arc<ExemptPaths>,
    pub issuer: ApiKeyIssuer,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(RecordStore::new())),
            tokens: Arc::new(TokenAuthority::new(
                &config.jwt_secret,
                config.token_expiry_hours,
            )),
            exempt: Arc::new(ExemptPaths::standard()),
            issuer: ApiKeyIssuer::new(config.api_key_quota),
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
