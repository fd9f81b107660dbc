// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory record store for users and API keys.
//!
//! The store is the only shared mutable resource in the service. It lives
//! behind `Arc<RwLock<_>>` in [`AppState`](crate::state::AppState); taking
//! the write guard serializes every check-then-insert, so the access-key
//! uniqueness check cannot race. `insert_key` additionally rejects a
//! duplicate `access_key` outright, standing in for a storage-layer unique
//! index: callers treat that rejection as a signal to regenerate.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-level failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("duplicate access key: {0}")]
    DuplicateAccessKey(String),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Account lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Deleted,
    Blocked,
}

/// API key lifecycle states. `Deleted` is the soft-delete path; rows are
/// never physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Stopped,
    Deleted,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub email: Option<String>,
    /// One-way password hash; never serialized anywhere.
    pub pw: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub status: UserStatus,
    pub sns_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted API key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyRecord {
    pub id: i64,
    /// Public identifier; globally unique across all rows.
    pub access_key: String,
    /// Private credential; generated once, never regenerated.
    pub secret_key: String,
    pub user_id: i64,
    pub memo: Option<String>,
    pub status: KeyStatus,
    pub is_whitelisted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-memory tables with sequential integer ids.
#[derive(Default)]
pub struct RecordStore {
    users: HashMap<i64, UserRecord>,
    api_keys: HashMap<i64, ApiKeyRecord>,
    next_user_id: i64,
    next_key_id: i64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Emails are unique across live rows.
    pub fn create_user(&mut self, email: &str, pw_hash: &str) -> StoreResult<UserRecord> {
        if self.user_by_email(email).is_some() {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        self.next_user_id += 1;
        let now = Utc::now();
        let user = UserRecord {
            id: self.next_user_id,
            email: Some(email.to_string()),
            pw: Some(pw_hash.to_string()),
            name: None,
            phone_number: None,
            status: UserStatus::Active,
            sns_type: Some("email".to_string()),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|user| user.email.as_deref() == Some(email))
    }

    pub fn user_by_id(&self, user_id: i64) -> Option<&UserRecord> {
        self.users.get(&user_id)
    }

    /// Number of active keys owned by `user_id` (the quota basis).
    pub fn active_key_count(&self, user_id: i64) -> usize {
        self.api_keys
            .values()
            .filter(|key| key.user_id == user_id && key.status == KeyStatus::Active)
            .count()
    }

    pub fn access_key_exists(&self, access_key: &str) -> bool {
        self.api_keys
            .values()
            .any(|key| key.access_key == access_key)
    }

    /// Insert a new key row. Rejects a duplicate `access_key`; callers
    /// regenerate and retry on that error.
    pub fn insert_key(
        &mut self,
        user_id: i64,
        access_key: String,
        secret_key: String,
        memo: Option<String>,
    ) -> StoreResult<ApiKeyRecord> {
        if self.access_key_exists(&access_key) {
            return Err(StoreError::DuplicateAccessKey(access_key));
        }

        self.next_key_id += 1;
        let now = Utc::now();
        let key = ApiKeyRecord {
            id: self.next_key_id,
            access_key,
            secret_key,
            user_id,
            memo,
            status: KeyStatus::Active,
            is_whitelisted: false,
            created_at: now,
            updated_at: now,
        };
        self.api_keys.insert(key.id, key.clone());
        Ok(key)
    }

    /// All keys owned by `user_id`, newest first.
    pub fn keys_for(&self, user_id: i64) -> Vec<ApiKeyRecord> {
        let mut keys: Vec<ApiKeyRecord> = self
            .api_keys
            .values()
            .filter(|key| key.user_id == user_id)
            .cloned()
            .collect();
        keys.sort_by(|a, b| b.id.cmp(&a.id));
        keys
    }

    pub fn key_count(&self) -> usize {
        self.api_keys.len()
    }

    pub fn key_by_id(&self, key_id: i64) -> Option<&ApiKeyRecord> {
        self.api_keys.get(&key_id)
    }

    /// Update the memo of a key owned by `user_id`.
    ///
    /// The ownership check is mandatory: a key that exists but belongs to
    /// another account is indistinguishable from a missing key.
    pub fn update_key_memo(
        &mut self,
        key_id: i64,
        user_id: i64,
        memo: Option<String>,
    ) -> StoreResult<ApiKeyRecord> {
        let key = self
            .api_keys
            .get_mut(&key_id)
            .filter(|key| key.user_id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("api key {key_id}")))?;

        key.memo = memo;
        key.updated_at = Utc::now();
        Ok(key.clone())
    }
}
