// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API key issuance.
//!
//! Issues opaque key pairs: a globally unique `access_key` (two
//! concatenated, truncated UUIDv4s) and a 40-character high-entropy
//! `secret_key` generated once at creation. The caller holds the store's
//! write guard for the whole operation, so the quota check and the
//! uniqueness check-then-insert cannot interleave with other writers.

use rand::{distr::Alphanumeric, Rng};
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{ApiKeyRecord, RecordStore, StoreError};

/// Secret key length in characters.
pub const SECRET_KEY_LEN: usize = 40;

/// Upper bound on access-key generation attempts. Random UUID pairs do not
/// collide in practice; exhausting this bound means the randomness source
/// is broken and the request fails as an internal error.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Issues and mutates API keys, enforcing the per-account quota.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyIssuer {
    quota: usize,
}

impl ApiKeyIssuer {
    pub fn new(quota: usize) -> Self {
        Self { quota }
    }

    /// Create a key for `user_id`.
    ///
    /// Fails with the max-key-count wire error when the owner already has
    /// `quota` active keys; in that case nothing is generated or persisted.
    pub fn create_key(
        &self,
        store: &mut RecordStore,
        user_id: i64,
        memo: Option<String>,
    ) -> Result<ApiKeyRecord, ApiError> {
        if store.active_key_count(user_id) >= self.quota {
            return Err(ApiError::max_key_count(self.quota));
        }

        self.create_key_with(store, user_id, memo, access_key_candidate)
    }

    /// Update the memo of a key owned by `user_id`. A missing key and a
    /// key owned by another account both fail with the no-match error.
    pub fn update_key(
        &self,
        store: &mut RecordStore,
        key_id: i64,
        user_id: i64,
        memo: Option<String>,
    ) -> Result<ApiKeyRecord, ApiError> {
        store
            .update_key_memo(key_id, user_id, memo)
            .map_err(|_| ApiError::no_key_match())
    }

    /// Insertion loop with an injectable candidate generator (tests use
    /// colliding generators to drive the retry path).
    fn create_key_with(
        &self,
        store: &mut RecordStore,
        user_id: i64,
        memo: Option<String>,
        mut candidates: impl FnMut() -> String,
    ) -> Result<ApiKeyRecord, ApiError> {
        let secret_key = generate_secret_key();

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = candidates();
            if store.access_key_exists(&candidate) {
                continue;
            }

            match store.insert_key(user_id, candidate, secret_key.clone(), memo.clone()) {
                Ok(key) => return Ok(key),
                // Lost a race against a concurrent insert of the same
                // candidate; regenerate.
                Err(StoreError::DuplicateAccessKey(_)) => continue,
                Err(e) => return Err(ApiError::internal(e.to_string())),
            }
        }

        Err(ApiError::internal(format!(
            "access key generation exhausted after {MAX_GENERATION_ATTEMPTS} attempts"
        )))
    }
}

/// 40 alphanumeric characters from the thread-local CSPRNG.
pub fn generate_secret_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_KEY_LEN)
        .map(char::from)
        .collect()
}

/// Candidate access key: the first 24 characters of one UUIDv4 joined with
/// the first 12 of another.
fn access_key_candidate() -> String {
    let head = Uuid::new_v4().to_string();
    let tail = Uuid::new_v4().to_string();
    format!("{}{}", &head[..24], &tail[..12])
}
