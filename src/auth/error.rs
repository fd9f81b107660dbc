// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication failure taxonomy.

use crate::error::ApiError;

/// Typed failures from credential extraction and verification.
///
/// Authentication failures are never retried; each variant maps to exactly
/// one wire error.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token supplied at all. Raised by the middleware before the
    /// verifier is called.
    #[error("authorization credential is required")]
    MissingCredential,

    /// Signature valid but the `exp` claim is in the past.
    #[error("token has expired")]
    TokenExpired,

    /// Malformed structure, invalid signature, wrong algorithm, or a
    /// claims payload that does not match the schema.
    #[error("token could not be decoded: {0}")]
    TokenDecode(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => ApiError::not_authorized(),
            AuthError::TokenExpired => ApiError::token_expired("Token Expired"),
            AuthError::TokenDecode(detail) => ApiError::token_decode(detail),
        }
    }
}
