// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the per-request identity context.

use serde::{Deserialize, Serialize};

use crate::store::UserRecord;

/// Claims carried inside a bearer token.
///
/// `id` is required; a token without it fails verification. `exp` is
/// optional: tokens issued without an expiry never expire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserClaims {
    /// Canonical user id.
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Expiry as seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl UserClaims {
    /// Build claims for a user record. The expiry (if any) is stamped by
    /// [`TokenAuthority::issue`](super::TokenAuthority::issue).
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
            exp: None,
        }
    }
}

/// The authenticated-user value attached to a request.
///
/// Produced by the access-control middleware from verified claims; lives in
/// the request extensions for exactly one request and is read-only to
/// downstream handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

impl Identity {
    pub fn from_claims(claims: UserClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            name: claims.name,
            phone_number: claims.phone_number,
        }
    }
}
