// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the per-request identity.
//!
//! Handlers on protected routes take [`CurrentUser`] to read the identity
//! the access-control middleware attached:
//!
//! ```rust,ignore
//! async fn me(CurrentUser(identity): CurrentUser) -> impl IntoResponse {
//!     // identity.id is the authenticated user's id
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::Identity;
use crate::error::ApiError;

/// Extracts the [`Identity`] set by the access-control middleware.
///
/// Rejects with the not-authorized wire error if no identity is present,
/// which only happens when a route was wired up outside the middleware.
#[derive(Debug)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::not_authorized)
    }
}
