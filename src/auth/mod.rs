// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication for the notification API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in via `/api/auth/*` and receives
//!    `{"Authorization": "Bearer <token>"}`
//! 2. Client presents the token on every request: the `Authorization`
//!    header for `/api` paths, the same-named cookie for browser-rendered
//!    pages
//! 3. The access-control middleware:
//!    - skips exempt paths (health root, docs, the auth endpoints)
//!    - verifies the HS256 signature and, when present, the `exp` claim
//!    - attaches an [`Identity`] to the request for downstream handlers
//!    - audit-logs the request, success or failure
//!
//! ## Security
//!
//! - All non-exempt endpoints require a valid token
//! - Tokens are signed with a single shared secret and a fixed algorithm
//! - Claims are validated against an explicit schema at decode time;
//!   a missing `id` claim is a decode error, not a later access fault

pub mod claims;
pub mod error;
pub mod exempt;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::{Identity, UserClaims};
pub use error::AuthError;
pub use exempt::ExemptPaths;
pub use extractor::CurrentUser;
pub use token::TokenAuthority;
