// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Notification API - Authenticated Notification Service Gateway
//!
//! Request-authentication gateway for the notification API: every inbound
//! request passes through the access-control middleware once, exempt paths
//! aside, and every request produces one structured audit record. API key
//! lifecycle management (issuance, quota, owner-only mutation) rides on
//! top of the same identity context.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer-token authentication: verifier, exemptions, middleware
//! - `audit` - Per-request structured audit logging
//! - `keys` - API key issuance and quota enforcement
//! - `store` - In-memory record store (users, API keys)

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod hosts;
pub mod keys;
pub mod models;
pub mod state;
pub mod store;
