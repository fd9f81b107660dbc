// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Health root and smoke-test pages.

use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;

/// Liveness response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Load-balancer health check root. Exempt from authentication; the only
/// exempt path that is audit-logged.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service banner", body = String))
)]
pub async fn index() -> String {
    format!("Notification API (UTC: {})", Utc::now().format("%Y-%m-%d %H:%M:%S"))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Cookie-transport smoke page: requires authentication via the
/// `Authorization` cookie because it is not under the `/api` prefix.
#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses(
        (status = 200, description = "Authenticated banner", body = String),
        (status = 401, description = "Missing or invalid cookie credential")
    )
)]
pub async fn test_page(CurrentUser(identity): CurrentUser) -> String {
    format!(
        "Notification API (UTC: {}) - user {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        identity.id
    )
}
