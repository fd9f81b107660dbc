// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Trusted host filtering.
//!
//! First filter in the request pipeline: rejects requests whose `Host`
//! header is not on the configured allow-list. `/health` is always let
//! through so load-balancer probes work regardless of the list.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Host allow-list filter. Entries may be exact (`api.example.com`), a
/// leading wildcard (`*.example.com`), or `*` to disable the check.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let allowed = &state.config.trusted_hosts;

    if allowed.iter().any(|entry| entry == "*") || request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(strip_port);

    match host {
        Some(host) if allowed.iter().any(|entry| host_matches(entry, host)) => {
            next.run(request).await
        }
        _ => ApiError::bad_request("Invalid host header").into_response(),
    }
}

fn strip_port(host: &str) -> &str {
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

fn host_matches(entry: &str, host: &str) -> bool {
    if let Some(suffix) = entry.strip_prefix("*.") {
        host.ends_with(suffix) && host.len() > suffix.len()
    } else {
        entry == host
    }
}
