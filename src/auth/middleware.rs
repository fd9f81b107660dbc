// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access-control middleware.
//!
//! Every inbound request passes through [`access_control`] exactly once:
//! exemption check, credential extraction, verification, identity
//! attachment, downstream invocation, error translation. The audit record
//! goes out at the tail of every pass, success or failure; panics in
//! handlers are converted to wire-format 500s by the catch-panic layer
//! nested inside this filter, so the tail logging still runs.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{connect_info::ConnectInfo, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::claims::Identity;
use crate::audit::{self, RequestLog};
use crate::error::ApiError;
use crate::state::AppState;

/// Per-request authentication pipeline.
pub async fn access_control(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let client = client_addr(&request);
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    if state.exempt.is_exempt(&path) {
        let response = next.run(request).await;

        // Only the health-check root gets an audit record among the
        // exempt paths; docs traffic would drown the log.
        if path == "/" {
            audit::emit(&RequestLog::new(
                &host,
                &path,
                &method,
                response.status().as_u16(),
                started.elapsed(),
                &client,
                None,
                None,
            ));
        }

        return response;
    }

    let identity = match authenticate(&state, &mut request) {
        Ok(identity) => identity,
        Err(err) => {
            let log = RequestLog::new(
                &host,
                &path,
                &method,
                err.status.as_u16(),
                started.elapsed(),
                &client,
                None,
                Some(&err),
            );
            let response = err.into_response();
            audit::emit(&log);
            return response;
        }
    };

    let response = next.run(request).await;
    let status = response.status();

    let internal = status
        .is_server_error()
        .then(|| ApiError::internal("unhandled fault in request handler"));
    audit::emit(&RequestLog::new(
        &host,
        &path,
        &method,
        status.as_u16(),
        started.elapsed(),
        &client,
        Some(&identity),
        internal.as_ref(),
    ));

    response
}

/// Extract and verify the credential, then attach the identity to the
/// request extensions for downstream extractors.
fn authenticate(state: &AppState, request: &mut Request) -> Result<Identity, ApiError> {
    // API clients send the Authorization header; browser-rendered pages
    // carry the same value in a cookie.
    let credential = if request.uri().path().starts_with("/api") {
        header_credential(request.headers())
    } else {
        cookie_credential(request.headers())
    };

    let raw = credential.ok_or_else(ApiError::not_authorized)?;
    let claims = state.tokens.verify(&raw).map_err(ApiError::from)?;

    let identity = Identity::from_claims(claims);
    request.extensions_mut().insert(identity.clone());
    Ok(identity)
}

fn header_credential(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn cookie_credential(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name.trim() == "Authorization").then(|| value.trim().to_string())
    })
}

/// Client origin address: the first entry of `x-forwarded-for` when
/// present, else the direct peer address.
fn client_addr(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
