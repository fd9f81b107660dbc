// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request audit logging.
//!
//! One structured record per completed or failed request, emitted through
//! `tracing`. Emission is fire-and-forget: a failure to serialize or a
//! slow sink must never delay or fail the HTTP response, so `emit` cannot
//! return an error and the subscriber call is synchronous and in-memory.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::auth::Identity;
use crate::error::ApiError;

/// Error portion of an audit record.
#[derive(Debug, Serialize)]
pub struct ErrorLog {
    /// Short error name (the wire taxonomy variant).
    pub raised: String,
    /// Internal detail string.
    pub msg: String,
    /// Source location where the fault was first observed.
    pub location: String,
}

/// Client portion of an audit record. The email is masked before it is
/// stored so raw PII never reaches the log sink.
#[derive(Debug, Serialize)]
pub struct ClientLog {
    pub client: String,
    pub user: Option<i64>,
    pub email: Option<String>,
}

/// One audit record per request.
#[derive(Debug, Serialize)]
pub struct RequestLog {
    pub url: String,
    pub method: String,
    pub status_code: u16,
    pub error_detail: Option<ErrorLog>,
    pub client: ClientLog,
    pub processed_time: String,
    pub datetime: String,
}

impl RequestLog {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: &str,
        path: &str,
        method: &str,
        status_code: u16,
        elapsed: Duration,
        client_addr: &str,
        identity: Option<&Identity>,
        error: Option<&ApiError>,
    ) -> Self {
        Self {
            url: format!("{host}{path}"),
            method: method.to_string(),
            status_code,
            error_detail: error.map(|err| ErrorLog {
                raised: err.name.to_string(),
                msg: err.detail.clone(),
                location: err.location.to_string(),
            }),
            client: ClientLog {
                client: client_addr.to_string(),
                user: identity.map(|identity| identity.id),
                email: identity
                    .and_then(|identity| identity.email.as_deref())
                    .map(mask_email),
            },
            processed_time: format!("{:.5} ms", elapsed.as_secs_f64() * 1000.0),
            datetime: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Emit a record. Status >= 500 goes out at error severity, everything
/// else at info. Never fails.
pub fn emit(record: &RequestLog) {
    let Ok(json) = serde_json::to_string(record) else {
        return;
    };

    if record.status_code >= 500 {
        tracing::error!(target: "audit", "{json}");
    } else {
        tracing::info!(target: "audit", "{json}");
    }
}

/// Replace the first two characters of the email's local part with `**`,
/// leaving the domain untouched: `abcdef@example.com` becomes
/// `**cdef@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let rest: String = local.chars().skip(2).collect();
            format!("**{rest}@{domain}")
        }
        None => {
            let rest: String = email.chars().skip(2).collect();
            format!("**{rest}")
        }
    }
}
