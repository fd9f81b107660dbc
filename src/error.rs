// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wire-format API errors.
//!
//! Every error surfaced to a client uses the same JSON shape:
//!
//! ```json
//! {"status_code": 401, "code": "4010001", "msg": "...", "detail": "..."}
//! ```
//!
//! `code` is the HTTP status concatenated with a zero-padded 4-digit
//! sub-code. The table is published and must stay stable:
//!
//! | error         | HTTP | code      |
//! |---------------|------|-----------|
//! | NotFoundUser  | 404  | `4040001` |
//! | NotAuthorized | 401  | `4010001` |
//! | TokenExpired  | 401  | `4010002` |
//! | TokenDecode   | 400  | `4000003` |
//! | MaxKeyCount   | 400  | `4000004` |
//! | NoKeyMatch    | 400  | `4000005` |
//! | BadRequest    | 400  | `4000000` |
//! | Internal      | 500  | `5000000` |
//!
//! `msg` is user-facing and stays generic; internal information only ever
//! goes into `detail`.

use std::panic::Location;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// An API error carrying the stable wire representation plus the source
/// location where the fault was first observed (used by the audit logger).
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub msg: String,
    pub detail: String,
    /// Short error name, logged as the `raised` field of audit records.
    pub name: &'static str,
    /// Where the error was constructed.
    pub location: &'static Location<'static>,
}

#[derive(Serialize)]
struct ErrorBody {
    status_code: u16,
    code: String,
    msg: String,
    detail: String,
}

impl ApiError {
    #[track_caller]
    pub fn new(
        status: StatusCode,
        code: &'static str,
        name: &'static str,
        msg: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
            detail: detail.into(),
            name,
            location: Location::caller(),
        }
    }

    /// No credential supplied on a path that requires one.
    #[track_caller]
    pub fn not_authorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "4010001",
            "NotAuthorized",
            "Login required.",
            "Authorization Required",
        )
    }

    /// Validly signed token whose expiry is in the past.
    #[track_caller]
    pub fn token_expired(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "4010002",
            "TokenExpired",
            "Session expired. Please log in again.",
            detail,
        )
    }

    /// Malformed token, invalid signature, or wrong algorithm.
    #[track_caller]
    pub fn token_decode(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "4000003",
            "TokenDecode",
            "Invalid access.",
            detail,
        )
    }

    /// Identity refers to a user that does not exist.
    #[track_caller]
    pub fn not_found_user(user_id: i64) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "4040001",
            "NotFoundUser",
            "User not found.",
            format!("Not Found User ID: {user_id}"),
        )
    }

    /// Per-account API key quota reached.
    #[track_caller]
    pub fn max_key_count(quota: usize) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "4000004",
            "MaxKeyCount",
            "API key limit reached.",
            format!("Max Key Count ({quota}) Reached"),
        )
    }

    /// API key does not exist or is owned by another account.
    #[track_caller]
    pub fn no_key_match() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "4000005",
            "NoKeyMatch",
            "No matching API key.",
            "No Key Match",
        )
    }

    /// Request-level validation failure with a caller-supplied message.
    #[track_caller]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let detail = msg.clone();
        Self::new(StatusCode::BAD_REQUEST, "4000000", "BadRequest", msg, detail)
    }

    /// Catch-all for unexpected faults. The original fault's string form is
    /// kept in `detail` only; `msg` never leaks internals.
    #[track_caller]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "5000000",
            "InternalError",
            "Internal server error.",
            detail,
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.code, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            status_code: self.status.as_u16(),
            code: self.code.to_string(),
            msg: self.msg,
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_use_published_codes() {
        assert_eq!(ApiError::not_authorized().code, "4010001");
        assert_eq!(ApiError::token_expired("x").code, "4010002");
        assert_eq!(ApiError::token_decode("x").code, "4000003");
        assert_eq!(ApiError::max_key_count(3).code, "4000004");
        assert_eq!(ApiError::no_key_match().code, "4000005");
        assert_eq!(ApiError::not_found_user(1).code, "4040001");
        assert_eq!(ApiError::internal("x").code, "5000000");
    }

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(ApiError::not_authorized().status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::token_expired("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::token_decode("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found_user(7).status, StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_keeps_detail_out_of_msg() {
        let err = ApiError::internal("secret stack trace");
        assert_eq!(err.msg, "Internal server error.");
        assert_eq!(err.detail, "secret stack trace");
    }

    #[test]
    fn location_points_at_constructor_call() {
        let err = ApiError::not_authorized();
        assert!(err.location.file().ends_with("error.rs"));
    }

    #[tokio::test]
    async fn into_response_uses_wire_shape() {
        let response = ApiError::no_key_match().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], 400);
        assert_eq!(body["code"], "4000005");
        assert_eq!(body["msg"], "No matching API key.");
        assert_eq!(body["detail"], "No Key Match");
    }
}
