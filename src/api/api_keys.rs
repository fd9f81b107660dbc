// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API key endpoints.
//!
//! All three run behind the access-control filter; the owner is always the
//! authenticated identity, never a request field.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::models::{AddApiKey, ApiKeyCreated, ApiKeySummary};
use crate::state::AppState;

/// List the caller's API keys. Secrets are never listed.
#[utoipa::path(
    get,
    path = "/api/apikeys",
    tag = "ApiKeys",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Keys owned by the caller", body = [ApiKeySummary]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_keys(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<ApiKeySummary>>, ApiError> {
    let store = state.store.read().await;
    let keys = store
        .keys_for(identity.id)
        .iter()
        .map(ApiKeySummary::from)
        .collect();
    Ok(Json(keys))
}

/// Create an API key. The secret key appears in this response and nowhere
/// else, ever.
#[utoipa::path(
    post,
    path = "/api/apikeys",
    tag = "ApiKeys",
    security(("bearer" = [])),
    request_body = AddApiKey,
    responses(
        (status = 201, description = "Newly created key pair", body = ApiKeyCreated),
        (status = 400, description = "Per-account key quota reached"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_key(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(info): Json<AddApiKey>,
) -> Result<(StatusCode, Json<ApiKeyCreated>), ApiError> {
    let mut store = state.store.write().await;
    let key = state.issuer.create_key(&mut store, identity.id, info.memo)?;
    Ok((StatusCode::CREATED, Json(ApiKeyCreated::from(&key))))
}

/// Update the memo of a key owned by the caller.
#[utoipa::path(
    put,
    path = "/api/apikeys/{key_id}",
    tag = "ApiKeys",
    security(("bearer" = [])),
    params(("key_id" = i64, Path, description = "Key to update")),
    request_body = AddApiKey,
    responses(
        (status = 200, description = "Updated key", body = ApiKeySummary),
        (status = 400, description = "Key missing or owned by another account"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn update_key(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(key_id): Path<i64>,
    Json(info): Json<AddApiKey>,
) -> Result<Json<ApiKeySummary>, ApiError> {
    let mut store = state.store.write().await;
    let key = state
        .issuer
        .update_key(&mut store, key_id, identity.id, info.memo)?;
    Ok(Json(ApiKeySummary::from(&key)))
}

#[cfg(test)]
mod tests {
    use crate::api::router;
    use crate::auth::claims::UserClaims;
    use crate::state::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn token_for(state: &AppState, id: i64) -> String {
        state
            .tokens
            .issue(UserClaims {
                id,
                email: None,
                name: None,
                phone_number: None,
                exp: None,
            })
            .unwrap()
    }

    fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_returns_secret_once_and_list_never() {
        let state = AppState::default();
        let token = token_for(&state, 1);
        let app = router(state);

        let created = app
            .clone()
            .oneshot(authed(
                "POST",
                "/api/apikeys",
                &token,
                Some(serde_json::json!({"memo": "ci"})),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = body_json(created).await;
        assert_eq!(body["memo"], "ci");
        assert_eq!(body["secret_key"].as_str().unwrap().len(), 40);
        assert_eq!(body["access_key"].as_str().unwrap().len(), 36);

        let listed = app
            .oneshot(authed("GET", "/api/apikeys", &token, None))
            .await
            .unwrap();
        assert_eq!(listed.status(), StatusCode::OK);
        let body = body_json(listed).await;
        let keys = body.as_array().unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].get("secret_key").is_none());
        assert_eq!(keys[0]["status"], "active");
    }

    #[tokio::test]
    async fn quota_is_enforced_per_account() {
        let state = AppState::default();
        let quota = state.config.api_key_quota;
        let token = token_for(&state, 1);
        let other = token_for(&state, 2);
        let app = router(state);

        for _ in 0..quota {
            let response = app
                .clone()
                .oneshot(authed(
                    "POST",
                    "/api/apikeys",
                    &token,
                    Some(serde_json::json!({"memo": null})),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let over = app
            .clone()
            .oneshot(authed(
                "POST",
                "/api/apikeys",
                &token,
                Some(serde_json::json!({"memo": null})),
            ))
            .await
            .unwrap();
        assert_eq!(over.status(), StatusCode::BAD_REQUEST);
        let body = body_json(over).await;
        assert_eq!(body["code"], "4000004");

        // Another account still has a full quota.
        let response = app
            .oneshot(authed(
                "POST",
                "/api/apikeys",
                &other,
                Some(serde_json::json!({"memo": null})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn update_is_owner_only() {
        let state = AppState::default();
        let owner = token_for(&state, 1);
        let stranger = token_for(&state, 2);
        let app = router(state);

        let created = app
            .clone()
            .oneshot(authed(
                "POST",
                "/api/apikeys",
                &owner,
                Some(serde_json::json!({"memo": "original"})),
            ))
            .await
            .unwrap();
        let key_id = body_json(created).await["id"].as_i64().unwrap();

        let hijack = app
            .clone()
            .oneshot(authed(
                "PUT",
                &format!("/api/apikeys/{key_id}"),
                &stranger,
                Some(serde_json::json!({"memo": "hijacked"})),
            ))
            .await
            .unwrap();
        assert_eq!(hijack.status(), StatusCode::BAD_REQUEST);
        let body = body_json(hijack).await;
        assert_eq!(body["code"], "4000005");

        // Row is unchanged and the owner can still update it.
        let listed = app
            .clone()
            .oneshot(authed("GET", "/api/apikeys", &owner, None))
            .await
            .unwrap();
        assert_eq!(body_json(listed).await[0]["memo"], "original");

        let updated = app
            .oneshot(authed(
                "PUT",
                &format!("/api/apikeys/{key_id}"),
                &owner,
                Some(serde_json::json!({"memo": "renamed"})),
            ))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(body_json(updated).await["memo"], "renamed");
    }

    #[tokio::test]
    async fn update_missing_key_is_no_match() {
        let state = AppState::default();
        let token = token_for(&state, 1);
        let app = router(state);

        let response = app
            .oneshot(authed(
                "PUT",
                "/api/apikeys/999",
                &token,
                Some(serde_json::json!({"memo": "x"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "4000005");
    }
}
