// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Current-user endpoints.

use axum::{extract::State, Json};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::models::UserMe;
use crate::state::AppState;

/// Get the current authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "User",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserMe),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Token refers to a user that no longer exists")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<UserMe>, ApiError> {
    let store = state.store.read().await;
    let user = store
        .user_by_id(identity.id)
        .ok_or_else(|| ApiError::not_found_user(identity.id))?;
    Ok(Json(UserMe::from(user)))
}
