// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login.
//!
//! Both endpoints are exempt from the access-control filter (they are what
//! hands out tokens in the first place). Passwords are hashed with argon2;
//! the hash is treated as an opaque one-way credential everywhere else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::claims::UserClaims;
use crate::error::ApiError;
use crate::models::{SnsType, Token, UserRegister};
use crate::state::AppState;
use crate::store::UserRecord;

/// Register a new account and return a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/register/{sns_type}",
    tag = "Authentication",
    params(("sns_type" = SnsType, Path, description = "Registration provider")),
    request_body = UserRegister,
    responses(
        (status = 200, description = "Token for the new account", body = Token),
        (status = 400, description = "Unsupported provider, missing fields, or duplicate email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Path(sns_type): Path<SnsType>,
    Json(info): Json<UserRegister>,
) -> Result<Json<Token>, ApiError> {
    if sns_type != SnsType::Email {
        return Err(ApiError::bad_request("Not Supported"));
    }

    let (email, pw) = required_credentials(&info)?;
    let hashed = hash_password(pw)?;

    let mut store = state.store.write().await;
    if store.user_by_email(email).is_some() {
        return Err(ApiError::bad_request("email already registered"));
    }
    let user = store
        .create_user(email, &hashed)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    issue_token(&state, &user)
}

/// Log in with an existing account and return a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login/{sns_type}",
    tag = "Authentication",
    params(("sns_type" = SnsType, Path, description = "Login provider")),
    request_body = UserRegister,
    responses(
        (status = 200, description = "Token for the account", body = Token),
        (status = 400, description = "Unsupported provider, missing fields, or no matching user")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Path(sns_type): Path<SnsType>,
    Json(info): Json<UserRegister>,
) -> Result<Json<Token>, ApiError> {
    if sns_type != SnsType::Email {
        return Err(ApiError::bad_request("Not Supported"));
    }

    let (email, pw) = required_credentials(&info)?;

    let store = state.store.read().await;
    let user = store
        .user_by_email(email)
        .ok_or_else(|| ApiError::bad_request("no match user"))?;

    let verified = user
        .pw
        .as_deref()
        .is_some_and(|hash| verify_password(pw, hash));
    if !verified {
        return Err(ApiError::bad_request("no match user"));
    }

    issue_token(&state, user)
}

fn required_credentials(info: &UserRegister) -> Result<(&str, &str), ApiError> {
    match (info.email.as_deref(), info.pw.as_deref()) {
        (Some(email), Some(pw)) if !email.is_empty() && !pw.is_empty() => Ok((email, pw)),
        _ => Err(ApiError::bad_request("email and pw must be provided")),
    }
}

fn issue_token(state: &AppState, user: &UserRecord) -> Result<Json<Token>, ApiError> {
    let token = state.tokens.issue(UserClaims::for_user(user))?;
    Ok(Json(Token {
        authorization: format!("Bearer {token}"),
    }))
}

fn hash_password(pw: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))
}

fn verify_password(pw: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(pw.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
