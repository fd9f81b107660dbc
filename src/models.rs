// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response shapes for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Secret material appears only in [`ApiKeyCreated`], the
//! one-time creation response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{ApiKeyRecord, KeyStatus, UserRecord};

/// Supported registration/login providers. Only `email` is implemented;
/// the SNS variants are accepted in the path and rejected by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SnsType {
    Email,
    Facebook,
    Google,
    Kakao,
}

/// Registration/login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRegister {
    pub email: Option<String>,
    pub pw: Option<String>,
}

/// Bearer token response, field-compatible with the header clients echo
/// back on subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Token {
    #[serde(rename = "Authorization")]
    pub authorization: String,
}

/// Profile of the current user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserMe {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

impl From<&UserRecord> for UserMe {
    fn from(user: &UserRecord) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

/// Payload for creating or updating an API key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddApiKey {
    pub memo: Option<String>,
}

/// An API key as listed back to its owner. The secret is never included.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiKeySummary {
    pub id: i64,
    pub access_key: String,
    pub memo: Option<String>,
    pub status: KeyStatus,
    pub is_whitelisted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ApiKeyRecord> for ApiKeySummary {
    fn from(key: &ApiKeyRecord) -> Self {
        Self {
            id: key.id,
            access_key: key.access_key.clone(),
            memo: key.memo.clone(),
            status: key.status,
            is_whitelisted: key.is_whitelisted,
            created_at: key.created_at,
            updated_at: key.updated_at,
        }
    }
}

/// Creation response: the only place the secret key is ever returned.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiKeyCreated {
    pub id: i64,
    pub access_key: String,
    pub secret_key: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ApiKeyRecord> for ApiKeyCreated {
    fn from(key: &ApiKeyRecord) -> Self {
        Self {
            id: key.id,
            access_key: key.access_key.clone(),
            secret_key: key.secret_key.clone(),
            memo: key.memo.clone(),
            created_at: key.created_at,
        }
    }
}
