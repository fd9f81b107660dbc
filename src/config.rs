// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and is
//! immutable afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | Shared secret for bearer token signing | dev-only value |
//! | `TOKEN_EXPIRY_HOURS` | Token lifetime; unset means tokens never expire | unset |
//! | `API_KEY_QUOTA` | Max active API keys per account | `3` |
//! | `TRUSTED_HOSTS` | Comma-separated `Host` allow-list, `*` disables | `*` |
//! | `ALLOW_ORIGINS` | Comma-separated CORS origins, `*` is permissive | `*` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

/// Default per-account API key quota.
pub const DEFAULT_API_KEY_QUOTA: usize = 3;

/// Development-only signing secret used when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "insecure-local-dev-secret";

/// Immutable service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_expiry_hours: Option<i64>,
    pub api_key_quota: usize,
    pub trusted_hosts: Vec<String>,
    pub allow_origins: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to local
    /// development defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_expiry_hours: env::var("TOKEN_EXPIRY_HOURS")
                .ok()
                .and_then(|value| value.parse().ok()),
            api_key_quota: env::var("API_KEY_QUOTA")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.api_key_quota),
            trusted_hosts: env::var("TRUSTED_HOSTS")
                .map(|value| split_list(&value))
                .unwrap_or(defaults.trusted_hosts),
            allow_origins: env::var("ALLOW_ORIGINS")
                .map(|value| split_list(&value))
                .unwrap_or(defaults.allow_origins),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_expiry_hours: None,
            api_key_quota: DEFAULT_API_KEY_QUOTA,
            trusted_hosts: vec!["*".to_string()],
            allow_origins: vec!["*".to_string()],
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_development_values() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key_quota, DEFAULT_API_KEY_QUOTA);
        assert!(config.token_expiry_hours.is_none());
        assert_eq!(config.trusted_hosts, vec!["*".to_string()]);
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list("a.example.com, b.example.com,,"),
            vec!["a.example.com".to_string(), "b.example.com".to_string()]
        );
    }
}
