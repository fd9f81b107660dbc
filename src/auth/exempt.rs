// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path exemption matching.
//!
//! Exempt paths bypass authentication entirely. The set is built once at
//! startup and never mutated afterwards.

use std::collections::HashSet;

use regex::Regex;

/// Paths that never require a credential: an exact-match set plus a
/// pattern matched at the start of the path.
pub struct ExemptPaths {
    exact: HashSet<String>,
    pattern: Regex,
}

impl ExemptPaths {
    /// Build a matcher from an exact list and a regular expression.
    pub fn new<I, S>(exact: I, pattern: &str) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            exact: exact.into_iter().map(Into::into).collect(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// The service's standard exemptions: the health root, the docs
    /// surfaces, and the auth endpoints that hand out tokens.
    pub fn standard() -> Self {
        Self::new(["/"], "/docs|/api-doc|/api/auth|/health")
            .expect("standard exemption pattern is valid")
    }

    /// True if `path` is exactly listed or the pattern matches at the
    /// start of the path. Pure; no side effects.
    pub fn is_exempt(&self, path: &str) -> bool {
        if self.exact.contains(path) {
            return true;
        }
        self.pattern.find(path).is_some_and(|m| m.start() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_paths_are_exempt() {
        let exempt = ExemptPaths::standard();
        assert!(exempt.is_exempt("/"));
    }

    #[test]
    fn pattern_prefixes_are_exempt() {
        let exempt = ExemptPaths::standard();
        assert!(exempt.is_exempt("/docs"));
        assert!(exempt.is_exempt("/docs/index.html"));
        assert!(exempt.is_exempt("/api-doc/openapi.json"));
        assert!(exempt.is_exempt("/api/auth/login/email"));
        assert!(exempt.is_exempt("/health"));
    }

    #[test]
    fn pattern_is_anchored_at_path_start() {
        let exempt = ExemptPaths::standard();
        assert!(!exempt.is_exempt("/static/docs"));
        assert!(!exempt.is_exempt("/api/users/docs"));
    }

    #[test]
    fn protected_paths_are_not_exempt() {
        let exempt = ExemptPaths::standard();
        assert!(!exempt.is_exempt("/api/me"));
        assert!(!exempt.is_exempt("/api/apikeys"));
        assert!(!exempt.is_exempt("/test"));
    }

    #[test]
    fn custom_sets_are_respected() {
        let exempt = ExemptPaths::new(["/ping"], "^/public").unwrap();
        assert!(exempt.is_exempt("/ping"));
        assert!(exempt.is_exempt("/public/logo.png"));
        assert!(!exempt.is_exempt("/"));
    }
}
