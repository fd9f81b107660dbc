// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and verification.
//!
//! Tokens are signed with a single shared secret using HS256. The verifier
//! is stateless and safe to call from any number of concurrent requests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{claims::UserClaims, error::AuthError};
use crate::error::ApiError;

/// Issues and verifies bearer tokens for one shared secret.
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_hours: Option<i64>,
}

impl TokenAuthority {
    /// Create an authority for `secret`. When `expiry_hours` is set, every
    /// issued token carries an `exp` claim that far in the future;
    /// otherwise issued tokens never expire.
    pub fn new(secret: &str, expiry_hours: Option<i64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional on the wire but validated whenever present.
        validation.set_required_spec_claims::<&str>(&[]);
        validation.validate_exp = true;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_hours,
        }
    }

    /// Sign `claims` into a compact token, stamping the configured expiry.
    pub fn issue(&self, mut claims: UserClaims) -> Result<String, ApiError> {
        if let Some(hours) = self.expiry_hours {
            claims.exp = Some((Utc::now() + Duration::hours(hours)).timestamp());
        }

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("token encoding failed: {e}")))
    }

    /// Verify `raw` and return its claims.
    ///
    /// An optional `"Bearer "` prefix is stripped first. Signature and
    /// schema failures are [`AuthError::TokenDecode`]; a validly signed
    /// token past its `exp` is [`AuthError::TokenExpired`].
    pub fn verify(&self, raw: &str) -> Result<UserClaims, AuthError> {
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

        decode::<UserClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenDecode(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(id: i64) -> UserClaims {
        UserClaims {
            id,
            email: Some("user@example.com".to_string()),
            name: Some("User".to_string()),
            phone_number: None,
            exp: None,
        }
    }

    #[test]
    fn issue_then_verify_round_trips_identity() {
        let authority = TokenAuthority::new("test-secret", None);
        let token = authority.issue(claims(42)).unwrap();

        let verified = authority.verify(&token).unwrap();
        assert_eq!(verified.id, 42);
        assert_eq!(verified.email.as_deref(), Some("user@example.com"));
        assert!(verified.exp.is_none());
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let authority = TokenAuthority::new("test-secret", None);
        let token = authority.issue(claims(1)).unwrap();

        let verified = authority.verify(&format!("Bearer {token}")).unwrap();
        assert_eq!(verified.id, 1);
    }

    #[test]
    fn wrong_secret_is_a_decode_error() {
        let issuer = TokenAuthority::new("secret-a", None);
        let verifier = TokenAuthority::new("secret-b", None);
        let token = issuer.issue(claims(1)).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::TokenDecode(_))
        ));
    }

    #[test]
    fn wrong_algorithm_is_a_decode_error() {
        let authority = TokenAuthority::new("test-secret", None);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims(1),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            authority.verify(&token),
            Err(AuthError::TokenDecode(_))
        ));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let authority = TokenAuthority::new("test-secret", None);
        let mut expired = claims(1);
        expired.exp = Some((Utc::now() - Duration::hours(2)).timestamp());
        let token = encode(
            &Header::default(),
            &expired,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            authority.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn configured_expiry_is_stamped_on_issue() {
        let authority = TokenAuthority::new("test-secret", Some(6));
        let token = authority.issue(claims(1)).unwrap();

        let verified = authority.verify(&token).unwrap();
        let exp = verified.exp.expect("expiry should be stamped");
        assert!(exp > Utc::now().timestamp());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let authority = TokenAuthority::new("test-secret", None);
        assert!(matches!(
            authority.verify("not-a-token"),
            Err(AuthError::TokenDecode(_))
        ));
    }

    #[test]
    fn payload_without_id_claim_is_a_decode_error() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        // Hand-build a structurally valid token whose payload is missing
        // the required `id` claim.
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"email":"a@b.c"}"#);
        let token = format!("{header}.{payload}.bad-signature");

        let authority = TokenAuthority::new("test-secret", None);
        assert!(matches!(
            authority.verify(&token),
            Err(AuthError::TokenDecode(_))
        ));
    }
}
