// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! Access token issuance and validation.
//!
//! Tokens are compact HS256 JWTs signed with a single process-wide secret.
//! Issuer and validator share the same trust domain, so a symmetric scheme
//! is sufficient; there is no key distribution and no server-side state per
//! token. A token is valid from `iat` until `exp` and cannot be revoked
//! earlier.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::UserAccount;

use super::claims::Claims;
use super::error::AuthError;

/// Issuer claim stamped into and required from every token.
pub const ISSUER: &str = "forumhub";

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Signs and verifies access tokens with the shared secret.
///
/// One instance lives in [`crate::state::AppState`] for the whole process.
/// Both operations are pure functions of their inputs, the secret and the
/// current time; no locking is involved.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenSigner {
    /// Create a signer from the shared secret and token lifetime.
    ///
    /// The secret is loaded once at startup; an absent secret is a fatal
    /// startup condition handled in `main`, never a per-call error.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    /// Issue a signed access token for an authenticated account.
    ///
    /// The subject is the account's email; roles are deliberately not
    /// embedded (they are re-resolved from the store on every request).
    pub fn issue(&self, account: &UserAccount) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: account.email.clone(),
            iat,
            exp: iat + self.ttl_secs,
            iss: ISSUER.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Validate a token string and return its claim set.
    ///
    /// Checks structure, signature and expiry in that order, short-circuiting
    /// on the first failure. Any mutation of the claims after signing
    /// (subject substitution, expiry extension) fails the signature check.
    /// Validation never consumes the token; re-running it yields the same
    /// outcome.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                jsonwebtoken::errors::ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::Role;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const SECRET: &[u8] = b"test-secret-0123456789";
    const TTL: i64 = 7200;

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET, TTL)
    }

    fn account() -> UserAccount {
        UserAccount {
            id: 1,
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn issue_then_validate_round_trips_claims() {
        let signer = signer();
        let before = Utc::now().timestamp();
        let token = signer.issue(&account()).expect("issue succeeds");
        let after = Utc::now().timestamp();

        let claims = signer.validate(&token).expect("fresh token validates");
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.iss, ISSUER);
        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp, claims.iat + TTL);
    }

    #[test]
    fn wire_format_has_three_parts() {
        let token = signer().issue(&account()).expect("issue succeeds");
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let token = signer().issue(&account()).expect("issue succeeds");
        let other = TokenSigner::new(b"a-different-secret", TTL);
        assert!(matches!(
            other.validate(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn any_single_byte_mutation_invalidates_the_token() {
        let signer = signer();
        let token = signer.issue(&account()).expect("issue succeeds");

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            if bytes[i] == b'.' {
                continue;
            }
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(bytes).expect("still utf8");
            assert!(
                signer.validate(&mutated).is_err(),
                "mutation at byte {i} was accepted"
            );
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        // TTL in the past, beyond the clock skew leeway.
        let stale = TokenSigner::new(SECRET, -2 * CLOCK_SKEW_LEEWAY as i64);
        let token = stale.issue(&account()).expect("issue succeeds");
        assert!(matches!(
            signer().validate(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn tampered_expiry_fails_on_signature_not_expiry() {
        // Swap in claims with exp in the past but keep the original
        // signature: the signed payload changed, so the rejection must be
        // a signature mismatch rather than a mere expiry failure.
        let signer = signer();
        let token = signer.issue(&account()).expect("issue succeeds");
        let parts: Vec<&str> = token.split('.').collect();

        let now = Utc::now().timestamp();
        let tampered_claims = serde_json::json!({
            "sub": "a@b.com",
            "iat": now - 10_000,
            "exp": now - 5_000,
            "iss": ISSUER,
        });
        let tampered = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(tampered_claims.to_string()),
            parts[2]
        );

        assert!(matches!(
            signer.validate(&tampered),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "a@b.com".to_string(),
            iat: now,
            exp: now + TTL,
            iss: "someone-else".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode succeeds");

        assert!(matches!(
            signer().validate(&token),
            Err(AuthError::InvalidIssuer)
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected_without_panicking() {
        let signer = signer();
        for garbage in ["", "not-a-jwt", "one.two", "a.b.c.d", "ey.ey.ey"] {
            assert!(matches!(
                signer.validate(garbage),
                Err(AuthError::MalformedToken)
            ));
        }
    }
}
