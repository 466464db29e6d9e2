// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! Credential verification against the user store.
//!
//! Passwords are stored as Argon2 PHC hashes and never logged or echoed.
//! Both failure modes (unknown account, wrong password) surface as the same
//! [`AuthError::CredentialsRejected`] value, and the unknown-account path
//! still performs one Argon2 verification against a dummy hash so the two
//! paths take comparable time.

use std::sync::OnceLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::models::UserAccount;

use super::error::AuthError;

// Hash of a throwaway password, verified when the account is unknown so
// lookup misses cost the same Argon2 work as password mismatches.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("forumhub-timing-pad").unwrap_or_default())
}

/// Hash a plaintext password into a PHC string for storage.
///
/// Used at seed time and by tests; login never hashes, only verifies.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| AuthError::InternalError(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AuthError::InternalError(e.to_string()))?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::InternalError(e.to_string()))?
        .to_string();
    Ok(phc)
}

fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        let argon2 = Argon2::default();
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    } else {
        false
    }
}

/// Check a presented password against the account a store lookup returned.
///
/// Takes the lookup result rather than the store itself so the Argon2 check
/// runs after the store lock has been released. Returns the account on
/// success, with no side effects. The error never distinguishes "no such
/// account" from "wrong password".
pub fn verify(account: Option<UserAccount>, password: &str) -> Result<UserAccount, AuthError> {
    match account {
        Some(account) => {
            if verify_password(&account.password_hash, password) {
                Ok(account)
            } else {
                Err(AuthError::CredentialsRejected)
            }
        }
        None => {
            // Burn one verification so the miss is not observably faster.
            let _ = verify_password(dummy_hash(), password);
            Err(AuthError::CredentialsRejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::Role;
    use crate::store::InMemoryStore;

    fn store_with_user() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        let hash = hash_password("correct").expect("hashing succeeds");
        store.insert_user("Ana", "a@b.com", &hash, Role::User);
        store
    }

    #[test]
    fn hash_then_verify_accepts_the_password() {
        let hash = hash_password("s3cret").expect("hashing succeeds");
        assert!(verify_password(&hash, "s3cret"));
        assert!(!verify_password(&hash, "s3cret "));
    }

    #[test]
    fn correct_credentials_return_the_account() {
        let store = store_with_user();
        let account = verify(store.find_user_by_email("a@b.com"), "correct")
            .expect("login succeeds");
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.role, Role::User);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let store = store_with_user();
        assert!(matches!(
            verify(store.find_user_by_email("a@b.com"), "wrong"),
            Err(AuthError::CredentialsRejected)
        ));
    }

    #[test]
    fn unknown_account_gets_the_same_rejection() {
        let store = store_with_user();
        let unknown = verify(store.find_user_by_email("nobody@b.com"), "correct").unwrap_err();
        let wrong = verify(store.find_user_by_email("a@b.com"), "wrong").unwrap_err();
        assert_eq!(unknown.error_code(), wrong.error_code());
    }
}
