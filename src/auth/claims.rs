// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::UserAccount;

use super::roles::Role;

/// Claim set carried by a ForumHub access token.
///
/// The token is deliberately minimal: it proves a completed login and names
/// the subject. Roles are never embedded; they are re-resolved from the user
/// store on every request so privilege changes take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the account's email address
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Issuer, always [`crate::auth::token::ISSUER`]
    pub iss: String,
}

/// Authenticated user information for the current request.
///
/// This is the primary type used throughout the application to represent
/// the authenticated user making a request. It is resolved once per request
/// by the auth middleware and discarded with the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Stable numeric account id
    pub user_id: u64,

    /// Login identifier (email), same value as the token subject
    pub email: String,

    /// Current role, resolved from the user store (not from the token)
    pub role: Role,

    /// Token expiration (Unix timestamp, used for logging, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Combine a validated claim set with the account it resolved to.
    pub fn resolve(account: &UserAccount, claims: &Claims) -> Self {
        Self {
            user_id: account.id,
            email: account.email.clone(),
            role: account.role,
            expires_at: claims.exp,
        }
    }

    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
