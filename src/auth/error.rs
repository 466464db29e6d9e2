// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! Authentication errors.
//!
//! The variants are fine-grained for internal diagnostics, but the HTTP
//! responses are deliberately not: every token-related failure collapses to
//! the same `401` body, and a bad login collapses to the same `400` body
//! whether the account is unknown or the password is wrong. A caller probing
//! the API learns nothing about why a credential was rejected.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Bad login credentials (unknown account or wrong password)
    #[error("invalid credentials")]
    CredentialsRejected,
    /// No authorization header present on a protected endpoint
    #[error("authorization header is required")]
    MissingAuthHeader,
    /// Invalid authorization header format
    #[error("invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Token is malformed
    #[error("token is malformed")]
    MalformedToken,
    /// Token signature is invalid
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token has expired
    #[error("token has expired")]
    TokenExpired,
    /// Token issuer is invalid
    #[error("token issuer is invalid")]
    InvalidIssuer,
    /// Token is not yet valid
    #[error("token is not yet valid")]
    TokenNotYetValid,
    /// Token subject no longer resolves to an account
    #[error("token subject does not resolve to an account")]
    UnknownSubject,
    /// Insufficient permissions
    #[error("insufficient permissions for this operation")]
    InsufficientPermissions,
    /// Internal error
    #[error("internal authentication error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct GenericErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
struct ValidationErrorBody {
    field: &'static str,
    error: &'static str,
}

impl AuthError {
    /// Stable code for this error, used in internal logs only.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::CredentialsRejected => "credentials_rejected",
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::UnknownSubject => "unknown_subject",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::CredentialsRejected => StatusCode::BAD_REQUEST,
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::InvalidIssuer
            | AuthError::TokenNotYetValid
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // The specific reason stays in the logs.
        tracing::debug!(error_code = self.error_code(), "authentication failed: {self}");

        let status = self.status_code();
        match status {
            // Same body for unknown account and wrong password.
            StatusCode::BAD_REQUEST => {
                let body = Json(ValidationErrorBody {
                    field: "credentials",
                    error: "invalid email or password",
                });
                (status, body).into_response()
            }
            StatusCode::FORBIDDEN => {
                (status, Json(GenericErrorBody { error: "forbidden" })).into_response()
            }
            StatusCode::UNAUTHORIZED => {
                (status, Json(GenericErrorBody { error: "unauthorized" })).into_response()
            }
            _ => (status, Json(GenericErrorBody { error: "internal error" })).into_response(),
        }
    }
}
