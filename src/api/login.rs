// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! Login endpoint.
//!
//! The one anonymous-allowed endpoint: verifies credentials against the user
//! store and answers with a signed access token. Thin by design; the real
//! work happens in [`crate::auth::credentials`] and [`crate::auth::token`].

use axum::{extract::State, Json};

use crate::{
    auth::{credentials, AuthError},
    models::{LoginRequest, TokenResponse},
    state::AppState,
};

/// Authenticate with email + password and receive an access token.
///
/// Bad credentials yield one uniform 400 body; the response never reveals
/// whether the email or the password was wrong.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Login succeeded", body = TokenResponse),
        (status = 400, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let email = request.email.trim();
    if email.is_empty() || request.password.is_empty() {
        return Err(AuthError::CredentialsRejected);
    }

    // Clone the account out so the Argon2 check runs without holding the lock.
    let account = {
        let store = state.store.read().await;
        store.find_user_by_email(email)
    };
    let account = credentials::verify(account, &request.password)?;

    let access_token = state.auth.issue(&account)?;
    tracing::info!(user_id = account.id, "user logged in");

    Ok(Json(TokenResponse { access_token }))
}
