// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! Authentication middleware for Axum.
//!
//! Applied to the whole router via `axum::middleware::from_fn_with_state`,
//! so it runs exactly once per request, before any handler, and is the only
//! place that reads the `Authorization` header for identity purposes.
//!
//! ## Per-request state machine
//!
//! - header absent → request proceeds anonymous; the endpoint's own policy
//!   decides (login allows anonymous, protected handlers reject via the
//!   [`super::extractor::Auth`] extractor)
//! - header present → token validated and the subject re-resolved against
//!   the user store; success attaches [`AuthenticatedUser`] to the request
//!   extensions, any failure short-circuits with a uniform 401
//!
//! Re-running the middleware against the same request yields the same
//! outcome; its only effect is populating the request extensions.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

use super::{AuthError, AuthenticatedUser};

/// Authentication middleware function.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // No header: proceed anonymous, access decided per endpoint.
    let auth_header = match request.headers().get(AUTHORIZATION) {
        Some(header) => header,
        None => return next.run(request).await,
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => return AuthError::InvalidAuthHeader.into_response(),
    };

    let token = match auth_str.strip_prefix("Bearer ") {
        Some(t) => t.trim(),
        None => return AuthError::InvalidAuthHeader.into_response(),
    };

    let claims = match state.auth.validate(token) {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    // Roles come from the store, not the token, so privilege changes and
    // deleted accounts take effect mid-TTL.
    let account = {
        let store = state.store.read().await;
        store.find_user_by_email(&claims.sub)
    };
    let account = match account {
        Some(account) => account,
        None => return AuthError::UnknownSubject.into_response(),
    };

    let user = AuthenticatedUser::resolve(&account, &claims);
    tracing::trace!(
        user_id = user.user_id,
        expires_at = user.expires_at,
        "request authenticated"
    );
    request.extensions_mut().insert(user);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::hash_password;
    use crate::auth::roles::Role;
    use crate::auth::token::TokenSigner;
    use crate::store::InMemoryStore;
    use axum::{body::Body, http::StatusCode, routing::get, Extension, Router};
    use tower::ServiceExt;

    async fn whoami(user: Option<Extension<AuthenticatedUser>>) -> String {
        match user {
            Some(Extension(user)) => user.email,
            None => "anonymous".to_string(),
        }
    }

    fn test_state() -> AppState {
        let mut store = InMemoryStore::new();
        let hash = hash_password("correct").expect("hashing succeeds");
        store.insert_user("Ana", "a@b.com", &hash, Role::User);
        AppState::new(store, TokenSigner::new(b"test-secret", 7200))
    }

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                authenticate,
            ))
            .with_state(state)
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn absent_header_proceeds_anonymous() {
        let app = test_app(test_state());
        let response = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() {
        let state = test_state();
        let account = state
            .store
            .read()
            .await
            .find_user_by_email("a@b.com")
            .unwrap();
        let token = state.auth.issue(&account).unwrap();

        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "a@b.com");
    }

    #[tokio::test]
    async fn malformed_bearer_value_is_rejected_before_the_handler() {
        let response = test_app(test_state())
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, "Bearer not-three-parts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, r#"{"error":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let response = test_app(test_state())
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn deleted_account_invalidates_an_otherwise_valid_token() {
        let state = test_state();
        let account = state
            .store
            .read()
            .await
            .find_user_by_email("a@b.com")
            .unwrap();
        let token = state.auth.issue(&account).unwrap();

        state.store.write().await.remove_user(account.id);

        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
