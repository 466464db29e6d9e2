// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use forumhub_server::api::router;
use forumhub_server::auth::{credentials, Role, TokenSigner};
use forumhub_server::config::{self, ServerConfig};
use forumhub_server::state::AppState;
use forumhub_server::store::InMemoryStore;

#[tokio::main]
async fn main() {
    init_tracing();

    // A missing signing secret is fatal: issuing and validating share this
    // one key, so there is nothing sensible to fall back to.
    let config = ServerConfig::from_env().expect("invalid configuration");

    let mut store = InMemoryStore::new();
    seed_store(&mut store);

    let state = AppState::new(
        store,
        TokenSigner::new(&config.jwt_secret, config.token_ttl_secs),
    );
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("failed to parse bind address");

    tracing::info!(%addr, token_ttl_secs = config.token_ttl_secs, "ForumHub server listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = env::var(config::LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());

    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Seed accounts and courses from the environment.
///
/// There is no registration endpoint; accounts exist only through seeding,
/// mirroring a deployment where user provisioning happens out of band.
fn seed_store(store: &mut InMemoryStore) {
    if let (Ok(email), Ok(password)) = (
        env::var(config::SEED_ADMIN_EMAIL_ENV),
        env::var(config::SEED_ADMIN_PASSWORD_ENV),
    ) {
        let hash = credentials::hash_password(&password).expect("failed to hash seed password");
        let admin = store.insert_user("Administrator", email, hash, Role::Admin);
        tracing::info!(user_id = admin.id, "seeded admin account");
    }

    if let Ok(courses) = env::var(config::SEED_COURSES_ENV) {
        for name in courses.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let course = store.insert_course(name);
            tracing::info!(course_id = course.id, course = %course.name, "seeded course");
        }
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
