// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenSigner;
use crate::store::InMemoryStore;

/// Shared application state: the data store and the token signer.
///
/// The signer is read-only after startup; the store is the only shared
/// mutable state between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: TokenSigner) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(auth),
        }
    }
}
