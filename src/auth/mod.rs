// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! # Authentication Module
//!
//! Stateless JWT authentication for the ForumHub API.
//!
//! ## Auth Flow
//!
//! 1. Client calls `POST /login` with email + password
//! 2. Credentials are checked against the user store (Argon2 hashes)
//! 3. Server issues an HS256 JWT signed with the process-wide secret
//! 4. Client sends `Authorization: Bearer <JWT>` on every request
//! 5. Middleware verifies signature, expiry and issuer, re-resolves the
//!    subject against the user store, and attaches the identity to the
//!    request
//!
//! ## Security
//!
//! - All token failures produce one uniform `401` body; bad logins produce
//!   one uniform `400` body (no malformed/expired/forged or
//!   unknown-user/wrong-password oracle)
//! - Tokens embed no roles; privileges are re-resolved per request
//! - No server-side token state, hence no revocation before expiry
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod roles;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, OptionalAuth};
pub use roles::Role;
pub use token::TokenSigner;
