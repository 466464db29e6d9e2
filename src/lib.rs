// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! ForumHub - Discussion Forum Backend
//!
//! Users post topics tied to courses, topics carry a lifecycle status, and
//! all write access is gated by stateless JWT authentication.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Stateless authentication and request authorization
//! - `store` - In-memory data store (users, courses, topics, answers)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
