// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! # API Data Models
//!
//! Request and response data structures used by the REST API, plus the
//! store-side entity records. API types derive `Serialize`, `Deserialize`
//! and `ToSchema` for JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Auth**: login request and token response
//! - **Topics**: forum topics with lifecycle status, tied to a course
//! - **Entities**: user accounts, courses and answers as the store keeps them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// Auth Models
// =============================================================================

/// Request body for `POST /login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email (the login identifier).
    pub email: String,
    /// Plaintext password, verified against the stored Argon2 hash and
    /// never persisted or logged.
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token for subsequent requests.
    pub access_token: String,
}

// =============================================================================
// Topic Models
// =============================================================================

/// Lifecycle status of a forum topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    /// Newly created, awaiting answers.
    Open,
    /// Marked as answered.
    Solved,
    /// Closed for further answers.
    Closed,
}

/// Request to create a new topic.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTopicRequest {
    /// Topic title (must not be blank).
    pub title: String,
    /// Topic body (must not be blank).
    pub message: String,
    /// Id of the authoring user (must exist).
    pub author_id: u64,
    /// Name of the course the topic belongs to (must exist).
    pub course: String,
}

/// Request to update an existing topic. All fields are required, matching
/// the creation rules.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTopicRequest {
    /// New title (must not be blank).
    pub title: String,
    /// New body (must not be blank).
    pub message: String,
    /// New lifecycle status.
    pub status: TopicStatus,
    /// Name of the course the topic belongs to (must exist).
    pub course: String,
}

/// Full topic representation returned by detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicResponse {
    /// Topic id.
    pub id: u64,
    /// Topic title.
    pub title: String,
    /// Topic body.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: TopicStatus,
    /// Authoring user's id.
    pub author_id: u64,
    /// Authoring user's display name.
    pub author_name: String,
    /// Course id.
    pub course_id: u64,
    /// Course name.
    pub course_name: String,
}

/// Reduced topic projection for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicListItem {
    /// Topic id.
    pub id: u64,
    /// Topic title.
    pub title: String,
    /// Topic body.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: TopicStatus,
    /// Authoring user's display name.
    pub author_name: String,
    /// Course name.
    pub course_name: String,
}

/// One page of topic listings, sorted by creation time ascending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicPage {
    /// The topics on this page.
    pub content: Vec<TopicListItem>,
    /// Zero-based page index.
    pub page: usize,
    /// Requested page size.
    pub size: usize,
    /// Total topics matching the query across all pages.
    pub total_elements: usize,
    /// Total number of pages.
    pub total_pages: usize,
}

// =============================================================================
// Store Entities
// =============================================================================

/// A user account as kept by the store.
///
/// The password hash is an Argon2 PHC string; the account record never
/// leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Stable numeric id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login identifier, unique across accounts.
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
}

/// A course topics can be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Stable numeric id.
    pub id: u64,
    /// Course name, unique across courses.
    pub name: String,
}

/// A forum topic as kept by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Stable numeric id.
    pub id: u64,
    /// Topic title.
    pub title: String,
    /// Topic body.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: TopicStatus,
    /// Authoring user's id.
    pub author_id: u64,
    /// Course id.
    pub course_id: u64,
}

/// An answer posted to a topic.
///
/// Only its existence matters to this service: topics with answers cannot
/// be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Stable numeric id.
    pub id: u64,
    /// The topic this answer belongs to.
    pub topic_id: u64,
    /// Answering user's id.
    pub author_id: u64,
    /// Answer body.
    pub message: String,
}
