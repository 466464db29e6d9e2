// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! Topic CRUD endpoints.
//!
//! All endpoints require authentication; the middleware has already rejected
//! invalid tokens by the time a handler runs, and the `Auth` extractor
//! rejects anonymous requests. Business rules (duplicate detection,
//! author/course existence, the answers guard on delete) live in the store.

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateTopicRequest, TopicPage, TopicResponse, UpdateTopicRequest},
    state::AppState,
    store::DEFAULT_PAGE_SIZE,
};

#[derive(Deserialize, IntoParams)]
pub struct PageParams {
    /// Zero-based page index (default 0).
    pub page: Option<usize>,
    /// Page size (default 10, capped at 100).
    pub size: Option<usize>,
}

#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    /// Filter by course name.
    pub course: Option<String>,
    /// Filter by creation year.
    pub year: Option<i32>,
    /// Zero-based page index (default 0).
    pub page: Option<usize>,
    /// Page size (default 10, capped at 100).
    pub size: Option<usize>,
}

fn require_not_blank(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

fn validate_topic_fields(title: &str, message: &str, course: &str) -> Result<(), ApiError> {
    require_not_blank(title, "title")?;
    require_not_blank(message, "message")?;
    require_not_blank(course, "course")
}

#[utoipa::path(
    post,
    path = "/v1/topics",
    request_body = CreateTopicRequest,
    tag = "Topics",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Topic created", body = TopicResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_topic(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateTopicRequest>,
) -> Result<(StatusCode, [(axum::http::HeaderName, String); 1], Json<TopicResponse>), ApiError> {
    validate_topic_fields(&request.title, &request.message, &request.course)?;

    let topic = {
        let mut store = state.store.write().await;
        store.create_topic(request)?
    };
    tracing::info!(user_id = user.user_id, topic_id = topic.id, "topic created");

    let location = format!("/v1/topics/{}", topic.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(topic)))
}

#[utoipa::path(
    get,
    path = "/v1/topics",
    params(PageParams),
    tag = "Topics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "One page of topics", body = TopicPage),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_topics(
    State(state): State<AppState>,
    Auth(_user): Auth,
    Query(params): Query<PageParams>,
) -> Result<Json<TopicPage>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_topics(
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )))
}

#[utoipa::path(
    get,
    path = "/v1/topics/search",
    params(SearchParams),
    tag = "Topics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Topics matching the filters", body = TopicPage),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn search_topics(
    State(state): State<AppState>,
    Auth(_user): Auth,
    Query(params): Query<SearchParams>,
) -> Result<Json<TopicPage>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.search_topics(
        params.course.as_deref(),
        params.year,
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )))
}

#[utoipa::path(
    get,
    path = "/v1/topics/{topic_id}",
    params(("topic_id" = u64, Path, description = "Id of the topic")),
    tag = "Topics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Topic detail", body = TopicResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such topic"),
    )
)]
pub async fn get_topic(
    State(state): State<AppState>,
    Auth(_user): Auth,
    Path(topic_id): Path<u64>,
) -> Result<Json<TopicResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_topic(topic_id)?))
}

#[utoipa::path(
    put,
    path = "/v1/topics/{topic_id}",
    params(("topic_id" = u64, Path, description = "Id of the topic")),
    request_body = UpdateTopicRequest,
    tag = "Topics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated topic", body = TopicResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such topic"),
    )
)]
pub async fn update_topic(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(topic_id): Path<u64>,
    Json(request): Json<UpdateTopicRequest>,
) -> Result<Json<TopicResponse>, ApiError> {
    validate_topic_fields(&request.title, &request.message, &request.course)?;

    let topic = {
        let mut store = state.store.write().await;
        store.update_topic(topic_id, request)?
    };
    tracing::info!(user_id = user.user_id, topic_id, "topic updated");

    Ok(Json(topic))
}

#[utoipa::path(
    delete,
    path = "/v1/topics/{topic_id}",
    params(("topic_id" = u64, Path, description = "Id of the topic")),
    tag = "Topics",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Topic deleted"),
        (status = 400, description = "Topic still has answers"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such topic"),
    )
)]
pub async fn delete_topic(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(topic_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    {
        let mut store = state.store.write().await;
        store.delete_topic(topic_id)?;
    }
    tracing::info!(user_id = user.user_id, topic_id, "topic deleted");

    Ok(StatusCode::NO_CONTENT)
}
