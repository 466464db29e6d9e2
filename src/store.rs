// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! In-memory store for forum data.
//!
//! Stands in for the relational database behind one `RwLock` in
//! [`crate::state::AppState`]. Holds user accounts (the credential store),
//! courses, topics and answers. Business rules from the forum domain live
//! here: duplicate-topic detection, author/course existence checks and the
//! answers guard on topic deletion.

use std::collections::HashMap;

use chrono::{Datelike, Utc};

use crate::auth::Role;
use crate::error::ApiError;
use crate::models::{
    Answer, Course, CreateTopicRequest, Topic, TopicListItem, TopicPage, TopicResponse,
    TopicStatus, UpdateTopicRequest, UserAccount,
};

/// Default page size for topic listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on requested page sizes.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<u64, UserAccount>,
    courses: HashMap<u64, Course>,
    topics: HashMap<u64, Topic>,
    answers: HashMap<u64, Answer>,
    next_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // -------------------------------------------------------------------------
    // Users (credential store)
    // -------------------------------------------------------------------------

    /// Insert an account with an already-hashed password.
    ///
    /// Used by startup seeding and tests; there is no registration endpoint.
    pub fn insert_user(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> UserAccount {
        let id = self.allocate_id();
        let user = UserAccount {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        };
        self.users.insert(id, user.clone());
        user
    }

    /// Look up an account by its login identifier.
    pub fn find_user_by_email(&self, email: &str) -> Option<UserAccount> {
        self.users.values().find(|user| user.email == email).cloned()
    }

    pub fn get_user(&self, user_id: u64) -> Option<UserAccount> {
        self.users.get(&user_id).cloned()
    }

    pub fn remove_user(&mut self, user_id: u64) -> Option<UserAccount> {
        self.users.remove(&user_id)
    }

    // -------------------------------------------------------------------------
    // Courses
    // -------------------------------------------------------------------------

    pub fn insert_course(&mut self, name: impl Into<String>) -> Course {
        let id = self.allocate_id();
        let course = Course { id, name: name.into() };
        self.courses.insert(id, course.clone());
        course
    }

    pub fn find_course_by_name(&self, name: &str) -> Option<Course> {
        self.courses
            .values()
            .find(|course| course.name == name)
            .cloned()
    }

    // -------------------------------------------------------------------------
    // Answers
    // -------------------------------------------------------------------------

    pub fn insert_answer(
        &mut self,
        topic_id: u64,
        author_id: u64,
        message: impl Into<String>,
    ) -> Result<Answer, ApiError> {
        if !self.topics.contains_key(&topic_id) {
            return Err(ApiError::not_found(format!(
                "Topic with id {topic_id} not found"
            )));
        }
        let id = self.allocate_id();
        let answer = Answer {
            id,
            topic_id,
            author_id,
            message: message.into(),
        };
        self.answers.insert(id, answer.clone());
        Ok(answer)
    }

    fn count_answers(&self, topic_id: u64) -> usize {
        self.answers
            .values()
            .filter(|answer| answer.topic_id == topic_id)
            .count()
    }

    // -------------------------------------------------------------------------
    // Topics
    // -------------------------------------------------------------------------

    pub fn create_topic(&mut self, request: CreateTopicRequest) -> Result<TopicResponse, ApiError> {
        let duplicate = self
            .topics
            .values()
            .any(|t| t.title == request.title && t.message == request.message);
        if duplicate {
            return Err(ApiError::bad_request(
                "A topic with the same title and message already exists",
            ));
        }

        let author = self.get_user(request.author_id).ok_or_else(|| {
            ApiError::bad_request(format!("Author with id {} does not exist", request.author_id))
        })?;

        let course = self.find_course_by_name(&request.course).ok_or_else(|| {
            ApiError::bad_request(format!("Course '{}' does not exist", request.course))
        })?;

        let id = self.allocate_id();
        let topic = Topic {
            id,
            title: request.title,
            message: request.message,
            created_at: Utc::now(),
            status: TopicStatus::Open,
            author_id: author.id,
            course_id: course.id,
        };
        self.topics.insert(id, topic.clone());

        Ok(self.topic_response(&topic))
    }

    pub fn get_topic(&self, topic_id: u64) -> Result<TopicResponse, ApiError> {
        self.topics
            .get(&topic_id)
            .map(|topic| self.topic_response(topic))
            .ok_or_else(|| ApiError::not_found(format!("Topic with id {topic_id} not found")))
    }

    /// List topics sorted by creation time ascending.
    pub fn list_topics(&self, page: usize, size: usize) -> TopicPage {
        self.paged(self.topics.values().collect(), page, size)
    }

    /// List topics filtered by course name and/or creation year.
    pub fn search_topics(
        &self,
        course: Option<&str>,
        year: Option<i32>,
        page: usize,
        size: usize,
    ) -> TopicPage {
        let course_id = course.and_then(|name| self.find_course_by_name(name)).map(|c| c.id);

        let matches: Vec<&Topic> = self
            .topics
            .values()
            .filter(|topic| match (course, course_id) {
                // Named course does not exist: nothing can match.
                (Some(_), None) => false,
                (Some(_), Some(id)) => topic.course_id == id,
                (None, _) => true,
            })
            .filter(|topic| year.is_none_or(|y| topic.created_at.year() == y))
            .collect();

        self.paged(matches, page, size)
    }

    pub fn update_topic(
        &mut self,
        topic_id: u64,
        request: UpdateTopicRequest,
    ) -> Result<TopicResponse, ApiError> {
        if !self.topics.contains_key(&topic_id) {
            return Err(ApiError::not_found(format!(
                "Topic with id {topic_id} not found"
            )));
        }

        let duplicate = self.topics.values().any(|t| {
            t.id != topic_id && t.title == request.title && t.message == request.message
        });
        if duplicate {
            return Err(ApiError::bad_request(
                "Another topic with the same title and message already exists",
            ));
        }

        let course = self.find_course_by_name(&request.course).ok_or_else(|| {
            ApiError::bad_request(format!("Course '{}' does not exist", request.course))
        })?;

        let topic = self
            .topics
            .get_mut(&topic_id)
            .ok_or_else(|| ApiError::not_found(format!("Topic with id {topic_id} not found")))?;
        topic.title = request.title;
        topic.message = request.message;
        topic.status = request.status;
        topic.course_id = course.id;
        let topic = topic.clone();

        Ok(self.topic_response(&topic))
    }

    pub fn delete_topic(&mut self, topic_id: u64) -> Result<(), ApiError> {
        if !self.topics.contains_key(&topic_id) {
            return Err(ApiError::not_found(format!(
                "Topic with id {topic_id} not found"
            )));
        }

        let answer_count = self.count_answers(topic_id);
        if answer_count > 0 {
            return Err(ApiError::bad_request(format!(
                "Cannot delete topic: it has {answer_count} associated answer(s). \
                 Delete the answers first or close the topic instead."
            )));
        }

        self.topics.remove(&topic_id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Projections
    // -------------------------------------------------------------------------

    fn topic_response(&self, topic: &Topic) -> TopicResponse {
        TopicResponse {
            id: topic.id,
            title: topic.title.clone(),
            message: topic.message.clone(),
            created_at: topic.created_at,
            status: topic.status,
            author_id: topic.author_id,
            author_name: self.display_name(topic.author_id),
            course_id: topic.course_id,
            course_name: self.course_name(topic.course_id),
        }
    }

    fn list_item(&self, topic: &Topic) -> TopicListItem {
        TopicListItem {
            id: topic.id,
            title: topic.title.clone(),
            message: topic.message.clone(),
            created_at: topic.created_at,
            status: topic.status,
            author_name: self.display_name(topic.author_id),
            course_name: self.course_name(topic.course_id),
        }
    }

    fn display_name(&self, user_id: u64) -> String {
        self.users
            .get(&user_id)
            .map(|user| user.name.clone())
            .unwrap_or_else(|| "[deleted]".to_string())
    }

    fn course_name(&self, course_id: u64) -> String {
        self.courses
            .get(&course_id)
            .map(|course| course.name.clone())
            .unwrap_or_else(|| "[deleted]".to_string())
    }

    fn paged(&self, mut topics: Vec<&Topic>, page: usize, size: usize) -> TopicPage {
        let size = size.clamp(1, MAX_PAGE_SIZE);
        topics.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total_elements = topics.len();
        let total_pages = total_elements.div_ceil(size);
        let content = topics
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .map(|topic| self.list_item(topic))
            .collect();

        TopicPage {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}
