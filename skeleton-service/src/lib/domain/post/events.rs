use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::models::Post;

/// Domain event published when a new post is persisted.
///
/// Carries the public representation of the post for downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCreatedEvent {
    pub event_id: String,
    pub post_id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostCreatedEvent {
    pub fn new(post: &Post) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            post_id: post.id.0,
            user_id: post.user_id.0,
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
