use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::user::models::UserId;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

impl CreatePostCommand {
    /// # Errors
    /// * `InvalidTitle` / `InvalidContent` - Blank after trimming
    pub fn new(user_id: UserId, title: String, content: String) -> Result<Self, PostError> {
        if title.trim().is_empty() {
            return Err(PostError::InvalidTitle);
        }
        if content.trim().is_empty() {
            return Err(PostError::InvalidContent);
        }

        Ok(Self {
            user_id,
            title,
            content,
        })
    }
}
