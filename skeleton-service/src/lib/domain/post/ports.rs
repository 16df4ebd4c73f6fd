use async_trait::async_trait;

use crate::domain::pagination::Pagination;
use crate::domain::post::errors::EventPublisherError;
use crate::domain::post::errors::PostError;
use crate::domain::post::events::PostCreatedEvent;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Persist a post and publish a `post_created` event.
    ///
    /// # Errors
    /// * `OwnerNotFound` - `user_id` does not reference an existing user
    /// * `Persist` - Store write failed
    /// * `Publish` - Post saved but the event could not be delivered
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// All posts of a user, newest first. No posts is an empty list.
    async fn get_posts_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// Full-text search over title and content, best match first.
    async fn get_posts_full_text(
        &self,
        keyword: &str,
        pagination: Pagination,
    ) -> Result<Vec<Post>, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError>;

    async fn search_full_text(
        &self,
        keyword: &str,
        pagination: Pagination,
    ) -> Result<Vec<Post>, PostError>;
}

/// Event publishing for post domain events.
#[async_trait]
pub trait PostEventPublisher: Send + Sync + 'static {
    /// # Errors
    /// * `SerializationFailed` - Event could not be encoded
    /// * `PublishFailed` - Broker did not acknowledge
    /// * `Timeout` - No acknowledgement within the delivery timeout
    async fn publish_post_created(
        &self,
        event: &PostCreatedEvent,
    ) -> Result<(), EventPublisherError>;
}
