use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pagination::Pagination;
use crate::domain::post::errors::PostError;
use crate::domain::post::events::PostCreatedEvent;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::ports::PostEventPublisher;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR, EP>
where
    PR: PostRepository,
    EP: PostEventPublisher,
{
    repository: Arc<PR>,
    event_publisher: Arc<EP>,
}

impl<PR, EP> PostService<PR, EP>
where
    PR: PostRepository,
    EP: PostEventPublisher,
{
    pub fn new(repository: Arc<PR>, event_publisher: Arc<EP>) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }
}

#[async_trait]
impl<PR, EP> PostServicePort for PostService<PR, EP>
where
    PR: PostRepository,
    EP: PostEventPublisher,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let post = self
            .repository
            .create(NewPost {
                user_id: command.user_id,
                title: command.title,
                content: command.content,
            })
            .await?;

        let event = PostCreatedEvent::new(&post);
        if let Err(e) = self.event_publisher.publish_post_created(&event).await {
            // No rollback: the row stays and the event is lost.
            tracing::error!(
                post_id = %post.id,
                user_id = %post.user_id,
                error = %e,
                "Failed to publish PostCreated event"
            );
            return Err(PostError::Publish {
                post_id: post.id.to_string(),
                source: e,
            });
        }

        Ok(post)
    }

    async fn get_posts_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError> {
        self.repository.find_by_user(user_id).await
    }

    async fn get_posts_full_text(
        &self,
        keyword: &str,
        pagination: Pagination,
    ) -> Result<Vec<Post>, PostError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.search_full_text(keyword, pagination).await
    }
}
