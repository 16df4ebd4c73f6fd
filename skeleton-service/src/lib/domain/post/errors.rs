use thiserror::Error;

/// Error for event publishing operations
#[derive(Debug, Clone, Error)]
pub enum EventPublisherError {
    #[error("Failed to serialize event: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish event to broker: {0}")]
    PublishFailed(String),

    #[error("Event publishing timeout: {0}")]
    Timeout(String),
}

#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Post title must not be blank")]
    InvalidTitle,

    #[error("Post content must not be blank")]
    InvalidContent,

    #[error("Post owner does not exist: {0}")]
    OwnerNotFound(String),

    #[error("Failed to persist post: {0}")]
    Persist(String),

    /// The post row is durable; only the event was lost.
    #[error("Post {post_id} saved but event was not published: {source}")]
    Publish {
        post_id: String,
        source: EventPublisherError,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
