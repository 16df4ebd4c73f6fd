use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::post::events::PostCreatedEvent;

/// Record header naming the event kind.
pub const EVENT_TYPE_HEADER: &str = "event_type";

/// Record header carrying the unique event id.
pub const EVENT_ID_HEADER: &str = "event_id";

pub const POST_CREATED: &str = "post_created";

/// Payload of a record on the `posts` topic.
///
/// Same shape as the post returned by the REST API: ids as strings, both
/// timestamps. Event metadata travels in record headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMessage {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PostCreatedEvent> for PostMessage {
    fn from(event: &PostCreatedEvent) -> Self {
        Self {
            id: event.post_id.to_string(),
            user_id: event.user_id.to_string(),
            title: event.title.clone(),
            content: event.content.clone(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
