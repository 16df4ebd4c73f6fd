use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::message::Header;
use rdkafka::message::OwnedHeaders;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::types::RDKafkaErrorCode;
use rdkafka::util::Timeout;
use serde::Serialize;
use thiserror::Error;

use crate::config::KafkaConfig;
use crate::domain::post::errors::EventPublisherError;
use crate::domain::post::events::PostCreatedEvent;
use crate::domain::post::ports::PostEventPublisher;
use crate::outbound::events::messages::PostMessage;
use crate::outbound::events::messages::EVENT_ID_HEADER;
use crate::outbound::events::messages::EVENT_TYPE_HEADER;
use crate::outbound::events::messages::POST_CREATED;

pub const POSTS_TOPIC: &str = "posts";

#[derive(Debug, Error)]
pub enum KafkaProducerError {
    #[error("Failed to send message to Kafka: {0}")]
    SendError(String),

    #[error("Kafka delivery timed out: {0}")]
    TimedOut(String),

    #[error("Failed to serialize message: {0}")]
    SerializationError(String),
}

impl From<KafkaProducerError> for EventPublisherError {
    fn from(err: KafkaProducerError) -> Self {
        match err {
            KafkaProducerError::SerializationError(msg) => {
                EventPublisherError::SerializationFailed(msg)
            }
            KafkaProducerError::TimedOut(msg) => EventPublisherError::Timeout(msg),
            KafkaProducerError::SendError(msg) => EventPublisherError::PublishFailed(msg),
        }
    }
}

fn is_timeout(err: &KafkaError) -> bool {
    matches!(
        err,
        KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut)
            | KafkaError::MessageProduction(RDKafkaErrorCode::QueueFull)
    )
}

pub struct KafkaEventProducer {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaEventProducer {
    /// Create a producer for the `posts` topic.
    ///
    /// # Notes:
    /// - `acks=1`: Leader acknowledgement only
    /// - `retries=0`: A failed delivery is reported, not retried
    /// - `message.timeout.ms`: Bounded by `kafka.timeout_secs`
    pub fn new(config: &KafkaConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            "Initializing Kafka producer for post events: brokers={}, topic={}",
            &config.brokers,
            POSTS_TOPIC
        );

        let timeout = Duration::from_secs(config.timeout_secs);

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", timeout.as_millis().to_string())
            .set("enable.idempotence", "false")
            .set("acks", "1")
            .set("retries", "0")
            .create()?;

        tracing::info!("Kafka producer initialized successfully");

        Ok(Self {
            producer,
            topic: POSTS_TOPIC.to_string(),
            timeout,
        })
    }

    /// Publish a message keyed by the owning user, so one user's posts stay ordered.
    async fn publish<T: Serialize>(
        &self,
        user_id: &str,
        event_type: &str,
        event_id: &str,
        message: &T,
    ) -> Result<(), KafkaProducerError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| KafkaProducerError::SerializationError(e.to_string()))?;

        tracing::debug!(
            event_id,
            "Publishing {} to topic '{}' (user_id: {})",
            event_type,
            self.topic,
            user_id
        );

        let headers = OwnedHeaders::new()
            .insert(Header {
                key: EVENT_TYPE_HEADER,
                value: Some(event_type),
            })
            .insert(Header {
                key: EVENT_ID_HEADER,
                value: Some(event_id),
            });

        let record = FutureRecord::to(&self.topic)
            .key(user_id)
            .headers(headers)
            .payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|(partition, offset)| {
                tracing::debug!(
                    partition,
                    offset,
                    "Event published to topic '{}' for user {}",
                    self.topic,
                    user_id
                );
            })
            .map_err(|(err, _)| {
                if is_timeout(&err) {
                    KafkaProducerError::TimedOut(err.to_string())
                } else {
                    KafkaProducerError::SendError(err.to_string())
                }
            })
    }
}

#[async_trait]
impl PostEventPublisher for KafkaEventProducer {
    async fn publish_post_created(
        &self,
        event: &PostCreatedEvent,
    ) -> Result<(), EventPublisherError> {
        let message = PostMessage::from(event);

        self.publish(
            &event.user_id.to_string(),
            POST_CREATED,
            &event.event_id,
            &message,
        )
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to publish PostCreated event for post {}: {}",
                event.post_id,
                e
            );
            e.into()
        })
    }
}
