use futures::StreamExt;
use rdkafka::consumer::Consumer;
use rdkafka::consumer::StreamConsumer;
use rdkafka::error::KafkaError;
use rdkafka::message::BorrowedMessage;
use rdkafka::message::Headers;
use rdkafka::ClientConfig;
use rdkafka::Message;
use thiserror::Error;

use super::messages::PostMessage;
use super::messages::EVENT_ID_HEADER;
use super::messages::EVENT_TYPE_HEADER;
use crate::config::KafkaConfig;

#[derive(Debug, Error)]
enum MessageProcessingError {
    #[error("Kafka consumer error: {0}")]
    KafkaError(#[from] KafkaError),

    #[error("Message has no payload")]
    NoPayload,

    #[error("Failed to decode message payload as UTF-8: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("Failed to deserialize event: {0}")]
    DeserializationError(#[from] serde_json::Error),
}

/// Kafka consumer that reads post events and logs them.
pub struct KafkaPostConsumer {
    consumer: StreamConsumer,
}

impl KafkaPostConsumer {
    pub fn new(config: &KafkaConfig) -> Result<Self, anyhow::Error> {
        let consumer_config = &config.consumer;

        tracing::info!(
            "Initializing Kafka consumer with brokers: {}, group_id: {}",
            &config.brokers,
            &consumer_config.group_id
        );

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &consumer_config.group_id)
            .set("enable.auto.commit", consumer_config.auto_commit.to_string())
            .set("fetch.max.bytes", consumer_config.fetch_max_bytes.to_string())
            .set("fetch.wait.max.ms", consumer_config.fetch_wait_max_ms.to_string())
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "30000")
            .set("enable.partition.eof", "false")
            .create()?;

        let topics: Vec<&str> = consumer_config.topics.iter().map(|s| s.as_str()).collect();
        consumer.subscribe(&topics)?;

        tracing::info!(?topics, "Kafka consumer subscribed");

        Ok(Self { consumer })
    }

    /// Long-running consume loop. Returns only when the stream ends.
    pub async fn start_consuming(self) {
        tracing::info!("Starting Kafka post consumer loop");

        let mut message_stream = self.consumer.stream();

        while let Some(result) = message_stream.next().await {
            if let Err(e) = self.process_message(result) {
                tracing::error!("Error processing message: {}", e);

                if matches!(e, MessageProcessingError::KafkaError(_)) {
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }

        tracing::warn!("Kafka consumer loop ended");
    }

    fn process_message(
        &self,
        result: Result<BorrowedMessage<'_>, KafkaError>,
    ) -> Result<(), MessageProcessingError> {
        let message = result?;
        let payload = message.payload().ok_or(MessageProcessingError::NoPayload)?;
        let json_str = std::str::from_utf8(payload)?;
        let post = serde_json::from_str::<PostMessage>(json_str)?;

        tracing::info!(
            topic = message.topic(),
            partition = message.partition(),
            offset = message.offset(),
            event_id = header_value(&message, EVENT_ID_HEADER).unwrap_or("-"),
            event_type = header_value(&message, EVENT_TYPE_HEADER).unwrap_or("-"),
            "Received event"
        );

        tracing::debug!(
            post_id = %post.id,
            user_id = %post.user_id,
            title = %post.title,
            "Post created"
        );

        Ok(())
    }
}

fn header_value<'a>(message: &'a BorrowedMessage<'_>, key: &str) -> Option<&'a str> {
    message
        .headers()?
        .iter()
        .find(|header| header.key == key)
        .and_then(|header| header.value)
        .and_then(|value| std::str::from_utf8(value).ok())
}
