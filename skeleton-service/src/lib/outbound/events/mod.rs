pub mod consumer;
pub mod messages;
pub mod producer;

pub use consumer::KafkaPostConsumer;
pub use producer::KafkaEventProducer;
