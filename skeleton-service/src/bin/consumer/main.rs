use skeleton_service::config::Config;
use skeleton_service::outbound::events::KafkaPostConsumer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skeleton_service=debug,rdkafka=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "skeleton-consumer",
        version = env!("CARGO_PKG_VERSION"),
        "Consumer starting"
    );

    let config = Config::load()?;

    tracing::info!(
        kafka_brokers = %config.kafka.brokers,
        group_id = %config.kafka.consumer.group_id,
        topics = ?config.kafka.consumer.topics,
        "Configuration loaded"
    );

    let consumer = KafkaPostConsumer::new(&config.kafka)?;

    tokio::select! {
        _ = consumer.start_consuming() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
