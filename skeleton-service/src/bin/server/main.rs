use std::sync::Arc;

use auth::Authenticator;
use skeleton_service::config::Config;
use skeleton_service::domain::authentication::service::AuthenticationService;
use skeleton_service::domain::post::service::PostService;
use skeleton_service::domain::user::service::UserService;
use skeleton_service::inbound::http::router::create_router;
use skeleton_service::outbound::events::KafkaEventProducer;
use skeleton_service::outbound::oauth::OAuthClient;
use skeleton_service::outbound::repositories::PostgresPostRepository;
use skeleton_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skeleton_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "skeleton-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        kafka_brokers = %config.kafka.brokers,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));
    let event_producer = Arc::new(KafkaEventProducer::new(&config.kafka)?);
    let google_client = Arc::new(OAuthClient::new(config.google.clone()));
    let auth0_client = Arc::new(OAuthClient::new(config.auth0.clone()));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let authentication_service = Arc::new(AuthenticationService::new(
        user_repository,
        Arc::clone(&authenticator),
        google_client,
        auth0_client,
    ));
    let post_service = Arc::new(PostService::new(post_repository, event_producer));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        authentication_service,
        post_service,
        authenticator,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
