use std::sync::Arc;

use auth::Authenticator;
use event_service::config::Config;
use event_service::domain::event::ports::EventServicePort;
use event_service::domain::event::service::EventService;
use event_service::domain::user::ports::UserServicePort;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::outbound::repositories::InMemoryEventRepository;
use event_service::outbound::repositories::InMemoryUserRepository;
use event_service::outbound::repositories::PostgresEventRepository;
use event_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "event-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        access_expiration_minutes = config.jwt.access_expiration_minutes,
        refresh_expiration_days = config.jwt.refresh_expiration_days,
        "Configuration loaded"
    );

    let authenticator = match config
        .jwt
        .token_settings()
        .and_then(|settings| Authenticator::from_settings(&settings))
    {
        Ok(authenticator) => Arc::new(authenticator),
        Err(e) => {
            tracing::error!(error = %e, "Invalid token configuration");
            return Err(e.into());
        }
    };

    let (user_service, event_service): (Arc<dyn UserServicePort>, Arc<dyn EventServicePort>) =
        match &config.database.url {
            Some(url) => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                (
                    Arc::new(UserService::new(
                        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                        Arc::clone(&authenticator),
                    )),
                    Arc::new(EventService::new(Arc::new(PostgresEventRepository::new(
                        pg_pool,
                    )))),
                )
            }
            None => {
                tracing::warn!("No database configured; data is kept in memory and lost on exit");
                (
                    Arc::new(UserService::new(
                        Arc::new(InMemoryUserRepository::new()),
                        Arc::clone(&authenticator),
                    )),
                    Arc::new(EventService::new(Arc::new(InMemoryEventRepository::new()))),
                )
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, event_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
