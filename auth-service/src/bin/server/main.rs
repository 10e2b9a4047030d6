use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_application;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.ttl_seconds,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::from_parts(
        PasswordHasher::with_params(config.password.into()),
        TokenService::new(config.jwt.secret.as_bytes(), config.jwt.ttl_seconds),
    ));

    let http_application = match &config.database.url {
        Some(database_url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            create_application(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                authenticator,
            )
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory only");
            create_application(Arc::new(InMemoryUserRepository::new()), authenticator)
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

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
