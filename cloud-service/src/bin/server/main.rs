use std::sync::Arc;

use auth::Authenticator;
use auth::SigningSecret;
use cloud_service::config::Config;
use cloud_service::domain::user::ports::UserRepository;
use cloud_service::domain::user::service::AuthService;
use cloud_service::inbound::http::router::create_router;
use cloud_service::outbound::repositories::InMemoryUserRepository;
use cloud_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloud_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "cloud-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = if config.database.url.is_some() { "postgresql" } else { "memory" },
        expiration_hours = config.jwt.expiration_hours,
        keep_alive_days = config.jwt.keep_alive_days,
        "Configuration loaded"
    );

    let secret = SigningSecret::new(&config.jwt.secret).inspect_err(|e| {
        tracing::error!(error = %e, "Invalid token signing secret");
    })?;

    let password_hasher = config.password.hasher().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid password hashing parameters");
    })?;

    let lifetimes = config.jwt.lifetimes().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid token lifetimes");
    })?;

    let authenticator = Authenticator::new(&secret, password_hasher)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to create authenticator"))?
        .with_lifetimes(lifetimes);

    let user_repository: Arc<dyn UserRepository> = match &config.database.url {
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

            Arc::new(PostgresUserRepository::new(pg_pool))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let auth_service = Arc::new(AuthService::new(user_repository, Arc::new(authenticator)));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
