use std::sync::Arc;

use auth::Authenticator;
use auth::InMemoryRevocationStore;
use auth::PasswordHasher;
use auth::RevocationSweeper;
use auth::SystemClock;
use auth::TokenCodec;
use axum::Router;
use session_service::config::Config;
use session_service::domain::session::service::SessionService;
use session_service::domain::user::service::UserService;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::InMemoryUserRepository;
use session_service::outbound::repositories::PostgresUserRepository;
use session_service::user::ports::UserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_secs = config.jwt.ttl.as_secs(),
        sweep_interval_secs = config.revocation.sweep_interval.as_secs(),
        persistent_users = config.database.url.is_some(),
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let codec = TokenCodec::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::from_std(config.jwt.ttl)?,
    )?;
    let revocations = Arc::new(InMemoryRevocationStore::new());
    let authenticator = Arc::new(Authenticator::new(
        password_hasher.clone(),
        codec,
        Arc::clone(&revocations),
    )?);

    let sweeper = RevocationSweeper::new(
        Arc::clone(&revocations),
        Arc::new(SystemClock),
        config.revocation.sweep_interval,
    )
    .spawn();

    let http_application = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            application(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                password_hasher,
                authenticator,
            )
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            application(
                Arc::new(InMemoryUserRepository::new()),
                password_hasher,
                authenticator,
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

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server exited successfully");

    Ok(())
}

fn application<UR: UserRepository>(
    user_repository: Arc<UR>,
    password_hasher: PasswordHasher,
    authenticator: Arc<Authenticator<InMemoryRevocationStore>>,
) -> Router {
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        password_hasher,
    ));
    let session_service = Arc::new(SessionService::new(user_repository, authenticator));

    create_router(user_service, session_service)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
