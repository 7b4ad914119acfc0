use std::net::SocketAddr;
use std::sync::Arc;

use blog_service::access::models::TokenLifetimes;
use blog_service::access::service::AuthService;
use blog_service::config::Config;
use blog_service::inbound::http::rate_limit::RateLimitPolicy;
use blog_service::inbound::http::rate_limit::RateLimiter;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::PostgresTokenRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        environment = %config.server.environment,
        query_timeout_secs = config.database.query_timeout_secs,
        requests_per_second = config.rate_limit.requests_per_second,
        burst = config.rate_limit.burst,
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

    let query_timeout = config.database.query_timeout();
    let user_repository = Arc::new(PostgresUserRepository::new(
        pg_pool.clone(),
        query_timeout,
    ));
    let token_repository = Arc::new(PostgresTokenRepository::new(pg_pool, query_timeout));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_repository,
        TokenLifetimes::from(&config.tokens),
    ));

    let rate_limiter = RateLimiter::new(RateLimitPolicy::from(&config.rate_limit));
    let sweeper = rate_limiter.start_sweeper();

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        rate_limiter,
        config.server.environment.clone(),
    );

    let served = axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    sweeper.stop().await;

    match served {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(ref e) => tracing::error!(error = %e, "Server error"),
    };

    served.map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
