//! Library catalog server

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{
    api,
    config::AppConfig,
    repository::{MirrorStore, MongoBookMirror, PgBookStore},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("library_catalog={},tower_http=debug", config.logging.level).into()
    });
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    tracing::info!("Starting library catalog v{}", env!("CARGO_PKG_VERSION"));

    // Primary store
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to primary store");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    // Mirror store
    let mirror: Option<Arc<dyn MirrorStore>> = if config.mirror.enabled {
        let mirror = MongoBookMirror::connect(&config.mirror).await?;
        tracing::info!(
            "Connected to mirror store {}.{}",
            config.mirror.database,
            config.mirror.collection
        );
        Some(Arc::new(mirror))
    } else {
        tracing::warn!("Mirror store disabled, running in single-store mode");
        None
    };

    let services = Services::new(Arc::new(PgBookStore::new(pool)), mirror);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
