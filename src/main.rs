use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use daily_quiz_scraper::{
    api::routes::create_router,
    cache::QuizCache,
    config::Config,
    refresh,
    scraper::HttpQuizSource,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_quiz_scraper=debug,tower_http=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!(offset = %config.utc_offset, "Timezone set");

    let source = HttpQuizSource::new(&config.quiz_url, config.fetch_timeout)?;
    info!(url = source.url(), timeout = ?config.fetch_timeout, "Quiz source configured");
    let cache = Arc::new(QuizCache::new(Arc::new(source)));

    let refresher = config.refresh_interval.map(|every| {
        info!(every = ?every, "Starting background refresh");
        refresh::spawn(Arc::clone(&cache), every)
    });

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        cache,
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!(addr = %server_addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = refresher {
        handle.abort();
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
