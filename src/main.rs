//! Media Cache - media reference resolution service
//!
//! Serves descriptor resolution and cache administration over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_cache::api::{create_router, AppState};
use media_cache::media::OEmbedFetcher;
use media_cache::{spawn_reclaim_task, CacheRegistry, Config};

/// Main entry point for the media cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared descriptor cache and the oEmbed fetcher
/// 4. Start background reclamation task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting media cache service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, descriptor_ttl={}s, max_attempts={}, port={}, reclaim_interval={}s",
        config.max_entries,
        config.descriptor_ttl,
        config.max_attempts,
        config.server_port,
        config.reclaim_interval
    );

    let cache = CacheRegistry::init_global(config.max_entries).global_cache();
    let fetcher = OEmbedFetcher::new(config.fetch_timeout()).context("building metadata fetcher")?;
    let state = AppState::from_config(&config, cache.clone(), Arc::new(fetcher));

    let reclaim_handle = spawn_reclaim_task(cache, config.reclaim_interval);
    info!("Background reclaim task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reclaim_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the reclaim task and allows graceful shutdown.
async fn shutdown_signal(reclaim_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    reclaim_handle.abort();
    warn!("Reclaim task aborted");
}
