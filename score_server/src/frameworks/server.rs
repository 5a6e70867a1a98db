// Framework bootstrap for the live score server runtime.

use crate::domain::ports::MatchRepository;
use crate::frameworks::config;
use crate::interface_adapters::repository::InMemoryMatchRepository;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{LifecycleSettings, MatchFeed};

use std::future::Future;
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serves until the process receives Ctrl-C or SIGTERM.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    run_until(listener, shutdown_signal()).await
}

/// Serves until `shutdown` resolves, then drains every open stream.
pub async fn run_until(
    listener: tokio::net::TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state();
    let feed = state.feed.clone();
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // SSE bodies only finish once their senders are gone, so the registry is
    // drained as soon as shutdown starts rather than after connections close.
    let drain = async move {
        shutdown.await;
        let closed = feed.shutdown();
        tracing::info!(closed, "shutting down; viewer streams closed");
    };

    // Serve app and report errors rather than panicking
    axum::serve(listener, app)
        .with_graceful_shutdown(drain)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::new(config::http_host(), config::http_port());

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> AppState {
    let repository: Arc<dyn MatchRepository> = if config::seed_sample_matches() {
        Arc::new(InMemoryMatchRepository::with_sample_matches(chrono::Utc::now()))
    } else {
        Arc::new(InMemoryMatchRepository::new())
    };

    let settings = LifecycleSettings {
        heartbeat_interval: config::heartbeat_interval(),
        subscriber_buffer: config::subscriber_buffer(),
    };
    tracing::debug!(
        heartbeat_interval_secs = settings.heartbeat_interval.as_secs(),
        subscriber_buffer = settings.subscriber_buffer,
        "live feed configured"
    );

    // The feed owns the subscriber registry for the lifetime of the process.
    let feed = Arc::new(MatchFeed::new(repository.clone(), settings));
    AppState::new(repository, feed)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
