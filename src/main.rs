//! Nelo checkout service binary.
//!
//! Loads configuration from `NELO_CHECKOUT__*` environment variables, seeds
//! the acquirer store and serves the payment endpoints.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use nelo_checkout::adapters::{
    app_router, InMemoryAcquirerStore, InMemoryTransactionRepository, LoggingCompletionCallback,
    NeloCheckoutGateway, PaymentAppState,
};
use nelo_checkout::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server.log_level, config.is_production());

    let payment = &config.payment;
    let gateway =
        NeloCheckoutGateway::with_timeout(Duration::from_secs(payment.request_timeout_secs))?;
    let acquirer = payment.acquirer_config();
    tracing::info!(
        provider = %acquirer.provider(),
        environment = ?acquirer.environment(),
        rest_url = %acquirer.rest_url(),
        "Acquirer configured"
    );

    let state = PaymentAppState {
        acquirer_store: Arc::new(InMemoryAcquirerStore::with_acquirer(acquirer).await),
        checkout_gateway: Arc::new(gateway),
        transaction_repository: Arc::new(InMemoryTransactionRepository::new()),
        completion_callback: Arc::new(LoggingCompletionCallback::new()),
        public_base_url: payment.public_base_url.clone(),
        processing_path: payment.processing_path.clone(),
    };

    let app = app_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "nelo-checkout listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level; JSON lines in production.
fn init_tracing(level: &str, json: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level.to_string());

    let builder = fmt().with_env_filter(EnvFilter::new(filter));
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
