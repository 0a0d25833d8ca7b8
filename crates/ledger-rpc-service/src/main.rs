//! Ledger RPC Service - JSON-RPC API over the Accounts table
//!
//! This is the main entry point for the ledger-rpc service.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_rpc_service::{create_router, AppState, ServiceConfig};
use ledger_rpc_store::{bootstrap, AccountStore, MySqlStore};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ledger_rpc=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Service terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Ledger RPC Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env()?;

    tracing::info!(
        instance = %config.instance_name,
        listen_addr = %config.listen_addr,
        store_target = %config.store.target(),
        store_user = %config.store.user,
        database = %config.store.database,
        connection_mode = %config.connection_mode,
        "Service configuration loaded"
    );

    // Connect to the store, retrying while it starts up
    let store = MySqlStore::connect_with_retry(
        &config.store,
        config.connection_mode,
        &config.connect_retry,
    )
    .await?;

    bootstrap::prepare_schema(&store).await?;

    let store: Arc<dyn AccountStore> = Arc::new(store);

    // Build app state and router
    let state = AppState::new(store, config.clone());
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting RPC server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
