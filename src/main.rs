//! FoodShare server: surplus food donation matching and reservation.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use foodshare_core::config::AppConfig;
use foodshare_core::error::AppError;
use foodshare_database::Stores;

#[tokio::main]
async fn main() {
    let env = std::env::var("FOODSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, env: &str) -> Result<(), AppError> {
    tracing::info!(
        env,
        store = config.store.backend.as_str(),
        "Starting FoodShare v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stores = Stores::from_config(&config).await?;

    foodshare_api::run_server(config, stores).await?;

    tracing::info!("FoodShare server shut down gracefully");
    Ok(())
}
