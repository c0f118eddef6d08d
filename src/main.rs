//! DocSuite server entry point.

use tracing_subscriber::{fmt, EnvFilter};

use docsuite_core::config::AppConfig;
use docsuite_core::error::{AppError, ErrorKind};
use docsuite_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOCSUITE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "pretty" => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocSuite v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&config.uploads.root)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to create uploads dir '{}'", config.uploads.root),
                e,
            )
        })?;

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    docsuite_database::migration::run_migrations(db.pool()).await?;

    docsuite_api::run_server(config, db).await
}
