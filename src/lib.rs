pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod pipeline; // Rule tables, model calls, fallbacks
pub mod speech;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Model(#[from] pipeline::llm::ModelError),
    #[error(transparent)]
    Database(#[from] db::DatabaseError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

pub fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::AppConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        fallback = config.fallback_mode.as_str(),
        "Configuration loaded"
    );

    // Blocking HTTP clients are built and dropped outside the async runtime.
    let analyzer = Arc::new(config.build_analyzer()?);
    let conn = db::open_database(&config.database_path())?;
    let ctx = api::ApiContext::new(analyzer.clone(), conn, Arc::new(speech::TracingSpeechSink));

    let runtime = tokio::runtime::Runtime::new().map_err(StartupError::Runtime)?;
    runtime.block_on(api::serve(config.bind_addr, ctx))?;
    drop(runtime);
    drop(analyzer);
    Ok(())
}
