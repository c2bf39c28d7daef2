// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use sorting_quiz::config::Config;
use sorting_quiz::models::quiz::Catalog;
use sorting_quiz::routes;
use sorting_quiz::scoring::ScoringEngine;
use sorting_quiz::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Err(e) = run(config).await {
        tracing::error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(&config)?;
    tracing::info!("Loaded quiz catalog with {} parts", catalog.parts.len());

    let engine = ScoringEngine::new(Arc::new(catalog));
    if config.tiebreak_seed.is_some() {
        tracing::info!("Tie-breaks use a fixed seed");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Create AppState
    let state = AppState::new(engine, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}

fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn std::error::Error>> {
    match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading quiz catalog from {}", path.display());
            Ok(Catalog::from_json_file(path)?)
        }
        None => {
            let catalog = Catalog::builtin();
            catalog.validate()?;
            Ok(catalog)
        }
    }
}
