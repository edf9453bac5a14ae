use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use taxdoc_core::{Config, GeminiClient, config_file};
use taxdoc_pdf_mupdf::MupdfBackend;

mod app;
mod handlers;
mod state;
mod template;
mod upload;

use state::AppState;

/// Tax Document Assistant - review uploaded tax PDFs with Gemini
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to listen on (overrides config file and TAXDOC_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// Read configuration from this file instead of the default locations
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taxdoc=debug,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => config_file::load_from_path(path)?,
        None => config_file::load_config(),
    };
    let mut config = Config::from_file(&file).with_env();
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    if config.google_api_key.is_none() {
        tracing::warn!("no fallback API key configured; requests must supply apiKey");
    }

    let completion = GeminiClient::new(reqwest::Client::new())
        .with_base_url(config.completion_base_url.clone())
        .with_timeout(config.completion_timeout);

    let bind = config.bind.clone();
    let state = Arc::new(AppState {
        config,
        pdf_backend: Arc::new(MupdfBackend::new()),
        completion: Arc::new(completion),
    });

    let app = app::router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    println!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
