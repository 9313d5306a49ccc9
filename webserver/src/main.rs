//! Horoscope webserver entry point
//!
//! Wires the Gemini-backed generation pipeline, the template renderer, the
//! Gotenberg client and the file store into the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use pipeline::{GeminiGenerator, Pipeline, RetryPolicy};
use webserver::config::Settings;
use webserver::services::{FileStore, GotenbergClient, HandlebarsRenderer};
use webserver::{WebServer, WebServerError, WebServerResult};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "AI horoscope PDF generation server")]
struct Args {
    /// Bind address override (HOST:PORT), defaults to APP_HOST:APP_PORT
    #[arg(long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Data directory override, defaults to PROJECTS_DIR
    #[arg(long)]
    data_dir: Option<String>,

    /// Static assets directory
    #[arg(long, default_value = "webserver/static")]
    static_dir: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let settings = Settings::from_env()?;

    let log_level = args.log_level.as_deref().unwrap_or(&settings.log_level);
    shared::logging::init_tracing(log_level);

    let bind_address: SocketAddr = args
        .bind
        .clone()
        .unwrap_or_else(|| format!("{}:{}", settings.app_host, settings.app_port))
        .parse()
        .map_err(|e| WebServerError::Config(format!("Invalid bind address: {}", e)))?;

    let data_dir = args.data_dir.clone().unwrap_or_else(|| settings.data_dir.clone());

    info!("🚀 Starting horoscope server on {}", bind_address);
    info!("📁 Data directory: {}", data_dir);
    info!("📁 Static assets: {}", args.static_dir);

    // Initialize services with dependency injection
    let generator = GeminiGenerator::new(settings.gemini_api_url, settings.gemini_api_key);
    let pipeline = Pipeline::new(generator, RetryPolicy::new(settings.request_retry_count));

    let template_renderer = HandlebarsRenderer::new()?;
    let pdf_renderer = GotenbergClient::new(
        settings.gotenberg_api_url,
        settings.gotenberg_auth_username,
        settings.gotenberg_auth_password,
    );

    let store = FileStore::new(PathBuf::from(&data_dir));
    store.ensure_layout().await?;

    // Create webserver with injected dependencies
    let webserver = WebServer::new(
        bind_address,
        PathBuf::from(&args.static_dir),
        pipeline,
        template_renderer,
        pdf_renderer,
        store,
    );
    webserver.run().await?;

    info!("✅ Horoscope server stopped gracefully");
    Ok(())
}
