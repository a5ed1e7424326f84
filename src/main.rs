//! Fluenter API - grammar correction service
//!
//! Serves `/correct` and `/rephrase` to the desktop client.

use anyhow::Result;
use clap::Parser;
use fluenter::api;
use fluenter::config::{config_path, Config};
use fluenter::core::ModelInvoker;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Address to bind (overrides FLUENTER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides FLUENTER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Use the offline mock model even if credentials are present
    #[arg(long)]
    mock: bool,

    /// Write the config file (file settings and defaults, no env values) and exit
    #[arg(long)]
    write_config: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load()?;

    // Setup logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level(args.verbose))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.write_config {
        // File contents and defaults only; environment overrides stay out
        let path = config_path();
        Config::write_file_settings(&path)?;
        info!("📝 Wrote config to {:?}", path);
        return Ok(());
    }

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.mock {
        config.provider = "mock".to_string();
    }

    info!("✍️ Fluenter API v{} starting...", env!("CARGO_PKG_VERSION"));

    let invoker = ModelInvoker::from_config(&config)?;
    if invoker.is_mock() {
        warn!("Running in mock mode; responses are canned");
    } else {
        info!("🧠 Model backend: {}", invoker.backend_name());
    }

    api::run(&config.host, config.port, Arc::new(invoker)).await?;

    info!("👋 Fluenter API stopped");
    Ok(())
}
