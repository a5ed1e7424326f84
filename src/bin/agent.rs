//! Fluenter Agent - clipboard rewriting on global hotkeys
//!
//! Run with: cargo run --bin fluenter-agent

use anyhow::Result;
use clap::Parser;
use fluenter::activity::ActivityLog;
use fluenter::agent::{
    start_hotkey_listener, ClipboardAgent, KeyChord, SystemClipboard, VirtualKeyboard,
};
use fluenter::config::Config;
use fluenter::core::ModelInvoker;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rewrite clipboard text with Ctrl+T / Ctrl+G", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Activity log file (overrides FLUENTER_LOG_FILE)
    #[arg(long)]
    log_file: Option<String>,

    /// Use the offline mock model even if credentials are present
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level(args.verbose))
        .init();

    if let Some(path) = args.log_file {
        config.log_file = path;
    }
    if args.mock {
        config.provider = "mock".to_string();
    }

    let log = ActivityLog::new(&config.log_file);
    if let Err(e) = run(&config, &log).await {
        log.error(&format!("Fatal error: {:#}", e));
        eprintln!("❌ Fatal error. Check {} for details.", log.path().display());
        return Err(e);
    }
    Ok(())
}

async fn run(config: &Config, log: &ActivityLog) -> Result<()> {
    let invoker = match ModelInvoker::from_config(config) {
        Ok(invoker) => invoker,
        Err(e) => {
            log.error(&format!("Failed to initialize LLM: {}", e));
            return Err(e.into());
        }
    };
    log.info(&format!(
        "LLM initialized successfully ({}).",
        invoker.backend_name()
    ));

    let clipboard = SystemClipboard::new()?;
    let keyboard = VirtualKeyboard::new(KeyChord::parse(&config.paste_keys)?)?;

    println!("{}", "=".repeat(60));
    println!("🪄 Fluenter Assistant is running");
    println!("Press Ctrl+T → Convert to Tamil (Taglish)");
    println!("Press Ctrl+G → Correct English");
    println!("Press Ctrl+Shift+Backspace → Exit");
    println!("{}", "=".repeat(60));

    let events = start_hotkey_listener();
    let mut agent = ClipboardAgent::new(
        Arc::new(invoker),
        Box::new(clipboard),
        Box::new(keyboard),
        log.clone(),
        Duration::from_millis(config.paste_delay_ms),
    );

    let reason = agent.run(events).await;
    info!("Agent loop ended: {:?}", reason);
    println!("\n🛑 Exiting Fluenter Assistant.");
    Ok(())
}
