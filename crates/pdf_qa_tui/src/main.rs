//! PDF Q&A terminal frontend entry point.
//!
//! Initializes logging (stderr, `RUST_LOG`-controlled), resolves the server
//! base URL from flag/env/config, spawns the chat and library workers, and
//! hands their channels to the TUI main loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pdf_qa_client::{config, ApiClient};
use pdf_qa_tui::{app, workers};

/// Load config: `--config <path>` flag, then `PDF_QA_CONFIG` env var, then the
/// default `~/.pdf-qa/config.yaml` if present, else built-in defaults.
fn load_config(args: &[String]) -> anyhow::Result<config::Config> {
    let explicit = if let Some(pos) = args.iter().position(|a| a == "--config") {
        Some(PathBuf::from(
            args.get(pos + 1)
                .context("--config requires a path")?,
        ))
    } else {
        std::env::var("PDF_QA_CONFIG").ok().map(PathBuf::from)
    };

    match explicit {
        Some(path) => config::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => match config::default_config_path() {
            Some(path) if path.exists() => config::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            _ => Ok(config::Config::default()),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG asks for output; logs go to stderr so a
    // redirected run keeps the alternate screen intact.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = load_config(&args)?;
    let base_url = config::resolve_base_url(&cfg);
    tracing::info!(base_url = %base_url, "starting PDF Q&A TUI");
    let api = Arc::new(ApiClient::new(&base_url));

    let (chat_tx, chat_rx) = workers::spawn_chat_worker(api.clone());
    let (lib_tx, lib_rx) = workers::spawn_library_worker(api);

    app::run_app(chat_rx, lib_rx, chat_tx, lib_tx)
        .await
        .context("App run failed")?;

    Ok(())
}
