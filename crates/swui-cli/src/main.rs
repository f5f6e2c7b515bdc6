//! `swui` — preview a local OpenAPI/Swagger document in Swagger UI.
//!
//! Serves the embedded Swagger UI on a loopback port and opens it in the
//! system browser. The spec file is re-read on every page load, so editing
//! the file and refreshing the browser shows the change.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swui_core::options::UiOption;
use swui_core::spec;
use swui_server::SwaggerUi;

use crate::config::{CliConfig, LogFormat};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// ── CLI structure ────────────────────────────────────────────────────

/// swui — Swagger UI preview for local spec files.
#[derive(Parser)]
#[command(
    name = "swui",
    version,
    about = "swui — preview an OpenAPI/Swagger document in Swagger UI",
    long_about = None,
    after_help = format!(
        "{DIM}Examples:{RESET}\n  \
         swui openapi.yaml\n  \
         swui --persist-auth --show-filter-bar api/swagger.json"
    ),
)]
struct Cli {
    /// Path to the OpenAPI/Swagger document (YAML or JSON).
    spec: Option<PathBuf>,

    /// Keep authorization data across browser reloads.
    #[arg(long)]
    persist_auth: bool,

    /// Show the operation filter bar.
    #[arg(long)]
    show_filter_bar: bool,

    #[command(flatten)]
    config: CliConfig,
}

impl Cli {
    /// Handler options for previewing `spec`.
    fn ui_options(&self, spec: PathBuf) -> Vec<UiOption> {
        let title = spec.display().to_string();
        vec![
            UiOption::SpecFilePath(spec),
            UiOption::PersistAuthorization(self.persist_auth),
            UiOption::DisplayRequestDuration(true),
            UiOption::WithCredentials(true),
            UiOption::ShowCommonExtensions(true),
            UiOption::ShowExtensions(true),
            UiOption::ShowMutatedRequest(true),
            UiOption::HtmlTitle(title),
            UiOption::Filter {
                enabled: self.show_filter_bar,
                expression: String::new(),
            },
        ]
    }
}

// ── Entry point ──────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(spec) = cli.spec.clone() else {
        println!("{}", Cli::command().render_help());
        return ExitCode::SUCCESS;
    };

    init_tracing(&cli.config);

    match run(&cli, spec).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

async fn run(cli: &Cli, spec: PathBuf) -> Result<()> {
    let config = &cli.config;

    // Fail fast on a missing or unparsable document; later edits are
    // picked up per request.
    spec::load_file(&spec)
        .await
        .with_context(|| format!("cannot preview {}", spec.display()))?;

    let ui = SwaggerUi::new(cli.ui_options(spec)).context("failed to build Swagger UI handler")?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    let addr = listener.local_addr().context("failed to read listen address")?;
    let url = format!("http://{addr}/");

    info!(%url, "serving Swagger UI");
    println!("  {CYAN}{BOLD}Swagger UI:{RESET} {url}");
    println!("  {DIM}Press Ctrl+C to stop.{RESET}");

    if !config.no_browser {
        if let Err(e) = open::that_detached(&url) {
            warn!(error = %e, "failed to open browser; visit the URL manually");
        }
    }

    axum::serve(listener, ui.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("swui stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
