//! Runtime settings for the `swui` binary.
//!
//! Each setting is a flag that can also come from a `SWUI_*` environment
//! variable; the flag wins when both are given.

use std::net::SocketAddr;

use clap::builder::BoolishValueParser;
use clap::{Args, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    Pretty,
    /// One JSON object per event on stderr.
    Json,
}

/// Server and logging settings.
#[derive(Debug, Clone, Args)]
pub struct CliConfig {
    /// Address the preview server listens on. Port 0 picks a free port.
    #[arg(long, env = "SWUI_BIND_ADDR", default_value = "127.0.0.1:0")]
    pub bind_addr: SocketAddr,

    /// Log filter (e.g., `info`, `swui_server=debug`). `RUST_LOG` overrides it.
    #[arg(long, env = "SWUI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "SWUI_LOG_FORMAT", value_enum, ignore_case = true, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Do not open the served page in a browser.
    #[arg(long, env = "SWUI_NO_BROWSER", value_parser = BoolishValueParser::new())]
    pub no_browser: bool,
}
