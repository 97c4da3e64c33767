//! svg-relay - accept SVG submissions over HTTP and display the latest one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use svg_relay::{http, InMemoryStore, ServerConfig, SvgSubmissionService};

#[derive(Debug, Parser)]
#[command(name = "svg-relay", version, about)]
struct Cli {
    /// TOML config file; command-line flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "svg_relay=trace").
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        Ok(config)
    }
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level {:?}", default_level))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_level)?;

    // The process owns the store; everything else borrows it through the service.
    let service = Arc::new(SvgSubmissionService::new(InMemoryStore::new()));

    let addr = config.bind_addr();
    http::serve(service, &addr)
        .await
        .with_context(|| format!("failed to serve on {}", addr))
}
