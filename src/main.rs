use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mcp_bridge::config::{AppConfig, CliConfig, FileConfig};
use mcp_bridge::server::{bind, run_server, RequestsLoggingLevel};
use mcp_bridge::{MockToolExecutor, ServiceStates, ServiceSupervisor};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[clap(version, about = "HTTP bridge in front of the PostgreSQL and MongoDB MCP servers")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The address to bind to.
    #[clap(long, default_value = "0.0.0.0")]
    pub host: String,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Simulated latency of every tool call, in milliseconds.
    #[clap(long, default_value_t = 1000)]
    pub tool_latency_ms: u64,

    /// Do not launch the external MCP servers.
    #[clap(long)]
    pub no_services: bool,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            host: args.host.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            tool_latency_ms: args.tool_latency_ms,
            no_services: args.no_services,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config)?;
    let server_config = app_config.server_config();

    let listener = bind(&server_config).await?;
    info!(
        "MCP Bridge listening on http://{}:{}",
        server_config.host, server_config.port
    );
    info!("  GET  /health");
    info!("  POST /mcp/postgresql");
    info!("  POST /mcp/mongodb");

    let service_states = ServiceStates::new();
    let mut supervisor = ServiceSupervisor::start(&app_config.services, service_states.clone());
    let tool_executor = Arc::new(MockToolExecutor::new(app_config.tool_latency));

    tokio::select! {
        result = run_server(listener, server_config, tool_executor, service_states) => {
            if let Err(err) = &result {
                error!("Server stopped: {:#}", err);
            }
            supervisor.stop().await;
            result
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutting down MCP Bridge...");
            supervisor.stop().await;
            Ok(())
        }
    }
}
