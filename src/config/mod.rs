mod file_config;

pub use file_config::{FileConfig, ServiceFileConfig, ServicesFileConfig};

use crate::server::{RequestsLoggingLevel, ServerConfig};
use crate::service::ServiceKind;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::collections::HashMap;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub tool_latency_ms: u64,
    pub no_services: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            logging_level: RequestsLoggingLevel::Path,
            tool_latency_ms: 1000,
            no_services: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub tool_latency: Duration,
    pub services: ServicesSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present, except `--no-services`
    /// which always disables every service.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let host = file.host.unwrap_or_else(|| cli.host.clone());
        if host.trim().is_empty() {
            bail!("host must not be empty");
        }
        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let tool_latency =
            Duration::from_millis(file.tool_latency_ms.unwrap_or(cli.tool_latency_ms));

        let services_file = file.services.unwrap_or_default();
        let mut services = ServicesSettings {
            postgresql: merge_service(
                ServiceKind::Postgresql,
                ServiceCommandSettings::default_for(ServiceKind::Postgresql),
                services_file.postgresql,
            )?,
            mongodb: merge_service(
                ServiceKind::Mongodb,
                ServiceCommandSettings::default_for(ServiceKind::Mongodb),
                services_file.mongodb,
            )?,
        };
        if cli.no_services {
            services.postgresql.enabled = false;
            services.mongodb.enabled = false;
        }

        Ok(Self {
            host,
            port,
            logging_level,
            tool_latency,
            services,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// How to launch one external tool process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCommandSettings {
    pub command: String,
    pub args: Vec<String>,
    pub enabled: bool,
    /// Child environment variable -> bridge environment variable holding its value.
    /// Secrets travel this way so they never show up in argv.
    pub secret_env: HashMap<String, String>,
}

const POSTGRESQL_ARGS: &[&str] = &[
    "-y",
    "@executeautomation/database-server",
    "--postgresql",
    "--host",
    "localhost",
    "--database",
    "dvdrental",
    "--user",
    "postgres",
];
const POSTGRESQL_SECRET_ENV: &[(&str, &str)] = &[("PGPASSWORD", "MCP_BRIDGE_POSTGRES_PASSWORD")];

const MONGODB_ARGS: &[&str] = &["-y", "mongodb-mcp-server"];
const MONGODB_SECRET_ENV: &[(&str, &str)] = &[
    ("MDB_MCP_API_CLIENT_ID", "MCP_BRIDGE_MONGODB_CLIENT_ID"),
    ("MDB_MCP_API_CLIENT_SECRET", "MCP_BRIDGE_MONGODB_CLIENT_SECRET"),
];

impl ServiceCommandSettings {
    pub fn default_for(service: ServiceKind) -> Self {
        let (args, secret_env) = match service {
            ServiceKind::Postgresql => (POSTGRESQL_ARGS, POSTGRESQL_SECRET_ENV),
            ServiceKind::Mongodb => (MONGODB_ARGS, MONGODB_SECRET_ENV),
        };

        Self {
            command: "npx".to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            enabled: true,
            secret_env: secret_env
                .iter()
                .map(|(child, source)| (child.to_string(), source.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesSettings {
    pub postgresql: ServiceCommandSettings,
    pub mongodb: ServiceCommandSettings,
}

impl ServicesSettings {
    pub fn get(&self, service: ServiceKind) -> &ServiceCommandSettings {
        match service {
            ServiceKind::Postgresql => &self.postgresql,
            ServiceKind::Mongodb => &self.mongodb,
        }
    }
}

impl Default for ServicesSettings {
    fn default() -> Self {
        Self {
            postgresql: ServiceCommandSettings::default_for(ServiceKind::Postgresql),
            mongodb: ServiceCommandSettings::default_for(ServiceKind::Mongodb),
        }
    }
}

fn merge_service(
    service: ServiceKind,
    defaults: ServiceCommandSettings,
    file: Option<ServiceFileConfig>,
) -> Result<ServiceCommandSettings> {
    let file = match file {
        Some(file) => file,
        None => return Ok(defaults),
    };

    let command = file.command.unwrap_or(defaults.command);
    if command.trim().is_empty() {
        bail!("services.{}.command must not be empty", service);
    }

    Ok(ServiceCommandSettings {
        command,
        args: file.args.unwrap_or(defaults.args),
        enabled: file.enabled.unwrap_or(defaults.enabled),
        secret_env: file.secret_env.unwrap_or(defaults.secret_env),
    })
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
