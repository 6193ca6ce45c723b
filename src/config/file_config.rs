use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub host: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub tool_latency_ms: Option<u64>,

    // Feature configs
    pub services: Option<ServicesFileConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ServicesFileConfig {
    pub postgresql: Option<ServiceFileConfig>,
    pub mongodb: Option<ServiceFileConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ServiceFileConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub enabled: Option<bool>,
    /// Child environment variable -> bridge environment variable holding its value.
    pub secret_env: Option<HashMap<String, String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
port = 4000
logging_level = "headers"
tool_latency_ms = 10

[services.postgresql]
command = "docker"
args = ["run", "--rm", "-i", "mcp/postgres"]
secret_env = {{ PGPASSWORD = "MY_PG_PASSWORD" }}

[services.mongodb]
enabled = false
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.port, Some(4000));
        assert_eq!(config.logging_level.as_deref(), Some("headers"));
        assert_eq!(config.tool_latency_ms, Some(10));
        assert!(config.host.is_none());

        let services = config.services.unwrap();
        let postgresql = services.postgresql.unwrap();
        assert_eq!(postgresql.command.as_deref(), Some("docker"));
        assert_eq!(postgresql.args.unwrap().len(), 4);
        assert_eq!(
            postgresql.secret_env.unwrap().get("PGPASSWORD").map(String::as_str),
            Some("MY_PG_PASSWORD")
        );
        assert_eq!(services.mongodb.unwrap().enabled, Some(false));
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.port.is_none());
        assert!(config.services.is_none());
    }

    #[test]
    fn test_load_missing_file_error() {
        let result = FileConfig::load(Path::new("/nonexistent/mcp-bridge.toml"));
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_invalid_toml_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "port = \"not a number\"").unwrap();
        let result = FileConfig::load(file.path());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
