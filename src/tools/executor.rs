use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::registry::{Params, ToolDefinition, ToolRegistry, ToolResult};
use super::{mongodb, postgresql};
use crate::service::ServiceKind;

/// Simulated I/O time of a single tool call.
pub const DEFAULT_TOOL_LATENCY: Duration = Duration::from_millis(1000);

/// Executes a named tool on behalf of a service.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, service: ServiceKind, method: &str, params: Params) -> ToolResult;

    fn tool_definitions(&self, service: ServiceKind) -> Vec<ToolDefinition>;
}

/// Answers tool calls with canned data after an artificial delay.
pub struct MockToolExecutor {
    registries: HashMap<ServiceKind, ToolRegistry>,
    latency: Duration,
}

impl MockToolExecutor {
    pub fn new(latency: Duration) -> Self {
        let registries = ServiceKind::ALL
            .into_iter()
            .map(|service| (service, build_registry(service)))
            .collect();
        Self {
            registries,
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockToolExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_LATENCY)
    }
}

fn build_registry(service: ServiceKind) -> ToolRegistry {
    let mut registry = ToolRegistry::new(service);
    match service {
        ServiceKind::Postgresql => postgresql::register_tools(&mut registry),
        ServiceKind::Mongodb => mongodb::register_tools(&mut registry),
    }
    registry
}

/// Result for methods no registry knows about.
fn echo_result(service: ServiceKind, method: &str, params: &Params) -> ToolResult {
    let rendered = serde_json::to_string(params)?;
    Ok(json!({
        "message": format!(
            "{} tool '{}' executed with params: {}",
            service.display_name(),
            method,
            rendered
        )
    }))
}

#[async_trait]
impl ToolExecutor for MockToolExecutor {
    async fn execute(&self, service: ServiceKind, method: &str, params: Params) -> ToolResult {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self
            .registries
            .get(&service)
            .and_then(|registry| registry.get_tool(method))
        {
            Some(tool) => {
                debug!("Executing {} tool {}", service.display_name(), method);
                (tool.handler)(params).await
            }
            None => {
                debug!(
                    "No {} tool named {}, echoing params",
                    service.display_name(),
                    method
                );
                echo_result(service, method, &params)
            }
        }
    }

    fn tool_definitions(&self, service: ServiceKind) -> Vec<ToolDefinition> {
        self.registries
            .get(&service)
            .map(|registry| registry.definitions())
            .unwrap_or_default()
    }
}
