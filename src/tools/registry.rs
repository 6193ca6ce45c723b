//! Tool Registry
//!
//! Manages registration and lookup of the tools a single service exposes.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ToolError;
use crate::service::ServiceKind;

// ============================================================================
// Tool Types
// ============================================================================

/// Raw `params` object of a request envelope
pub type Params = Map<String, Value>;

/// Result type for tool execution
pub type ToolResult = Result<Value, ToolError>;

/// Boxed future for async tool execution
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool handler function type
pub type ToolHandler = Arc<dyn Fn(Params) -> ToolFuture + Send + Sync>;

/// A registered tool with metadata and handler
pub struct RegisteredTool {
    pub name: String,
    pub description: String,
    pub handler: ToolHandler,
}

/// Public description of a registered tool
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
}

// ============================================================================
// Registry
// ============================================================================

/// Registry for the tools of one service
pub struct ToolRegistry {
    service: ServiceKind,
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new(service: ServiceKind) -> Self {
        Self {
            service,
            tools: HashMap::new(),
        }
    }

    pub fn service(&self) -> ServiceKind {
        self.service
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register_tool(&mut self, tool: RegisteredTool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    pub fn get_tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Definitions of all registered tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for registering a tool
pub struct ToolBuilder {
    name: String,
    description: String,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredTool
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        RegisteredTool {
            name: self.name,
            description: self.description,
            handler: Arc::new(move |params| Box::pin(handler(params))),
        }
    }
}
