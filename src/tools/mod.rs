//! Simulated database tools
//!
//! Each service owns a registry mapping method names to canned response
//! logic. Dispatch goes through the `ToolExecutor` trait so the mock can be
//! swapped for a real client without touching the HTTP layer.

mod error;
mod executor;
pub mod mongodb;
mod params;
pub mod postgresql;
pub mod registry;

pub use error::ToolError;
pub use executor::{MockToolExecutor, ToolExecutor, DEFAULT_TOOL_LATENCY};
pub use registry::{Params, ToolDefinition, ToolRegistry, ToolResult};
