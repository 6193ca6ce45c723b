//! MCP Bridge Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod clock;
pub mod config;
pub mod server;
pub mod service;
pub mod supervisor;
pub mod tools;

// Re-export commonly used types for convenience
pub use server::{run_server, RequestsLoggingLevel};
pub use service::ServiceKind;
pub use supervisor::{ServiceState, ServiceStates, ServiceSupervisor};
pub use tools::{MockToolExecutor, ToolExecutor};
