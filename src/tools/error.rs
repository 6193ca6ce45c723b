use thiserror::Error;

/// Errors raised while executing a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}
