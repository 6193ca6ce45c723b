use thiserror::Error;

use crate::service::ServiceKind;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("failed to spawn {service} MCP server '{command}': {reason}")]
    SpawnFailed {
        service: ServiceKind,
        command: String,
        reason: String,
    },
}
