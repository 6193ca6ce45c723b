use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;
use crate::supervisor::ServiceStates;
use crate::tools::ToolExecutor;

pub type GuardedToolExecutor = Arc<dyn ToolExecutor>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub tool_executor: GuardedToolExecutor,
    pub service_states: ServiceStates,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        tool_executor: GuardedToolExecutor,
        service_states: ServiceStates,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            tool_executor,
            service_states,
        }
    }
}

impl FromRef<ServerState> for GuardedToolExecutor {
    fn from_ref(input: &ServerState) -> Self {
        input.tool_executor.clone()
    }
}

impl FromRef<ServerState> for ServiceStates {
    fn from_ref(input: &ServerState) -> Self {
        input.service_states.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
