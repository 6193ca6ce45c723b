use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::service::ServiceKind;

/// Lifecycle of one supervised process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    NotStarted,
    Disabled,
    Running { pid: Option<u32> },
    Exited { code: Option<i32> },
    FailedToStart { reason: String },
    /// Killed by the supervisor during shutdown.
    Stopped,
}

impl ServiceState {
    pub fn is_running(&self) -> bool {
        matches!(self, ServiceState::Running { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::NotStarted => "not_started",
            ServiceState::Disabled => "disabled",
            ServiceState::Running { .. } => "running",
            ServiceState::Exited { .. } => "exited",
            ServiceState::FailedToStart { .. } => "failed_to_start",
            ServiceState::Stopped => "stopped",
        }
    }

    /// Two-valued status reported by `/health`.
    pub fn health_status(&self) -> &'static str {
        if self.is_running() {
            "running"
        } else {
            "stopped"
        }
    }
}

/// Shared board of service states. The supervisor writes, HTTP handlers read.
#[derive(Debug, Clone, Default)]
pub struct ServiceStates {
    inner: Arc<Mutex<HashMap<ServiceKind, ServiceState>>>,
}

impl ServiceStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, service: ServiceKind) -> ServiceState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&service)
            .cloned()
            .unwrap_or(ServiceState::NotStarted)
    }

    pub fn set(&self, service: ServiceKind, state: ServiceState) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(service, state);
    }

    /// Current state of every service, in `ServiceKind::ALL` order.
    pub fn snapshot(&self) -> Vec<(ServiceKind, ServiceState)> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        ServiceKind::ALL
            .into_iter()
            .map(|service| {
                let state = guard
                    .get(&service)
                    .cloned()
                    .unwrap_or(ServiceState::NotStarted);
                (service, state)
            })
            .collect()
    }
}

/// Detailed, serializable view of a service state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub name: ServiceKind,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceStatus {
    pub fn new(name: ServiceKind, state: &ServiceState) -> Self {
        let mut status = ServiceStatus {
            name,
            status: state.label(),
            pid: None,
            exit_code: None,
            error: None,
        };
        match state {
            ServiceState::Running { pid } => status.pid = *pid,
            ServiceState::Exited { code } => status.exit_code = *code,
            ServiceState::FailedToStart { reason } => status.error = Some(reason.clone()),
            _ => {}
        }
        status
    }
}
