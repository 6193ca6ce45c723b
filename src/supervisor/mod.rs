//! Supervision of the external MCP tool processes.
//!
//! The supervisor launches one process per configured service at startup,
//! logs their output and keeps `ServiceStates` in sync with what it observes.
//! Processes are never restarted; on shutdown every live process is killed.

mod error;
mod process;
mod state;

pub use error::SupervisorError;
pub use state::{ServiceState, ServiceStates, ServiceStatus};

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::ServicesSettings;
use crate::service::ServiceKind;

/// How long `stop` waits for each monitor to reap its process.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ServiceSupervisor {
    states: ServiceStates,
    cancel: CancellationToken,
    monitors: Vec<(ServiceKind, JoinHandle<()>)>,
}

impl ServiceSupervisor {
    /// Launch every enabled service. A service that fails to spawn is
    /// recorded as `FailedToStart` and does not affect the others.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(settings: &ServicesSettings, states: ServiceStates) -> Self {
        info!("Starting MCP servers...");
        let cancel = CancellationToken::new();
        let mut monitors = Vec::new();

        for service in ServiceKind::ALL {
            let command = settings.get(service);
            if !command.enabled {
                info!("{} MCP server is disabled", service.display_name());
                states.set(service, ServiceState::Disabled);
                continue;
            }

            match process::spawn_service(service, command) {
                Ok(child) => {
                    let pid = child.id();
                    states.set(service, ServiceState::Running { pid });
                    info!(
                        "{} MCP server started (pid {:?})",
                        service.display_name(),
                        pid
                    );
                    let handle = tokio::spawn(process::monitor(
                        service,
                        child,
                        states.clone(),
                        cancel.child_token(),
                    ));
                    monitors.push((service, handle));
                }
                Err(err) => {
                    error!("{}", err);
                    states.set(
                        service,
                        ServiceState::FailedToStart {
                            reason: err.to_string(),
                        },
                    );
                }
            }
        }

        Self {
            states,
            cancel,
            monitors,
        }
    }

    pub fn states(&self) -> ServiceStates {
        self.states.clone()
    }

    /// Kill every process still running and wait for the monitors to finish.
    /// Calling it again is a no-op.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        for (service, handle) in self.monitors.drain(..) {
            match tokio::time::timeout(STOP_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => error!(
                    "{} MCP monitor task failed: {}",
                    service.display_name(),
                    err
                ),
                Err(_) => warn!(
                    "Timed out waiting for {} MCP server to stop",
                    service.display_name()
                ),
            }
        }
    }
}
