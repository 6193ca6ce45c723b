//! Spawning and observing a single tool process.

use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::error::SupervisorError;
use super::state::{ServiceState, ServiceStates};
use crate::config::ServiceCommandSettings;
use crate::service::ServiceKind;

/// How long a process gets to exit after SIGTERM before it is killed.
pub(super) const TERMINATE_GRACE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
enum OutputStream {
    Stdout,
    Stderr,
}

/// Launch the configured command with all three stdio streams piped.
pub(super) fn spawn_service(
    service: ServiceKind,
    settings: &ServiceCommandSettings,
) -> Result<Child, SupervisorError> {
    let mut cmd = Command::new(&settings.command);
    cmd.args(&settings.args);

    for (child_var, source_var) in settings.secret_env.iter() {
        match std::env::var(source_var) {
            Ok(value) => {
                cmd.env(child_var, value);
            }
            Err(_) => warn!(
                "{} MCP server: {} is not set, {} will not be passed",
                service.display_name(),
                source_var,
                child_var
            ),
        }
    }

    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    cmd.spawn().map_err(|e| SupervisorError::SpawnFailed {
        service,
        command: settings.command.clone(),
        reason: e.to_string(),
    })
}

/// Forwards output, then records how the process ended: either on its own
/// (`Exited`) or terminated once on cancellation (`Stopped`).
pub(super) async fn monitor(
    service: ServiceKind,
    mut child: Child,
    states: ServiceStates,
    cancel: CancellationToken,
) {
    // Stdio tool servers exit once stdin closes, keep it open for the child's lifetime.
    let _stdin = child.stdin.take();

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(service, stdout, OutputStream::Stdout));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(service, stderr, OutputStream::Stderr));
    }

    let final_state = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => {
                info!(
                    "{} MCP server exited with code {:?}",
                    service.display_name(),
                    status.code()
                );
                ServiceState::Exited { code: status.code() }
            }
            Err(err) => {
                error!(
                    "Failed to wait for {} MCP server: {}",
                    service.display_name(),
                    err
                );
                ServiceState::Exited { code: None }
            }
        },
        _ = cancel.cancelled() => {
            info!("Stopping {} MCP server...", service.display_name());
            terminate(service, &mut child).await;
            ServiceState::Stopped
        }
    };

    states.set(service, final_state);
}

/// Sends SIGTERM and waits up to `TERMINATE_GRACE`, then falls back to a kill.
async fn terminate(service: ServiceKind, child: &mut Child) {
    if send_sigterm(child) {
        match tokio::time::timeout(TERMINATE_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(
                    "{} MCP server terminated with code {:?}",
                    service.display_name(),
                    status.code()
                );
                return;
            }
            Ok(Err(err)) => warn!(
                "Failed to wait for {} MCP server after SIGTERM: {}",
                service.display_name(),
                err
            ),
            Err(_) => warn!(
                "{} MCP server still running {:?} after SIGTERM, killing it",
                service.display_name(),
                TERMINATE_GRACE
            ),
        }
    }

    if let Err(err) = child.kill().await {
        warn!(
            "Failed to kill {} MCP server: {}",
            service.display_name(),
            err
        );
    }
}

#[cfg(unix)]
fn send_sigterm(child: &Child) -> bool {
    let pid = match child.id() {
        Some(pid) => pid,
        None => return false,
    };
    // The child has not been reaped yet, so the pid still refers to it.
    unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) == 0 }
}

#[cfg(not(unix))]
fn send_sigterm(_child: &Child) -> bool {
    false
}

async fn forward_lines<R>(service: ServiceKind, reader: R, stream: OutputStream)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match stream {
                OutputStream::Stdout => info!("{} MCP: {}", service.display_name(), line),
                OutputStream::Stderr => warn!("{} MCP stderr: {}", service.display_name(), line),
            },
            Ok(None) => break,
            Err(err) => {
                debug!(
                    "Stopped reading {} MCP {:?}: {}",
                    service.display_name(),
                    stream,
                    err
                );
                break;
            }
        }
    }
}
