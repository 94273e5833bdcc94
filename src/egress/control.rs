//! Egress control interface
//!
//! The VPN client is a command-line binary with `disconnect` and
//! `connect <server>` subcommands reporting success through its exit code.
//! The trait keeps that collaborator swappable in tests.

use async_trait::async_trait;
use tokio::process::Command;

/// Outcome of a disconnect/connect request, exit-code style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EgressStatus {
    /// The VPN client reported success
    Success,
    /// The VPN client exited non-zero, or could not be spawned at all
    Failure { code: Option<i32> },
}

impl EgressStatus {
    pub fn is_success(self) -> bool {
        matches!(self, EgressStatus::Success)
    }
}

/// Interface to the process-wide network egress path
///
/// Implementations mutate shared egress state; callers must keep requests
/// strictly sequential.
#[async_trait]
pub trait EgressControl: Send + Sync {
    /// Drops the current egress connection
    async fn disconnect(&self) -> EgressStatus;

    /// Routes egress through the named server
    async fn connect(&self, server: &str) -> EgressStatus;
}

/// Egress control backed by a VPN command-line client
pub struct VpnCli {
    command: String,
}

impl VpnCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> EgressStatus {
        match Command::new(&self.command).args(args).status().await {
            Ok(status) if status.success() => EgressStatus::Success,
            Ok(status) => EgressStatus::Failure {
                code: status.code(),
            },
            Err(e) => {
                tracing::warn!(command = %self.command, error = %e, "Failed to spawn VPN client");
                EgressStatus::Failure { code: None }
            }
        }
    }
}

#[async_trait]
impl EgressControl for VpnCli {
    async fn disconnect(&self) -> EgressStatus {
        self.run(&["disconnect"]).await
    }

    async fn connect(&self, server: &str) -> EgressStatus {
        self.run(&["connect", server]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success() {
        assert!(EgressStatus::Success.is_success());
        assert!(!EgressStatus::Failure { code: Some(1) }.is_success());
        assert!(!EgressStatus::Failure { code: None }.is_success());
    }

    #[tokio::test]
    async fn test_missing_binary_reports_failure() {
        let cli = VpnCli::new("/nonexistent/vpn-client");
        assert_eq!(
            cli.disconnect().await,
            EgressStatus::Failure { code: None }
        );
    }
}
