//! Rotation policy over the egress control interface

use crate::egress::control::EgressControl;
use std::time::Duration;
use tokio::time::sleep;

/// Delay between failed rotation attempts
pub const ROTATE_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Cycles process-wide egress across a pool of VPN servers
///
/// Rotation is strictly sequential: the active VPN connection is shared
/// process-wide state, so no two rotations may ever be in flight at once.
pub struct Rotator<C: EgressControl> {
    control: C,
    servers: Vec<String>,
    retry_delay: Duration,
}

impl<C: EgressControl> Rotator<C> {
    pub fn new(control: C, servers: Vec<String>) -> Self {
        Self {
            control,
            servers,
            retry_delay: ROTATE_RETRY_DELAY,
        }
    }

    /// Overrides the inter-attempt delay; tests use `Duration::ZERO`
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Picks a uniformly random server; repeats across attempts are allowed
    fn pick_server(&self) -> &str {
        &self.servers[fastrand::usize(..self.servers.len())]
    }

    /// Moves egress to a freshly picked server, retrying up to `max_attempts`
    ///
    /// Each attempt disconnects the current path and connects to a random
    /// server from the pool; either call failing consumes the attempt. The
    /// fixed delay is slept only when attempts remain. Returns `false` once
    /// the budget is exhausted; the caller decides what happens next.
    pub async fn rotate(&self, max_attempts: u32) -> bool {
        let mut remaining = max_attempts;

        while remaining > 0 {
            let server = self.pick_server();

            if self.control.disconnect().await.is_success()
                && self.control.connect(server).await.is_success()
            {
                tracing::info!(server, "Connected to VPN server");
                return true;
            }

            remaining -= 1;
            tracing::warn!(server, remaining, "Failed to connect to VPN server, retrying");

            if remaining > 0 {
                sleep(self.retry_delay).await;
            }
        }

        tracing::error!("Failed to establish VPN connection");
        false
    }

    /// One best-effort connect at startup, unretried
    pub async fn connect_initial(&self) -> bool {
        let server = self.pick_server();
        let connected = self.control.connect(server).await.is_success();

        if connected {
            tracing::info!(server, "Initial VPN connection established");
        } else {
            tracing::warn!(server, "Initial VPN connection failed, continuing anyway");
        }

        connected
    }
}
