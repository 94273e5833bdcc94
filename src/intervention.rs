//! Manual-intervention pause
//!
//! When egress rotation exhausts its retry budget the run stops moving and
//! waits for an operator instead of failing. The gate trait keeps that
//! suspend point headless-testable; the production gate reads one line from
//! the operator console, and any input resumes the run.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Resumable suspend point awaiting an external operator signal
#[async_trait]
pub trait InterventionGate: Send + Sync {
    /// Blocks until the operator signals that the run may continue
    async fn wait_for_operator(&self, reason: &str);
}

/// Gate backed by the operator console
pub struct ConsoleGate;

#[async_trait]
impl InterventionGate for ConsoleGate {
    async fn wait_for_operator(&self, reason: &str) {
        eprintln!("{}", reason);
        eprintln!("Press Enter to continue after resolving the issue...");

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        if let Err(e) = reader.read_line(&mut line).await {
            // A closed console should not wedge the run forever
            tracing::error!(error = %e, "Failed to read operator input, resuming");
        }
    }
}
