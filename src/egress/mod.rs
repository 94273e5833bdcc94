//! Egress rotation across a VPN server pool
//!
//! The crawler avoids sustained rate limiting by moving its outbound
//! network path to a freshly picked VPN server before every listing page.
//! The VPN client itself is an external binary reached through the
//! [`EgressControl`] trait; [`Rotator`] owns the retry/backoff policy.

mod control;
mod rotator;

pub use control::{EgressControl, EgressStatus, VpnCli};
pub use rotator::{Rotator, ROTATE_RETRY_DELAY};
