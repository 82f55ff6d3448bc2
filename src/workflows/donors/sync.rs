use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Fixed delay the simulated sync waits before resolving.
pub const SYNC_DELAY: Duration = Duration::from_millis(1500);

/// Host connectivity flag, toggled by connectivity-change events from the
/// presentation layer. Online by default.
#[derive(Debug)]
pub struct ConnectivityState {
    online: AtomicBool,
}

impl ConnectivityState {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Result of a simulated sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub synced: bool,
}

/// Pretend to push local records to a remote service: wait the fixed delay,
/// then succeed iff the host is online. No retry, no cancellation.
pub async fn simulate_sync(connectivity: &ConnectivityState) -> SyncOutcome {
    tokio::time::sleep(SYNC_DELAY).await;
    SyncOutcome {
        synced: connectivity.is_online(),
    }
}
