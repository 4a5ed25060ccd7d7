//! Simulated round-trip latency.

use std::time::Duration;

/// Delays applied before each store operation touches the collection.
///
/// `bulk` covers `list` and the mutations, `point` covers single lookups
/// and filtered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub bulk: Duration,
    pub point: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Latency {
            bulk: Duration::from_millis(500),
            point: Duration::from_millis(300),
        }
    }
}

impl Latency {
    pub const fn none() -> Self {
        Latency {
            bulk: Duration::ZERO,
            point: Duration::ZERO,
        }
    }

    pub(crate) async fn wait_bulk(&self) {
        pause(self.bulk).await;
    }

    pub(crate) async fn wait_point(&self) {
        pause(self.point).await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
