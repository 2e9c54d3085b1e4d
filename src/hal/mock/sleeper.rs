use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::hal::traits::Sleeper;

use super::hardware::MockHardware;

/// Sleeper that counts calls instead of sleeping, so polling loops run
/// deterministically in tests. Optionally applies the simulated hardware's
/// pending format changes once a chosen call count is reached.
#[derive(Default)]
pub struct CountingSleeper {
    calls: AtomicU32,
    apply_at: Option<(u32, Arc<MockHardware>)>,
}

impl CountingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the hardware's pending changes during the `calls`-th sleep.
    pub fn apply_after(calls: u32, hw: Arc<MockHardware>) -> Self {
        Self {
            calls: AtomicU32::new(0),
            apply_at: Some((calls, hw)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, _duration: Duration) {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((at, hw)) = &self.apply_at {
            if call == *at {
                hw.apply_pending();
            }
        }
    }
}
