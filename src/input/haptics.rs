// SPDX-License-Identifier: GPL-3.0-only

//! Haptic feedback for key taps.

use std::fmt::Debug;
use std::time::Duration;

/// A sink for short haptic pulses.
pub trait Haptics: Debug + Send + Sync {
    /// Requests a pulse of the given length. Must not block.
    fn pulse(&self, duration: Duration);
}

/// Haptics sink for devices without a vibration motor. Logs the pulse.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn pulse(&self, duration: Duration) {
        tracing::trace!("haptic pulse {}ms", duration.as_millis());
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts pulses so tests can assert on tap feedback.
    #[derive(Debug, Clone, Default)]
    pub struct CountingHaptics {
        pulses: Arc<AtomicUsize>,
    }

    impl CountingHaptics {
        pub fn count(&self) -> usize {
            self.pulses.load(Ordering::SeqCst)
        }
    }

    impl Haptics for CountingHaptics {
        fn pulse(&self, _duration: Duration) {
            self.pulses.fetch_add(1, Ordering::SeqCst);
        }
    }
}
