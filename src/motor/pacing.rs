//! Real-time pacing for the background worker.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::config::Pacing;

/// `DelayNs` provider selected by [`Pacing`].
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    pacing: Pacing,
}

impl Pacer {
    /// Create a pacer.
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }
}

impl DelayNs for Pacer {
    fn delay_ns(&mut self, ns: u32) {
        if self.pacing == Pacing::Realtime && ns > 0 {
            thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_instant_does_not_sleep() {
        let mut pacer = Pacer::new(Pacing::Instant);
        let start = Instant::now();
        pacer.delay_ms(500);
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn test_realtime_sleeps() {
        let mut pacer = Pacer::new(Pacing::Realtime);
        let start = Instant::now();
        pacer.delay_ms(20);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
