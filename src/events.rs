//! Lifecycle events.
//!
//! The simulator reports what happens to each command through an injected
//! [`EventRecorder`]. Formatting and storage belong to the recorder.

use core::time::Duration;

use crate::error::Error;
use crate::motion::{Command, RunSummary};

/// Observable command lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEvent {
    /// Command passed validation and was handed to the worker.
    Accepted {
        /// The accepted command.
        command: Command,
    },
    /// Command was refused before any sample was produced.
    Rejected {
        /// The refused command.
        command: Command,
        /// Why it was refused.
        reason: Error,
    },
    /// Command ran to completion.
    Completed {
        /// Run statistics.
        summary: RunSummary,
        /// Acceleration constant the run used.
        acceleration: i64,
    },
    /// Command was truncated by a stop request.
    Cancelled {
        /// Position of the last emitted sample.
        position: i64,
        /// Samples emitted before the stop.
        samples: usize,
    },
}

impl MotionEvent {
    /// Simulated elapsed time for completed commands.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            MotionEvent::Completed { summary, .. } => Some(summary.elapsed()),
            _ => None,
        }
    }
}

/// Sink for lifecycle events.
///
/// Called from the caller's thread for `Accepted`/`Rejected` and from the
/// worker thread for `Completed`/`Cancelled`.
pub trait EventRecorder: Send + Sync {
    /// Record one event.
    fn record(&self, event: &MotionEvent);
}

/// Recorder that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl EventRecorder for NullRecorder {
    #[inline]
    fn record(&self, _event: &MotionEvent) {}
}

/// Recorder that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl EventRecorder for TracingRecorder {
    fn record(&self, event: &MotionEvent) {
        match event {
            MotionEvent::Accepted { command } => {
                tracing::info!(
                    target_distance = command.target_distance,
                    target_speed = command.target_speed,
                    initial_speed = command.initial_speed,
                    regime = command.regime().name(),
                    "command accepted"
                );
            }
            MotionEvent::Rejected { command, reason } => {
                tracing::warn!(
                    target_distance = command.target_distance,
                    target_speed = command.target_speed,
                    initial_speed = command.initial_speed,
                    "command rejected: {}",
                    reason
                );
            }
            MotionEvent::Completed {
                summary,
                acceleration,
            } => {
                tracing::info!(
                    regime = summary.regime.name(),
                    elapsed_secs = summary.elapsed().as_secs_f64(),
                    final_position = summary.final_position,
                    samples = summary.samples(),
                    acceleration = *acceleration,
                    "command completed"
                );
            }
            MotionEvent::Cancelled { position, samples } => {
                tracing::info!(
                    position = *position,
                    samples = *samples,
                    "command cancelled"
                );
            }
        }
    }
}

/// Recorder that keeps every event in memory.
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    events: std::sync::Mutex<alloc::vec::Vec<MotionEvent>>,
}

#[cfg(feature = "std")]
impl MemoryRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> alloc::vec::Vec<MotionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(feature = "std")]
impl EventRecorder for MemoryRecorder {
    fn record(&self, event: &MotionEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;

    #[test]
    fn test_memory_recorder_keeps_order() {
        let recorder = MemoryRecorder::new();
        let command = Command::new(10, 0, 0);

        recorder.record(&MotionEvent::Accepted { command });
        recorder.record(&MotionEvent::Rejected {
            command,
            reason: CommandError::ZeroTargetSpeed.into(),
        });

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], MotionEvent::Accepted { .. }));
        assert!(matches!(events[1], MotionEvent::Rejected { .. }));
        assert_eq!(events[1].elapsed(), None);
    }

    #[test]
    fn test_null_recorder_discards() {
        let recorder: &dyn EventRecorder = &NullRecorder;
        recorder.record(&MotionEvent::Accepted {
            command: Command::new(10, 5, 0),
        });
    }

    /// Shared buffer the test subscriber writes into.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<alloc::vec::Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> alloc::string::String {
            alloc::string::String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_tracing_recorder_emits_fields() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let recorder = TracingRecorder;
            recorder.record(&MotionEvent::Accepted {
                command: Command::new(1000, 100, 0),
            });
            recorder.record(&MotionEvent::Rejected {
                command: Command::new(10, 0, 0),
                reason: CommandError::ZeroTargetSpeed.into(),
            });
            recorder.record(&MotionEvent::Cancelled {
                position: 10,
                samples: 1,
            });
        });

        let text = captured.text();
        assert!(text.contains("command accepted"));
        assert!(text.contains("accelerate"));
        assert!(text.contains("WARN"));
        assert!(text.contains("command rejected"));
        assert!(text.contains("command cancelled"));
        assert!(text.contains("position=10"));
    }
}
