//! Background motor simulator.
//!
//! Runs one [`MotionEngine`] invocation at a time on a worker thread and
//! streams its samples through an mpsc channel. The caller drains the
//! channel whenever it likes, without blocking on the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Pacing;
use crate::error::{Error, ExecutionError, Result};
use crate::events::{EventRecorder, MotionEvent};
use crate::motion::{Command, MotionEngine, RunSummary, SampleSink};
use crate::trajectory::Trajectory;

use super::pacing::Pacer;
use super::state::MotorState;

/// What the worker hands back when joined.
type WorkerOutput = (MotorState, Result<RunSummary>);

/// Simulated single-axis stepper motor.
///
/// At most one command is in flight per simulator. A command stays pending
/// until [`join`](Self::join) or [`cancel_and_join`](Self::cancel_and_join)
/// reclaims the motor state from the worker; until then
/// [`submit`](Self::submit) fails with `AlreadyRunning`.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_sim::{Command, MotorSimulator};
///
/// let mut motor = MotorSimulator::builder().build()?;
/// motor.submit(Command::new(1000, 100, 0))?;
///
/// let mut trajectory = motor.drain();
/// while motor.is_running() {
///     trajectory.append(motor.drain());
/// }
/// motor.join()?;
/// trajectory.append(motor.drain());
/// ```
pub struct MotorSimulator {
    /// Profile engine shared with every worker.
    engine: MotionEngine,
    /// Pacing handed to every worker.
    pacing: Pacing,
    /// Lifecycle event sink.
    recorder: Arc<dyn EventRecorder>,
    /// Motor state while idle; `None` while a worker owns it.
    state: Option<MotorState>,
    /// Last known position, kept for when the worker is lost.
    last_position: i64,
    /// Worker of the pending command.
    worker: Option<JoinHandle<WorkerOutput>>,
    /// Receiving end of the current command's samples.
    samples: Option<Receiver<i64>>,
    /// Set while the worker is producing samples.
    running: Arc<AtomicBool>,
    /// Cooperative stop request.
    stop: Arc<AtomicBool>,
}

impl MotorSimulator {
    /// Create a builder.
    pub fn builder() -> super::MotorSimulatorBuilder {
        super::MotorSimulatorBuilder::new()
    }

    pub(crate) fn new(
        engine: MotionEngine,
        pacing: Pacing,
        recorder: Arc<dyn EventRecorder>,
        initial_position: i64,
    ) -> Self {
        Self {
            state: Some(MotorState::new(engine.config(), initial_position)),
            last_position: initial_position,
            engine,
            pacing,
            recorder,
            worker: None,
            samples: None,
            running: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the profile engine.
    #[inline]
    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    /// Get the pacing mode.
    #[inline]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Check if the worker is still producing samples.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Check if a command has been submitted and not yet joined.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.worker.is_some()
    }

    /// Position as of the last joined command.
    #[inline]
    pub fn position(&self) -> i64 {
        self.state.map(|s| s.position).unwrap_or(self.last_position)
    }

    /// Start executing a command in the background.
    ///
    /// Every sample is pushed onto a fresh delivery channel as soon as it is
    /// produced. Samples of the previous command that were never drained are
    /// discarded.
    ///
    /// # Errors
    ///
    /// - `ExecutionError::AlreadyRunning` if a previous command is pending
    /// - `Error::InvalidCommand` if the command fails validation
    /// - `ExecutionError::SpawnFailed` if the worker thread cannot start
    pub fn submit(&mut self, command: Command) -> Result<()> {
        if self.worker.is_some() {
            return Err(self.reject(command, ExecutionError::AlreadyRunning.into()));
        }

        if let Err(reason) = self.engine.validate(&command) {
            return Err(self.reject(command, reason));
        }

        let mut state = self
            .state
            .take()
            .unwrap_or_else(|| MotorState::new(self.engine.config(), self.last_position));
        let snapshot = state;

        self.recorder.record(&MotionEvent::Accepted { command });

        let (tx, rx) = mpsc::channel::<i64>();
        self.samples = Some(rx);
        self.stop.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);

        let engine = self.engine;
        let pacing = self.pacing;
        let recorder = Arc::clone(&self.recorder);
        let running = Arc::clone(&self.running);
        let stop = Arc::clone(&self.stop);

        let spawned = thread::Builder::new()
            .name("stepper-sim".into())
            .spawn(move || {
                let mut sink = ChannelSink {
                    tx,
                    stop,
                    sent: 0,
                };
                let mut pacer = Pacer::new(pacing);
                let result = engine.run(&mut state, &command, &mut sink, &mut pacer);

                match &result {
                    Ok(summary) => recorder.record(&MotionEvent::Completed {
                        summary: *summary,
                        acceleration: state.acceleration,
                    }),
                    Err(e) if e.is_cancelled() => recorder.record(&MotionEvent::Cancelled {
                        position: state.position,
                        samples: sink.sent,
                    }),
                    Err(e) => tracing::error!("command failed: {}", e),
                }
                // Cleared last so the outcome is recorded once is_running() is false.
                running.store(false, Ordering::SeqCst);

                (state, result)
            });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to spawn simulator thread: {}", e);
                self.running.store(false, Ordering::SeqCst);
                self.samples = None;
                self.state = Some(snapshot);
                Err(ExecutionError::SpawnFailed.into())
            }
        }
    }

    /// Take every sample buffered so far, in production order.
    ///
    /// Never blocks. While the worker runs, successive calls return
    /// consecutive slices of the trajectory; once everything has been taken
    /// they return an empty trajectory.
    pub fn drain(&mut self) -> Trajectory {
        match &self.samples {
            Some(rx) => rx.try_iter().collect(),
            None => Trajectory::new(),
        }
    }

    /// Wait for the pending command to finish on its own.
    ///
    /// Returns `Ok(None)` if no command is pending. Samples stay drainable
    /// after the join.
    ///
    /// # Errors
    ///
    /// Returns the run's error, e.g. `ExecutionError::Cancelled` if a stop
    /// was requested, or `ExecutionError::WorkerPanicked`.
    pub fn join(&mut self) -> Result<Option<RunSummary>> {
        let Some(handle) = self.worker.take() else {
            return Ok(None);
        };

        let joined = handle.join();
        self.running.store(false, Ordering::SeqCst);

        match joined {
            Ok((state, result)) => {
                self.last_position = state.position;
                self.state = Some(state);
                result.map(Some)
            }
            Err(_) => {
                tracing::error!("simulator thread panicked");
                Err(ExecutionError::WorkerPanicked.into())
            }
        }
    }

    /// Ask the worker to stop at its next sample and wait for it to exit.
    ///
    /// Returns `Ok(None)` if nothing was pending and `Ok(Some(summary))` if
    /// the command finished before seeing the request.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::Cancelled` if the command was truncated. The
    /// samples it emitted remain drainable.
    pub fn cancel_and_join(&mut self) -> Result<Option<RunSummary>> {
        if self.worker.is_none() {
            return Ok(None);
        }
        self.stop.store(true, Ordering::SeqCst);
        self.join()
    }

    /// Move the motor back to the origin.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::AlreadyRunning` while a command is pending.
    pub fn reset(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Err(ExecutionError::AlreadyRunning.into());
        }

        let mut state = self
            .state
            .unwrap_or_else(|| MotorState::new(self.engine.config(), 0));
        state.reset();
        self.state = Some(state);
        self.last_position = 0;
        Ok(())
    }

    /// Submit a command, wait for it, and return its whole trajectory.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit) and [`join`](Self::join).
    pub fn run_to_completion(&mut self, command: Command) -> Result<Trajectory> {
        self.submit(command)?;
        self.join()?;
        Ok(self.drain())
    }

    /// Run the four [`Command::sweep`] commands back to back.
    ///
    /// Positions accumulate from one command to the next.
    ///
    /// # Errors
    ///
    /// Stops at the first command that fails.
    pub fn run_sweep(&mut self, target_distance: i64, target_speed: i64) -> Result<Vec<Trajectory>> {
        Command::sweep(target_distance, target_speed)
            .into_iter()
            .map(|command| self.run_to_completion(command))
            .collect()
    }

    fn reject(&self, command: Command, reason: Error) -> Error {
        self.recorder.record(&MotionEvent::Rejected {
            command,
            reason: reason.clone(),
        });
        reason
    }
}

impl Drop for MotorSimulator {
    fn drop(&mut self) {
        if self.worker.is_some() {
            let _ = self.cancel_and_join();
        }
    }
}

/// Sink feeding the delivery channel, honoring the stop flag.
struct ChannelSink {
    tx: Sender<i64>,
    stop: Arc<AtomicBool>,
    sent: usize,
}

impl SampleSink for ChannelSink {
    fn push(&mut self, position: i64) -> Result<()> {
        if self.stop.load(Ordering::SeqCst) {
            return Err(ExecutionError::Cancelled.into());
        }

        // A dropped receiver means nobody will ever read the rest.
        self.tx
            .send(position)
            .map_err(|_| Error::Execution(ExecutionError::Cancelled))?;
        self.sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::error::CommandError;
    use crate::events::MemoryRecorder;

    fn instant() -> MotorSimulator {
        MotorSimulator::builder()
            .config(&SimulatorConfig::instant())
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_to_completion() {
        let mut motor = instant();
        let trajectory = motor.run_to_completion(Command::new(1000, 100, 0)).unwrap();

        assert_eq!(trajectory.len(), 11);
        assert_eq!(trajectory.last(), Some(1000));
        assert_eq!(motor.position(), 1000);
        assert!(!motor.is_pending());
    }

    #[test]
    fn test_invalid_command() {
        let mut motor = instant();
        let result = motor.submit(Command::new(500, 0, 0));

        assert_eq!(result, Err(Error::InvalidCommand(CommandError::ZeroTargetSpeed)));
        assert!(!motor.is_pending());
        assert!(motor.drain().is_empty());
    }

    #[test]
    fn test_unjoined_submit_rejected() {
        let mut motor = instant();
        motor.submit(Command::new(100, 10, 10)).unwrap();

        // Still pending even if the worker already finished.
        assert_eq!(
            motor.submit(Command::new(100, 10, 10)),
            Err(Error::Execution(ExecutionError::AlreadyRunning))
        );

        motor.join().unwrap();
        assert!(motor.submit(Command::new(100, 10, 10)).is_ok());
        motor.join().unwrap();
        assert_eq!(motor.position(), 200);
    }

    #[test]
    fn test_outcome_recorded_before_running_clears() {
        let recorder = Arc::new(MemoryRecorder::new());
        let mut motor = MotorSimulator::builder()
            .config(&SimulatorConfig::instant())
            .recorder(recorder.clone())
            .build()
            .unwrap();

        motor.submit(Command::new(300, 100, 100)).unwrap();
        while motor.is_running() {
            std::thread::yield_now();
        }

        // No join yet: the worker must already have reported completion.
        let events = recorder.events();
        assert!(matches!(events.last(), Some(MotionEvent::Completed { .. })));
        motor.join().unwrap();
    }

    #[test]
    fn test_join_without_command() {
        let mut motor = instant();
        assert_eq!(motor.join(), Ok(None));
        assert_eq!(motor.cancel_and_join(), Ok(None));
    }

    #[test]
    fn test_reset() {
        let mut motor = instant();
        motor.run_to_completion(Command::new(300, 100, 100)).unwrap();
        assert_eq!(motor.position(), 300);

        motor.reset().unwrap();
        assert_eq!(motor.position(), 0);

        let trajectory = motor.run_to_completion(Command::new(300, 100, 100)).unwrap();
        assert_eq!(trajectory.as_slice(), &[100, 200, 300]);
    }

    #[test]
    fn test_events() {
        let recorder = Arc::new(MemoryRecorder::new());
        let mut motor = MotorSimulator::builder()
            .config(&SimulatorConfig::instant())
            .recorder(recorder.clone())
            .build()
            .unwrap();

        let _ = motor.submit(Command::new(-1, 10, 0));
        motor.run_to_completion(Command::new(1000, 100, 100)).unwrap();

        let events = recorder.events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            MotionEvent::Rejected {
                command: Command::new(-1, 10, 0),
                reason: Error::InvalidCommand(CommandError::NegativeDistance(-1)),
            }
        );
        assert_eq!(
            events[1],
            MotionEvent::Accepted {
                command: Command::new(1000, 100, 100)
            }
        );
        match &events[2] {
            MotionEvent::Completed {
                summary,
                acceleration,
            } => {
                assert_eq!(summary.final_position, 1000);
                assert_eq!(summary.samples(), 10);
                assert_eq!(*acceleration, 100);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events[2].elapsed(), Some(std::time::Duration::from_millis(100)));
    }
}
