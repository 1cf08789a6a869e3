//! Motion profile engine.
//!
//! Expands a [`Command`] into position samples. Every regime runs the same
//! three phases: a ramp where speed changes once per tick, a cruise at the
//! target speed, and a remainder step that lands on the target. The regime
//! only decides the ramp's entry speed and direction and whether the cruise
//! phase runs at all.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::config::{validate_motion, MotionConfig};
use crate::error::{CommandError, ExecutionError, Result};
use crate::motor::MotorState;

use super::command::Command;
use super::regime::{MotionPhase, Regime};
use super::sink::SampleSink;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Outcome of one completed engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Regime that executed.
    pub regime: Regime,

    /// Samples produced while the speed was changing.
    pub ramp_samples: usize,

    /// Full steps produced at the target speed.
    pub cruise_samples: usize,

    /// Length of the final partial step, if one was produced.
    pub remainder: Option<i64>,

    /// Position after the last sample.
    pub final_position: i64,

    /// Simulated time spent waiting between samples, in nanoseconds.
    pub elapsed_ns: u64,
}

impl RunSummary {
    fn new(regime: Regime, position: i64) -> Self {
        Self {
            regime,
            ramp_samples: 0,
            cruise_samples: 0,
            remainder: None,
            final_position: position,
            elapsed_ns: 0,
        }
    }

    /// Total number of samples produced.
    #[inline]
    pub fn samples(&self) -> usize {
        self.ramp_samples + self.cruise_samples + usize::from(self.remainder.is_some())
    }

    /// Simulated elapsed time.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }
}

/// Deterministic motion profile engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionEngine {
    config: MotionConfig,
}

impl MotionEngine {
    /// Create an engine with the given constants.
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    /// Get the motion constants.
    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Check the motion constants, then the command against its own
    /// invariants and the speed limit.
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the constants would never finish a ramp
    /// - `Error::InvalidCommand` describing the first command violation
    pub fn validate(&self, command: &Command) -> Result<()> {
        validate_motion(&self.config)?;
        command.validate()?;

        let max = self.config.max_speed;
        for requested in [command.target_speed, command.initial_speed] {
            if requested > max {
                return Err(CommandError::SpeedExceedsLimit { requested, max }.into());
            }
        }

        Ok(())
    }

    /// Run a command to completion, pushing each sample into `sink`.
    ///
    /// The motor's speeds are reset for the command; its position carries
    /// over from previous runs. `delay` is asked to wait one ramp tick after
    /// each ramp sample and `1 / target_speed` seconds after each cruise
    /// sample.
    ///
    /// # Errors
    ///
    /// - `Error::Config` or `Error::InvalidCommand` before any sample is
    ///   produced
    /// - any error returned by the sink, which stops the run
    /// - `ExecutionError::Overflow` if the position leaves the `i64` range
    pub fn run<S, D>(
        &self,
        state: &mut MotorState,
        command: &Command,
        sink: &mut S,
        delay: &mut D,
    ) -> Result<RunSummary>
    where
        S: SampleSink + ?Sized,
        D: DelayNs + ?Sized,
    {
        self.validate(command)?;

        let regime = Regime::select(command);
        let mut run = Run {
            summary: RunSummary::new(regime, state.position),
            state,
            sink,
            delay,
            tick_ns: self.config.ramp_tick_ns(),
        };

        let speed = command.target_speed;
        let (entry, target) = match regime {
            Regime::Accelerate => (0, speed),
            Regime::Move => (speed, speed),
            Regime::ChangeSpeed => (self.config.change_speed_entry_speed, speed),
            Regime::Stop => (self.config.stop_entry_speed, 0),
        };
        run.state.begin(entry, target);

        if regime.has_ramp() {
            // Only Accelerate speeds up; a slow ChangeSpeed entry skips its ramp.
            match regime {
                Regime::Accelerate => run.ramp_up()?,
                _ => run.ramp_down()?,
            }
        }

        if regime.has_cruise() {
            match regime {
                // Move covers its distance from wherever the motor stands.
                Regime::Move => run.cruise(command.target_distance, speed)?,
                _ => run.cruise_to(command.target_distance, speed)?,
            }
        } else {
            run.state.current_speed = 0;
            let remaining = command.target_distance.saturating_sub(run.state.position);
            run.land(remaining)?;
        }

        run.summary.final_position = run.state.position;
        Ok(run.summary)
    }

    /// Compute the full trajectory of a command without pacing.
    #[cfg(feature = "alloc")]
    pub fn trajectory(
        &self,
        state: &mut MotorState,
        command: &Command,
    ) -> Result<crate::trajectory::Trajectory> {
        let mut trajectory = crate::trajectory::Trajectory::new();
        self.run(state, command, &mut trajectory, &mut Unpaced)?;
        Ok(trajectory)
    }
}

/// Delay provider that returns immediately.
#[cfg(feature = "alloc")]
struct Unpaced;

#[cfg(feature = "alloc")]
impl DelayNs for Unpaced {
    #[inline]
    fn delay_ns(&mut self, _ns: u32) {}
}

/// State of one command while it executes.
struct Run<'a, S: ?Sized, D: ?Sized> {
    state: &'a mut MotorState,
    sink: &'a mut S,
    delay: &'a mut D,
    tick_ns: u64,
    summary: RunSummary,
}

impl<S, D> Run<'_, S, D>
where
    S: SampleSink + ?Sized,
    D: DelayNs + ?Sized,
{
    fn ramp_up(&mut self) -> Result<()> {
        while self.state.current_speed < self.state.target_speed {
            self.advance(self.state.current_speed, MotionPhase::Ramp)?;
            self.state.current_speed = self.state.current_speed.saturating_add(self.state.acceleration);
            self.wait_ns(self.tick_ns);
        }
        Ok(())
    }

    fn ramp_down(&mut self) -> Result<()> {
        while self.state.current_speed > self.state.target_speed {
            self.advance(self.state.current_speed, MotionPhase::Ramp)?;
            self.state.current_speed = self.state.current_speed.saturating_sub(self.state.deceleration);
            self.wait_ns(self.tick_ns);
        }
        Ok(())
    }

    /// Cruise from the current position toward an absolute target.
    fn cruise_to(&mut self, target: i64, speed: i64) -> Result<()> {
        let remaining = target.saturating_sub(self.state.position);
        self.cruise(remaining, speed)
    }

    /// Cover `distance` in full steps of `speed`, then the leftover.
    fn cruise(&mut self, distance: i64, speed: i64) -> Result<()> {
        // A target already behind the motor is not driven back to.
        let distance = distance.max(0);
        let interval_ns = NANOS_PER_SEC / speed.unsigned_abs();

        self.state.current_speed = speed;
        for _ in 0..distance / speed {
            self.advance(speed, MotionPhase::Cruise)?;
            self.wait_ns(interval_ns);
        }

        self.land(distance % speed)
    }

    fn land(&mut self, leftover: i64) -> Result<()> {
        if leftover > 0 {
            self.advance(leftover, MotionPhase::Remainder)?;
            self.summary.remainder = Some(leftover);
        }
        Ok(())
    }

    fn advance(&mut self, delta: i64, phase: MotionPhase) -> Result<()> {
        let next = self
            .state
            .position
            .checked_add(delta)
            .ok_or(ExecutionError::Overflow)?;

        self.sink.push(next)?;
        self.state.position = next;

        match phase {
            MotionPhase::Ramp => self.summary.ramp_samples += 1,
            MotionPhase::Cruise => self.summary.cruise_samples += 1,
            MotionPhase::Remainder => {}
        }
        Ok(())
    }

    fn wait_ns(&mut self, ns: u64) {
        let mut left = ns;
        while left > 0 {
            let chunk = left.min(u64::from(u32::MAX)) as u32;
            self.delay.delay_ns(chunk);
            left -= u64::from(chunk);
        }
        self.summary.elapsed_ns = self.summary.elapsed_ns.saturating_add(ns);
    }
}
