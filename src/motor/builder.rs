//! Builder pattern for MotorSimulator.

use std::sync::Arc;

use crate::config::{validate_motion, MotionConfig, Pacing, SimulatorConfig};
use crate::error::Result;
use crate::events::{EventRecorder, TracingRecorder};
use crate::motion::MotionEngine;

use super::simulator::MotorSimulator;

/// Builder for creating MotorSimulator instances.
pub struct MotorSimulatorBuilder {
    motion: MotionConfig,
    pacing: Pacing,
    initial_position: i64,
    recorder: Option<Arc<dyn EventRecorder>>,
}

impl Default for MotorSimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorSimulatorBuilder {
    /// Create a new builder with default constants and real-time pacing.
    pub fn new() -> Self {
        Self {
            motion: MotionConfig::default(),
            pacing: Pacing::default(),
            initial_position: 0,
            recorder: None,
        }
    }

    /// Configure from a SimulatorConfig.
    pub fn config(mut self, config: &SimulatorConfig) -> Self {
        self.motion = config.motion;
        self.pacing = config.execution.pacing;
        self.initial_position = config.execution.initial_position;
        self
    }

    /// Set the motion constants.
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set the acceleration rate.
    pub fn acceleration(mut self, acceleration: i64) -> Self {
        self.motion.acceleration = acceleration;
        self
    }

    /// Set the deceleration rate.
    pub fn deceleration(mut self, deceleration: i64) -> Self {
        self.motion.deceleration = deceleration;
        self
    }

    /// Set the pacing mode.
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the starting position.
    pub fn initial_position(mut self, position: i64) -> Self {
        self.initial_position = position;
        self
    }

    /// Set the lifecycle event recorder.
    ///
    /// Defaults to [`TracingRecorder`].
    pub fn recorder(mut self, recorder: Arc<dyn EventRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Build the MotorSimulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the motion constants are invalid.
    pub fn build(self) -> Result<MotorSimulator> {
        validate_motion(&self.motion)?;

        let recorder = self
            .recorder
            .unwrap_or_else(|| Arc::new(TracingRecorder));

        Ok(MotorSimulator::new(
            MotionEngine::new(self.motion),
            self.pacing,
            recorder,
            self.initial_position,
        ))
    }
}
