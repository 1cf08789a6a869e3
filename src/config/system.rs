//! Simulator configuration - root configuration structure.

use serde::Deserialize;

use super::execution::ExecutionConfig;
use super::motion::MotionConfig;

/// Root configuration structure from TOML.
///
/// Every table is optional; missing tables and fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Kinematic constants.
    pub motion: MotionConfig,

    /// Background execution options.
    pub execution: ExecutionConfig,
}

impl SimulatorConfig {
    /// Configuration that skips real-time waits.
    pub fn instant() -> Self {
        let mut config = Self::default();
        config.execution.pacing = super::Pacing::Instant;
        config
    }
}
