//! Execution options from TOML.

use serde::Deserialize;

/// How the engine's ramp and cruise waits are honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pacing {
    /// Block the worker for each simulated interval.
    #[default]
    Realtime,
    /// Skip the waits and produce samples as fast as possible.
    Instant,
}

/// Background execution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExecutionConfig {
    /// Pacing of the background worker.
    pub pacing: Pacing,

    /// Position the motor starts from.
    pub initial_position: i64,
}
