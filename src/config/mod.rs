//! Configuration module for stepper-sim.
//!
//! Provides types for loading and validating simulator configuration
//! from TOML files (with `std` feature) or pre-built values.

mod execution;
#[cfg(feature = "std")]
mod loader;
mod motion;
mod system;
mod validation;

pub use execution::{ExecutionConfig, Pacing};
pub use motion::MotionConfig;
pub use system::SimulatorConfig;
pub use validation::validate_config;
pub(crate) use validation::validate_motion;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
