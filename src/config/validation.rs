//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotionConfig, SimulatorConfig};

/// Validate a simulator configuration.
///
/// Checks:
/// - Acceleration and deceleration are positive (ramps must terminate)
/// - Ramp entry speeds are non-negative
/// - Speed limit is positive
pub fn validate_config(config: &SimulatorConfig) -> Result<()> {
    validate_motion(&config.motion)
}

pub(crate) fn validate_motion(config: &MotionConfig) -> Result<()> {
    if config.acceleration <= 0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration(
            config.acceleration,
        )));
    }

    if config.deceleration <= 0 {
        return Err(Error::Config(ConfigError::InvalidDeceleration(
            config.deceleration,
        )));
    }

    for entry in [config.change_speed_entry_speed, config.stop_entry_speed] {
        if entry < 0 {
            return Err(Error::Config(ConfigError::InvalidEntrySpeed(entry)));
        }
    }

    if config.max_speed <= 0 {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(config.max_speed)));
    }

    Ok(())
}
