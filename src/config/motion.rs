//! Motion constants from TOML.

use serde::Deserialize;

/// Kinematic constants shared by every regime.
///
/// All rates are in distance units per ramp tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Speed gained per ramp tick while accelerating.
    pub acceleration: i64,

    /// Speed lost per ramp tick while decelerating.
    pub deceleration: i64,

    /// Real-time length of one ramp tick in milliseconds.
    pub ramp_tick_ms: u32,

    /// Speed at which the ChangeSpeed ramp starts.
    pub change_speed_entry_speed: i64,

    /// Speed at which the Stop ramp starts.
    pub stop_entry_speed: i64,

    /// Largest accepted command speed.
    pub max_speed: i64,
}

impl MotionConfig {
    /// Default acceleration and deceleration rate.
    pub const DEFAULT_RATE: i64 = 100;

    /// Default ramp tick length.
    pub const DEFAULT_RAMP_TICK_MS: u32 = 10;

    /// Create a config with symmetric rates and default everything else.
    pub fn with_rate(rate: i64) -> Self {
        Self {
            acceleration: rate,
            deceleration: rate,
            ..Self::default()
        }
    }

    /// Ramp tick length in nanoseconds.
    #[inline]
    pub fn ramp_tick_ns(&self) -> u64 {
        u64::from(self.ramp_tick_ms) * 1_000_000
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            acceleration: Self::DEFAULT_RATE,
            deceleration: Self::DEFAULT_RATE,
            ramp_tick_ms: Self::DEFAULT_RAMP_TICK_MS,
            change_speed_entry_speed: 300,
            stop_entry_speed: 200,
            max_speed: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotionConfig::default();
        assert_eq!(config.acceleration, 100);
        assert_eq!(config.deceleration, 100);
        assert_eq!(config.ramp_tick_ns(), 10_000_000);
        assert_eq!(config.change_speed_entry_speed, 300);
        assert_eq!(config.stop_entry_speed, 200);
    }

    #[test]
    fn test_with_rate() {
        let config = MotionConfig::with_rate(50);
        assert_eq!(config.acceleration, 50);
        assert_eq!(config.deceleration, 50);
        assert_eq!(config.ramp_tick_ms, 10);
    }
}
