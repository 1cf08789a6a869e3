//! Kinematic motor state.

use crate::config::MotionConfig;

/// Mutable state of one simulated motor.
///
/// Owned by whichever computation is running. The simulator moves it into
/// its worker for the duration of a command and takes it back on join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    /// Absolute position; accumulates across commands.
    pub position: i64,
    /// Speed applied to the next ramp sample.
    pub current_speed: i64,
    /// Speed the running ramp converges on.
    pub target_speed: i64,
    /// Speed gained per ramp tick.
    pub acceleration: i64,
    /// Speed lost per ramp tick.
    pub deceleration: i64,
}

impl MotorState {
    /// Create a motor at rest at `position`.
    pub fn new(config: &MotionConfig, position: i64) -> Self {
        Self {
            position,
            current_speed: 0,
            target_speed: 0,
            acceleration: config.acceleration,
            deceleration: config.deceleration,
        }
    }

    /// Reset speeds for a new command. Position is kept.
    #[inline]
    pub fn begin(&mut self, entry_speed: i64, target_speed: i64) {
        self.current_speed = entry_speed;
        self.target_speed = target_speed;
    }

    /// Return to rest at the origin.
    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
        self.current_speed = 0;
        self.target_speed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_keeps_position() {
        let mut state = MotorState::new(&MotionConfig::default(), 700);
        state.begin(300, 100);

        assert_eq!(state.position, 700);
        assert_eq!(state.current_speed, 300);
        assert_eq!(state.target_speed, 100);
        assert_eq!(state.acceleration, 100);
    }

    #[test]
    fn test_reset() {
        let mut state = MotorState::new(&MotionConfig::with_rate(40), 700);
        state.begin(300, 100);
        state.reset();

        assert_eq!(state.position, 0);
        assert_eq!(state.current_speed, 0);
        assert_eq!(state.deceleration, 40);
    }
}
