//! Motion commands.

use serde::Deserialize;

use crate::error::{CommandError, Result};

use super::regime::Regime;

/// A single motion request for one motor.
///
/// Immutable once submitted. The pair `(initial_speed, target_speed)`
/// selects the [`Regime`] that executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Distance the command should cover.
    pub target_distance: i64,

    /// Cruise speed in distance units per step.
    pub target_speed: i64,

    /// Speed the motor is considered to be moving at when the command arrives.
    #[serde(default)]
    pub initial_speed: i64,
}

impl Command {
    /// Create a new command.
    #[inline]
    pub const fn new(target_distance: i64, target_speed: i64, initial_speed: i64) -> Self {
        Self {
            target_distance,
            target_speed,
            initial_speed,
        }
    }

    /// The four commands issued for one distance/speed pair.
    ///
    /// Initial speeds are `0`, `speed`, `3 * speed / 2` and `speed` again,
    /// exercising Accelerate, Move, ChangeSpeed and Move.
    pub fn sweep(target_distance: i64, target_speed: i64) -> [Command; 4] {
        let faster = target_speed.saturating_mul(3) / 2;
        [0, target_speed, faster, target_speed]
            .map(|initial| Command::new(target_distance, target_speed, initial))
    }

    /// Check the command's own fields.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] wrapped in `Error::InvalidCommand` if the
    /// target speed is not positive or a distance/speed is negative.
    pub fn validate(&self) -> Result<()> {
        if self.target_speed == 0 {
            return Err(CommandError::ZeroTargetSpeed.into());
        }

        if self.target_speed < 0 {
            return Err(CommandError::NegativeTargetSpeed(self.target_speed).into());
        }

        if self.target_distance < 0 {
            return Err(CommandError::NegativeDistance(self.target_distance).into());
        }

        if self.initial_speed < 0 {
            return Err(CommandError::NegativeInitialSpeed(self.initial_speed).into());
        }

        Ok(())
    }

    /// Regime this command executes under.
    #[inline]
    pub fn regime(&self) -> Regime {
        Regime::select(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_valid_command() {
        assert!(Command::new(1000, 100, 0).validate().is_ok());
        assert!(Command::new(0, 1, 0).validate().is_ok());
    }

    #[test]
    fn test_zero_speed_rejected() {
        assert_eq!(
            Command::new(500, 0, 0).validate(),
            Err(Error::InvalidCommand(CommandError::ZeroTargetSpeed))
        );
    }

    #[test]
    fn test_negative_fields_rejected() {
        assert_eq!(
            Command::new(500, -10, 0).validate(),
            Err(Error::InvalidCommand(CommandError::NegativeTargetSpeed(-10)))
        );
        assert_eq!(
            Command::new(-1, 10, 0).validate(),
            Err(Error::InvalidCommand(CommandError::NegativeDistance(-1)))
        );
        assert_eq!(
            Command::new(10, 10, -3).validate(),
            Err(Error::InvalidCommand(CommandError::NegativeInitialSpeed(-3)))
        );
    }

    #[test]
    fn test_sweep() {
        let sweep = Command::sweep(1000, 100);
        let initial: [i64; 4] = sweep.map(|c| c.initial_speed);
        assert_eq!(initial, [0, 100, 150, 100]);
        assert!(sweep.iter().all(|c| c.target_distance == 1000 && c.target_speed == 100));
        assert_eq!(
            sweep.map(|c| c.regime()),
            [Regime::Accelerate, Regime::Move, Regime::ChangeSpeed, Regime::Move]
        );
    }
}
