//! Motion regimes and phases.

use super::command::Command;

/// Shape of the motion a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Regime {
    /// Ramp up from rest, cruise, land on the target.
    Accelerate,
    /// Cruise at the target speed for the full distance.
    Move,
    /// Ramp down from the ChangeSpeed entry speed, cruise at the lower speed.
    ChangeSpeed,
    /// Ramp down from the Stop entry speed to rest, then land on the target.
    Stop,
}

impl Regime {
    /// Select the regime for a command.
    ///
    /// Any nonzero initial speed below the target selects [`Regime::Stop`],
    /// not an acceleration to the new target.
    pub fn select(command: &Command) -> Self {
        let initial = command.initial_speed;
        let target = command.target_speed;

        if initial == 0 {
            Regime::Accelerate
        } else if initial == target {
            Regime::Move
        } else if initial > target {
            Regime::ChangeSpeed
        } else {
            Regime::Stop
        }
    }

    /// Whether this regime starts with a ramp phase.
    #[inline]
    pub fn has_ramp(self) -> bool {
        !matches!(self, Regime::Move)
    }

    /// Whether this regime has a cruise phase.
    #[inline]
    pub fn has_cruise(self) -> bool {
        !matches!(self, Regime::Stop)
    }

    /// Regime name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            Regime::Accelerate => "accelerate",
            Regime::Move => "move",
            Regime::ChangeSpeed => "change_speed",
            Regime::Stop => "stop",
        }
    }
}

/// Phase of a regime that produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Speed changes every tick.
    Ramp,
    /// Constant speed.
    Cruise,
    /// Final partial step onto the target.
    Remainder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        assert_eq!(Regime::select(&Command::new(1000, 100, 0)), Regime::Accelerate);
        assert_eq!(Regime::select(&Command::new(1000, 100, 100)), Regime::Move);
        assert_eq!(Regime::select(&Command::new(1000, 100, 150)), Regime::ChangeSpeed);
    }

    #[test]
    fn test_slower_initial_speed_selects_stop() {
        // Literal routing: a nonzero initial speed below the target stops the
        // motor instead of accelerating it to the new target.
        assert_eq!(Regime::select(&Command::new(1000, 100, 50)), Regime::Stop);
    }

    #[test]
    fn test_phases() {
        assert!(!Regime::Move.has_ramp());
        assert!(Regime::Stop.has_ramp());
        assert!(!Regime::Stop.has_cruise());
        assert!(Regime::ChangeSpeed.has_cruise());
    }
}
