//! Motor module for stepper-sim.
//!
//! Provides the per-motor kinematic state and, with `std`, the background
//! simulator that streams a command's samples to the caller.

mod state;

#[cfg(feature = "std")]
mod builder;
#[cfg(feature = "std")]
mod pacing;
#[cfg(feature = "std")]
mod simulator;

pub use state::MotorState;

#[cfg(feature = "std")]
pub use builder::MotorSimulatorBuilder;
#[cfg(feature = "std")]
pub use pacing::Pacer;
#[cfg(feature = "std")]
pub use simulator::MotorSimulator;
