//! Motion module for stepper-sim.
//!
//! Provides command validation, regime selection, and the motion profile
//! engine that expands a command into position samples.

mod command;
mod engine;
mod regime;
mod sink;

pub use command::Command;
pub use engine::{MotionEngine, RunSummary};
pub use regime::{MotionPhase, Regime};
pub use sink::SampleSink;
