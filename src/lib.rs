//! # stepper-sim
//!
//! Kinematic motion-profile simulator for a single-axis stepper motor.
//!
//! ## Features
//!
//! - **Four regimes**: accelerate, move, change speed and stop, selected from
//!   the command's initial and target speeds
//! - **Streaming**: samples are pushed to a [`SampleSink`] as they are produced
//! - **Background execution**: [`MotorSimulator`] runs commands on a worker
//!   thread and lets the caller drain samples without blocking
//! - **Cooperative cancellation**: a stop request is honored between samples
//! - **Injected event recording**: lifecycle events go to an [`EventRecorder`]
//! - **no_std compatible engine**: pacing through embedded-hal's `DelayNs`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_sim::{Command, MotorSimulator, SimulatorConfig};
//!
//! let config = stepper_sim::load_config("simulator.toml")?;
//! let mut motor = MotorSimulator::builder().config(&config).build()?;
//!
//! motor.submit(Command::new(1000, 100, 0))?;
//! let so_far = motor.drain();
//! motor.join()?;
//! let rest = motor.drain();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): background simulator, TOML loading, in-memory recorder
//! - `alloc`: [`Trajectory`] and allocation-backed sinks without std
//! - `defmt`: `defmt::Format` for commands, regimes and run summaries

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod events;
pub mod motion;
pub mod motor;
#[cfg(feature = "alloc")]
pub mod trajectory;

// Re-exports for ergonomic API
pub use config::{validate_config, ExecutionConfig, MotionConfig, Pacing, SimulatorConfig};
pub use error::{Error, Result};
pub use events::{EventRecorder, MotionEvent, NullRecorder, TracingRecorder};
pub use motion::{Command, MotionEngine, MotionPhase, Regime, RunSummary, SampleSink};
pub use motor::MotorState;

#[cfg(feature = "alloc")]
pub use trajectory::Trajectory;

// Background execution (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
#[cfg(feature = "std")]
pub use events::MemoryRecorder;
#[cfg(feature = "std")]
pub use motor::{MotorSimulator, MotorSimulatorBuilder, Pacer};
