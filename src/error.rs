//! Error types for stepper-sim.
//!
//! Provides unified error handling across configuration, command validation,
//! and background execution.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-sim operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command rejected before any sample was produced
    InvalidCommand(CommandError),
    /// Background execution error
    Execution(ExecutionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Acceleration must be > 0
    InvalidAcceleration(i64),
    /// Deceleration must be > 0
    InvalidDeceleration(i64),
    /// Ramp entry speed must be >= 0
    InvalidEntrySpeed(i64),
    /// Speed limit must be > 0
    InvalidMaxSpeed(i64),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Reasons a command is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Target speed of zero (cruise step count would divide by zero)
    ZeroTargetSpeed,
    /// Target speed below zero
    NegativeTargetSpeed(i64),
    /// Target distance below zero
    NegativeDistance(i64),
    /// Initial speed below zero
    NegativeInitialSpeed(i64),
    /// Requested speed exceeds the configured limit
    SpeedExceedsLimit {
        /// Requested speed
        requested: i64,
        /// Maximum allowed speed
        max: i64,
    },
}

/// Errors raised while a command executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionError {
    /// A previous command has not been joined yet
    AlreadyRunning,
    /// Cooperative stop was honored; emitted samples remain valid
    Cancelled,
    /// Position arithmetic overflowed
    Overflow,
    /// Fixed-capacity sample buffer is full
    BufferFull,
    /// Background thread could not be started
    SpawnFailed,
    /// Background thread panicked
    WorkerPanicked,
}

impl Error {
    /// Check whether this is a cooperative cancellation.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Execution(ExecutionError::Cancelled))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::InvalidCommand(e) => write!(f, "Invalid command: {}", e),
            Error::Execution(e) => write!(f, "Execution error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidAcceleration(v) => write!(f, "Invalid acceleration: {}. Must be > 0", v),
            ConfigError::InvalidDeceleration(v) => write!(f, "Invalid deceleration: {}. Must be > 0", v),
            ConfigError::InvalidEntrySpeed(v) => write!(f, "Invalid ramp entry speed: {}. Must be >= 0", v),
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::ZeroTargetSpeed => write!(f, "target speed must be > 0"),
            CommandError::NegativeTargetSpeed(v) => write!(f, "target speed {} is negative", v),
            CommandError::NegativeDistance(v) => write!(f, "target distance {} is negative", v),
            CommandError::NegativeInitialSpeed(v) => write!(f, "initial speed {} is negative", v),
            CommandError::SpeedExceedsLimit { requested, max } => {
                write!(f, "speed {} exceeds maximum {}", requested, max)
            }
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::AlreadyRunning => write!(f, "a command is already running"),
            ExecutionError::Cancelled => write!(f, "command cancelled"),
            ExecutionError::Overflow => write!(f, "position arithmetic overflow"),
            ExecutionError::BufferFull => write!(f, "sample buffer is full"),
            ExecutionError::SpawnFailed => write!(f, "failed to spawn background thread"),
            ExecutionError::WorkerPanicked => write!(f, "background thread panicked"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::InvalidCommand(e)
    }
}

impl From<ExecutionError> for Error {
    fn from(e: ExecutionError) -> Self {
        Error::Execution(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(feature = "std")]
impl std::error::Error for ExecutionError {}
