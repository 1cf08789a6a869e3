//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SimulatorConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_sim::load_config;
///
/// let config = load_config("simulator.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulatorConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SimulatorConfig> {
    let config: SimulatorConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Copy as much of `msg` as fits, cutting on a char boundary.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, SimulatorConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[motion]
acceleration = 50
deceleration = 25
ramp_tick_ms = 5
change_speed_entry_speed = 400
stop_entry_speed = 150
max_speed = 5000

[execution]
pacing = "instant"
initial_position = 120
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motion.acceleration, 50);
        assert_eq!(config.motion.deceleration, 25);
        assert_eq!(config.motion.ramp_tick_ms, 5);
        assert_eq!(config.motion.change_speed_entry_speed, 400);
        assert_eq!(config.motion.stop_entry_speed, 150);
        assert_eq!(config.motion.max_speed, 5000);
        assert_eq!(config.execution.pacing, Pacing::Instant);
        assert_eq!(config.execution.initial_position, 120);
    }

    #[test]
    fn test_parse_partial_motion_table() {
        let toml = r#"
[motion]
acceleration = 200
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motion.acceleration, 200);
        assert_eq!(config.motion.deceleration, 100);
        assert_eq!(config.execution.pacing, Pacing::Realtime);
    }

    #[test]
    fn test_parse_rejects_invalid_rate() {
        let toml = r#"
[motion]
deceleration = 0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidDeceleration(0)))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let result = parse_config("[motion\nacceleration = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/stepper-sim.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_truncated_long_message() {
        let long = "x".repeat(300);
        assert_eq!(truncated(&long).len(), 128);
    }
}
