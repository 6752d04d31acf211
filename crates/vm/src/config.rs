//! Configuration system for the ladder-logic interpreter.
//!
//! This module defines all configuration structures used to parameterize
//! the interpreter. It provides:
//! 1. **Defaults:** Baseline constants (bank capacities, program size, cycle period, step bound).
//! 2. **Structures:** Hierarchical config for general execution and memory sizing.
//! 3. **Loading:** JSON deserialization from a file, with validation.
//!
//! The CLI uses `Config::default()` unless a JSON file is passed with `--config`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the interpreter.
///
/// These values define the baseline configuration when not explicitly
/// overridden in a JSON configuration file.
mod defaults {
    use crate::common::constants;

    /// Cycle period in microseconds (10 ms, the LDmicro default).
    pub const CYCLE_PERIOD_US: u64 = constants::DEFAULT_CYCLE_PERIOD_US;

    /// Maximum instructions executed per cycle before the cycle is declared broken.
    pub const STEP_LIMIT: u64 = constants::DEFAULT_STEP_LIMIT;

    /// Relay bank size.
    pub const RELAY_CAPACITY: usize = constants::DEFAULT_RELAY_CAPACITY;

    /// Integer bank size.
    pub const INTEGER_CAPACITY: usize = constants::DEFAULT_INTEGER_CAPACITY;

    /// Program store size.
    pub const MAX_OPS: usize = constants::DEFAULT_MAX_OPS;
}

/// Root configuration structure containing all interpreter settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use ldvm_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.cycle_period_us, 10_000);
/// assert_eq!(config.memory.relay_capacity, 128);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use ldvm_core::config::Config;
///
/// let json = r#"{
///     "general": { "step_limit": 5000, "trace_instructions": true },
///     "memory": { "integer_capacity": 256 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.step_limit, 5000);
/// assert_eq!(config.general.cycle_period_us, 10_000);
/// assert_eq!(config.memory.integer_capacity, 256);
/// assert_eq!(config.memory.relay_capacity, 128);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General execution settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Bank and program store sizing
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for zero-sized banks, program store, period, or step bound.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Config::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that every size and bound is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.cycle_period_us == 0 {
            return Err(ConfigError::Invalid("general.cycle_period_us must be > 0".into()));
        }
        if self.general.step_limit == 0 {
            return Err(ConfigError::Invalid("general.step_limit must be > 0".into()));
        }
        if self.memory.relay_capacity == 0 || self.memory.integer_capacity == 0 {
            return Err(ConfigError::Invalid("bank capacities must be > 0".into()));
        }
        // Jump targets are 16-bit, so a longer store could never be fully addressed.
        if self.memory.max_ops == 0 || self.memory.max_ops > usize::from(u16::MAX) + 1 {
            return Err(ConfigError::Invalid(
                "memory.max_ops must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

/// General execution settings.
///
/// Contains the compiled cycle period, the per-cycle step bound, and
/// diagnostic switches.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Cycle period in microseconds. Programs declaring a different `$$cycle` are rejected.
    #[serde(default = "GeneralConfig::default_cycle_period_us")]
    pub cycle_period_us: u64,

    /// Maximum instructions a single cycle may execute before it is treated as a fatal hang.
    #[serde(default = "GeneralConfig::default_step_limit")]
    pub step_limit: u64,

    /// Log every executed instruction at trace level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Print the program listing after loading.
    #[serde(default)]
    pub disassemble_on_load: bool,
}

impl GeneralConfig {
    /// Returns the default cycle period.
    const fn default_cycle_period_us() -> u64 {
        defaults::CYCLE_PERIOD_US
    }

    /// Returns the default step bound.
    const fn default_step_limit() -> u64 {
        defaults::STEP_LIMIT
    }

    /// Returns the cycle period as a [`Duration`].
    pub const fn cycle_period(&self) -> Duration {
        Duration::from_micros(self.cycle_period_us)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cycle_period_us: defaults::CYCLE_PERIOD_US,
            step_limit: defaults::STEP_LIMIT,
            trace_instructions: false,
            disassemble_on_load: false,
        }
    }
}

/// Bank and program store sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of relay cells
    #[serde(default = "MemoryConfig::default_relay_capacity")]
    pub relay_capacity: usize,

    /// Number of integer cells
    #[serde(default = "MemoryConfig::default_integer_capacity")]
    pub integer_capacity: usize,

    /// Maximum number of instruction records
    #[serde(default = "MemoryConfig::default_max_ops")]
    pub max_ops: usize,
}

impl MemoryConfig {
    /// Returns the default relay bank size.
    const fn default_relay_capacity() -> usize {
        defaults::RELAY_CAPACITY
    }

    /// Returns the default integer bank size.
    const fn default_integer_capacity() -> usize {
        defaults::INTEGER_CAPACITY
    }

    /// Returns the default program store size.
    const fn default_max_ops() -> usize {
        defaults::MAX_OPS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            relay_capacity: defaults::RELAY_CAPACITY,
            integer_capacity: defaults::INTEGER_CAPACITY,
            max_ops: defaults::MAX_OPS,
        }
    }
}
