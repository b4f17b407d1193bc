use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Time allowed for each participant of a bulk command, in milliseconds.
    /// `None` leaves timing to the gateway.
    target_timeout_ms: Option<u64>,
    /// Maximum number of participants updated at the same time during a bulk command
    fan_out_limit: usize,
    /// Reject unrecognized lock services and directions instead of ignoring them
    strict_commands: bool,
}

impl Config {
    pub fn target_timeout(&self) -> Option<Duration> {
        self.target_timeout_ms.map(Duration::from_millis)
    }

    pub fn fan_out_limit(&self) -> usize {
        self.fan_out_limit.max(1)
    }

    pub fn strict_commands(&self) -> bool {
        self.strict_commands
    }
}

impl Config {
    pub fn target_timeout_mut(&mut self) -> &mut Option<u64> {
        &mut self.target_timeout_ms
    }

    pub fn fan_out_limit_mut(&mut self) -> &mut usize {
        &mut self.fan_out_limit
    }

    pub fn strict_commands_mut(&mut self) -> &mut bool {
        &mut self.strict_commands
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_timeout_ms: Some(10_000),
            fan_out_limit: 8,
            strict_commands: false,
        }
    }
}

impl Config {
    /// Default configuration for local development and writing test
    pub fn development() -> Config {
        Config::default()
    }

    /// Test configuration. Bulk commands run one participant at a time with a short timeout
    pub fn testing() -> Config {
        Config {
            target_timeout_ms: Some(500),
            fan_out_limit: 1,
            ..Default::default()
        }
    }

    /// Loads and return the parsed TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound);
        }
        let config_data = std::fs::read_to_string(path)?;
        Config::from_toml_str(&config_data)
    }

    /// Parse a TOML document. Missing keys take their default value
    pub fn from_toml_str(data: &str) -> Result<Config, Error> {
        let config = toml::from_str(data)?;
        Ok(config)
    }
}
