/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed application configuration
[POS]:    Configuration layer - run setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use screenflow_core::MachineConfig;
use serde::{Deserialize, Serialize};

use crate::script::ScriptStep;

/// Top-level configuration for the example application
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Worker threads executing background downloads
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Dispatch loop poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Delay between simulated download progress steps, in milliseconds
    #[serde(default = "default_step_delay_ms")]
    pub download_step_ms: u64,
    /// Scripted demo events; the built-in tour runs when empty
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            poll_interval_ms: default_poll_interval_ms(),
            download_step_ms: default_step_delay_ms(),
            script: Vec::new(),
        }
    }
}

fn default_workers() -> usize {
    1
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_step_delay_ms() -> u64 {
    1000
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn download_step_delay(&self) -> Duration {
        Duration::from_millis(self.download_step_ms)
    }

    pub fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            poll_interval: self.poll_interval(),
            workers: self.workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.workers, 1);
        assert_eq!(config.poll_interval(), Duration::from_millis(200));
        assert_eq!(config.download_step_delay(), Duration::from_millis(1000));
        assert!(config.script.is_empty());
    }

    #[test]
    fn test_yaml_overrides_and_defaults() {
        let yaml = r#"
workers: 3
script:
  - target: initial
    event: "-go_to_state_a-"
    wait_ms: 10
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(config.workers, 3);
        // unspecified fields fall back to defaults
        assert_eq!(config.poll_interval_ms, 200);
        assert_eq!(config.script.len(), 1);
        assert_eq!(config.script[0].target, "initial");
        assert_eq!(config.script[0].wait_ms, 10);

        let machine = config.machine_config();
        assert_eq!(machine.workers, 3);
    }
}
