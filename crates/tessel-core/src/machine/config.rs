//! Machine configuration

use crate::error::{Error, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// What happens when a thread stands on a coordinate outside the program grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// The thread is killed (with a warning) and pruned at the end of the cycle
    #[default]
    Halt,
    /// Coordinates wrap around the grid edges
    Wrap,
    /// The step fails with [`Error::OutOfBounds`]
    Fault,
}

impl FromStr for EdgePolicy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(EdgePolicy::Halt),
            "wrap" => Ok(EdgePolicy::Wrap),
            "fault" => Ok(EdgePolicy::Fault),
            other => Err(Error::invalid_config(format!(
                "unknown edge policy '{other}' (expected halt, wrap or fault)"
            ))),
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgePolicy::Halt => "halt",
            EdgePolicy::Wrap => "wrap",
            EdgePolicy::Fault => "fault",
        };
        f.write_str(name)
    }
}

/// Configuration applied on every [`Machine::reset`](super::Machine::reset)
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Initial contents of the input stream
    pub input: String,

    /// Cycle ceiling used by [`Machine::run_bounded`](super::Machine::run_bounded)
    pub max_cycles: Option<u64>,

    /// Behaviour for threads outside the program grid
    pub edge_policy: EdgePolicy,
}

impl MachineConfig {
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    /// Build a configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `TESSEL_INPUT` - Initial input stream
    /// - `TESSEL_MAX_CYCLES` - Cycle ceiling for bounded runs
    /// - `TESSEL_EDGE_POLICY` - `halt` (default), `wrap` or `fault`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(input) = env::var("TESSEL_INPUT") {
            config.input = input;
        }

        if let Ok(max_cycles) = env::var("TESSEL_MAX_CYCLES") {
            let parsed = max_cycles
                .trim()
                .parse::<u64>()
                .map_err(|err| Error::invalid_config(format!("TESSEL_MAX_CYCLES: {err}")))?;
            config.max_cycles = Some(parsed);
        }

        if let Ok(policy) = env::var("TESSEL_EDGE_POLICY") {
            config.edge_policy = policy.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn reset_env() {
        for key in ["TESSEL_INPUT", "TESSEL_MAX_CYCLES", "TESSEL_EDGE_POLICY"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults() {
        let config = MachineConfig::default();
        assert!(config.input.is_empty());
        assert_eq!(config.max_cycles, None);
        assert_eq!(config.edge_policy, EdgePolicy::Halt);
    }

    #[test]
    fn test_edge_policy_parsing() {
        assert_eq!("Wrap".parse::<EdgePolicy>().unwrap(), EdgePolicy::Wrap);
        assert_eq!(" fault ".parse::<EdgePolicy>().unwrap(), EdgePolicy::Fault);
        assert!(matches!("sideways".parse::<EdgePolicy>(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        reset_env();
        env::set_var("TESSEL_INPUT", "42 x");
        env::set_var("TESSEL_MAX_CYCLES", "500");
        env::set_var("TESSEL_EDGE_POLICY", "wrap");

        let config = MachineConfig::from_env().unwrap();
        assert_eq!(config.input, "42 x");
        assert_eq!(config.max_cycles, Some(500));
        assert_eq!(config.edge_policy, EdgePolicy::Wrap);
        reset_env();
    }

    #[test]
    fn test_from_env_rejects_bad_ceiling() {
        let _guard = ENV_LOCK.lock().unwrap();
        reset_env();
        env::set_var("TESSEL_MAX_CYCLES", "lots");
        assert!(MachineConfig::from_env().is_err());
        reset_env();
    }

    #[test]
    fn test_serde_defaults_missing_fields() {
        let config: MachineConfig = serde_json::from_str(r#"{"edge_policy":"fault"}"#).unwrap();
        assert_eq!(config.edge_policy, EdgePolicy::Fault);
        assert!(config.input.is_empty());
    }
}
