//! Task configuration
//!
//! Defines the configurable parameters for the save-pipeline task. The
//! backoff between re-invocations is fixed; only the overall timeout the
//! host engine enforces is tunable.

use std::time::Duration;

/// Save-pipeline task configuration
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Total time after which the host engine stops re-invoking the task
    /// and fails the stage
    pub timeout: Duration,
}

impl TaskConfig {
    /// Creates a configuration with the given timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SAVE_PIPELINE_TIMEOUT_MILLIS (optional, default: 30000)
    pub fn from_env() -> anyhow::Result<Self> {
        let timeout = match std::env::var("SAVE_PIPELINE_TIMEOUT_MILLIS") {
            Ok(raw) => {
                let millis = raw.parse::<u64>().map_err(|_| {
                    anyhow::anyhow!("SAVE_PIPELINE_TIMEOUT_MILLIS must be an integer, got `{raw}`")
                })?;
                Duration::from_millis(millis)
            }
            Err(_) => Duration::from_millis(30_000),
        };

        let config = Self { timeout };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }
        Ok(())
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(30_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaskConfig::default();
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = TaskConfig::new(Duration::from_millis(0));
        assert!(config.validate().is_err());

        let config = TaskConfig::new(Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }
}
