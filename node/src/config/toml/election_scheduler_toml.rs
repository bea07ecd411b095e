use crate::consensus::{ElectionSchedulerConfig, ShutdownMode};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct ElectionSchedulerToml {
    pub shutdown_mode: Option<ShutdownMode>,
}

impl Default for ElectionSchedulerToml {
    fn default() -> Self {
        let config = ElectionSchedulerConfig::default();
        (&config).into()
    }
}

impl From<&ElectionSchedulerToml> for ElectionSchedulerConfig {
    fn from(toml: &ElectionSchedulerToml) -> Self {
        let mut config = ElectionSchedulerConfig::default();

        if let Some(shutdown_mode) = toml.shutdown_mode {
            config.shutdown_mode = shutdown_mode;
        }
        config
    }
}

impl From<&ElectionSchedulerConfig> for ElectionSchedulerToml {
    fn from(config: &ElectionSchedulerConfig) -> Self {
        Self {
            shutdown_mode: Some(config.shutdown_mode),
        }
    }
}
