use crate::consensus::ActiveElectionsConfig;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct ActiveElectionsToml {
    pub max_blocks_per_election: Option<usize>,
}

impl Default for ActiveElectionsToml {
    fn default() -> Self {
        let config = ActiveElectionsConfig::default();
        (&config).into()
    }
}

impl From<&ActiveElectionsToml> for ActiveElectionsConfig {
    fn from(toml: &ActiveElectionsToml) -> Self {
        let mut config = ActiveElectionsConfig::default();

        if let Some(max_blocks) = toml.max_blocks_per_election {
            config.max_blocks_per_election = max_blocks;
        }
        config
    }
}

impl From<&ActiveElectionsConfig> for ActiveElectionsToml {
    fn from(config: &ActiveElectionsConfig) -> Self {
        Self {
            max_blocks_per_election: Some(config.max_blocks_per_election),
        }
    }
}
