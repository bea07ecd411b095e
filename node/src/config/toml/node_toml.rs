use super::{ActiveElectionsToml, ElectionSchedulerToml};
use crate::config::NodeConfig;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Default)]
pub struct NodeToml {
    pub election_scheduler: Option<ElectionSchedulerToml>,
    pub active_elections: Option<ActiveElectionsToml>,
}

impl From<&NodeConfig> for NodeToml {
    fn from(config: &NodeConfig) -> Self {
        Self {
            election_scheduler: Some((&config.election_scheduler).into()),
            active_elections: Some((&config.active_elections).into()),
        }
    }
}
