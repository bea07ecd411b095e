use super::NodeToml;
use crate::consensus::{ActiveElectionsConfig, ElectionSchedulerConfig};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NodeConfig {
    pub election_scheduler: ElectionSchedulerConfig,
    pub active_elections: ActiveElectionsConfig,
}

impl NodeConfig {
    pub fn merge_toml(&mut self, toml: &NodeToml) {
        if let Some(election_scheduler) = &toml.election_scheduler {
            self.election_scheduler = election_scheduler.into();
        }
        if let Some(active_elections) = &toml.active_elections {
            self.active_elections = active_elections.into();
        }
    }
}
