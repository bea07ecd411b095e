mod active_elections_toml;
mod election_scheduler_toml;
mod node_toml;

pub use active_elections_toml::ActiveElectionsToml;
pub use election_scheduler_toml::ElectionSchedulerToml;
pub use node_toml::NodeToml;
