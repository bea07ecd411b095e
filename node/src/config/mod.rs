mod node_config;
mod toml;

pub use node_config::NodeConfig;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
pub use toml::{ActiveElectionsToml, ElectionSchedulerToml, NodeToml};

pub fn get_node_toml_config_path(data_path: impl Into<PathBuf>) -> PathBuf {
    let mut node_toml = data_path.into();
    node_toml.push("config-node.toml");
    node_toml
}

pub fn read_toml_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let toml_str = std::fs::read_to_string(path)?;
    ::toml::from_str(&toml_str).map_err(|e| e.into())
}
