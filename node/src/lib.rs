pub mod config;
pub mod consensus;
mod node;
pub mod stats;

pub use node::Node;
