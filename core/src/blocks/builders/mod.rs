mod unsaved_block_lattice_builder;

pub use unsaved_block_lattice_builder::{UnsavedAccountChainBuilder, UnsavedBlockLatticeBuilder};
