mod block;
pub use block::{Block, StateBlockBuilder};

mod block_sideband;
pub use block_sideband::{BlockDetails, BlockSideband};

mod saved_block;
pub use saved_block::{DependentBlocks, SavedBlock};

mod builders;
pub use builders::*;
