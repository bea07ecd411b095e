use super::{Block, BlockSideband};
use crate::{Account, BlockHash};
use std::ops::Deref;

/// A block together with the sideband the ledger computed when it was inserted
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SavedBlock {
    block: Block,
    sideband: BlockSideband,
}

impl SavedBlock {
    pub fn new(block: Block, sideband: BlockSideband) -> Self {
        Self { block, sideband }
    }

    pub fn new_test_instance() -> Self {
        Self::new(
            Block::new_test_instance(),
            BlockSideband {
                height: 2,
                ..Default::default()
            },
        )
    }

    pub fn height(&self) -> u64 {
        self.sideband.height
    }

    pub fn successor(&self) -> Option<BlockHash> {
        if self.sideband.successor.is_zero() {
            None
        } else {
            Some(self.sideband.successor)
        }
    }

    pub fn set_successor(&mut self, successor: BlockHash) {
        self.sideband.successor = successor;
    }

    pub fn sideband(&self) -> &BlockSideband {
        &self.sideband
    }

    pub fn is_send(&self) -> bool {
        self.sideband.details.is_send
    }

    pub fn is_receive(&self) -> bool {
        self.sideband.details.is_receive
    }

    pub fn destination(&self) -> Option<Account> {
        if self.is_send() {
            Some(self.link().into())
        } else {
            None
        }
    }

    /// The send block this block receives from
    pub fn source(&self) -> Option<BlockHash> {
        if self.is_receive() {
            Some(self.link().into())
        } else {
            None
        }
    }

    /// There can be at most two dependencies per block, namely "previous" and "source".
    pub fn dependent_blocks(&self) -> DependentBlocks {
        DependentBlocks::new(self.previous(), self.source().unwrap_or_default())
    }
}

impl Deref for SavedBlock {
    type Target = Block;

    fn deref(&self) -> &Self::Target {
        &self.block
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DependentBlocks {
    dependents: [BlockHash; 2],
}

impl DependentBlocks {
    pub fn new(previous: BlockHash, source: BlockHash) -> Self {
        Self {
            dependents: [previous, source],
        }
    }

    pub fn previous(&self) -> Option<BlockHash> {
        self.get_index(0)
    }

    pub fn source(&self) -> Option<BlockHash> {
        self.get_index(1)
    }

    fn get_index(&self, index: usize) -> Option<BlockHash> {
        if self.dependents[index].is_zero() {
            None
        } else {
            Some(self.dependents[index])
        }
    }

    /// Non-zero dependencies only
    pub fn iter(&self) -> impl Iterator<Item = &BlockHash> {
        self.dependents.iter().filter(|i| !i.is_zero())
    }
}
