use crate::ledger_set::LedgerData;
use nanosched_core::{DependentBlocks, SavedBlock};

/// Finds all dependent blocks for a given block.
/// There can be at most two dependencies per block, namely "previous" and "source".
pub(crate) struct DependentBlocksFinder<'a> {
    data: &'a LedgerData,
}

impl<'a> DependentBlocksFinder<'a> {
    pub fn new(data: &'a LedgerData) -> Self {
        Self { data }
    }

    pub fn find_dependent_blocks(&self, block: &SavedBlock) -> DependentBlocks {
        block.dependent_blocks()
    }

    pub fn dependents_confirmed(&self, block: &SavedBlock) -> bool {
        self.find_dependent_blocks(block)
            .iter()
            .all(|hash| self.data.block_confirmed(hash))
    }
}
