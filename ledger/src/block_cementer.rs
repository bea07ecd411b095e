use crate::{dependent_blocks_finder::DependentBlocksFinder, ledger_set::LedgerData};
use nanosched_core::{BlockHash, ConfirmationHeightInfo, SavedBlock};
use std::collections::VecDeque;

/// Cements blocks in the ledger
pub(crate) struct BlockCementer<'a> {
    data: &'a mut LedgerData,
}

impl<'a> BlockCementer<'a> {
    pub(crate) fn new(data: &'a mut LedgerData) -> Self {
        Self { data }
    }

    /// Confirms the target block and all of its unconfirmed dependencies.
    /// The cemented blocks are returned in the order they were cemented.
    pub(crate) fn confirm(&mut self, target_hash: BlockHash, max_blocks: usize) -> Vec<SavedBlock> {
        let mut result = Vec::new();

        let mut stack = VecDeque::new();
        stack.push_back(target_hash);
        while let Some(&hash) = stack.back() {
            let Some(block) = self.data.get_block(&hash).cloned() else {
                // Dependency is not in the ledger, nothing more can be cemented
                break;
            };

            let dependents = DependentBlocksFinder::new(self.data).find_dependent_blocks(&block);
            for dependent in dependents.iter() {
                if !self.data.block_confirmed(dependent) {
                    stack.push_back(*dependent);

                    // Limit the stack size to avoid excessive memory usage
                    // This will forget the bottom of the dependency tree
                    if stack.len() > max_blocks {
                        stack.pop_front();
                    }
                }
            }

            if stack.back() == Some(&hash) {
                stack.pop_back();
                if !self.data.block_confirmed(&hash) {
                    // We must only confirm blocks that have their dependencies confirmed
                    self.data.set_confirmation_height(
                        block.account(),
                        ConfirmationHeightInfo::new(block.height(), block.hash()),
                    );
                    self.data.cemented_count += 1;
                    result.push(block);
                }
            }

            // Early return might leave parts of the dependency tree unconfirmed
            if result.len() >= max_blocks {
                break;
            }
        }
        result
    }
}
