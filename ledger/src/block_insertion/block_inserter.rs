use super::BlockInsertInstructions;
use crate::ledger_set::LedgerData;
use nanosched_core::{Block, SavedBlock};

/// Applies validated insert instructions to the ledger
pub(crate) struct BlockInserter<'a> {
    data: &'a mut LedgerData,
    block: Block,
    instructions: BlockInsertInstructions,
}

impl<'a> BlockInserter<'a> {
    pub(crate) fn new(
        data: &'a mut LedgerData,
        block: Block,
        instructions: BlockInsertInstructions,
    ) -> Self {
        Self {
            data,
            block,
            instructions,
        }
    }

    pub(crate) fn insert(self) -> SavedBlock {
        let hash = self.block.hash();
        let previous = self.block.previous();
        let saved = SavedBlock::new(self.block, self.instructions.set_sideband);

        if let Some(previous_block) = self.data.blocks.get_mut(&previous) {
            previous_block.set_successor(hash);
        }
        self.data.blocks.insert(hash, saved.clone());

        if let Some(key) = &self.instructions.delete_pending {
            self.data.pending.remove(key);
        }
        if let Some((key, info)) = self.instructions.insert_pending {
            self.data.pending.insert(key, info);
        }

        self.data
            .accounts
            .insert(self.instructions.account, self.instructions.set_account_info);

        saved
    }
}
