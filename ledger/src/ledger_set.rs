use nanosched_core::{
    Account, AccountInfo, Amount, BlockHash, ConfirmationHeightInfo, PendingInfo, PendingKey,
    SavedBlock,
};
use std::collections::HashMap;

/// Everything the ledger knows. Readers share an immutable snapshot of it,
/// writers clone it on demand.
#[derive(Clone, Default)]
pub(crate) struct LedgerData {
    pub blocks: HashMap<BlockHash, SavedBlock>,
    pub accounts: HashMap<Account, AccountInfo>,
    pub confirmation_heights: HashMap<Account, ConfirmationHeightInfo>,
    pub pending: HashMap<PendingKey, PendingInfo>,
    pub cemented_count: u64,
}

impl LedgerData {
    pub fn get_block(&self, hash: &BlockHash) -> Option<&SavedBlock> {
        self.blocks.get(hash)
    }

    pub fn block_exists(&self, hash: &BlockHash) -> bool {
        self.blocks.contains_key(hash)
    }

    pub fn account_info(&self, account: &Account) -> Option<&AccountInfo> {
        self.accounts.get(account)
    }

    pub fn account_balance(&self, account: &Account) -> Option<Amount> {
        self.accounts.get(account).map(|i| i.balance)
    }

    pub fn confirmation_height(&self, account: &Account) -> Option<&ConfirmationHeightInfo> {
        self.confirmation_heights.get(account)
    }

    pub fn pending_info(&self, key: &PendingKey) -> Option<&PendingInfo> {
        self.pending.get(key)
    }

    pub fn block_successor(&self, hash: &BlockHash) -> Option<BlockHash> {
        self.get_block(hash).and_then(|b| b.successor())
    }

    pub fn block_confirmed(&self, hash: &BlockHash) -> bool {
        let Some(block) = self.get_block(hash) else {
            return false;
        };
        self.confirmation_height(&block.account())
            .map(|info| info.height >= block.height())
            .unwrap_or(false)
    }

    pub fn set_confirmation_height(&mut self, account: Account, info: ConfirmationHeightInfo) {
        self.confirmation_heights.insert(account, info);
    }
}
