use crate::ledger_set::LedgerData;
use nanosched_core::{
    Account, AccountInfo, BlockHash, ConfirmationHeightInfo, SavedBlock,
};
use std::{any::Any, sync::Arc};

pub trait Transaction: Send {
    fn as_any(&self) -> &dyn Any;
}

/// A consistent, read-only snapshot of the ledger. Writes that happen after
/// the transaction was opened are not visible through it.
pub struct LedgerReadTransaction {
    data: Arc<LedgerData>,
}

impl LedgerReadTransaction {
    pub(crate) fn new(data: Arc<LedgerData>) -> Self {
        Self { data }
    }

    pub(crate) fn data(&self) -> &LedgerData {
        &self.data
    }
}

impl Transaction for LedgerReadTransaction {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The read-only view of the ledger that election scheduling needs
pub trait LedgerReader: Send + Sync {
    fn tx_begin_read(&self) -> Box<dyn Transaction>;
    fn account_info(&self, tx: &dyn Transaction, account: &Account) -> Option<AccountInfo>;
    fn confirmation_height(
        &self,
        tx: &dyn Transaction,
        account: &Account,
    ) -> Option<ConfirmationHeightInfo>;
    /// The next block in the account chain
    fn block_successor(&self, tx: &dyn Transaction, hash: &BlockHash) -> Option<BlockHash>;
    fn get_block(&self, tx: &dyn Transaction, hash: &BlockHash) -> Option<SavedBlock>;
    /// True iff every block the given block causally depends on is confirmed
    fn dependents_confirmed(&self, tx: &dyn Transaction, block: &SavedBlock) -> bool;
}
