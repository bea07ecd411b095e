use crate::{
    block_cementer::BlockCementer,
    block_insertion::{BlockInserter, BlockValidator},
    dependent_blocks_finder::DependentBlocksFinder,
    ledger_set::LedgerData,
    BlockStatus, LedgerReadTransaction, LedgerReader, Transaction,
};
use nanosched_core::{
    Account, AccountInfo, Amount, Block, BlockDetails, BlockHash, BlockSideband,
    ConfirmationHeightInfo, SavedBlock, DEV_GENESIS_BLOCK,
};
use std::{
    sync::{Arc, RwLock},
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{debug, trace};

/// Cementing stops after this many blocks per call
const MAX_CEMENT_BLOCKS: usize = 64 * 1024;

/// In-memory block lattice with a confirmation height index.
///
/// Readers get snapshots (see [`LedgerReadTransaction`]) that stay consistent
/// while the ledger is modified.
pub struct Ledger {
    data: RwLock<Arc<LedgerData>>,
}

impl Ledger {
    /// Creates a ledger that contains the confirmed dev genesis block
    pub fn new() -> Self {
        Self::with_genesis(DEV_GENESIS_BLOCK.clone())
    }

    /// The genesis block is the first block of the ledger and is confirmed from the start
    pub fn with_genesis(genesis: Block) -> Self {
        let mut data = LedgerData::default();
        insert_genesis(&mut data, genesis);
        Self::from_data(data)
    }

    /// Creates a ledger without any blocks
    pub fn new_null() -> Self {
        Self::from_data(LedgerData::default())
    }

    pub fn new_null_builder() -> NullLedgerBuilder {
        NullLedgerBuilder::new()
    }

    fn from_data(data: LedgerData) -> Self {
        Self {
            data: RwLock::new(Arc::new(data)),
        }
    }

    pub fn read_txn(&self) -> LedgerReadTransaction {
        LedgerReadTransaction::new(Arc::clone(&self.data.read().unwrap()))
    }

    /// Validates the block and appends it to its account chain
    pub fn process(&self, block: Block) -> Result<SavedBlock, BlockStatus> {
        let mut guard = self.data.write().unwrap();
        let data = Arc::make_mut(&mut guard);
        let instructions = BlockValidator::new(data, &block, seconds_since_epoch()).validate()?;
        let saved = BlockInserter::new(data, block, instructions).insert();
        trace!(
            hash = %saved.hash(),
            account = saved.account().encode_account(),
            height = saved.height(),
            "block processed"
        );
        Ok(saved)
    }

    /// Cements the block and all of its unconfirmed dependencies.
    /// Returns the newly cemented blocks in cementing order.
    pub fn confirm(&self, hash: BlockHash) -> Vec<SavedBlock> {
        let mut guard = self.data.write().unwrap();
        if guard.block_confirmed(&hash) || !guard.block_exists(&hash) {
            return Vec::new();
        }
        let data = Arc::make_mut(&mut guard);
        let cemented = BlockCementer::new(data).confirm(hash, MAX_CEMENT_BLOCKS);
        debug!(%hash, cemented = cemented.len(), "blocks cemented");
        cemented
    }

    pub fn block_confirmed(&self, tx: &dyn Transaction, hash: &BlockHash) -> bool {
        data_of(tx).block_confirmed(hash)
    }

    pub fn block_exists(&self, tx: &dyn Transaction, hash: &BlockHash) -> bool {
        data_of(tx).block_exists(hash)
    }

    pub fn account_balance(&self, tx: &dyn Transaction, account: &Account) -> Option<Amount> {
        data_of(tx).account_balance(account)
    }

    pub fn block_count(&self) -> u64 {
        self.data.read().unwrap().blocks.len() as u64
    }

    pub fn cemented_count(&self) -> u64 {
        self.data.read().unwrap().cemented_count
    }

    pub fn account_count(&self) -> usize {
        self.data.read().unwrap().accounts.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerReader for Ledger {
    fn tx_begin_read(&self) -> Box<dyn Transaction> {
        Box::new(self.read_txn())
    }

    fn account_info(&self, tx: &dyn Transaction, account: &Account) -> Option<AccountInfo> {
        data_of(tx).account_info(account).cloned()
    }

    fn confirmation_height(
        &self,
        tx: &dyn Transaction,
        account: &Account,
    ) -> Option<ConfirmationHeightInfo> {
        data_of(tx).confirmation_height(account).cloned()
    }

    fn block_successor(&self, tx: &dyn Transaction, hash: &BlockHash) -> Option<BlockHash> {
        data_of(tx).block_successor(hash)
    }

    fn get_block(&self, tx: &dyn Transaction, hash: &BlockHash) -> Option<SavedBlock> {
        data_of(tx).get_block(hash).cloned()
    }

    fn dependents_confirmed(&self, tx: &dyn Transaction, block: &SavedBlock) -> bool {
        DependentBlocksFinder::new(data_of(tx)).dependents_confirmed(block)
    }
}

fn data_of(tx: &dyn Transaction) -> &LedgerData {
    tx.as_any()
        .downcast_ref::<LedgerReadTransaction>()
        .expect("transaction was not created by this ledger")
        .data()
}

fn insert_genesis(data: &mut LedgerData, genesis: Block) {
    let hash = genesis.hash();
    let account = genesis.account();
    data.accounts.insert(
        account,
        AccountInfo {
            head: hash,
            representative: genesis.representative(),
            open_block: hash,
            balance: genesis.balance(),
            modified: seconds_since_epoch(),
            block_count: 1,
        },
    );
    data.blocks.insert(
        hash,
        SavedBlock::new(
            genesis,
            BlockSideband {
                height: 1,
                timestamp: seconds_since_epoch(),
                successor: BlockHash::zero(),
                details: BlockDetails::default(),
            },
        ),
    );
    data.set_confirmation_height(account, ConfirmationHeightInfo::new(1, hash));
    data.cemented_count = 1;
}

fn seconds_since_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Builds a pre-populated ledger without validating anything.
/// Account infos are derived from the given blocks unless they are set explicitly.
pub struct NullLedgerBuilder {
    data: LedgerData,
    explicit_accounts: Vec<(Account, AccountInfo)>,
}

impl NullLedgerBuilder {
    fn new() -> Self {
        Self {
            data: LedgerData::default(),
            explicit_accounts: Vec::new(),
        }
    }

    pub fn genesis(mut self) -> Self {
        insert_genesis(&mut self.data, DEV_GENESIS_BLOCK.clone());
        self
    }

    pub fn block(mut self, block: &SavedBlock) -> Self {
        let mut block = block.clone();
        if block.successor().is_none() {
            if let Some(successor) = self
                .data
                .blocks
                .values()
                .find(|b| !b.is_open() && b.previous() == block.hash())
            {
                block.set_successor(successor.hash());
            }
        }
        if let Some(previous) = self.data.blocks.get_mut(&block.previous()) {
            previous.set_successor(block.hash());
        }

        let account = block.account();
        let is_new_head = self
            .data
            .accounts
            .get(&account)
            .map(|i| i.block_count < block.height())
            .unwrap_or(true);
        if is_new_head {
            let open_block = if block.height() == 1 {
                block.hash()
            } else {
                self.data
                    .accounts
                    .get(&account)
                    .map(|i| i.open_block)
                    .unwrap_or_default()
            };
            self.data.accounts.insert(
                account,
                AccountInfo {
                    head: block.hash(),
                    representative: block.representative(),
                    open_block,
                    balance: block.balance(),
                    modified: block.sideband().timestamp,
                    block_count: block.height(),
                },
            );
        } else if block.height() == 1 {
            if let Some(info) = self.data.accounts.get_mut(&account) {
                info.open_block = block.hash();
            }
        }
        self.data.blocks.insert(block.hash(), block);
        self
    }

    pub fn blocks<'a>(mut self, blocks: impl IntoIterator<Item = &'a SavedBlock>) -> Self {
        for block in blocks {
            self = self.block(block);
        }
        self
    }

    pub fn account_info(mut self, account: &Account, info: &AccountInfo) -> Self {
        self.explicit_accounts.push((*account, info.clone()));
        self
    }

    pub fn confirmation_height(mut self, account: &Account, info: &ConfirmationHeightInfo) -> Self {
        self.data.set_confirmation_height(*account, info.clone());
        self
    }

    pub fn finish(mut self) -> Ledger {
        for (account, info) in self.explicit_accounts {
            self.data.accounts.insert(account, info);
        }
        Ledger::from_data(self.data)
    }
}
