use super::BlockInsertInstructions;
use crate::{ledger_set::LedgerData, BlockStatus};
use nanosched_core::{
    Account, AccountInfo, Amount, Block, BlockDetails, BlockHash, BlockSideband, PendingInfo,
    PendingKey,
};

/// Validates a single block before it gets inserted into the ledger.
/// Only chain linkage and balances are checked.
pub(crate) struct BlockValidator<'a> {
    block: &'a Block,
    data: &'a LedgerData,
    old_account_info: Option<&'a AccountInfo>,
    seconds_since_epoch: u64,
}

enum BalanceChange {
    Send(Amount),
    Receive(Amount),
    Unchanged,
}

impl<'a> BlockValidator<'a> {
    pub(crate) fn new(data: &'a LedgerData, block: &'a Block, seconds_since_epoch: u64) -> Self {
        Self {
            block,
            data,
            old_account_info: data.account_info(&block.account()),
            seconds_since_epoch,
        }
    }

    pub(crate) fn validate(&self) -> Result<BlockInsertInstructions, BlockStatus> {
        self.ensure_block_does_not_exist_yet()?;
        self.ensure_previous_block_is_correct()?;
        self.ensure_open_block_has_link()?;
        let pending = self.ensure_pending_receive_is_correct()?;
        Ok(self.create_instructions(pending))
    }

    fn ensure_block_does_not_exist_yet(&self) -> Result<(), BlockStatus> {
        if self.data.block_exists(&self.block.hash()) {
            Err(BlockStatus::Old)
        } else {
            Ok(())
        }
    }

    fn ensure_previous_block_is_correct(&self) -> Result<(), BlockStatus> {
        match self.old_account_info {
            None if self.block.is_open() => Ok(()),
            None => Err(BlockStatus::GapPrevious),
            Some(_) if self.block.is_open() => Err(BlockStatus::Fork),
            Some(info) if info.head == self.block.previous() => Ok(()),
            Some(_) if self.data.block_exists(&self.block.previous()) => Err(BlockStatus::Fork),
            Some(_) => Err(BlockStatus::GapPrevious),
        }
    }

    fn ensure_open_block_has_link(&self) -> Result<(), BlockStatus> {
        if self.block.is_open() && self.block.link().is_zero() {
            Err(BlockStatus::MissingLink)
        } else {
            Ok(())
        }
    }

    fn ensure_pending_receive_is_correct(&self) -> Result<Option<PendingKey>, BlockStatus> {
        match self.balance_change() {
            BalanceChange::Receive(amount) => {
                if self.block.link().is_zero() {
                    return Err(BlockStatus::MissingLink);
                }
                let key = PendingKey::new(self.block.account(), self.block.link().into());
                match self.data.pending_info(&key) {
                    Some(pending) if pending.amount == amount => Ok(Some(key)),
                    Some(_) => Err(BlockStatus::BalanceMismatch),
                    None if self.data.block_exists(&key.send_block_hash) => {
                        Err(BlockStatus::Unreceivable)
                    }
                    None => Err(BlockStatus::GapSource),
                }
            }
            // An open block has to receive something
            BalanceChange::Unchanged if self.block.is_open() => Err(BlockStatus::BalanceMismatch),
            _ => Ok(None),
        }
    }

    fn previous_balance(&self) -> Amount {
        self.old_account_info
            .map(|i| i.balance)
            .unwrap_or_default()
    }

    fn balance_change(&self) -> BalanceChange {
        let previous = self.previous_balance();
        let balance = self.block.balance();
        if balance < previous {
            BalanceChange::Send(previous - balance)
        } else if balance > previous {
            BalanceChange::Receive(balance - previous)
        } else {
            BalanceChange::Unchanged
        }
    }

    fn create_instructions(&self, delete_pending: Option<PendingKey>) -> BlockInsertInstructions {
        let (is_send, insert_pending) = match self.balance_change() {
            BalanceChange::Send(amount) => {
                let destination = Account::from(self.block.link());
                (
                    true,
                    Some((
                        PendingKey::new(destination, self.block.hash()),
                        PendingInfo::new(self.block.account(), amount),
                    )),
                )
            }
            _ => (false, None),
        };

        let height = self
            .old_account_info
            .map(|i| i.block_count)
            .unwrap_or_default()
            + 1;

        BlockInsertInstructions {
            account: self.block.account(),
            old_account_info: self.old_account_info.cloned(),
            set_account_info: AccountInfo {
                head: self.block.hash(),
                representative: self.block.representative(),
                open_block: self
                    .old_account_info
                    .map(|i| i.open_block)
                    .unwrap_or(self.block.hash()),
                balance: self.block.balance(),
                modified: self.seconds_since_epoch,
                block_count: height,
            },
            delete_pending,
            insert_pending,
            set_sideband: BlockSideband {
                height,
                timestamp: self.seconds_since_epoch,
                successor: BlockHash::zero(),
                details: BlockDetails::new(is_send, delete_pending.is_some()),
            },
        }
    }
}
