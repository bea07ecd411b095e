mod block_inserter;
mod block_validator;

pub(crate) use block_inserter::BlockInserter;
pub(crate) use block_validator::BlockValidator;

use nanosched_core::{Account, AccountInfo, BlockSideband, PendingInfo, PendingKey};

#[derive(Debug, PartialEq)]
pub(crate) struct BlockInsertInstructions {
    pub account: Account,
    pub old_account_info: Option<AccountInfo>,
    pub set_account_info: AccountInfo,
    pub delete_pending: Option<PendingKey>,
    pub insert_pending: Option<(PendingKey, PendingInfo)>,
    pub set_sideband: BlockSideband,
}
