use crate::{Amount, BlockHash, PublicKey};

/// Latest information about an account
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct AccountInfo {
    pub head: BlockHash,
    pub representative: PublicKey,
    pub open_block: BlockHash,
    pub balance: Amount,
    /** Seconds since posix epoch */
    pub modified: u64,
    pub block_count: u64,
}

impl AccountInfo {
    pub fn new_test_instance() -> Self {
        Self {
            head: BlockHash::from(1),
            representative: PublicKey::from(2),
            open_block: BlockHash::from(3),
            balance: Amount::raw(42),
            modified: 4,
            block_count: 5,
        }
    }
}
