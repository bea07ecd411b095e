use crate::BlockHash;

/// The chain position up to which an account's blocks are cemented
#[derive(Default, PartialEq, Eq, Debug, Clone)]
pub struct ConfirmationHeightInfo {
    pub height: u64,
    pub frontier: BlockHash,
}

impl ConfirmationHeightInfo {
    pub fn new(height: u64, frontier: BlockHash) -> Self {
        Self { height, frontier }
    }

    pub fn new_test_instance() -> Self {
        Self {
            height: 42,
            frontier: BlockHash::from(7),
        }
    }
}
