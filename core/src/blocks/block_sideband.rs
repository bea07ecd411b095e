use crate::BlockHash;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BlockDetails {
    pub is_send: bool,
    pub is_receive: bool,
}

impl BlockDetails {
    pub fn new(is_send: bool, is_receive: bool) -> Self {
        Self {
            is_send,
            is_receive,
        }
    }
}

/// Ledger metadata that is attached to a block once it is saved
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BlockSideband {
    pub height: u64,
    /** Seconds since posix epoch */
    pub timestamp: u64,
    pub successor: BlockHash,
    pub details: BlockDetails,
}
