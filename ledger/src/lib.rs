mod block_cementer;
mod block_insertion;
mod block_status;
mod dependent_blocks_finder;
mod ledger;
mod ledger_reader;
mod ledger_set;
#[cfg(test)]
mod ledger_tests;

pub use block_status::BlockStatus;
pub use ledger::{Ledger, NullLedgerBuilder};
pub use ledger_reader::{LedgerReadTransaction, LedgerReader, Transaction};
pub use nanosched_core::{DEV_GENESIS_ACCOUNT, DEV_GENESIS_BLOCK, DEV_GENESIS_HASH};
