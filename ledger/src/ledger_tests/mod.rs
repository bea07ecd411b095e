mod confirmation;
mod empty_ledger;
mod null_ledger;
mod process_blocks;
