use crate::{Ledger, LedgerReader};
use nanosched_core::{
    Account, AccountInfo, BlockHash, BlockSideband, ConfirmationHeightInfo, SavedBlock,
};

fn chain_of(account: Account, length: u64) -> Vec<SavedBlock> {
    let mut previous = BlockHash::zero();
    let mut result = Vec::new();
    for height in 1..=length {
        let block = nanosched_core::Block::builder()
            .account(account)
            .previous(previous)
            .link(BlockHash::from(height))
            .build();
        previous = block.hash();
        result.push(SavedBlock::new(
            block,
            BlockSideband {
                height,
                ..Default::default()
            },
        ));
    }
    result
}

#[test]
fn derives_account_info_from_blocks() {
    let account = Account::from(1);
    let chain = chain_of(account, 3);
    let ledger = Ledger::new_null_builder().blocks(&chain).finish();

    let tx = ledger.tx_begin_read();
    let info = ledger.account_info(tx.as_ref(), &account).unwrap();
    assert_eq!(info.block_count, 3);
    assert_eq!(info.head, chain[2].hash());
    assert_eq!(info.open_block, chain[0].hash());
    assert_eq!(
        ledger.block_successor(tx.as_ref(), &chain[0].hash()),
        Some(chain[1].hash())
    );
}

#[test]
fn explicit_values_override() {
    let account = Account::from(1);
    let info = AccountInfo::new_test_instance();
    let conf = ConfirmationHeightInfo::new_test_instance();
    let ledger = Ledger::new_null_builder()
        .account_info(&account, &info)
        .confirmation_height(&account, &conf)
        .finish();

    let tx = ledger.tx_begin_read();
    assert_eq!(ledger.account_info(tx.as_ref(), &account), Some(info));
    assert_eq!(ledger.confirmation_height(tx.as_ref(), &account), Some(conf));
}
