use crate::{Ledger, LedgerReader, DEV_GENESIS_ACCOUNT, DEV_GENESIS_HASH};
use nanosched_core::{Account, Amount, ConfirmationHeightInfo};

#[test]
fn account_info_is_none_for_unknown_account() {
    let ledger = Ledger::new();
    let tx = ledger.tx_begin_read();
    assert_eq!(ledger.account_info(tx.as_ref(), &Account::from(1)), None);
}

#[test]
fn genesis_account_info() {
    let ledger = Ledger::new();
    let tx = ledger.tx_begin_read();

    let info = ledger
        .account_info(tx.as_ref(), &DEV_GENESIS_ACCOUNT)
        .expect("genesis account not found");

    assert_eq!(info.block_count, 1);
    assert_eq!(info.head, *DEV_GENESIS_HASH);
    assert_eq!(info.open_block, *DEV_GENESIS_HASH);
    assert_eq!(info.balance, Amount::MAX);
    assert!(info.modified > 0);
}

#[test]
fn genesis_is_confirmed() {
    let ledger = Ledger::new();
    let tx = ledger.tx_begin_read();

    assert_eq!(
        ledger.confirmation_height(tx.as_ref(), &DEV_GENESIS_ACCOUNT),
        Some(ConfirmationHeightInfo::new(1, *DEV_GENESIS_HASH))
    );
    assert!(ledger.block_confirmed(tx.as_ref(), &DEV_GENESIS_HASH));
    assert_eq!(ledger.cemented_count(), 1);
}

#[test]
fn genesis_has_no_dependencies() {
    let ledger = Ledger::new();
    let tx = ledger.tx_begin_read();
    let genesis = ledger.get_block(tx.as_ref(), &DEV_GENESIS_HASH).unwrap();
    assert!(ledger.dependents_confirmed(tx.as_ref(), &genesis));
    assert_eq!(ledger.block_successor(tx.as_ref(), &DEV_GENESIS_HASH), None);
}

#[test]
fn null_ledger_is_empty() {
    let ledger = Ledger::new_null();
    assert_eq!(ledger.block_count(), 0);
    assert_eq!(ledger.account_count(), 0);
}
