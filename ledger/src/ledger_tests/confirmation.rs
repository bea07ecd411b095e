use crate::{Ledger, LedgerReader};
use nanosched_core::{Account, Amount, UnsavedBlockLatticeBuilder};

#[test]
fn confirm_cements_previous_blocks_first() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send1 = lattice.genesis().send(Account::from(1), Amount::raw(1));
    let send2 = lattice.genesis().send(Account::from(1), Amount::raw(1));
    ledger.process(send1.clone()).unwrap();
    ledger.process(send2.clone()).unwrap();

    let cemented = ledger.confirm(send2.hash());

    let hashes: Vec<_> = cemented.iter().map(|b| b.hash()).collect();
    assert_eq!(hashes, vec![send1.hash(), send2.hash()]);
    assert_eq!(ledger.cemented_count(), 3);
}

#[test]
fn confirm_cements_source_of_receive() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let destination = Account::from(42);
    let send = lattice.genesis().send(destination, Amount::raw(5));
    let open = lattice.account(destination).receive(&send);
    ledger.process(send.clone()).unwrap();
    ledger.process(open.clone()).unwrap();

    let cemented = ledger.confirm(open.hash());

    let hashes: Vec<_> = cemented.iter().map(|b| b.hash()).collect();
    assert_eq!(hashes, vec![send.hash(), open.hash()]);
    let tx = ledger.tx_begin_read();
    assert!(ledger.block_confirmed(tx.as_ref(), &send.hash()));
    assert!(ledger.block_confirmed(tx.as_ref(), &open.hash()));
}

#[test]
fn confirming_twice_does_nothing() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send = lattice.genesis().send(Account::from(1), Amount::raw(1));
    ledger.process(send.clone()).unwrap();

    assert_eq!(ledger.confirm(send.hash()).len(), 1);
    assert!(ledger.confirm(send.hash()).is_empty());
}

#[test]
fn dependents_confirmed_waits_for_source() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let destination = Account::from(42);
    let send = lattice.genesis().send(destination, Amount::raw(5));
    let open = lattice.account(destination).receive(&send);
    ledger.process(send.clone()).unwrap();
    let saved_open = ledger.process(open).unwrap();

    let tx = ledger.tx_begin_read();
    assert!(!ledger.dependents_confirmed(tx.as_ref(), &saved_open));

    ledger.confirm(send.hash());

    let tx = ledger.tx_begin_read();
    assert!(ledger.dependents_confirmed(tx.as_ref(), &saved_open));
}
