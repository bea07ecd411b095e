use crate::{BlockStatus, Ledger, LedgerReader, DEV_GENESIS_ACCOUNT, DEV_GENESIS_HASH};
use nanosched_core::{Account, Amount, UnsavedBlockLatticeBuilder};

#[test]
fn process_send() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let destination = Account::from(42);
    let send = lattice.genesis().send(destination, Amount::raw(100));

    let saved = ledger.process(send.clone()).unwrap();

    assert_eq!(saved.height(), 2);
    assert!(saved.is_send());
    assert_eq!(saved.destination(), Some(destination));
    let tx = ledger.tx_begin_read();
    let info = ledger.account_info(tx.as_ref(), &DEV_GENESIS_ACCOUNT).unwrap();
    assert_eq!(info.head, send.hash());
    assert_eq!(info.block_count, 2);
    assert_eq!(info.balance, Amount::MAX - Amount::raw(100));
    assert_eq!(
        ledger.block_successor(tx.as_ref(), &DEV_GENESIS_HASH),
        Some(send.hash())
    );
}

#[test]
fn process_open() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let destination = Account::from(42);
    let send = lattice.genesis().send(destination, Amount::raw(100));
    let open = lattice.account(destination).receive(&send);
    ledger.process(send.clone()).unwrap();

    let saved = ledger.process(open.clone()).unwrap();

    assert_eq!(saved.height(), 1);
    assert!(saved.is_receive());
    assert_eq!(saved.source(), Some(send.hash()));
    let tx = ledger.tx_begin_read();
    let info = ledger.account_info(tx.as_ref(), &destination).unwrap();
    assert_eq!(info.open_block, open.hash());
    assert_eq!(info.balance, Amount::raw(100));
}

#[test]
fn cannot_receive_twice() {
    let ledger = Ledger::new();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let destination = Account::from(42);
    let send = lattice.genesis().send(destination, Amount::raw(100));
    let open = lattice.account(destination).receive(&send);
    ledger.process(send.clone()).unwrap();
    ledger.process(open.clone()).unwrap();

    let second_receive = nanosched_core::Block::builder()
        .account(destination)
        .previous(open.hash())
        .balance(Amount::raw(200))
        .link(send.hash())
        .build();

    assert_eq!(
        ledger.process(second_receive),
        Err(BlockStatus::Unreceivable)
    );
}

#[test]
fn read_transaction_is_a_snapshot() {
    let ledger = Ledger::new();
    let tx = ledger.tx_begin_read();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send = lattice.genesis().send(Account::from(1), Amount::raw(1));

    ledger.process(send.clone()).unwrap();

    assert!(ledger.get_block(tx.as_ref(), &send.hash()).is_none());
    let tx2 = ledger.tx_begin_read();
    assert!(ledger.get_block(tx2.as_ref(), &send.hash()).is_some());
}
