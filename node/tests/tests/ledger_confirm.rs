use nanosched_core::{Account, Amount, UnsavedBlockLatticeBuilder};
use nanosched_ledger::{BlockStatus, DEV_GENESIS_ACCOUNT};
use nanosched_node::{
    consensus::ElectionBehavior,
    stats::{DetailType, Direction, StatType},
};
use std::time::Duration;
use test_helpers::{assert_timely, assert_timely_eq, System};

#[test]
fn process_active_starts_election() {
    let mut system = System::new();
    let node = system.make_node();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send = lattice.genesis().send(Account::from(1), Amount::raw(1));

    let saved = node.process_active(send).unwrap();

    assert_timely(Duration::from_secs(5), || {
        node.active.election(&saved.qualified_root()).is_some()
    });
    assert_eq!(node.active.count_by_behavior(ElectionBehavior::Priority), 1);
}

#[test]
fn process_active_rejects_invalid_block() {
    let mut system = System::new();
    let node = system.make_node();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send = lattice.genesis().send(Account::from(1), Amount::raw(1));
    node.process(send.clone()).unwrap();

    assert_eq!(node.process_active(send), Err(BlockStatus::Old));
    assert_eq!(
        node.stats
            .count(StatType::Ledger, DetailType::Rejected, Direction::In),
        1
    );
}

#[test]
fn confirming_activates_next_block_in_chain() {
    let mut system = System::new();
    let node = system.make_node();
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send1 = lattice.genesis().send(Account::from(1), Amount::raw(1));
    let send2 = lattice.genesis().send(Account::from(1), Amount::raw(1));
    let saved1 = node.process_active(send1).unwrap();
    let saved2 = node.process(send2).unwrap();
    assert_timely(Duration::from_secs(5), || {
        node.active.election(&saved1.qualified_root()).is_some()
    });

    let cemented = node.confirm(&saved1.hash());

    assert_eq!(cemented.len(), 1);
    assert!(node.active.election(&saved1.qualified_root()).is_none());
    assert_timely(Duration::from_secs(5), || {
        node.active.election(&saved2.qualified_root()).is_some()
    });
}

#[test]
fn confirm_chain_of_accounts() {
    let mut system = System::new();
    let node = system.make_node();
    let destination = Account::from(42);
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send = lattice.genesis().send(destination, Amount::raw(10));
    let open = lattice.account(destination).receive(&send);
    let saved_send = node.process_active(send).unwrap();
    let saved_open = node.process_active(open).unwrap();
    assert_timely(Duration::from_secs(5), || {
        node.active.election(&saved_send.qualified_root()).is_some()
    });

    node.confirm(&saved_send.hash());
    assert_timely(Duration::from_secs(5), || {
        node.active.election(&saved_open.qualified_root()).is_some()
    });
    node.confirm(&saved_open.hash());

    assert_timely_eq(Duration::from_secs(5), || node.active.len(), 0);
    assert_eq!(node.ledger.cemented_count(), 3);
    assert!(!node.election_scheduler.activate(&destination));
    assert!(!node.election_scheduler.activate(&DEV_GENESIS_ACCOUNT));
}

#[test]
fn container_info() {
    let mut system = System::new();
    let node = system.make_node();
    let info = node.container_info();
    assert!(info.leaf(&["election_scheduler", "insert_queue"]).is_some());
    assert!(info.leaf(&["active", "roots"]).is_some());
}
