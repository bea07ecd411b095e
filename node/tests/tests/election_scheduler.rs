use nanosched_core::{Account, Amount, Block, SavedBlock, UnsavedBlockLatticeBuilder};
use nanosched_ledger::{Ledger, DEV_GENESIS_ACCOUNT};
use nanosched_node::{
    consensus::{ElectionBehavior, ElectionState, Progress},
    stats::{DetailType, Direction, StatType},
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};
use test_helpers::{
    assert_always_eq, assert_never, assert_timely, assert_timely_eq, setup_independent_accounts,
    start_election, System,
};

#[test]
fn activate_open_block() {
    let mut system = System::new();
    let destination = Account::from(42);
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    let send = lattice.genesis().send(destination, Amount::raw(100));
    let open = lattice.account(destination).receive(&send);
    let ledger = Arc::new(Ledger::new());
    ledger.process(send.clone()).unwrap();
    ledger.process(open.clone()).unwrap();
    ledger.confirm(send.hash());
    let node = system.build_node().ledger(ledger).finish();
    let tracker = node.active.track_inserted();

    assert!(node.election_scheduler.activate(&destination));

    assert_timely_eq(
        Duration::from_secs(5),
        || node.election_scheduler.progress().insert_queued,
        1,
    );
    let inserted = tracker.output();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].block.hash(), open.hash());
    assert!(node.active.election(&open.qualified_root()).is_some());
}

#[test]
fn activate_confirmed_account_does_nothing() {
    let mut system = System::new();
    let node = system.make_node();

    assert!(!node.election_scheduler.activate(&DEV_GENESIS_ACCOUNT));

    assert_always_eq(
        Duration::from_millis(200),
        || {
            (
                node.election_scheduler.len(),
                node.election_scheduler.progress(),
            )
        },
        (0, Progress::default()),
    );
    assert_eq!(
        node.stats.count(
            StatType::ElectionScheduler,
            DetailType::ActivateSkip,
            Direction::In
        ),
        1
    );
}

#[test]
fn concurrent_inserts_and_activate() {
    let mut system = System::new();
    let node = system.make_node();
    let tracker = node.active.track_inserted();
    let blocks = setup_independent_accounts(1);
    let (send, _) = &blocks[0];
    let saved_send = node.process(send.clone()).unwrap();

    let inserters: Vec<_> = (0..2)
        .map(|i| {
            let node = node.clone();
            thread::spawn(move || {
                let block = test_block(i);
                node.election_scheduler
                    .insert(Arc::new(block), None, ElectionBehavior::Manual, None);
            })
        })
        .collect();
    for inserter in inserters {
        inserter.join().unwrap();
    }
    assert!(node.election_scheduler.activate(&DEV_GENESIS_ACCOUNT));

    node.election_scheduler.flush();

    // the activated block reaches the elections through a follow-up insertion
    assert_timely_eq(Duration::from_secs(5), || tracker.len(), 3);
    let inserted = tracker.output();
    assert!(inserted[..2]
        .iter()
        .all(|r| r.behavior == ElectionBehavior::Manual));
    assert_eq!(inserted[2].block.hash(), saved_send.hash());
    assert_eq!(inserted[2].behavior, ElectionBehavior::Priority);
    assert_timely_eq(
        Duration::from_secs(5),
        || node.election_scheduler.progress().insert_queued,
        3,
    );
}

#[test]
fn flush_timeout_while_elections_are_locked() {
    let mut system = System::new();
    let node = system.make_node();

    let guard = node.active.lock();
    node.election_scheduler
        .insert(Arc::new(test_block(1)), None, ElectionBehavior::Manual, None);
    assert!(!node
        .election_scheduler
        .flush_timeout(Duration::from_millis(200)));
    drop(guard);

    assert!(node.election_scheduler.flush_timeout(Duration::from_secs(5)));
    assert_eq!(node.active.len(), 1);
}

#[test]
fn activation_waits_for_confirmed_source() {
    let mut system = System::new();
    let node = system.make_node();
    let blocks = setup_independent_accounts(1);
    let (send, open) = &blocks[0];
    node.process(send.clone()).unwrap();
    let saved_open = node.process(open.clone()).unwrap();

    assert!(!node.election_scheduler.activate(&saved_open.account()));
    assert!(node.election_scheduler.is_empty());
    assert_never(Duration::from_millis(200), || !node.active.is_empty());

    // confirming the send activates the open block of the destination
    node.confirm(&send.hash());

    assert_timely(Duration::from_secs(5), || {
        node.active.election(&saved_open.qualified_root()).is_some()
    });
}

#[test]
fn confirmation_action_is_invoked() {
    let mut system = System::new();
    let node = system.make_node();
    let blocks = setup_independent_accounts(1);
    let (send, _) = &blocks[0];
    let saved_send = Arc::new(node.process(send.clone()).unwrap());
    let confirmed = Arc::new(AtomicUsize::new(0));
    let confirmed2 = confirmed.clone();
    let expected_hash = saved_send.hash();

    node.election_scheduler.insert(
        saved_send.clone(),
        Some(Amount::MAX),
        ElectionBehavior::Priority,
        Some(Arc::new(move |block| {
            assert_eq!(block.hash(), expected_hash);
            confirmed2.fetch_add(1, Ordering::SeqCst);
        })),
    );
    node.election_scheduler.flush();
    let election = node
        .active
        .election(&saved_send.qualified_root())
        .unwrap();

    node.confirm(&saved_send.hash());

    assert_eq!(election.state(), ElectionState::Confirmed);
    assert_eq!(confirmed.load(Ordering::SeqCst), 1);
    assert!(node.active.is_empty());
}

#[test]
fn activate_promotes_existing_election() {
    let mut system = System::new();
    let node = system.make_node();
    let blocks = setup_independent_accounts(1);
    let (send, _) = &blocks[0];
    let saved_send = node.process(send.clone()).unwrap();
    let election = start_election(&node, &saved_send.hash());
    assert_eq!(election.state(), ElectionState::Passive);

    node.election_scheduler.activate(&DEV_GENESIS_ACCOUNT);

    assert_timely_eq(Duration::from_secs(5), || election.state(), ElectionState::Active);
}

fn test_block(i: u64) -> SavedBlock {
    SavedBlock::new(
        Block::builder()
            .account(Account::from(5000 + i))
            .build(),
        Default::default(),
    )
}
