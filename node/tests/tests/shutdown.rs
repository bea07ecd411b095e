use nanosched_core::{Account, Block, SavedBlock};
use nanosched_node::{
    consensus::{ElectionBehavior, ShutdownMode},
    stats::{DetailType, Direction, StatType},
    Node,
};
use std::{sync::Arc, thread, time::Duration};
use test_helpers::{assert_never, assert_timely, assert_timely_eq, System};

#[test]
fn drain_processes_queued_items() {
    let mut system = System::new();
    let node = system.make_node();
    let tracker = node.active.track_inserted();

    let guard = node.active.lock();
    insert_blocks(&node, 3);
    wait_until_worker_is_blocked(&node);

    let scheduler = node.election_scheduler.clone();
    let stopper = thread::spawn(move || scheduler.stop_with(ShutdownMode::Drain));
    assert_timely(Duration::from_secs(5), || {
        node.election_scheduler.is_stopped()
    });
    drop(guard);
    stopper.join().unwrap();

    assert_eq!(tracker.len(), 3);
    assert_eq!(node.election_scheduler.progress().insert_queued, 3);
    assert!(node.election_scheduler.is_empty());
}

#[test]
fn second_stop_waits_for_drain() {
    let mut system = System::new();
    let node = system.make_node();
    let tracker = node.active.track_inserted();

    let guard = node.active.lock();
    insert_blocks(&node, 3);
    wait_until_worker_is_blocked(&node);

    let scheduler = node.election_scheduler.clone();
    let first = thread::spawn(move || scheduler.stop_with(ShutdownMode::Drain));
    assert_timely(Duration::from_secs(5), || {
        node.election_scheduler.is_stopped()
    });

    let scheduler = node.election_scheduler.clone();
    let second = thread::spawn(move || {
        scheduler.stop_with(ShutdownMode::Drain);
        scheduler.progress().insert_queued
    });
    assert_never(Duration::from_millis(200), || second.is_finished());

    drop(guard);
    assert_eq!(second.join().unwrap(), 3);
    first.join().unwrap();

    assert_eq!(tracker.len(), 3);
    assert!(node.election_scheduler.flush_timeout(Duration::ZERO));
}

#[test]
fn cancel_abandons_queued_items() {
    let mut system = System::new();
    let node = system.make_node();
    let tracker = node.active.track_inserted();

    let guard = node.active.lock();
    insert_blocks(&node, 3);
    wait_until_worker_is_blocked(&node);

    let scheduler = node.election_scheduler.clone();
    let stopper = thread::spawn(move || scheduler.stop_with(ShutdownMode::Cancel));
    assert_timely(Duration::from_secs(5), || {
        node.election_scheduler.is_stopped()
    });
    drop(guard);
    stopper.join().unwrap();

    // only the insertion that was already in progress completes
    assert_eq!(tracker.len(), 1);
    assert_eq!(node.election_scheduler.progress().insert_queued, 1);
    assert_eq!(node.election_scheduler.insert_queue_len(), 2);
    assert!(!node
        .election_scheduler
        .flush_timeout(Duration::from_millis(100)));
}

#[test]
fn configured_shutdown_mode_is_used() {
    let mut system = System::new();
    let mut config = System::default_config();
    config.election_scheduler.shutdown_mode = ShutdownMode::Drain;
    let node = system.build_node().config(config).finish();
    let tracker = node.active.track_inserted();

    let guard = node.active.lock();
    insert_blocks(&node, 2);
    wait_until_worker_is_blocked(&node);
    let node2 = node.clone();
    let stopper = thread::spawn(move || node2.stop());
    assert_timely(Duration::from_secs(5), || {
        node.election_scheduler.is_stopped()
    });
    drop(guard);
    stopper.join().unwrap();

    assert_eq!(tracker.len(), 2);
}

#[test]
fn insert_after_stop_is_dropped() {
    let mut system = System::new();
    let node = system.make_node();
    node.stop();

    insert_blocks(&node, 1);

    assert!(node.election_scheduler.is_empty());
    assert_eq!(
        node.stats.count(
            StatType::ElectionScheduler,
            DetailType::Dropped,
            Direction::In
        ),
        1
    );
}

#[test]
fn stop_is_idempotent() {
    let mut system = System::new();
    let node = system.make_node();
    node.election_scheduler.stop();
    node.election_scheduler.stop();
    assert!(node.election_scheduler.is_stopped());
}

fn insert_blocks(node: &Node, count: u64) {
    for i in 0..count {
        let block = Block::builder().account(Account::from(7000 + i)).build();
        node.election_scheduler.insert(
            Arc::new(SavedBlock::new(block, Default::default())),
            None,
            ElectionBehavior::Manual,
            None,
        );
    }
}

/// The worker counts a loop iteration before it calls into the elections
/// container, where it blocks while the container is locked
fn wait_until_worker_is_blocked(node: &Node) {
    assert_timely_eq(
        Duration::from_secs(5),
        || {
            node.stats.count(
                StatType::ElectionScheduler,
                DetailType::Loop,
                Direction::In,
            )
        },
        1,
    );
}
