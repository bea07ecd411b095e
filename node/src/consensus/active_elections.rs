use super::{ConfirmationAction, Election, ElectionBehavior};
use crate::stats::{DetailType, StatType, Stats};
use nanosched_core::{utils::ContainerInfo, Amount, QualifiedRoot, SavedBlock};
use nanosched_output_tracker::{OutputListenerMt, OutputTrackerMt};
use std::{
    collections::HashMap,
    mem::size_of,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::trace;

/// Everything needed to start an election for a block or to join an
/// existing one
#[derive(Clone)]
pub struct InsertionRequest {
    pub block: Arc<SavedBlock>,
    pub previous_balance: Option<Amount>,
    pub behavior: ElectionBehavior,
    pub confirmation_action: Option<ConfirmationAction>,
}

impl InsertionRequest {
    pub fn new(block: Arc<SavedBlock>) -> Self {
        Self {
            block,
            previous_balance: None,
            behavior: ElectionBehavior::Priority,
            confirmation_action: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveElectionsConfig {
    /// Maximum number of competing blocks an election keeps track of
    pub max_blocks_per_election: usize,
}

impl Default for ActiveElectionsConfig {
    fn default() -> Self {
        Self {
            max_blocks_per_election: 10,
        }
    }
}

/// Container of the elections that are currently running
pub struct ActiveElections {
    config: ActiveElectionsConfig,
    mutex: Mutex<ActiveElectionsData>,
    stats: Arc<Stats>,
    insert_listener: OutputListenerMt<InsertionRequest>,
}

impl ActiveElections {
    pub fn new(config: ActiveElectionsConfig, stats: Arc<Stats>) -> Self {
        Self {
            config,
            mutex: Mutex::new(ActiveElectionsData::default()),
            stats,
            insert_listener: OutputListenerMt::new(),
        }
    }

    /// Records every insertion request in call order
    pub fn track_inserted(&self) -> Arc<OutputTrackerMt<InsertionRequest>> {
        self.insert_listener.track()
    }

    /// Exclusive access to the election container. Every other method of
    /// this type blocks while the guard is held.
    pub fn lock(&self) -> MutexGuard<'_, ActiveElectionsData> {
        self.mutex.lock().unwrap()
    }

    /// Starts a new election for the block or joins the existing election
    /// for its root. The boolean is true if a new election was started.
    pub fn insert(&self, request: InsertionRequest) -> (bool, Option<Arc<Election>>) {
        let mut guard = self.mutex.lock().unwrap();
        self.insert_listener.emit(request.clone());

        let root = request.block.qualified_root();
        if let Some(existing) = guard.roots.get(&root) {
            let existing = Arc::clone(existing);
            self.join(&existing, request);
            drop(guard);
            return (false, Some(existing));
        }

        let election = Arc::new(Election::new(
            Arc::clone(&request.block),
            request.behavior,
            request.previous_balance,
            request.confirmation_action,
        ));
        guard.roots.insert(root, Arc::clone(&election));
        *guard.count_by_behavior.entry(request.behavior).or_default() += 1;
        drop(guard);

        self.stats
            .inc(StatType::ActiveElections, DetailType::ElectionStarted);
        trace!(
            qualified_root = %root,
            behavior = request.behavior.as_str(),
            "election started"
        );
        (true, Some(election))
    }

    fn join(&self, election: &Election, request: InsertionRequest) {
        let mut election_guard = election.lock();
        election_guard.add_block(request.block, self.config.max_blocks_per_election);
        if let Some(action) = request.confirmation_action {
            election_guard.confirmation_actions.push(action);
        }
        drop(election_guard);
        self.stats
            .inc(StatType::ActiveElections, DetailType::ElectionJoined);
    }

    pub fn election(&self, root: &QualifiedRoot) -> Option<Arc<Election>> {
        self.mutex.lock().unwrap().roots.get(root).cloned()
    }

    pub fn active(&self, root: &QualifiedRoot) -> bool {
        self.mutex.lock().unwrap().roots.contains_key(root)
    }

    /// Confirms the election for the root, removes it from the container and
    /// invokes its confirmation actions with the winner
    pub fn force_confirm(&self, root: &QualifiedRoot) -> Option<Arc<Election>> {
        let election = self.mutex.lock().unwrap().remove(root)?;

        let confirmed = election.lock().confirm();
        if let Some((winner, actions)) = confirmed {
            self.stats
                .inc(StatType::ActiveElections, DetailType::Confirmed);
            trace!(qualified_root = %root, winner = %winner.hash(), "election confirmed");
            for action in actions {
                action(&winner);
            }
        }
        Some(election)
    }

    /// Removes the election without confirming it
    pub fn erase(&self, root: &QualifiedRoot) -> bool {
        let erased = self.mutex.lock().unwrap().remove(root);
        if erased.is_some() {
            trace!(qualified_root = %root, "election erased");
        }
        erased.is_some()
    }

    pub fn len(&self) -> usize {
        self.mutex.lock().unwrap().roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_by_behavior(&self, behavior: ElectionBehavior) -> usize {
        self.mutex.lock().unwrap().count_by_behavior(behavior)
    }

    pub fn list_active(&self) -> Vec<Arc<Election>> {
        self.mutex.lock().unwrap().roots.values().cloned().collect()
    }

    pub fn container_info(&self) -> ContainerInfo {
        let guard = self.mutex.lock().unwrap();
        ContainerInfo::builder()
            .leaf(
                "roots",
                guard.roots.len(),
                size_of::<QualifiedRoot>() + size_of::<Arc<Election>>(),
            )
            .leaf(
                "priority",
                guard.count_by_behavior(ElectionBehavior::Priority),
                0,
            )
            .leaf(
                "manual",
                guard.count_by_behavior(ElectionBehavior::Manual),
                0,
            )
            .finish()
    }
}

#[derive(Default)]
pub struct ActiveElectionsData {
    roots: HashMap<QualifiedRoot, Arc<Election>>,
    count_by_behavior: HashMap<ElectionBehavior, usize>,
}

impl ActiveElectionsData {
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn count_by_behavior(&self, behavior: ElectionBehavior) -> usize {
        self.count_by_behavior
            .get(&behavior)
            .copied()
            .unwrap_or_default()
    }

    fn remove(&mut self, root: &QualifiedRoot) -> Option<Arc<Election>> {
        let election = self.roots.remove(root)?;
        if let Some(count) = self.count_by_behavior.get_mut(&election.behavior) {
            *count -= 1;
        }
        Some(election)
    }
}
