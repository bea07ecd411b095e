use super::{ActiveElections, ConfirmationAction, ElectionBehavior, InsertionRequest};
use crate::stats::{DetailType, StatType, Stats};
use nanosched_core::{
    utils::ContainerInfo, Account, AccountInfo, Amount, ConfirmationHeightInfo, SavedBlock,
};
use nanosched_ledger::{LedgerReader, Transaction};
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    mem::size_of,
    sync::{Arc, Condvar, Mutex, MutexGuard},
    thread::JoinHandle,
    time::Duration,
};
use tracing::{debug, trace, warn};

/// What happens to queued work when the scheduler is stopped
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownMode {
    /// Queued items are abandoned
    #[default]
    Cancel,
    /// Everything queued before the stop request is processed first
    Drain,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ElectionSchedulerConfig {
    pub shutdown_mode: ShutdownMode,
}

/// Number of items the worker has finished, per queue.
/// The counters only ever grow, so they double as sequence numbers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Progress {
    pub activate_queued: u64,
    pub insert_queued: u64,
}

impl Progress {
    fn reached(&self, target: &Progress) -> bool {
        self.activate_queued >= target.activate_queued && self.insert_queued >= target.insert_queued
    }
}

/// Decides when an account's next unconfirmed block gets an election and
/// hands those blocks over to [`ActiveElections`] on a dedicated thread.
pub struct ElectionScheduler {
    config: ElectionSchedulerConfig,
    thread: Mutex<Option<JoinHandle<()>>>,
    condition: Condvar,
    mutex: Mutex<ElectionSchedulerImpl>,
    ledger: Arc<dyn LedgerReader>,
    active: Arc<ActiveElections>,
    stats: Arc<Stats>,
}

impl ElectionScheduler {
    pub fn new(
        config: ElectionSchedulerConfig,
        ledger: Arc<dyn LedgerReader>,
        active: Arc<ActiveElections>,
        stats: Arc<Stats>,
    ) -> Self {
        Self {
            config,
            thread: Mutex::new(None),
            condition: Condvar::new(),
            mutex: Mutex::new(ElectionSchedulerImpl {
                activate_queue: VecDeque::new(),
                insert_queue: VecDeque::new(),
                progress: Progress::default(),
                stopped: false,
                shutdown_mode: ShutdownMode::Cancel,
                worker_running: false,
                halted: false,
            }),
            ledger,
            active,
            stats,
        }
    }

    /// Queues a request to start (or join) an election for the block.
    /// Requests arriving after `stop` are dropped.
    pub fn insert(
        &self,
        block: Arc<SavedBlock>,
        previous_balance: Option<Amount>,
        behavior: ElectionBehavior,
        confirmation_action: Option<ConfirmationAction>,
    ) {
        let mut guard = self.mutex.lock().unwrap();
        if guard.stopped {
            drop(guard);
            self.stats
                .inc(StatType::ElectionScheduler, DetailType::Dropped);
            warn!(hash = %block.hash(), "Election scheduler is stopped, insertion dropped");
            return;
        }
        guard.insert_queue.push_back(InsertionRequest {
            block,
            previous_balance,
            behavior,
            confirmation_action,
        });
        drop(guard);
        self.notify();
    }

    /// Second pipeline stage: the worker feeds activated blocks into the
    /// insert queue here, even while a draining stop is in progress.
    fn submit(&self, request: InsertionRequest) {
        self.mutex
            .lock()
            .unwrap()
            .insert_queue
            .push_back(request);
        self.notify();
    }

    /// Queues the next unconfirmed block of the account if all of its
    /// dependencies are confirmed. Returns true if a block was queued.
    pub fn activate(&self, account: &Account) -> bool {
        let tx = self.ledger.tx_begin_read();
        self.activate_in(tx.as_ref(), account)
    }

    fn activate_in(&self, tx: &dyn Transaction, account: &Account) -> bool {
        if let Some(account_info) = self.ledger.account_info(tx, account) {
            let conf_info = self
                .ledger
                .confirmation_height(tx, account)
                .unwrap_or_default();
            if conf_info.height < account_info.block_count {
                return self.activate_with_info(tx, account, &account_info, &conf_info);
            }
        }

        self.stats
            .inc(StatType::ElectionScheduler, DetailType::ActivateSkip);
        false // Not activated
    }

    /// Same as `activate` for callers that already read the account state
    pub fn activate_with_info(
        &self,
        tx: &dyn Transaction,
        account: &Account,
        account_info: &AccountInfo,
        conf_info: &ConfirmationHeightInfo,
    ) -> bool {
        if conf_info.height >= account_info.block_count {
            self.stats
                .inc(StatType::ElectionScheduler, DetailType::ActivateSkip);
            return false;
        }
        debug_assert!(conf_info.frontier != account_info.head);

        let hash = match conf_info.height {
            0 => account_info.open_block,
            _ => self
                .ledger
                .block_successor(tx, &conf_info.frontier)
                .unwrap_or_else(|| {
                    panic!(
                        "Confirmed frontier {} of account {} has no successor",
                        conf_info.frontier,
                        account.encode_account()
                    )
                }),
        };

        let block = self
            .ledger
            .get_block(tx, &hash)
            .unwrap_or_else(|| panic!("Block {} not found in ledger", hash));

        if !self.ledger.dependents_confirmed(tx, &block) {
            self.stats
                .inc(StatType::ElectionScheduler, DetailType::ActivateFailed);
            return false; // Not activated
        }

        let mut guard = self.mutex.lock().unwrap();
        if guard.stopped {
            drop(guard);
            self.stats
                .inc(StatType::ElectionScheduler, DetailType::Dropped);
            return false;
        }
        guard.activate_queue.push_back(Arc::new(block));
        drop(guard);
        self.notify();

        self.stats
            .inc(StatType::ElectionScheduler, DetailType::Activated);
        trace!(
            account = account.encode_account(),
            %hash,
            height = conf_info.height + 1,
            "block activated"
        );
        true // Activated
    }

    /// Activates the next blocks that became eligible because the given
    /// block was confirmed
    pub fn activate_successors(&self, tx: &dyn Transaction, block: &SavedBlock) -> bool {
        // Start or vote for the next unconfirmed block in this account
        let mut result = self.activate_in(tx, &block.account());

        // Start or vote for the next unconfirmed block in the destination account
        if let Some(destination) = block.destination() {
            if !destination.is_zero() && destination != block.account() {
                result |= self.activate_in(tx, &destination);
            }
        }
        result
    }

    /// Blocks until everything that was queued at the time of the call has
    /// been processed. Returns early if the scheduler gets cancelled.
    pub fn flush(&self) {
        self.wait_for_progress(None);
    }

    /// Like `flush`, but gives up after `timeout`.
    /// Returns true if everything was processed in time.
    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        self.wait_for_progress(Some(timeout))
    }

    fn wait_for_progress(&self, timeout: Option<Duration>) -> bool {
        let target = self.mutex.lock().unwrap().flush_target();
        self.wait_for_target(target, timeout)
    }

    fn wait_for_target(&self, target: Progress, timeout: Option<Duration>) -> bool {
        let guard = self.mutex.lock().unwrap();
        let waiting = |i: &mut ElectionSchedulerImpl| !i.progress.reached(&target) && !i.halted();
        let guard = match timeout {
            Some(timeout) => {
                self.condition
                    .wait_timeout_while(guard, timeout, waiting)
                    .unwrap()
                    .0
            }
            None => self.condition.wait_while(guard, waiting).unwrap(),
        };
        guard.progress.reached(&target)
    }

    /// Stops with the configured shutdown mode
    pub fn stop(&self) {
        self.stop_with(self.config.shutdown_mode);
    }

    pub fn stop_with(&self, mode: ShutdownMode) {
        {
            let mut guard = self.mutex.lock().unwrap();
            if !guard.stopped || mode == ShutdownMode::Cancel {
                guard.shutdown_mode = mode;
            }
            guard.stopped = true;
        }
        self.notify();
        let handle = self.thread.lock().unwrap().take();
        if let Some(handle) = handle {
            handle.join().unwrap();
        }
        // Another caller may be joining the worker, wait until it exited
        let remaining = {
            let mut guard = self
                .condition
                .wait_while(self.mutex.lock().unwrap(), |i| i.worker_running)
                .unwrap();
            guard.halted = true;
            guard.len()
        };
        self.notify();
        debug!(?mode, remaining, "Election scheduler stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.mutex.lock().unwrap().stopped
    }

    pub fn notify(&self) {
        self.condition.notify_all();
    }

    /// Runs one iteration of the worker loop on the calling thread.
    /// Only allowed while the worker thread is not running.
    /// Returns false if there was nothing to do.
    pub fn step(&self) -> bool {
        debug_assert!(self.thread.lock().unwrap().is_none());
        let guard = self.mutex.lock().unwrap();
        if guard.cancelled() || !guard.predicate() {
            return false;
        }
        self.stats.inc(StatType::ElectionScheduler, DetailType::Loop);
        drop(self.run_one(guard));
        self.notify();
        true
    }

    fn run(&self) {
        let mut guard = self.mutex.lock().unwrap();
        loop {
            guard = self
                .condition
                .wait_while(guard, |i| !i.stopped && !i.predicate())
                .unwrap();

            if guard.stopped && (guard.cancelled() || !guard.predicate()) {
                break;
            }

            self.stats.inc(StatType::ElectionScheduler, DetailType::Loop);
            guard = self.run_one(guard);
            self.notify();
        }
        guard.worker_running = false;
        drop(guard);
        self.notify();
    }

    /// Processes at most one item of each queue, activate queue first.
    /// The scheduler lock is released while calling into the elections container.
    fn run_one<'a>(
        &'a self,
        mut guard: MutexGuard<'a, ElectionSchedulerImpl>,
    ) -> MutexGuard<'a, ElectionSchedulerImpl> {
        if let Some(block) = guard.activate_queue.front().cloned() {
            drop(guard);
            self.process_activated(&block);
            guard = self.mutex.lock().unwrap();
            guard.activate_queue.pop_front();
            guard.progress.activate_queued += 1;
        }

        if guard.cancelled() {
            return guard;
        }

        if let Some(request) = guard.insert_queue.front().cloned() {
            drop(guard);
            self.process_insertion(request);
            guard = self.mutex.lock().unwrap();
            guard.insert_queue.pop_front();
            guard.progress.insert_queued += 1;
        }
        guard
    }

    fn process_activated(&self, block: &Arc<SavedBlock>) {
        self.submit(InsertionRequest::new(Arc::clone(block)));
        if let Some(election) = self.active.election(&block.qualified_root()) {
            election.transition_active();
            self.stats
                .inc(StatType::ElectionScheduler, DetailType::Promoted);
        }
    }

    fn process_insertion(&self, request: InsertionRequest) {
        let hash = request.block.hash();
        let behavior = request.behavior;
        self.stats
            .inc(StatType::ElectionScheduler, DetailType::Insert);
        let (inserted, _election) = self.active.insert(request);
        if inserted {
            self.stats
                .inc(StatType::ElectionScheduler, DetailType::InsertActivated);
        }
        trace!(%hash, behavior = behavior.as_str(), inserted, "insertion processed");
    }

    pub fn len(&self) -> usize {
        self.mutex.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn activate_queue_len(&self) -> usize {
        self.mutex.lock().unwrap().activate_queue.len()
    }

    pub fn insert_queue_len(&self) -> usize {
        self.mutex.lock().unwrap().insert_queue.len()
    }

    pub fn progress(&self) -> Progress {
        self.mutex.lock().unwrap().progress
    }

    pub fn container_info(&self) -> ContainerInfo {
        let guard = self.mutex.lock().unwrap();
        ContainerInfo::builder()
            .leaf(
                "activate_queue",
                guard.activate_queue.len(),
                size_of::<Arc<SavedBlock>>(),
            )
            .leaf(
                "insert_queue",
                guard.insert_queue.len(),
                size_of::<InsertionRequest>(),
            )
            .finish()
    }
}

impl Drop for ElectionScheduler {
    fn drop(&mut self) {
        // Thread must be stopped before destruction
        debug_assert!(self.thread.lock().unwrap().is_none());
    }
}

pub trait ElectionSchedulerExt {
    fn start(&self);
}

impl ElectionSchedulerExt for Arc<ElectionScheduler> {
    fn start(&self) {
        debug_assert!(self.thread.lock().unwrap().is_none());
        self.mutex.lock().unwrap().worker_running = true;
        let self_l = Arc::clone(self);
        *self.thread.lock().unwrap() = Some(
            std::thread::Builder::new()
                .name("Sched Election".to_string())
                .spawn(Box::new(move || {
                    self_l.run();
                }))
                .unwrap(),
        );
        debug!("Election scheduler started");
    }
}

struct ElectionSchedulerImpl {
    activate_queue: VecDeque<Arc<SavedBlock>>,
    insert_queue: VecDeque<InsertionRequest>,
    progress: Progress,
    stopped: bool,
    shutdown_mode: ShutdownMode,
    worker_running: bool,
    /// Set once `stop` returned, so no more progress will be made
    halted: bool,
}

impl ElectionSchedulerImpl {
    fn predicate(&self) -> bool {
        !self.activate_queue.is_empty() || !self.insert_queue.is_empty()
    }

    fn cancelled(&self) -> bool {
        self.stopped && self.shutdown_mode == ShutdownMode::Cancel
    }

    fn halted(&self) -> bool {
        self.halted || self.cancelled()
    }

    fn len(&self) -> usize {
        self.activate_queue.len() + self.insert_queue.len()
    }

    fn flush_target(&self) -> Progress {
        Progress {
            activate_queued: self.progress.activate_queued + self.activate_queue.len() as u64,
            insert_queued: self.progress.insert_queued + self.insert_queue.len() as u64,
        }
    }
}
