use nanosched_core::{Amount, BlockHash, QualifiedRoot, SavedBlock};
use serde::Serialize;
use serde_variant::to_variant_name;
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

/// Invoked with the winning block once an election is confirmed
pub type ConfirmationAction = Arc<dyn Fn(&Arc<SavedBlock>) + Send + Sync>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElectionBehavior {
    Manual,
    #[default]
    Priority,
    /// Elections started because of votes that arrived before the block
    Hinted,
    Optimistic,
}

impl ElectionBehavior {
    pub fn as_str(&self) -> &'static str {
        to_variant_name(self).unwrap_or_default()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ElectionState {
    /// Only listening for incoming votes
    Passive,
    /// Actively request confirmations
    Active,
    Confirmed,
}

/// A consensus round for one qualified root.
/// Competing blocks for the same root join the same election.
pub struct Election {
    pub qualified_root: QualifiedRoot,
    pub behavior: ElectionBehavior,
    pub election_start: Instant,
    mutex: Mutex<ElectionData>,
}

impl Election {
    pub fn new(
        block: Arc<SavedBlock>,
        behavior: ElectionBehavior,
        previous_balance: Option<Amount>,
        confirmation_action: Option<ConfirmationAction>,
    ) -> Self {
        let mut last_blocks = HashMap::new();
        last_blocks.insert(block.hash(), Arc::clone(&block));
        Self {
            qualified_root: block.qualified_root(),
            behavior,
            election_start: Instant::now(),
            mutex: Mutex::new(ElectionData {
                state: ElectionState::Passive,
                state_start: Instant::now(),
                winner: block,
                last_blocks,
                previous_balance,
                confirmation_actions: confirmation_action.into_iter().collect(),
            }),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ElectionData> {
        self.mutex.lock().unwrap()
    }

    pub fn state(&self) -> ElectionState {
        self.lock().state
    }

    pub fn is_confirmed(&self) -> bool {
        self.state() == ElectionState::Confirmed
    }

    /// Moves a passive election into the active tier. Returns false if the
    /// election was not passive.
    pub fn transition_active(&self) -> bool {
        self.lock()
            .state_change(ElectionState::Passive, ElectionState::Active)
            .is_ok()
    }

    pub fn winner(&self) -> Arc<SavedBlock> {
        Arc::clone(&self.lock().winner)
    }

    pub fn contains(&self, hash: &BlockHash) -> bool {
        self.lock().last_blocks.contains_key(hash)
    }

    pub fn blocks(&self) -> Vec<Arc<SavedBlock>> {
        self.lock().last_blocks.values().cloned().collect()
    }

    pub fn blocks_count(&self) -> usize {
        self.lock().last_blocks.len()
    }

    pub fn previous_balance(&self) -> Option<Amount> {
        self.lock().previous_balance
    }

    pub fn confirmation_action_count(&self) -> usize {
        self.lock().confirmation_actions.len()
    }

    /// Time spent in the current state
    pub fn state_duration(&self) -> Duration {
        self.lock().state_start.elapsed()
    }
}

impl Debug for Election {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Election")
            .field("qualified_root", &self.qualified_root)
            .field("behavior", &self.behavior)
            .field("state", &self.state())
            .finish()
    }
}

pub(crate) struct ElectionData {
    pub state: ElectionState,
    pub state_start: Instant,
    pub winner: Arc<SavedBlock>,
    pub last_blocks: HashMap<BlockHash, Arc<SavedBlock>>,
    pub previous_balance: Option<Amount>,
    pub confirmation_actions: Vec<ConfirmationAction>,
}

impl ElectionData {
    pub fn state_change(
        &mut self,
        expected: ElectionState,
        desired: ElectionState,
    ) -> Result<(), ()> {
        if Self::valid_change(expected, desired) && self.state == expected {
            self.state = desired;
            self.state_start = Instant::now();
            Ok(())
        } else {
            Err(())
        }
    }

    fn valid_change(expected: ElectionState, desired: ElectionState) -> bool {
        matches!(
            (expected, desired),
            (ElectionState::Passive, ElectionState::Active)
                | (ElectionState::Passive, ElectionState::Confirmed)
                | (ElectionState::Active, ElectionState::Confirmed)
        )
    }

    /// Adds a competing block. Returns false if the block is already known
    /// or the election is full.
    pub fn add_block(&mut self, block: Arc<SavedBlock>, max_blocks: usize) -> bool {
        if self.last_blocks.contains_key(&block.hash()) || self.last_blocks.len() >= max_blocks {
            return false;
        }
        self.last_blocks.insert(block.hash(), block);
        true
    }

    /// Marks the election as confirmed and hands out the actions that have
    /// to be invoked with the winner. Returns `None` if it already was confirmed.
    pub fn confirm(&mut self) -> Option<(Arc<SavedBlock>, Vec<ConfirmationAction>)> {
        let state = self.state;
        self.state_change(state, ElectionState::Confirmed).ok()?;
        Some((
            Arc::clone(&self.winner),
            std::mem::take(&mut self.confirmation_actions),
        ))
    }
}
