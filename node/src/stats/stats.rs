use super::{DetailType, Direction, StatType};
use nanosched_core::utils::get_env_bool;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        RwLock,
    },
    time::{Duration, Instant},
};
use tracing::debug;

/// Counters of everything interesting that happens in the node
pub struct Stats {
    mutables: RwLock<StatMutables>,
    enable_logging: bool,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            mutables: RwLock::new(StatMutables {
                counters: BTreeMap::new(),
                timestamp: Instant::now(),
            }),
            enable_logging: get_env_bool("NANO_LOG_STATS").unwrap_or(false),
        }
    }

    /// Add `value` to given counter
    pub fn add(&self, stat_type: StatType, detail: DetailType, value: u64) {
        self.add_dir(stat_type, detail, Direction::In, value)
    }

    /// Add `value` to given counter
    pub fn add_dir(&self, stat_type: StatType, detail: DetailType, dir: Direction, value: u64) {
        if value == 0 {
            return;
        }

        if self.enable_logging {
            debug!(
                "Stat: {:?}::{:?}::{:?} += {}",
                stat_type, detail, dir, value
            );
        }

        let key = CounterKey::new(stat_type, detail, dir);

        // This is a two-step process to avoid exclusively locking the mutex in the common case
        {
            let lock = self.mutables.read().unwrap();
            if let Some(counter) = lock.counters.get(&key) {
                counter.add(value);
                return;
            }
        }
        // Not found, create a new entry
        {
            let mut lock = self.mutables.write().unwrap();
            lock.counters
                .entry(key)
                .or_insert_with(CounterEntry::new)
                .add(value);
        }
    }

    pub fn inc(&self, stat_type: StatType, detail: DetailType) {
        self.add_dir(stat_type, detail, Direction::In, 1)
    }

    pub fn inc_dir(&self, stat_type: StatType, detail: DetailType, dir: Direction) {
        self.add_dir(stat_type, detail, dir, 1)
    }

    /// Returns current value for the given counter
    pub fn count(&self, stat_type: StatType, detail: DetailType, dir: Direction) -> u64 {
        let key = CounterKey::new(stat_type, detail, dir);
        self.mutables
            .read()
            .unwrap()
            .counters
            .get(&key)
            .map(|i| i.into())
            .unwrap_or_default()
    }

    /// Returns the sum of all details of a stat type
    pub fn count_all(&self, stat_type: StatType, dir: Direction) -> u64 {
        let guard = self.mutables.read().unwrap();
        guard
            .counters
            .iter()
            .filter(|(key, _)| key.stat_type == stat_type && key.dir == dir)
            .map(|(_, entry)| u64::from(entry))
            .sum()
    }

    /// Returns the duration since `clear()` was last called, or node startup if it's never called.
    pub fn last_reset(&self) -> Duration {
        self.mutables.read().unwrap().timestamp.elapsed()
    }

    /// Clear all stats
    pub fn clear(&self) {
        let mut lock = self.mutables.write().unwrap();
        lock.counters.clear();
        lock.timestamp = Instant::now();
    }

    /// All counters as `{ type: { detail: { dir: value } } }`
    pub fn counters_json(&self) -> serde_json::Value {
        let lock = self.mutables.read().unwrap();
        let mut result = serde_json::Map::new();
        for (key, entry) in &lock.counters {
            let details = result
                .entry(key.stat_type.as_str())
                .or_insert_with(|| serde_json::Value::Object(Default::default()));
            if let serde_json::Value::Object(details) = details {
                let dirs = details
                    .entry(key.detail.as_str())
                    .or_insert_with(|| serde_json::Value::Object(Default::default()));
                if let serde_json::Value::Object(dirs) = dirs {
                    dirs.insert(key.dir.as_str().to_owned(), u64::from(entry).into());
                }
            }
        }
        serde_json::Value::Object(result)
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
struct CounterKey {
    stat_type: StatType,
    detail: DetailType,
    dir: Direction,
}

impl CounterKey {
    fn new(stat_type: StatType, detail: DetailType, dir: Direction) -> Self {
        Self {
            stat_type,
            detail,
            dir,
        }
    }
}

struct StatMutables {
    /// Stat entries are sorted by key to simplify processing of log output
    counters: BTreeMap<CounterKey, CounterEntry>,

    /// Time of last clear() call
    timestamp: Instant,
}

struct CounterEntry(AtomicU64);

impl CounterEntry {
    fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    fn add(&self, value: u64) {
        self.0.fetch_add(value, Ordering::SeqCst);
    }
}

impl From<&CounterEntry> for u64 {
    fn from(value: &CounterEntry) -> Self {
        value.0.load(Ordering::SeqCst)
    }
}
