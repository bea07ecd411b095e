use std::{
    sync::{Arc, Condvar, Mutex, RwLock, Weak},
    time::Duration,
};

/// Records everything a component emitted while the tracker was alive.
/// Can be shared across threads; waiting callers are woken on every emit.
pub struct OutputTrackerMt<T: Clone + 'static> {
    output: Mutex<Vec<T>>,
    condition: Condvar,
}

impl<T: Clone + 'static> OutputTrackerMt<T> {
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Vec::new()),
            condition: Condvar::new(),
        }
    }

    fn add(&self, t: T) {
        self.output.lock().unwrap().push(t);
        self.condition.notify_all();
    }

    pub fn output(&self) -> Vec<T> {
        self.output.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.output.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.output.lock().unwrap().clear();
    }

    /// Blocks until at least `count` outputs were recorded.
    /// Returns false if that did not happen within `timeout`.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let guard = self.output.lock().unwrap();
        let (_guard, result) = self
            .condition
            .wait_timeout_while(guard, timeout, |output| output.len() < count)
            .unwrap();
        !result.timed_out()
    }
}

impl<T: Clone + 'static> Default for OutputTrackerMt<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Emitting side of output tracking. Emitting is a no-op as long as nobody tracks.
pub struct OutputListenerMt<T: Clone + 'static> {
    trackers: RwLock<Vec<Weak<OutputTrackerMt<T>>>>,
}

impl<T: Clone + 'static> OutputListenerMt<T> {
    pub fn new() -> Self {
        Self {
            trackers: RwLock::new(Vec::new()),
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.tracker_count() > 0
    }

    pub fn track(&self) -> Arc<OutputTrackerMt<T>> {
        let tracker = Arc::new(OutputTrackerMt::new());
        self.trackers.write().unwrap().push(Arc::downgrade(&tracker));
        tracker
    }

    pub fn emit(&self, t: T) {
        let mut has_dropped = false;
        {
            let trackers = self.trackers.read().unwrap();
            if trackers.is_empty() {
                return;
            }
            for tracker in trackers.iter() {
                match tracker.upgrade() {
                    Some(tracker) => tracker.add(t.clone()),
                    None => has_dropped = true,
                }
            }
        }

        if has_dropped {
            self.trackers
                .write()
                .unwrap()
                .retain(|t| t.strong_count() > 0);
        }
    }

    pub fn tracker_count(&self) -> usize {
        self.trackers.read().unwrap().len()
    }
}

impl<T: Clone + 'static> Default for OutputListenerMt<T> {
    fn default() -> Self {
        Self::new()
    }
}
