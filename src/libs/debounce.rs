//! Keyed debouncing: coalesce a burst of intents per key into one action
//! applied once the burst settles.
//!
//! Each intent bumps the key's generation and spawns a fresh timer; only
//! the timer whose generation is still current when it fires gets to act.
//! The generation check and the commit happen under the same lock, so a
//! superseded timer can never double-apply, and a timer that has already
//! committed is never aborted mid-action by a later intent.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

struct Pending {
    generation: u64,
    committed: bool,
    handle: JoinHandle<()>,
}

pub struct Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    delay: Duration,
    next_generation: AtomicU64,
    pending: Arc<Mutex<HashMap<K, Pending>>>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_generation: AtomicU64::new(0),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedules `action` to run after the debounce delay, cancelling any
    /// timer still waiting for the same key.
    pub fn call<F, Fut>(&self, key: K, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let map = Arc::clone(&self.pending);
        let delay = self.delay;
        let task_key = key.clone();

        // Holding the lock across the spawn guarantees the new entry is in
        // place before the timer's commit check can run, even with a zero
        // delay.
        let mut pending = self.pending.lock();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Commit point: only the current generation survives.
            {
                let mut pending = map.lock();
                match pending.get_mut(&task_key) {
                    Some(p) if p.generation == generation => p.committed = true,
                    _ => return,
                }
            }

            action().await;

            let mut pending = map.lock();
            if pending.get(&task_key).map(|p| p.generation) == Some(generation) {
                pending.remove(&task_key);
            }
        });

        if let Some(prev) = pending.get(&key) {
            // A committed predecessor is already past its timer; its action
            // runs to completion and this entry simply supersedes it.
            if !prev.committed {
                prev.handle.abort();
            }
        }
        pending.insert(
            key,
            Pending {
                generation,
                committed: false,
                handle,
            },
        );
    }

    /// Waits until every pending timer has either fired and finished or
    /// been superseded.
    pub async fn settle(&self) {
        loop {
            if self.pending.lock().is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub fn pending_keys(&self) -> usize {
        self.pending.lock().len()
    }
}
