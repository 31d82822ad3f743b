//! Content-addressed suppression for repeated command samples.
//!
//! Process-list sampling sees the same long-running command on every pass,
//! so each distinct command line gets one suppression timer keyed by its
//! SHA-256 digest. Entries older than the window are pruned on every call,
//! which keeps the map bounded by the number of distinct commands seen
//! within one window.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct DedupFilter {
    window: Duration,
    seen: HashMap<String, Instant>,
}

impl DedupFilter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seen: HashMap::new(),
        }
    }

    /// Stable digest of a full command line.
    pub fn digest(command_line: &str) -> String {
        let hash = Sha256::digest(command_line.as_bytes());
        hash.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// True while the command line's digest is inside its suppression
    /// window. Prunes expired entries but starts no timer.
    pub fn suppressed(&mut self, command_line: &str) -> bool {
        self.suppressed_at(command_line, Instant::now())
    }

    /// Clock-injected variant of [`suppressed`](Self::suppressed).
    pub fn suppressed_at(&mut self, command_line: &str, now: Instant) -> bool {
        self.prune(now);
        let digest = Self::digest(command_line);
        matches!(self.seen.get(&digest), Some(&last) if now.duration_since(last) < self.window)
    }

    /// Starts the suppression timer. Called only once the event is durably
    /// recorded, so a failed insert leaves the command admissible on the
    /// next pass.
    pub fn record(&mut self, command_line: &str) {
        self.record_at(command_line, Instant::now());
    }

    /// Clock-injected variant of [`record`](Self::record).
    pub fn record_at(&mut self, command_line: &str, now: Instant) {
        self.seen.insert(Self::digest(command_line), now);
    }

    /// Check and record in one step, for call sites with no failure path
    /// between the two.
    pub fn admit_at(&mut self, command_line: &str, now: Instant) -> bool {
        if self.suppressed_at(command_line, now) {
            return false;
        }
        self.record_at(command_line, now);
        true
    }

    fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.seen.retain(|_, &mut last| now.duration_since(last) < window);
    }

    pub fn tracked(&self) -> usize {
        self.seen.len()
    }
}
