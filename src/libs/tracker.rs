//! Sampler loop: turns window snapshots and idle transitions into durable
//! activity records.
//!
//! The state machine has two states, `Running` and `Paused`. Each idle
//! transition emits exactly one synthetic marker; while running, a record is
//! emitted only when the normalized `(process, title)` pair differs from the
//! last *emitted* pair. Blacklisted processes are skipped without touching
//! that comparison state, and a failed or unknown snapshot suppresses
//! emission entirely so a broken inspector cannot flood the queue.
//!
//! `observe` computes the candidate emission without mutating any state;
//! `commit` applies the transition only after the durable insert succeeded.
//! A storage failure therefore leaves the event pending retry on the next
//! tick instead of dropping it.

use crate::db::activities::Activities;
use crate::libs::activity::{Lifecycle, NewActivity, TrackedEvent};
use crate::libs::device::DeviceIdentity;
use crate::libs::idle::IdleDetector;
use crate::libs::messages::Message;
use crate::libs::window::{normalize_process, WindowInspector};
use crate::{msg_info, msg_print, msg_warning};
use std::time::Duration;
use sysinfo::System;

pub struct Tracker {
    inspector: Box<dyn WindowInspector>,
    blacklist: Vec<String>,
    paused: bool,
    last_emitted: Option<(String, String)>,
}

impl Tracker {
    pub fn new(inspector: Box<dyn WindowInspector>, blacklist: &[String]) -> Self {
        Self {
            inspector,
            blacklist: blacklist.iter().map(|p| p.to_lowercase()).collect(),
            paused: false,
            last_emitted: None,
        }
    }

    fn is_blacklisted(&self, process: &str) -> bool {
        let lowered = process.to_lowercase();
        self.blacklist.iter().any(|p| *p == lowered)
    }

    /// Computes what this tick should emit, if anything. Does not mutate
    /// the pause or last-emitted state.
    pub fn observe(&mut self, active: bool) -> Option<TrackedEvent> {
        if !active {
            if self.paused {
                return None;
            }
            return Some(TrackedEvent::Lifecycle(Lifecycle::Pause));
        }
        if self.paused {
            return Some(TrackedEvent::Lifecycle(Lifecycle::Resume));
        }

        let snapshot = match self.inspector.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                msg_warning!(Message::CaptureFailed(e.to_string()));
                return None;
            }
        };
        if snapshot.is_unknown() {
            return None;
        }

        let process = normalize_process(&snapshot.process);
        if process.is_empty() || self.is_blacklisted(&process) {
            return None;
        }

        let pair = (process, snapshot.title);
        if self.last_emitted.as_ref() == Some(&pair) {
            return None;
        }
        Some(TrackedEvent::Normal {
            process: pair.0,
            title: pair.1,
        })
    }

    /// Applies the state transition for an event whose durable insert
    /// succeeded.
    pub fn commit(&mut self, event: &TrackedEvent) {
        match event {
            TrackedEvent::Lifecycle(Lifecycle::Pause) => self.paused = true,
            TrackedEvent::Lifecycle(Lifecycle::Resume) => self.paused = false,
            TrackedEvent::Normal { process, title } => {
                self.last_emitted = Some((process.clone(), title.clone()));
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Drives the tracker on a fixed interval against the durable queue.
pub struct SamplerLoop {
    tracker: Tracker,
    idle: IdleDetector,
    activities: Activities,
    identity: DeviceIdentity,
    interval: Duration,
    system: System,
}

impl SamplerLoop {
    pub fn new(
        tracker: Tracker,
        idle: IdleDetector,
        activities: Activities,
        identity: DeviceIdentity,
        interval: Duration,
    ) -> Self {
        // CPU usage is a delta between two refreshes; priming here makes
        // the first tick's reading meaningful.
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self {
            tracker,
            idle,
            activities,
            identity,
            interval,
            system,
        }
    }

    fn cpu_percent(&mut self) -> f64 {
        self.system.refresh_cpu_usage();
        f64::from(self.system.global_cpu_usage())
    }

    /// One sampling tick: zero or one durable insert.
    pub fn tick(&mut self) {
        let active = self.idle.is_active();
        let Some(event) = self.tracker.observe(active) else {
            return;
        };

        let cpu = self.cpu_percent();
        let activity = NewActivity::now(&event, cpu, &self.identity);
        match self.activities.insert(&activity) {
            Ok(_) => {
                match &event {
                    TrackedEvent::Lifecycle(Lifecycle::Pause) => msg_info!(Message::TrackerPaused),
                    TrackedEvent::Lifecycle(Lifecycle::Resume) => msg_info!(Message::TrackerResumed),
                    TrackedEvent::Normal { process, title } => {
                        msg_print!(Message::EventRecorded(process.clone(), title.clone()))
                    }
                }
                self.tracker.commit(&event);
            }
            Err(e) => {
                // Uncommitted state re-emits the same event next tick.
                msg_warning!(Message::EventInsertFailed(e.to_string()));
            }
        }
    }

    pub async fn run(mut self) {
        loop {
            tokio::time::sleep(self.interval).await;
            self.tick();
        }
    }
}
