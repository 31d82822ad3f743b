//! Activity event model.
//!
//! Window changes and idle transitions share one durable representation;
//! lifecycle markers are a tagged variant so the sampler can treat them
//! uniformly while the remote schema sees plain records.

use crate::libs::device::DeviceIdentity;
use chrono::{SecondsFormat, Utc};

pub const PAUSE_MARKER: &str = "[PAUSE]";
pub const RESUME_MARKER: &str = "[RESUME]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Pause,
    Resume,
}

/// An event the sampler or command watcher wants to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedEvent {
    /// Focus moved to a new `(process, title)` pair.
    Normal { process: String, title: String },
    /// Idle state transition marker.
    Lifecycle(Lifecycle),
}

impl TrackedEvent {
    pub fn process(&self) -> &str {
        match self {
            TrackedEvent::Normal { process, .. } => process,
            TrackedEvent::Lifecycle(Lifecycle::Pause) => PAUSE_MARKER,
            TrackedEvent::Lifecycle(Lifecycle::Resume) => RESUME_MARKER,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TrackedEvent::Normal { title, .. } => title,
            TrackedEvent::Lifecycle(Lifecycle::Pause) => PAUSE_MARKER,
            TrackedEvent::Lifecycle(Lifecycle::Resume) => RESUME_MARKER,
        }
    }
}

/// Insert payload for the durable queue.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub timestamp: String,
    pub process: String,
    pub window_title: String,
    pub cpu_percent: f64,
    pub device_id: String,
    pub username: String,
}

impl NewActivity {
    /// Stamps an event with the current UTC time and the device identity.
    pub fn now(event: &TrackedEvent, cpu_percent: f64, identity: &DeviceIdentity) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            process: event.process().to_string(),
            window_title: event.title().to_string(),
            cpu_percent,
            device_id: identity.device_id.clone(),
            username: identity.username.clone(),
        }
    }
}

/// A durable record as read back from the local queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub id: i64,
    pub timestamp: String,
    pub process: String,
    pub window_title: String,
    pub cpu_percent: f64,
    pub synced: bool,
    pub device_id: String,
    pub username: String,
}
