//! Debounced attention-level overrides.
//!
//! Level-change intents arrive in bursts (a control being dragged); each
//! intent for a catalog entry resets that entry's timer and only the value
//! that survives the debounce window is written to the remote store, so a
//! burst produces exactly one remote write carrying its final value.

use crate::api::RemoteStore;
use crate::libs::debounce::Debouncer;
use crate::libs::messages::Message;
use crate::{msg_success, msg_warning};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const LEVEL_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

pub struct LevelOverrides {
    remote: Arc<dyn RemoteStore>,
    debouncer: Debouncer<String>,
}

impl LevelOverrides {
    pub fn new(remote: Arc<dyn RemoteStore>, delay: Duration) -> Self {
        Self {
            remote,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Registers a level-change intent for a catalog entry. The write is
    /// issued only if no newer intent for the same entry arrives within the
    /// debounce window.
    pub fn set_level(&self, entry_id: &str, level: u8) {
        let remote = Arc::clone(&self.remote);
        let id = entry_id.to_string();
        self.debouncer.call(id.clone(), move || async move {
            match remote.update_level(&id, level).await {
                Ok(()) => msg_success!(Message::LevelUpdated(id.clone(), level)),
                Err(e) => msg_warning!(Message::LevelUpdateFailed(id.clone(), e.to_string())),
            }
        });
    }

    /// Waits for every pending write to settle. Used by CLI sessions before
    /// exiting.
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }
}
