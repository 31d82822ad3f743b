//! Text rendering for agent messages.
//!
//! Single source of truth for all user-facing wording. Parameters are
//! interpolated here so call sites only pick a `Message` variant.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === WATCH / TRACKER MESSAGES ===
            Message::WatchStarted => "Activity tracking started. Press Ctrl+C to stop".to_string(),
            Message::WatchStopped => "Activity tracking stopped".to_string(),
            Message::TrackerPaused => "No user input, tracking paused".to_string(),
            Message::TrackerResumed => "User input detected, tracking resumed".to_string(),
            Message::EventRecorded(process, title) => format!("Recorded {} - {}", process, title),
            Message::EventInsertFailed(e) => format!("Failed to record event, will retry next tick: {}", e),
            Message::CaptureFailed(e) => format!("Active window detection failed: {}", e),
            Message::InputListenerFailed(e) => format!("Input listener failed, restarting: {}", e),

            // === COMMAND WATCHER MESSAGES ===
            Message::CommandRecorded(cmd) => format!("Recorded command {}", cmd),
            Message::CommandWatchDisabled => "No watched commands configured, command watcher disabled".to_string(),

            // === SYNC MESSAGES ===
            Message::SyncNothingToDeliver => "No unsynced records, skipping sync".to_string(),
            Message::SyncDelivered(count) => format!("Delivered {} record(s) to the remote store", count),
            Message::SyncFailed(e) => format!("Sync run failed, batch kept for retry: {}", e),
            Message::CatalogUpsertFailed(process, e) => format!("Catalog upsert for '{}' failed, skipped: {}", process, e),
            Message::DeviceRegistered(id) => format!("Device {} registered", id),
            Message::DeviceRegistrationFailed(e) => format!("Device registration failed, events will keep queueing locally: {}", e),

            // === CATALOG / LEVEL MESSAGES ===
            Message::CatalogEmpty => "No catalog entries for this device yet".to_string(),
            Message::LevelUpdated(id, level) => format!("Entry {} set to level {}", id, level),
            Message::LevelUpdateFailed(id, e) => format!("Failed to update level for entry {}: {}", id, e),
            Message::LevelOutOfRange(level) => format!("Level {} is out of range (1-10)", level),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigParseError(e) => format!("Failed to parse configuration: {}", e),
            Message::RemoteEndpointMissing => "Remote endpoint is not configured. Run 'vigil init' and set the remote store URL".to_string(),
            Message::PromptRemoteUrl => "Remote store URL".to_string(),
            Message::PromptRemoteDatabase => "Remote database name".to_string(),
            Message::PromptTrackingInterval => "Tracking interval (seconds)".to_string(),
            Message::PromptSyncInterval => "Sync interval (seconds)".to_string(),
            Message::PromptInactivityThreshold => "Inactivity threshold (seconds)".to_string(),
        };
        write!(f, "{}", text)
    }
}
