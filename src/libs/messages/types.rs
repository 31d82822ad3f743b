/// Every user-facing message the agent can emit.
///
/// Centralizing message content keeps wording consistent across the
/// tracking, sync, and catalog paths and keeps format strings out of the
/// call sites.
#[derive(Debug, Clone)]
pub enum Message {
    // === WATCH / TRACKER MESSAGES ===
    WatchStarted,
    WatchStopped,
    TrackerPaused,
    TrackerResumed,
    EventRecorded(String, String),     // process, title
    EventInsertFailed(String),         // error
    CaptureFailed(String),             // error
    InputListenerFailed(String),       // error

    // === COMMAND WATCHER MESSAGES ===
    CommandRecorded(String),           // command
    CommandWatchDisabled,

    // === SYNC MESSAGES ===
    SyncNothingToDeliver,
    SyncDelivered(usize),              // record count
    SyncFailed(String),                // error
    CatalogUpsertFailed(String, String), // process, error
    DeviceRegistered(String),          // device id
    DeviceRegistrationFailed(String),  // error

    // === CATALOG / LEVEL MESSAGES ===
    CatalogEmpty,
    LevelUpdated(String, u8),          // entry id, level
    LevelUpdateFailed(String, String), // entry id, error
    LevelOutOfRange(u8),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError(String),
    RemoteEndpointMissing,
    PromptRemoteUrl,
    PromptRemoteDatabase,
    PromptTrackingInterval,
    PromptSyncInterval,
    PromptInactivityThreshold,
}
