//! Error taxonomy for the agent's failure domains.
//!
//! None of these are fatal to the agent: capture failures are recovered
//! locally, storage failures are surfaced so the caller retries on the next
//! tick, and remote failures abort at most one sync run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Window inspector or input probe failed or was unavailable.
    #[error("capture failed: {0}")]
    Capture(String),

    /// Durable queue insert/read/update failed. Surfaced to the caller so
    /// the event stays pending retry instead of being dropped.
    #[error("local storage failure: {0}")]
    LocalStorage(#[from] rusqlite::Error),

    /// Network or remote-store error during a sync run. Aborts only that
    /// run; unsynced records are left untouched.
    #[error("remote sync failure: {0}")]
    RemoteSync(String),

    /// Insert-if-absent of a single catalog entry failed. Logged and
    /// skipped without aborting the sync run.
    #[error("catalog upsert failure for ({process}, {window_title}): {source}")]
    CatalogUpsert {
        process: String,
        window_title: String,
        #[source]
        source: anyhow::Error,
    },
}
