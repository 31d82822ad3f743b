//! Batch synchronization of the durable queue to the remote store.
//!
//! Protocol per run, in order: read unsynced records (empty read is a no-op
//! and opens no remote connection), bulk-insert the projected documents,
//! best-effort insert-if-absent catalog upserts for each distinct triple,
//! then mark the processed records synced. The mark runs strictly last so a
//! crash at any earlier point replays the whole batch: delivery is
//! at-least-once, duplicates on the remote side are accepted, loss is not.
//!
//! Runs are never concurrent. The periodic loop awaits each run before the
//! next tick and skips ticks missed while a run was in flight.

use crate::api::{CatalogEntry, DeviceRecord, RemoteEventDocument, RemoteStore};
use crate::db::activities::Activities;
use crate::libs::device::DeviceIdentity;
use crate::libs::error::AgentError;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing unsynced; the remote store was not contacted.
    Empty,
    /// This many records were delivered and marked synced.
    Delivered(usize),
}

pub struct SyncEngine {
    activities: Activities,
    remote: Arc<dyn RemoteStore>,
    identity: DeviceIdentity,
    default_level: u8,
}

impl SyncEngine {
    pub fn new(
        activities: Activities,
        remote: Arc<dyn RemoteStore>,
        identity: DeviceIdentity,
        default_level: u8,
    ) -> Self {
        Self {
            activities,
            remote,
            identity,
            default_level,
        }
    }

    /// Insert-only-if-absent device registration. Runs once at startup, not
    /// on the periodic timer. Failure is not fatal: events keep queueing
    /// locally and the next agent start retries.
    pub async fn register_device(&self) {
        let device = DeviceRecord::for_identity(&self.identity);
        match self.remote.register_device(&device).await {
            Ok(()) => msg_info!(Message::DeviceRegistered(device.device_id)),
            Err(e) => msg_warning!(Message::DeviceRegistrationFailed(e.to_string())),
        }
    }

    /// Executes one sync run.
    pub async fn run_once(&mut self) -> Result<SyncOutcome> {
        let records = self.activities.fetch_unsynced()?;
        if records.is_empty() {
            return Ok(SyncOutcome::Empty);
        }
        // fetch_unsynced orders by id ascending, so the last id bounds the
        // batch for the final mark.
        let max_id = records.last().map(|r| r.id).unwrap_or(0);

        let docs: Vec<RemoteEventDocument> = records
            .iter()
            .map(|r| RemoteEventDocument::from_record(r, &self.identity))
            .collect();

        // Event delivery is the primary guarantee; failure aborts the run
        // and the untouched batch is retried wholesale next interval.
        self.remote.insert_events(&docs).await?;

        for entry in self.distinct_catalog_entries(&docs) {
            if let Err(e) = self.remote.upsert_catalog_entry(&entry).await {
                let err = AgentError::CatalogUpsert {
                    process: entry.process.clone(),
                    window_title: entry.window_title.clone(),
                    source: e,
                };
                msg_warning!(Message::CatalogUpsertFailed(entry.process.clone(), err.to_string()));
            }
        }

        self.activities.mark_synced_up_to(max_id)?;
        Ok(SyncOutcome::Delivered(docs.len()))
    }

    /// One catalog entry per distinct (device, process, window) triple in
    /// the batch, in first-seen order, carrying the default level.
    fn distinct_catalog_entries(&self, docs: &[RemoteEventDocument]) -> Vec<CatalogEntry> {
        let mut seen = HashSet::new();
        let mut entries = vec![];
        for doc in docs {
            let key = (doc.device_id.clone(), doc.process.clone(), doc.window_title.clone());
            if seen.insert(key) {
                entries.push(CatalogEntry {
                    id: None,
                    device_id: doc.device_id.clone(),
                    process: doc.process.clone(),
                    window_title: doc.window_title.clone(),
                    level: self.default_level,
                    active: true,
                });
            }
        }
        entries
    }

    /// Periodic sync loop.
    pub async fn run(mut self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await; // first tick fires immediately, skip it
        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(SyncOutcome::Empty) => {}
                Ok(SyncOutcome::Delivered(count)) => msg_success!(Message::SyncDelivered(count)),
                Err(e) => msg_warning!(Message::SyncFailed(e.to_string())),
            }
        }
    }
}
