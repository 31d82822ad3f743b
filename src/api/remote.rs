//! HTTP client for the remote document store.
//!
//! Three collections: `activity_logs` (append-only, no uniqueness
//! constraint, duplicate delivery under retry is expected), `process_windows`
//! (the catalog, unique per `(device_id, process, window_title)`), and
//! `devices` (unique per `device_id`). Catalog and device writes are
//! insert-only-if-absent: the server answers `409 Conflict` for an existing
//! key and the client treats that as success, mirroring a `$setOnInsert`
//! upsert. An existing entry's `level` and `active` flags are therefore
//! never overwritten by sync traffic.

use crate::libs::activity::ActivityRecord;
use crate::libs::device::DeviceIdentity;
use crate::libs::error::AgentError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const EVENTS_URL: &str = "activity_logs/bulk";
const CATALOG_URL: &str = "process_windows";
const DEVICES_URL: &str = "devices";

/// Projection of a local record shipped to the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteEventDocument {
    pub timestamp: String,
    pub process: String,
    pub window_title: String,
    pub cpu_percent: f64,
    pub device_id: String,
    pub username: String,
    pub system: String,
    pub device_name: String,
}

impl RemoteEventDocument {
    pub fn from_record(record: &ActivityRecord, identity: &DeviceIdentity) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            process: record.process.clone(),
            window_title: record.window_title.clone(),
            cpu_percent: record.cpu_percent,
            device_id: record.device_id.clone(),
            username: record.username.clone(),
            system: identity.system.clone(),
            device_name: identity.device_name.clone(),
        }
    }
}

/// One deduplicated (device, process, window) triple with its attention
/// level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub device_id: String,
    pub process: String,
    pub window_title: String,
    pub level: u8,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceRecord {
    pub device_id: String,
    pub user_id: Option<String>,
}

impl DeviceRecord {
    pub fn for_identity(identity: &DeviceIdentity) -> Self {
        Self {
            device_id: identity.device_id.clone(),
            user_id: None,
        }
    }
}

/// Remote store operations the core depends on.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert-only-if-absent device registration. Idempotent across
    /// restarts.
    async fn register_device(&self, device: &DeviceRecord) -> Result<()>;

    /// Append-only bulk insert. Duplicates under retry are acceptable.
    async fn insert_events(&self, docs: &[RemoteEventDocument]) -> Result<()>;

    /// Insert-only-if-absent catalog upsert keyed by
    /// `(device_id, process, window_title)`.
    async fn upsert_catalog_entry(&self, entry: &CatalogEntry) -> Result<()>;

    /// All catalog entries for a device.
    async fn fetch_catalog(&self, device_id: &str) -> Result<Vec<CatalogEntry>>;

    /// Sets the attention level of an existing catalog entry.
    async fn update_level(&self, entry_id: &str, level: u8) -> Result<()>;
}

pub struct RemoteClient {
    client: Client,
    api_url: String,
    database: String,
}

impl RemoteClient {
    pub fn new(api_url: &str, database: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            database: database.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.api_url, self.database, path)
    }

    fn check(status: StatusCode, context: &str) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(AgentError::RemoteSync(format!("{} returned {}", context, status)).into())
        }
    }

    /// Success or `409 Conflict` both count as "the document exists".
    fn check_upsert(status: StatusCode, context: &str) -> Result<()> {
        if status == StatusCode::CONFLICT {
            return Ok(());
        }
        Self::check(status, context)
    }
}

#[async_trait]
impl RemoteStore for RemoteClient {
    async fn register_device(&self, device: &DeviceRecord) -> Result<()> {
        let url = format!("{}/{}", self.url(DEVICES_URL), device.device_id);
        let res = self
            .client
            .put(url)
            .json(device)
            .send()
            .await
            .map_err(|e| AgentError::RemoteSync(e.to_string()))?;
        Self::check_upsert(res.status(), "device registration")
    }

    async fn insert_events(&self, docs: &[RemoteEventDocument]) -> Result<()> {
        let res = self
            .client
            .post(self.url(EVENTS_URL))
            .json(docs)
            .send()
            .await
            .map_err(|e| AgentError::RemoteSync(e.to_string()))?;
        Self::check(res.status(), "event insert")
    }

    async fn upsert_catalog_entry(&self, entry: &CatalogEntry) -> Result<()> {
        let res = self
            .client
            .put(self.url(CATALOG_URL))
            .json(entry)
            .send()
            .await
            .map_err(|e| AgentError::RemoteSync(e.to_string()))?;
        Self::check_upsert(res.status(), "catalog upsert")
    }

    async fn fetch_catalog(&self, device_id: &str) -> Result<Vec<CatalogEntry>> {
        let res = self
            .client
            .get(self.url(CATALOG_URL))
            .query(&[("device_id", device_id)])
            .send()
            .await
            .map_err(|e| AgentError::RemoteSync(e.to_string()))?;
        Self::check(res.status(), "catalog fetch")?;
        let entries = res
            .json::<Vec<CatalogEntry>>()
            .await
            .map_err(|e| AgentError::RemoteSync(e.to_string()))?;
        Ok(entries)
    }

    async fn update_level(&self, entry_id: &str, level: u8) -> Result<()> {
        let url = format!("{}/{}/level", self.url(CATALOG_URL), entry_id);
        let res = self
            .client
            .patch(url)
            .json(&serde_json::json!({ "level": level }))
            .send()
            .await
            .map_err(|e| AgentError::RemoteSync(e.to_string()))?;
        Self::check(res.status(), "level update")
    }
}
