//! Durable local queue of activity records.
//!
//! Append-only unit of truth for "has this event left the machine". Records
//! are never deleted; the `synced` flag only ever transitions false to true,
//! and it is flipped strictly after the remote insert so a crash between the
//! two replays the batch instead of losing it.

use crate::db::db::Db;
use crate::libs::activity::{ActivityRecord, NewActivity};
use crate::libs::error::AgentError;
use anyhow::Result;
use rusqlite::{params, Connection};

const SCHEMA_ACTIVITY: &str = "CREATE TABLE IF NOT EXISTS activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    process TEXT NOT NULL,
    window_title TEXT NOT NULL,
    cpu_percent REAL NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0,
    device_id TEXT NOT NULL,
    username TEXT NOT NULL
)";

const INSERT_ACTIVITY: &str = "INSERT INTO activity (timestamp, process, window_title, cpu_percent, synced, device_id, username)
    VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)";

/// Unsynced records in insertion order. Re-callable after partial
/// processing; the id ordering is what makes `mark_synced_up_to` safe.
const SELECT_UNSYNCED: &str = "SELECT id, timestamp, process, window_title, cpu_percent, synced, device_id, username
    FROM activity WHERE synced = 0 ORDER BY id ASC";

/// Bounded by the batch's max id so records inserted while a sync run is in
/// flight are never marked without having been delivered.
const MARK_SYNCED_UP_TO: &str = "UPDATE activity SET synced = 1 WHERE synced = 0 AND id <= ?1";

pub struct Activities {
    pub conn: Connection,
}

impl Activities {
    pub fn new() -> Result<Activities> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_ACTIVITY, [])?;

        Ok(Activities { conn: db.conn })
    }

    /// Appends a record and returns its id. Storage failures propagate to
    /// the caller; the event stays pending retry, it is never dropped
    /// silently.
    pub fn insert(&self, activity: &NewActivity) -> Result<i64> {
        self.conn
            .execute(
                INSERT_ACTIVITY,
                params![
                    activity.timestamp,
                    activity.process,
                    activity.window_title,
                    activity.cpu_percent,
                    activity.device_id,
                    activity.username,
                ],
            )
            .map_err(AgentError::LocalStorage)?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn fetch_unsynced(&self) -> Result<Vec<ActivityRecord>> {
        let mut stmt = self.conn.prepare(SELECT_UNSYNCED)?;
        let rows = stmt.query_map([], |row| {
            Ok(ActivityRecord {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                process: row.get(2)?,
                window_title: row.get(3)?,
                cpu_percent: row.get(4)?,
                synced: row.get::<_, i64>(5)? != 0,
                device_id: row.get(6)?,
                username: row.get(7)?,
            })
        })?;

        let mut records = vec![];
        for record in rows {
            records.push(record.map_err(AgentError::LocalStorage)?);
        }
        Ok(records)
    }

    /// Marks unsynced records with `id <= up_to` as delivered. Runs last in
    /// the sync protocol.
    pub fn mark_synced_up_to(&self, up_to: i64) -> Result<usize> {
        let updated = self
            .conn
            .execute(MARK_SYNCED_UP_TO, params![up_to])
            .map_err(AgentError::LocalStorage)?;
        Ok(updated)
    }
}
