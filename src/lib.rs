//! # Vigil - local activity-tracking agent
//!
//! Records which application/window has focus and when the user goes idle,
//! stores every event durably in a local SQLite queue, and periodically
//! syncs unsynced events to a remote document store. Distinct
//! (process, window) pairs are deduplicated into a remote catalog whose
//! entries carry an operator-assigned attention level.
//!
//! ## Pipeline
//!
//! Input listener → idle detector ⇉ sampler loop ⇄ window inspector →
//! change filter → durable local queue → sync engine → remote store
//! (events + catalog). Delivery is at-least-once: local records are marked
//! synced only after the remote insert, so a crash in between replays the
//! batch.

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
