//! Local persistence layer.
//!
//! One SQLite database under the application data directory holding the
//! append-only activity queue.

pub mod activities;
pub mod db;
