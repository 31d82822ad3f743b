//! Core agent logic.

pub mod activity;
pub mod config;
pub mod data_storage;
pub mod debounce;
pub mod dedup;
pub mod device;
pub mod error;
pub mod idle;
pub mod levels;
pub mod messages;
pub mod procwatch;
pub mod sync;
pub mod tracker;
pub mod window;
