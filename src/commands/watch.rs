//! Runs the agent: input listener, sampler loop, command watcher, and sync
//! engine against shared configuration and device identity.
//!
//! Each durable-queue writer gets its own database connection; SQLite
//! serializes them. A missing remote endpoint is the one fatal startup
//! error; every runtime failure is recovered by the loop it occurs in.

use crate::api::{RemoteClient, RemoteStore};
use crate::db::activities::Activities;
use crate::libs::config::Config;
use crate::libs::device::DeviceIdentity;
use crate::libs::idle::IdleDetector;
use crate::libs::messages::Message;
use crate::libs::procwatch::CommandWatcher;
use crate::libs::sync::SyncEngine;
use crate::libs::tracker::{SamplerLoop, Tracker};
use crate::libs::window::platform_inspector;
use crate::{msg_info, msg_print};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let remote_config = config.require_remote()?;
    let identity = DeviceIdentity::detect();
    let remote: Arc<dyn RemoteStore> =
        Arc::new(RemoteClient::new(&remote_config.api_url, &remote_config.database));

    let idle = IdleDetector::new(Duration::from_secs(config.tracker.inactivity_threshold));
    idle.spawn_listener();

    let tracker = Tracker::new(platform_inspector(), &config.tracker.process_blacklist);
    let sampler = SamplerLoop::new(
        tracker,
        idle.clone(),
        Activities::new()?,
        identity.clone(),
        Duration::from_secs(config.tracker.tracking_interval),
    );

    let sync_engine = SyncEngine::new(
        Activities::new()?,
        Arc::clone(&remote),
        identity.clone(),
        config.tracker.default_level,
    );
    sync_engine.register_device().await;

    let mut tasks = vec![
        tokio::spawn(sampler.run()),
        tokio::spawn(sync_engine.run(Duration::from_secs(config.tracker.sync_interval))),
    ];

    if config.commands.commands.is_empty() {
        msg_info!(Message::CommandWatchDisabled);
    } else {
        let watcher = CommandWatcher::new(
            &config.commands,
            Activities::new()?,
            identity,
            Duration::from_secs(config.tracker.tracking_interval),
        );
        tasks.push(tokio::spawn(watcher.run()));
    }

    msg_print!(Message::WatchStarted);
    tokio::signal::ctrl_c().await?;

    // Partial sync runs are safe to abandon; unsynced records replay on the
    // next start.
    for task in tasks {
        task.abort();
    }
    msg_print!(Message::WatchStopped);
    Ok(())
}
