use crate::api::{RemoteClient, RemoteStore};
use crate::db::activities::Activities;
use crate::libs::config::Config;
use crate::libs::device::DeviceIdentity;
use crate::libs::messages::Message;
use crate::libs::sync::{SyncEngine, SyncOutcome};
use crate::{msg_info, msg_success};
use anyhow::Result;
use std::sync::Arc;

/// One-shot manual sync run.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let remote_config = config.require_remote()?;
    let identity = DeviceIdentity::detect();
    let remote: Arc<dyn RemoteStore> =
        Arc::new(RemoteClient::new(&remote_config.api_url, &remote_config.database));

    let mut engine = SyncEngine::new(
        Activities::new()?,
        remote,
        identity,
        config.tracker.default_level,
    );

    match engine.run_once().await? {
        SyncOutcome::Empty => msg_info!(Message::SyncNothingToDeliver),
        SyncOutcome::Delivered(count) => msg_success!(Message::SyncDelivered(count)),
    }
    Ok(())
}
