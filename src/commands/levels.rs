//! Catalog listing and attention-level adjustment.

use crate::api::{RemoteClient, RemoteStore};
use crate::libs::activity::{PAUSE_MARKER, RESUME_MARKER};
use crate::libs::config::Config;
use crate::libs::device::DeviceIdentity;
use crate::libs::levels::{LevelOverrides, DEFAULT_DEBOUNCE, LEVEL_RANGE};
use crate::libs::messages::Message;
use crate::libs::window::UNKNOWN_PROCESS;
use crate::{msg_bail_anyhow, msg_info};
use anyhow::Result;
use clap::Args;
use prettytable::{format, row, Table};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct LevelsArgs {
    /// Catalog entry id to update
    #[arg(long, requires = "level")]
    pub id: Option<String>,

    /// New attention level (1-10)
    #[arg(long, requires = "id")]
    pub level: Option<u8>,
}

pub async fn cmd(args: LevelsArgs) -> Result<()> {
    let config = Config::read()?;
    let remote_config = config.require_remote()?;
    let identity = DeviceIdentity::detect();
    let remote: Arc<dyn RemoteStore> =
        Arc::new(RemoteClient::new(&remote_config.api_url, &remote_config.database));

    if let (Some(id), Some(level)) = (args.id, args.level) {
        if !LEVEL_RANGE.contains(&level) {
            msg_bail_anyhow!(Message::LevelOutOfRange(level));
        }
        let overrides = LevelOverrides::new(remote, DEFAULT_DEBOUNCE);
        overrides.set_level(&id, level);
        overrides.settle().await;
        return Ok(());
    }

    // Synthetic markers and failed captures never belong in the catalog
    // view, matching what the sampler would have blacklisted anyway.
    let entries: Vec<_> = remote
        .fetch_catalog(&identity.device_id)
        .await?
        .into_iter()
        .filter(|e| ![PAUSE_MARKER, RESUME_MARKER, UNKNOWN_PROCESS].contains(&e.process.as_str()))
        .collect();

    if entries.is_empty() {
        msg_info!(Message::CatalogEmpty);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["ID", "Process", "Window", "Level", "Active"]);
    for entry in &entries {
        table.add_row(row![
            entry.id.as_deref().unwrap_or("-"),
            entry.process,
            entry.window_title,
            entry.level,
            if entry.active { "yes" } else { "no" }
        ]);
    }
    table.printstd();
    Ok(())
}
