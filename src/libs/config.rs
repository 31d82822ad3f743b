//! Agent configuration.
//!
//! Settings are stored as JSON in the platform application-data directory.
//! Every field has a serde default so a partial file keeps working across
//! upgrades. The remote endpoint is the only setting whose absence is fatal,
//! and only when the agent actually starts.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_success};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Remote document-store endpoint settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    /// Base URL of the remote store API, e.g. `https://track.example.com/api`.
    pub api_url: String,
    /// Logical database name the agent's collections live under.
    pub database: String,
}

/// Tracking and synchronization settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Seconds between window samples. Applies whether paused or running.
    #[serde(default = "default_tracking_interval")]
    pub tracking_interval: u64,

    /// Seconds between sync runs.
    #[serde(default = "default_sync_interval")]
    pub sync_interval: u64,

    /// Seconds without input before the user counts as idle.
    #[serde(default = "default_inactivity_threshold")]
    pub inactivity_threshold: u64,

    /// Processes that never produce records. Covers the synthetic
    /// pause/resume markers, the unknown sentinel, and foreground processes
    /// that carry no information (the OS file manager, the agent's own UI).
    #[serde(default = "default_process_blacklist")]
    pub process_blacklist: Vec<String>,

    /// Attention level assigned to newly observed catalog entries.
    #[serde(default = "default_level")]
    pub default_level: u8,
}

/// Developer-command watcher settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommandWatchConfig {
    /// Command names whose invocations are recorded, e.g. `git`.
    #[serde(default = "default_watched_commands")]
    pub commands: Vec<String>,

    /// Seconds a command-line digest suppresses re-emission.
    #[serde(default = "default_suppression_window")]
    pub suppression_window: u64,
}

fn default_tracking_interval() -> u64 {
    30
}

fn default_sync_interval() -> u64 {
    300
}

fn default_inactivity_threshold() -> u64 {
    60
}

fn default_level() -> u8 {
    5
}

fn default_suppression_window() -> u64 {
    60
}

fn default_process_blacklist() -> Vec<String> {
    ["[PAUSE]", "[RESUME]", "unknown", "Finder", "Activity Monitor", "explorer.exe", "vigil"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_watched_commands() -> Vec<String> {
    vec!["git".to_string()]
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracking_interval: default_tracking_interval(),
            sync_interval: default_sync_interval(),
            inactivity_threshold: default_inactivity_threshold(),
            process_blacklist: default_process_blacklist(),
            default_level: default_level(),
        }
    }
}

impl Default for CommandWatchConfig {
    fn default() -> Self {
        Self {
            commands: default_watched_commands(),
            suppression_window: default_suppression_window(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    /// Remote store endpoint. Optional in the file, required to run `watch`.
    pub remote: Option<RemoteConfig>,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub commands: CommandWatchConfig,
}

impl Config {
    /// Loads the configuration file, falling back to defaults when absent.
    pub fn read() -> Result<Self> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Returns the remote settings or fails with the startup error mandated
    /// for a missing endpoint.
    pub fn require_remote(&self) -> Result<&RemoteConfig> {
        self.remote
            .as_ref()
            .ok_or_else(|| msg_error_anyhow!(Message::RemoteEndpointMissing))
    }

    /// Interactive first-run setup. Pre-fills prompts from the existing
    /// configuration when one is present.
    pub fn init() -> Result<Self> {
        let existing = Config::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        let api_url: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptRemoteUrl.to_string())
            .with_initial_text(existing.remote.as_ref().map(|r| r.api_url.clone()).unwrap_or_default())
            .interact_text()?;

        let database: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptRemoteDatabase.to_string())
            .default("productivity".to_string())
            .interact_text()?;

        let tracking_interval: u64 = Input::with_theme(&theme)
            .with_prompt(Message::PromptTrackingInterval.to_string())
            .default(existing.tracker.tracking_interval)
            .interact_text()?;

        let sync_interval: u64 = Input::with_theme(&theme)
            .with_prompt(Message::PromptSyncInterval.to_string())
            .default(existing.tracker.sync_interval)
            .interact_text()?;

        let inactivity_threshold: u64 = Input::with_theme(&theme)
            .with_prompt(Message::PromptInactivityThreshold.to_string())
            .default(existing.tracker.inactivity_threshold)
            .interact_text()?;

        let config = Config {
            remote: Some(RemoteConfig { api_url, database }),
            tracker: TrackerConfig {
                tracking_interval,
                sync_interval,
                inactivity_threshold,
                ..existing.tracker
            },
            commands: existing.commands,
        };

        config.save()?;
        msg_success!(Message::ConfigSaved);
        Ok(config)
    }
}
