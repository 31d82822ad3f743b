//! Developer-command watcher.
//!
//! Samples the live process list on the tracking interval and records an
//! event for every invocation of a watched command (`git` by default) as
//! `(command, "terminal")`. Unlike the focused-window sampler, several
//! matching processes can exist at once, so suppression is per command-line
//! digest rather than "differs from last emitted".

use crate::db::activities::Activities;
use crate::libs::activity::{NewActivity, TrackedEvent};
use crate::libs::config::CommandWatchConfig;
use crate::libs::dedup::DedupFilter;
use crate::libs::device::DeviceIdentity;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use std::time::Duration;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

pub const TERMINAL_TITLE: &str = "terminal";

pub struct CommandWatcher {
    commands: Vec<String>,
    activities: Activities,
    identity: DeviceIdentity,
    dedup: DedupFilter,
    system: System,
    interval: Duration,
}

impl CommandWatcher {
    pub fn new(
        config: &CommandWatchConfig,
        activities: Activities,
        identity: DeviceIdentity,
        interval: Duration,
    ) -> Self {
        Self {
            commands: config.commands.clone(),
            activities,
            identity,
            dedup: DedupFilter::new(Duration::from_secs(config.suppression_window)),
            system: System::new(),
            interval,
        }
    }

    /// Matches a sampled command line against the watched command names.
    /// The first token's basename must equal a watched command.
    fn watched_command(&self, command_line: &str) -> Option<&str> {
        let first = command_line.split_whitespace().next()?;
        let base = first.rsplit(['/', '\\']).next().unwrap_or(first);
        self.commands.iter().map(String::as_str).find(|c| *c == base)
    }

    /// One sampling pass: zero or more durable inserts.
    pub fn sample(&mut self) {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
        );
        self.system.refresh_cpu_usage();
        let cpu = f64::from(self.system.global_cpu_usage());

        let mut matches: Vec<(String, String)> = vec![];
        for process in self.system.processes().values() {
            let command_line = process
                .cmd()
                .iter()
                .map(|part| part.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ");
            if command_line.is_empty() {
                continue;
            }
            if let Some(command) = self.watched_command(&command_line) {
                matches.push((command.to_string(), command_line));
            }
        }

        for (command, command_line) in matches {
            if self.dedup.suppressed(&command_line) {
                continue;
            }
            let event = TrackedEvent::Normal {
                process: command.clone(),
                title: TERMINAL_TITLE.to_string(),
            };
            let activity = NewActivity::now(&event, cpu, &self.identity);
            match self.activities.insert(&activity) {
                Ok(_) => {
                    // The timer starts only for durably recorded events; a
                    // failed insert leaves the command admissible next pass.
                    self.dedup.record(&command_line);
                    msg_print!(Message::CommandRecorded(command));
                }
                Err(e) => msg_warning!(Message::EventInsertFailed(e.to_string())),
            }
        }
    }

    pub async fn run(mut self) {
        loop {
            tokio::time::sleep(self.interval).await;
            self.sample();
        }
    }
}
