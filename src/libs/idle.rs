//! Idle detection from raw input activity.
//!
//! A dedicated listener thread stamps the shared last-input time on every
//! pointer move, click, scroll, and key press. The write path is a single
//! mutex-guarded store so it stays cheap at input-burst frequency; readers
//! tolerate a few milliseconds of staleness but never a torn value.

use crate::libs::messages::Message;
use crate::msg_warning;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct IdleDetector {
    last_input: Arc<Mutex<Instant>>,
    inactivity_threshold: Duration,
}

impl IdleDetector {
    pub fn new(inactivity_threshold: Duration) -> Self {
        Self {
            last_input: Arc::new(Mutex::new(Instant::now())),
            inactivity_threshold,
        }
    }

    /// Records input activity. Last write wins regardless of source.
    pub fn touch(&self) {
        *self.last_input.lock() = Instant::now();
    }

    /// True while the last input is younger than the inactivity threshold.
    pub fn is_active(&self) -> bool {
        self.last_input.lock().elapsed() < self.inactivity_threshold
    }

    /// Spawns the raw-input listener on its own thread.
    ///
    /// `rdev::listen` blocks for the lifetime of the listener; if it ever
    /// returns with an error the loop restarts it after a short delay so
    /// idle detection survives transient input-hook failures.
    pub fn spawn_listener(&self) {
        let detector = self.clone();
        std::thread::spawn(move || loop {
            let for_listener = detector.clone();
            if let Err(e) = listen(move |event: Event| match event.event_type {
                EventType::KeyPress(_)
                | EventType::ButtonPress(_)
                | EventType::MouseMove { .. }
                | EventType::Wheel { .. } => {
                    for_listener.touch();
                }
                _ => {}
            }) {
                msg_warning!(Message::InputListenerFailed(format!("{:?}", e)));
                std::thread::sleep(Duration::from_secs(1));
            } else {
                break;
            }
        });
    }
}
