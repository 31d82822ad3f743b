//! Active-window snapshots.
//!
//! `WindowInspector` is the platform seam: one implementation per OS,
//! selected once at startup, each returning the foreground process and
//! window title (or a capture error) without ever retrying. Normalization
//! of process names and browser-tab URLs lives here so the sampler only
//! compares clean `(process, title)` pairs.

use crate::libs::error::AgentError;
use anyhow::Result;

pub const UNKNOWN_PROCESS: &str = "unknown";
pub const UNKNOWN_TITLE: &str = "Unknown";

/// One point-in-time reading of the focused window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub process: String,
    pub title: String,
}

impl WindowSnapshot {
    pub fn new(process: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            process: process.into(),
            title: title.into(),
        }
    }

    /// True when the probe could not identify the foreground process.
    pub fn is_unknown(&self) -> bool {
        self.process == UNKNOWN_PROCESS || self.process.is_empty()
    }
}

/// Platform capability that reads the focused window.
pub trait WindowInspector: Send {
    fn snapshot(&mut self) -> Result<WindowSnapshot>;
}

/// Returns the inspector for the current platform.
pub fn platform_inspector() -> Box<dyn WindowInspector> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacInspector)
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(linux::X11Inspector::default())
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WinInspector::default())
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Box::new(UnsupportedInspector)
    }
}

/// Sentinel inspector for platforms without a window probe.
pub struct UnsupportedInspector;

impl WindowInspector for UnsupportedInspector {
    fn snapshot(&mut self) -> Result<WindowSnapshot> {
        Err(AgentError::Capture("no window inspector for this platform".to_string()).into())
    }
}

/// Strips the path and any platform bundle suffix from a raw process name.
pub fn normalize_process(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim()
        .to_string();
    let len = base.len();
    // The suffix is ASCII, so a non-boundary cut can only mean a multibyte
    // name that does not end in ".app".
    if len >= 4 && base.is_char_boundary(len - 4) && base[len - 4..].eq_ignore_ascii_case(".app") {
        base[..len - 4].to_string()
    } else {
        base
    }
}

/// Extracts the bare domain from the first `http(s)://` URL in `text`.
pub fn extract_domain(text: &str) -> Option<String> {
    let start = text.find("http://").map(|i| i + 7).or_else(|| text.find("https://").map(|i| i + 8))?;
    let domain: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect();
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

#[cfg(target_os = "macos")]
mod macos {
    use super::*;
    use std::process::Command;

    const BROWSERS: [&str; 4] = ["Google Chrome", "Safari", "Firefox", "Brave Browser"];

    const FRONT_APP_SCRIPT: &str = r#"
        tell application "System Events"
            set frontApp to name of first application process whose frontmost is true
            return frontApp
        end tell
    "#;

    pub struct MacInspector;

    impl MacInspector {
        fn osascript(script: &str) -> Result<String> {
            let output = Command::new("osascript")
                .arg("-e")
                .arg(script)
                .output()
                .map_err(|e| AgentError::Capture(e.to_string()))?;
            if !output.status.success() {
                return Err(AgentError::Capture(format!("osascript exited with {}", output.status)).into());
            }
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }

        /// Resolves the frontmost tab URL for known browsers. Any failure
        /// falls back to the application name.
        fn browser_tab_url(app: &str) -> Option<String> {
            let tab = if app == "Safari" || app == "Firefox" { "current tab" } else { "active tab" };
            let script = format!(
                r#"
                tell application "{app}"
                    if windows = {{}} then return ""
                    return URL of {tab} of front window
                end tell
                "#
            );
            Self::osascript(&script).ok().filter(|url| !url.is_empty())
        }
    }

    impl WindowInspector for MacInspector {
        fn snapshot(&mut self) -> Result<WindowSnapshot> {
            let app = Self::osascript(FRONT_APP_SCRIPT)?;
            if app.is_empty() {
                return Ok(WindowSnapshot::new(UNKNOWN_PROCESS, UNKNOWN_TITLE));
            }

            let mut title = app.clone();
            if BROWSERS.contains(&app.as_str()) {
                if let Some(url) = Self::browser_tab_url(&app) {
                    title = extract_domain(&url).unwrap_or(url);
                }
            }
            Ok(WindowSnapshot::new(app, title))
        }
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use super::*;
    use std::process::Command;
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

    #[derive(Default)]
    pub struct X11Inspector {
        system: System,
    }

    impl X11Inspector {
        fn xdotool(args: &[&str]) -> Result<String> {
            let output = Command::new("xdotool")
                .args(args)
                .output()
                .map_err(|e| AgentError::Capture(e.to_string()))?;
            if !output.status.success() {
                return Err(AgentError::Capture(format!("xdotool exited with {}", output.status)).into());
            }
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }

        fn process_name_for(&mut self, pid: u32) -> Option<String> {
            self.system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[Pid::from_u32(pid)]),
                true,
                ProcessRefreshKind::nothing(),
            );
            self.system
                .process(Pid::from_u32(pid))
                .map(|p| p.name().to_string_lossy().to_string())
        }
    }

    impl WindowInspector for X11Inspector {
        fn snapshot(&mut self) -> Result<WindowSnapshot> {
            let mut title = Self::xdotool(&["getwindowfocus", "getwindowname"])?;
            if title.is_empty() {
                title = UNKNOWN_TITLE.to_string();
            }
            if let Some(domain) = extract_domain(&title) {
                title = domain;
            }

            let process = Self::xdotool(&["getwindowfocus", "getwindowpid"])
                .ok()
                .and_then(|pid| pid.parse::<u32>().ok())
                .and_then(|pid| self.process_name_for(pid))
                .unwrap_or_else(|| UNKNOWN_PROCESS.to_string());

            Ok(WindowSnapshot::new(process, title))
        }
    }
}

#[cfg(target_os = "windows")]
mod windows {
    use super::*;
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
    use winapi::shared::windef::HWND;
    use winapi::um::winuser::{GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId};

    #[derive(Default)]
    pub struct WinInspector {
        system: System,
    }

    impl WinInspector {
        fn window_title(hwnd: HWND) -> String {
            unsafe {
                let len = GetWindowTextLengthW(hwnd);
                if len <= 0 {
                    return String::new();
                }
                let mut buf = vec![0u16; len as usize + 1];
                let read = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32);
                String::from_utf16_lossy(&buf[..read.max(0) as usize])
            }
        }
    }

    impl WindowInspector for WinInspector {
        fn snapshot(&mut self) -> Result<WindowSnapshot> {
            let hwnd = unsafe { GetForegroundWindow() };
            if hwnd.is_null() {
                return Err(AgentError::Capture("no foreground window".to_string()).into());
            }

            let mut pid: u32 = 0;
            unsafe { GetWindowThreadProcessId(hwnd, &mut pid) };

            self.system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[Pid::from_u32(pid)]),
                true,
                ProcessRefreshKind::nothing(),
            );
            let process = self
                .system
                .process(Pid::from_u32(pid))
                .map(|p| p.name().to_string_lossy().to_string())
                .unwrap_or_else(|| UNKNOWN_PROCESS.to_string());

            let mut title = Self::window_title(hwnd);
            if title.is_empty() {
                title = process.clone();
            }
            if let Some(domain) = extract_domain(&title) {
                title = domain;
            }

            Ok(WindowSnapshot::new(process, title))
        }
    }
}
