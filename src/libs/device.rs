//! Device identity derived once at startup.
//!
//! Every record carries the same identity for the lifetime of the process,
//! and the device id must stay stable across restarts on the same machine
//! so the remote catalog keys do not fracture.

use serde::Serialize;
use std::env;
use sysinfo::{Networks, System};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeviceIdentity {
    /// Hardware-derived stable identifier (decimal form of the primary MAC).
    pub device_id: String,
    pub username: String,
    /// OS family, e.g. "Linux" or "Darwin".
    pub system: String,
    /// Hostname.
    pub device_name: String,
}

impl DeviceIdentity {
    pub fn detect() -> Self {
        Self {
            device_id: derive_device_id(),
            username: env::var("USERNAME")
                .or_else(|_| env::var("USER"))
                .unwrap_or_else(|_| "unknown".to_string()),
            system: System::name().unwrap_or_else(|| env::consts::OS.to_string()),
            device_name: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Derives a stable id from the lowest non-zero interface MAC address,
/// falling back to the hostname when no usable interface exists.
fn derive_device_id() -> String {
    let networks = Networks::new_with_refreshed_list();
    let mut macs: Vec<u64> = networks
        .values()
        .map(|data| mac_to_u64(&data.mac_address().0))
        .filter(|&mac| mac != 0)
        .collect();
    macs.sort_unstable();

    match macs.first() {
        Some(mac) => mac.to_string(),
        None => System::host_name().unwrap_or_else(|| "unknown-device".to_string()),
    }
}

fn mac_to_u64(bytes: &[u8; 6]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
