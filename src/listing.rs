//! Device and profile listings for the command line

use serde::Serialize;
use std::fmt::Write;

use crate::engine::{ProfileManager, SimulatedDevice};

#[derive(Debug, Serialize)]
pub struct DeviceListing {
    pub index: usize,
    pub name: String,
    /// `None` when the device offers a single profile
    pub profiles: Option<Vec<ProfileListing>>,
}

#[derive(Debug, Serialize)]
pub struct ProfileListing {
    pub index: usize,
    pub fourcc: String,
    pub description: &'static str,
    pub active: bool,
}

fn fourcc_string(code: u32) -> String {
    code.to_be_bytes().iter().map(|&b| b as char).collect()
}

fn profile_listings(manager: &dyn ProfileManager) -> Vec<ProfileListing> {
    manager
        .profiles()
        .into_iter()
        .enumerate()
        .map(|(index, profile)| ProfileListing {
            index,
            fourcc: fourcc_string(profile.id.fourcc()),
            description: profile.id.description(),
            active: profile.active,
        })
        .collect()
}

pub fn device_listings(devices: &[SimulatedDevice]) -> Vec<DeviceListing> {
    devices
        .iter()
        .enumerate()
        .map(|(index, device)| DeviceListing {
            index,
            name: device.name.clone(),
            profiles: device.profile_manager().map(profile_listings),
        })
        .collect()
}

fn push_entry(out: &mut String, marked: bool, index: usize, label: &str) {
    let marker = if marked { '*' } else { ' ' };
    let _ = writeln!(out, "       {}{:2}:  {}", marker, index, label);
}

/// Usage text with the device list (`*` = selected) and, once a device is
/// selected, its profiles (`*` = active). An out-of-range selection ends
/// with the invalid-device notice instead of a profile list.
pub fn render_usage(devices: &[SimulatedDevice], selected_device: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str("Usage: deckprofile -d <device id> -p <profile id>\n\n");
    out.push_str("    -h: help\n");
    out.push_str("    -d <device id>:\n");
    for (index, device) in devices.iter().enumerate() {
        push_entry(&mut out, selected_device == Some(index), index, &device.name);
    }

    out.push_str("    -p <profile id>:\n");
    match selected_device.map(|i| devices.get(i)) {
        None => out.push_str("         Select device to view available profiles.\n"),
        Some(None) => out.push_str("Invalid device selected, run with -h for list of devices.\n"),
        Some(Some(device)) => match device.profile_manager() {
            None => out.push_str("         Device has only 1 profile.\n"),
            Some(manager) => {
                for profile in profile_listings(manager) {
                    push_entry(&mut out, profile.active, profile.index, profile.description);
                }
            }
        },
    }
    out
}

/// Plain-text listing of every device and its profiles
pub fn render_list(devices: &[SimulatedDevice]) -> String {
    let mut out = String::new();
    for device in device_listings(devices) {
        let _ = writeln!(out, "{:2}: {}", device.index, device.name);
        match device.profiles {
            None => out.push_str("      (single profile)\n"),
            Some(profiles) => {
                for profile in profiles {
                    let marker = if profile.active { '*' } else { ' ' };
                    let _ = writeln!(
                        out,
                        "    {}{:2}: {} {}",
                        marker, profile.index, profile.fourcc, profile.description
                    );
                }
            }
        }
    }
    out
}
