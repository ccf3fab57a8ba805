// Listing output for the simulated device lineup

use deckprofile::config::SimulationConfig;
use deckprofile::engine::simulated_devices;
use deckprofile::listing::{device_listings, render_list, render_usage};
use insta::assert_snapshot;

#[test]
fn test_usage_without_device_selection() {
    let devices = simulated_devices(&SimulationConfig::default());
    assert_snapshot!(render_usage(&devices, None), @r"
Usage: deckprofile -d <device id> -p <profile id>

    -h: help
    -d <device id>:
         0:  DeckLink 8K Pro
         1:  DeckLink Duo 2
         2:  DeckLink Mini Recorder 4K
    -p <profile id>:
         Select device to view available profiles.
");
}

#[test]
fn test_usage_marks_selected_device_and_active_profile() {
    let devices = simulated_devices(&SimulationConfig::default());
    assert_snapshot!(render_usage(&devices, Some(1)), @r"
Usage: deckprofile -d <device id> -p <profile id>

    -h: help
    -d <device id>:
         0:  DeckLink 8K Pro
       * 1:  DeckLink Duo 2
         2:  DeckLink Mini Recorder 4K
    -p <profile id>:
         0:  two sub-devices full-duplex
       * 1:  four sub-devices half-duplex
");
}

#[test]
fn test_usage_for_single_profile_device() {
    let devices = simulated_devices(&SimulationConfig::default());
    let usage = render_usage(&devices, Some(2));
    assert!(usage.contains("       * 2:  DeckLink Mini Recorder 4K\n"));
    assert!(usage.ends_with("Device has only 1 profile.\n"));
}

#[test]
fn test_usage_for_out_of_range_device() {
    let devices = simulated_devices(&SimulationConfig::default());
    let usage = render_usage(&devices, Some(9));
    assert!(!usage.contains('*'), "no device should be marked: {}", usage);
    assert!(!usage.contains("Select device to view available profiles."));
    assert!(usage.ends_with("Invalid device selected, run with -h for list of devices.\n"));
}

#[test]
fn test_plain_list_shows_fourcc_codes() {
    let devices = simulated_devices(&SimulationConfig::default());
    let list = render_list(&devices);
    assert!(list.starts_with(" 0: DeckLink 8K Pro\n"));
    assert!(list.contains("      0: 1dfd one sub-device full-duplex\n"));
    assert!(list.contains("    * 4: 4dhd four sub-devices half-duplex\n"));
    assert!(list.contains("      (single profile)\n"));
}

#[test]
fn test_json_listing_shape() {
    let devices = simulated_devices(&SimulationConfig::default());
    let value = serde_json::to_value(device_listings(&devices)).unwrap();

    assert_eq!(value[1]["name"], "DeckLink Duo 2");
    assert_eq!(value[1]["profiles"][0]["fourcc"], "2dfd");
    assert_eq!(value[1]["profiles"][1]["active"], true);
    assert!(value[2]["profiles"].is_null());
}
