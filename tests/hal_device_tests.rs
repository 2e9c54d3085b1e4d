use serde_json::json;

use audiohal::hal::mock::MockHardware;
use audiohal::hal::{
    device_list, disable_mixing, enable_mixing, list_devices, HogMode, ObjectId,
};

fn configured_hardware() -> MockHardware {
    MockHardware::from_config(json!([
        {
            "id": 40,
            "name": "Built-in Output",
            "streams": [{
                "id": 50,
                "physical": {
                    "sample_rate": 48000.0,
                    "format_id": "lpcm",
                    "flags": "SIGNED | PACKED",
                    "bits_per_channel": 16,
                    "channels_per_frame": 2
                },
                "virtual": {
                    "sample_rate": 48000.0,
                    "format_id": "lpcm",
                    "flags": "FLOAT | PACKED",
                    "bits_per_channel": 32,
                    "channels_per_frame": 2
                },
                "available_physical": [
                    {
                        "sample_rate": 44100.0,
                        "format_id": "lpcm",
                        "flags": "SIGNED | PACKED",
                        "bits_per_channel": 16,
                        "channels_per_frame": 2
                    },
                    {
                        "sample_rate": 96000.0,
                        "format_id": "lpcm",
                        "flags": "SIGNED | PACKED",
                        "bits_per_channel": 24,
                        "channels_per_frame": 2
                    }
                ],
                "available_virtual": [
                    {
                        "sample_rate": 48000.0,
                        "format_id": "lpcm",
                        "flags": "FLOAT | PACKED",
                        "bits_per_channel": 32,
                        "channels_per_frame": 2
                    }
                ]
            }],
            "mixing": {"supported": true}
        },
        {
            "id": 41,
            "name": "USB DAC"
        }
    ]))
    .unwrap()
}

#[test]
fn test_list_devices_reports_ids_and_names() {
    let hw = configured_hardware();

    let devices = list_devices(&hw).unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].id, ObjectId(40));
    assert_eq!(devices[0].name, "Built-in Output");
    assert_eq!(devices[1].id, ObjectId(41));
    assert_eq!(devices[1].name, "USB DAC");
}

#[test]
fn test_device_report_lists_streams_and_formats() {
    let hw = configured_hardware();

    let report = device_list(&hw).unwrap();
    assert!(report.starts_with("Available output devices:\n"));
    assert!(report.contains("* Built-in Output (id: 40)"));
    assert!(report.contains("* USB DAC (id: 41)"));
    assert!(report.contains("Physical Formats:"));
    assert!(report.contains("Virtual Formats:"));
    assert!(report.contains("Stream 0, Format 0"));
    assert!(report.contains("Stream 0, Format 1"));
    assert!(report.contains("24bit"));
    assert!(report.contains("float"));
}

#[test]
fn test_unnameable_device_is_listed_as_unknown() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");
    hw.fail_name(device);

    let devices = list_devices(&hw).unwrap();
    assert_eq!(devices[0].name, "Unknown");

    let report = device_list(&hw).unwrap();
    assert!(report.contains("* Unknown (id: 40)"));
}

#[test]
fn test_hog_mode_acquire_and_release() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");

    let mut hog = HogMode::new();
    hog.acquire(&hw, device).unwrap();
    assert!(hog.held());
    assert_eq!(hw.hog_pid(device), Some(std::process::id() as i32));

    hog.release(&hw, device).unwrap();
    assert!(!hog.held());
    assert_eq!(hw.hog_pid(device), Some(-1));
}

#[test]
fn test_hog_release_without_acquire_is_a_noop() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");

    let mut hog = HogMode::new();
    hog.release(&hw, device).unwrap();
    assert_eq!(hw.hog_pid(device), None);
}

#[test]
fn test_hog_acquire_failure_leaves_nothing_to_release() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");
    hw.fail_hog(device);

    let mut hog = HogMode::new();
    assert!(hog.acquire(&hw, device).is_err());
    assert!(!hog.held());

    // The failed acquire must not be "released" back to the hardware.
    hog.release(&hw, device).unwrap();
    assert_eq!(hw.hog_pid(device), None);
}

#[test]
fn test_mixing_disable_and_restore() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");
    hw.set_mixing_caps(device, true, true);

    let changed = disable_mixing(&hw, device).unwrap();
    assert!(changed);
    assert_eq!(hw.mixing_enabled(device), Some(false));

    enable_mixing(&hw, device, changed).unwrap();
    assert_eq!(hw.mixing_enabled(device), Some(true));
}

#[test]
fn test_mixing_without_property_is_untouched() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");

    let changed = disable_mixing(&hw, device).unwrap();
    assert!(!changed);
    assert_eq!(hw.mixing_enabled(device), None);
}

#[test]
fn test_unsettable_mixing_is_left_alone() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");
    hw.set_mixing_caps(device, true, false);

    let changed = disable_mixing(&hw, device).unwrap();
    assert!(!changed);
    assert_eq!(hw.mixing_enabled(device), Some(true));
}

#[test]
fn test_enable_mixing_skips_when_nothing_changed() {
    let hw = MockHardware::new();
    let device = hw.add_device(40, "Built-in Output");
    hw.set_mixing_caps(device, true, true);

    disable_mixing(&hw, device).unwrap();
    enable_mixing(&hw, device, false).unwrap();
    assert_eq!(hw.mixing_enabled(device), Some(false));
}
