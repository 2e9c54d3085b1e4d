use std::fmt::Write as _;
use std::process;

use anyhow::{Context, Result};
use log::{info, warn};

use super::traits::HardwareProperties;
use super::types::{DeviceInfo, FormatSelector, ObjectId};

/// Collect id and name of every output device. A device whose name query
/// fails is still listed, under a placeholder name.
pub fn list_devices(hw: &dyn HardwareProperties) -> Result<Vec<DeviceInfo>> {
    let ids = hw.devices().context("failed to get list of output devices")?;

    let mut devices = Vec::with_capacity(ids.len());
    for id in ids {
        let name = hw
            .device_name(id)
            .unwrap_or_else(|_| "Unknown".to_string());
        devices.push(DeviceInfo { id, name });
    }

    Ok(devices)
}

fn append_stream_formats(
    hw: &dyn HardwareProperties,
    out: &mut String,
    stream: ObjectId,
    index: usize,
    selector: FormatSelector,
    heading: &str,
) -> Result<()> {
    let formats = hw.available_formats(stream, selector)?;

    let _ = writeln!(out, "    {heading}:");
    for (n, format) in formats.iter().enumerate() {
        let _ = writeln!(out, "      - Stream {index}, Format {n}: {}", format.describe());
    }

    Ok(())
}

/// Render the device/stream/format report. Per-item query failures are
/// logged as warnings and skip only the item they affect.
pub fn device_list(hw: &dyn HardwareProperties) -> Result<String> {
    let mut out = String::from("Available output devices:\n");

    for device in hw.devices().context("failed to get list of output devices")? {
        let name = hw
            .device_name(device)
            .unwrap_or_else(|_| "Unknown".to_string());
        let _ = writeln!(out, "  * {} (id: {})", name, device.0);

        let streams = match hw.device_streams(device) {
            Ok(streams) => streams,
            Err(err) => {
                warn!("could not get streams: {err:#}");
                continue;
            }
        };

        for (index, stream) in streams.iter().enumerate() {
            if let Err(err) = append_stream_formats(
                hw,
                &mut out,
                *stream,
                index,
                FormatSelector::Physical,
                "Physical Formats",
            ) {
                warn!("could not get stream physical formats: {err:#}");
                continue;
            }

            if let Err(err) = append_stream_formats(
                hw,
                &mut out,
                *stream,
                index,
                FormatSelector::Virtual,
                "Virtual Formats",
            ) {
                warn!("could not get stream virtual formats: {err:#}");
            }
        }
    }

    Ok(out)
}

/// Log the device report at info level.
pub fn log_device_list(hw: &dyn HardwareProperties) {
    match device_list(hw) {
        Ok(report) => info!("{report}"),
        Err(err) => warn!("{err:#}"),
    }
}

/// Sentinel pid that releases hog mode.
const UNHOG_PID: i32 = -1;

/// Exclusive-access lock on a device, keyed by process id.
#[derive(Debug, Default)]
pub struct HogMode {
    pid: Option<i32>,
}

impl HogMode {
    pub fn new() -> Self {
        Self { pid: None }
    }

    /// Take exclusive ownership of the device for this process.
    pub fn acquire(&mut self, hw: &dyn HardwareProperties, device: ObjectId) -> Result<()> {
        let pid = process::id() as i32;
        match hw.set_hog_pid(device, pid) {
            Ok(()) => {
                self.pid = Some(pid);
                Ok(())
            }
            Err(err) => {
                self.pid = None;
                Err(err.context("failed to set hogmode"))
            }
        }
    }

    /// Hand the device back, if this process holds it. A no-op otherwise.
    pub fn release(&mut self, hw: &dyn HardwareProperties, device: ObjectId) -> Result<()> {
        if self.pid.take() == Some(process::id() as i32) {
            hw.set_hog_pid(device, UNHOG_PID)
                .context("failed to release hogmode")?;
        }
        Ok(())
    }

    pub fn held(&self) -> bool {
        self.pid.is_some()
    }
}

/// Turn device mixing off, reporting whether a change was actually made so
/// the caller can restore it later.
pub fn disable_mixing(hw: &dyn HardwareProperties, device: ObjectId) -> Result<bool> {
    change_mixing(hw, device, false)
}

/// Restore mixing, but only when `changed` says disable_mixing touched it.
pub fn enable_mixing(hw: &dyn HardwareProperties, device: ObjectId, changed: bool) -> Result<()> {
    if changed {
        change_mixing(hw, device, true)?;
    }
    Ok(())
}

fn change_mixing(hw: &dyn HardwareProperties, device: ObjectId, enabled: bool) -> Result<bool> {
    if !hw.supports_mixing(device) {
        return Ok(false);
    }

    let writeable = hw
        .mixing_settable(device)
        .context("can't tell if mixing property is settable")?;
    if !writeable {
        info!("mixing property is *not* settable");
        return Ok(false);
    }

    hw.set_mixing(device, enabled).context("can't set mix mode")?;
    Ok(true)
}
