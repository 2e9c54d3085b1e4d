use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::fourcc::FourCc;
use crate::hal::traits::{HardwareProperties, PropertyListener};
use crate::hal::types::{ChannelLayout, FormatSelector, ObjectId, StreamFormat};

// Platform-style status codes carried by simulated failures.
const BAD_OBJECT: FourCc = FourCc::from_bytes(*b"!obj");
const UNKNOWN_PROPERTY: FourCc = FourCc::from_bytes(*b"who?");
const UNSUPPORTED_FORMAT: FourCc = FourCc::from_bytes(*b"!dat");

/// Declarative description of one simulated device, deserialized from the
/// JSON configuration handed to [`MockHardware::from_config`].
#[derive(Debug, Deserialize)]
struct DeviceSpec {
    id: u32,
    name: String,
    #[serde(default)]
    streams: Vec<StreamSpec>,
    #[serde(default)]
    layouts: Vec<ChannelLayout>,
    #[serde(default)]
    mixing: Option<MixingSpec>,
}

#[derive(Debug, Deserialize)]
struct StreamSpec {
    id: u32,
    #[serde(default)]
    physical: StreamFormat,
    #[serde(rename = "virtual", default)]
    virtual_format: StreamFormat,
    #[serde(default)]
    available_physical: Vec<StreamFormat>,
    #[serde(default)]
    available_virtual: Vec<StreamFormat>,
}

#[derive(Debug, Deserialize)]
struct MixingSpec {
    supported: bool,
    #[serde(default = "default_true")]
    settable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy)]
struct MixingCaps {
    supported: bool,
    settable: bool,
    enabled: bool,
}

#[derive(Default)]
struct MockState {
    devices: Vec<ObjectId>,
    names: HashMap<ObjectId, String>,
    streams: HashMap<ObjectId, Vec<ObjectId>>,
    formats: HashMap<(ObjectId, FormatSelector), StreamFormat>,
    available: HashMap<(ObjectId, FormatSelector), Vec<StreamFormat>>,
    layouts: HashMap<ObjectId, Vec<ChannelLayout>>,
    listeners: HashMap<(ObjectId, FormatSelector), PropertyListener>,
    pending: HashMap<(ObjectId, FormatSelector), StreamFormat>,
    hog_pids: HashMap<ObjectId, i32>,
    mixing: HashMap<ObjectId, MixingCaps>,
    set_calls: Vec<(ObjectId, FormatSelector, StreamFormat)>,
    fail_queries: HashSet<(ObjectId, FormatSelector)>,
    fail_sets: HashSet<(ObjectId, FormatSelector)>,
    fail_names: HashSet<ObjectId>,
    fail_hogs: HashSet<ObjectId>,
    fail_add_listener: bool,
    apply_on_set: bool,
}

/// In-memory stand-in for the platform property service. Format changes
/// are recorded as pending until [`MockHardware::apply_pending`] runs (or
/// immediately, with [`MockHardware::apply_on_set`]), mirroring the
/// asynchronous application of the real hardware.
#[derive(Default)]
pub struct MockHardware {
    state: Mutex<MockState>,
}

impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build simulated hardware from a JSON device table.
    pub fn from_config(config: Value) -> Result<Self> {
        let specs: Vec<DeviceSpec> = serde_json::from_value(config)?;

        let hw = Self::new();
        for spec in specs {
            let device = hw.add_device(spec.id, &spec.name);
            for stream in spec.streams {
                let id = hw.add_stream(device, stream.id, stream.physical, stream.virtual_format);
                hw.set_available(id, FormatSelector::Physical, stream.available_physical);
                hw.set_available(id, FormatSelector::Virtual, stream.available_virtual);
            }
            hw.set_layouts(device, spec.layouts);
            if let Some(mixing) = spec.mixing {
                hw.set_mixing_caps(device, mixing.supported, mixing.settable);
            }
        }

        Ok(hw)
    }

    pub fn add_device(&self, id: u32, name: &str) -> ObjectId {
        let device = ObjectId(id);
        let mut state = self.state.lock().unwrap();
        state.devices.push(device);
        state.names.insert(device, name.to_string());
        state.streams.entry(device).or_default();
        device
    }

    pub fn add_stream(
        &self,
        device: ObjectId,
        id: u32,
        physical: StreamFormat,
        virtual_format: StreamFormat,
    ) -> ObjectId {
        let stream = ObjectId(id);
        let mut state = self.state.lock().unwrap();
        state.streams.entry(device).or_default().push(stream);
        state.formats.insert((stream, FormatSelector::Physical), physical);
        state.formats.insert((stream, FormatSelector::Virtual), virtual_format);
        stream
    }

    pub fn set_available(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
        formats: Vec<StreamFormat>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.available.insert((stream, selector), formats);
    }

    pub fn set_layouts(&self, device: ObjectId, layouts: Vec<ChannelLayout>) {
        let mut state = self.state.lock().unwrap();
        state.layouts.insert(device, layouts);
    }

    pub fn set_mixing_caps(&self, device: ObjectId, supported: bool, settable: bool) {
        let mut state = self.state.lock().unwrap();
        state.mixing.insert(
            device,
            MixingCaps {
                supported,
                settable,
                enabled: true,
            },
        );
    }

    /// Make format queries on the given stream property fail.
    pub fn fail_query(&self, stream: ObjectId, selector: FormatSelector) {
        self.state.lock().unwrap().fail_queries.insert((stream, selector));
    }

    /// Make format-change requests on the given stream property fail.
    pub fn fail_set(&self, stream: ObjectId, selector: FormatSelector) {
        self.state.lock().unwrap().fail_sets.insert((stream, selector));
    }

    /// Make name queries for the given device fail.
    pub fn fail_name(&self, device: ObjectId) {
        self.state.lock().unwrap().fail_names.insert(device);
    }

    /// Make hog-mode writes for the given device fail.
    pub fn fail_hog(&self, device: ObjectId) {
        self.state.lock().unwrap().fail_hogs.insert(device);
    }

    /// Make every listener registration fail.
    pub fn fail_add_listener(&self) {
        self.state.lock().unwrap().fail_add_listener = true;
    }

    /// Apply format changes synchronously inside the set call, notifying
    /// listeners before it returns.
    pub fn apply_on_set(&self) {
        self.state.lock().unwrap().apply_on_set = true;
    }

    /// Apply every pending format change and notify the affected
    /// listeners, as the hardware would some time after the set call.
    pub fn apply_pending(&self) {
        let mut state = self.state.lock().unwrap();
        let pending: Vec<_> = state.pending.drain().collect();
        for ((stream, selector), format) in pending {
            state.formats.insert((stream, selector), format);
            if let Some(listener) = state.listeners.get(&(stream, selector)) {
                listener.notify(&[selector]);
            }
        }
    }

    pub fn has_listener(&self, stream: ObjectId, selector: FormatSelector) -> bool {
        self.state.lock().unwrap().listeners.contains_key(&(stream, selector))
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().unwrap().listeners.len()
    }

    pub fn set_call_count(&self) -> usize {
        self.state.lock().unwrap().set_calls.len()
    }

    pub fn hog_pid(&self, device: ObjectId) -> Option<i32> {
        self.state.lock().unwrap().hog_pids.get(&device).copied()
    }

    pub fn mixing_enabled(&self, device: ObjectId) -> Option<bool> {
        self.state.lock().unwrap().mixing.get(&device).map(|caps| caps.enabled)
    }
}

impl HardwareProperties for MockHardware {
    fn devices(&self) -> Result<Vec<ObjectId>> {
        Ok(self.state.lock().unwrap().devices.clone())
    }

    fn device_name(&self, device: ObjectId) -> Result<String> {
        let state = self.state.lock().unwrap();
        if state.fail_names.contains(&device) {
            return Err(anyhow!("name query failed ({UNKNOWN_PROPERTY})"));
        }
        state
            .names
            .get(&device)
            .cloned()
            .ok_or_else(|| anyhow!("no such device {} ({BAD_OBJECT})", device.0))
    }

    fn device_streams(&self, device: ObjectId) -> Result<Vec<ObjectId>> {
        let state = self.state.lock().unwrap();
        state
            .streams
            .get(&device)
            .cloned()
            .ok_or_else(|| anyhow!("no such device {} ({BAD_OBJECT})", device.0))
    }

    fn stream_format(&self, stream: ObjectId, selector: FormatSelector) -> Result<StreamFormat> {
        let state = self.state.lock().unwrap();
        if state.fail_queries.contains(&(stream, selector)) {
            return Err(anyhow!("format query failed ({UNKNOWN_PROPERTY})"));
        }
        state
            .formats
            .get(&(stream, selector))
            .copied()
            .ok_or_else(|| anyhow!("no such stream {} ({BAD_OBJECT})", stream.0))
    }

    fn available_formats(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
    ) -> Result<Vec<StreamFormat>> {
        let state = self.state.lock().unwrap();
        if state.fail_queries.contains(&(stream, selector)) {
            return Err(anyhow!("format list query failed ({UNKNOWN_PROPERTY})"));
        }
        Ok(state.available.get(&(stream, selector)).cloned().unwrap_or_default())
    }

    fn set_stream_format(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
        format: &StreamFormat,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.formats.contains_key(&(stream, selector)) {
            return Err(anyhow!("no such stream {} ({BAD_OBJECT})", stream.0));
        }
        if state.fail_sets.contains(&(stream, selector)) {
            return Err(anyhow!("format rejected ({UNSUPPORTED_FORMAT})"));
        }

        state.set_calls.push((stream, selector, *format));

        if state.apply_on_set {
            state.formats.insert((stream, selector), *format);
            if let Some(listener) = state.listeners.get(&(stream, selector)) {
                listener.notify(&[selector]);
            }
        } else {
            state.pending.insert((stream, selector), *format);
        }

        Ok(())
    }

    fn device_layouts(&self, device: ObjectId) -> Result<Vec<ChannelLayout>> {
        let state = self.state.lock().unwrap();
        if !state.names.contains_key(&device) {
            return Err(anyhow!("no such device {} ({BAD_OBJECT})", device.0));
        }
        Ok(state.layouts.get(&device).cloned().unwrap_or_default())
    }

    fn add_listener(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
        listener: PropertyListener,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_add_listener {
            return Err(anyhow!("listener registration failed ({BAD_OBJECT})"));
        }
        state.listeners.insert((stream, selector), listener);
        Ok(())
    }

    fn remove_listener(&self, stream: ObjectId, selector: FormatSelector) -> Result<()> {
        self.state.lock().unwrap().listeners.remove(&(stream, selector));
        Ok(())
    }

    fn set_hog_pid(&self, device: ObjectId, pid: i32) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_hogs.contains(&device) {
            return Err(anyhow!("hog mode write failed ({BAD_OBJECT})"));
        }
        state.hog_pids.insert(device, pid);
        Ok(())
    }

    fn supports_mixing(&self, device: ObjectId) -> bool {
        self.state
            .lock()
            .unwrap()
            .mixing
            .get(&device)
            .map(|caps| caps.supported)
            .unwrap_or(false)
    }

    fn mixing_settable(&self, device: ObjectId) -> Result<bool> {
        let state = self.state.lock().unwrap();
        state
            .mixing
            .get(&device)
            .map(|caps| caps.settable)
            .ok_or_else(|| anyhow!("no mixing property on device {} ({UNKNOWN_PROPERTY})", device.0))
    }

    fn set_mixing(&self, device: ObjectId, enabled: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match state.mixing.get_mut(&device) {
            Some(caps) if caps.settable => {
                caps.enabled = enabled;
                Ok(())
            }
            Some(_) => Err(anyhow!("mixing property not settable ({UNSUPPORTED_FORMAT})")),
            None => Err(anyhow!("no mixing property on device {} ({UNKNOWN_PROPERTY})", device.0)),
        }
    }
}
