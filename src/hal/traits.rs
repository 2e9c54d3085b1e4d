use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use super::types::{ChannelLayout, FormatSelector, LayoutTag, ObjectId, SpeakerSet, StreamFormat};

/// Adapter from generic property-change notifications to a single
/// word-sized flag. The platform may invoke it on its own thread while the
/// registering thread polls the flag.
#[derive(Clone)]
pub struct PropertyListener {
    selector: FormatSelector,
    flag: Arc<AtomicBool>,
}

impl PropertyListener {
    pub fn new(selector: FormatSelector, flag: Arc<AtomicBool>) -> Self {
        Self { selector, flag }
    }

    /// Called with the selectors that changed on the listened object.
    pub fn notify(&self, changed: &[FormatSelector]) {
        if changed.contains(&self.selector) {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

/// Property query/set/listener service of the platform audio framework,
/// keyed by object identifier and property selector.
pub trait HardwareProperties {
    /// All output devices known to the hardware.
    fn devices(&self) -> Result<Vec<ObjectId>>;

    /// Human-readable device name.
    fn device_name(&self, device: ObjectId) -> Result<String>;

    /// Streams belonging to a device.
    fn device_streams(&self, device: ObjectId) -> Result<Vec<ObjectId>>;

    /// Current format on the given stream property.
    fn stream_format(&self, stream: ObjectId, selector: FormatSelector) -> Result<StreamFormat>;

    /// Formats the stream advertises for the given property.
    fn available_formats(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
    ) -> Result<Vec<StreamFormat>>;

    /// Request a format change. The hardware applies it asynchronously and
    /// reports completion through registered listeners.
    fn set_stream_format(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
        format: &StreamFormat,
    ) -> Result<()>;

    /// Channel layouts the device can render.
    fn device_layouts(&self, device: ObjectId) -> Result<Vec<ChannelLayout>>;

    fn add_listener(
        &self,
        stream: ObjectId,
        selector: FormatSelector,
        listener: PropertyListener,
    ) -> Result<()>;

    fn remove_listener(&self, stream: ObjectId, selector: FormatSelector) -> Result<()>;

    /// Write the hog-mode owner pid; -1 releases the device.
    fn set_hog_pid(&self, device: ObjectId, pid: i32) -> Result<()>;

    fn supports_mixing(&self, device: ObjectId) -> bool;

    fn mixing_settable(&self, device: ObjectId) -> Result<bool>;

    fn set_mixing(&self, device: ObjectId, enabled: bool) -> Result<()>;
}

/// Resolves an opaque layout tag to a speaker bitmask.
pub trait TagResolver {
    fn bitmap_for_tag(&self, tag: LayoutTag) -> Result<SpeakerSet>;
}

/// Sleep primitive used by polling loops.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the OS clock.
pub struct StdSleeper;

impl Sleeper for StdSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
