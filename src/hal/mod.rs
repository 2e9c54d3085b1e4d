pub mod channel_map;
pub mod device;
pub mod format;
pub mod mock;
pub mod negotiator;
pub mod traits;
pub mod types;

pub use channel_map::{bitmasks_from_layouts, device_bitmaps, label_to_speaker};
pub use device::{
    device_list, disable_mixing, enable_mixing, list_devices, log_device_list, HogMode,
};
pub use format::{is_best, matches, rank, select_best, Ranked};
pub use negotiator::FormatNegotiator;
pub use traits::{HardwareProperties, PropertyListener, Sleeper, StdSleeper, TagResolver};
pub use types::{
    ChannelDescription, ChannelLabel, ChannelLayout, DeviceInfo, FormatFlags, FormatSelector,
    LayoutTag, ObjectId, SampleFormat, Speaker, SpeakerSet, StreamFormat, FORMAT_LINEAR_PCM,
};
