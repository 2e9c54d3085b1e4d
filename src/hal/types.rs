use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::fourcc::FourCc;

/// Identifier of a hardware object (device or stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Which format property of a stream is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatSelector {
    /// The format the hardware runs the stream at.
    Physical,
    /// The format the stream presents to clients.
    Virtual,
}

/// Format id shared by all linear PCM streams.
pub const FORMAT_LINEAR_PCM: FourCc = FourCc::from_bytes(*b"lpcm");

bitflags! {
    /// Encoding flags of a stream format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FormatFlags: u32 {
        const FLOAT           = 1 << 0;
        const SIGNED          = 1 << 1;
        const BIG_ENDIAN      = 1 << 2;
        const PACKED          = 1 << 3;
        const ALIGNED_HIGH    = 1 << 4;
        const NON_INTERLEAVED = 1 << 5;
        const NON_MIXABLE     = 1 << 6;
    }
}

/// Structured description of a PCM stream: sample rate, depth, channel
/// count and encoding flags. Value type; produced by the hardware query
/// interface or built from a [`SampleFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamFormat {
    pub sample_rate: f64,
    pub format_id: FourCc,
    pub flags: FormatFlags,
    pub bits_per_channel: u32,
    pub channels_per_frame: u32,
    pub frames_per_packet: u32,
    pub bytes_per_packet: u32,
    pub bytes_per_frame: u32,
}

/// Player-internal sample data format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    U8,   // 8-bit unsigned
    I16,  // 16-bit PCM
    I24,  // 24-bit
    I32,  // 32-bit integer
    F32,  // 32-bit float
    F64,  // 64-bit float
}

impl Default for SampleFormat {
    fn default() -> Self {
        SampleFormat::F32
    }
}

impl SampleFormat {
    pub const fn bits(self) -> u32 {
        match self {
            SampleFormat::U8 => 8,
            SampleFormat::I16 => 16,
            SampleFormat::I24 => 24,
            SampleFormat::I32 => 32,
            SampleFormat::F32 => 32,
            SampleFormat::F64 => 64,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, SampleFormat::F32 | SampleFormat::F64)
    }

    pub const fn is_signed_int(self) -> bool {
        matches!(self, SampleFormat::I16 | SampleFormat::I24 | SampleFormat::I32)
    }
}

/// Portable speaker positions. The first 18 follow wave-extensible bit
/// order, so a bitmap-tagged hardware layout is already in this encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    FrontLeft = 0,
    FrontRight = 1,
    FrontCenter = 2,
    LowFrequency = 3,
    BackLeft = 4,
    BackRight = 5,
    FrontLeftOfCenter = 6,
    FrontRightOfCenter = 7,
    BackCenter = 8,
    SideLeft = 9,
    SideRight = 10,
    TopCenter = 11,
    TopFrontLeft = 12,
    TopFrontCenter = 13,
    TopFrontRight = 14,
    TopBackLeft = 15,
    TopBackCenter = 16,
    TopBackRight = 17,
    // extensions past the wave-extensible set
    HeadphoneLeft = 18,
    HeadphoneRight = 19,
    WideLeft = 20,
    WideRight = 21,
    RearSurroundLeft = 22,
    RearSurroundRight = 23,
    LowFrequency2 = 24,
}

impl Speaker {
    pub const fn bitmask(self) -> u32 {
        1 << self as u32
    }
}

bitflags! {
    /// Set of speaker positions encoded one bit per position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SpeakerSet: u32 {
        const FRONT_LEFT = Speaker::FrontLeft.bitmask();
        const FRONT_RIGHT = Speaker::FrontRight.bitmask();
        const FRONT_CENTER = Speaker::FrontCenter.bitmask();
        const LOW_FREQUENCY = Speaker::LowFrequency.bitmask();
        const BACK_LEFT = Speaker::BackLeft.bitmask();
        const BACK_RIGHT = Speaker::BackRight.bitmask();
        const FRONT_LEFT_OF_CENTER = Speaker::FrontLeftOfCenter.bitmask();
        const FRONT_RIGHT_OF_CENTER = Speaker::FrontRightOfCenter.bitmask();
        const BACK_CENTER = Speaker::BackCenter.bitmask();
        const SIDE_LEFT = Speaker::SideLeft.bitmask();
        const SIDE_RIGHT = Speaker::SideRight.bitmask();
        const TOP_CENTER = Speaker::TopCenter.bitmask();
        const TOP_FRONT_LEFT = Speaker::TopFrontLeft.bitmask();
        const TOP_FRONT_CENTER = Speaker::TopFrontCenter.bitmask();
        const TOP_FRONT_RIGHT = Speaker::TopFrontRight.bitmask();
        const TOP_BACK_LEFT = Speaker::TopBackLeft.bitmask();
        const TOP_BACK_CENTER = Speaker::TopBackCenter.bitmask();
        const TOP_BACK_RIGHT = Speaker::TopBackRight.bitmask();
        const HEADPHONE_LEFT = Speaker::HeadphoneLeft.bitmask();
        const HEADPHONE_RIGHT = Speaker::HeadphoneRight.bitmask();
        const WIDE_LEFT = Speaker::WideLeft.bitmask();
        const WIDE_RIGHT = Speaker::WideRight.bitmask();
        const REAR_SURROUND_LEFT = Speaker::RearSurroundLeft.bitmask();
        const REAR_SURROUND_RIGHT = Speaker::RearSurroundRight.bitmask();
        const LOW_FREQUENCY_2 = Speaker::LowFrequency2.bitmask();
    }
}

impl From<Speaker> for SpeakerSet {
    fn from(speaker: Speaker) -> Self {
        SpeakerSet::from_bits_retain(speaker.bitmask())
    }
}

/// Platform channel-label code carried by a channel description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelLabel(pub u32);

impl ChannelLabel {
    pub const UNKNOWN: ChannelLabel = ChannelLabel(0xFFFF_FFFF);
    pub const LEFT: ChannelLabel = ChannelLabel(1);
    pub const RIGHT: ChannelLabel = ChannelLabel(2);
    pub const CENTER: ChannelLabel = ChannelLabel(3);
    pub const LFE_SCREEN: ChannelLabel = ChannelLabel(4);
    pub const LEFT_SURROUND: ChannelLabel = ChannelLabel(5);
    pub const RIGHT_SURROUND: ChannelLabel = ChannelLabel(6);
    pub const LEFT_CENTER: ChannelLabel = ChannelLabel(7);
    pub const RIGHT_CENTER: ChannelLabel = ChannelLabel(8);
    pub const CENTER_SURROUND: ChannelLabel = ChannelLabel(9);
    pub const LEFT_SURROUND_DIRECT: ChannelLabel = ChannelLabel(10);
    pub const RIGHT_SURROUND_DIRECT: ChannelLabel = ChannelLabel(11);
    pub const TOP_CENTER_SURROUND: ChannelLabel = ChannelLabel(12);
    pub const VERTICAL_HEIGHT_LEFT: ChannelLabel = ChannelLabel(13);
    pub const VERTICAL_HEIGHT_CENTER: ChannelLabel = ChannelLabel(14);
    pub const VERTICAL_HEIGHT_RIGHT: ChannelLabel = ChannelLabel(15);
    pub const TOP_BACK_LEFT: ChannelLabel = ChannelLabel(16);
    pub const TOP_BACK_CENTER: ChannelLabel = ChannelLabel(17);
    pub const TOP_BACK_RIGHT: ChannelLabel = ChannelLabel(18);
    pub const REAR_SURROUND_LEFT: ChannelLabel = ChannelLabel(33);
    pub const REAR_SURROUND_RIGHT: ChannelLabel = ChannelLabel(34);
    pub const LEFT_WIDE: ChannelLabel = ChannelLabel(35);
    pub const RIGHT_WIDE: ChannelLabel = ChannelLabel(36);
    pub const LFE2: ChannelLabel = ChannelLabel(37);
    pub const HEADPHONES_LEFT: ChannelLabel = ChannelLabel(301);
    pub const HEADPHONES_RIGHT: ChannelLabel = ChannelLabel(302);
}

/// One channel of a description-tagged layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescription {
    pub label: ChannelLabel,
}

/// Opaque layout tag requiring external resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutTag(pub u32);

/// Hardware channel layout, in one of the three platform encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Raw bitmask of speaker positions, already in portable bit order.
    Bitmap(SpeakerSet),
    /// Ordered per-channel labels.
    Descriptions(Vec<ChannelDescription>),
    /// Tag that only the platform can interpret.
    Tagged(LayoutTag),
}

/// Device discovery information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: ObjectId,
    pub name: String,
}
