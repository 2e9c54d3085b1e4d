use std::fmt::Write as _;

use crate::fourcc::FourCc;

use super::types::{FormatFlags, SampleFormat, StreamFormat, FORMAT_LINEAR_PCM};

impl StreamFormat {
    /// Descriptor with every field zeroed. Candidate ranking starts from
    /// this and hardware queries can return it for unconfigured streams.
    pub const fn uninitialized() -> Self {
        StreamFormat {
            sample_rate: 0.0,
            format_id: FourCc(0),
            flags: FormatFlags::empty(),
            bits_per_channel: 0,
            channels_per_frame: 0,
            frames_per_packet: 0,
            bytes_per_packet: 0,
            bytes_per_frame: 0,
        }
    }

    pub fn is_uninitialized(&self) -> bool {
        self.sample_rate == 0.0
    }

    /// Build a packed linear-PCM descriptor from a player format code, in
    /// native byte order.
    pub fn from_sample_format(format: SampleFormat, rate: u32, channels: u32) -> Self {
        let mut flags = FormatFlags::PACKED;
        if format.is_float() {
            flags |= FormatFlags::FLOAT;
        }
        if format.is_signed_int() {
            flags |= FormatFlags::SIGNED;
        }
        if cfg!(target_endian = "big") {
            flags |= FormatFlags::BIG_ENDIAN;
        }

        let bits = format.bits();
        let bytes_per_frame = channels * (bits / 8);

        StreamFormat {
            sample_rate: rate as f64,
            format_id: FORMAT_LINEAR_PCM,
            flags,
            bits_per_channel: bits,
            channels_per_frame: channels,
            frames_per_packet: 1,
            bytes_per_packet: bytes_per_frame,
            bytes_per_frame,
        }
    }

    /// Map back to a player format code, when one exists for this
    /// combination of depth, flags and endianness.
    pub fn sample_format(&self) -> Option<SampleFormat> {
        if self.format_id != FORMAT_LINEAR_PCM {
            return None;
        }

        let big_endian = self.flags.contains(FormatFlags::BIG_ENDIAN);
        if big_endian != cfg!(target_endian = "big") && self.bits_per_channel > 8 {
            return None;
        }

        if self.flags.contains(FormatFlags::FLOAT) {
            return match self.bits_per_channel {
                32 => Some(SampleFormat::F32),
                64 => Some(SampleFormat::F64),
                _ => None,
            };
        }

        match (
            self.bits_per_channel,
            self.flags.contains(FormatFlags::SIGNED),
        ) {
            (8, false) => Some(SampleFormat::U8),
            (16, true) => Some(SampleFormat::I16),
            (24, true) => Some(SampleFormat::I24),
            (32, true) => Some(SampleFormat::I32),
            _ => None,
        }
    }

    /// One-line diagnostic rendering of the descriptor.
    pub fn describe(&self) -> String {
        let flags = self.flags;
        let mut out = String::new();
        let _ = write!(
            out,
            "{:7.1}Hz {}bit [{}][{:#x}][{}][{}][{}][{}] {} {} {} {}{}{}{}",
            self.sample_rate,
            self.bits_per_channel,
            self.format_id,
            flags.bits(),
            self.bytes_per_packet,
            self.frames_per_packet,
            self.bytes_per_frame,
            self.channels_per_frame,
            if flags.contains(FormatFlags::FLOAT) { "float" } else { "int" },
            if flags.contains(FormatFlags::NON_MIXABLE) { "" } else { "mixable" },
            if flags.contains(FormatFlags::BIG_ENDIAN) { "BE" } else { "LE" },
            if flags.contains(FormatFlags::SIGNED) { "S" } else { "U" },
            if flags.contains(FormatFlags::PACKED) { " packed" } else { "" },
            if flags.contains(FormatFlags::ALIGNED_HIGH) { " aligned" } else { "" },
            if flags.contains(FormatFlags::NON_INTERLEAVED) { " planar" } else { "" },
        );
        out
    }
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self::uninitialized()
    }
}

/// Coarse match: both descriptors belong to the same format family.
pub fn matches(target: &StreamFormat, candidate: &StreamFormat) -> bool {
    target.format_id == candidate.format_id
}

// Only these axes decide whether a format already satisfies a request;
// packing, alignment and interleaving are negotiable downstream.
const COMPARED_FLAGS: FormatFlags = FormatFlags::FLOAT
    .union(FormatFlags::SIGNED)
    .union(FormatFlags::BIG_ENDIAN);

fn flags_agree(target: FormatFlags, candidate: FormatFlags) -> bool {
    target.intersection(COMPARED_FLAGS) == candidate.intersection(COMPARED_FLAGS)
}

/// Exact match on the fields that matter for negotiation: format family,
/// depth, rate, channel count and the float/signed/endianness axes.
pub fn is_best(target: &StreamFormat, candidate: &StreamFormat) -> bool {
    matches(target, candidate)
        && target.bits_per_channel == candidate.bits_per_channel
        && target.sample_rate == candidate.sample_rate
        && target.channels_per_frame == candidate.channels_per_frame
        && flags_agree(target.flags, candidate.flags)
}

/// Outcome of ranking two candidate formats against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranked {
    Fst,
    Snd,
}

/// Decide which of two candidates sits closer to the target. Rules apply
/// in order, first decisive one wins: an uninitialized candidate loses
/// outright; a candidate matching the target channel count beats one that
/// does not; with channel status tied, a rate below the target loses
/// (upsample in the worst case, never downsample); past that, the second
/// candidate wins whenever the first exceeds the target rate.
pub fn rank(target: &StreamFormat, fst: &StreamFormat, snd: &StreamFormat) -> Ranked {
    if fst.sample_rate == 0.0 {
        return Ranked::Snd;
    }
    if snd.sample_rate == 0.0 {
        return Ranked::Fst;
    }

    if fst.channels_per_frame == target.channels_per_frame
        && snd.channels_per_frame != target.channels_per_frame
    {
        return Ranked::Fst;
    }
    if fst.channels_per_frame != target.channels_per_frame
        && snd.channels_per_frame == target.channels_per_frame
    {
        return Ranked::Snd;
    }

    if fst.sample_rate < target.sample_rate {
        return Ranked::Snd;
    }
    if snd.sample_rate < target.sample_rate {
        return Ranked::Fst;
    }

    if fst.sample_rate > target.sample_rate {
        Ranked::Snd
    } else {
        Ranked::Fst
    }
}

/// Pick the best candidate for the target from a discovered format list.
/// Returns None when no candidate is usable.
pub fn select_best(target: &StreamFormat, candidates: &[StreamFormat]) -> Option<StreamFormat> {
    let mut best = StreamFormat::uninitialized();
    for candidate in candidates {
        if rank(target, &best, candidate) == Ranked::Snd {
            best = *candidate;
        }
    }

    if best.is_uninitialized() {
        None
    } else {
        Some(best)
    }
}
