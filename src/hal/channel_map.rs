use anyhow::Result;
use log::debug;

use super::traits::{HardwareProperties, TagResolver};
use super::types::{
    ChannelDescription, ChannelLabel, ChannelLayout, LayoutTag, ObjectId, Speaker, SpeakerSet,
};

/// Platform channel labels with a one-to-one portable position. Labels
/// outside this table (unknown and purely positional ones) do not resolve.
const SPEAKER_MAP: &[(ChannelLabel, Speaker)] = &[
    (ChannelLabel::LEFT, Speaker::FrontLeft),
    (ChannelLabel::RIGHT, Speaker::FrontRight),
    (ChannelLabel::CENTER, Speaker::FrontCenter),
    (ChannelLabel::LFE_SCREEN, Speaker::LowFrequency),
    (ChannelLabel::LEFT_SURROUND, Speaker::BackLeft),
    (ChannelLabel::RIGHT_SURROUND, Speaker::BackRight),
    (ChannelLabel::LEFT_CENTER, Speaker::FrontLeftOfCenter),
    (ChannelLabel::RIGHT_CENTER, Speaker::FrontRightOfCenter),
    (ChannelLabel::CENTER_SURROUND, Speaker::BackCenter),
    (ChannelLabel::LEFT_SURROUND_DIRECT, Speaker::SideLeft),
    (ChannelLabel::RIGHT_SURROUND_DIRECT, Speaker::SideRight),
    (ChannelLabel::TOP_CENTER_SURROUND, Speaker::TopCenter),
    (ChannelLabel::VERTICAL_HEIGHT_LEFT, Speaker::TopFrontLeft),
    (ChannelLabel::VERTICAL_HEIGHT_CENTER, Speaker::TopFrontCenter),
    (ChannelLabel::VERTICAL_HEIGHT_RIGHT, Speaker::TopFrontRight),
    (ChannelLabel::TOP_BACK_LEFT, Speaker::TopBackLeft),
    (ChannelLabel::TOP_BACK_CENTER, Speaker::TopBackCenter),
    (ChannelLabel::TOP_BACK_RIGHT, Speaker::TopBackRight),
    (ChannelLabel::REAR_SURROUND_LEFT, Speaker::RearSurroundLeft),
    (ChannelLabel::REAR_SURROUND_RIGHT, Speaker::RearSurroundRight),
    (ChannelLabel::LEFT_WIDE, Speaker::WideLeft),
    (ChannelLabel::RIGHT_WIDE, Speaker::WideRight),
    (ChannelLabel::LFE2, Speaker::LowFrequency2),
    (ChannelLabel::HEADPHONES_LEFT, Speaker::HeadphoneLeft),
    (ChannelLabel::HEADPHONES_RIGHT, Speaker::HeadphoneRight),
];

/// Resolve one platform label to its portable position.
pub fn label_to_speaker(label: ChannelLabel) -> Option<Speaker> {
    SPEAKER_MAP
        .iter()
        .find(|(entry, _)| *entry == label)
        .map(|(_, speaker)| *speaker)
}

// Descriptions resolve all-or-nothing: one unresolvable label rejects the
// whole layout rather than emitting a partial bitmask.
fn bitmap_from_descriptions(descriptions: &[ChannelDescription]) -> Option<SpeakerSet> {
    let mut bitmap = SpeakerSet::empty();
    for description in descriptions {
        match label_to_speaker(description.label) {
            Some(speaker) => bitmap |= SpeakerSet::from(speaker),
            None => {
                debug!(
                    "channel label {} unusable to build channel bitmap, skipping layout",
                    description.label.0
                );
                return None;
            }
        }
    }
    Some(bitmap)
}

fn bitmap_from_tag(resolver: &dyn TagResolver, tag: LayoutTag) -> Option<SpeakerSet> {
    match resolver.bitmap_for_tag(tag) {
        Ok(bitmap) => Some(bitmap),
        Err(err) => {
            debug!(
                "channel layout tag {} unusable to build channel bitmap, skipping layout: {err:#}",
                tag.0
            );
            None
        }
    }
}

/// Convert hardware channel layouts to portable speaker bitmasks. Layouts
/// that do not resolve are skipped; output order follows input order.
pub fn bitmasks_from_layouts(
    resolver: &dyn TagResolver,
    layouts: &[ChannelLayout],
) -> Vec<SpeakerSet> {
    let mut bitmaps = Vec::with_capacity(layouts.len());

    for layout in layouts {
        let bitmap = match layout {
            ChannelLayout::Bitmap(bitmap) => Some(*bitmap),
            ChannelLayout::Descriptions(descriptions) => bitmap_from_descriptions(descriptions),
            ChannelLayout::Tagged(tag) => bitmap_from_tag(resolver, *tag),
        };

        if let Some(bitmap) = bitmap {
            bitmaps.push(bitmap);
        }
    }

    bitmaps
}

/// Query a device's layouts and reduce them to bitmasks.
pub fn device_bitmaps(
    hw: &dyn HardwareProperties,
    resolver: &dyn TagResolver,
    device: ObjectId,
) -> Result<Vec<SpeakerSet>> {
    let layouts = hw.device_layouts(device)?;
    Ok(bitmasks_from_layouts(resolver, &layouts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_resolves_to_a_unique_bit() {
        let mut seen = SpeakerSet::empty();
        for (label, _) in SPEAKER_MAP {
            let speaker = label_to_speaker(*label).unwrap();
            let bit = SpeakerSet::from(speaker);
            assert!(!seen.intersects(bit), "duplicate position for label {}", label.0);
            seen |= bit;
        }
    }

    #[test]
    fn test_unknown_label_does_not_resolve() {
        assert_eq!(label_to_speaker(ChannelLabel::UNKNOWN), None);
        assert_eq!(label_to_speaker(ChannelLabel(9999)), None);
    }
}
