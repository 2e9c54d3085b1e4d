use audiohal::fourcc::FourCc;
use audiohal::hal::format::{is_best, matches, rank, select_best, Ranked};
use audiohal::hal::{FormatFlags, SampleFormat, StreamFormat};

/// 16-bit PCM descriptor with the given rate and channel count.
fn pcm(rate: f64, channels: u32) -> StreamFormat {
    let mut format = StreamFormat::from_sample_format(SampleFormat::I16, 48000, channels);
    format.sample_rate = rate;
    format
}

#[test]
fn test_rank_drops_uninitialized_candidate() {
    // The zero-rate side loses even when its other fields match the target.
    let target = pcm(48000.0, 2);
    assert_eq!(rank(&target, &pcm(0.0, 2), &pcm(44100.0, 6)), Ranked::Snd);
    assert_eq!(rank(&target, &pcm(44100.0, 6), &pcm(0.0, 2)), Ranked::Fst);
}

#[test]
fn test_rank_prefers_matching_channel_count() {
    let target = pcm(48000.0, 6);
    // Channel count outranks sample rate: the matching side wins even with
    // a worse rate.
    assert_eq!(rank(&target, &pcm(44100.0, 6), &pcm(96000.0, 2)), Ranked::Fst);
    assert_eq!(rank(&target, &pcm(96000.0, 2), &pcm(44100.0, 6)), Ranked::Snd);
}

#[test]
fn test_rank_never_prefers_downsampling() {
    let target = pcm(48000.0, 2);
    assert_eq!(rank(&target, &pcm(44100.0, 2), &pcm(96000.0, 2)), Ranked::Snd);
    assert_eq!(rank(&target, &pcm(96000.0, 2), &pcm(44100.0, 2)), Ranked::Fst);
}

#[test]
fn test_rank_first_below_target_always_loses() {
    // With both candidates under the target the first one is rejected
    // before the second is even looked at.
    let target = pcm(96000.0, 2);
    assert_eq!(rank(&target, &pcm(48000.0, 2), &pcm(44100.0, 2)), Ranked::Snd);
    assert_eq!(rank(&target, &pcm(44100.0, 2), &pcm(48000.0, 2)), Ranked::Snd);
}

#[test]
fn test_rank_exact_rate_wins_as_first_candidate() {
    let target = pcm(48000.0, 2);
    assert_eq!(rank(&target, &pcm(48000.0, 2), &pcm(96000.0, 2)), Ranked::Fst);
}

#[test]
fn test_rank_tie_break_is_asymmetric() {
    // Both candidates above the target: the second one wins in either
    // order, including when it sits farther from the target rate.
    let target = pcm(44100.0, 2);
    assert_eq!(rank(&target, &pcm(48000.0, 2), &pcm(96000.0, 2)), Ranked::Snd);
    assert_eq!(rank(&target, &pcm(96000.0, 2), &pcm(48000.0, 2)), Ranked::Snd);
}

#[test]
fn test_matches_compares_format_family_only() {
    let target = pcm(48000.0, 2);
    assert!(matches(&target, &pcm(96000.0, 8)));

    let mut compressed = pcm(48000.0, 2);
    compressed.format_id = FourCc::from_bytes(*b"ac-3");
    assert!(!matches(&target, &compressed));
}

#[test]
fn test_is_best_is_reflexive() {
    let format = StreamFormat::from_sample_format(SampleFormat::F32, 96000, 6);
    assert!(is_best(&format, &format));
}

#[test]
fn test_is_best_ignores_packing_and_interleaving() {
    let target = StreamFormat::from_sample_format(SampleFormat::I16, 48000, 2);

    let mut candidate = target;
    candidate.flags.remove(FormatFlags::PACKED);
    candidate.flags |= FormatFlags::ALIGNED_HIGH | FormatFlags::NON_INTERLEAVED;
    assert!(is_best(&target, &candidate));
    assert!(is_best(&candidate, &target));
}

#[test]
fn test_is_best_checks_signedness_and_endianness() {
    let target = StreamFormat::from_sample_format(SampleFormat::I16, 48000, 2);

    let mut unsigned = target;
    unsigned.flags.toggle(FormatFlags::SIGNED);
    assert!(!is_best(&target, &unsigned));

    let mut swapped = target;
    swapped.flags.toggle(FormatFlags::BIG_ENDIAN);
    assert!(!is_best(&target, &swapped));

    let mut float = target;
    float.flags.toggle(FormatFlags::FLOAT);
    assert!(!is_best(&target, &float));
}

#[test]
fn test_select_best_empty_list_is_none() {
    let target = pcm(48000.0, 2);
    assert_eq!(select_best(&target, &[]), None);
    assert_eq!(
        select_best(&target, &[StreamFormat::uninitialized(); 3]),
        None
    );
}

#[test]
fn test_select_best_prefers_channel_match_then_rate() {
    let target = pcm(48000.0, 6);
    let candidates = [pcm(48000.0, 2), pcm(44100.0, 6), pcm(96000.0, 6)];
    assert_eq!(select_best(&target, &candidates), Some(pcm(96000.0, 6)));
}

#[test]
fn test_select_best_keeps_exact_rate() {
    let target = pcm(48000.0, 2);
    let candidates = [pcm(96000.0, 2), pcm(48000.0, 2)];
    assert_eq!(select_best(&target, &candidates), Some(pcm(48000.0, 2)));
}

#[test]
fn test_sample_format_round_trip() {
    for format in [
        SampleFormat::U8,
        SampleFormat::I16,
        SampleFormat::I24,
        SampleFormat::I32,
        SampleFormat::F32,
        SampleFormat::F64,
    ] {
        let descriptor = StreamFormat::from_sample_format(format, 44100, 2);
        assert_eq!(descriptor.sample_format(), Some(format));
    }
}

#[test]
fn test_sample_format_rejects_foreign_endianness() {
    let mut descriptor = StreamFormat::from_sample_format(SampleFormat::I16, 48000, 2);
    descriptor.flags.toggle(FormatFlags::BIG_ENDIAN);
    assert_eq!(descriptor.sample_format(), None);
}

#[test]
fn test_sample_format_rejects_non_pcm() {
    let mut descriptor = StreamFormat::from_sample_format(SampleFormat::I16, 48000, 2);
    descriptor.format_id = FourCc::from_bytes(*b"ac-3");
    assert_eq!(descriptor.sample_format(), None);
}

#[test]
fn test_descriptor_packet_geometry() {
    let descriptor = StreamFormat::from_sample_format(SampleFormat::I24, 48000, 6);
    assert_eq!(descriptor.bits_per_channel, 24);
    assert_eq!(descriptor.frames_per_packet, 1);
    assert_eq!(descriptor.bytes_per_frame, 18);
    assert_eq!(descriptor.bytes_per_packet, 18);
}
