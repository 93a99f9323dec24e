// ABOUTME: Property tests for the flag validators and image references.
// ABOUTME: Checks acceptance boundaries over generated inputs.

use podremote::args::{DetachKey, PositiveInt, Signal, UnitValue, nsig};
use podremote::types::ImageRef;
use proptest::prelude::*;

proptest! {
    #[test]
    fn positive_ints_keep_their_value(n in 1i64..=i64::MAX) {
        let parsed: PositiveInt = n.to_string().parse().unwrap();
        prop_assert_eq!(parsed.get(), n as u64);
    }

    #[test]
    fn zero_and_negatives_are_rejected(n in i64::MIN..=0) {
        prop_assert!(n.to_string().parse::<PositiveInt>().is_err());
    }

    #[test]
    fn unit_suffixes_scale_bytes(
        n in 1u32..1_000_000,
        suffix in prop::sample::select(vec!['b', 'k', 'm', 'g']),
    ) {
        let raw = format!("{n}{suffix}");
        let value: UnitValue = raw.parse().unwrap();
        let scale: i64 = match suffix {
            'b' => 1,
            'k' => 1 << 10,
            'm' => 1 << 20,
            _ => 1 << 30,
        };
        prop_assert_eq!(value.bytes(), Some(i64::from(n) * scale));
        prop_assert_eq!(value.as_str(), raw.as_str());
    }

    #[test]
    fn unknown_unit_suffixes_are_rejected(n in 1u32..1000, suffix in "[ac-fh-jln-z]") {
        let input = format!("{n}{suffix}");
        prop_assert!(input.parse::<UnitValue>().is_err());
    }

    #[test]
    fn signal_numbers_in_range_are_accepted(n in 1..nsig()) {
        let signal: Signal = n.to_string().parse().unwrap();
        prop_assert_eq!(signal.number(), n);
    }

    #[test]
    fn signal_numbers_out_of_range_are_rejected(n in nsig()..10_000) {
        prop_assert!(n.to_string().parse::<Signal>().is_err());
    }

    #[test]
    fn single_letters_are_detach_keys(c in "[a-zA-Z]") {
        let key: DetachKey = c.parse().unwrap();
        prop_assert_eq!(key.byte(), c.as_bytes()[0]);
    }

    #[test]
    fn longer_words_are_not_detach_keys(word in "[a-z]{2,8}") {
        prop_assume!(!word.starts_with("ctrl"));
        prop_assert!(word.parse::<DetachKey>().is_err());
    }

    #[test]
    fn untagged_images_default_to_latest(name in "[a-z][a-z0-9]{0,10}(/[a-z][a-z0-9]{0,10})?") {
        let image: ImageRef = name.parse().unwrap();
        prop_assert_eq!(image.tag(), Some("latest"));
        prop_assert_eq!(image.to_string(), format!("{name}:latest"));
    }

    #[test]
    fn tagged_images_display_as_written(
        registry in "(registry\\.example\\.com(:5000)?/)?",
        name in "[a-z][a-z0-9]{0,10}",
        tag in "[a-z0-9][a-z0-9.]{0,8}",
    ) {
        let raw = format!("{registry}{name}:{tag}");
        let image: ImageRef = raw.parse().unwrap();
        prop_assert_eq!(image.tag(), Some(tag.as_str()));
        prop_assert_eq!(image.to_string(), raw);
    }
}

#[test]
fn named_signals_match_libc_numbers() {
    for (name, number) in [("KILL", 9), ("TERM", 15), ("INT", 2), ("HUP", 1)] {
        assert_eq!(name.parse::<Signal>().unwrap().number(), number, "{name}");
    }
}

#[test]
fn signal_names_are_case_and_prefix_sensitive() {
    for raw in ["kill", "SIGKILL", "Term"] {
        assert!(raw.parse::<Signal>().is_err(), "{raw}");
    }
}

#[test]
fn oversized_memory_is_a_usage_error() {
    let err = "9999999999999g".parse::<UnitValue>().unwrap_err();
    assert_eq!(err.to_string(), "\"9999999999999g\" is too large");
}
