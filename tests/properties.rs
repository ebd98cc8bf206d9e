//! Property-based tests for the trap sender.
//!
//! Run with: `cargo test --features testing --test properties`

mod common;

use std::io;
use std::time::{Duration, UNIX_EPOCH};

use common::*;
use proptest::prelude::*;
use snmp_trap_sender::testing::MockTransport;
use snmp_trap_sender::{BindingErrorKind, Error, Uptime, ValueKind};

/// Tag letters the sender accepts.
const SUPPORTED_TAGS: &str = "iucCtaosxdn";

/// How a generated send attempt ends.
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Delivered,
    OpenFails,
    SendFails,
}

fn outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Delivered),
        Just(Outcome::OpenFails),
        Just(Outcome::SendFails),
    ]
}

proptest! {
    #[test]
    fn unsupported_tags_change_nothing(
        tag in any::<char>().prop_filter("unsupported", |c| !SUPPORTED_TAGS.contains(*c)),
        value in "[0-9]{1,5}",
    ) {
        let mock = MockTransport::new();
        let mut sender = mock_sender(&mock);
        sender.add_variable_tag(&enterprise_var(1), "1", 'i').unwrap();

        let err = sender.add_variable_tag(&enterprise_var(2), &value, tag).unwrap_err();
        let rejected = matches!(
            err,
            Error::InvalidBinding { kind: BindingErrorKind::UnsupportedTag(t) } if t == tag
        );
        prop_assert!(rejected);
        prop_assert_eq!(sender.binding_count(), 1);
        prop_assert_eq!(sender.owned_string_count(), 1);
    }

    #[test]
    fn supported_tags_map_to_kinds(idx in 0usize..11) {
        let tag = SUPPORTED_TAGS.chars().nth(idx).unwrap();
        let kind = ValueKind::from_tag(tag).unwrap();
        prop_assert_eq!(kind.tag(), tag);
    }

    #[test]
    fn arena_empty_after_any_send(
        values in prop::collection::vec(any::<i32>(), 0..16),
        end in outcome(),
    ) {
        let mock = MockTransport::new();
        let mut sender = mock_sender(&mock);
        for (leaf, value) in values.iter().enumerate() {
            sender
                .add_variable(&enterprise_var(leaf as u32), &value.to_string(), ValueKind::Integer)
                .unwrap();
        }
        prop_assert_eq!(sender.owned_string_count(), values.len());
        prop_assert_eq!(sender.binding_count(), values.len());

        match end {
            Outcome::Delivered => {}
            Outcome::OpenFails => mock.fail_next_open(io::ErrorKind::NotFound),
            Outcome::SendFails => mock.fail_next_send(io::ErrorKind::ConnectionRefused),
        }
        let result = sender.send();
        prop_assert_eq!(result.is_ok(), matches!(end, Outcome::Delivered));

        prop_assert_eq!(sender.owned_string_count(), 0);
        prop_assert_eq!(sender.binding_count(), 0);
        prop_assert!(!sender.lock().is_locked());
    }

    #[test]
    fn uptime_counts_centiseconds(
        base_secs in 0u64..4_000_000_000,
        elapsed_centis in 0u64..(u64::from(u32::MAX)),
    ) {
        let base = UNIX_EPOCH + Duration::from_secs(base_secs);
        let now = base + Duration::from_millis(elapsed_centis * 10);
        let ticks = Uptime::from_system_time(base).ticks_at(now);
        prop_assert_eq!(u64::from(ticks), elapsed_centis);
    }
}
