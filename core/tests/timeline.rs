//! Timeline generation for surfaces without a live clock.

use chrono::{Duration, TimeZone, Utc};
use pixelpet_core::{
    attribute::Attribute,
    config::{PetConfig, TimelineConfig, MAX_TIMELINE_ENTRIES, MAX_TIMELINE_SPACING_MS},
    snapshot::PetSnapshot,
    store::SnapshotStore,
    timeline::{RefreshPolicy, RenderSource, TimelinePresenter},
    variant::PetVariant,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn written_store() -> SnapshotStore {
    let store = SnapshotStore::in_memory("test.timeline").unwrap();
    store.write(&PetSnapshot {
        pet_name: "Mochi".into(),
        variant: PetVariant::Slime,
        hunger: Attribute::new(0.2),
        happiness: Attribute::new(0.3),
        energy: Attribute::new(0.4),
    });
    store
}

#[test]
fn timeline_has_twenty_entries_one_second_apart() {
    let presenter = TimelinePresenter::default();
    let timeline = presenter.timeline(&written_store(), now());

    assert_eq!(timeline.entries.len(), 20);
    assert_eq!(timeline.policy, RefreshPolicy::AtEnd);
    assert_eq!(timeline.entries[0].date, now());

    for pair in timeline.entries.windows(2) {
        assert_eq!(pair[1].date - pair[0].date, Duration::seconds(1));
    }
    for (i, entry) in timeline.entries.iter().enumerate() {
        assert_eq!(entry.frame, i as u64 % 4, "entry {i}");
    }
    assert_eq!(timeline.refresh_after(), Some(now() + Duration::seconds(19)));
}

#[test]
fn entries_carry_the_stored_snapshot() {
    let presenter = TimelinePresenter::default();
    let timeline = presenter.timeline(&written_store(), now());

    for entry in &timeline.entries {
        assert_eq!(entry.source, RenderSource::Snapshot);
        assert_eq!(entry.variant, PetVariant::Slime);
        assert_eq!(entry.pet_name, "Mochi");
        assert_eq!(entry.hunger, 0.2);
        assert_eq!(entry.happiness, 0.3);
        assert_eq!(entry.energy, 0.4);
    }
}

#[test]
fn empty_store_yields_default_entries_and_stays_empty() {
    let store = SnapshotStore::in_memory("test.timeline").unwrap();
    let presenter = TimelinePresenter::default();
    let timeline = presenter.timeline(&store, now());

    let first = &timeline.entries[0];
    assert_eq!(first.source, RenderSource::Default);
    assert_eq!(first.variant, PetVariant::Dog);
    assert_eq!((first.hunger, first.happiness, first.energy), (0.7, 0.8, 0.6));
    assert_eq!(store.try_read().unwrap(), None, "presenter must never write");
}

#[test]
fn placeholder_uses_fixed_values() {
    let entry = TimelinePresenter::default().placeholder(now());
    assert_eq!(entry.source, RenderSource::Placeholder);
    assert_eq!(entry.frame, 0);
    assert_eq!((entry.hunger, entry.happiness, entry.energy), (0.7, 0.8, 0.6));
}

#[test]
fn snapshot_entry_describes_the_present() {
    let entry = TimelinePresenter::default().snapshot(&written_store(), now());
    assert_eq!(entry.date, now());
    assert_eq!(entry.frame, 0);
    assert_eq!(entry.variant, PetVariant::Slime);
}

#[test]
fn building_is_a_pure_function_of_inputs() {
    let presenter = TimelinePresenter::new(TimelineConfig {
        entry_count: 6,
        spacing_ms: 500,
        frame_cycle: 3,
    });
    let snap = PetSnapshot::default();
    let a = presenter.build_timeline(now(), Some(&snap));
    let b = presenter.build_timeline(now(), Some(&snap));
    assert_eq!(a, b);

    let frames: Vec<_> = a.entries.iter().map(|e| e.frame).collect();
    assert_eq!(frames, vec![0, 1, 2, 0, 1, 2]);
    assert_eq!(a.entries[1].date - a.entries[0].date, Duration::milliseconds(500));
}

fn assert_strictly_increasing(entries: &[pixelpet_core::timeline::TimelineEntry]) {
    for pair in entries.windows(2) {
        assert!(pair[1].date > pair[0].date, "{} !> {}", pair[1].date, pair[0].date);
    }
}

#[test]
fn spacing_beyond_i64_never_runs_backwards() {
    let presenter = TimelinePresenter::new(TimelineConfig {
        spacing_ms: u64::MAX,
        ..TimelineConfig::default()
    });
    let timeline = presenter.build_timeline(now(), None);

    assert_eq!(timeline.entries.len(), 1);
    assert_eq!(timeline.entries[0].date, now());
}

#[test]
fn huge_spacing_stops_at_the_calendar_edge() {
    let presenter = TimelinePresenter::new(TimelineConfig {
        spacing_ms: 1_000_000_000_000_000,
        ..TimelineConfig::default()
    });
    let timeline = presenter.build_timeline(now(), None);

    assert!(!timeline.entries.is_empty());
    assert!(timeline.entries.len() < 20);
    assert_strictly_increasing(&timeline.entries);
}

#[test]
fn entry_count_is_capped() {
    let presenter = TimelinePresenter::new(TimelineConfig {
        entry_count: usize::MAX,
        ..TimelineConfig::default()
    });
    let timeline = presenter.build_timeline(now(), None);

    assert_eq!(timeline.entries.len(), MAX_TIMELINE_ENTRIES);
    assert_strictly_increasing(&timeline.entries);
}

#[test]
fn validate_rejects_out_of_range_timelines() {
    let mut config = PetConfig::default_test();
    assert!(config.validate().is_ok());

    config.timeline.spacing_ms = u64::MAX;
    assert!(config.validate().is_err());
    config.timeline.spacing_ms = MAX_TIMELINE_SPACING_MS + 1;
    assert!(config.validate().is_err());
    config.timeline.spacing_ms = MAX_TIMELINE_SPACING_MS;
    assert!(config.validate().is_ok());

    config.timeline.entry_count = MAX_TIMELINE_ENTRIES + 1;
    assert!(config.validate().is_err());
    config.timeline.entry_count = 0;
    assert!(config.validate().is_err());
}
