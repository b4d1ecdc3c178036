//! Timeline generation for surfaces that cannot run live code.
//!
//! The presenter reads one snapshot per refresh and fabricates a short,
//! future-dated sequence of entries. Frames cycle through a fixed short
//! loop rather than following the live animation clock, which the
//! widget process cannot observe. Once the host has shown every entry
//! it asks again (`RefreshPolicy::AtEnd`); nothing is kept between calls.

use crate::{
    config::{TimelineConfig, MAX_TIMELINE_ENTRIES},
    snapshot::PetSnapshot,
    store::SnapshotStore,
    types::FrameIndex,
    variant::PetVariant,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Request a new timeline once the last entry's date has passed.
    AtEnd,
}

/// Where an entry's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderSource {
    /// Fixed values shown before any data is available.
    Placeholder,
    /// The store held no snapshot (or could not be read).
    Default,
    /// Values read from the shared store.
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date:      DateTime<Utc>,
    pub frame:     FrameIndex,
    pub variant:   PetVariant,
    pub pet_name:  String,
    pub hunger:    f64,
    pub happiness: f64,
    pub energy:    f64,
    pub source:    RenderSource,
}

impl TimelineEntry {
    fn from_snapshot(
        date: DateTime<Utc>,
        frame: FrameIndex,
        snapshot: &PetSnapshot,
        source: RenderSource,
    ) -> Self {
        Self {
            date,
            frame,
            variant:   snapshot.variant,
            pet_name:  snapshot.pet_name.clone(),
            hunger:    snapshot.hunger.value(),
            happiness: snapshot.happiness.value(),
            energy:    snapshot.energy.value(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub policy:  RefreshPolicy,
}

impl Timeline {
    /// Instant after which the host should request a new timeline.
    pub fn refresh_after(&self) -> Option<DateTime<Utc>> {
        self.entries.last().map(|e| e.date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimelinePresenter {
    config: TimelineConfig,
}

impl TimelinePresenter {
    pub fn new(config: TimelineConfig) -> Self {
        Self { config }
    }

    /// Cheap stand-in shown while the host has nothing else. No I/O.
    pub fn placeholder(&self, now: DateTime<Utc>) -> TimelineEntry {
        TimelineEntry::from_snapshot(now, 0, &PetSnapshot::default(), RenderSource::Placeholder)
    }

    /// A single entry describing the present.
    pub fn snapshot(&self, store: &SnapshotStore, now: DateTime<Utc>) -> TimelineEntry {
        let (snapshot, source) = Self::read_source(store);
        TimelineEntry::from_snapshot(now, 0, &snapshot, source)
    }

    /// Read the store once and build the full timeline.
    pub fn timeline(&self, store: &SnapshotStore, now: DateTime<Utc>) -> Timeline {
        let found = store.read_existing();
        self.build_timeline(now, found.as_ref())
    }

    /// Pure timeline construction from an optional snapshot.
    pub fn build_timeline(&self, now: DateTime<Utc>, snapshot: Option<&PetSnapshot>) -> Timeline {
        let default_snapshot;
        let (snapshot, source) = match snapshot {
            Some(s) => (s, RenderSource::Snapshot),
            None => {
                default_snapshot = PetSnapshot::default();
                (&default_snapshot, RenderSource::Default)
            }
        };

        // Out-of-range spacings end the sequence early instead of wrapping.
        let spacing = i64::try_from(self.config.spacing_ms.max(1))
            .ok()
            .and_then(Duration::try_milliseconds);
        let cycle = self.config.frame_cycle.max(1);
        let count = self.config.entry_count.min(MAX_TIMELINE_ENTRIES);
        let entries = (0..count)
            .map_while(|i| {
                let offset = match i {
                    0 => Duration::zero(),
                    _ => spacing?.checked_mul(i32::try_from(i).ok()?)?,
                };
                let date = now.checked_add_signed(offset)?;
                Some(TimelineEntry::from_snapshot(date, i as u64 % cycle, snapshot, source))
            })
            .collect::<Vec<_>>();
        if entries.len() < count {
            log::warn!(
                "timeline cut to {} of {count} entries: spacing {} ms overflows the calendar",
                entries.len(),
                self.config.spacing_ms
            );
        }

        log::debug!(
            "timeline built: {} entries from {:?} source, variant={}",
            entries.len(),
            source,
            snapshot.variant
        );

        Timeline {
            entries,
            policy: RefreshPolicy::AtEnd,
        }
    }

    fn read_source(store: &SnapshotStore) -> (PetSnapshot, RenderSource) {
        match store.read_existing() {
            Some(s) => (s, RenderSource::Snapshot),
            None => (PetSnapshot::default(), RenderSource::Default),
        }
    }
}
