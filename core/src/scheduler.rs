//! Fixed-interval repeating timers on a virtual clock.
//!
//! Timers never run callbacks themselves. The owner asks which timer is
//! due next, fires it, and turns the fire into a message on its own
//! queue, so every mutation stays on one thread of control.
//!
//! Stopping is immediate and idempotent.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

/// Stable timer slots. Declaration order breaks ties between timers due
/// at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerSlot {
    Animation,
    Decay,
    Overlay,
}

impl TimerSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animation => "animation",
            Self::Decay     => "decay",
            Self::Overlay   => "overlay",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    slot:     TimerSlot,
    interval: Millis,
    next_due: Option<Millis>, // None while stopped
}

impl PeriodicTimer {
    /// A stopped timer. Zero intervals are bumped to 1 ms.
    pub fn new(slot: TimerSlot, interval: Millis) -> Self {
        Self {
            slot,
            interval: interval.max(1),
            next_due: None,
        }
    }

    /// (Re)start: first fire is one interval after `now`.
    pub fn start(&mut self, now: Millis) {
        self.next_due = now.checked_add(self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn slot(&self) -> TimerSlot {
        self.slot
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.next_due
    }

    /// If due at or before `now`, consume one fire and return its instant.
    /// Missed fires are delivered one per call, never skipped. A timer
    /// whose next instant would pass the end of the clock stops.
    pub fn fire_if_due(&mut self, now: Millis) -> Option<Millis> {
        let due = self.next_due?;
        if due > now {
            return None;
        }
        self.next_due = due.checked_add(self.interval);
        if self.next_due.is_none() {
            log::debug!("{} timer reached the end of the clock; stopped", self.slot.name());
        }
        Some(due)
    }

    /// Drop the oldest missed fires so that at most `max` remain due by
    /// `now`. Returns how many were dropped.
    pub fn limit_backlog(&mut self, now: Millis, max: u64) -> u64 {
        let Some(due) = self.next_due.filter(|due| *due <= now) else {
            return 0;
        };
        let pending = (now - due) / self.interval + 1;
        let max = max.max(1);
        if pending <= max {
            return 0;
        }
        let dropped = pending - max;
        // Stays <= now, so it cannot overflow.
        self.next_due = Some(due + dropped * self.interval);
        dropped
    }
}

/// The timers owned by one simulation, started and stopped together.
#[derive(Debug, Clone, Default)]
pub struct PeriodicScheduler {
    timers: Vec<PeriodicTimer>,
}

impl PeriodicScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer. Slots are unique; re-adding replaces the interval.
    pub fn register(&mut self, slot: TimerSlot, interval: Millis) {
        self.timers.retain(|t| t.slot != slot);
        self.timers.push(PeriodicTimer::new(slot, interval));
        self.timers.sort_by_key(|t| t.slot);
    }

    pub fn start_all(&mut self, now: Millis) {
        for t in &mut self.timers {
            t.start(now);
        }
    }

    pub fn stop_all(&mut self) {
        for t in &mut self.timers {
            t.stop();
        }
    }

    pub fn any_running(&self) -> bool {
        self.timers.iter().any(PeriodicTimer::is_running)
    }

    pub fn timer(&self, slot: TimerSlot) -> Option<&PeriodicTimer> {
        self.timers.iter().find(|t| t.slot == slot)
    }

    /// Earliest pending fire at or before `until`, ties broken by slot order.
    pub fn peek_due(&self, until: Millis) -> Option<(Millis, TimerSlot)> {
        self.timers
            .iter()
            .filter_map(|t| t.next_due.map(|due| (due, t.slot)))
            .filter(|(due, _)| *due <= until)
            .min()
    }

    /// Bound every timer's backlog at `now`. Returns the fires dropped.
    pub fn limit_backlog(&mut self, now: Millis, max: u64) -> u64 {
        self.timers
            .iter_mut()
            .map(|t| t.limit_backlog(now, max))
            .sum()
    }

    /// Consume one fire of `slot` if it is due by `now`.
    pub fn fire(&mut self, slot: TimerSlot, now: Millis) -> Option<Millis> {
        self.timers
            .iter_mut()
            .find(|t| t.slot == slot)
            .and_then(|t| t.fire_if_due(now))
    }
}
