//! Virtual clock: owns the current simulated instant.
//!
//! The engine never reads wall time. Drivers (the runner, tests) inject
//! time by advancing this clock, which makes timer ordering reproducible.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetClock {
    now: Millis,
}

impl PetClock {
    pub fn new(start: Millis) -> Self {
        Self { now: start }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move forward to `at`. Time never runs backwards; earlier instants are ignored.
    pub fn advance_to(&mut self, at: Millis) -> Millis {
        if at > self.now {
            self.now = at;
        }
        self.now
    }

    pub fn advance_by(&mut self, delta: Millis) -> Millis {
        self.advance_to(self.now.saturating_add(delta))
    }
}
