//! The authoritative in-process pet state machine.
//!
//! RULES:
//!   - Exactly one `PetSimulation` per interactive session.
//!   - Every stat change goes through `Attribute::apply` (saturating).
//!   - Any change to a snapshot field marks the simulation dirty; the owner
//!     flushes the snapshot after the message that caused it.
//!   - Animation frames are not part of the snapshot and never mark dirty.

use crate::{
    attribute::Attribute,
    config::{ActionConfig, DecayConfig, PetConfig, StatDelta},
    snapshot::PetSnapshot,
    types::FrameIndex,
    variant::PetVariant,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    pub name:        String,
    pub variant:     PetVariant,
    pub hunger:      Attribute,
    pub happiness:   Attribute,
    pub energy:      Attribute,
    pub frame_index: FrameIndex,
    pub animating:   bool,
}

impl PetState {
    /// Rebuild live state from a persisted snapshot. Animation restarts at frame 0.
    pub fn from_snapshot(snapshot: &PetSnapshot) -> Self {
        Self {
            name:        snapshot.pet_name.clone(),
            variant:     snapshot.variant,
            hunger:      snapshot.hunger,
            happiness:   snapshot.happiness,
            energy:      snapshot.energy,
            frame_index: 0,
            animating:   true,
        }
    }

    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            pet_name:  self.name.clone(),
            variant:   self.variant,
            hunger:    self.hunger,
            happiness: self.happiness,
            energy:    self.energy,
        }
    }

    /// Frame index wrapped for the current variant.
    pub fn display_frame(&self) -> FrameIndex {
        self.frame_index % self.variant.frame_count()
    }

    fn apply(&mut self, delta: StatDelta) {
        self.hunger = self.hunger.apply(delta.hunger);
        self.happiness = self.happiness.apply(delta.happiness);
        self.energy = self.energy.apply(delta.energy);
    }
}

impl Default for PetState {
    fn default() -> Self {
        Self::from_snapshot(&PetSnapshot::default())
    }
}

pub struct PetSimulation {
    state:   PetState,
    actions: ActionConfig,
    decay:   DecayConfig,
    dirty:   bool,
}

impl PetSimulation {
    pub fn new(state: PetState, config: &PetConfig) -> Self {
        Self {
            state,
            actions: config.actions.clone(),
            decay: config.decay.clone(),
            dirty: false,
        }
    }

    pub fn state(&self) -> &PetState {
        &self.state
    }

    pub fn snapshot(&self) -> PetSnapshot {
        self.state.snapshot()
    }

    // ── Actions ────────────────────────────────────────────────

    pub fn feed(&mut self) {
        self.state.apply(self.actions.feed);
        self.dirty = true;
    }

    pub fn pet(&mut self) {
        self.state.apply(self.actions.pet);
        self.dirty = true;
    }

    pub fn sleep(&mut self) {
        self.state.apply(self.actions.sleep);
        self.dirty = true;
    }

    /// Cosmetic switch: stats are untouched, the frame is re-wrapped.
    pub fn change_variant(&mut self, variant: PetVariant) {
        self.state.variant = variant;
        self.state.frame_index %= variant.frame_count();
        self.dirty = true;
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.state.animating = animating;
    }

    // ── Clock-driven ───────────────────────────────────────────

    /// Advance one animation frame. Returns false (no-op) while paused.
    pub fn tick_animation(&mut self) -> bool {
        if !self.state.animating {
            return false;
        }
        let count = self.state.variant.frame_count();
        self.state.frame_index = (self.state.frame_index + 1) % count;
        true
    }

    pub fn tick_decay(&mut self) {
        self.state.apply(self.decay.as_delta());
        self.dirty = true;
    }

    // ── Persistence hand-off ───────────────────────────────────

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take the pending snapshot, clearing the dirty flag.
    pub fn take_dirty(&mut self) -> Option<PetSnapshot> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.state.snapshot())
    }
}
