//! Events describing every state change the engine applied.
//!
//! Events are returned to the driver in the order the underlying
//! messages were processed, which makes serialization observable in tests.

use crate::{types::{FrameIndex, Millis}, variant::PetVariant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PetEvent {
    // ── Simulation ─────────────────────────────────
    ActionApplied {
        at: Millis,
        action: String,
        hunger: f64,
        happiness: f64,
        energy: f64,
    },
    VariantChanged {
        at: Millis,
        from: PetVariant,
        to: PetVariant,
    },
    AnimationToggled {
        at: Millis,
        animating: bool,
    },
    FrameAdvanced {
        at: Millis,
        frame: FrameIndex,
    },
    DecayApplied {
        at: Millis,
        hunger: f64,
        happiness: f64,
        energy: f64,
    },

    // ── Shared store ───────────────────────────────
    SnapshotWritten {
        at: Millis,
    },

    // ── Live overlay ───────────────────────────────
    OverlayStarted {
        at: Millis,
        session_id: Uuid,
    },
    OverlayUnavailable {
        at: Millis,
        reason: String,
    },
    OverlayPushed {
        at: Millis,
        frame: FrameIndex,
    },
    OverlayPushFailed {
        at: Millis,
        reason: String,
    },
    OverlayEnded {
        at: Millis,
    },
}

impl PetEvent {
    /// Stable name of the variant, for logs and the runner's output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ActionApplied { .. }      => "action_applied",
            Self::VariantChanged { .. }     => "variant_changed",
            Self::AnimationToggled { .. }   => "animation_toggled",
            Self::FrameAdvanced { .. }      => "frame_advanced",
            Self::DecayApplied { .. }       => "decay_applied",
            Self::SnapshotWritten { .. }    => "snapshot_written",
            Self::OverlayStarted { .. }     => "overlay_started",
            Self::OverlayUnavailable { .. } => "overlay_unavailable",
            Self::OverlayPushed { .. }      => "overlay_pushed",
            Self::OverlayPushFailed { .. }  => "overlay_push_failed",
            Self::OverlayEnded { .. }       => "overlay_ended",
        }
    }
}
