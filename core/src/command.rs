use crate::{scheduler::TimerSlot, types::Millis, variant::PetVariant};
use serde::{Deserialize, Serialize};

/// All user-issued commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PetCommand {
    // ── Care actions ──────────────────────────────
    Feed,
    Pet,
    Sleep,

    // ── Presentation ──────────────────────────────
    ChangeVariant { variant: PetVariant },
    SetAnimating { animating: bool },

    // ── Live overlay ──────────────────────────────
    StartOverlay,
    EndOverlay,
}

impl PetCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Feed                => "feed",
            Self::Pet                 => "pet",
            Self::Sleep               => "sleep",
            Self::ChangeVariant { .. } => "change_variant",
            Self::SetAnimating { .. } => "set_animating",
            Self::StartOverlay        => "start_overlay",
            Self::EndOverlay          => "end_overlay",
        }
    }
}

/// Everything that may mutate pet state. All sources funnel through
/// one queue so mutations are applied strictly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PetMessage {
    Command(PetCommand),
    Timer(TimerSlot),
}

/// A queued message with the instant it was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedMessage {
    pub queued_at: Millis,
    pub message:   PetMessage,
}
