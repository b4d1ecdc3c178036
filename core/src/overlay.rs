//! Lifecycle of the push-updated live overlay.
//!
//! STATES: Idle → Requesting → Active → Ending → Idle
//!
//! RULES:
//!   - At most one session per `OverlaySession`; starting while Active
//!     finishes the old session's end before the new request is issued.
//!   - The session's own timer advances a local frame counter and places
//!     content in a single pending slot. `drain` performs the push, so
//!     several fires between drains coalesce into one push of the latest.
//!   - Capability absence and push failures are logged and returned,
//!     never escalated. The interactive surface works without an overlay.

use crate::{
    attribute::Attribute,
    scheduler::{PeriodicTimer, TimerSlot},
    types::{FrameIndex, Millis},
    variant::PetVariant,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("live overlay capability is not available")]
    CapabilityUnavailable,

    #[error("overlay request failed: {0}")]
    RequestFailed(String),

    #[error("overlay push failed: {0}")]
    PushFailed(String),
}

/// Content pushed on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayContent {
    pub variant_tag: String,
    pub frame:       FrameIndex,
    pub hunger:      f64,
    pub happiness:   f64,
    pub energy:      f64,
}

impl OverlayContent {
    pub fn new(
        variant: PetVariant,
        frame: FrameIndex,
        hunger: Attribute,
        happiness: Attribute,
        energy: Attribute,
    ) -> Self {
        Self {
            variant_tag: variant.tag().to_string(),
            frame,
            hunger:    hunger.value(),
            happiness: happiness.value(),
            energy:    energy.value(),
        }
    }

    /// The fixed payload left on screen when a session ends.
    pub fn neutral() -> Self {
        Self::new(
            PetVariant::default(),
            0,
            Attribute::NEUTRAL,
            Attribute::NEUTRAL,
            Attribute::NEUTRAL,
        )
    }

    pub fn variant(&self) -> PetVariant {
        PetVariant::from_tag(&self.variant_tag)
    }
}

/// Outcome of a successful `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStart {
    pub session_id: Uuid,
    /// The session that was ended to make room for this one.
    pub replaced:   Option<Uuid>,
}

/// Attributes fixed for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayAttributes {
    pub pet_display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalPolicy {
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
    Idle,
    Requesting,
    Active,
    Ending,
}

/// The host platform's overlay capability.
pub trait OverlayHost {
    /// Whether the user/platform currently allows overlays.
    fn overlays_enabled(&self) -> bool;

    fn request(
        &mut self,
        session_id: Uuid,
        attributes: &OverlayAttributes,
        content: &OverlayContent,
    ) -> Result<(), OverlayError>;

    fn update(&mut self, session_id: Uuid, content: &OverlayContent) -> Result<(), OverlayError>;

    fn end(
        &mut self,
        session_id: Uuid,
        content: &OverlayContent,
        dismissal: DismissalPolicy,
    ) -> Result<(), OverlayError>;
}

/// Host for platforms without overlay support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlayHost;

impl OverlayHost for NoOverlayHost {
    fn overlays_enabled(&self) -> bool {
        false
    }

    fn request(&mut self, _: Uuid, _: &OverlayAttributes, _: &OverlayContent) -> Result<(), OverlayError> {
        Err(OverlayError::CapabilityUnavailable)
    }

    fn update(&mut self, _: Uuid, _: &OverlayContent) -> Result<(), OverlayError> {
        Err(OverlayError::CapabilityUnavailable)
    }

    fn end(&mut self, _: Uuid, _: &OverlayContent, _: DismissalPolicy) -> Result<(), OverlayError> {
        Err(OverlayError::CapabilityUnavailable)
    }
}

pub struct OverlaySession<H: OverlayHost> {
    host:        H,
    state:       OverlayState,
    session_id:  Option<Uuid>,
    attributes:  Option<OverlayAttributes>,
    timer:       PeriodicTimer,
    frame_cycle: u64,
    frame:       FrameIndex,
    latest:      OverlayContent,
    pending:     Option<OverlayContent>,
}

impl<H: OverlayHost> OverlaySession<H> {
    pub fn new(host: H, interval: Millis, frame_cycle: u64) -> Self {
        Self {
            host,
            state: OverlayState::Idle,
            session_id: None,
            attributes: None,
            timer: PeriodicTimer::new(TimerSlot::Overlay, interval),
            frame_cycle: frame_cycle.max(1),
            frame: 0,
            latest: OverlayContent::neutral(),
            pending: None,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == OverlayState::Active
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn attributes(&self) -> Option<&OverlayAttributes> {
        self.attributes.as_ref()
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn pending(&self) -> Option<&OverlayContent> {
        self.pending.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Request a new session showing `variant` and the given stats.
    pub fn start(
        &mut self,
        now: Millis,
        variant: PetVariant,
        hunger: Attribute,
        happiness: Attribute,
        energy: Attribute,
    ) -> Result<OverlayStart, OverlayError> {
        if !self.host.overlays_enabled() {
            log::warn!("live overlay not enabled; start ignored");
            return Err(OverlayError::CapabilityUnavailable);
        }

        // Finish the previous session before asking for a new one.
        let replaced = self.session_id;
        self.end();

        self.state = OverlayState::Requesting;
        let session_id = Uuid::new_v4();
        let attributes = OverlayAttributes {
            pet_display_name: variant.display_name().to_string(),
        };
        let content = OverlayContent::new(variant, 0, hunger, happiness, energy);

        if let Err(e) = self.host.request(session_id, &attributes, &content) {
            log::warn!("failed to start live overlay: {e}");
            self.state = OverlayState::Idle;
            return Err(e);
        }

        self.state = OverlayState::Active;
        self.session_id = Some(session_id);
        self.attributes = Some(attributes);
        self.frame = 0;
        self.latest = content;
        self.pending = None;
        self.timer.start(now);
        log::info!("live overlay {session_id} started for {variant}");
        Ok(OverlayStart { session_id, replaced })
    }

    /// Replace the content shown by the active session. Returns false
    /// (no-op) when no session is active. The push happens on `drain`.
    pub fn update(
        &mut self,
        variant: PetVariant,
        hunger: Attribute,
        happiness: Attribute,
        energy: Attribute,
    ) -> bool {
        if !self.is_active() {
            return false;
        }
        self.latest = OverlayContent::new(variant, self.frame, hunger, happiness, energy);
        self.pending = Some(self.latest.clone());
        true
    }

    /// End the session, leaving the neutral payload behind.
    /// Returns the final content, or `None` if already Idle.
    pub fn end(&mut self) -> Option<OverlayContent> {
        if self.state == OverlayState::Idle {
            return None;
        }
        self.timer.stop();
        self.pending = None;
        self.state = OverlayState::Ending;

        let final_content = OverlayContent::neutral();
        if let Some(id) = self.session_id.take() {
            match self.host.end(id, &final_content, DismissalPolicy::Immediate) {
                Ok(()) => log::info!("live overlay {id} ended"),
                Err(e) => log::warn!("live overlay {id} end push failed: {e}"),
            }
        }
        self.attributes = None;
        self.state = OverlayState::Idle;
        Some(final_content)
    }

    // ── Timer ──────────────────────────────────────────────────

    pub fn next_due(&self) -> Option<Millis> {
        self.timer.next_due()
    }

    pub fn limit_backlog(&mut self, now: Millis, max: u64) -> u64 {
        self.timer.limit_backlog(now, max)
    }

    /// Consume one timer fire if due. Returns whether a fire was taken.
    pub fn take_fire(&mut self, now: Millis) -> bool {
        self.timer.fire_if_due(now).is_some()
    }

    /// Handle one timer fire: advance the frame and stage a push.
    pub fn tick(&mut self) -> Option<FrameIndex> {
        if !self.is_active() {
            return None;
        }
        self.frame = (self.frame + 1) % self.frame_cycle;
        self.latest.frame = self.frame;
        self.pending = Some(self.latest.clone());
        Some(self.frame)
    }

    /// `take_fire` followed by `tick`, for drivers without a message queue.
    pub fn fire_if_due(&mut self, now: Millis) -> Option<FrameIndex> {
        if !self.take_fire(now) {
            return None;
        }
        self.tick()
    }

    /// Push the pending content, if any. At most one push per call.
    pub fn drain(&mut self) -> Option<Result<OverlayContent, OverlayError>> {
        let content = self.pending.take()?;
        let id = match (self.state, self.session_id) {
            (OverlayState::Active, Some(id)) => id,
            _ => return None,
        };
        match self.host.update(id, &content) {
            Ok(()) => Some(Ok(content)),
            Err(e) => {
                log::warn!("live overlay {id} push failed: {e}");
                Some(Err(e))
            }
        }
    }
}
