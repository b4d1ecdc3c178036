//! The pet engine: owns the simulation and serializes every mutation.
//!
//! MESSAGE SOURCES (all funnelled through one queue):
//!   1. User commands            (`submit` / `apply`)
//!   2. Animation timer          (every `timers.animation_interval_ms`)
//!   3. Decay timer              (every `timers.decay_interval_ms`)
//!   4. Overlay timer            (every `timers.overlay_interval_ms`, while active)
//!
//! RULES:
//!   - Messages are processed one at a time, in queue order. Timer fires
//!     are enqueued in timestamp order; ties follow `TimerSlot` order.
//!   - Queued commands are processed at the current instant, before any
//!     timer that falls due later.
//!   - A message that changes a snapshot field is followed immediately by
//!     a snapshot write (write-through) and an overlay content update.
//!   - Overlay pushes are drained once at the end of each `advance_to` /
//!     `apply`, so bursts of overlay fires coalesce into one push.
//!   - One `advance_to` delivers at most `MAX_TIMER_BACKLOG` fires per
//!     timer. Larger jumps skip the oldest fires.
//!   - Shutdown stops every timer, ends the overlay and writes a final
//!     snapshot. It is idempotent and also runs on drop.

use crate::{
    clock::PetClock,
    command::{PetCommand, PetMessage, QueuedMessage},
    config::PetConfig,
    error::{PetError, PetResult},
    event::PetEvent,
    overlay::{OverlayHost, OverlaySession},
    scheduler::{PeriodicScheduler, TimerSlot},
    simulation::{PetSimulation, PetState},
    snapshot::PetSnapshot,
    store::SnapshotStore,
    types::Millis,
};
use std::collections::VecDeque;

/// Most fires any one timer delivers in a single `advance_to`; older
/// missed fires are skipped.
pub const MAX_TIMER_BACKLOG: u64 = 10_000;

pub struct PetEngine<H: OverlayHost> {
    clock:     PetClock,
    sim:       PetSimulation,
    scheduler: PeriodicScheduler,
    overlay:   OverlaySession<H>,
    store:     SnapshotStore,
    queue:     VecDeque<QueuedMessage>,
    closed:    bool,
}

impl<H: OverlayHost> PetEngine<H> {
    /// Wire an engine around an explicit initial state. Timers start at t=0.
    pub fn new(config: &PetConfig, state: PetState, store: SnapshotStore, host: H) -> Self {
        let mut scheduler = PeriodicScheduler::new();
        scheduler.register(TimerSlot::Animation, config.timers.animation_interval_ms);
        scheduler.register(TimerSlot::Decay, config.timers.decay_interval_ms);

        let clock = PetClock::new(0);
        scheduler.start_all(clock.now());

        Self {
            clock,
            sim: PetSimulation::new(state, config),
            scheduler,
            overlay: OverlaySession::new(
                host,
                config.timers.overlay_interval_ms,
                config.overlay.frame_cycle,
            ),
            store,
            queue: VecDeque::new(),
            closed: false,
        }
    }

    /// Build an engine that resumes from the shared store.
    /// An empty store starts from the configured pet with default stats.
    pub fn build(config: &PetConfig, store: SnapshotStore, host: H) -> Self {
        let snapshot = store.read_existing().unwrap_or_else(|| PetSnapshot {
            pet_name: config.pet.name.clone(),
            variant: config.pet.variant,
            ..PetSnapshot::default()
        });
        log::info!(
            "pet engine booting: {} the {} (hunger={:.2} happiness={:.2} energy={:.2})",
            snapshot.pet_name,
            snapshot.variant,
            snapshot.hunger.value(),
            snapshot.happiness.value(),
            snapshot.energy.value()
        );
        Self::new(config, PetState::from_snapshot(&snapshot), store, host)
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn state(&self) -> &PetState {
        self.sim.state()
    }

    pub fn snapshot(&self) -> PetSnapshot {
        self.sim.snapshot()
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn scheduler(&self) -> &PeriodicScheduler {
        &self.scheduler
    }

    pub fn overlay(&self) -> &OverlaySession<H> {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlaySession<H> {
        &mut self.overlay
    }

    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ── Driving ────────────────────────────────────────────────

    /// Enqueue a command. It runs on the next `advance_to` or `apply`.
    pub fn submit(&mut self, command: PetCommand) -> PetResult<()> {
        if self.closed {
            return Err(PetError::EngineClosed);
        }
        log::debug!("t={} queued command {}", self.clock.now(), command.name());
        self.queue.push_back(QueuedMessage {
            queued_at: self.clock.now(),
            message:   PetMessage::Command(command),
        });
        Ok(())
    }

    /// Submit a command and process it (and anything queued before it) now.
    pub fn apply(&mut self, command: PetCommand) -> PetResult<Vec<PetEvent>> {
        self.submit(command)?;
        let mut events = Vec::new();
        self.drain_queue(&mut events);
        self.drain_overlay(&mut events);
        Ok(events)
    }

    /// Run the simulation forward to `target`, firing every due timer in order.
    pub fn advance_to(&mut self, target: Millis) -> Vec<PetEvent> {
        let mut events = Vec::new();
        if self.closed {
            return events;
        }
        self.drain_queue(&mut events);

        let dropped = self.scheduler.limit_backlog(target, MAX_TIMER_BACKLOG)
            + self.overlay.limit_backlog(target, MAX_TIMER_BACKLOG);
        if dropped > 0 {
            log::warn!(
                "advance to t={target} skipped {dropped} timer fires (backlog limit {MAX_TIMER_BACKLOG})"
            );
        }

        while let Some((at, slot)) = self.next_timer(target) {
            self.clock.advance_to(at);
            let fired = match slot {
                TimerSlot::Overlay => self.overlay.take_fire(at),
                _ => self.scheduler.fire(slot, at).is_some(),
            };
            if !fired {
                break;
            }
            self.queue.push_back(QueuedMessage {
                queued_at: at,
                message:   PetMessage::Timer(slot),
            });
            self.drain_queue(&mut events);
        }

        self.clock.advance_to(target);
        self.drain_overlay(&mut events);
        events
    }

    pub fn advance_by(&mut self, delta: Millis) -> Vec<PetEvent> {
        let target = self.clock.now().saturating_add(delta);
        self.advance_to(target)
    }

    /// Stop timers, end the overlay and write a final snapshot. Idempotent.
    pub fn shutdown(&mut self) -> Vec<PetEvent> {
        let mut events = Vec::new();
        if self.closed {
            return events;
        }
        self.drain_queue(&mut events);
        self.closed = true;
        self.scheduler.stop_all();

        let at = self.clock.now();
        if self.overlay.end().is_some() {
            events.push(PetEvent::OverlayEnded { at });
        }
        self.sim.take_dirty();
        if self.store.write(&self.sim.snapshot()) {
            events.push(PetEvent::SnapshotWritten { at });
        }
        log::info!("pet engine shut down at t={at}");
        events
    }

    // ── Internals ──────────────────────────────────────────────

    fn next_timer(&self, until: Millis) -> Option<(Millis, TimerSlot)> {
        let sim_timer = self.scheduler.peek_due(until);
        let overlay_timer = self
            .overlay
            .next_due()
            .filter(|due| *due <= until)
            .map(|due| (due, TimerSlot::Overlay));
        match (sim_timer, overlay_timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn drain_queue(&mut self, events: &mut Vec<PetEvent>) {
        while let Some(queued) = self.queue.pop_front() {
            self.process(queued.message, events);
        }
    }

    fn process(&mut self, message: PetMessage, events: &mut Vec<PetEvent>) {
        let at = self.clock.now();
        match message {
            PetMessage::Command(command) => self.process_command(command, at, events),
            PetMessage::Timer(TimerSlot::Animation) => {
                if self.sim.tick_animation() {
                    events.push(PetEvent::FrameAdvanced {
                        at,
                        frame: self.sim.state().frame_index,
                    });
                }
            }
            PetMessage::Timer(TimerSlot::Decay) => {
                self.sim.tick_decay();
                let s = self.sim.state();
                log::debug!(
                    "t={at} decay: hunger={:.2} happiness={:.2} energy={:.2}",
                    s.hunger.value(),
                    s.happiness.value(),
                    s.energy.value()
                );
                events.push(PetEvent::DecayApplied {
                    at,
                    hunger:    s.hunger.value(),
                    happiness: s.happiness.value(),
                    energy:    s.energy.value(),
                });
            }
            PetMessage::Timer(TimerSlot::Overlay) => {
                self.overlay.tick();
            }
        }
        self.flush(at, events);
    }

    fn process_command(&mut self, command: PetCommand, at: Millis, events: &mut Vec<PetEvent>) {
        match command {
            PetCommand::Feed | PetCommand::Pet | PetCommand::Sleep => {
                match command {
                    PetCommand::Feed => self.sim.feed(),
                    PetCommand::Pet => self.sim.pet(),
                    _ => self.sim.sleep(),
                }
                let s = self.sim.state();
                events.push(PetEvent::ActionApplied {
                    at,
                    action:    command.name().to_string(),
                    hunger:    s.hunger.value(),
                    happiness: s.happiness.value(),
                    energy:    s.energy.value(),
                });
            }
            PetCommand::ChangeVariant { variant } => {
                let from = self.sim.state().variant;
                self.sim.change_variant(variant);
                events.push(PetEvent::VariantChanged { at, from, to: variant });
            }
            PetCommand::SetAnimating { animating } => {
                self.sim.set_animating(animating);
                events.push(PetEvent::AnimationToggled { at, animating });
            }
            PetCommand::StartOverlay => {
                let s = self.sim.state();
                let previous = self.overlay.session_id();
                let result = self.overlay.start(at, s.variant, s.hunger, s.happiness, s.energy);
                // A live session is ended before the new request, even if that request fails.
                if previous.is_some() && self.overlay.session_id() != previous {
                    events.push(PetEvent::OverlayEnded { at });
                }
                match result {
                    Ok(started) => events.push(PetEvent::OverlayStarted {
                        at,
                        session_id: started.session_id,
                    }),
                    Err(e) => events.push(PetEvent::OverlayUnavailable {
                        at,
                        reason: e.to_string(),
                    }),
                }
            }
            PetCommand::EndOverlay => {
                if self.overlay.end().is_some() {
                    events.push(PetEvent::OverlayEnded { at });
                }
            }
        }
    }

    /// Write-through: persist and mirror to the overlay if anything changed.
    fn flush(&mut self, at: Millis, events: &mut Vec<PetEvent>) {
        let Some(snapshot) = self.sim.take_dirty() else {
            return;
        };
        self.overlay.update(
            snapshot.variant,
            snapshot.hunger,
            snapshot.happiness,
            snapshot.energy,
        );
        if self.store.write(&snapshot) {
            events.push(PetEvent::SnapshotWritten { at });
        }
    }

    fn drain_overlay(&mut self, events: &mut Vec<PetEvent>) {
        let at = self.clock.now();
        match self.overlay.drain() {
            Some(Ok(content)) => events.push(PetEvent::OverlayPushed {
                at,
                frame: content.frame,
            }),
            Some(Err(e)) => events.push(PetEvent::OverlayPushFailed {
                at,
                reason: e.to_string(),
            }),
            None => {}
        }
    }
}

impl<H: OverlayHost> Drop for PetEngine<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
