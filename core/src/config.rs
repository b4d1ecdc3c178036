//! Tunable constants for the simulation, timers, timeline and shared store.
//!
//! Every section has a `Default` matching the reference behaviour, and
//! every section may be omitted from a config file.

use crate::{
    snapshot::DEFAULT_PET_NAME,
    store::DEFAULT_SUITE,
    types::Millis,
    variant::PetVariant,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PetProfileConfig {
    pub name:    String,
    pub variant: PetVariant,
}

impl Default for PetProfileConfig {
    fn default() -> Self {
        Self {
            name:    DEFAULT_PET_NAME.to_string(),
            variant: PetVariant::ALL[0],
        }
    }
}

/// Signed deltas applied by one user action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    pub hunger:    f64,
    pub happiness: f64,
    pub energy:    f64,
}

impl StatDelta {
    pub const fn new(hunger: f64, happiness: f64, energy: f64) -> Self {
        Self { hunger, happiness, energy }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub feed:  StatDelta,
    pub pet:   StatDelta,
    pub sleep: StatDelta,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            feed:  StatDelta::new(0.3, 0.1, 0.0),
            pet:   StatDelta::new(0.0, 0.3, -0.1),
            sleep: StatDelta::new(-0.1, 0.0, 0.4),
        }
    }
}

/// Amounts removed from each stat per decay tick (positive numbers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub hunger:    f64,
    pub happiness: f64,
    pub energy:    f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            hunger:    0.05,
            happiness: 0.03,
            energy:    0.02,
        }
    }
}

impl DecayConfig {
    pub fn as_delta(&self) -> StatDelta {
        StatDelta::new(-self.hunger.abs(), -self.happiness.abs(), -self.energy.abs())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub animation_interval_ms: Millis,
    pub decay_interval_ms:     Millis,
    pub overlay_interval_ms:   Millis,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            animation_interval_ms: 300,
            decay_interval_ms:     30_000,
            overlay_interval_ms:   500,
        }
    }
}

/// Upper bound on entries in one timeline.
pub const MAX_TIMELINE_ENTRIES: usize = 1_000;
/// Upper bound on the gap between timeline entries (one day).
pub const MAX_TIMELINE_SPACING_MS: Millis = 86_400_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub entry_count: usize,
    pub spacing_ms:  Millis,
    /// Length of the approximate frame cycle used by surfaces without a live clock.
    pub frame_cycle: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            entry_count: 20,
            spacing_ms:  1_000,
            frame_cycle: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub frame_cycle: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { frame_cycle: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub suite:   String,
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            suite:   DEFAULT_SUITE.to_string(),
            db_path: "pixelpet-shared.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    pub pet:      PetProfileConfig,
    pub actions:  ActionConfig,
    pub decay:    DecayConfig,
    pub timers:   TimerConfig,
    pub timeline: TimelineConfig,
    pub overlay:  OverlayConfig,
    pub store:    StoreConfig,
}

impl PetConfig {
    /// Load from a JSON file. Missing sections keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PetConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall the scheduler or empty a timeline.
    pub fn validate(&self) -> anyhow::Result<()> {
        let t = &self.timers;
        if t.animation_interval_ms == 0 || t.decay_interval_ms == 0 || t.overlay_interval_ms == 0 {
            anyhow::bail!("timer intervals must be greater than zero");
        }
        let tl = &self.timeline;
        if tl.spacing_ms == 0 || tl.spacing_ms > MAX_TIMELINE_SPACING_MS {
            anyhow::bail!("timeline.spacing_ms must be in 1..={MAX_TIMELINE_SPACING_MS}");
        }
        if tl.entry_count == 0 || tl.entry_count > MAX_TIMELINE_ENTRIES {
            anyhow::bail!("timeline.entry_count must be in 1..={MAX_TIMELINE_ENTRIES}");
        }
        if self.timeline.frame_cycle == 0 || self.overlay.frame_cycle == 0 {
            anyhow::bail!("frame cycles must be greater than zero");
        }
        Ok(())
    }

    /// Config with hardcoded defaults for use in tests.
    /// Uses a dedicated suite so tests never touch the app's namespace.
    pub fn default_test() -> Self {
        Self {
            store: StoreConfig {
                suite:   "test.pixelpet.shared".to_string(),
                db_path: ":memory:".to_string(),
            },
            ..Self::default()
        }
    }
}
