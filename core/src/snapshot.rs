//! The cross-process snapshot: the flattened, persisted subset of pet state.
//!
//! A snapshot is derived from the simulation, never the reverse.
//! Timeline and overlay code read snapshots; they never write back.

use crate::{attribute::Attribute, variant::PetVariant};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PET_NAME: &str = "Pixel";
pub const DEFAULT_HUNGER: f64 = 0.7;
pub const DEFAULT_HAPPINESS: f64 = 0.8;
pub const DEFAULT_ENERGY: f64 = 0.6;

// Shared key/value keys. Both processes depend on these names.
pub const KEY_PET_NAME:  &str = "petName";
pub const KEY_HUNGER:    &str = "hunger";
pub const KEY_HAPPINESS: &str = "happiness";
pub const KEY_ENERGY:    &str = "energy";
pub const KEY_VARIANT:   &str = "variantId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSnapshot {
    pub pet_name:  String,
    pub variant:   PetVariant,
    pub hunger:    Attribute,
    pub happiness: Attribute,
    pub energy:    Attribute,
}

impl Default for PetSnapshot {
    fn default() -> Self {
        Self {
            pet_name:  DEFAULT_PET_NAME.to_string(),
            variant:   PetVariant::ALL[0],
            hunger:    Attribute::new(DEFAULT_HUNGER),
            happiness: Attribute::new(DEFAULT_HAPPINESS),
            energy:    Attribute::new(DEFAULT_ENERGY),
        }
    }
}
