//! The fixed catalogue of pet variants.
//!
//! Variants are immutable. Selecting one is a pure replacement of the
//! tag held by the simulation; variant data is never mutated.
//!
//! Persisted tags are decoded through `from_tag`, which always succeeds:
//! an unknown tag falls back to the first member (`Dog`).

use crate::sprites::{self, Frame, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PetVariant {
    #[default]
    Dog,
    Demon,
    Dragon,
    Slime,
    Ghost,
    Fairy,
}

impl PetVariant {
    /// Every variant in catalogue order. The first entry is the fallback.
    pub const ALL: &'static [PetVariant] = &[
        Self::Dog,
        Self::Demon,
        Self::Dragon,
        Self::Slime,
        Self::Ghost,
        Self::Fairy,
    ];

    /// Stable tag used in persisted data and overlay payloads.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Dog    => "dog",
            Self::Demon  => "demon",
            Self::Dragon => "dragon",
            Self::Slime  => "slime",
            Self::Ghost  => "ghost",
            Self::Fairy  => "fairy",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Dog    => "いぬ",
            Self::Demon  => "あくま",
            Self::Dragon => "ドラゴン",
            Self::Slime  => "スライム",
            Self::Ghost  => "ゴースト",
            Self::Fairy  => "ようせい",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Dog    => "🐕",
            Self::Demon  => "😈",
            Self::Dragon => "🐉",
            Self::Slime  => "🟢",
            Self::Ghost  => "👻",
            Self::Fairy  => "🧚",
        }
    }

    /// Strict decode. `None` for anything outside the catalogue.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.tag() == tag.trim())
    }

    /// Lenient decode used for persisted data: unknown tags become `Dog`.
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            log::warn!("unknown variant tag {tag:?}, falling back to {}", Self::default());
            Self::default()
        })
    }

    pub fn frames(self) -> &'static [Frame] {
        sprites::frames(self)
    }

    pub fn frame_count(self) -> u64 {
        self.frames().len() as u64
    }

    pub fn palette(self) -> &'static [(char, Rgb)] {
        sprites::palette(self)
    }
}

impl fmt::Display for PetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<String> for PetVariant {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<PetVariant> for String {
    fn from(variant: PetVariant) -> Self {
        variant.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_parse() {
        for &v in PetVariant::ALL {
            assert_eq!(PetVariant::parse(v.tag()), Some(v));
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_first_member() {
        assert_eq!(PetVariant::parse("unicorn"), None);
        assert_eq!(PetVariant::from_tag("unicorn"), PetVariant::ALL[0]);
        let v: PetVariant = serde_json::from_str("\"unicorn\"").unwrap();
        assert_eq!(v, PetVariant::Dog);
    }

    #[test]
    fn every_variant_has_frames() {
        for &v in PetVariant::ALL {
            assert!(v.frame_count() > 0, "{v} has no frames");
        }
    }
}
