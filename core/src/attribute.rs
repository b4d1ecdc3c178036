//! Bounded well-being attributes (hunger, happiness, energy).
//!
//! RULE: an attribute is always a finite number in [0.0, 1.0].
//! All arithmetic saturates; nothing here can fail. NaN collapses to 0.0.

use serde::{Deserialize, Serialize};

pub const ATTRIBUTE_MIN: f64 = 0.0;
pub const ATTRIBUTE_MAX: f64 = 1.0;

/// Clamp any real number into the attribute domain.
pub fn clamp(x: f64) -> f64 {
    if x.is_nan() || x <= ATTRIBUTE_MIN {
        ATTRIBUTE_MIN
    } else if x >= ATTRIBUTE_MAX {
        ATTRIBUTE_MAX
    } else {
        x
    }
}

/// Saturating add: `clamp(current + delta)`.
pub fn apply(current: f64, delta: f64) -> f64 {
    clamp(current + delta)
}

/// One bounded well-being scalar.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Attribute(f64);

impl Attribute {
    pub const EMPTY:   Attribute = Attribute(ATTRIBUTE_MIN);
    pub const NEUTRAL: Attribute = Attribute(0.5);
    pub const FULL:    Attribute = Attribute(ATTRIBUTE_MAX);

    pub fn new(value: f64) -> Self {
        Self(clamp(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Return a new attribute moved by `delta`, saturating at both ends.
    #[must_use]
    pub fn apply(self, delta: f64) -> Self {
        Self(apply(self.0, delta))
    }

    pub fn is_empty(self) -> bool {
        self.0 <= ATTRIBUTE_MIN
    }

    pub fn is_full(self) -> bool {
        self.0 >= ATTRIBUTE_MAX
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Attribute> for f64 {
    fn from(attr: Attribute) -> Self {
        attr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_out_of_domain_inputs() {
        assert_eq!(clamp(-3.0), 0.0);
        assert_eq!(clamp(7.5), 1.0);
        assert_eq!(clamp(f64::NAN), 0.0);
        assert_eq!(clamp(f64::INFINITY), 1.0);
        assert_eq!(clamp(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp(0.25), 0.25);
    }

    #[test]
    fn negative_zero_normalises_to_positive_zero() {
        let z = clamp(-0.0);
        assert!(z.is_sign_positive(), "clamp(-0.0) must not keep the sign bit");
    }

    #[test]
    fn apply_saturates_at_both_ends() {
        assert_eq!(Attribute::new(0.9).apply(0.3), Attribute::FULL);
        assert_eq!(Attribute::new(0.05).apply(-0.1), Attribute::EMPTY);
        assert!(Attribute::FULL.is_full());
        assert!(Attribute::EMPTY.is_empty());
    }

    #[test]
    fn deserialising_an_out_of_range_value_clamps_it() {
        let attr: Attribute = serde_json::from_str("1.7").unwrap();
        assert_eq!(attr, Attribute::FULL);
        assert_eq!(serde_json::to_string(&Attribute::NEUTRAL).unwrap(), "0.5");
    }
}
