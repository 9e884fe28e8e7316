//! # Unit Types
//!
//! Lightweight newtype wrappers for the units that appear in foundation
//! calculations. Calculation structs keep plain `f64` fields with unit
//! suffixes (`_ft`, `_psf`, `_lb`) so their JSON stays flat; these wrappers
//! are used at conversion boundaries such as reporting in kips.
//!
//! ## US Customary Units
//!
//! - Length: feet (ft)
//! - Force: pounds (lb), kips (k = 1000 lb)
//! - Stress: pounds per square foot (psf)
//! - Unit weight: pounds per cubic foot (pcf)
//! - Area: square feet (ft²)
//!
//! ## Example
//!
//! ```rust
//! use pile_core::units::{Kips, Pounds};
//!
//! let capacity: Kips = Pounds(33_000.0).into();
//! assert_eq!(capacity.0, 33.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in kips (1 kip = 1000 pounds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

impl From<Pounds> for Kips {
    fn from(lb: Pounds) -> Self {
        Kips(lb.0 / 1000.0)
    }
}

impl From<Kips> for Pounds {
    fn from(k: Kips) -> Self {
        Pounds(k.0 * 1000.0)
    }
}

/// Stress in pounds per square foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psf(pub f64);

/// Unit weight in pounds per cubic foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pcf(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Mul<Feet> for Pcf {
    type Output = Psf;
    /// Overburden contributed by a column of soil: γ × thickness
    fn mul(self, rhs: Feet) -> Psf {
        Psf(self.0 * rhs.0)
    }
}

impl Mul<SqFt> for Psf {
    type Output = Pounds;
    fn mul(self, rhs: SqFt) -> Pounds {
        Pounds(self.0 * rhs.0)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Pounds);
impl_arithmetic!(Kips);
impl_arithmetic!(Psf);
impl_arithmetic!(Pcf);
impl_arithmetic!(SqFt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kips() {
        let k: Kips = Pounds(1500.0).into();
        assert_eq!(k.0, 1.5);
        let lb: Pounds = Kips(2.0).into();
        assert_eq!(lb.0, 2000.0);
    }

    #[test]
    fn test_overburden_product() {
        // 120 pcf over 5 ft = 600 psf
        let stress = Pcf(120.0) * Feet(5.0);
        assert_eq!(stress, Psf(600.0));

        let force = Psf(600.0) * SqFt(2.0);
        assert_eq!(force, Pounds(1200.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Psf(600.0);
        let b = Psf(288.0);
        assert_eq!((a + b).value(), 888.0);
        assert_eq!((Feet(3.0) + Feet(0.5)).value(), 3.5);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Kips(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }
}
