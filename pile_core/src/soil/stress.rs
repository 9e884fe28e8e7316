//! # Effective Stress Profiles
//!
//! Vertical effective stress at sublayer bottoms and midpoints, and the
//! 20B limit applied before stresses are used in capacity formulas.
//!
//! A sublayer counts as fully submerged when the water table is above its
//! bottom (`groundwater_depth < bottom_depth`); there is no interpolation
//! within a sublayer. The midpoint uses the same test at the sublayer bottom.

use serde::{Deserialize, Serialize};

use crate::navfac::UNIT_WEIGHT_WATER_PCF;
use crate::units::{Feet, Pcf, Psf};

/// Multiple of the pile width below which effective stress stops increasing
pub const LIMITING_DEPTH_WIDTHS: f64 = 20.0;

/// Stress added by one sublayer, buoyant if it is below the water table.
fn sublayer_stress(
    unit_weight_pcf: f64,
    thickness_ft: f64,
    bottom_depth_ft: f64,
    groundwater_depth_ft: f64,
) -> Psf {
    let effective = if groundwater_depth_ft < bottom_depth_ft {
        Pcf(unit_weight_pcf - UNIT_WEIGHT_WATER_PCF)
    } else {
        Pcf(unit_weight_pcf)
    };
    effective * Feet(thickness_ft)
}

/// Cumulative effective stress (psf) at the bottom of each sublayer.
///
/// ```rust
/// use pile_core::soil::eff_stress_bottom_profile;
///
/// let dry = eff_stress_bottom_profile(&[120.0, 125.0, 125.0], 5.0, 100.0);
/// assert_eq!(dry, vec![600.0, 1225.0, 1850.0]);
/// ```
pub fn eff_stress_bottom_profile(
    unit_weights_pcf: &[f64],
    increment_ft: f64,
    groundwater_depth_ft: f64,
) -> Vec<f64> {
    let mut total = Psf(0.0);
    unit_weights_pcf
        .iter()
        .enumerate()
        .map(|(i, &gamma)| {
            let bottom_ft = (i + 1) as f64 * increment_ft;
            total = total + sublayer_stress(gamma, increment_ft, bottom_ft, groundwater_depth_ft);
            total.value()
        })
        .collect()
}

/// Effective stress (psf) at the midpoint of each sublayer.
///
/// `eff_stress_bottom` must come from [`eff_stress_bottom_profile`] with the
/// same inputs.
pub fn eff_stress_midpoint_profile(
    unit_weights_pcf: &[f64],
    increment_ft: f64,
    groundwater_depth_ft: f64,
    eff_stress_bottom: &[f64],
) -> Vec<f64> {
    unit_weights_pcf
        .iter()
        .enumerate()
        .map(|(i, &gamma)| {
            let bottom_ft = (i + 1) as f64 * increment_ft;
            let above = if i == 0 { 0.0 } else { eff_stress_bottom[i - 1] };
            let half = sublayer_stress(gamma, increment_ft / 2.0, bottom_ft, groundwater_depth_ft);
            above + half.value()
        })
        .collect()
}

/// A stress profile after applying the 20B rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitedEffStress {
    /// Stress per sublayer (psf), frozen below the limiting depth
    pub values: Vec<f64>,
    /// Whether the profile extends below the limiting depth
    pub is_limited: bool,
    /// 20 × pile width (ft)
    pub limiting_depth_ft: f64,
}

/// Freeze effective stress below a depth of 20 pile widths.
///
/// Sublayers whose bottom is deeper than `20 × width` take the value of the
/// last sublayer above that depth (0 when even the first sublayer is deeper).
///
/// ```rust
/// use pile_core::soil::limit_eff_stress;
///
/// let limited = limit_eff_stress(&[100.0, 200.0, 300.0, 400.0, 500.0], 1.0, 5.0);
/// assert_eq!(limited.values, vec![100.0, 200.0, 300.0, 400.0, 400.0]);
/// assert!(limited.is_limited);
/// ```
pub fn limit_eff_stress(eff_stress: &[f64], width_ft: f64, increment_ft: f64) -> LimitedEffStress {
    let limiting_depth_ft = width_ft * LIMITING_DEPTH_WIDTHS;
    let tolerance = 1e-9 * limiting_depth_ft.abs().max(1.0);

    let mut values = Vec::with_capacity(eff_stress.len());
    let mut frozen = 0.0;
    for (i, &stress) in eff_stress.iter().enumerate() {
        let bottom_ft = (i + 1) as f64 * increment_ft;
        if bottom_ft > limiting_depth_ft + tolerance {
            values.push(frozen);
        } else {
            frozen = stress;
            values.push(stress);
        }
    }

    let total_depth_ft = eff_stress.len() as f64 * increment_ft;
    LimitedEffStress {
        values,
        is_limited: total_depth_ft > limiting_depth_ft + tolerance,
        limiting_depth_ft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_profile_eq(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(*a, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dry_profile() {
        let bottom = eff_stress_bottom_profile(&[120.0, 125.0, 125.0], 5.0, 100.0);
        assert_profile_eq(&bottom, &[600.0, 1225.0, 1850.0]);
    }

    #[test]
    fn test_wet_profile() {
        let bottom = eff_stress_bottom_profile(&[120.0, 125.0, 125.0], 5.0, 0.0);
        assert_profile_eq(&bottom, &[288.0, 601.0, 914.0]);
    }

    #[test]
    fn test_water_table_between_sublayers() {
        // Water at 5 ft: first sublayer (bottom 5) stays dry
        let bottom = eff_stress_bottom_profile(&[120.0, 125.0, 125.0], 5.0, 5.0);
        assert_profile_eq(&bottom, &[600.0, 913.0, 1226.0]);
    }

    #[test]
    fn test_midpoint_profile() {
        let weights = [120.0, 125.0, 125.0];
        let bottom = eff_stress_bottom_profile(&weights, 5.0, 5.0);
        let mid = eff_stress_midpoint_profile(&weights, 5.0, 5.0, &bottom);
        // 120 × 2.5; 600 + 62.6 × 2.5; 913 + 62.6 × 2.5
        assert_profile_eq(&mid, &[300.0, 756.5, 1069.5]);
    }

    #[test]
    fn test_midpoint_uses_bottom_depth_for_water() {
        // Water at 4 ft lies above the bottom of the first 5 ft sublayer, so
        // the whole sublayer (midpoint included) is buoyant.
        let weights = [120.0];
        let bottom = eff_stress_bottom_profile(&weights, 5.0, 4.0);
        let mid = eff_stress_midpoint_profile(&weights, 5.0, 4.0, &bottom);
        assert_profile_eq(&mid, &[144.0]);
    }

    #[test]
    fn test_bottom_profile_is_monotonic() {
        let weights = [110.0, 62.4, 130.0, 98.0, 140.0, 140.0];
        for gw in [0.0, 1.0, 2.5, 100.0] {
            let bottom = eff_stress_bottom_profile(&weights, 0.5, gw);
            assert!(bottom.windows(2).all(|w| w[1] >= w[0]));
        }
    }

    #[test]
    fn test_limit_applied() {
        let limited = limit_eff_stress(&[100.0, 200.0, 300.0, 400.0, 500.0], 1.0, 5.0);
        assert_eq!(limited.values, vec![100.0, 200.0, 300.0, 400.0, 400.0]);
        assert!(limited.is_limited);
        assert_eq!(limited.limiting_depth_ft, 20.0);
    }

    #[test]
    fn test_limit_not_reached() {
        let stresses = [100.0, 200.0, 300.0, 400.0, 500.0];
        let limited = limit_eff_stress(&stresses, 3.0, 5.0);
        assert_eq!(limited.values, stresses.to_vec());
        assert!(!limited.is_limited);
    }

    #[test]
    fn test_limit_between_sublayers() {
        // Limiting depth 12 ft: sublayers ending at 15 and 20 ft freeze at the 10 ft value
        let limited = limit_eff_stress(&[100.0, 200.0, 300.0, 400.0], 0.6, 5.0);
        assert_eq!(limited.values, vec![100.0, 200.0, 200.0, 200.0]);
        assert!(limited.is_limited);
    }

    #[test]
    fn test_limit_shallower_than_first_sublayer() {
        let limited = limit_eff_stress(&[100.0, 200.0], 0.1, 5.0);
        assert_eq!(limited.values, vec![0.0, 0.0]);
        assert!(limited.is_limited);
    }
}
