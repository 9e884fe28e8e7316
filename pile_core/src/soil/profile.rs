//! # Detailed Soil Profile
//!
//! Subdivides every coarse layer into sublayers of a fixed thickness and
//! integrates effective vertical stress down the profile.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::soil::{build, GeneralSoilProfile, SoilLayer};
//!
//! let general = GeneralSoilProfile::new(
//!     vec![
//!         SoilLayer::granular(3.0, "Loose Sand", 120.0, 28),
//!         SoilLayer::cohesive(6.0, "Stiff Clay", 120.0, 1500.0),
//!     ],
//!     4.0,
//! );
//! let detailed = build(&general, 0.5).unwrap();
//! assert_eq!(detailed.len(), 12);
//! assert_eq!(detailed.sublayers[6].name, "Stiff Clay");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::stress::{eff_stress_bottom_profile, eff_stress_midpoint_profile};
use super::{increment_steps, GeneralSoilProfile};
use crate::errors::CalcResult;

/// One fixed-thickness slice of a coarse layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sublayer {
    pub bottom_depth_ft: f64,
    pub name: String,
    pub unit_weight_pcf: f64,
    /// 0 for cohesive soil
    pub friction_angle_deg: u32,
    /// 0 for granular soil
    pub cohesion_psf: f64,
    /// Effective vertical stress at the sublayer bottom (psf)
    pub eff_stress_bottom_psf: f64,
    /// Effective vertical stress at the sublayer midpoint (psf)
    pub eff_stress_mid_psf: f64,
}

/// Fine-grained soil profile, built once per analysis and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedSoilProfile {
    pub increment_ft: f64,
    pub groundwater_depth_ft: f64,
    /// Sublayers top to bottom; sublayer `i` ends at `(i + 1) × increment_ft`
    pub sublayers: Vec<Sublayer>,
}

impl DetailedSoilProfile {
    /// Number of sublayers
    pub fn len(&self) -> usize {
        self.sublayers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sublayers.is_empty()
    }

    /// Depth of the deepest sublayer bottom (ft)
    pub fn total_depth_ft(&self) -> f64 {
        self.sublayers.len() as f64 * self.increment_ft
    }

    /// Index of the sublayer whose bottom is exactly at `depth_ft`.
    pub fn index_of_depth(&self, depth_ft: f64) -> Option<usize> {
        match increment_steps(depth_ft, self.increment_ft) {
            Some(steps) if steps >= 1 && steps <= self.sublayers.len() => Some(steps - 1),
            _ => None,
        }
    }

    pub fn bottom_depths(&self) -> Vec<f64> {
        self.sublayers.iter().map(|s| s.bottom_depth_ft).collect()
    }

    pub fn eff_stress_bottom(&self) -> Vec<f64> {
        self.sublayers.iter().map(|s| s.eff_stress_bottom_psf).collect()
    }

    pub fn eff_stress_mid(&self) -> Vec<f64> {
        self.sublayers.iter().map(|s| s.eff_stress_mid_psf).collect()
    }
}

/// Build the sublayer profile from a coarse profile.
///
/// Every layer bottom (and the water table, when inside the profile) must be
/// a multiple of `increment_ft`; otherwise `InvalidProfile` is returned.
pub fn build(profile: &GeneralSoilProfile, increment_ft: f64) -> CalcResult<DetailedSoilProfile> {
    profile.validate(increment_ft)?;

    let mut sublayers = Vec::new();
    for layer in &profile.layers {
        // Validated above, so the layer bottom is on the grid
        let steps = increment_steps(layer.bottom_depth_ft, increment_ft).unwrap_or(0);
        while sublayers.len() < steps {
            sublayers.push(Sublayer {
                bottom_depth_ft: (sublayers.len() + 1) as f64 * increment_ft,
                name: layer.name.clone(),
                unit_weight_pcf: layer.unit_weight_pcf,
                friction_angle_deg: layer.strength.friction_angle_deg(),
                cohesion_psf: layer.strength.cohesion_psf(),
                eff_stress_bottom_psf: 0.0,
                eff_stress_mid_psf: 0.0,
            });
        }
    }

    let unit_weights: Vec<f64> = sublayers.iter().map(|s| s.unit_weight_pcf).collect();
    let groundwater_ft = profile.groundwater_depth_ft;
    let bottom = eff_stress_bottom_profile(&unit_weights, increment_ft, groundwater_ft);
    let mid = eff_stress_midpoint_profile(&unit_weights, increment_ft, groundwater_ft, &bottom);
    for ((sublayer, b), m) in sublayers.iter_mut().zip(bottom).zip(mid) {
        sublayer.eff_stress_bottom_psf = b;
        sublayer.eff_stress_mid_psf = m;
    }

    debug!(
        layers = profile.layers.len(),
        sublayers = sublayers.len(),
        increment_ft,
        "Built detailed soil profile"
    );

    Ok(DetailedSoilProfile {
        increment_ft,
        groundwater_depth_ft: profile.groundwater_depth_ft,
        sublayers,
    })
}
