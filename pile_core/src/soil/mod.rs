//! # Soil Profiles
//!
//! Coarse, user-entered soil layers ([`GeneralSoilProfile`]) and the
//! fine-grained sublayer profile derived from them ([`DetailedSoilProfile`]).
//!
//! ## Layer JSON
//!
//! ```json
//! { "bottom_depth_ft": 3.0, "name": "Loose Sand", "unit_weight_pcf": 120.0,
//!   "strength": { "type": "Granular", "friction_angle_deg": 28 } }
//! ```
//!
//! A layer is either granular (friction angle, 26–40°) or cohesive
//! (cohesion in psf); never both.

pub mod profile;
pub mod stress;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::navfac::{NQ_MAX_PHI, NQ_MIN_PHI, UNIT_WEIGHT_WATER_PCF};

pub use profile::{build, DetailedSoilProfile, Sublayer};
pub use stress::{
    eff_stress_bottom_profile, eff_stress_midpoint_profile, limit_eff_stress, LimitedEffStress,
};

/// Relative tolerance for "is a multiple of the increment" checks
const ALIGNMENT_TOLERANCE: f64 = 1e-9;

/// Number of whole increments in `depth_ft`, if it is an exact multiple.
pub(crate) fn increment_steps(depth_ft: f64, increment_ft: f64) -> Option<usize> {
    if !depth_ft.is_finite() || depth_ft < 0.0 {
        return None;
    }
    let steps = depth_ft / increment_ft;
    let rounded = steps.round();
    if (steps - rounded).abs() <= ALIGNMENT_TOLERANCE * rounded.max(1.0) {
        Some(rounded as usize)
    } else {
        None
    }
}

/// Shear strength parameter of a layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SoilStrength {
    /// Sand / gravel: internal friction angle in whole degrees
    Granular { friction_angle_deg: u32 },
    /// Clay / silt: undrained cohesion in psf
    Cohesive { cohesion_psf: f64 },
}

impl SoilStrength {
    /// Friction angle, 0 for cohesive layers
    pub fn friction_angle_deg(&self) -> u32 {
        match *self {
            SoilStrength::Granular { friction_angle_deg } => friction_angle_deg,
            SoilStrength::Cohesive { .. } => 0,
        }
    }

    /// Cohesion, 0 for granular layers
    pub fn cohesion_psf(&self) -> f64 {
        match *self {
            SoilStrength::Granular { .. } => 0.0,
            SoilStrength::Cohesive { cohesion_psf } => cohesion_psf,
        }
    }
}

/// One coarse soil layer, ordered top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Depth of the layer's bottom below ground surface (ft)
    pub bottom_depth_ft: f64,
    /// Label, e.g. "Stiff Clay"
    pub name: String,
    /// Total unit weight (pcf)
    pub unit_weight_pcf: f64,
    pub strength: SoilStrength,
}

impl SoilLayer {
    pub fn granular(
        bottom_depth_ft: f64,
        name: impl Into<String>,
        unit_weight_pcf: f64,
        friction_angle_deg: u32,
    ) -> Self {
        SoilLayer {
            bottom_depth_ft,
            name: name.into(),
            unit_weight_pcf,
            strength: SoilStrength::Granular { friction_angle_deg },
        }
    }

    pub fn cohesive(
        bottom_depth_ft: f64,
        name: impl Into<String>,
        unit_weight_pcf: f64,
        cohesion_psf: f64,
    ) -> Self {
        SoilLayer {
            bottom_depth_ft,
            name: name.into(),
            unit_weight_pcf,
            strength: SoilStrength::Cohesive { cohesion_psf },
        }
    }
}

/// Coarse soil profile with a groundwater table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSoilProfile {
    pub layers: Vec<SoilLayer>,
    /// Depth to the water table (ft). Deeper than the profile means no water.
    pub groundwater_depth_ft: f64,
}

impl GeneralSoilProfile {
    pub fn new(layers: Vec<SoilLayer>, groundwater_depth_ft: f64) -> Self {
        GeneralSoilProfile {
            layers,
            groundwater_depth_ft,
        }
    }

    /// Depth of the deepest layer (ft)
    pub fn total_depth_ft(&self) -> f64 {
        self.layers.last().map(|l| l.bottom_depth_ft).unwrap_or(0.0)
    }

    /// Check that the profile can be discretized at `increment_ft`.
    pub fn validate(&self, increment_ft: f64) -> CalcResult<()> {
        if !increment_ft.is_finite() || increment_ft <= 0.0 {
            return Err(CalcError::invalid_profile(
                "increment_ft",
                increment_ft.to_string(),
                "Sublayer increment must be positive",
            ));
        }
        if self.layers.is_empty() {
            return Err(CalcError::invalid_profile(
                "layers",
                "[]",
                "At least one soil layer is required",
            ));
        }

        let mut top_ft = 0.0;
        for (i, layer) in self.layers.iter().enumerate() {
            let field = |name: &str| format!("layers[{}].{}", i, name);

            if !(layer.bottom_depth_ft > top_ft) {
                return Err(CalcError::invalid_profile(
                    field("bottom_depth_ft"),
                    layer.bottom_depth_ft.to_string(),
                    format!("Layer bottoms must increase with depth (previous: {} ft)", top_ft),
                ));
            }
            if increment_steps(layer.bottom_depth_ft, increment_ft).is_none() {
                return Err(CalcError::invalid_profile(
                    field("bottom_depth_ft"),
                    layer.bottom_depth_ft.to_string(),
                    format!("Not a multiple of the {} ft increment", increment_ft),
                ));
            }
            if !layer.unit_weight_pcf.is_finite() || layer.unit_weight_pcf <= 0.0 {
                return Err(CalcError::invalid_profile(
                    field("unit_weight_pcf"),
                    layer.unit_weight_pcf.to_string(),
                    "Unit weight must be positive",
                ));
            }
            // Submerged sublayers must not reduce effective stress
            let submerged = self.groundwater_depth_ft < layer.bottom_depth_ft;
            if submerged && layer.unit_weight_pcf < UNIT_WEIGHT_WATER_PCF {
                return Err(CalcError::invalid_profile(
                    field("unit_weight_pcf"),
                    layer.unit_weight_pcf.to_string(),
                    format!(
                        "Layer below the water table is lighter than water ({} pcf)",
                        UNIT_WEIGHT_WATER_PCF
                    ),
                ));
            }
            match layer.strength {
                SoilStrength::Granular { friction_angle_deg } => {
                    if !(NQ_MIN_PHI..=NQ_MAX_PHI).contains(&friction_angle_deg) {
                        return Err(CalcError::invalid_profile(
                            field("strength.friction_angle_deg"),
                            friction_angle_deg.to_string(),
                            format!("Friction angle must be {}-{} degrees", NQ_MIN_PHI, NQ_MAX_PHI),
                        ));
                    }
                }
                SoilStrength::Cohesive { cohesion_psf } => {
                    if !cohesion_psf.is_finite() || cohesion_psf < 0.0 {
                        return Err(CalcError::invalid_profile(
                            field("strength.cohesion_psf"),
                            cohesion_psf.to_string(),
                            "Cohesion cannot be negative",
                        ));
                    }
                }
            }
            top_ft = layer.bottom_depth_ft;
        }

        let gw = self.groundwater_depth_ft;
        if !gw.is_finite() || gw < 0.0 {
            return Err(CalcError::invalid_profile(
                "groundwater_depth_ft",
                gw.to_string(),
                "Groundwater depth cannot be negative",
            ));
        }
        // Below the profile the table never intersects a sublayer
        if gw < self.total_depth_ft() && increment_steps(gw, increment_ft).is_none() {
            return Err(CalcError::invalid_profile(
                "groundwater_depth_ft",
                gw.to_string(),
                format!("Not a multiple of the {} ft increment", increment_ft),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> GeneralSoilProfile {
        GeneralSoilProfile::new(
            vec![
                SoilLayer::granular(3.0, "LS", 120.0, 28),
                SoilLayer::cohesive(6.0, "StCl", 120.0, 1500.0),
                SoilLayer::cohesive(8.5, "SCl", 125.0, 300.0),
                SoilLayer::granular(20.0, "CS", 135.0, 36),
            ],
            9.5,
        )
    }

    #[test]
    fn test_increment_steps() {
        assert_eq!(increment_steps(8.5, 0.5), Some(17));
        assert_eq!(increment_steps(20.0, 1.0), Some(20));
        assert_eq!(increment_steps(0.0, 0.5), Some(0));
        assert_eq!(increment_steps(8.3, 0.5), None);
        assert_eq!(increment_steps(-1.0, 0.5), None);
        // Decimal increments that are not exact in binary
        assert_eq!(increment_steps(0.3, 0.1), Some(3));
    }

    #[test]
    fn test_strength_accessors() {
        let sand = SoilStrength::Granular { friction_angle_deg: 30 };
        let clay = SoilStrength::Cohesive { cohesion_psf: 800.0 };
        assert_eq!(sand.friction_angle_deg(), 30);
        assert_eq!(sand.cohesion_psf(), 0.0);
        assert_eq!(clay.friction_angle_deg(), 0);
        assert_eq!(clay.cohesion_psf(), 800.0);
    }

    #[test]
    fn test_layer_json() {
        let json = r#"{"bottom_depth_ft": 3.0, "name": "LS", "unit_weight_pcf": 120.0,
                       "strength": {"type": "Granular", "friction_angle_deg": 28}}"#;
        let layer: SoilLayer = serde_json::from_str(json).unwrap();
        assert_eq!(layer, SoilLayer::granular(3.0, "LS", 120.0, 28));
    }

    #[test]
    fn test_valid_profile() {
        assert!(sample_profile().validate(0.5).is_ok());
        assert_eq!(sample_profile().total_depth_ft(), 20.0);
    }

    #[test]
    fn test_misaligned_layer_rejected() {
        let err = sample_profile().validate(1.0).unwrap_err();
        match err {
            CalcError::InvalidProfile { field, .. } => {
                assert_eq!(field, "layers[2].bottom_depth_ft")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_misaligned_groundwater_rejected() {
        let mut profile = sample_profile();
        profile.groundwater_depth_ft = 9.7;
        assert!(matches!(profile.validate(0.5), Err(CalcError::InvalidProfile { .. })));

        // Below the profile any depth means "no water"
        profile.groundwater_depth_ft = 1000.3;
        assert!(profile.validate(0.5).is_ok());
    }

    #[test]
    fn test_non_increasing_layers_rejected() {
        let mut profile = sample_profile();
        profile.layers[2].bottom_depth_ft = 6.0;
        assert!(profile.validate(0.5).is_err());
    }

    #[test]
    fn test_friction_angle_range() {
        let mut profile = sample_profile();
        profile.layers[0].strength = SoilStrength::Granular { friction_angle_deg: 45 };
        assert!(profile.validate(0.5).is_err());
    }

    #[test]
    fn test_light_submerged_layer_rejected() {
        let mut profile = sample_profile();
        profile.layers[3].unit_weight_pcf = 60.0;
        assert!(profile.validate(0.5).is_err());

        // Above the water table a light layer is fine
        profile.groundwater_depth_ft = 50.0;
        assert!(profile.validate(0.5).is_ok());
    }

    #[test]
    fn test_bad_increment() {
        assert!(sample_profile().validate(0.0).is_err());
        assert!(GeneralSoilProfile::new(vec![], 5.0).validate(0.5).is_err());
    }
}
