//! # Single Pile Axial Capacity
//!
//! Computes skin friction, end bearing, self-weight and ultimate/allowable
//! capacity of one pile configuration in a detailed soil profile.
//!
//! ## Pipeline
//!
//! ```text
//! geometry ─► material profiles (δ, ca) ─► 20B-limited stresses
//!          ─► skin friction per sublayer ─► end bearing ─► capacities
//! ```
//!
//! ## Assumptions
//!
//! - Skin friction is counted for sublayers with `ignored < bottom ≤ tip`
//! - The sublayer directly below the tip governs end bearing
//! - End bearing is zero in tension; self-weight resists pullout only
//!
//! ## Example
//!
//! ```rust
//! use pile_core::calculations::pile_capacity::compute;
//! use pile_core::foundation::{FoundationConfiguration, Material, PileType, PileWidth};
//! use pile_core::soil::{build, GeneralSoilProfile, SoilLayer};
//!
//! let general = GeneralSoilProfile::new(
//!     vec![
//!         SoilLayer::cohesive(10.0, "Stiff Clay", 120.0, 1500.0),
//!         SoilLayer::granular(30.0, "Dense Sand", 130.0, 34),
//!     ],
//!     8.0,
//! );
//! let profile = build(&general, 1.0).unwrap();
//!
//! let config = FoundationConfiguration {
//!     material: Material::Concrete,
//!     pile_type: PileType::DrivenDisplacement,
//!     width: PileWidth::Diameter(1.5),
//!     bearing_depth_ft: 20.0,
//!     factor_of_safety: 3.0,
//!     is_compression: true,
//!     ignored_depth_ft: 0.0,
//! };
//!
//! let result = compute(&profile, &config).unwrap();
//! assert!(result.allowable_capacity_lb > 0.0);
//! assert!(result.ultimate_capacity_lb > result.allowable_capacity_lb);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{CalcError, CalcResult, DomainWarning};
use crate::foundation::{FoundationConfiguration, Material, PileShape};
use crate::navfac;
use crate::soil::{limit_eff_stress, DetailedSoilProfile, LimitedEffStress};

/// Which resistance mechanism governs at the pile tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BearingMode {
    Granular,
    Cohesive,
    /// Tension: no end bearing
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// End bearing resistance (lb) and its mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndBearing {
    pub value_lb: f64,
    pub mode: BearingMode,
}

/// Nq or Nc, whichever the soil below the tip calls for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingCapacityFactor {
    pub mode: BearingMode,
    pub value: f64,
}

/// Full breakdown of one pile capacity calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileCapacityResult {
    /// The configuration that produced this result
    #[serde(flatten)]
    pub config: FoundationConfiguration,

    // === Geometry ===
    pub shape: PileShape,
    pub pile_area_sqft: f64,
    pub pile_perimeter_ft: f64,

    // === Pile-soil interface ===
    /// Contact friction angle δ per sublayer (degrees)
    pub contact_friction_angles: Vec<f64>,
    /// Adhesion ca per sublayer (psf)
    pub adhesions: Vec<f64>,
    /// Kh for this pile type and load direction
    pub earth_pressure_coefficient: f64,

    // === Tip ===
    pub granular_nq: f64,
    pub cohesive_nc: f64,
    pub bearing_capacity_factor: BearingCapacityFactor,
    /// Cohesion of the sublayer just below the tip (psf)
    pub cohesion_at_bearing_psf: f64,
    /// Limited effective stress at the tip (psf)
    pub eff_stress_at_bearing_psf: f64,

    // === Stresses ===
    pub limited_bottom_stresses: LimitedEffStress,
    pub limited_mid_stresses: LimitedEffStress,

    // === Resistance ===
    /// Skin friction per sublayer (lb)
    pub skin_frictions: Vec<f64>,
    pub total_skin_friction_lb: f64,
    pub end_bearing: EndBearing,
    pub pile_weight_lb: f64,
    pub ultimate_capacity_lb: f64,
    pub allowable_capacity_lb: f64,

    /// Non-fatal conditions (e.g. 20B limiting)
    #[serde(default)]
    pub warnings: Vec<DomainWarning>,
}

impl PileCapacityResult {
    pub fn is_compression(&self) -> bool {
        self.config.is_compression
    }
}

/// Sublayer indices at and directly below the bearing depth.
pub fn bearing_indices(
    profile: &DetailedSoilProfile,
    bearing_depth_ft: f64,
) -> CalcResult<(usize, usize)> {
    let at = profile.index_of_depth(bearing_depth_ft).ok_or_else(|| {
        CalcError::invalid_configuration(
            "bearing_depth_ft",
            bearing_depth_ft.to_string(),
            format!("Not a sublayer boundary of the {} ft grid", profile.increment_ft),
        )
    })?;
    if at + 1 >= profile.len() {
        return Err(CalcError::invalid_configuration(
            "bearing_depth_ft",
            bearing_depth_ft.to_string(),
            format!(
                "Bearing depth must be shallower than the bottom of the profile ({} ft)",
                profile.total_depth_ft()
            ),
        ));
    }
    Ok((at, at + 1))
}

/// Check a configuration against a profile without computing anything.
pub fn validate(profile: &DetailedSoilProfile, config: &FoundationConfiguration) -> CalcResult<()> {
    config.validate()?;
    bearing_indices(profile, config.bearing_depth_ft)?;
    Ok(())
}

pub fn contact_friction_angle_profile(
    profile: &DetailedSoilProfile,
    material: Material,
) -> Vec<f64> {
    profile
        .sublayers
        .iter()
        .map(|s| navfac::contact_friction_angle(s.friction_angle_deg as f64, material))
        .collect()
}

pub fn adhesion_profile(profile: &DetailedSoilProfile, material: Material) -> Vec<f64> {
    profile
        .sublayers
        .iter()
        .map(|s| navfac::adhesion(s.cohesion_psf, material))
        .collect()
}

/// Skin friction (lb) of every sublayer; zero outside `(ignored, bearing]`.
#[allow(clippy::too_many_arguments)]
pub fn skin_friction_profile(
    profile: &DetailedSoilProfile,
    kh: f64,
    limited_mid_stresses: &[f64],
    contact_friction_angles: &[f64],
    adhesions: &[f64],
    perimeter_ft: f64,
    ignored_depth_ft: f64,
    bearing_depth_ft: f64,
) -> Vec<f64> {
    let increment = profile.increment_ft;
    let tolerance = 1e-9 * increment;
    profile
        .sublayers
        .iter()
        .enumerate()
        .map(|(i, sub)| {
            let depth = sub.bottom_depth_ft;
            if depth <= ignored_depth_ft + tolerance || depth > bearing_depth_ft + tolerance {
                0.0
            } else if sub.friction_angle_deg != 0 {
                navfac::granular_skin_friction(
                    kh,
                    limited_mid_stresses[i],
                    contact_friction_angles[i],
                    perimeter_ft,
                    increment,
                )
            } else {
                navfac::cohesive_skin_friction(adhesions[i], perimeter_ft, increment)
            }
        })
        .collect()
}

/// End bearing at the tip. Cohesive when the soil below has cohesion.
pub fn end_bearing_at_tip(
    cohesion_below_psf: f64,
    nc: f64,
    eff_stress_at_bearing_psf: f64,
    nq: f64,
    area_sqft: f64,
    is_compression: bool,
) -> EndBearing {
    if !is_compression {
        return EndBearing {
            value_lb: 0.0,
            mode: BearingMode::NotApplicable,
        };
    }
    if cohesion_below_psf != 0.0 {
        EndBearing {
            value_lb: navfac::cohesive_end_bearing(cohesion_below_psf, area_sqft, nc),
            mode: BearingMode::Cohesive,
        }
    } else {
        EndBearing {
            value_lb: navfac::granular_end_bearing(eff_stress_at_bearing_psf, nq, area_sqft),
            mode: BearingMode::Granular,
        }
    }
}

/// Compute the axial capacity of one pile configuration.
///
/// # Errors
///
/// `InvalidConfiguration` when the width does not fit the pile shape, the
/// bearing depth is off the sublayer grid or has no soil below it, or the
/// factor of safety is not positive.
pub fn compute(
    profile: &DetailedSoilProfile,
    config: &FoundationConfiguration,
) -> CalcResult<PileCapacityResult> {
    config.validate()?;
    let (at, below) = bearing_indices(profile, config.bearing_depth_ft)?;

    // Geometry
    let shape = config.shape();
    let pile_area_sqft = config.width.area_sqft(shape)?;
    let pile_perimeter_ft = config.width.perimeter_ft(shape)?;
    let width_ft = config.width.primary_ft();

    // Pile-soil interface
    let contact_friction_angles = contact_friction_angle_profile(profile, config.material);
    let adhesions = adhesion_profile(profile, config.material);
    let kh = navfac::horizontal_earth_pressure_coefficient(config.pile_type, config.is_compression);

    // Tip factors from the soil just below the bearing elevation
    let tip = &profile.sublayers[below];
    let granular_nq = navfac::granular_nq(config.pile_type.is_drilled(), tip.friction_angle_deg)?;
    let cohesive_nc = navfac::cohesive_nc(config.bearing_depth_ft, width_ft);
    let cohesion_at_bearing_psf = tip.cohesion_psf;
    let bearing_capacity_factor = if cohesion_at_bearing_psf != 0.0 {
        BearingCapacityFactor {
            mode: BearingMode::Cohesive,
            value: cohesive_nc,
        }
    } else {
        BearingCapacityFactor {
            mode: BearingMode::Granular,
            value: granular_nq,
        }
    };

    // 20B rule
    let increment_ft = profile.increment_ft;
    let limited_bottom_stresses =
        limit_eff_stress(&profile.eff_stress_bottom(), width_ft, increment_ft);
    let limited_mid_stresses = limit_eff_stress(&profile.eff_stress_mid(), width_ft, increment_ft);
    let eff_stress_at_bearing_psf = limited_bottom_stresses.values[at];

    let mut warnings = Vec::new();
    if limited_bottom_stresses.is_limited {
        debug!(
            width = %config.width,
            limiting_depth_ft = limited_bottom_stresses.limiting_depth_ft,
            "Effective stress limited by the 20B rule"
        );
        warnings.push(DomainWarning::EffectiveStressLimited {
            limiting_depth_ft: limited_bottom_stresses.limiting_depth_ft,
        });
    }

    // Resistance
    let skin_frictions = skin_friction_profile(
        profile,
        kh,
        &limited_mid_stresses.values,
        &contact_friction_angles,
        &adhesions,
        pile_perimeter_ft,
        config.ignored_depth_ft,
        config.bearing_depth_ft,
    );
    let total_skin_friction_lb: f64 = skin_frictions.iter().sum();
    let end_bearing = end_bearing_at_tip(
        cohesion_at_bearing_psf,
        cohesive_nc,
        eff_stress_at_bearing_psf,
        granular_nq,
        pile_area_sqft,
        config.is_compression,
    );
    let pile_weight_lb =
        navfac::pile_weight(config.material, config.bearing_depth_ft, pile_area_sqft);

    let ultimate_capacity_lb = navfac::ultimate_load_capacity(
        total_skin_friction_lb,
        end_bearing.value_lb,
        pile_weight_lb,
        config.is_compression,
    );
    let allowable_capacity_lb = navfac::allowable_load_capacity(
        total_skin_friction_lb,
        end_bearing.value_lb,
        pile_weight_lb,
        config.is_compression,
        config.factor_of_safety,
    );

    trace!(
        width = %config.width,
        bearing_depth_ft = config.bearing_depth_ft,
        is_compression = config.is_compression,
        ultimate_capacity_lb,
        allowable_capacity_lb,
        "Computed pile capacity"
    );

    Ok(PileCapacityResult {
        config: config.clone(),
        shape,
        pile_area_sqft,
        pile_perimeter_ft,
        contact_friction_angles,
        adhesions,
        earth_pressure_coefficient: kh,
        granular_nq,
        cohesive_nc,
        bearing_capacity_factor,
        cohesion_at_bearing_psf,
        eff_stress_at_bearing_psf,
        limited_bottom_stresses,
        limited_mid_stresses,
        skin_frictions,
        total_skin_friction_lb,
        end_bearing,
        pile_weight_lb,
        ultimate_capacity_lb,
        allowable_capacity_lb,
        warnings,
    })
}
