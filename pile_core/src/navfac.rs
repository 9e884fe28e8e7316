//! # NAVFAC DM-7.02 Design Tables
//!
//! Lookup tables and closed-form factors for the axial capacity of deep
//! foundations per NAVFAC DM-7.02, Chapter 5 (pile foundations).
//!
//! ## Overview
//!
//! ```text
//! Skin friction (granular)  Qs = Kh × σ'v,mid × tan(δ) × P × Δ
//! Skin friction (cohesive)  Qs = ca × P × Δ
//! End bearing (granular)    Qb = σ'v,tip × Nq × A
//! End bearing (cohesive)    Qb = c × Nc × A
//! Ultimate capacity         Qu = ΣQs + Qb (+ W in tension)
//! Allowable capacity        Qa = (ΣQs + Qb) / FS (+ W in tension)
//! ```
//!
//! All tables are module-level constants; nothing here is mutable.

use crate::errors::{CalcError, CalcResult};
use crate::foundation::{Material, PileType};
use crate::units::{Feet, Pcf, Psf, SqFt};

/// Unit weight of water (pcf)
pub const UNIT_WEIGHT_WATER_PCF: f64 = 62.4;

/// Friction angles covered by [`NQ_TABLE`]
pub const NQ_MIN_PHI: u32 = 26;
pub const NQ_MAX_PHI: u32 = 40;

/// Bearing capacity factor Nq as `[drilled, driven]` for φ = 26° … 40°.
///
/// Values for φ = 27° and 29° are linear interpolations of the chart.
pub const NQ_TABLE: [[f64; 2]; 15] = [
    [5.0, 10.0],   // 26
    [6.5, 12.5],   // 27
    [8.0, 15.0],   // 28
    [9.0, 18.0],   // 29
    [10.0, 21.0],  // 30
    [12.0, 24.0],  // 31
    [14.0, 29.0],  // 32
    [17.0, 35.0],  // 33
    [21.0, 42.0],  // 34
    [25.0, 50.0],  // 35
    [30.0, 62.0],  // 36
    [38.0, 77.0],  // 37
    [43.0, 86.0],  // 38
    [60.0, 120.0], // 39
    [72.0, 145.0], // 40
];

/// Cohesion breakpoints (psf) of the adhesion curves
pub const ADHESION_BREAKPOINTS_PSF: [f64; 5] = [250.0, 500.0, 1000.0, 2000.0, 4000.0];

/// Adhesion (psf) at each breakpoint for timber and concrete piles
pub const ADHESION_TIMBER_CONCRETE_PSF: [f64; 5] = [250.0, 480.0, 750.0, 950.0, 1300.0];

/// Adhesion (psf) at each breakpoint for steel piles
pub const ADHESION_STEEL_PSF: [f64; 5] = [250.0, 460.0, 700.0, 720.0, 750.0];

/// Contact friction angle used for steel piles regardless of φ (degrees)
pub const STEEL_CONTACT_FRICTION_DEG: f64 = 20.0;

/// Depth/width ratio beyond which Nc takes its asymptotic value
const NC_LIMIT_RATIO: f64 = 4.0;
const NC_ASYMPTOTE: f64 = 9.0;

/// Bearing capacity factor Nq for granular soil.
///
/// `phi_deg` of 0 denotes a cohesive layer and returns 0. Angles outside
/// 26°–40° are not covered by the chart and are rejected.
///
/// ```rust
/// use pile_core::navfac::granular_nq;
///
/// assert_eq!(granular_nq(true, 26).unwrap(), 5.0);
/// assert_eq!(granular_nq(false, 40).unwrap(), 145.0);
/// assert_eq!(granular_nq(false, 0).unwrap(), 0.0);
/// ```
pub fn granular_nq(is_drilled: bool, phi_deg: u32) -> CalcResult<f64> {
    if phi_deg == 0 {
        return Ok(0.0);
    }
    if !(NQ_MIN_PHI..=NQ_MAX_PHI).contains(&phi_deg) {
        return Err(CalcError::invalid_profile(
            "friction_angle_deg",
            phi_deg.to_string(),
            format!("Nq is tabulated for {}-{} degrees only", NQ_MIN_PHI, NQ_MAX_PHI),
        ));
    }
    let row = NQ_TABLE[(phi_deg - NQ_MIN_PHI) as usize];
    Ok(if is_drilled { row[0] } else { row[1] })
}

/// Bearing capacity factor Nc for cohesive soil as a function of D/B.
///
/// Quartic fit of the chart for D/B < 4; 9 beyond.
pub fn cohesive_nc(depth_ft: f64, width_ft: f64) -> f64 {
    let x = depth_ft / width_ft;
    if x < NC_LIMIT_RATIO {
        6.29 + 1.88 * x - 0.506 * x.powi(2) + 0.0632 * x.powi(3) - 0.0031 * x.powi(4)
    } else {
        NC_ASYMPTOTE
    }
}

/// Contact friction angle δ (degrees) between pile and soil.
pub fn contact_friction_angle(phi_deg: f64, material: Material) -> f64 {
    match material {
        Material::Timber | Material::Concrete => 0.75 * phi_deg,
        Material::Steel => STEEL_CONTACT_FRICTION_DEG,
    }
}

/// Pile-soil adhesion ca (psf) for cohesion `c` (psf).
///
/// Linear between breakpoints; ca = c below the first breakpoint and capped
/// at the last tabulated value above 4000 psf.
///
/// ```rust
/// use pile_core::foundation::Material;
/// use pile_core::navfac::adhesion;
///
/// assert_eq!(adhesion(400.0, Material::Concrete), 388.0);
/// assert_eq!(adhesion(5000.0, Material::Steel), 750.0);
/// ```
pub fn adhesion(cohesion_psf: f64, material: Material) -> f64 {
    let curve = match material {
        Material::Timber | Material::Concrete => &ADHESION_TIMBER_CONCRETE_PSF,
        Material::Steel => &ADHESION_STEEL_PSF,
    };
    let breaks = &ADHESION_BREAKPOINTS_PSF;

    if cohesion_psf < breaks[0] {
        return cohesion_psf;
    }
    for i in 0..breaks.len() - 1 {
        if cohesion_psf < breaks[i + 1] {
            let t = (cohesion_psf - breaks[i]) / (breaks[i + 1] - breaks[i]);
            return curve[i] + t * (curve[i + 1] - curve[i]);
        }
    }
    curve[curve.len() - 1]
}

/// Horizontal earth pressure coefficient Kh for a pile type and load direction.
pub fn horizontal_earth_pressure_coefficient(pile_type: PileType, is_compression: bool) -> f64 {
    let (compression, tension) = match pile_type {
        PileType::DrivenHPile => (0.75, 0.40),
        PileType::DrivenDisplacement => (1.25, 0.80),
        PileType::DrivenDisplacementTapered => (1.75, 1.15),
        PileType::DrivenJetted => (0.65, 0.45),
        PileType::Drilled => (0.70, 0.40),
    };
    if is_compression {
        compression
    } else {
        tension
    }
}

/// Unit weight of the pile material (pcf)
pub fn pile_unit_weight_pcf(material: Material) -> f64 {
    match material {
        Material::Concrete => 150.0,
        Material::Steel => 150.0,
        Material::Timber => 30.0,
    }
}

/// Pile self-weight (lb) over its embedded length
pub fn pile_weight(material: Material, length_ft: f64, area_sqft: f64) -> f64 {
    (Pcf(pile_unit_weight_pcf(material)) * Feet(length_ft) * SqFt(area_sqft)).value()
}

/// Skin friction (lb) of one granular sublayer
pub fn granular_skin_friction(
    kh: f64,
    eff_stress_psf: f64,
    delta_deg: f64,
    perimeter_ft: f64,
    thickness_ft: f64,
) -> f64 {
    kh * eff_stress_psf * delta_deg.to_radians().tan() * perimeter_ft * thickness_ft
}

/// Skin friction (lb) of one cohesive sublayer
pub fn cohesive_skin_friction(adhesion_psf: f64, perimeter_ft: f64, thickness_ft: f64) -> f64 {
    adhesion_psf * perimeter_ft * thickness_ft
}

/// End bearing (lb) in cohesive soil
pub fn cohesive_end_bearing(cohesion_psf: f64, area_sqft: f64, nc: f64) -> f64 {
    (Psf(cohesion_psf * nc) * SqFt(area_sqft)).value()
}

/// End bearing (lb) in granular soil
pub fn granular_end_bearing(eff_stress_psf: f64, nq: f64, area_sqft: f64) -> f64 {
    (Psf(eff_stress_psf * nq) * SqFt(area_sqft)).value()
}

/// Ultimate capacity (lb).
///
/// End bearing does not act in tension; the pile's weight resists pullout
/// and is added only in tension.
pub fn ultimate_load_capacity(
    skin_friction_lb: f64,
    end_bearing_lb: f64,
    weight_lb: f64,
    is_compression: bool,
) -> f64 {
    if is_compression {
        skin_friction_lb + end_bearing_lb
    } else {
        skin_friction_lb + weight_lb
    }
}

/// Allowable capacity (lb): soil resistance divided by FS, plus weight in tension.
pub fn allowable_load_capacity(
    skin_friction_lb: f64,
    end_bearing_lb: f64,
    weight_lb: f64,
    is_compression: bool,
    factor_of_safety: f64,
) -> f64 {
    if is_compression {
        (skin_friction_lb + end_bearing_lb) / factor_of_safety
    } else {
        skin_friction_lb / factor_of_safety + weight_lb
    }
}
