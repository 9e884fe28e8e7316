//! # Foundation Model
//!
//! Pile material, installation method, cross-section and the per-point
//! [`FoundationConfiguration`] evaluated by the capacity calculator.
//!
//! Names serialize in the upper-case, hyphenated form used by project files
//! (`"CONCRETE"`, `"DRIVEN-SINGLE-H-PILE"`). Widths serialize as a list of
//! one value (circular diameter) or two values (H-pile width × height).
//!
//! ## Example
//!
//! ```rust
//! use pile_core::foundation::{Material, PileShape, PileType, PileWidth};
//!
//! let width: PileWidth = serde_json::from_str("[1.5]").unwrap();
//! assert_eq!(width, PileWidth::Diameter(1.5));
//!
//! let pile_type: PileType = "DRILLED-PILE".parse().unwrap();
//! assert_eq!(pile_type.shape(), PileShape::Circle);
//! assert!("GRANITE".parse::<Material>().is_err());
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Pile material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    Concrete,
    Steel,
    Timber,
}

impl Material {
    /// All materials for selection lists
    pub const ALL: [Material; 3] = [Material::Concrete, Material::Steel, Material::Timber];

    /// Name as written in project files
    pub fn code(&self) -> &'static str {
        match self {
            Material::Concrete => "CONCRETE",
            Material::Steel => "STEEL",
            Material::Timber => "TIMBER",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Material {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let expected = "Expected CONCRETE, STEEL or TIMBER";
                CalcError::invalid_configuration("material", s, expected)
            })
    }
}

/// Pile installation method / type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileType {
    #[serde(rename = "DRIVEN-SINGLE-H-PILE")]
    DrivenHPile,
    #[serde(rename = "DRIVEN-SINGLE-DISPLACEMENT-PILE")]
    DrivenDisplacement,
    #[serde(rename = "DRIVEN-SINGLE-DISPLACEMENT-TAPERED-PILE")]
    DrivenDisplacementTapered,
    #[serde(rename = "DRIVEN-JETTED-PILE")]
    DrivenJetted,
    #[serde(rename = "DRILLED-PILE")]
    Drilled,
}

impl PileType {
    /// All pile types for selection lists
    pub const ALL: [PileType; 5] = [
        PileType::DrivenHPile,
        PileType::DrivenDisplacement,
        PileType::DrivenDisplacementTapered,
        PileType::DrivenJetted,
        PileType::Drilled,
    ];

    /// Name as written in project files
    pub fn code(&self) -> &'static str {
        match self {
            PileType::DrivenHPile => "DRIVEN-SINGLE-H-PILE",
            PileType::DrivenDisplacement => "DRIVEN-SINGLE-DISPLACEMENT-PILE",
            PileType::DrivenDisplacementTapered => "DRIVEN-SINGLE-DISPLACEMENT-TAPERED-PILE",
            PileType::DrivenJetted => "DRIVEN-JETTED-PILE",
            PileType::Drilled => "DRILLED-PILE",
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            PileType::DrivenHPile => "Driven H-Pile",
            PileType::DrivenDisplacement => "Driven Displacement Pile",
            PileType::DrivenDisplacementTapered => "Driven Tapered Displacement Pile",
            PileType::DrivenJetted => "Driven Jetted Pile",
            PileType::Drilled => "Drilled Pile",
        }
    }

    /// H-piles are rectangular; everything else is treated as circular
    pub fn shape(&self) -> PileShape {
        match self {
            PileType::DrivenHPile => PileShape::Rectangle,
            _ => PileShape::Circle,
        }
    }

    /// Drilled piles use the drilled column of the Nq table
    pub fn is_drilled(&self) -> bool {
        matches!(self, PileType::Drilled)
    }
}

impl fmt::Display for PileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PileType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PileType::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::invalid_configuration("pile_type", s, "Unknown pile type"))
    }
}

/// Cross-section shape used for area and perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PileShape {
    Circle,
    Rectangle,
}

/// Pile width: one value for a circular diameter, two for a rectangle (ft).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub enum PileWidth {
    Diameter(f64),
    Rectangular { width_ft: f64, height_ft: f64 },
}

impl PileWidth {
    /// The governing dimension B: diameter, or the first rectangular dimension.
    /// Used for the 20B rule and the D/B ratio of Nc.
    pub fn primary_ft(&self) -> f64 {
        match *self {
            PileWidth::Diameter(d) => d,
            PileWidth::Rectangular { width_ft, .. } => width_ft,
        }
    }

    /// Raw values in project-file order
    pub fn values(&self) -> Vec<f64> {
        match *self {
            PileWidth::Diameter(d) => vec![d],
            PileWidth::Rectangular { width_ft, height_ft } => vec![width_ft, height_ft],
        }
    }

    /// Short label ("1.5" or "1x1.25")
    pub fn label(&self) -> String {
        match *self {
            PileWidth::Diameter(d) => format!("{}", d),
            PileWidth::Rectangular { width_ft, height_ft } => format!("{}x{}", width_ft, height_ft),
        }
    }

    fn shape(&self) -> PileShape {
        match self {
            PileWidth::Diameter(_) => PileShape::Circle,
            PileWidth::Rectangular { .. } => PileShape::Rectangle,
        }
    }

    /// Validate dimensions and that the arity matches the pile's shape.
    pub fn validate_for(&self, shape: PileShape) -> CalcResult<()> {
        if let Some(bad) = self.values().into_iter().find(|v| !v.is_finite() || *v <= 0.0) {
            return Err(CalcError::invalid_configuration(
                "width",
                bad.to_string(),
                "Width dimensions must be positive",
            ));
        }
        if self.shape() != shape {
            let reason = match shape {
                PileShape::Rectangle => "Rectangular piles need two width values",
                PileShape::Circle => "Circular piles need a single diameter",
            };
            return Err(CalcError::invalid_configuration("width", self.label(), reason));
        }
        Ok(())
    }

    /// Cross-sectional area (ft²) for the given shape
    pub fn area_sqft(&self, shape: PileShape) -> CalcResult<f64> {
        self.validate_for(shape)?;
        Ok(match *self {
            PileWidth::Diameter(d) => PI * (d / 2.0).powi(2),
            PileWidth::Rectangular { width_ft, height_ft } => width_ft * height_ft,
        })
    }

    /// Perimeter (ft) for the given shape
    pub fn perimeter_ft(&self, shape: PileShape) -> CalcResult<f64> {
        self.validate_for(shape)?;
        Ok(match *self {
            PileWidth::Diameter(d) => PI * d,
            PileWidth::Rectangular { width_ft, height_ft } => 2.0 * (width_ft + height_ft),
        })
    }
}

impl TryFrom<Vec<f64>> for PileWidth {
    type Error = CalcError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [d] => Ok(PileWidth::Diameter(*d)),
            [w, h] => Ok(PileWidth::Rectangular {
                width_ft: *w,
                height_ft: *h,
            }),
            _ => Err(CalcError::invalid_configuration(
                "width",
                format!("{:?}", values),
                "Width must have one or two values",
            )),
        }
    }
}

impl From<PileWidth> for Vec<f64> {
    fn from(width: PileWidth) -> Self {
        width.values()
    }
}

impl fmt::Display for PileWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single point of the capacity sweep.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "TIMBER",
///   "pile_type": "DRIVEN-SINGLE-DISPLACEMENT-PILE",
///   "width": [1.5],
///   "bearing_depth_ft": 15.0,
///   "factor_of_safety": 3.0,
///   "is_compression": true,
///   "ignored_depth_ft": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationConfiguration {
    pub material: Material,
    pub pile_type: PileType,
    pub width: PileWidth,
    /// Depth of the pile tip; must land on a sublayer boundary
    pub bearing_depth_ft: f64,
    pub factor_of_safety: f64,
    pub is_compression: bool,
    /// Skin friction is ignored for sublayers whose bottom is at or above this depth
    #[serde(default)]
    pub ignored_depth_ft: f64,
}

impl FoundationConfiguration {
    pub fn shape(&self) -> PileShape {
        self.pile_type.shape()
    }

    /// Validate the profile-independent parts of the configuration.
    pub fn validate(&self) -> CalcResult<()> {
        self.width.validate_for(self.shape())?;
        if !self.bearing_depth_ft.is_finite() || self.bearing_depth_ft <= 0.0 {
            return Err(CalcError::invalid_configuration(
                "bearing_depth_ft",
                self.bearing_depth_ft.to_string(),
                "Bearing depth must be positive",
            ));
        }
        if !self.factor_of_safety.is_finite() || self.factor_of_safety <= 0.0 {
            return Err(CalcError::invalid_configuration(
                "factor_of_safety",
                self.factor_of_safety.to_string(),
                "Factor of safety must be positive",
            ));
        }
        if !self.ignored_depth_ft.is_finite() || self.ignored_depth_ft < 0.0 {
            return Err(CalcError::invalid_configuration(
                "ignored_depth_ft",
                self.ignored_depth_ft.to_string(),
                "Ignored depth cannot be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(pile_type: PileType, width: PileWidth) -> FoundationConfiguration {
        FoundationConfiguration {
            material: Material::Steel,
            pile_type,
            width,
            bearing_depth_ft: 10.0,
            factor_of_safety: 3.0,
            is_compression: true,
            ignored_depth_ft: 0.0,
        }
    }

    #[test]
    fn test_material_serialization() {
        assert_eq!(serde_json::to_string(&Material::Timber).unwrap(), "\"TIMBER\"");
        let m: Material = serde_json::from_str("\"CONCRETE\"").unwrap();
        assert_eq!(m, Material::Concrete);
        assert!(serde_json::from_str::<Material>("\"ALUMINUM\"").is_err());
    }

    #[test]
    fn test_pile_type_codes_roundtrip() {
        for pile_type in PileType::ALL {
            let json = serde_json::to_string(&pile_type).unwrap();
            assert_eq!(json, format!("\"{}\"", pile_type.code()));
            assert_eq!(pile_type.code().parse::<PileType>().unwrap(), pile_type);
        }
    }

    #[test]
    fn test_unknown_pile_type_is_configuration_error() {
        let err = "DRIVEN-SCREW-PILE".parse::<PileType>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_shape_of_pile_type() {
        assert_eq!(PileType::DrivenHPile.shape(), PileShape::Rectangle);
        assert_eq!(PileType::DrivenJetted.shape(), PileShape::Circle);
        assert!(PileType::Drilled.is_drilled());
        assert!(!PileType::DrivenDisplacement.is_drilled());
    }

    #[test]
    fn test_width_from_json() {
        let w: PileWidth = serde_json::from_str("[1.0, 1.25]").unwrap();
        assert_eq!(
            w,
            PileWidth::Rectangular {
                width_ft: 1.0,
                height_ft: 1.25
            }
        );
        assert_eq!(serde_json::to_string(&w).unwrap(), "[1.0,1.25]");
        assert!(serde_json::from_str::<PileWidth>("[]").is_err());
        assert!(serde_json::from_str::<PileWidth>("[1.0, 2.0, 3.0]").is_err());
    }

    #[test]
    fn test_circle_geometry() {
        let w = PileWidth::Diameter(2.0);
        assert_relative_eq!(w.area_sqft(PileShape::Circle).unwrap(), PI);
        assert_relative_eq!(w.perimeter_ft(PileShape::Circle).unwrap(), 2.0 * PI);
    }

    #[test]
    fn test_rectangle_geometry() {
        let w = PileWidth::Rectangular {
            width_ft: 1.0,
            height_ft: 1.5,
        };
        assert_relative_eq!(w.area_sqft(PileShape::Rectangle).unwrap(), 1.5);
        assert_relative_eq!(w.perimeter_ft(PileShape::Rectangle).unwrap(), 5.0);
        assert_eq!(w.primary_ft(), 1.0);
    }

    #[test]
    fn test_width_shape_mismatch() {
        let h_pile_with_diameter = config(PileType::DrivenHPile, PileWidth::Diameter(1.0));
        assert!(matches!(
            h_pile_with_diameter.validate(),
            Err(CalcError::InvalidConfiguration { .. })
        ));

        let drilled_with_rectangle = config(
            PileType::Drilled,
            PileWidth::Rectangular {
                width_ft: 1.0,
                height_ft: 1.0,
            },
        );
        assert!(drilled_with_rectangle.validate().is_err());
    }

    #[test]
    fn test_configuration_validation() {
        let mut cfg = config(PileType::Drilled, PileWidth::Diameter(2.0));
        assert!(cfg.validate().is_ok());

        cfg.factor_of_safety = 0.0;
        assert!(cfg.validate().is_err());

        cfg.factor_of_safety = 2.5;
        cfg.width = PileWidth::Diameter(-1.0);
        assert!(cfg.validate().is_err());

        cfg.width = PileWidth::Diameter(1.0);
        cfg.ignored_depth_ft = -2.0;
        assert!(cfg.validate().is_err());
    }
}
