//! # Project Data Structures
//!
//! The `Project` struct is the root container for one pile capacity analysis.
//! Projects serialize to `.pcp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, name, engineer, client, timestamps)
//! ├── soil_profile: SoilProfileSection (layers, groundwater, increment)
//! └── foundation: FoundationDetails (material, pile type, widths, depths, FS)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pile_core::project::Project;
//!
//! let project = Project::sample("Pier 7", "Jane Engineer", "ACME Port Authority");
//! let analysis = project.analyze().unwrap();
//!
//! // 3 widths × 4 bearing depths
//! assert_eq!(analysis.results.compression_results.len(), 12);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::{sweep, SweepResults, SweepSettings};
use crate::errors::{CalcError, CalcResult};
use crate::foundation::{Material, PileType, PileWidth};
use crate::soil::{build, DetailedSoilProfile, GeneralSoilProfile, SoilLayer};
use crate::summary::{CapacityKind, CapacitySummary};

/// Current schema version for .pcp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Default sublayer thickness (ft)
pub const DEFAULT_INCREMENT_FT: f64 = 0.5;

fn default_increment() -> f64 {
    DEFAULT_INCREMENT_FT
}

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub soil_profile: SoilProfileSection,
    pub foundation: FoundationDetails,
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version for forward compatibility
    pub version: String,
    pub name: String,
    pub client: String,
    pub engineer: String,
    #[serde(default)]
    pub notes: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Soil profile as entered, plus discretization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfileSection {
    #[serde(flatten)]
    pub profile: GeneralSoilProfile,
    /// Sublayer thickness (ft)
    #[serde(default = "default_increment")]
    pub increment_ft: f64,
    /// Skin friction is ignored down to this depth (ft)
    #[serde(default)]
    pub ignored_depth_ft: f64,
}

/// Foundation alternatives to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationDetails {
    pub material: Material,
    pub pile_type: PileType,
    pub widths: Vec<PileWidth>,
    pub bearing_depths_ft: Vec<f64>,
    pub factor_of_safety: f64,
}

impl Project {
    /// Create a project from its soil and foundation sections.
    pub fn new(
        name: impl Into<String>,
        engineer: impl Into<String>,
        client: impl Into<String>,
        soil_profile: SoilProfileSection,
        foundation: FoundationDetails,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                client: client.into(),
                engineer: engineer.into(),
                notes: String::new(),
                created: now,
                modified: now,
            },
            soil_profile,
            foundation,
        }
    }

    /// A ready-to-run project: four layers over 20 ft, driven concrete piles.
    pub fn sample(
        name: impl Into<String>,
        engineer: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let soil_profile = SoilProfileSection {
            profile: GeneralSoilProfile::new(
                vec![
                    SoilLayer::granular(3.0, "Loose Sand", 120.0, 28),
                    SoilLayer::cohesive(6.0, "Stiff Clay", 120.0, 1500.0),
                    SoilLayer::cohesive(8.5, "Soft Clay", 125.0, 300.0),
                    SoilLayer::granular(20.0, "Compact Sand", 135.0, 36),
                ],
                9.5,
            ),
            increment_ft: DEFAULT_INCREMENT_FT,
            ignored_depth_ft: 3.0,
        };
        let foundation = FoundationDetails {
            material: Material::Concrete,
            pile_type: PileType::DrivenDisplacement,
            widths: vec![
                PileWidth::Diameter(1.0),
                PileWidth::Diameter(1.5),
                PileWidth::Diameter(2.0),
            ],
            bearing_depths_ft: vec![10.0, 12.0, 15.0, 18.0],
            factor_of_safety: 3.0,
        };
        Project::new(name, engineer, client, soil_profile, foundation)
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Sweep settings shared by every width and depth
    pub fn sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            material: self.foundation.material,
            pile_type: self.foundation.pile_type,
            factor_of_safety: self.foundation.factor_of_safety,
            ignored_depth_ft: self.soil_profile.ignored_depth_ft,
        }
    }

    /// Check the record before it is handed to the engine.
    ///
    /// Soil alignment and per-configuration checks are left to the profile
    /// builder and the sweep.
    pub fn validate(&self) -> CalcResult<()> {
        let foundation = &self.foundation;
        if foundation.widths.is_empty() {
            return Err(CalcError::invalid_input(
                "foundation.widths",
                "[]",
                "At least one width is required",
            ));
        }
        if foundation.bearing_depths_ft.is_empty() {
            return Err(CalcError::invalid_input(
                "foundation.bearing_depths_ft",
                "[]",
                "At least one bearing depth is required",
            ));
        }
        if !foundation.factor_of_safety.is_finite() || foundation.factor_of_safety <= 0.0 {
            return Err(CalcError::invalid_input(
                "foundation.factor_of_safety",
                foundation.factor_of_safety.to_string(),
                "Factor of safety must be positive",
            ));
        }

        let deepest = self.soil_profile.profile.total_depth_ft();
        for (i, &depth) in foundation.bearing_depths_ft.iter().enumerate() {
            if !depth.is_finite() || depth <= 0.0 || depth >= deepest {
                return Err(CalcError::invalid_input(
                    format!("foundation.bearing_depths_ft[{}]", i),
                    depth.to_string(),
                    format!(
                        "Bearing depth must be between 0 and the deepest layer bottom ({} ft)",
                        deepest
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Validate, build the detailed profile and run the capacity sweep.
    pub fn analyze(&self) -> CalcResult<Analysis> {
        self.validate()?;
        let detailed_profile = build(&self.soil_profile.profile, self.soil_profile.increment_ft)?;
        let results = sweep(
            &detailed_profile,
            &self.foundation.widths,
            &self.foundation.bearing_depths_ft,
            &self.sweep_settings(),
        )?;

        info!(
            project = %self.meta.name,
            results = results.len(),
            "Analysis complete"
        );

        Ok(Analysis {
            detailed_profile,
            results,
            widths: self.foundation.widths.clone(),
            bearing_depths_ft: self.foundation.bearing_depths_ft.clone(),
        })
    }
}

/// Output of [`Project::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub detailed_profile: DetailedSoilProfile,
    pub results: SweepResults,
    pub widths: Vec<PileWidth>,
    pub bearing_depths_ft: Vec<f64>,
}

impl Analysis {
    /// Capacity tables in kips
    pub fn summary(&self, kind: CapacityKind) -> CalcResult<CapacitySummary> {
        CapacitySummary::from_results(&self.results, &self.widths, &self.bearing_depths_ft, kind)
    }
}
