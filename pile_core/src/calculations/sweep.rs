//! # Capacity Sweep
//!
//! Runs the pile capacity calculation for every width × bearing depth, in
//! compression and in tension, against one shared soil profile.
//!
//! Every configuration is validated before any point is computed, so a sweep
//! either returns the complete result set or a single error.
//!
//! With the `parallel` feature the points are computed on the rayon global
//! pool; result order is the same either way (widths outer, depths inner).

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::pile_capacity::{self, PileCapacityResult};
use crate::errors::CalcResult;
use crate::foundation::{FoundationConfiguration, Material, PileType, PileWidth};
use crate::soil::DetailedSoilProfile;

/// Configuration shared by every point of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSettings {
    pub material: Material,
    pub pile_type: PileType,
    pub factor_of_safety: f64,
    #[serde(default)]
    pub ignored_depth_ft: f64,
}

impl SweepSettings {
    /// Configuration for one sweep point
    pub fn configuration(
        &self,
        width: PileWidth,
        bearing_depth_ft: f64,
        is_compression: bool,
    ) -> FoundationConfiguration {
        FoundationConfiguration {
            material: self.material,
            pile_type: self.pile_type,
            width,
            bearing_depth_ft,
            factor_of_safety: self.factor_of_safety,
            is_compression,
            ignored_depth_ft: self.ignored_depth_ft,
        }
    }
}

/// All results of a sweep, split by load direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub compression_results: Vec<PileCapacityResult>,
    pub tension_results: Vec<PileCapacityResult>,
}

impl SweepResults {
    /// Total number of results in both directions
    pub fn len(&self) -> usize {
        self.compression_results.len() + self.tension_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the result for a (width, bearing depth) pair.
    pub fn find(
        &self,
        is_compression: bool,
        width: &PileWidth,
        bearing_depth_ft: f64,
    ) -> Option<&PileCapacityResult> {
        let results = if is_compression {
            &self.compression_results
        } else {
            &self.tension_results
        };
        results.iter().find(|r| {
            r.config.width == *width && (r.config.bearing_depth_ft - bearing_depth_ft).abs() < 1e-9
        })
    }
}

fn compute_pair(
    profile: &DetailedSoilProfile,
    settings: &SweepSettings,
    width: PileWidth,
    depth: f64,
) -> CalcResult<(PileCapacityResult, PileCapacityResult)> {
    let compression = pile_capacity::compute(profile, &settings.configuration(width, depth, true))?;
    let tension = pile_capacity::compute(profile, &settings.configuration(width, depth, false))?;
    Ok((compression, tension))
}

/// Compute capacities for every width × bearing depth in both directions.
///
/// Produces `|widths| × |bearing_depths|` results per direction.
///
/// ```rust
/// use pile_core::calculations::sweep::{sweep, SweepSettings};
/// use pile_core::foundation::{Material, PileType, PileWidth};
/// use pile_core::soil::{build, GeneralSoilProfile, SoilLayer};
///
/// let general = GeneralSoilProfile::new(vec![SoilLayer::granular(40.0, "Sand", 125.0, 32)], 10.0);
/// let profile = build(&general, 1.0).unwrap();
/// let settings = SweepSettings {
///     material: Material::Concrete,
///     pile_type: PileType::Drilled,
///     factor_of_safety: 3.0,
///     ignored_depth_ft: 0.0,
/// };
///
/// let widths = [PileWidth::Diameter(1.0), PileWidth::Diameter(2.0)];
/// let results = sweep(&profile, &widths, &[10.0, 20.0, 30.0], &settings).unwrap();
/// assert_eq!(results.compression_results.len(), 6);
/// assert_eq!(results.tension_results.len(), 6);
/// ```
pub fn sweep(
    profile: &DetailedSoilProfile,
    widths: &[PileWidth],
    bearing_depths_ft: &[f64],
    settings: &SweepSettings,
) -> CalcResult<SweepResults> {
    let points: Vec<(PileWidth, f64)> = widths
        .iter()
        .flat_map(|w| bearing_depths_ft.iter().map(move |d| (*w, *d)))
        .collect();

    // Fail fast: nothing is computed unless every point is valid
    for &(width, depth) in &points {
        pile_capacity::validate(profile, &settings.configuration(width, depth, true))?;
    }

    debug!(
        widths = widths.len(),
        bearing_depths = bearing_depths_ft.len(),
        points = points.len() * 2,
        "Running capacity sweep"
    );

    #[cfg(not(feature = "parallel"))]
    let iterator = points.iter();

    #[cfg(feature = "parallel")]
    let iterator = points.par_iter();

    let pairs: Vec<(PileCapacityResult, PileCapacityResult)> = iterator
        .map(|&(width, depth)| compute_pair(profile, settings, width, depth))
        .collect::<CalcResult<_>>()?;

    let (compression_results, tension_results) = pairs.into_iter().unzip();
    Ok(SweepResults {
        compression_results,
        tension_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::soil::{build, GeneralSoilProfile, SoilLayer};

    fn test_profile() -> DetailedSoilProfile {
        let general = GeneralSoilProfile::new(
            vec![
                SoilLayer::granular(3.0, "LS", 120.0, 28),
                SoilLayer::cohesive(6.0, "StCl", 120.0, 1500.0),
                SoilLayer::cohesive(8.5, "SCl", 125.0, 300.0),
                SoilLayer::granular(20.0, "CS", 135.0, 36),
            ],
            9.5,
        );
        build(&general, 0.5).unwrap()
    }

    fn settings() -> SweepSettings {
        SweepSettings {
            material: Material::Concrete,
            pile_type: PileType::DrivenDisplacement,
            factor_of_safety: 3.0,
            ignored_depth_ft: 3.0,
        }
    }

    fn widths() -> Vec<PileWidth> {
        vec![PileWidth::Diameter(1.0), PileWidth::Diameter(1.5), PileWidth::Diameter(2.0)]
    }

    #[test]
    fn test_sweep_cardinality() {
        let depths = [10.0, 12.0, 15.0, 18.0];
        let results = sweep(&test_profile(), &widths(), &depths, &settings()).unwrap();
        assert_eq!(results.compression_results.len(), 12);
        assert_eq!(results.tension_results.len(), 12);
        assert_eq!(results.len(), 24);
        assert!(results.compression_results.iter().all(|r| r.is_compression()));
        assert!(results.tension_results.iter().all(|r| !r.is_compression()));
    }

    #[test]
    fn test_sweep_order_widths_outer() {
        let depths = [10.0, 15.0];
        let results = sweep(&test_profile(), &widths(), &depths, &settings()).unwrap();
        let order: Vec<(f64, f64)> = results
            .compression_results
            .iter()
            .map(|r| (r.config.width.primary_ft(), r.config.bearing_depth_ft))
            .collect();
        assert_eq!(
            order,
            vec![(1.0, 10.0), (1.0, 15.0), (1.5, 10.0), (1.5, 15.0), (2.0, 10.0), (2.0, 15.0)]
        );
    }

    #[test]
    fn test_sweep_matches_single_compute() {
        let profile = test_profile();
        let results = sweep(&profile, &widths(), &[12.0], &settings()).unwrap();
        let config = settings().configuration(PileWidth::Diameter(1.5), 12.0, false);
        let expected = pile_capacity::compute(&profile, &config).unwrap();
        let found = results.find(false, &PileWidth::Diameter(1.5), 12.0).unwrap();
        assert_eq!(*found, expected);
    }

    fn assert_matches_pointwise(
        profile: &DetailedSoilProfile,
        widths: &[PileWidth],
        depths: &[f64],
    ) {
        let results = sweep(profile, widths, depths, &settings()).unwrap();
        assert_eq!(results.compression_results.len(), widths.len() * depths.len());

        let mut i = 0;
        for width in widths {
            for &depth in depths {
                let point = |is_compression| {
                    let config = settings().configuration(*width, depth, is_compression);
                    pile_capacity::compute(profile, &config).unwrap()
                };
                let compression = point(true);
                let tension = point(false);
                assert_eq!(results.compression_results[i], compression);
                assert_eq!(results.tension_results[i], tension);
                i += 1;
            }
        }
    }

    #[test]
    fn test_sweep_matches_pointwise_compute() {
        assert_matches_pointwise(&test_profile(), &widths(), &[10.0, 12.0, 15.0, 18.0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_sweep_matches_pointwise_compute() {
        // Enough points that rayon splits the work across threads
        let widths: Vec<PileWidth> =
            (1..=16).map(|i| PileWidth::Diameter(0.25 * i as f64)).collect();
        let depths: Vec<f64> = (8..=38).map(|i| 0.5 * i as f64).collect();
        assert_matches_pointwise(&test_profile(), &widths, &depths);
    }

    #[test]
    fn test_find_missing_pair() {
        let results = sweep(&test_profile(), &widths(), &[12.0], &settings()).unwrap();
        assert!(results.find(true, &PileWidth::Diameter(3.0), 12.0).is_none());
        assert!(results.find(true, &PileWidth::Diameter(1.0), 13.0).is_none());
    }

    #[test]
    fn test_sweep_fails_fast_on_bad_depth() {
        let err = sweep(&test_profile(), &widths(), &[10.0, 10.25], &settings()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_sweep_rejects_bad_width() {
        let bad = vec![
            PileWidth::Diameter(1.0),
            PileWidth::Rectangular {
                width_ft: 1.0,
                height_ft: 1.0,
            },
        ];
        assert!(sweep(&test_profile(), &bad, &[10.0], &settings()).is_err());
    }

    #[test]
    fn test_empty_sweep() {
        let results = sweep(&test_profile(), &[], &[10.0], &settings()).unwrap();
        assert!(results.is_empty());
    }
}
