//! # Capacity Summary Tables
//!
//! Allowable or ultimate capacity in kips, arranged as a matrix with one
//! row per bearing depth and one column per pile width, for compression and
//! tension. This is the data behind the summary tables of a report.
//!
//! ```text
//!             B = 1.0   B = 1.5   B = 2.0
//! D = 10 ft     12.3      19.8      28.1
//! D = 15 ft     20.4      31.0      43.6
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{PileCapacityResult, SweepResults};
use crate::errors::{CalcError, CalcResult};
use crate::foundation::PileWidth;
use crate::units::{Kips, Pounds};

/// Which capacity a summary reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CapacityKind {
    #[default]
    Allowable,
    Ultimate,
}

impl CapacityKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            CapacityKind::Allowable => "Allowable",
            CapacityKind::Ultimate => "Ultimate",
        }
    }

    fn pick(&self, result: &PileCapacityResult) -> f64 {
        match self {
            CapacityKind::Allowable => result.allowable_capacity_lb,
            CapacityKind::Ultimate => result.ultimate_capacity_lb,
        }
    }
}

/// Capacity matrices indexed `[depth][width]`, in kips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySummary {
    pub kind: CapacityKind,
    pub widths: Vec<PileWidth>,
    pub bearing_depths_ft: Vec<f64>,
    pub compression_kips: Vec<Vec<f64>>,
    pub tension_kips: Vec<Vec<f64>>,
}

impl CapacitySummary {
    /// Build the matrices by looking up each (width, depth) pair.
    ///
    /// Fails if the sweep has no result for a requested pair.
    pub fn from_results(
        results: &SweepResults,
        widths: &[PileWidth],
        bearing_depths_ft: &[f64],
        kind: CapacityKind,
    ) -> CalcResult<Self> {
        let table = |is_compression: bool| -> CalcResult<Vec<Vec<f64>>> {
            bearing_depths_ft
                .iter()
                .map(|&depth| {
                    widths
                        .iter()
                        .map(|width| {
                            let result = results.find(is_compression, width, depth).ok_or_else(|| {
                                CalcError::invalid_input(
                                    "results",
                                    format!("B={} D={}", width, depth),
                                    "No sweep result for this width and depth",
                                )
                            })?;
                            Ok(Kips::from(Pounds(kind.pick(result))).value())
                        })
                        .collect()
                })
                .collect()
        };

        Ok(CapacitySummary {
            kind,
            widths: widths.to_vec(),
            bearing_depths_ft: bearing_depths_ft.to_vec(),
            compression_kips: table(true)?,
            tension_kips: table(false)?,
        })
    }

    /// Capacity (kips) for a width and depth, if present in the table.
    pub fn capacity_kips(
        &self,
        is_compression: bool,
        width: &PileWidth,
        bearing_depth_ft: f64,
    ) -> Option<f64> {
        let col = self.widths.iter().position(|w| w == width)?;
        let row = self
            .bearing_depths_ft
            .iter()
            .position(|d| (d - bearing_depth_ft).abs() < 1e-9)?;
        let table = if is_compression {
            &self.compression_kips
        } else {
            &self.tension_kips
        };
        Some(table[row][col])
    }
}
