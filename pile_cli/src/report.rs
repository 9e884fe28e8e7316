//! Plain-text tables for the terminal.

use std::fmt::Write;

use pile_core::calculations::{BearingMode, PileCapacityResult};
use pile_core::foundation::PileShape;
use pile_core::soil::{DetailedSoilProfile, GeneralSoilProfile, SoilStrength};
use pile_core::summary::CapacitySummary;
use pile_core::Project;

fn rule(width: usize) -> String {
    "─".repeat(width)
}

pub fn project_header(project: &Project) -> String {
    let meta = &project.meta;
    let foundation = &project.foundation;
    let mut out = String::new();
    let _ = writeln!(out, "{}", meta.name);
    let _ = writeln!(out, "{}", rule(meta.name.chars().count().max(40)));
    if !meta.client.is_empty() {
        let _ = writeln!(out, "Client:    {}", meta.client);
    }
    if !meta.engineer.is_empty() {
        let _ = writeln!(out, "Engineer:  {}", meta.engineer);
    }
    let _ = writeln!(
        out,
        "Pile:      {} {}, FS = {}",
        foundation.material,
        foundation.pile_type.display_name(),
        foundation.factor_of_safety
    );
    if !meta.notes.is_empty() {
        let _ = writeln!(out, "Notes:     {}", meta.notes);
    }
    out
}

/// Coarse layers with strength parameters and the water table.
pub fn soil_profile_table(profile: &GeneralSoilProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>10}  {:<20} {:>8} {:>8} {:>10}",
        "Depth ft", "Soil", "γ pcf", "φ deg", "c psf"
    );
    let _ = writeln!(out, "{}", rule(60));

    let mut water_shown = false;
    let mut top_ft = 0.0;
    for layer in &profile.layers {
        if !water_shown && profile.groundwater_depth_ft <= layer.bottom_depth_ft {
            let _ = writeln!(out, "{:>10.2}  ▽ groundwater", profile.groundwater_depth_ft);
            water_shown = true;
        }
        let (phi, c) = match layer.strength {
            SoilStrength::Granular { friction_angle_deg } => {
                (friction_angle_deg.to_string(), "-".to_string())
            }
            SoilStrength::Cohesive { cohesion_psf } => {
                ("-".to_string(), format!("{:.0}", cohesion_psf))
            }
        };
        let _ = writeln!(
            out,
            "{:>4.1}-{:<5.1}  {:<20} {:>8.1} {:>8} {:>10}",
            top_ft, layer.bottom_depth_ft, layer.name, layer.unit_weight_pcf, phi, c
        );
        top_ft = layer.bottom_depth_ft;
    }
    if !water_shown {
        let _ = writeln!(out, "Groundwater below profile ({:.2} ft)", profile.groundwater_depth_ft);
    }
    out
}

/// Matrix of capacities, one row per bearing depth.
fn matrix(summary: &CapacitySummary, values: &[Vec<f64>]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>10}", "D \\ B ft");
    for width in &summary.widths {
        let _ = write!(out, "{:>12}", width.label());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule(10 + 12 * summary.widths.len()));
    for (depth, row) in summary.bearing_depths_ft.iter().zip(values) {
        let _ = write!(out, "{:>10.1}", depth);
        for kips in row {
            let _ = write!(out, "{:>12.1}", kips);
        }
        let _ = writeln!(out);
    }
    out
}

/// Compression and tension tables in kips.
pub fn summary_tables(summary: &CapacitySummary) -> String {
    let kind = summary.kind.display_name();
    format!(
        "{} compression capacity (kips)\n{}\n{} tension capacity (kips)\n{}",
        kind,
        matrix(summary, &summary.compression_kips),
        kind,
        matrix(summary, &summary.tension_kips)
    )
}

fn mode_label(mode: BearingMode) -> &'static str {
    match mode {
        BearingMode::Granular => "granular",
        BearingMode::Cohesive => "cohesive",
        BearingMode::NotApplicable => "n/a",
    }
}

/// Sublayer-by-sublayer breakdown of one pile down to its tip.
pub fn pile_details(profile: &DetailedSoilProfile, result: &PileCapacityResult) -> String {
    let config = &result.config;
    let direction = if config.is_compression { "compression" } else { "tension" };
    let mut out = String::new();

    let _ = writeln!(
        out,
        "B = {} ft, D = {} ft, {} ({}, area {:.3} ft², perimeter {:.3} ft)",
        config.width.label(),
        config.bearing_depth_ft,
        direction,
        match result.shape {
            PileShape::Circle => "circle",
            PileShape::Rectangle => "rectangle",
        },
        result.pile_area_sqft,
        result.pile_perimeter_ft
    );
    let _ = writeln!(
        out,
        "{:>8} {:<16} {:>10} {:>10} {:>8} {:>8} {:>10}",
        "Depth", "Soil", "σ'v mid", "σ'v lim", "δ", "ca", "Qs lb"
    );

    let tip = profile.index_of_depth(config.bearing_depth_ft).unwrap_or(0);
    for (i, sublayer) in profile.sublayers.iter().enumerate().take(tip + 1) {
        let _ = writeln!(
            out,
            "{:>8.2} {:<16} {:>10.1} {:>10.1} {:>8.2} {:>8.1} {:>10.1}",
            sublayer.bottom_depth_ft,
            sublayer.name,
            sublayer.eff_stress_mid_psf,
            result.limited_mid_stresses.values[i],
            result.contact_friction_angles[i],
            result.adhesions[i],
            result.skin_frictions[i]
        );
    }

    let _ = writeln!(out, "Kh = {:.2}", result.earth_pressure_coefficient);
    let _ = writeln!(
        out,
        "Bearing factor ({}) = {:.2}",
        mode_label(result.bearing_capacity_factor.mode),
        result.bearing_capacity_factor.value
    );
    let _ = writeln!(out, "Skin friction   {:>12.1} lb", result.total_skin_friction_lb);
    let _ = writeln!(
        out,
        "End bearing     {:>12.1} lb ({})",
        result.end_bearing.value_lb,
        mode_label(result.end_bearing.mode)
    );
    let _ = writeln!(out, "Pile weight     {:>12.1} lb", result.pile_weight_lb);
    let _ = writeln!(out, "Ultimate        {:>12.1} lb", result.ultimate_capacity_lb);
    let _ = writeln!(out, "Allowable       {:>12.1} lb", result.allowable_capacity_lb);
    for warning in &result.warnings {
        let _ = writeln!(out, "! {}", warning);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pile_core::summary::CapacityKind;

    fn sample() -> Project {
        Project::sample("Pier 7", "J. Engineer", "Port Authority")
    }

    #[test]
    fn test_header_lists_pile() {
        let header = project_header(&sample());
        assert!(header.starts_with("Pier 7\n"));
        assert!(header.contains("Engineer:  J. Engineer"));
        assert!(header.contains("FS = 3"));
    }

    #[test]
    fn test_soil_table_marks_groundwater() {
        let table = soil_profile_table(&sample().soil_profile.profile);
        let lines: Vec<&str> = table.lines().collect();
        // header, rule, 3 layers above the water, water marker, last layer
        assert_eq!(lines.len(), 7);
        assert!(lines[5].contains("groundwater"));
        assert!(lines[6].contains("Compact Sand"));
    }

    #[test]
    fn test_soil_table_dry_profile() {
        let mut profile = sample().soil_profile.profile;
        profile.groundwater_depth_ft = 100.0;
        assert!(soil_profile_table(&profile).contains("Groundwater below profile"));
    }

    #[test]
    fn test_summary_tables_layout() {
        let analysis = sample().analyze().unwrap();
        let summary = analysis.summary(CapacityKind::Allowable).unwrap();
        let text = summary_tables(&summary);
        assert!(text.starts_with("Allowable compression capacity (kips)"));
        assert!(text.contains("Allowable tension capacity (kips)"));
        // 2 × (title, header, rule, 4 depth rows) and a blank separator
        assert_eq!(text.lines().count(), 15);
    }

    #[test]
    fn test_pile_details_rows_to_tip() {
        let analysis = sample().analyze().unwrap();
        let result = &analysis.results.compression_results[0];
        let text = pile_details(&analysis.detailed_profile, result);
        // 10 ft tip at 0.5 ft increments: 20 sublayer rows
        let rows = text
            .lines()
            .filter(|l| l.trim_start().starts_with(|c: char| c.is_ascii_digit()))
            .count();
        assert_eq!(rows, 20);
        assert!(text.contains("Allowable"));
    }
}
