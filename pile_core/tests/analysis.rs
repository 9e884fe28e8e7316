//! End-to-end runs: project JSON in, capacity tables out.

use approx::assert_relative_eq;
use pile_core::calculations::BearingMode;
use pile_core::{
    load_project, save_project, CalcError, CapacityKind, DomainWarning, PileWidth, Project,
};
use tempfile::TempDir;

const PROJECT_JSON: &str = r#"{
  "meta": {
    "version": "0.1.0",
    "name": "Wharf Extension",
    "client": "Harbor District",
    "engineer": "R. Geotech",
    "created": "2024-03-01T12:00:00Z",
    "modified": "2024-03-01T12:00:00Z"
  },
  "soil_profile": {
    "layers": [
      { "bottom_depth_ft": 3.0, "name": "LS", "unit_weight_pcf": 120.0,
        "strength": { "type": "Granular", "friction_angle_deg": 28 } },
      { "bottom_depth_ft": 6.0, "name": "StCl", "unit_weight_pcf": 120.0,
        "strength": { "type": "Cohesive", "cohesion_psf": 1500.0 } },
      { "bottom_depth_ft": 8.5, "name": "SCl", "unit_weight_pcf": 125.0,
        "strength": { "type": "Cohesive", "cohesion_psf": 300.0 } },
      { "bottom_depth_ft": 20.0, "name": "CS", "unit_weight_pcf": 135.0,
        "strength": { "type": "Granular", "friction_angle_deg": 36 } }
    ],
    "groundwater_depth_ft": 9.5,
    "increment_ft": 0.5,
    "ignored_depth_ft": 3.0
  },
  "foundation": {
    "material": "CONCRETE",
    "pile_type": "DRIVEN-SINGLE-DISPLACEMENT-PILE",
    "widths": [[1.0], [1.5], [2.0]],
    "bearing_depths_ft": [10.0, 12.0, 15.0, 18.0],
    "factor_of_safety": 3.0
  }
}"#;

fn project() -> Project {
    serde_json::from_str(PROJECT_JSON).unwrap()
}

#[test]
fn detailed_profile_from_project() {
    let analysis = project().analyze().unwrap();
    let profile = &analysis.detailed_profile;

    assert_eq!(profile.len(), 40);
    assert_eq!(profile.sublayers[5].name, "LS");
    assert_eq!(profile.sublayers[6].name, "StCl");
    assert_eq!(profile.sublayers[17].friction_angle_deg, 36);

    // Dry to the water table, then buoyant
    assert_relative_eq!(profile.sublayers[5].eff_stress_bottom_psf, 360.0, epsilon = 1e-9);
    assert_relative_eq!(profile.sublayers[18].eff_stress_bottom_psf, 1167.5, epsilon = 1e-9);
    assert_relative_eq!(profile.sublayers[19].eff_stress_bottom_psf, 1203.8, epsilon = 1e-9);
}

#[test]
fn sweep_covers_every_width_and_depth() {
    let analysis = project().analyze().unwrap();
    assert_eq!(analysis.results.compression_results.len(), 12);
    assert_eq!(analysis.results.tension_results.len(), 12);

    let first = &analysis.results.compression_results[0];
    assert_eq!(first.config.width, PileWidth::Diameter(1.0));
    assert_eq!(first.config.bearing_depth_ft, 10.0);
    let last = &analysis.results.tension_results[11];
    assert_eq!(last.config.width, PileWidth::Diameter(2.0));
    assert_eq!(last.config.bearing_depth_ft, 18.0);
}

#[test]
fn capacity_composition() {
    let analysis = project().analyze().unwrap();

    for result in &analysis.results.compression_results {
        assert_eq!(result.end_bearing.mode, BearingMode::Granular);
        assert_relative_eq!(
            result.ultimate_capacity_lb,
            result.total_skin_friction_lb + result.end_bearing.value_lb,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.allowable_capacity_lb,
            result.ultimate_capacity_lb / 3.0,
            max_relative = 1e-12
        );
        // Top 3 ft carries no skin friction
        assert!(result.skin_frictions[..6].iter().all(|&q| q == 0.0));
    }

    for result in &analysis.results.tension_results {
        assert_eq!(result.end_bearing.mode, BearingMode::NotApplicable);
        assert_eq!(result.end_bearing.value_lb, 0.0);
        assert_relative_eq!(
            result.allowable_capacity_lb,
            result.total_skin_friction_lb / 3.0 + result.pile_weight_lb,
            max_relative = 1e-12
        );
    }
}

#[test]
fn summary_tables_in_kips() {
    let analysis = project().analyze().unwrap();
    let summary = analysis.summary(CapacityKind::Allowable).unwrap();

    let pile = analysis
        .results
        .find(true, &PileWidth::Diameter(1.5), 15.0)
        .unwrap();
    assert_relative_eq!(summary.compression_kips[2][1], pile.allowable_capacity_lb / 1000.0);

    // Longer piles in the same sand carry more
    for col in 0..3 {
        assert!(summary.compression_kips[3][col] > summary.compression_kips[0][col]);
        assert!(summary.compression_kips[0][col] > summary.tension_kips[0][col]);
    }
}

#[test]
fn narrow_pile_gets_twenty_b_warning() {
    let mut project = project();
    project.foundation.widths = vec![PileWidth::Diameter(0.5)];
    let analysis = project.analyze().unwrap();

    for result in &analysis.results.compression_results {
        assert_eq!(
            result.warnings,
            vec![DomainWarning::EffectiveStressLimited { limiting_depth_ft: 10.0 }]
        );
        assert!(result.limited_bottom_stresses.is_limited);
    }
}

#[test]
fn misaligned_layer_rejected_before_sweep() {
    let mut project = project();
    project.soil_profile.profile.layers[2].bottom_depth_ft = 8.3;
    let err = project.analyze().unwrap_err();
    assert!(matches!(
        err,
        CalcError::InvalidProfile { ref field, .. } if field == "layers[2].bottom_depth_ft"
    ));
}

#[test]
fn saved_project_reproduces_results() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wharf.pcp");

    let saved = project();
    save_project(&saved, &path).unwrap();
    let loaded = load_project(&path).unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded.analyze().unwrap(), saved.analyze().unwrap());
}
