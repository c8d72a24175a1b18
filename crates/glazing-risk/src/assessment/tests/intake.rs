use crate::assessment::domain::{
    FramingSystem, GlassPly, GlassTreatment, GlazingConfiguration, InstallationLocation,
    RiskCategory, RiskLevel, ThermalExposure,
};
use crate::assessment::evaluation::evaluate;
use crate::assessment::intake::{
    GlazingSubmission, InvalidConfiguration, PlySubmission, TreatmentKind,
};
use crate::assessment::presets::GlassPreset;

fn submission(plies: Vec<PlySubmission>) -> GlazingSubmission {
    GlazingSubmission {
        plies,
        location: Some(InstallationLocation::Facade),
        height_from_floor_m: Some(2.0),
        framing: Some(FramingSystem::FullyFramed),
        pedestrian_access_below: Some(true),
        thermal_exposure: Some(ThermalExposure::None),
        critical_use_area: Some(true),
    }
}

fn annealed_ply() -> PlySubmission {
    PlySubmission::new(TreatmentKind::Annealed, false, None)
}

#[test]
fn valid_submission_builds_configuration() {
    let configuration = submission(vec![
        PlySubmission::new(TreatmentKind::Tempered, false, Some(true)),
        annealed_ply(),
    ])
    .validate()
    .expect("submission is valid");

    assert_eq!(
        configuration.outer().treatment,
        GlassTreatment::Tempered { heat_soaked: true }
    );
    assert_eq!(
        configuration.inner().map(|ply| ply.treatment),
        Some(GlassTreatment::Annealed)
    );
    assert_eq!(configuration.plies().count(), 2);
    assert!(configuration.critical_use_area());
}

#[test]
fn missing_fields_are_named() {
    let mut missing_location = submission(vec![annealed_ply()]);
    missing_location.location = None;
    let err = missing_location.validate().expect_err("location required");
    assert_eq!(err.field(), "location");

    let mut missing_framing = submission(vec![annealed_ply()]);
    missing_framing.framing = None;
    let err = missing_framing.validate().expect_err("framing required");
    assert_eq!(err.field(), "framing");

    let missing_treatment = submission(vec![PlySubmission::default()]);
    let err = missing_treatment.validate().expect_err("treatment required");
    assert_eq!(err.field(), "plies[0].treatment");
    assert_eq!(err.to_string(), "plies[0].treatment is required");
}

#[test]
fn ply_count_must_be_one_or_two() {
    let err = submission(Vec::new())
        .validate()
        .expect_err("empty plies rejected");
    assert_eq!(err, InvalidConfiguration::PlyCount { found: 0 });
    assert_eq!(err.field(), "plies");

    let err = submission(vec![annealed_ply(), annealed_ply(), annealed_ply()])
        .validate()
        .expect_err("three plies rejected");
    assert_eq!(err, InvalidConfiguration::PlyCount { found: 3 });
}

#[test]
fn typed_constructor_checks_ply_count_before_height() {
    let build = |plies: Vec<GlassPly>| {
        GlazingConfiguration::new(
            plies,
            InstallationLocation::Facade,
            -1.0,
            FramingSystem::FullyFramed,
            false,
            ThermalExposure::None,
            false,
        )
    };
    let annealed = GlassPly::new(GlassTreatment::Annealed, false);

    assert_eq!(
        build(Vec::new()).expect_err("no plies"),
        InvalidConfiguration::PlyCount { found: 0 }
    );
    assert_eq!(
        build(vec![annealed; 3]).expect_err("three plies"),
        InvalidConfiguration::PlyCount { found: 3 }
    );
    assert_eq!(
        build(vec![annealed; 2]).expect_err("negative height"),
        InvalidConfiguration::HeightOutOfRange { found: -1.0 }
    );
}

#[test]
fn height_must_be_finite_and_non_negative() {
    for height in [-0.01, f64::NAN, f64::INFINITY] {
        let mut invalid = submission(vec![annealed_ply()]);
        invalid.height_from_floor_m = Some(height);
        let err = invalid.validate().expect_err("height rejected");
        assert_eq!(err.field(), "height_from_floor_m");
    }

    let mut ground = submission(vec![annealed_ply()]);
    ground.height_from_floor_m = Some(0.0);
    assert!(ground.validate().is_ok());
}

#[test]
fn tempered_ply_requires_explicit_soak_status() {
    let err = submission(vec![
        annealed_ply(),
        PlySubmission::new(TreatmentKind::Tempered, true, None),
    ])
    .validate()
    .expect_err("soak status required");

    assert_eq!(
        err,
        InvalidConfiguration::UnknownSoakStatus {
            field: "plies[1].heat_soaked".to_string()
        }
    );
}

#[test]
fn soak_status_on_untempered_glass_is_ignored() {
    for heat_soaked in [None, Some(false), Some(true)] {
        let configuration = submission(vec![PlySubmission::new(
            TreatmentKind::HeatStrengthened,
            false,
            heat_soaked,
        )])
        .validate()
        .expect("heat-strengthened ply is valid");

        assert_eq!(configuration.outer().treatment, GlassTreatment::HeatStrengthened);
        assert_eq!(
            evaluate(&configuration).level_of(RiskCategory::SpontaneousBreakage),
            Some(RiskLevel::Low)
        );
    }
}

#[test]
fn submissions_deserialize_from_json() {
    let payload = r#"{
        "plies": [{ "treatment": "tempered", "heat_soaked": false }],
        "location": "overhead",
        "height_from_floor_m": 4.5,
        "framing": "point_supported",
        "pedestrian_access_below": true,
        "thermal_exposure": "both",
        "critical_use_area": false
    }"#;

    let submission: GlazingSubmission = serde_json::from_str(payload).expect("payload parses");
    let configuration = submission.validate().expect("payload is valid");

    assert_eq!(configuration.location(), InstallationLocation::Overhead);
    assert_eq!(configuration.framing(), FramingSystem::PointSupported);
    assert!(!configuration.outer().laminated);
}

#[test]
fn vocabulary_accepts_form_labels() {
    assert_eq!(
        "Low Level".parse::<InstallationLocation>(),
        Ok(InstallationLocation::LowLevel)
    );
    assert_eq!(
        "Balcony".parse::<InstallationLocation>(),
        Ok(InstallationLocation::Balustrade)
    );
    assert_eq!(
        "roof".parse::<InstallationLocation>(),
        Ok(InstallationLocation::Overhead)
    );
    assert_eq!(
        "Partial shading + coated/tinted".parse::<ThermalExposure>(),
        Ok(ThermalExposure::Both)
    );
    assert_eq!(
        "Interior use".parse::<ThermalExposure>(),
        Ok(ThermalExposure::None)
    );
    assert_eq!(
        "point-fixed".parse::<FramingSystem>(),
        Ok(FramingSystem::PointSupported)
    );
    assert_eq!(
        "Toughened".parse::<TreatmentKind>(),
        Ok(TreatmentKind::Tempered)
    );

    let err = "skylight-ish"
        .parse::<FramingSystem>()
        .expect_err("unknown framing");
    assert_eq!(err.field(), "framing");
}

#[test]
fn presets_parse_from_labels_and_keys() {
    for preset in GlassPreset::ALL {
        assert_eq!(preset.label().parse::<GlassPreset>(), Ok(preset));
        assert_eq!(preset.key().parse::<GlassPreset>(), Ok(preset));
    }
    assert_eq!(
        "Tempered (monolithic, unsoaked)".parse::<GlassPreset>(),
        Ok(GlassPreset::TemperedUnsoaked)
    );
    assert!("wired glass".parse::<GlassPreset>().is_err());
}

#[test]
fn laminated_tempered_preset_leaves_soak_status_to_caller() {
    let open = submission(vec![GlassPreset::LaminatedTempered.ply()]);
    let err = open.validate().expect_err("soak status required");
    assert_eq!(err.field(), "plies[0].heat_soaked");

    let stated = GlassPreset::LaminatedTempered
        .ply_with_soak(Some(true))
        .expect("open preset accepts a status");
    let stated = submission(vec![stated])
        .validate()
        .expect("soak status supplied");
    assert_eq!(
        *stated.outer(),
        GlassPly::new(GlassTreatment::Tempered { heat_soaked: true }, true)
    );
}

#[test]
fn fixed_soak_presets_reject_a_contradicting_status() {
    let agreeing = GlassPreset::TemperedUnsoaked
        .ply_with_soak(Some(false))
        .expect("matching status accepted");
    assert_eq!(agreeing.heat_soaked, Some(false));

    let err = GlassPreset::TemperedUnsoaked
        .ply_with_soak(Some(true))
        .expect_err("contradicting status rejected");
    assert_eq!(err.field(), "heat_soaked");
    assert_eq!(
        err.to_string(),
        "heat_soaked value 'true' contradicts Tempered (monolithic, unsoaked)"
    );

    let annealed = GlassPreset::AnnealedMonolithic
        .ply_with_soak(Some(true))
        .expect("non-tempered presets ignore the status");
    assert_eq!(annealed.treatment, Some(TreatmentKind::Annealed));
}
