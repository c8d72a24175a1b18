use crate::assessment::domain::{
    FramingSystem, GlassPly, GlassTreatment, GlazingConfiguration, InstallationLocation,
    ThermalExposure,
};
use crate::assessment::evaluation::{RiskEvaluator, RiskReport};

pub(super) fn annealed() -> GlassPly {
    GlassPly::new(GlassTreatment::Annealed, false)
}

pub(super) fn heat_strengthened() -> GlassPly {
    GlassPly::new(GlassTreatment::HeatStrengthened, false)
}

pub(super) fn tempered(heat_soaked: bool) -> GlassPly {
    GlassPly::new(GlassTreatment::Tempered { heat_soaked }, false)
}

pub(super) fn laminated(ply: GlassPly) -> GlassPly {
    GlassPly::new(ply.treatment, true)
}

/// Mutable description used to derive variants of a configuration in tests.
#[derive(Debug, Clone)]
pub(super) struct Fixture {
    pub(super) plies: Vec<GlassPly>,
    pub(super) location: InstallationLocation,
    pub(super) height_m: f64,
    pub(super) framing: FramingSystem,
    pub(super) pedestrian_access: bool,
    pub(super) thermal: ThermalExposure,
    pub(super) critical_use: bool,
}

impl Fixture {
    pub(super) fn build(&self) -> GlazingConfiguration {
        GlazingConfiguration::new(
            self.plies.clone(),
            self.location,
            self.height_m,
            self.framing,
            self.pedestrian_access,
            self.thermal,
            self.critical_use,
        )
        .expect("fixture is a valid configuration")
    }

    pub(super) fn evaluate(&self) -> RiskReport {
        RiskEvaluator::default().evaluate(&self.build())
    }
}

/// Facade glazing, 3 m up, fully framed, no access below, even exposure.
pub(super) fn fixture(plies: Vec<GlassPly>) -> Fixture {
    Fixture {
        plies,
        location: InstallationLocation::Facade,
        height_m: 3.0,
        framing: FramingSystem::FullyFramed,
        pedestrian_access: false,
        thermal: ThermalExposure::None,
        critical_use: false,
    }
}

pub(super) fn ply_options() -> Vec<GlassPly> {
    let treatments = [
        GlassTreatment::Annealed,
        GlassTreatment::HeatStrengthened,
        GlassTreatment::Tempered { heat_soaked: false },
        GlassTreatment::Tempered { heat_soaked: true },
    ];
    treatments
        .into_iter()
        .flat_map(|treatment| [false, true].map(|laminated| GlassPly::new(treatment, laminated)))
        .collect()
}

/// Every combination of the closed input domain, with heights straddling both thresholds.
pub(super) fn all_fixtures() -> Vec<Fixture> {
    let options = ply_options();
    let mut ply_sets: Vec<Vec<GlassPly>> = options.iter().map(|ply| vec![*ply]).collect();
    for outer in &options {
        for inner in &options {
            ply_sets.push(vec![*outer, *inner]);
        }
    }

    let mut fixtures = Vec::new();
    for plies in &ply_sets {
        for location in InstallationLocation::ALL {
            for height_m in [0.5, 1.0, 13.0, 13.01] {
                for framing in FramingSystem::ALL {
                    for pedestrian_access in [false, true] {
                        for thermal in ThermalExposure::ALL {
                            for critical_use in [false, true] {
                                fixtures.push(Fixture {
                                    plies: plies.clone(),
                                    location,
                                    height_m,
                                    framing,
                                    pedestrian_access,
                                    thermal,
                                    critical_use,
                                });
                            }
                        }
                    }
                }
            }
        }
    }
    fixtures
}
