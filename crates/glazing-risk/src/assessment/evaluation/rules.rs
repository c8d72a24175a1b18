use super::super::domain::{
    FramingSystem, GlassPly, GlassTreatment, GlazingConfiguration, RiskCategory, RiskLevel,
    ThermalExposure,
};
use super::config::EvaluationConfig;
use super::RiskVerdict;

fn verdict(
    category: RiskCategory,
    level: RiskLevel,
    justification: impl Into<String>,
    mitigation: impl Into<String>,
) -> RiskVerdict {
    RiskVerdict {
        category,
        level,
        justification: justification.into(),
        mitigation: mitigation.into(),
    }
}

pub(crate) fn thermal_stress_level(outer: GlassTreatment, exposure: ThermalExposure) -> RiskLevel {
    match (outer, exposure) {
        (GlassTreatment::Tempered { .. }, _) => RiskLevel::Low,
        (GlassTreatment::HeatStrengthened, ThermalExposure::Both) => RiskLevel::Medium,
        (GlassTreatment::HeatStrengthened, _) => RiskLevel::Low,
        (GlassTreatment::Annealed, ThermalExposure::None) => RiskLevel::Low,
        (
            GlassTreatment::Annealed,
            ThermalExposure::CoatedOrTinted | ThermalExposure::PartialShading,
        ) => RiskLevel::Medium,
        (GlassTreatment::Annealed, ThermalExposure::Both) => RiskLevel::High,
    }
}

pub(crate) fn thermal_stress(outer: &GlassPly, exposure: ThermalExposure) -> RiskVerdict {
    let level = thermal_stress_level(outer.treatment, exposure);
    let category = RiskCategory::ThermalStress;

    match outer.treatment {
        GlassTreatment::Tempered { .. } => verdict(
            category,
            level,
            format!(
                "Toughened glass tolerates the temperature differentials caused by {}.",
                exposure.label()
            ),
            "No thermal measures required beyond standard edge quality checks.",
        ),
        GlassTreatment::HeatStrengthened if level > RiskLevel::Low => verdict(
            category,
            level,
            "Heat-strengthened glass tolerates moderate gradients, but coating combined with partial shading approaches its limit.",
            "Commission a thermal stress check for the coated, shaded zones.",
        ),
        GlassTreatment::HeatStrengthened => verdict(
            category,
            level,
            format!(
                "Heat-strengthened glass has ample thermal stress margin under {}.",
                exposure.label()
            ),
            "No special thermal measures required.",
        ),
        GlassTreatment::Annealed => match exposure {
            ThermalExposure::None => verdict(
                category,
                level,
                "Annealed glass under even exposure develops little edge-to-centre temperature gradient.",
                "Avoid retrofitting tinted films or fixed shading without a thermal check.",
            ),
            ThermalExposure::CoatedOrTinted | ThermalExposure::PartialShading => verdict(
                category,
                level,
                format!(
                    "Annealed glass with {} can crack from differential heating between the edge and the centre.",
                    exposure.label()
                ),
                "Specify heat-strengthened glass or commission a thermal stress assessment.",
            ),
            ThermalExposure::Both => verdict(
                category,
                level,
                "Coating combined with partial shading drives the steepest thermal gradients into the most sensitive glass type.",
                "Upgrade the outer ply to heat-strengthened or toughened glass.",
            ),
        },
    }
}

/// Edge support table keyed on the outer ply.
pub(crate) fn framing_level(outer: GlassTreatment, framing: FramingSystem) -> RiskLevel {
    match (framing, outer) {
        (_, GlassTreatment::Tempered { .. }) => RiskLevel::Low,
        (FramingSystem::FullyFramed, GlassTreatment::HeatStrengthened) => RiskLevel::Low,
        (FramingSystem::FullyFramed, GlassTreatment::Annealed) => RiskLevel::Medium,
        (FramingSystem::PartiallySupported, GlassTreatment::HeatStrengthened) => {
            RiskLevel::Medium
        }
        (FramingSystem::PartiallySupported, GlassTreatment::Annealed) => RiskLevel::High,
        (FramingSystem::PointSupported, _) => RiskLevel::High,
    }
}

/// Result of the human impact check for glazing close to floor level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImpactCheck {
    AboveImpactZone,
    Passed,
    Failed { side: &'static str },
}

impl ImpactCheck {
    pub(crate) fn level(&self) -> RiskLevel {
        match self {
            ImpactCheck::Failed { .. } => RiskLevel::High,
            ImpactCheck::AboveImpactZone | ImpactCheck::Passed => RiskLevel::Low,
        }
    }
}

pub(crate) fn low_level_impact(
    configuration: &GlazingConfiguration,
    thresholds: &EvaluationConfig,
) -> ImpactCheck {
    if configuration.height_from_floor_m() >= thresholds.low_level_impact_height_m {
        return ImpactCheck::AboveImpactZone;
    }

    if !configuration.outer().is_safety_glass() {
        return ImpactCheck::Failed { side: "outer" };
    }

    match configuration.inner() {
        Some(inner) if !inner.is_safety_glass() => ImpactCheck::Failed { side: "inner" },
        _ => ImpactCheck::Passed,
    }
}

pub(crate) fn structural_impact(
    configuration: &GlazingConfiguration,
    thresholds: &EvaluationConfig,
) -> RiskVerdict {
    let outer = configuration.outer();
    let framing = configuration.framing();
    let framing_risk = framing_level(outer.treatment, framing);
    let impact = low_level_impact(configuration, thresholds);
    let level = framing_risk.max(impact.level());

    let mut justification = match framing_risk {
        RiskLevel::Low => format!(
            "A {} outer ply is adequately supported when {}.",
            outer.describe(),
            framing.label()
        ),
        _ if framing == FramingSystem::PointSupported => format!(
            "Point-supported glazing concentrates stress at the fixings and needs a toughened outer ply; {} is not.",
            outer.describe()
        ),
        _ => format!(
            "A {} outer ply has limited wind and impact resistance when {}.",
            outer.describe(),
            framing.label()
        ),
    };
    let mut mitigation = match framing_risk {
        RiskLevel::Low => "Confirm pane thickness against the design wind load.".to_string(),
        _ => "Use a toughened outer ply or increase edge support.".to_string(),
    };

    match impact {
        ImpactCheck::Failed { side } => {
            justification.push_str(&format!(
                " The {side} ply is not safety glass although the glazing starts {:.2} m above floor level, inside the human impact zone.",
                configuration.height_from_floor_m()
            ));
            let impact_mitigation = format!(
                "Use toughened or laminated glass on both faces below {:.1} m.",
                thresholds.low_level_impact_height_m
            );
            if framing_risk < RiskLevel::High {
                mitigation = impact_mitigation;
            } else {
                mitigation.push(' ');
                mitigation.push_str(&impact_mitigation);
            }
        }
        ImpactCheck::Passed => {
            justification.push_str(" Both faces qualify as safety glass within the human impact zone.");
        }
        ImpactCheck::AboveImpactZone => {}
    }

    verdict(RiskCategory::StructuralImpact, level, justification, mitigation)
}

pub(crate) fn spontaneous_breakage(configuration: &GlazingConfiguration) -> RiskVerdict {
    let category = RiskCategory::SpontaneousBreakage;

    if !configuration.any_tempered() {
        return verdict(
            category,
            RiskLevel::Low,
            "Annealed and heat-strengthened glass are not at risk of nickel-sulfide spontaneous breakage.",
            "No special measures required for spontaneous breakage.",
        );
    }

    let untested = configuration.plies().any(GlassPly::untested_tempered);
    if !untested {
        return verdict(
            category,
            RiskLevel::Low,
            "Heat-soak testing eliminates most panes at risk of nickel-sulfide fracture.",
            "Verify heat-soak certification from the manufacturer.",
        );
    }

    if configuration.pedestrian_access_below() && configuration.outer().treatment.is_tempered() {
        verdict(
            category,
            RiskLevel::High,
            "Untested toughened glass carries a risk of nickel-sulfide inclusion breakage directly over people below.",
            "Specify heat-soak tested glass to EN 14179 or laminate the outer ply.",
        )
    } else {
        verdict(
            category,
            RiskLevel::Medium,
            "Untested toughened glass carries a residual risk of nickel-sulfide inclusion breakage.",
            "Use heat-soaked glass where replacement access or occupancy makes breakage costly.",
        )
    }
}

pub(crate) fn fragmentation_hazard(
    configuration: &GlazingConfiguration,
    thresholds: &EvaluationConfig,
) -> RiskVerdict {
    let category = RiskCategory::FragmentationHazard;
    let outer = configuration.outer();

    if !configuration.pedestrian_access_below() {
        return verdict(
            category,
            RiskLevel::Low,
            "There is no pedestrian access below, so falling fragments do not reach people.",
            "Keep the area below restricted if access arrangements change.",
        );
    }

    if outer.laminated {
        return verdict(
            category,
            RiskLevel::Low,
            "The interlayer retains fragments of the outer ply after breakage.",
            "Verify interlayer thickness and edge cover.",
        );
    }

    match outer.treatment {
        GlassTreatment::Tempered { .. }
            if configuration.height_from_floor_m() > thresholds.fragmentation_height_m =>
        {
            verdict(
                category,
                RiskLevel::High,
                format!(
                    "Toughened glass breaks into small dense granules that become dangerous when falling from {:.2} m.",
                    configuration.height_from_floor_m()
                ),
                "Laminate the outer ply or provide protective screening below.",
            )
        }
        GlassTreatment::Tempered { .. } => verdict(
            category,
            RiskLevel::Medium,
            "Toughened glass breaks into many small granules that may fall uncontrolled onto people below.",
            "Use laminated toughened glass or protective screening below.",
        ),
        GlassTreatment::Annealed | GlassTreatment::HeatStrengthened => verdict(
            category,
            RiskLevel::High,
            "Annealed and heat-strengthened glass break into large, sharp shards that can fall onto people below.",
            "Use laminated safety glazing over accessible areas.",
        ),
    }
}

pub(crate) fn post_breakage_containment(configuration: &GlazingConfiguration) -> RiskVerdict {
    let category = RiskCategory::PostBreakageContainment;

    if configuration.any_laminated() {
        return verdict(
            category,
            RiskLevel::Low,
            "Broken glass is retained by the interlayer.",
            "Verify proper edge support and interlayer thickness.",
        );
    }

    match configuration.framing() {
        FramingSystem::FullyFramed if configuration.outer().treatment.is_tempered() => verdict(
            category,
            RiskLevel::High,
            "Toughened glass fractures into granules that the frame cannot hold.",
            "Use laminated toughened glass so the broken pane stays in the opening.",
        ),
        FramingSystem::FullyFramed => verdict(
            category,
            RiskLevel::Medium,
            "A full frame holds cracked annealed or heat-strengthened glass in place, but loose shards can still fall.",
            "Ensure the glass is fully captured with adequate edge cover, or laminate.",
        ),
        framing @ (FramingSystem::PartiallySupported | FramingSystem::PointSupported) => verdict(
            category,
            RiskLevel::High,
            format!(
                "Unlaminated glass that is {} has no retention once broken.",
                framing.label()
            ),
            "Use laminated glass or add a secondary retention system.",
        ),
    }
}
