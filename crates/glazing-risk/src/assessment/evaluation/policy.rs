use super::super::domain::{GlazingConfiguration, RiskCategory, RiskLevel};
use super::RiskVerdict;

const CRITICAL_USE_ADVISORY: &str =
    "Critical use area: resolve before sign-off rather than accepting the residual risk.";

/// Overhead and balustrade glazing is governed by absolute code prohibitions,
/// so the graduated structural verdict is replaced outright.
pub(crate) fn location_override(configuration: &GlazingConfiguration) -> Option<RiskVerdict> {
    let location = configuration.location();
    if !location.is_code_restricted() {
        return None;
    }

    let verdict = if configuration
        .plies()
        .any(|ply| ply.treatment.is_annealed())
    {
        RiskVerdict {
            category: RiskCategory::StructuralImpact,
            level: RiskLevel::VeryHigh,
            justification: format!(
                "{} glazing containing annealed glass is prohibited regardless of framing or height.",
                location.label()
            ),
            mitigation: "Replace annealed plies with toughened or heat-strengthened glass, laminated where people are below.".to_string(),
        }
    } else {
        RiskVerdict {
            category: RiskCategory::StructuralImpact,
            level: RiskLevel::Low,
            justification: format!(
                "{} glazing uses treated glass throughout, meeting the code requirement for this location.",
                location.label()
            ),
            mitigation: format!(
                "Confirm the glass is certified and marked for {} use.",
                location.label().to_lowercase()
            ),
        }
    };

    Some(verdict)
}

/// Critical-use areas never change a rating; they sharpen the mitigation on
/// failure modes that put people at risk.
pub(crate) fn apply_critical_use(mut verdict: RiskVerdict, critical_use_area: bool) -> RiskVerdict {
    let people_facing = matches!(
        verdict.category,
        RiskCategory::SpontaneousBreakage
            | RiskCategory::FragmentationHazard
            | RiskCategory::PostBreakageContainment
    );

    if critical_use_area && people_facing && verdict.level >= RiskLevel::High {
        verdict.mitigation.push(' ');
        verdict.mitigation.push_str(CRITICAL_USE_ADVISORY);
    }

    verdict
}

/// Worst case wins: any single failure mode is enough to make the installation unacceptable.
pub(crate) fn overall_level(verdicts: &[RiskVerdict]) -> RiskLevel {
    verdicts
        .iter()
        .map(|verdict| verdict.level)
        .max()
        .unwrap_or(RiskLevel::Low)
}
