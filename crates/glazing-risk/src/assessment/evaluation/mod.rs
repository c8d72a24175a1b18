mod config;
mod policy;
pub(crate) mod rules;

pub use config::{
    EvaluationConfig, DEFAULT_FRAGMENTATION_HEIGHT_M, DEFAULT_LOW_LEVEL_IMPACT_HEIGHT_M,
};

use super::domain::{GlazingConfiguration, RiskCategory, RiskLevel};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

/// Stateless evaluator that runs every category rule against a configuration.
#[derive(Debug, Clone, Default)]
pub struct RiskEvaluator {
    config: EvaluationConfig,
}

impl RiskEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn evaluate(&self, configuration: &GlazingConfiguration) -> RiskReport {
        let verdicts: Vec<RiskVerdict> = RiskCategory::ALL
            .iter()
            .map(|category| self.assess(*category, configuration))
            .map(|verdict| policy::apply_critical_use(verdict, configuration.critical_use_area()))
            .collect();

        for verdict in &verdicts {
            trace!(category = ?verdict.category, risk = %verdict.level, "category assessed");
        }

        let overall = policy::overall_level(&verdicts);
        debug!(%overall, location = ?configuration.location(), "glazing configuration evaluated");

        RiskReport { verdicts, overall }
    }

    /// Evaluate independent configurations in parallel, preserving input order.
    pub fn evaluate_all(&self, configurations: &[GlazingConfiguration]) -> Vec<RiskReport> {
        configurations
            .par_iter()
            .map(|configuration| self.evaluate(configuration))
            .collect()
    }

    fn assess(&self, category: RiskCategory, configuration: &GlazingConfiguration) -> RiskVerdict {
        match category {
            RiskCategory::ThermalStress => {
                rules::thermal_stress(configuration.outer(), configuration.thermal_exposure())
            }
            RiskCategory::StructuralImpact => policy::location_override(configuration)
                .unwrap_or_else(|| rules::structural_impact(configuration, &self.config)),
            RiskCategory::SpontaneousBreakage => rules::spontaneous_breakage(configuration),
            RiskCategory::FragmentationHazard => {
                rules::fragmentation_hazard(configuration, &self.config)
            }
            RiskCategory::PostBreakageContainment => {
                rules::post_breakage_containment(configuration)
            }
        }
    }
}

/// Evaluate with the default thresholds.
pub fn evaluate(configuration: &GlazingConfiguration) -> RiskReport {
    RiskEvaluator::default().evaluate(configuration)
}

/// One category's rating with the reasoning shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskVerdict {
    pub category: RiskCategory,
    pub level: RiskLevel,
    pub justification: String,
    pub mitigation: String,
}

/// Complete evaluation output: one verdict per category plus the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskReport {
    verdicts: Vec<RiskVerdict>,
    overall: RiskLevel,
}

impl RiskReport {
    pub fn verdicts(&self) -> &[RiskVerdict] {
        &self.verdicts
    }

    pub fn overall(&self) -> RiskLevel {
        self.overall
    }

    pub fn verdict(&self, category: RiskCategory) -> Option<&RiskVerdict> {
        self.verdicts
            .iter()
            .find(|verdict| verdict.category == category)
    }

    pub fn level_of(&self, category: RiskCategory) -> Option<RiskLevel> {
        self.verdict(category).map(|verdict| verdict.level)
    }

    /// Categories rated at the overall level.
    pub fn driving_categories(&self) -> Vec<RiskCategory> {
        self.verdicts
            .iter()
            .filter(|verdict| verdict.level == self.overall)
            .map(|verdict| verdict.category)
            .collect()
    }

    pub fn summary(&self) -> String {
        if self.overall == RiskLevel::Low {
            return "overall risk Low across all categories".to_string();
        }

        let drivers: Vec<&str> = self
            .driving_categories()
            .iter()
            .map(|category| category.title())
            .collect();
        format!("overall risk {} driven by {}", self.overall, drivers.join(", "))
    }
}
