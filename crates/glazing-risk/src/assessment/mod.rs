//! Glazing risk assessment: configuration intake, category rules and report aggregation.
//!
//! A [`GlazingSubmission`] collected from a form, the CLI or a batch file is
//! validated into an immutable [`GlazingConfiguration`]. [`RiskEvaluator`] then
//! rates five independent failure modes and reports the worst of them as the
//! overall level.

pub mod batch;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod presets;

#[cfg(test)]
mod tests;

pub use batch::{assess_path, assess_reader, BatchEntry, BatchError, BatchOutcome};
pub use domain::{
    FramingSystem, GlassPly, GlassTreatment, GlazingConfiguration, InstallationLocation,
    RiskCategory, RiskLevel, ThermalExposure,
};
pub use evaluation::{evaluate, EvaluationConfig, RiskEvaluator, RiskReport, RiskVerdict};
pub use intake::{GlazingSubmission, InvalidConfiguration, PlySubmission, TreatmentKind};
pub use presets::GlassPreset;
