use crate::render::{render_batch, render_report};
use clap::{Args, ValueEnum};
use glazing_risk::assessment::{
    assess_path, FramingSystem, GlassPreset, GlazingSubmission, InstallationLocation,
    InvalidConfiguration, PlySubmission, RiskEvaluator, ThermalExposure, TreatmentKind,
};
use glazing_risk::error::AppError;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Outer ply product, e.g. "laminated-tempered" or "Annealed (monolithic)"
    #[arg(long, conflicts_with = "treatment")]
    pub(crate) glass: Option<GlassPreset>,
    /// Outer ply treatment when no product is given (annealed, heat-strengthened, tempered)
    #[arg(long)]
    pub(crate) treatment: Option<TreatmentKind>,
    /// Outer ply is laminated (only with --treatment)
    #[arg(long, requires = "treatment")]
    pub(crate) laminated: bool,
    /// Optional inner ply product of an insulated unit
    #[arg(long)]
    pub(crate) inner_glass: Option<GlassPreset>,
    /// Heat-soak status for tempered plies whose product does not state it
    #[arg(long)]
    pub(crate) heat_soaked: Option<bool>,
    /// Installation location (facade, overhead, balustrade, low-level)
    #[arg(long)]
    pub(crate) location: InstallationLocation,
    /// Height of the glazing above finished floor level, in metres
    #[arg(long = "height")]
    pub(crate) height_m: f64,
    /// Edge support (fully-framed, partially-supported, point-supported)
    #[arg(long)]
    pub(crate) framing: FramingSystem,
    /// People can walk beneath or beside the glazing
    #[arg(long)]
    pub(crate) pedestrian_access: bool,
    /// Thermal exposure (none, coated-or-tinted, partial-shading, both)
    #[arg(long, default_value = "none")]
    pub(crate) thermal_exposure: ThermalExposure,
    /// Breakage would put people at risk
    #[arg(long)]
    pub(crate) critical_use: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

impl AssessArgs {
    pub(crate) fn submission(&self) -> Result<GlazingSubmission, InvalidConfiguration> {
        let outer = match (self.glass, self.treatment) {
            (Some(preset), _) => preset.ply_with_soak(self.heat_soaked)?,
            (None, Some(treatment)) => {
                PlySubmission::new(treatment, self.laminated, self.heat_soaked)
            }
            (None, None) => PlySubmission::default(),
        };

        let mut plies = vec![outer];
        if let Some(inner) = self.inner_glass {
            plies.push(inner.ply_with_soak(self.heat_soaked)?);
        }

        Ok(GlazingSubmission {
            plies,
            location: Some(self.location),
            height_from_floor_m: Some(self.height_m),
            framing: Some(self.framing),
            pedestrian_access_below: Some(self.pedestrian_access),
            thermal_exposure: Some(self.thermal_exposure),
            critical_use_area: Some(self.critical_use),
        })
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one glazing configuration per row
    pub(crate) path: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_assessment(
    args: AssessArgs,
    evaluator: &RiskEvaluator,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let configuration = args.submission()?.validate()?;
    let report = evaluator.evaluate(&configuration);
    debug!(overall = %report.overall(), "assessment complete");

    match args.format {
        OutputFormat::Text => render_report(out, &configuration, &report)?,
        OutputFormat::Json => {
            let payload = json!({
                "configuration": configuration,
                "report": report,
            });
            serde_json::to_writer_pretty(&mut *out, &payload)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

pub(crate) fn run_batch(
    args: BatchArgs,
    evaluator: &RiskEvaluator,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let entries = assess_path(&args.path, evaluator)?;

    match args.format {
        OutputFormat::Text => render_batch(out, &entries)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
