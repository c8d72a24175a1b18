//! CSV batch scoring: one glazing configuration per row.
//!
//! Every column is optional in the header. A row that cannot be decoded or
//! fails validation is reported with its column or field and never aborts the
//! rest of the batch. Only I/O and header failures abort.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use super::evaluation::{RiskEvaluator, RiskReport};
use super::intake::{GlazingSubmission, InvalidConfiguration, PlySubmission, TreatmentKind};
use super::presets::GlassPreset;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("unable to open batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed batch CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Assessment result for a single CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    pub id: String,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Assessed { report: RiskReport },
    Rejected { field: String, message: String },
}

impl BatchOutcome {
    pub fn report(&self) -> Option<&RiskReport> {
        match self {
            BatchOutcome::Assessed { report } => Some(report),
            BatchOutcome::Rejected { .. } => None,
        }
    }
}

impl From<Result<RiskReport, InvalidConfiguration>> for BatchOutcome {
    fn from(result: Result<RiskReport, InvalidConfiguration>) -> Self {
        match result {
            Ok(report) => BatchOutcome::Assessed { report },
            Err(error) => BatchOutcome::Rejected {
                field: error.field().to_string(),
                message: error.to_string(),
            },
        }
    }
}

pub fn assess_path<P: AsRef<Path>>(
    path: P,
    evaluator: &RiskEvaluator,
) -> Result<Vec<BatchEntry>, BatchError> {
    let file = File::open(path.as_ref())?;
    assess_reader(file, evaluator)
}

pub fn assess_reader<R: Read>(
    reader: R,
    evaluator: &RiskEvaluator,
) -> Result<Vec<BatchEntry>, BatchError> {
    let rows = parse_rows(reader)?;

    let entries: Vec<BatchEntry> = rows
        .into_par_iter()
        .enumerate()
        .map(|(index, parsed)| {
            let row = index + 1;
            match parsed {
                Ok(glazing) => {
                    let id = glazing.id.clone().unwrap_or_else(|| format!("row-{row}"));
                    let outcome = glazing
                        .into_submission()
                        .and_then(GlazingSubmission::validate)
                        .map(|configuration| evaluator.evaluate(&configuration));
                    BatchEntry {
                        row,
                        id,
                        outcome: outcome.into(),
                    }
                }
                Err(outcome) => BatchEntry {
                    row,
                    id: format!("row-{row}"),
                    outcome,
                },
            }
        })
        .collect();

    let rejected = entries
        .iter()
        .filter(|entry| entry.outcome.report().is_none())
        .count();
    if rejected > 0 {
        warn!(rejected, total = entries.len(), "batch rows rejected");
    }
    info!(total = entries.len(), "batch assessment complete");

    Ok(entries)
}

/// Decode every record, keeping undecodable ones as rejections in place.
fn parse_rows<R: Read>(reader: R) -> Result<Vec<Result<GlazingRow, BatchOutcome>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<GlazingRow>() {
        match record {
            Ok(row) => rows.push(Ok(row)),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err),
            Err(err) => {
                warn!(row = rows.len() + 1, error = %err, "undecodable batch row");
                rows.push(Err(undecodable_row(&headers, &err)));
            }
        }
    }
    Ok(rows)
}

fn undecodable_row(headers: &csv::StringRecord, err: &csv::Error) -> BatchOutcome {
    let column = match err.kind() {
        csv::ErrorKind::Utf8 { err, .. } => Some(err.field()),
        csv::ErrorKind::Deserialize { err, .. } => err.field().map(|index| index as usize),
        _ => None,
    };

    BatchOutcome::Rejected {
        field: column
            .and_then(|index| headers.get(index))
            .unwrap_or("row")
            .to_string(),
        message: err.to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GlazingRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    outer_glass: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    outer_treatment: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    outer_laminated: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    outer_heat_soaked: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    inner_glass: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    inner_treatment: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    inner_laminated: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    inner_heat_soaked: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    height_m: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    framing: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pedestrian_access: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    thermal_exposure: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    critical_use: Option<String>,
}

impl GlazingRow {
    fn into_submission(self) -> Result<GlazingSubmission, InvalidConfiguration> {
        let mut plies = vec![ply_from_columns(
            "outer",
            self.outer_glass.as_deref(),
            self.outer_treatment.as_deref(),
            self.outer_laminated.as_deref(),
            self.outer_heat_soaked.as_deref(),
        )?
        .unwrap_or_default()];

        if let Some(inner) = ply_from_columns(
            "inner",
            self.inner_glass.as_deref(),
            self.inner_treatment.as_deref(),
            self.inner_laminated.as_deref(),
            self.inner_heat_soaked.as_deref(),
        )? {
            plies.push(inner);
        }

        let height_from_floor_m = self
            .height_m
            .as_deref()
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|_| InvalidConfiguration::unrecognised("height_m", raw))
            })
            .transpose()?;

        Ok(GlazingSubmission {
            plies,
            location: parse_column(self.location.as_deref(), "location")?,
            height_from_floor_m,
            framing: parse_column(self.framing.as_deref(), "framing")?,
            pedestrian_access_below: parse_flag(
                self.pedestrian_access.as_deref(),
                "pedestrian_access",
            )?,
            thermal_exposure: parse_column(self.thermal_exposure.as_deref(), "thermal_exposure")?,
            critical_use_area: parse_flag(self.critical_use.as_deref(), "critical_use")?,
        })
    }
}

/// A preset column fixes the ply; the other ply columns may only restate it.
fn ply_from_columns(
    side: &str,
    glass: Option<&str>,
    treatment_cell: Option<&str>,
    laminated_cell: Option<&str>,
    heat_soaked_cell: Option<&str>,
) -> Result<Option<PlySubmission>, InvalidConfiguration> {
    let heat_soaked = parse_flag(heat_soaked_cell, &format!("{side}_heat_soaked"))?;
    let treatment = parse_column::<TreatmentKind>(treatment_cell, &format!("{side}_treatment"))?;
    let laminated = parse_flag(laminated_cell, &format!("{side}_laminated"))?;

    let glass_column = format!("{side}_glass");
    if let Some(preset) = parse_column::<GlassPreset>(glass, &glass_column)? {
        let product = format!("{glass_column} '{}'", preset.label());
        let ply = preset.ply_with_soak(heat_soaked).map_err(|_| {
            InvalidConfiguration::conflicting(
                format!("{side}_heat_soaked"),
                heat_soaked_cell.unwrap_or_default(),
                &product,
            )
        })?;

        if treatment.is_some_and(|stated| Some(stated) != ply.treatment) {
            return Err(InvalidConfiguration::conflicting(
                format!("{side}_treatment"),
                treatment_cell.unwrap_or_default(),
                &product,
            ));
        }
        if laminated.is_some_and(|stated| stated != ply.laminated) {
            return Err(InvalidConfiguration::conflicting(
                format!("{side}_laminated"),
                laminated_cell.unwrap_or_default(),
                &product,
            ));
        }
        return Ok(Some(ply));
    }

    if treatment.is_none() && laminated.is_none() && heat_soaked.is_none() {
        return Ok(None);
    }

    Ok(Some(PlySubmission {
        treatment,
        laminated: laminated.unwrap_or(false),
        heat_soaked,
    }))
}

fn parse_column<T>(value: Option<&str>, column: &str) -> Result<Option<T>, InvalidConfiguration>
where
    T: FromStr<Err = InvalidConfiguration>,
{
    value
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| InvalidConfiguration::unrecognised(column, raw))
        })
        .transpose()
}

fn parse_flag(value: Option<&str>, column: &str) -> Result<Option<bool>, InvalidConfiguration> {
    value
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(true),
            "false" | "no" | "n" | "0" => Ok(false),
            _ => Err(InvalidConfiguration::unrecognised(column, raw)),
        })
        .transpose()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
