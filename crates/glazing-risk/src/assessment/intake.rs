use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    FramingSystem, GlassPly, GlassTreatment, GlazingConfiguration, InstallationLocation,
    ThermalExposure,
};

/// Validation errors raised while building a [`GlazingConfiguration`].
///
/// Every variant names the offending field so callers can re-prompt for it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidConfiguration {
    #[error("{field} is required")]
    MissingField { field: String },
    #[error("plies must contain one or two plies (found {found})")]
    PlyCount { found: usize },
    #[error("height_from_floor_m must be a finite value of at least 0 m (found {found})")]
    HeightOutOfRange { found: f64 },
    #[error("{field} must state whether the tempered ply was heat-soak tested")]
    UnknownSoakStatus { field: String },
    #[error("{field} has unrecognised value '{value}'")]
    UnrecognisedValue { field: String, value: String },
    #[error("{field} value '{value}' contradicts {conflicts_with}")]
    ConflictingValue {
        field: String,
        value: String,
        conflicts_with: String,
    },
}

impl InvalidConfiguration {
    pub fn field(&self) -> &str {
        match self {
            InvalidConfiguration::MissingField { field }
            | InvalidConfiguration::UnknownSoakStatus { field }
            | InvalidConfiguration::UnrecognisedValue { field, .. }
            | InvalidConfiguration::ConflictingValue { field, .. } => field,
            InvalidConfiguration::PlyCount { .. } => "plies",
            InvalidConfiguration::HeightOutOfRange { .. } => "height_from_floor_m",
        }
    }

    fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn unrecognised(field: impl Into<String>, value: &str) -> Self {
        Self::UnrecognisedValue {
            field: field.into(),
            value: value.to_string(),
        }
    }

    pub(crate) fn conflicting(
        field: impl Into<String>,
        value: impl ToString,
        conflicts_with: impl Into<String>,
    ) -> Self {
        Self::ConflictingValue {
            field: field.into(),
            value: value.to_string(),
            conflicts_with: conflicts_with.into(),
        }
    }
}

/// Treatment as collected from a form, before the heat-soak question is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentKind {
    Annealed,
    HeatStrengthened,
    Tempered,
}

/// Raw ply answers. `heat_soaked` is only consulted for tempered glass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlySubmission {
    #[serde(default)]
    pub treatment: Option<TreatmentKind>,
    #[serde(default)]
    pub laminated: bool,
    #[serde(default)]
    pub heat_soaked: Option<bool>,
}

impl PlySubmission {
    pub fn new(treatment: TreatmentKind, laminated: bool, heat_soaked: Option<bool>) -> Self {
        Self {
            treatment: Some(treatment),
            laminated,
            heat_soaked,
        }
    }

    fn validate(self, index: usize) -> Result<GlassPly, InvalidConfiguration> {
        let treatment = self
            .treatment
            .ok_or_else(|| InvalidConfiguration::missing(format!("plies[{index}].treatment")))?;

        if treatment != TreatmentKind::Tempered && self.heat_soaked.is_some() {
            debug!(ply = index, "ignoring heat-soak status on non-tempered ply");
        }

        let treatment = match treatment {
            TreatmentKind::Annealed => GlassTreatment::Annealed,
            TreatmentKind::HeatStrengthened => GlassTreatment::HeatStrengthened,
            TreatmentKind::Tempered => GlassTreatment::Tempered {
                heat_soaked: self.heat_soaked.ok_or_else(|| {
                    InvalidConfiguration::UnknownSoakStatus {
                        field: format!("plies[{index}].heat_soaked"),
                    }
                })?,
            },
        };

        Ok(GlassPly::new(treatment, self.laminated))
    }
}

/// Unvalidated glazing answers as supplied by a form, CLI or batch file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlazingSubmission {
    #[serde(default)]
    pub plies: Vec<PlySubmission>,
    #[serde(default)]
    pub location: Option<InstallationLocation>,
    #[serde(default)]
    pub height_from_floor_m: Option<f64>,
    #[serde(default)]
    pub framing: Option<FramingSystem>,
    #[serde(default)]
    pub pedestrian_access_below: Option<bool>,
    #[serde(default)]
    pub thermal_exposure: Option<ThermalExposure>,
    #[serde(default)]
    pub critical_use_area: Option<bool>,
}

impl GlazingSubmission {
    /// Validate the answers into an immutable configuration.
    pub fn validate(self) -> Result<GlazingConfiguration, InvalidConfiguration> {
        let plies = self
            .plies
            .into_iter()
            .enumerate()
            .map(|(index, ply)| ply.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        GlazingConfiguration::new(
            plies,
            self.location
                .ok_or_else(|| InvalidConfiguration::missing("location"))?,
            self.height_from_floor_m
                .ok_or_else(|| InvalidConfiguration::missing("height_from_floor_m"))?,
            self.framing
                .ok_or_else(|| InvalidConfiguration::missing("framing"))?,
            self.pedestrian_access_below
                .ok_or_else(|| InvalidConfiguration::missing("pedestrian_access_below"))?,
            self.thermal_exposure
                .ok_or_else(|| InvalidConfiguration::missing("thermal_exposure"))?,
            self.critical_use_area
                .ok_or_else(|| InvalidConfiguration::missing("critical_use_area"))?,
        )
    }
}

impl TryFrom<GlazingSubmission> for GlazingConfiguration {
    type Error = InvalidConfiguration;

    fn try_from(submission: GlazingSubmission) -> Result<Self, Self::Error> {
        submission.validate()
    }
}

impl GlazingConfiguration {
    /// Build a configuration from already-typed plies, enforcing ply count and height.
    pub fn new(
        plies: Vec<GlassPly>,
        location: InstallationLocation,
        height_from_floor_m: f64,
        framing: FramingSystem,
        pedestrian_access_below: bool,
        thermal_exposure: ThermalExposure,
        critical_use_area: bool,
    ) -> Result<Self, InvalidConfiguration> {
        let found = plies.len();
        let mut plies = plies.into_iter();
        let (Some(outer), inner, None) = (plies.next(), plies.next(), plies.next()) else {
            return Err(InvalidConfiguration::PlyCount { found });
        };

        if !height_from_floor_m.is_finite() || height_from_floor_m < 0.0 {
            return Err(InvalidConfiguration::HeightOutOfRange {
                found: height_from_floor_m,
            });
        }

        Ok(Self::from_validated(
            outer,
            inner,
            location,
            height_from_floor_m,
            framing,
            pedestrian_access_below,
            thermal_exposure,
            critical_use_area,
        ))
    }
}

/// Lowercase alphanumeric key so "Low Level", "low_level" and "low-level" compare equal.
pub(crate) fn vocabulary_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

impl FromStr for TreatmentKind {
    type Err = InvalidConfiguration;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match vocabulary_key(raw).as_str() {
            "annealed" | "float" => Ok(Self::Annealed),
            "heatstrengthened" | "hs" => Ok(Self::HeatStrengthened),
            "tempered" | "toughened" | "fullytempered" => Ok(Self::Tempered),
            _ => Err(InvalidConfiguration::unrecognised("treatment", raw)),
        }
    }
}

impl FromStr for InstallationLocation {
    type Err = InvalidConfiguration;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match vocabulary_key(raw).as_str() {
            "facade" | "wall" => Ok(Self::Facade),
            "overhead" | "roof" | "rooflight" | "canopy" => Ok(Self::Overhead),
            "balustrade" | "balcony" => Ok(Self::Balustrade),
            "lowlevel" | "low" => Ok(Self::LowLevel),
            _ => Err(InvalidConfiguration::unrecognised("location", raw)),
        }
    }
}

impl FromStr for FramingSystem {
    type Err = InvalidConfiguration;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match vocabulary_key(raw).as_str() {
            "fullyframed" | "framed" | "full" => Ok(Self::FullyFramed),
            "partiallysupported" | "partial" | "twosided" => Ok(Self::PartiallySupported),
            "pointsupported" | "point" | "pointfixed" => Ok(Self::PointSupported),
            _ => Err(InvalidConfiguration::unrecognised("framing", raw)),
        }
    }
}

impl FromStr for ThermalExposure {
    type Err = InvalidConfiguration;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match vocabulary_key(raw).as_str() {
            "none" | "evenexposure" | "even" | "interioruse" | "interior" => Ok(Self::None),
            "coatedortinted" | "coatedtinted" | "coated" | "tinted" => Ok(Self::CoatedOrTinted),
            "partialshading" | "shading" => Ok(Self::PartialShading),
            "both" | "partialshadingcoatedtinted" | "partialshadingcoatedortinted" => {
                Ok(Self::Both)
            }
            _ => Err(InvalidConfiguration::unrecognised("thermal_exposure", raw)),
        }
    }
}
