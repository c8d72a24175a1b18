use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::intake::{vocabulary_key, InvalidConfiguration, PlySubmission, TreatmentKind};

/// Named single-ply glass products offered by the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassPreset {
    AnnealedMonolithic,
    HeatStrengthenedMonolithic,
    TemperedUnsoaked,
    TemperedHeatSoaked,
    LaminatedAnnealed,
    LaminatedHeatStrengthened,
    LaminatedTempered,
}

impl GlassPreset {
    pub const ALL: [GlassPreset; 7] = [
        GlassPreset::AnnealedMonolithic,
        GlassPreset::HeatStrengthenedMonolithic,
        GlassPreset::TemperedUnsoaked,
        GlassPreset::TemperedHeatSoaked,
        GlassPreset::LaminatedAnnealed,
        GlassPreset::LaminatedHeatStrengthened,
        GlassPreset::LaminatedTempered,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GlassPreset::AnnealedMonolithic => "Annealed (monolithic)",
            GlassPreset::HeatStrengthenedMonolithic => "Heat-strengthened (monolithic)",
            GlassPreset::TemperedUnsoaked => "Tempered (monolithic, unsoaked)",
            GlassPreset::TemperedHeatSoaked => "Tempered (heat-soaked)",
            GlassPreset::LaminatedAnnealed => "Laminated Annealed",
            GlassPreset::LaminatedHeatStrengthened => "Laminated Heat-Strengthened",
            GlassPreset::LaminatedTempered => "Laminated Tempered",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GlassPreset::AnnealedMonolithic => "annealed",
            GlassPreset::HeatStrengthenedMonolithic => "heat-strengthened",
            GlassPreset::TemperedUnsoaked => "tempered-unsoaked",
            GlassPreset::TemperedHeatSoaked => "tempered-heat-soaked",
            GlassPreset::LaminatedAnnealed => "laminated-annealed",
            GlassPreset::LaminatedHeatStrengthened => "laminated-heat-strengthened",
            GlassPreset::LaminatedTempered => "laminated-tempered",
        }
    }

    /// Ply answers for this product. Laminated tempered glass is sold both
    /// soaked and unsoaked, so its heat-soak status is left for the caller.
    pub fn ply(&self) -> PlySubmission {
        match self {
            GlassPreset::AnnealedMonolithic => {
                PlySubmission::new(TreatmentKind::Annealed, false, None)
            }
            GlassPreset::HeatStrengthenedMonolithic => {
                PlySubmission::new(TreatmentKind::HeatStrengthened, false, None)
            }
            GlassPreset::TemperedUnsoaked => {
                PlySubmission::new(TreatmentKind::Tempered, false, Some(false))
            }
            GlassPreset::TemperedHeatSoaked => {
                PlySubmission::new(TreatmentKind::Tempered, false, Some(true))
            }
            GlassPreset::LaminatedAnnealed => {
                PlySubmission::new(TreatmentKind::Annealed, true, None)
            }
            GlassPreset::LaminatedHeatStrengthened => {
                PlySubmission::new(TreatmentKind::HeatStrengthened, true, None)
            }
            GlassPreset::LaminatedTempered => {
                PlySubmission::new(TreatmentKind::Tempered, true, None)
            }
        }
    }

    /// Ply answers with `heat_soaked` filled in when the preset leaves it open.
    ///
    /// A stated status that contradicts the preset's own is rejected on
    /// `heat_soaked`. Non-tempered presets ignore it.
    pub fn ply_with_soak(
        &self,
        heat_soaked: Option<bool>,
    ) -> Result<PlySubmission, InvalidConfiguration> {
        let mut ply = self.ply();
        if ply.treatment != Some(TreatmentKind::Tempered) {
            return Ok(ply);
        }

        match (ply.heat_soaked, heat_soaked) {
            (None, stated) => ply.heat_soaked = stated,
            (Some(fixed), Some(stated)) if fixed != stated => {
                return Err(InvalidConfiguration::conflicting(
                    "heat_soaked",
                    stated,
                    self.label(),
                ));
            }
            _ => {}
        }
        Ok(ply)
    }
}

impl fmt::Display for GlassPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GlassPreset {
    type Err = InvalidConfiguration;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = vocabulary_key(raw);
        GlassPreset::ALL
            .into_iter()
            .find(|preset| {
                vocabulary_key(preset.key()) == key || vocabulary_key(preset.label()) == key
            })
            .ok_or_else(|| InvalidConfiguration::unrecognised("glass", raw))
    }
}
