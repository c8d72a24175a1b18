use std::fmt;

use serde::{Deserialize, Serialize};

/// Thermal treatment applied to a single glass ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlassTreatment {
    Annealed,
    HeatStrengthened,
    /// Fully tempered (toughened) glass. `heat_soaked` records whether the pane
    /// passed heat-soak testing for nickel-sulfide inclusions.
    Tempered { heat_soaked: bool },
}

impl GlassTreatment {
    pub fn is_tempered(&self) -> bool {
        matches!(self, GlassTreatment::Tempered { .. })
    }

    pub fn is_annealed(&self) -> bool {
        matches!(self, GlassTreatment::Annealed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlassTreatment::Annealed => "annealed",
            GlassTreatment::HeatStrengthened => "heat-strengthened",
            GlassTreatment::Tempered { heat_soaked: true } => "tempered (heat-soaked)",
            GlassTreatment::Tempered { heat_soaked: false } => "tempered (untested)",
        }
    }
}

/// One leaf of glazing within the installed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlassPly {
    pub treatment: GlassTreatment,
    pub laminated: bool,
}

impl GlassPly {
    pub fn new(treatment: GlassTreatment, laminated: bool) -> Self {
        Self {
            treatment,
            laminated,
        }
    }

    /// Toughened or laminated glass counts as safety glazing for human impact.
    pub fn is_safety_glass(&self) -> bool {
        self.laminated || self.treatment.is_tempered()
    }

    pub fn untested_tempered(&self) -> bool {
        matches!(
            self.treatment,
            GlassTreatment::Tempered { heat_soaked: false }
        )
    }

    pub fn describe(&self) -> String {
        if self.laminated {
            format!("laminated {}", self.treatment.label())
        } else {
            format!("monolithic {}", self.treatment.label())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationLocation {
    Facade,
    /// Roof lights, canopies and other sloped or horizontal glazing.
    Overhead,
    /// Balustrades and balcony infill panels.
    Balustrade,
    LowLevel,
}

impl InstallationLocation {
    pub const ALL: [InstallationLocation; 4] = [
        InstallationLocation::Facade,
        InstallationLocation::Overhead,
        InstallationLocation::Balustrade,
        InstallationLocation::LowLevel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InstallationLocation::Facade => "Facade",
            InstallationLocation::Overhead => "Overhead",
            InstallationLocation::Balustrade => "Balcony",
            InstallationLocation::LowLevel => "Low Level",
        }
    }

    /// Locations where building codes prohibit unprotected annealed glass outright.
    pub fn is_code_restricted(&self) -> bool {
        matches!(
            self,
            InstallationLocation::Overhead | InstallationLocation::Balustrade
        )
    }
}

/// Edge support arrangement, listed strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingSystem {
    FullyFramed,
    PartiallySupported,
    PointSupported,
}

impl FramingSystem {
    pub const ALL: [FramingSystem; 3] = [
        FramingSystem::FullyFramed,
        FramingSystem::PartiallySupported,
        FramingSystem::PointSupported,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FramingSystem::FullyFramed => "fully framed",
            FramingSystem::PartiallySupported => "partially supported",
            FramingSystem::PointSupported => "point supported",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalExposure {
    None,
    CoatedOrTinted,
    PartialShading,
    Both,
}

impl ThermalExposure {
    pub const ALL: [ThermalExposure; 4] = [
        ThermalExposure::None,
        ThermalExposure::CoatedOrTinted,
        ThermalExposure::PartialShading,
        ThermalExposure::Both,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ThermalExposure::None => "even exposure",
            ThermalExposure::CoatedOrTinted => "coated/tinted",
            ThermalExposure::PartialShading => "partial shading",
            ThermalExposure::Both => "partial shading + coated/tinted",
        }
    }
}

/// Validated, immutable description of one glazing installation.
///
/// Only [`GlazingConfiguration::new`] and the submission factory construct
/// values, so every instance satisfies the ply, height and heat-soak invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlazingConfiguration {
    outer: GlassPly,
    inner: Option<GlassPly>,
    location: InstallationLocation,
    height_from_floor_m: f64,
    framing: FramingSystem,
    pedestrian_access_below: bool,
    thermal_exposure: ThermalExposure,
    critical_use_area: bool,
}

impl GlazingConfiguration {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_validated(
        outer: GlassPly,
        inner: Option<GlassPly>,
        location: InstallationLocation,
        height_from_floor_m: f64,
        framing: FramingSystem,
        pedestrian_access_below: bool,
        thermal_exposure: ThermalExposure,
        critical_use_area: bool,
    ) -> Self {
        Self {
            outer,
            inner,
            location,
            height_from_floor_m,
            framing,
            pedestrian_access_below,
            thermal_exposure,
            critical_use_area,
        }
    }

    pub fn outer(&self) -> &GlassPly {
        &self.outer
    }

    pub fn inner(&self) -> Option<&GlassPly> {
        self.inner.as_ref()
    }

    /// Plies in installed order, outer first.
    pub fn plies(&self) -> impl Iterator<Item = &GlassPly> {
        std::iter::once(&self.outer).chain(self.inner.as_ref())
    }

    pub fn location(&self) -> InstallationLocation {
        self.location
    }

    pub fn height_from_floor_m(&self) -> f64 {
        self.height_from_floor_m
    }

    pub fn framing(&self) -> FramingSystem {
        self.framing
    }

    pub fn pedestrian_access_below(&self) -> bool {
        self.pedestrian_access_below
    }

    pub fn thermal_exposure(&self) -> ThermalExposure {
        self.thermal_exposure
    }

    pub fn critical_use_area(&self) -> bool {
        self.critical_use_area
    }

    pub fn any_laminated(&self) -> bool {
        self.plies().any(|ply| ply.laminated)
    }

    pub fn any_tempered(&self) -> bool {
        self.plies().any(|ply| ply.treatment.is_tempered())
    }
}

/// Discrete risk rating. Variants are declared in ascending severity so the
/// derived ordering is the aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✅",
            RiskLevel::Medium => "⚠️",
            RiskLevel::High | RiskLevel::VeryHigh => "🚩",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Independent failure modes assessed for every configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    ThermalStress,
    StructuralImpact,
    SpontaneousBreakage,
    FragmentationHazard,
    PostBreakageContainment,
}

impl RiskCategory {
    /// Report order.
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::ThermalStress,
        RiskCategory::StructuralImpact,
        RiskCategory::SpontaneousBreakage,
        RiskCategory::FragmentationHazard,
        RiskCategory::PostBreakageContainment,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RiskCategory::ThermalStress => "Thermal Stress",
            RiskCategory::StructuralImpact => "Structural / Impact Resistance",
            RiskCategory::SpontaneousBreakage => "Spontaneous Breakage",
            RiskCategory::FragmentationHazard => "Fragmentation Hazard",
            RiskCategory::PostBreakageContainment => "Post-Breakage Containment",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
