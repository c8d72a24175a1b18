use serde::{Deserialize, Serialize};

pub const DEFAULT_LOW_LEVEL_IMPACT_HEIGHT_M: f64 = 1.0;
pub const DEFAULT_FRAGMENTATION_HEIGHT_M: f64 = 13.0;

/// Height thresholds consulted by the category rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Glazing whose base sits below this height lies in the human impact zone.
    pub low_level_impact_height_m: f64,
    /// Falling toughened granules become hazardous strictly above this height.
    pub fragmentation_height_m: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            low_level_impact_height_m: DEFAULT_LOW_LEVEL_IMPACT_HEIGHT_M,
            fragmentation_height_m: DEFAULT_FRAGMENTATION_HEIGHT_M,
        }
    }
}
