//! # Engine Settings
//!
//! Knobs that are not part of the structure description but change results:
//! the `Ai` line coefficient and the tolerable risk values. Stored with each
//! assessment so a saved file always reproduces the same numbers.

use serde::{Deserialize, Serialize};

use crate::compliance::TolerableRisk;
use crate::equations::DEFAULT_INDUCED_AREA_FACTOR;
use crate::errors::{ensure_positive, CalcResult};

/// Settings applied to every risk evaluation of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// `Ai` per metre of line length (`Ai = k·Ll`).
    ///
    /// Sources disagree between 100 and 4000; confirm against the edition of
    /// IEC 62305-2 the assessment is made to.
    pub induced_area_factor: f64,

    /// Tolerable risk values used for compliance checks
    pub tolerable: TolerableRisk,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            induced_area_factor: DEFAULT_INDUCED_AREA_FACTOR,
            tolerable: TolerableRisk::default(),
        }
    }
}

impl EngineSettings {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("settings.induced_area_factor", self.induced_area_factor)?;
        self.tolerable.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.induced_area_factor, 4000.0);
        assert_eq!(settings.tolerable.r1, 1e-5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings: EngineSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_invalid_factor() {
        let settings = EngineSettings {
            induced_area_factor: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
