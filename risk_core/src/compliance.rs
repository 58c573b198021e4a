//! # Tolerable Risk
//!
//! A structure needs (further) protection when a computed risk exceeds the
//! tolerable value `RT` for that type of loss.
//!
//! | Risk | Loss                      | RT (per year) |
//! |------|---------------------------|---------------|
//! | R1   | Human life or injury      | 10⁻⁵          |
//! | R2   | Public service            | 10⁻³          |
//! | R3   | Cultural heritage         | 10⁻⁴          |
//! | R4   | Economic value            | none - see [`economics`](crate::economics) |
//!
//! ## Example
//!
//! ```rust
//! use risk_core::compliance::TolerableRisk;
//! use risk_core::calculations::RiskKind;
//!
//! let check = TolerableRisk::default().check(RiskKind::R1, 3.2e-6);
//! assert_eq!(check.passes, Some(true));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::RiskKind;
use crate::errors::{ensure_positive, CalcResult};

/// Tolerable values RT, per risk type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TolerableRisk {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    /// No value in the standard; set one to check R4 like the others
    pub r4: Option<f64>,
}

impl Default for TolerableRisk {
    fn default() -> Self {
        TolerableRisk {
            r1: 1e-5,
            r2: 1e-3,
            r3: 1e-4,
            r4: None,
        }
    }
}

impl TolerableRisk {
    /// RT for a risk type, if one is defined
    pub fn limit(&self, risk: RiskKind) -> Option<f64> {
        match risk {
            RiskKind::R1 => Some(self.r1),
            RiskKind::R2 => Some(self.r2),
            RiskKind::R3 => Some(self.r3),
            RiskKind::R4 => self.r4,
        }
    }

    /// Compare a computed total against RT
    pub fn check(&self, risk: RiskKind, total: f64) -> ComplianceCheck {
        let tolerable = self.limit(risk);
        ComplianceCheck {
            risk,
            total,
            tolerable,
            passes: tolerable.map(|rt| total <= rt),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("settings.tolerable.r1", self.r1)?;
        ensure_positive("settings.tolerable.r2", self.r2)?;
        ensure_positive("settings.tolerable.r3", self.r3)?;
        if let Some(r4) = self.r4 {
            ensure_positive("settings.tolerable.r4", r4)?;
        }
        Ok(())
    }
}

/// Outcome of comparing one risk total with its tolerable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub risk: RiskKind,
    pub total: f64,
    pub tolerable: Option<f64>,
    /// `None` when no tolerable value applies
    pub passes: Option<bool>,
}

impl ComplianceCheck {
    /// total / RT, comparable to a unity check
    pub fn ratio(&self) -> Option<f64> {
        self.tolerable.map(|rt| self.total / rt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_passes() {
        let rt = TolerableRisk::default();
        assert_eq!(rt.check(RiskKind::R1, 1e-5).passes, Some(true));
        assert_eq!(rt.check(RiskKind::R1, 1.0001e-5).passes, Some(false));
        assert_eq!(rt.check(RiskKind::R2, 5e-4).passes, Some(true));
        assert_eq!(rt.check(RiskKind::R3, 2e-4).passes, Some(false));
    }

    #[test]
    fn test_r4_has_no_default_limit() {
        let rt = TolerableRisk::default();
        let check = rt.check(RiskKind::R4, 1.0);
        assert_eq!(check.tolerable, None);
        assert_eq!(check.passes, None);
        assert_eq!(check.ratio(), None);

        let custom = TolerableRisk {
            r4: Some(1e-3),
            ..Default::default()
        };
        assert_eq!(custom.check(RiskKind::R4, 1e-4).passes, Some(true));
    }

    #[test]
    fn test_ratio() {
        let check = TolerableRisk::default().check(RiskKind::R1, 5e-6);
        assert!((check.ratio().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validation() {
        let bad = TolerableRisk {
            r2: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(TolerableRisk::default().validate().is_ok());
    }
}
