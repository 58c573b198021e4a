//! # Cost-Benefit of Protection (IEC 62305-2 Annex D)
//!
//! R4 has no tolerable value. Instead, protection is justified when the
//! money it saves each year exceeds what it costs each year:
//!
//! ```text
//! CL   = Σ R4_zone · ct_zone            (unprotected structure)
//! CRL  = Σ R4_zone · ct_zone            (with the protection measures)
//! CPM  = CP · (i + a + m)
//! SM   = CL - (CPM + CRL)
//! ```
//!
//! Protection is cost-effective when `SM > 0`.
//!
//! ## Example
//!
//! ```rust
//! use risk_core::economics::EconomicParameters;
//!
//! let params = EconomicParameters {
//!     cost_of_protection: 1000.0,
//!     interest_rate: 0.04,
//!     amortization_rate: 0.05,
//!     maintenance_rate: 0.01,
//! };
//! assert!((params.annual_protection_cost() - 100.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{EconomicZoneRisk, RiskReport};
use crate::errors::{ensure_non_negative, CalcResult};

/// Cost of the protection measures and the rates that annualize it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicParameters {
    /// CP - cost of the protection measures
    pub cost_of_protection: f64,
    /// i - interest rate
    pub interest_rate: f64,
    /// a - amortization rate
    pub amortization_rate: f64,
    /// m - maintenance rate
    pub maintenance_rate: f64,
}

impl EconomicParameters {
    /// CPM = CP·(i + a + m)
    pub fn annual_protection_cost(&self) -> f64 {
        self.cost_of_protection * (self.interest_rate + self.amortization_rate + self.maintenance_rate)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("economics.cost_of_protection", self.cost_of_protection)?;
        ensure_non_negative("economics.interest_rate", self.interest_rate)?;
        ensure_non_negative("economics.amortization_rate", self.amortization_rate)?;
        ensure_non_negative("economics.maintenance_rate", self.maintenance_rate)
    }

    /// Compare an unprotected and a protected R4 evaluation.
    pub fn analyze(
        &self,
        unprotected: &RiskReport<EconomicZoneRisk>,
        protected: &RiskReport<EconomicZoneRisk>,
    ) -> CalcResult<CostBenefit> {
        self.validate()?;
        Ok(CostBenefit::new(
            annual_loss(unprotected),
            annual_loss(protected),
            self.annual_protection_cost(),
        ))
    }
}

/// Expected annual loss of one R4 evaluation: Σ R4_zone · ct_zone
pub fn annual_loss(report: &RiskReport<EconomicZoneRisk>) -> f64 {
    report.zones.iter().map(|z| z.annual_loss()).sum()
}

/// Result of the Annex D comparison.
///
/// ## JSON Example
///
/// ```json
/// {
///   "loss_unprotected": 420.0,
///   "loss_residual": 35.0,
///   "protection_cost_annual": 100.0,
///   "annual_saving": 285.0,
///   "is_cost_effective": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBenefit {
    /// CL
    pub loss_unprotected: f64,
    /// CRL
    pub loss_residual: f64,
    /// CPM
    pub protection_cost_annual: f64,
    /// SM
    pub annual_saving: f64,
    /// SM > 0
    pub is_cost_effective: bool,
}

impl CostBenefit {
    /// Build from CL, CRL and CPM.
    pub fn new(loss_unprotected: f64, loss_residual: f64, protection_cost_annual: f64) -> Self {
        let annual_saving = loss_unprotected - (protection_cost_annual + loss_residual);
        CostBenefit {
            loss_unprotected,
            loss_residual,
            protection_cost_annual,
            annual_saving,
            is_cost_effective: annual_saving > 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::RiskEngine;
    use crate::lines::LineParameters;
    use crate::structure::GeometricParameters;
    use crate::zone::{EconomicLoss, ZoneParameters};

    #[test]
    fn test_annual_protection_cost() {
        let params = EconomicParameters {
            cost_of_protection: 1000.0,
            interest_rate: 0.04,
            amortization_rate: 0.05,
            maintenance_rate: 0.01,
        };
        assert!((params.annual_protection_cost() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_saving() {
        let result = CostBenefit::new(500.0, 50.0, 100.0);
        assert_eq!(result.annual_saving, 350.0);
        assert!(result.is_cost_effective);

        let result = CostBenefit::new(100.0, 20.0, 100.0);
        assert_eq!(result.annual_saving, -20.0);
        assert!(!result.is_cost_effective);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let params = EconomicParameters {
            interest_rate: -0.01,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_analyze_reports() {
        let geometry = GeometricParameters {
            length_m: 50.0,
            width_m: 20.0,
            height_m: 10.0,
            ng: 4.0,
            cd: 1.0,
            ad_manual: None,
            am_manual: None,
        };
        let mut zone = ZoneParameters::new("Plant");
        zone.economic = EconomicLoss {
            cb: 1_000_000.0,
            cc: 500_000.0,
            cs: 500_000.0,
            ct: 2_000_000.0,
            ..Default::default()
        };
        let lines = vec![LineParameters::new("Power", 1000.0)];

        let mut protected_zone = zone.clone();
        protected_zone.fire.pb = 0.02;
        protected_zone.line_fire.peb = 0.01;
        protected_zone.line_failure.pspd = 0.01;

        let unprotected = RiskEngine::new(geometry.clone(), vec![zone], lines.clone())
            .unwrap()
            .compute_r4()
            .unwrap();
        let protected = RiskEngine::new(geometry, vec![protected_zone], lines)
            .unwrap()
            .compute_r4()
            .unwrap();

        let params = EconomicParameters {
            cost_of_protection: 10.0,
            interest_rate: 0.05,
            ..Default::default()
        };
        let result = params.analyze(&unprotected, &protected).unwrap();

        assert!((result.loss_unprotected - unprotected.total * 2_000_000.0).abs() < 1e-6);
        assert!(result.loss_residual < result.loss_unprotected);
        assert!((result.protection_cost_annual - 0.5).abs() < 1e-12);
        let expected = result.loss_unprotected - (result.protection_cost_annual + result.loss_residual);
        assert_eq!(result.annual_saving, expected);
    }
}
