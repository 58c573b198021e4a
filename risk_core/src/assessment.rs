//! # Assessment Documents
//!
//! The `Assessment` struct is the root container for one risk assessment.
//! Assessments serialize to `.lpr` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Assessment
//! ├── meta: AssessmentMetadata (version, id, engineer, job info, timestamps)
//! ├── settings: EngineSettings (Ai factor, tolerable risks)
//! ├── structure: GeometricParameters
//! ├── lines: Vec<LineParameters>
//! ├── zones: Vec<ZoneParameters>
//! └── protection: Option<ProtectionScenario> (Annex D cost-benefit)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use risk_core::assessment::Assessment;
//!
//! let assessment = Assessment::template("Jane Engineer", "25-042", "ACME Corp");
//! let report = assessment.evaluate().unwrap();
//!
//! println!("R1 = {:.3e}", report.r1.total);
//! assert_eq!(report.compliance.len(), 4);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    EconomicZoneRisk, HeritageZoneRisk, LifeZoneRisk, RiskEngine, RiskKind, RiskReport, ServiceZoneRisk,
};
use crate::compliance::ComplianceCheck;
use crate::economics::{CostBenefit, EconomicParameters};
use crate::errors::CalcResult;
use crate::lines::LineParameters;
use crate::settings::EngineSettings;
use crate::structure::GeometricParameters;
use crate::zone::ZoneParameters;

/// Current schema version for .lpr files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root assessment container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub meta: AssessmentMetadata,

    #[serde(default)]
    pub settings: EngineSettings,

    /// Dimensions and location of the structure
    pub structure: GeometricParameters,

    /// Connected service lines
    #[serde(default)]
    pub lines: Vec<LineParameters>,

    /// Zones, evaluated in this order
    #[serde(default)]
    pub zones: Vec<ZoneParameters>,

    /// Protection measures to compare against, for the cost-benefit check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<ProtectionScenario>,
}

impl Assessment {
    /// Create an assessment with default structure and no zones or lines.
    ///
    /// # Example
    ///
    /// ```rust
    /// use risk_core::assessment::{Assessment, SCHEMA_VERSION};
    ///
    /// let assessment = Assessment::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(assessment.meta.version, SCHEMA_VERSION);
    /// assert!(assessment.zones.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Assessment {
            meta: AssessmentMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: EngineSettings::default(),
            structure: GeometricParameters::default(),
            lines: Vec::new(),
            zones: Vec::new(),
            protection: None,
        }
    }

    /// Starting point for a new file: one zone and one power line.
    pub fn template(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let mut assessment = Assessment::new(engineer, job_id, client);
        assessment.add_zone(ZoneParameters::new("Zone 1"));
        assessment.add_line(LineParameters::new("Power", 1000.0));
        assessment
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Add a zone and mark the assessment modified.
    pub fn add_zone(&mut self, zone: ZoneParameters) {
        self.zones.push(zone);
        self.touch();
    }

    /// Add a line and mark the assessment modified.
    pub fn add_line(&mut self, line: LineParameters) {
        self.lines.push(line);
        self.touch();
    }

    /// Validate the inputs and build an engine.
    pub fn engine(&self) -> CalcResult<RiskEngine> {
        RiskEngine::with_settings(
            self.structure.clone(),
            self.zones.clone(),
            self.lines.clone(),
            self.settings,
        )
    }

    /// Compute all four risks, the compliance checks and, when a protection
    /// scenario is present, the cost-benefit of protection.
    pub fn evaluate(&self) -> CalcResult<AssessmentReport> {
        let engine = self.engine()?;
        let r1 = engine.compute_r1()?;
        let r2 = engine.compute_r2()?;
        let r3 = engine.compute_r3()?;
        let r4 = engine.compute_r4()?;

        let tolerable = &self.settings.tolerable;
        let compliance = vec![
            tolerable.check(RiskKind::R1, r1.total),
            tolerable.check(RiskKind::R2, r2.total),
            tolerable.check(RiskKind::R3, r3.total),
            tolerable.check(RiskKind::R4, r4.total),
        ];

        let cost_benefit = match &self.protection {
            Some(scenario) => {
                let protected = RiskEngine::with_settings(
                    self.structure.clone(),
                    scenario.zones.clone(),
                    self.lines.clone(),
                    self.settings,
                )?
                .compute_r4()?;
                Some(scenario.economics.analyze(&r4, &protected)?)
            }
            None => None,
        };

        Ok(AssessmentReport {
            r1,
            r2,
            r3,
            r4,
            compliance,
            cost_benefit,
        })
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Assessment::new("", "", "")
    }
}

/// Assessment metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Stable identifier of this assessment
    pub id: Uuid,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// The same structure with protection measures applied.
///
/// `zones` repeats the assessment's zones with the coefficients the
/// proposed measures change (Pb, Pspd, Peb, rp, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionScenario {
    pub economics: EconomicParameters,
    pub zones: Vec<ZoneParameters>,
}

/// Everything `Assessment::evaluate` produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub r1: RiskReport<LifeZoneRisk>,
    pub r2: RiskReport<ServiceZoneRisk>,
    pub r3: RiskReport<HeritageZoneRisk>,
    pub r4: RiskReport<EconomicZoneRisk>,
    /// One check per risk type, R1 to R4
    pub compliance: Vec<ComplianceCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_benefit: Option<CostBenefit>,
}

impl AssessmentReport {
    /// True when no risk exceeds its tolerable value
    pub fn is_compliant(&self) -> bool {
        self.compliance.iter().all(|c| c.passes != Some(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::zone::EconomicLoss;

    #[test]
    fn test_assessment_creation() {
        let assessment = Assessment::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(assessment.meta.engineer, "John Doe");
        assert_eq!(assessment.meta.job_id, "25-001");
        assert_eq!(assessment.meta.client, "Acme Corp");
        assert_eq!(assessment.meta.version, SCHEMA_VERSION);
        assert_ne!(assessment.meta.id, Assessment::new("", "", "").meta.id);
    }

    #[test]
    fn test_assessment_serialization() {
        let assessment = Assessment::template("Jane Engineer", "25-042", "Test Client");
        let json = serde_json::to_string_pretty(&assessment).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Zone 1"));
        assert!(json.contains("induced_area_factor"));
        assert!(!json.contains("protection"));

        let roundtrip: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.id, assessment.meta.id);
        assert_eq!(roundtrip.zones, assessment.zones);
        assert_eq!(roundtrip.structure, assessment.structure);
    }

    #[test]
    fn test_template_evaluates() {
        let report = Assessment::template("E", "J", "C").evaluate().unwrap();
        assert_eq!(report.r1.zones.len(), 1);
        assert_eq!(report.r1.lines.len(), 1);
        assert!(report.r1.total > 0.0);
        assert_eq!(report.compliance[0].risk, RiskKind::R1);
        assert_eq!(report.compliance[3].passes, None);
        assert!(report.cost_benefit.is_none());
    }

    #[test]
    fn test_invalid_zone_fails_evaluation() {
        let mut assessment = Assessment::template("E", "J", "C");
        assessment.add_zone(ZoneParameters::new("Zone 1"));
        let err = assessment.evaluate().unwrap_err();
        assert_eq!(err, CalcError::duplicate_zone("Zone 1"));
    }

    #[test]
    fn test_protection_scenario() {
        let mut assessment = Assessment::template("E", "J", "C");
        assessment.zones[0].economic = EconomicLoss {
            cb: 100_000.0,
            cs: 50_000.0,
            ct: 150_000.0,
            ..Default::default()
        };
        let mut protected = assessment.zones.clone();
        protected[0].fire.pb = 0.1;
        assessment.protection = Some(ProtectionScenario {
            economics: EconomicParameters {
                cost_of_protection: 1.0,
                interest_rate: 0.05,
                ..Default::default()
            },
            zones: protected,
        });

        let report = assessment.evaluate().unwrap();
        let cb = report.cost_benefit.unwrap();
        assert!(cb.loss_residual < cb.loss_unprotected);
        assert!((cb.protection_cost_annual - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_compliance_summary() {
        let mut assessment = Assessment::template("E", "J", "C");
        assessment.settings.tolerable.r1 = 1e-30;
        let report = assessment.evaluate().unwrap();
        assert!(!report.is_compliant());
    }
}
