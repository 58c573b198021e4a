//! # Zones
//!
//! A zone is a part of the structure with homogeneous characteristics
//! (floor surface, fire compartment, internal systems, occupants). Every
//! zone carries its own coefficients; zones never share state.
//!
//! ## Structure
//!
//! ```text
//! ZoneParameters
//! ├── flags: is_explosion_risk, is_hospital, has_animal_loss
//! ├── shock            (Ra)   fire            (Rb)
//! ├── system_failure   (Rc)   shielding       (Rm)
//! ├── line_shock       (Ru)   line_fire       (Rv)
//! ├── line_failure     (Rw)   induced_failure (Rz)
//! ├── service          (R2 inputs and overrides)
//! ├── heritage         (R3 inputs)
//! ├── economic         (R4 inputs and overrides)
//! └── citations        (field -> table reference)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use risk_core::zone::ZoneParameters;
//!
//! let mut zone = ZoneParameters::new("Operating theatre");
//! zone.is_hospital = true;
//! zone.system_failure.lo1 = 1e-3;
//! zone.validate(0).unwrap();
//! assert!(zone.is_critical());
//! ```

pub mod components;
pub mod overrides;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_non_negative, CalcError, CalcResult};

pub use components::{
    InducedFailure, LineFailure, LineFire, LineShock, Occupancy, StructureFire, StructureShock,
    SurgeShielding, SystemFailure,
};
pub use overrides::{EconomicLoss, HeritageLoss, ServiceLoss, ShieldingOverrides};

/// Use the override when one is set, the base value otherwise.
///
/// # Example
/// ```rust
/// use risk_core::zone::resolve;
///
/// assert_eq!(resolve(Some(0.2), 0.5), 0.2);
/// assert_eq!(resolve(None, 0.5), 0.5);
/// ```
#[inline]
pub fn resolve(override_value: Option<f64>, base: f64) -> f64 {
    override_value.unwrap_or(base)
}

/// Why the R1 failure components (Rc, Rm, Rw, Rz) apply to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CriticalityReason {
    /// Neither flag set: failure components are zero
    #[default]
    None,
    /// Structure with risk of explosion
    Explosion,
    /// Hospital or structure where system failure endangers life
    Hospital,
    /// Both flags set
    Both,
}

impl CriticalityReason {
    /// Build from the two zone flags
    pub fn from_flags(is_explosion_risk: bool, is_hospital: bool) -> Self {
        match (is_explosion_risk, is_hospital) {
            (false, false) => CriticalityReason::None,
            (true, false) => CriticalityReason::Explosion,
            (false, true) => CriticalityReason::Hospital,
            (true, true) => CriticalityReason::Both,
        }
    }

    /// Whether the failure components are active
    pub fn is_critical(&self) -> bool {
        !matches!(self, CriticalityReason::None)
    }
}

/// All coefficients describing one zone.
///
/// Every group has a default, so a zone can be written in JSON with only
/// the values that differ from the defaults:
///
/// ```json
/// {
///   "name": "Server room",
///   "is_hospital": true,
///   "fire": { "pb": 0.05 },
///   "system_failure": { "lo1": 0.001 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneParameters {
    /// Zone name, unique within an assessment
    pub name: String,

    /// Risk of explosion in the zone
    #[serde(default)]
    pub is_explosion_risk: bool,

    /// Hospital or life-critical internal systems
    #[serde(default)]
    pub is_hospital: bool,

    /// Loss of animals counts towards R4 (activates Ra4 and Ru4)
    #[serde(default)]
    pub has_animal_loss: bool,

    #[serde(default)]
    pub shock: StructureShock,

    #[serde(default)]
    pub fire: StructureFire,

    #[serde(default)]
    pub system_failure: SystemFailure,

    #[serde(default)]
    pub shielding: SurgeShielding,

    #[serde(default)]
    pub line_shock: LineShock,

    #[serde(default)]
    pub line_fire: LineFire,

    #[serde(default)]
    pub line_failure: LineFailure,

    #[serde(default)]
    pub induced_failure: InducedFailure,

    #[serde(default)]
    pub service: ServiceLoss,

    #[serde(default)]
    pub heritage: HeritageLoss,

    #[serde(default)]
    pub economic: EconomicLoss,

    /// Where each coefficient was taken from (e.g. "rf" -> "Table C.5")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub citations: BTreeMap<String, String>,
}

impl ZoneParameters {
    /// Create a zone with default coefficients
    pub fn new(name: impl Into<String>) -> Self {
        ZoneParameters {
            name: name.into(),
            is_explosion_risk: false,
            is_hospital: false,
            has_animal_loss: false,
            shock: StructureShock::default(),
            fire: StructureFire::default(),
            system_failure: SystemFailure::default(),
            shielding: SurgeShielding::default(),
            line_shock: LineShock::default(),
            line_fire: LineFire::default(),
            line_failure: LineFailure::default(),
            induced_failure: InducedFailure::default(),
            service: ServiceLoss::default(),
            heritage: HeritageLoss::default(),
            economic: EconomicLoss::default(),
            citations: BTreeMap::new(),
        }
    }

    /// Record where a coefficient came from (builder pattern)
    pub fn with_citation(mut self, field: impl Into<String>, reference: impl Into<String>) -> Self {
        self.citations.insert(field.into(), reference.into());
        self
    }

    /// Which flags make the failure components apply
    pub fn criticality(&self) -> CriticalityReason {
        CriticalityReason::from_flags(self.is_explosion_risk, self.is_hospital)
    }

    /// is_explosion_risk OR is_hospital
    pub fn is_critical(&self) -> bool {
        self.criticality().is_critical()
    }

    /// Shielding for Rm2 and Rm4: R2 overrides on top of the R1 values
    pub fn service_shielding(&self) -> SurgeShielding {
        self.service.shielding.apply(&self.shielding)
    }

    /// Validate all coefficients. `index` locates the zone in error messages.
    pub fn validate(&self, index: usize) -> CalcResult<()> {
        let prefix = format!("zones[{}]", index);
        if self.name.trim().is_empty() {
            return Err(CalcError::missing_field(format!("{}.name", prefix)));
        }
        let field = |group: &str, name: &str| format!("{}.{}.{}", prefix, group, name);

        for (name, value) in [("pta", self.shock.pta), ("rt", self.shock.rt), ("lt", self.shock.lt)] {
            ensure_non_negative(field("shock", name), value)?;
        }
        self.shock.occupancy.validate(&format!("{}.shock.occupancy", prefix))?;

        for (name, value) in [
            ("pb", self.fire.pb),
            ("rp", self.fire.rp),
            ("rf", self.fire.rf),
            ("hz", self.fire.hz),
            ("lf1", self.fire.lf1),
        ] {
            ensure_non_negative(field("fire", name), value)?;
        }
        self.fire.occupancy.validate(&format!("{}.fire.occupancy", prefix))?;

        for (name, value) in [
            ("pspd", self.system_failure.pspd),
            ("cld", self.system_failure.cld),
            ("lo1", self.system_failure.lo1),
        ] {
            ensure_non_negative(field("system_failure", name), value)?;
        }
        self.system_failure
            .occupancy
            .validate(&format!("{}.system_failure.occupancy", prefix))?;

        for (name, value) in [
            ("wm1", self.shielding.wm1),
            ("wm2", self.shielding.wm2),
            ("ks3", self.shielding.ks3),
        ] {
            ensure_non_negative(field("shielding", name), value)?;
        }
        // Uw <= 0 is guarded by Ks4 = 1; only NaN/Inf are rejected
        if !self.shielding.uw.is_finite() {
            return Err(CalcError::invalid_input(
                field("shielding", "uw"),
                self.shielding.uw.to_string(),
                "Value must be finite",
            ));
        }

        for (name, value) in [
            ("ptu", self.line_shock.ptu),
            ("peb", self.line_shock.peb),
            ("pld", self.line_shock.pld),
            ("cld", self.line_shock.cld),
            ("rt", self.line_shock.rt),
            ("lt", self.line_shock.lt),
        ] {
            ensure_non_negative(field("line_shock", name), value)?;
        }
        self.line_shock
            .occupancy
            .validate(&format!("{}.line_shock.occupancy", prefix))?;

        for (name, value) in [
            ("peb", self.line_fire.peb),
            ("pld", self.line_fire.pld),
            ("cld", self.line_fire.cld),
        ] {
            ensure_non_negative(field("line_fire", name), value)?;
        }
        for (name, value) in [
            ("pspd", self.line_failure.pspd),
            ("pld", self.line_failure.pld),
            ("cld", self.line_failure.cld),
        ] {
            ensure_non_negative(field("line_failure", name), value)?;
        }
        for (name, value) in [
            ("pspd", self.induced_failure.pspd),
            ("pli", self.induced_failure.pli),
            ("cli", self.induced_failure.cli),
        ] {
            ensure_non_negative(field("induced_failure", name), value)?;
        }

        self.service.validate(&format!("{}.service", prefix))?;
        self.heritage.validate(&format!("{}.heritage", prefix))?;
        self.economic.validate(&format!("{}.economic", prefix))?;
        Ok(())
    }
}
