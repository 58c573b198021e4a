//! Coefficient groups specific to R2, R3 and R4.
//!
//! Optional fields stay `None` unless the assessor wants a value that differs
//! from the R1 input; [`resolve`](super::resolve) falls back to R1 at
//! evaluation time.

use serde::{Deserialize, Serialize};

use super::components::{Occupancy, StructureFire, StructureShock, SurgeShielding};
use super::resolve;
use crate::equations::{population_fraction, value_ratio};
use crate::errors::{ensure_non_negative, ensure_positive, CalcResult};

/// Per-field replacements for [`SurgeShielding`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldingOverrides {
    pub wm1: Option<f64>,
    pub wm2: Option<f64>,
    pub ks3: Option<f64>,
    pub uw: Option<f64>,
}

impl ShieldingOverrides {
    /// Effective shielding: each overridden field replaces the base one.
    pub fn apply(&self, base: &SurgeShielding) -> SurgeShielding {
        SurgeShielding {
            wm1: resolve(self.wm1, base.wm1),
            wm2: resolve(self.wm2, base.wm2),
            ks3: resolve(self.ks3, base.ks3),
            uw: resolve(self.uw, base.uw),
        }
    }
}

/// R2 inputs: loss of public service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLoss {
    /// Lf2 - service loss from physical damage (Table C.8)
    pub lf2: f64,
    /// Lo2 - service loss from internal system failure (Table C.8)
    pub lo2: f64,
    /// Users served by the zone; falls back to the base `nz` (Ra occupancy)
    pub nz: Option<f64>,
    /// Total users served; falls back to the base `nt` (Ra occupancy)
    pub nt: Option<f64>,
    /// Shielding used for Rm2. Rm4 reads these same overrides.
    pub shielding: ShieldingOverrides,
}

impl Default for ServiceLoss {
    fn default() -> Self {
        ServiceLoss {
            lf2: 1e-1,
            lo2: 1e-2,
            nz: None,
            nt: None,
            shielding: ShieldingOverrides::default(),
        }
    }
}

impl ServiceLoss {
    /// nz/nt for R2, using the base occupancy where no override is set
    pub fn served_fraction(&self, base: &Occupancy) -> f64 {
        population_fraction(resolve(self.nz, base.nz), resolve(self.nt, base.nt))
    }

    /// Lb2 = rp·rf·Lf2·(nz/nt)
    pub fn lb2(&self, fire: &StructureFire, served_fraction: f64) -> f64 {
        fire.rp * fire.rf * self.lf2 * served_fraction
    }

    /// Lc2 = Lo2·(nz/nt)
    pub fn lc2(&self, served_fraction: f64) -> f64 {
        self.lo2 * served_fraction
    }

    pub(crate) fn validate(&self, prefix: &str) -> CalcResult<()> {
        ensure_non_negative(format!("{}.lf2", prefix), self.lf2)?;
        ensure_non_negative(format!("{}.lo2", prefix), self.lo2)?;
        if let Some(nz) = self.nz {
            ensure_non_negative(format!("{}.nz", prefix), nz)?;
        }
        if let Some(nt) = self.nt {
            ensure_positive(format!("{}.nt", prefix), nt)?;
        }
        validate_shielding_overrides(&self.shielding, &format!("{}.shielding", prefix))
    }
}

/// R3 inputs: loss of cultural heritage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeritageLoss {
    /// Lf3 - typical heritage loss from physical damage
    pub lf3: f64,
    /// cz - value of cultural heritage in the zone
    pub cz: f64,
    /// ct - total value of the structure and its contents
    pub ct: f64,
}

impl Default for HeritageLoss {
    fn default() -> Self {
        HeritageLoss {
            lf3: 1e-1,
            cz: 0.0,
            ct: 0.0,
        }
    }
}

impl HeritageLoss {
    /// Lb3 = rp·rf·Lf3·(cz/ct), 0 when ct = 0
    pub fn lb3(&self, fire: &StructureFire) -> f64 {
        fire.rp * fire.rf * self.lf3 * value_ratio(self.cz, self.ct)
    }

    pub(crate) fn validate(&self, prefix: &str) -> CalcResult<()> {
        ensure_non_negative(format!("{}.lf3", prefix), self.lf3)?;
        ensure_non_negative(format!("{}.cz", prefix), self.cz)?;
        ensure_non_negative(format!("{}.ct", prefix), self.ct)
    }
}

/// R4 inputs: economic loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicLoss {
    /// Lf4 - economic loss from physical damage (Table C.12)
    pub lf4: f64,
    /// Lo4 - economic loss from internal system failure (Table C.12)
    pub lo4: f64,
    /// rt for animal injury; falls back to the R1 `rt`
    pub rt: Option<f64>,
    /// Lt for animal injury; falls back to the R1 `Lt`
    pub lt: Option<f64>,
    /// rp; falls back to the R1 `rp`
    pub rp: Option<f64>,
    /// rf; falls back to the R1 `rf`
    pub rf: Option<f64>,
    /// ca - value of animals
    pub ca: f64,
    /// cb - value of the building
    pub cb: f64,
    /// cc - value of the contents
    pub cc: f64,
    /// cs - value of internal systems
    pub cs: f64,
    /// ct - total value of the structure; 0 disables the R4 loss terms
    pub ct: f64,
}

impl Default for EconomicLoss {
    fn default() -> Self {
        EconomicLoss {
            lf4: 0.5,
            lo4: 1e-2,
            rt: None,
            lt: None,
            rp: None,
            rf: None,
            ca: 0.0,
            cb: 0.0,
            cc: 0.0,
            cs: 0.0,
            ct: 0.0,
        }
    }
}

impl EconomicLoss {
    /// La4 = rt·Lt·(ca/ct)
    pub fn la4(&self, shock: &StructureShock) -> f64 {
        resolve(self.rt, shock.rt) * resolve(self.lt, shock.lt) * value_ratio(self.ca, self.ct)
    }

    /// Lb4 = rp·rf·Lf4·((ca+cb+cc+cs)/ct)
    pub fn lb4(&self, fire: &StructureFire) -> f64 {
        let exposed = self.ca + self.cb + self.cc + self.cs;
        resolve(self.rp, fire.rp) * resolve(self.rf, fire.rf) * self.lf4 * value_ratio(exposed, self.ct)
    }

    /// Lc4 = Lo4·(cs/ct)
    pub fn lc4(&self) -> f64 {
        self.lo4 * value_ratio(self.cs, self.ct)
    }

    pub(crate) fn validate(&self, prefix: &str) -> CalcResult<()> {
        ensure_non_negative(format!("{}.lf4", prefix), self.lf4)?;
        ensure_non_negative(format!("{}.lo4", prefix), self.lo4)?;
        for (name, value) in [("rt", self.rt), ("lt", self.lt), ("rp", self.rp), ("rf", self.rf)] {
            if let Some(v) = value {
                ensure_non_negative(format!("{}.{}", prefix, name), v)?;
            }
        }
        for (name, value) in [("ca", self.ca), ("cb", self.cb), ("cc", self.cc), ("cs", self.cs), ("ct", self.ct)] {
            ensure_non_negative(format!("{}.{}", prefix, name), value)?;
        }
        Ok(())
    }
}

fn validate_shielding_overrides(overrides: &ShieldingOverrides, prefix: &str) -> CalcResult<()> {
    for (name, value) in [("wm1", overrides.wm1), ("wm2", overrides.wm2), ("ks3", overrides.ks3)] {
        if let Some(v) = value {
            ensure_non_negative(format!("{}.{}", prefix, name), v)?;
        }
    }
    if let Some(uw) = overrides.uw {
        if !uw.is_finite() {
            return Err(crate::errors::CalcError::invalid_input(
                format!("{}.uw", prefix),
                uw.to_string(),
                "Value must be finite",
            ));
        }
    }
    Ok(())
}
