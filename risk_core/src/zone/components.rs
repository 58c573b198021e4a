//! Coefficient groups for the eight R1 components.
//!
//! Each group carries the probabilities and loss inputs of one component
//! family and knows how to form its own `P` and `L` values. Defaults follow
//! the usual starting point of an assessment (unprotected structure,
//! ordinary fire risk, one occupant present all year).

use serde::{Deserialize, Serialize};

use crate::equations::{occupancy_fraction, pms, HOURS_PER_YEAR};
use crate::errors::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

/// Who is exposed in a zone and for how long: (nz, nt, tz).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Occupancy {
    /// Persons in the zone
    pub nz: f64,
    /// Total persons in the structure (> 0)
    pub nt: f64,
    /// Hours per year the persons are present in the zone
    pub tz: f64,
}

impl Default for Occupancy {
    fn default() -> Self {
        Occupancy {
            nz: 1.0,
            nt: 1.0,
            tz: HOURS_PER_YEAR,
        }
    }
}

impl Occupancy {
    /// (nz/nt)·(tz/8760)
    pub fn fraction(&self) -> f64 {
        occupancy_fraction(self.nz, self.nt, self.tz)
    }

    pub(crate) fn validate(&self, prefix: &str) -> CalcResult<()> {
        ensure_non_negative(format!("{}.nz", prefix), self.nz)?;
        ensure_positive(format!("{}.nt", prefix), self.nt)?;
        ensure_non_negative(format!("{}.tz", prefix), self.tz)?;
        if self.tz > HOURS_PER_YEAR {
            return Err(CalcError::invalid_input(
                format!("{}.tz", prefix),
                self.tz.to_string(),
                "Presence time cannot exceed 8760 hours per year",
            ));
        }
        Ok(())
    }
}

/// Ra: injury from touch and step voltages inside the structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureShock {
    /// Pta - shock protection measures (Table B.1)
    pub pta: f64,
    /// rt - floor surface reduction factor (Table C.3)
    pub rt: f64,
    /// Lt - typical injury loss (Table C.2)
    pub lt: f64,
    /// Persons exposed
    pub occupancy: Occupancy,
}

impl Default for StructureShock {
    fn default() -> Self {
        StructureShock {
            pta: 0.01,
            rt: 0.01,
            lt: 1e-2,
            occupancy: Occupancy::default(),
        }
    }
}

impl StructureShock {
    /// Pa = Pta·Pb
    pub fn pa(&self, pb: f64) -> f64 {
        self.pta * pb
    }

    /// La1 = rt·Lt·(nz/nt)·(tz/8760)
    pub fn la1(&self) -> f64 {
        self.rt * self.lt * self.occupancy.fraction()
    }
}

/// Rb: fire and other physical damage inside the structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureFire {
    /// Pb - LPS protection level (Table B.2)
    pub pb: f64,
    /// rp - fire protection provisions (Table C.4)
    pub rp: f64,
    /// rf - fire risk of the structure (Table C.5)
    pub rf: f64,
    /// hz - special hazard / panic factor (Table C.6)
    pub hz: f64,
    /// Lf1 - typical physical damage loss (Table C.2)
    pub lf1: f64,
    /// Persons exposed
    pub occupancy: Occupancy,
}

impl Default for StructureFire {
    fn default() -> Self {
        StructureFire {
            pb: 1.0,
            rp: 0.5,
            rf: 0.01,
            hz: 2.0,
            lf1: 0.02,
            occupancy: Occupancy::default(),
        }
    }
}

impl StructureFire {
    /// Lb1 = rp·rf·hz·Lf1·(nz/nt)·(tz/8760)
    pub fn lb1(&self) -> f64 {
        self.rp * self.rf * self.hz * self.lf1 * self.occupancy.fraction()
    }
}

/// Rc: failure of internal systems caused by a flash to the structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemFailure {
    /// Pspd - coordinated SPD protection level (Table B.3)
    pub pspd: f64,
    /// Cld - line shielding, grounding and isolation (Table B.4)
    pub cld: f64,
    /// Lo1 - loss due to internal system failure (Table C.2)
    pub lo1: f64,
    /// Persons exposed
    pub occupancy: Occupancy,
}

impl Default for SystemFailure {
    fn default() -> Self {
        SystemFailure {
            pspd: 0.02,
            cld: 1.0,
            lo1: 0.0,
            occupancy: Occupancy::default(),
        }
    }
}

impl SystemFailure {
    /// Pc = Pspd·Cld
    pub fn pc(&self) -> f64 {
        self.pspd * self.cld
    }

    /// Lc1 = Lo1·(nz/nt)·(tz/8760)
    pub fn lc1(&self) -> f64 {
        self.lo1 * self.occupancy.fraction()
    }
}

/// Rm: spatial shielding and withstand of internal systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeShielding {
    /// wm1 - mesh width of the outer spatial shield (m)
    pub wm1: f64,
    /// wm2 - mesh width of inner spatial shields (m)
    pub wm2: f64,
    /// Ks3 - internal wiring characteristics (Table B.5)
    pub ks3: f64,
    /// Uw - rated impulse withstand voltage (kV)
    pub uw: f64,
}

impl Default for SurgeShielding {
    fn default() -> Self {
        SurgeShielding {
            wm1: 2.0,
            wm2: 2.0,
            ks3: 1.0,
            uw: 1.0,
        }
    }
}

impl SurgeShielding {
    /// Pms = (Ks1·Ks2·Ks3·Ks4)²
    pub fn pms(&self) -> f64 {
        pms(self.wm1, self.wm2, self.ks3, self.uw)
    }
}

/// Ru: injury from touch voltage due to a flash to a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineShock {
    /// Ptu - protection against touch voltage (Table B.6)
    pub ptu: f64,
    /// Peb - equipotential bonding SPDs (Table B.7)
    pub peb: f64,
    /// Pld - line characteristics (Table B.8)
    pub pld: f64,
    /// Cld - line shielding (Table B.4)
    pub cld: f64,
    /// rt - floor surface reduction factor (Table C.3)
    pub rt: f64,
    /// Lt - typical injury loss (Table C.2)
    pub lt: f64,
    /// Persons exposed
    pub occupancy: Occupancy,
}

impl Default for LineShock {
    fn default() -> Self {
        LineShock {
            ptu: 0.01,
            peb: 0.02,
            pld: 1.0,
            cld: 1.0,
            rt: 0.01,
            lt: 1e-2,
            occupancy: Occupancy::default(),
        }
    }
}

impl LineShock {
    /// Pu = Ptu·Peb·Pld·Cld
    pub fn pu(&self) -> f64 {
        self.ptu * self.peb * self.pld * self.cld
    }

    /// Lu1 = rt·Lt·(nz/nt)·(tz/8760)
    pub fn lu1(&self) -> f64 {
        self.rt * self.lt * self.occupancy.fraction()
    }
}

/// Rv: physical damage from a flash to a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFire {
    /// Peb (Table B.7)
    pub peb: f64,
    /// Pld (Table B.8)
    pub pld: f64,
    /// Cld (Table B.4)
    pub cld: f64,
}

impl Default for LineFire {
    fn default() -> Self {
        LineFire {
            peb: 0.02,
            pld: 1.0,
            cld: 1.0,
        }
    }
}

impl LineFire {
    /// Pv = Peb·Pld·Cld
    pub fn pv(&self) -> f64 {
        self.peb * self.pld * self.cld
    }
}

/// Rw: failure of internal systems from a flash to a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFailure {
    /// Pspd (Table B.3)
    pub pspd: f64,
    /// Pld (Table B.8)
    pub pld: f64,
    /// Cld (Table B.4)
    pub cld: f64,
}

impl Default for LineFailure {
    fn default() -> Self {
        LineFailure {
            pspd: 0.02,
            pld: 1.0,
            cld: 1.0,
        }
    }
}

impl LineFailure {
    /// Pw = Pspd·Pld·Cld
    pub fn pw(&self) -> f64 {
        self.pspd * self.pld * self.cld
    }
}

/// Rz: failure of internal systems from a flash near a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InducedFailure {
    /// Pspd (Table B.3)
    pub pspd: f64,
    /// Pli - line type and withstand (Table B.9)
    pub pli: f64,
    /// Cli - line shielding (Table B.4)
    pub cli: f64,
}

impl Default for InducedFailure {
    fn default() -> Self {
        InducedFailure {
            pspd: 0.02,
            pli: 1.0,
            cli: 1.0,
        }
    }
}

impl InducedFailure {
    /// Pz = Pspd·Pli·Cli
    pub fn pz(&self) -> f64 {
        self.pspd * self.pli * self.cli
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_la1_worked_example() {
        let shock = StructureShock {
            pta: 1.0,
            rt: 1e-2,
            lt: 1e-2,
            occupancy: Occupancy::default(),
        };
        assert_eq!(shock.pa(1.0), 1.0);
        assert!((shock.la1() - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn test_lb1_defaults() {
        // 0.5 · 0.01 · 2 · 0.02 · 1
        let fire = StructureFire::default();
        assert!((fire.lb1() - 2e-4).abs() < 1e-18);
    }

    #[test]
    fn test_lc1_scales_with_presence() {
        let failure = SystemFailure {
            lo1: 0.1,
            occupancy: Occupancy {
                nz: 5.0,
                nt: 10.0,
                tz: 4380.0,
            },
            ..Default::default()
        };
        assert!((failure.lc1() - 0.025).abs() < 1e-15);
        assert!((failure.pc() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_line_probabilities() {
        let shock = LineShock::default();
        assert!((shock.pu() - 0.01 * 0.02).abs() < 1e-18);
        assert!((LineFire::default().pv() - 0.02).abs() < 1e-15);
        assert!((LineFailure::default().pw() - 0.02).abs() < 1e-15);
        assert!((InducedFailure::default().pz() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_occupancy_validation() {
        let bad_nt = Occupancy {
            nt: 0.0,
            ..Default::default()
        };
        assert!(bad_nt.validate("zones[0].fire.occupancy").is_err());

        let bad_tz = Occupancy {
            tz: 9000.0,
            ..Default::default()
        };
        assert!(bad_tz.validate("zones[0].fire.occupancy").is_err());
        assert!(Occupancy::default().validate("zones[0].fire.occupancy").is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let fire: StructureFire = serde_json::from_str(r#"{"pb": 0.05, "occupancy": {"nz": 3}}"#).unwrap();
        assert_eq!(fire.pb, 0.05);
        assert_eq!(fire.rp, 0.5);
        assert_eq!(fire.occupancy.nz, 3.0);
        assert_eq!(fire.occupancy.nt, 1.0);
    }
}
