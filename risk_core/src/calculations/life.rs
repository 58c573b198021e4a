//! # R1 - Risk of Loss of Human Life
//!
//! ```text
//! R1 = Ra + Rb + Rc* + Rm* + Ru + Rv + Rw* + Rz*
//! ```
//!
//! Components marked `*` apply only to zones with a risk of explosion or
//! with life-critical internal systems (hospitals). For other zones they are
//! exactly zero, and so are the probabilities and losses that feed them.
//!
//! | Component | Source of damage  | Frequency      | P  | L   |
//! |-----------|-------------------|----------------|----|-----|
//! | Ra        | Flash to structure| Nd             | Pa | La1 |
//! | Rb        | Flash to structure| Nd             | Pb | Lb1 |
//! | Rc        | Flash to structure| Nd             | Pc | Lc1 |
//! | Rm        | Flash near        | Nm             | Pm | Lc1 |
//! | Ru        | Flash to line     | Σ(Nl + Ndj)    | Pu | Lu1 |
//! | Rv        | Flash to line     | Σ(Nl + Ndj)    | Pv | Lb1 |
//! | Rw        | Flash to line     | Σ(Nl + Ndj)    | Pw | Lc1 |
//! | Rz        | Flash near line   | ΣNi            | Pz | Lc1 |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::report::{Frequencies, ZoneFrequencies, ZoneRisk};
use crate::equations::pm;
use crate::zone::{CriticalityReason, ZoneParameters};

/// The eight R1 components of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LifeComponents {
    pub ra: f64,
    pub rb: f64,
    pub rc: f64,
    pub rm: f64,
    pub ru: f64,
    pub rv: f64,
    pub rw: f64,
    pub rz: f64,
}

impl LifeComponents {
    /// Sum of all eight components
    pub fn total(&self) -> f64 {
        self.ra + self.rb + self.rc + self.rm + self.ru + self.rv + self.rw + self.rz
    }
}

/// Probabilities and losses used for one zone.
///
/// The failure-related values (`pc`, `pms`, `pm`, `pw`, `pz`, `lm1`, `lw1`,
/// `lz1`) are zero for non-critical zones. `lc1` is always reported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LifeFactors {
    pub pa: f64,
    pub la1: f64,
    pub pb: f64,
    pub lb1: f64,
    pub pc: f64,
    pub lc1: f64,
    pub pms: f64,
    pub pm: f64,
    pub lm1: f64,
    pub pu: f64,
    pub lu1: f64,
    pub pv: f64,
    pub lv1: f64,
    pub pw: f64,
    pub lw1: f64,
    pub pz: f64,
    pub lz1: f64,
}

/// R1 breakdown of one zone.
///
/// ## JSON Example
///
/// ```json
/// {
///   "zone": "Ward",
///   "total": 3.4e-6,
///   "criticality": "Hospital",
///   "is_critical": true,
///   "components": { "ra": 2.0e-7, "rb": 4.0e-7, "rc": 4.0e-8, "...": "..." },
///   "frequencies": { "nd": 2.0e-3, "nm": 1.6, "nl": 0.04, "ndj": 0.0, "ni": 4.0 },
///   "factors": { "pa": 0.01, "la1": 1.0e-4, "...": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeZoneRisk {
    pub zone: String,
    pub total: f64,
    pub criticality: CriticalityReason,
    pub is_critical: bool,
    pub components: LifeComponents,
    pub frequencies: ZoneFrequencies,
    pub factors: LifeFactors,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub citations: BTreeMap<String, String>,
}

impl ZoneRisk for LifeZoneRisk {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn total(&self) -> f64 {
        self.total
    }
}

/// Evaluate R1 for one zone.
pub fn evaluate_zone(zone: &ZoneParameters, freq: &Frequencies) -> LifeZoneRisk {
    let criticality = zone.criticality();
    let is_critical = criticality.is_critical();

    let pb = zone.fire.pb;
    let pa = zone.shock.pa(pb);
    let la1 = zone.shock.la1();
    let lb1 = zone.fire.lb1();
    let lc1 = zone.system_failure.lc1();
    let pu = zone.line_shock.pu();
    let lu1 = zone.line_shock.lu1();
    let pv = zone.line_fire.pv();
    let lv1 = lb1;

    let mut factors = LifeFactors {
        pa,
        la1,
        pb,
        lb1,
        lc1,
        pu,
        lu1,
        pv,
        lv1,
        ..Default::default()
    };
    let mut components = LifeComponents {
        ra: freq.nd * pa * la1,
        rb: freq.nd * pb * lb1,
        ru: freq.over_direct(pu, lu1),
        rv: freq.over_direct(pv, lv1),
        ..Default::default()
    };

    if is_critical {
        factors.pc = zone.system_failure.pc();
        factors.pms = zone.shielding.pms();
        factors.pm = pm(zone.system_failure.pspd, factors.pms);
        factors.pw = zone.line_failure.pw();
        factors.pz = zone.induced_failure.pz();
        factors.lm1 = lc1;
        factors.lw1 = lc1;
        factors.lz1 = lc1;

        components.rc = freq.nd * factors.pc * lc1;
        components.rm = freq.nm * factors.pm * factors.lm1;
        components.rw = freq.over_direct(factors.pw, factors.lw1);
        components.rz = freq.over_induced(factors.pz, factors.lz1);
    }

    LifeZoneRisk {
        zone: zone.name.clone(),
        total: components.total(),
        criticality,
        is_critical,
        components,
        frequencies: freq.for_zone(),
        factors,
        citations: zone.citations.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::RiskEngine;
    use crate::lines::LineParameters;
    use crate::structure::GeometricParameters;
    use crate::zone::Occupancy;

    fn geometry() -> GeometricParameters {
        GeometricParameters {
            length_m: 10.0,
            width_m: 10.0,
            height_m: 10.0,
            ng: 2.0,
            cd: 1.0,
            ad_manual: Some(1000.0),
            am_manual: None,
        }
    }

    fn critical_zone(name: &str) -> ZoneParameters {
        let mut zone = ZoneParameters::new(name);
        zone.is_explosion_risk = true;
        zone.system_failure.pspd = 0.05;
        zone.system_failure.cld = 1.0;
        zone.system_failure.lo1 = 0.1;
        zone
    }

    #[test]
    fn test_ra_worked_example() {
        let mut zone = ZoneParameters::new("Z1");
        zone.shock.pta = 1.0;
        zone.shock.rt = 1e-2;
        zone.shock.lt = 1e-2;
        zone.shock.occupancy = Occupancy::default();
        zone.fire.pb = 1.0;

        let engine = RiskEngine::new(geometry(), vec![zone], vec![]).unwrap();
        let r1 = engine.compute_r1().unwrap();
        let z = r1.zone("Z1").unwrap();

        assert!((z.frequencies.nd - 2e-3).abs() < 1e-15);
        assert!((z.components.ra - 2e-7).abs() < 1e-20);
    }

    #[test]
    fn test_non_critical_zone_has_no_failure_components() {
        let mut zone = critical_zone("Office");
        zone.is_explosion_risk = false;
        let lines = vec![LineParameters::new("Power", 1000.0)];

        let engine = RiskEngine::new(geometry(), vec![zone], lines).unwrap();
        let r1 = engine.compute_r1().unwrap();
        let z = &r1.zones[0];

        assert_eq!(z.criticality, CriticalityReason::None);
        assert_eq!(z.components.rc, 0.0);
        assert_eq!(z.components.rm, 0.0);
        assert_eq!(z.components.rw, 0.0);
        assert_eq!(z.components.rz, 0.0);
        assert_eq!(z.factors.pc, 0.0);
        assert_eq!(z.factors.pm, 0.0);
        assert_eq!(z.factors.lz1, 0.0);
        // Lc1 is still reported
        assert!((z.factors.lc1 - 0.1).abs() < 1e-15);
        assert!(z.components.ru > 0.0);
    }

    #[test]
    fn test_critical_zone_has_failure_components() {
        let lines = vec![LineParameters::new("Power", 1000.0)];
        let engine = RiskEngine::new(geometry(), vec![critical_zone("Lab")], lines).unwrap();
        let r1 = engine.compute_r1().unwrap();
        let z = &r1.zones[0];

        assert!(z.is_critical);
        assert!(z.components.rc > 0.0);
        assert!(z.components.rm > 0.0);
        assert!(z.components.rw > 0.0);
        assert!(z.components.rz > 0.0);
        // Rc = Nd · Pspd · Cld · Lc1
        assert!((z.components.rc - 2e-3 * 0.05 * 0.1).abs() < 1e-18);
        assert_eq!(z.factors.lm1, z.factors.lc1);
    }

    #[test]
    fn test_hospital_flag_alone_is_critical() {
        let mut zone = critical_zone("Ward");
        zone.is_explosion_risk = false;
        zone.is_hospital = true;
        let engine = RiskEngine::new(geometry(), vec![zone], vec![]).unwrap();
        let z = &engine.compute_r1().unwrap().zones[0];
        assert_eq!(z.criticality, CriticalityReason::Hospital);
        assert!(z.components.rc > 0.0);
    }

    #[test]
    fn test_two_identical_lines_double_line_components() {
        let zone = critical_zone("Z1");
        let one = RiskEngine::new(geometry(), vec![zone.clone()], vec![LineParameters::new("A", 500.0)])
            .unwrap()
            .compute_r1()
            .unwrap();
        let two = RiskEngine::new(
            geometry(),
            vec![zone],
            vec![LineParameters::new("A", 500.0), LineParameters::new("B", 500.0)],
        )
        .unwrap()
        .compute_r1()
        .unwrap();

        let (c1, c2) = (one.zones[0].components, two.zones[0].components);
        assert_eq!(c2.ru, 2.0 * c1.ru);
        assert_eq!(c2.rv, 2.0 * c1.rv);
        assert_eq!(c2.rw, 2.0 * c1.rw);
        assert_eq!(c2.rz, 2.0 * c1.rz);
        assert_eq!(c2.ra, c1.ra);
    }

    #[test]
    fn test_no_lines_means_no_line_components() {
        let engine = RiskEngine::new(geometry(), vec![critical_zone("Z1")], vec![]).unwrap();
        let c = engine.compute_r1().unwrap().zones[0].components;
        assert_eq!(c.ru, 0.0);
        assert_eq!(c.rv, 0.0);
        assert_eq!(c.rw, 0.0);
        assert_eq!(c.rz, 0.0);
        assert!(c.ra > 0.0);
    }

    #[test]
    fn test_rv_uses_lb1() {
        let lines = vec![LineParameters::new("Power", 100.0)];
        let engine = RiskEngine::new(geometry(), vec![ZoneParameters::new("Z1")], lines).unwrap();
        let z = &engine.compute_r1().unwrap().zones[0];
        assert_eq!(z.factors.lv1, z.factors.lb1);
    }

    #[test]
    fn test_zone_total_is_component_sum() {
        let lines = vec![LineParameters::new("Power", 100.0)];
        let engine = RiskEngine::new(geometry(), vec![critical_zone("Z1")], lines).unwrap();
        let z = &engine.compute_r1().unwrap().zones[0];
        assert_eq!(z.total, z.components.total());
    }

    #[test]
    fn test_citations_carried_into_result() {
        let zone = ZoneParameters::new("Z1").with_citation("rf", "Table C.5");
        let engine = RiskEngine::new(geometry(), vec![zone], vec![]).unwrap();
        let z = &engine.compute_r1().unwrap().zones[0];
        assert_eq!(z.citations["rf"], "Table C.5");
    }
}
