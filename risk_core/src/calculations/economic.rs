//! # R4 - Risk of Loss of Economic Value
//!
//! ```text
//! R4 = Ra4* + Rb4 + Rc4 + Rm4 + Ru4* + Rv4 + Rw4 + Rz4
//! ```
//!
//! `Ra4` and `Ru4` (injury to animals) are computed only for zones with
//! `has_animal_loss`. Losses are fractions of the zone's total value `ct`:
//!
//! - `La4 = Lu4 = rt·Lt·(ca/ct)`
//! - `Lb4 = Lv4 = rp·rf·Lf4·((ca+cb+cc+cs)/ct)`
//! - `Lc4 = Lm4 = Lw4 = Lz4 = Lo4·(cs/ct)`
//!
//! With `ct = 0` every loss, and so every component, is zero.
//!
//! `Pms` for `Rm4` is built from the zone's R2 shielding overrides, the same
//! values `Rm2` uses.

use serde::{Deserialize, Serialize};

use super::report::{Frequencies, ZoneFrequencies, ZoneRisk};
use crate::equations::pm;
use crate::zone::ZoneParameters;

/// The eight R4 components of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EconomicComponents {
    pub ra4: f64,
    pub rb4: f64,
    pub rc4: f64,
    pub rm4: f64,
    pub ru4: f64,
    pub rv4: f64,
    pub rw4: f64,
    pub rz4: f64,
}

impl EconomicComponents {
    pub fn total(&self) -> f64 {
        self.ra4 + self.rb4 + self.rc4 + self.rm4 + self.ru4 + self.rv4 + self.rw4 + self.rz4
    }
}

/// Probabilities and losses used for one zone (all reported as computed).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EconomicFactors {
    pub pa: f64,
    pub pb: f64,
    pub pc: f64,
    pub pms: f64,
    pub pm: f64,
    pub pu: f64,
    pub pv: f64,
    pub pw: f64,
    pub pz: f64,
    pub la4: f64,
    pub lb4: f64,
    pub lc4: f64,
}

/// R4 breakdown of one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicZoneRisk {
    pub zone: String,
    pub total: f64,
    pub has_animal_loss: bool,
    /// Total value ct the losses are relative to
    pub total_value: f64,
    pub components: EconomicComponents,
    pub frequencies: ZoneFrequencies,
    pub factors: EconomicFactors,
}

impl EconomicZoneRisk {
    /// Expected annual loss in currency: R4_zone · ct
    pub fn annual_loss(&self) -> f64 {
        self.total * self.total_value
    }
}

impl ZoneRisk for EconomicZoneRisk {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn total(&self) -> f64 {
        self.total
    }
}

/// Evaluate R4 for one zone.
pub fn evaluate_zone(zone: &ZoneParameters, freq: &Frequencies) -> EconomicZoneRisk {
    let econ = &zone.economic;
    let pb = zone.fire.pb;
    let pms = zone.service_shielding().pms();

    let factors = EconomicFactors {
        pa: zone.shock.pa(pb),
        pb,
        pc: zone.system_failure.pc(),
        pms,
        pm: pm(zone.system_failure.pspd, pms),
        pu: zone.line_shock.pu(),
        pv: zone.line_fire.pv(),
        pw: zone.line_failure.pw(),
        pz: zone.induced_failure.pz(),
        la4: econ.la4(&zone.shock),
        lb4: econ.lb4(&zone.fire),
        lc4: econ.lc4(),
    };

    let mut components = EconomicComponents {
        rb4: freq.nd * factors.pb * factors.lb4,
        rc4: freq.nd * factors.pc * factors.lc4,
        rm4: freq.nm * factors.pm * factors.lc4,
        rv4: freq.over_direct(factors.pv, factors.lb4),
        rw4: freq.over_direct(factors.pw, factors.lc4),
        rz4: freq.over_induced(factors.pz, factors.lc4),
        ..Default::default()
    };
    if zone.has_animal_loss {
        components.ra4 = freq.nd * factors.pa * factors.la4;
        components.ru4 = freq.over_direct(factors.pu, factors.la4);
    }

    EconomicZoneRisk {
        zone: zone.name.clone(),
        total: components.total(),
        has_animal_loss: zone.has_animal_loss,
        total_value: econ.ct,
        components,
        frequencies: freq.for_zone(),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::RiskEngine;
    use crate::lines::LineParameters;
    use crate::structure::GeometricParameters;
    use crate::zone::EconomicLoss;

    fn geometry() -> GeometricParameters {
        GeometricParameters {
            length_m: 40.0,
            width_m: 20.0,
            height_m: 6.0,
            ng: 2.5,
            cd: 1.0,
            ad_manual: None,
            am_manual: None,
        }
    }

    fn farm_zone(animals: bool) -> ZoneParameters {
        let mut zone = ZoneParameters::new("Barn");
        zone.has_animal_loss = animals;
        zone.economic = EconomicLoss {
            ca: 50_000.0,
            cb: 200_000.0,
            cc: 30_000.0,
            cs: 20_000.0,
            ct: 300_000.0,
            ..Default::default()
        };
        zone
    }

    fn lines() -> Vec<LineParameters> {
        vec![LineParameters::new("Power", 400.0)]
    }

    #[test]
    fn test_animal_components_gated() {
        let without = RiskEngine::new(geometry(), vec![farm_zone(false)], lines())
            .unwrap()
            .compute_r4()
            .unwrap();
        let with = RiskEngine::new(geometry(), vec![farm_zone(true)], lines())
            .unwrap()
            .compute_r4()
            .unwrap();

        let (a, b) = (without.zones[0].components, with.zones[0].components);
        assert_eq!(a.ra4, 0.0);
        assert_eq!(a.ru4, 0.0);
        assert!(b.ra4 > 0.0);
        assert!(b.ru4 > 0.0);
        assert_eq!(a.rb4, b.rb4);
        assert_eq!(a.rm4, b.rm4);
        // La4 is reported either way
        assert!(without.zones[0].factors.la4 > 0.0);
    }

    #[test]
    fn test_zero_total_value_gives_zero_risk() {
        let mut zone = farm_zone(true);
        zone.economic.ct = 0.0;
        let r4 = RiskEngine::new(geometry(), vec![zone], lines())
            .unwrap()
            .compute_r4()
            .unwrap();
        assert_eq!(r4.total, 0.0);
        assert_eq!(r4.zones[0].annual_loss(), 0.0);
    }

    #[test]
    fn test_rm4_uses_service_shielding_overrides() {
        let base = farm_zone(false);
        let mut overridden = base.clone();
        overridden.service.shielding.uw = Some(4.0);

        let a = RiskEngine::new(geometry(), vec![base], vec![]).unwrap().compute_r4().unwrap();
        let b = RiskEngine::new(geometry(), vec![overridden], vec![]).unwrap().compute_r4().unwrap();
        assert!(b.zones[0].components.rm4 < a.zones[0].components.rm4);

        let r2 = RiskEngine::new(geometry(), vec![farm_zone(false)], vec![]).unwrap().compute_r2().unwrap();
        assert_eq!(r2.zones[0].factors.pms, a.zones[0].factors.pms);
    }

    #[test]
    fn test_rc4_formula() {
        let engine = RiskEngine::new(geometry(), vec![farm_zone(false)], vec![]).unwrap();
        let nd = engine.frequencies().nd;
        let z = &engine.compute_r4().unwrap().zones[0];
        // Lc4 = 0.01 · 20000/300000
        let lc4 = 0.01 * (20_000.0 / 300_000.0);
        assert!((z.factors.lc4 - lc4).abs() < 1e-15);
        assert!((z.components.rc4 - nd * 0.02 * lc4).abs() < 1e-15);
    }

    #[test]
    fn test_annual_loss() {
        let r4 = RiskEngine::new(geometry(), vec![farm_zone(true)], lines())
            .unwrap()
            .compute_r4()
            .unwrap();
        let z = &r4.zones[0];
        assert_eq!(z.total_value, 300_000.0);
        assert!((z.annual_loss() - z.total * 300_000.0).abs() < 1e-9);
    }
}
