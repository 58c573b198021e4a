//! # R2 - Risk of Loss of Public Service
//!
//! ```text
//! R2 = Rb2 + Rc2 + Rm2 + Rv2 + Rw2 + Rz2
//! ```
//!
//! All six components are always computed; the R1 criticality flags play
//! no part. Probabilities are the R1 ones, except that `Pms` uses the zone's
//! R2 shielding overrides where they are set. Losses depend on the share of
//! users served (`nz/nt`), not on presence time. Without R2 overrides that
//! share is the zone's base occupancy, the one used for Ra.

use serde::{Deserialize, Serialize};

use super::report::{Frequencies, ZoneFrequencies, ZoneRisk};
use crate::equations::pm;
use crate::zone::ZoneParameters;

/// The six R2 components of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceComponents {
    pub rb2: f64,
    pub rc2: f64,
    pub rm2: f64,
    pub rv2: f64,
    pub rw2: f64,
    pub rz2: f64,
}

impl ServiceComponents {
    pub fn total(&self) -> f64 {
        self.rb2 + self.rc2 + self.rm2 + self.rv2 + self.rw2 + self.rz2
    }
}

/// Probabilities and losses used for one zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceFactors {
    pub pb: f64,
    pub pc: f64,
    pub pms: f64,
    pub pm: f64,
    pub pv: f64,
    pub pw: f64,
    pub pz: f64,
    /// nz/nt after overrides
    pub served_fraction: f64,
    pub lb2: f64,
    pub lc2: f64,
}

/// R2 breakdown of one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceZoneRisk {
    pub zone: String,
    pub total: f64,
    pub components: ServiceComponents,
    pub frequencies: ZoneFrequencies,
    pub factors: ServiceFactors,
}

impl ZoneRisk for ServiceZoneRisk {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn total(&self) -> f64 {
        self.total
    }
}

/// Evaluate R2 for one zone.
pub fn evaluate_zone(zone: &ZoneParameters, freq: &Frequencies) -> ServiceZoneRisk {
    let served_fraction = zone.service.served_fraction(&zone.shock.occupancy);
    let lb2 = zone.service.lb2(&zone.fire, served_fraction);
    let lc2 = zone.service.lc2(served_fraction);

    let pms = zone.service_shielding().pms();
    let factors = ServiceFactors {
        pb: zone.fire.pb,
        pc: zone.system_failure.pc(),
        pms,
        pm: pm(zone.system_failure.pspd, pms),
        pv: zone.line_fire.pv(),
        pw: zone.line_failure.pw(),
        pz: zone.induced_failure.pz(),
        served_fraction,
        lb2,
        lc2,
    };

    // Lv2 = Lb2, Lm2 = Lw2 = Lz2 = Lc2
    let components = ServiceComponents {
        rb2: freq.nd * factors.pb * lb2,
        rc2: freq.nd * factors.pc * lc2,
        rm2: freq.nm * factors.pm * lc2,
        rv2: freq.over_direct(factors.pv, lb2),
        rw2: freq.over_direct(factors.pw, lc2),
        rz2: freq.over_induced(factors.pz, lc2),
    };

    ServiceZoneRisk {
        zone: zone.name.clone(),
        total: components.total(),
        components,
        frequencies: freq.for_zone(),
        factors,
    }
}
