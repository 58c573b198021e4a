//! # R3 - Risk of Loss of Cultural Heritage
//!
//! ```text
//! R3 = Rb3 + Rv3
//! ```
//!
//! Only physical damage counts. `Lv3 = Lb3 = rp·rf·Lf3·(cz/ct)`, which is
//! zero when the zone has no heritage value or `ct = 0`.

use serde::{Deserialize, Serialize};

use super::report::{Frequencies, ZoneFrequencies, ZoneRisk};
use crate::zone::ZoneParameters;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeritageComponents {
    pub rb3: f64,
    pub rv3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeritageFactors {
    pub pb: f64,
    pub pv: f64,
    pub lb3: f64,
}

/// R3 breakdown of one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageZoneRisk {
    pub zone: String,
    pub total: f64,
    pub components: HeritageComponents,
    pub frequencies: ZoneFrequencies,
    pub factors: HeritageFactors,
}

impl ZoneRisk for HeritageZoneRisk {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn total(&self) -> f64 {
        self.total
    }
}

/// Evaluate R3 for one zone.
pub fn evaluate_zone(zone: &ZoneParameters, freq: &Frequencies) -> HeritageZoneRisk {
    let factors = HeritageFactors {
        pb: zone.fire.pb,
        pv: zone.line_fire.pv(),
        lb3: zone.heritage.lb3(&zone.fire),
    };
    let components = HeritageComponents {
        rb3: freq.nd * factors.pb * factors.lb3,
        rv3: freq.over_direct(factors.pv, factors.lb3),
    };

    HeritageZoneRisk {
        zone: zone.name.clone(),
        total: components.rb3 + components.rv3,
        components,
        frequencies: freq.for_zone(),
        factors,
    }
}
