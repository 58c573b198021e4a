//! # Risk Calculations
//!
//! [`RiskEngine`] evaluates the IEC 62305-2 risk components for every zone
//! of a structure. Each risk type lives in its own module and follows the
//! same pattern:
//!
//! - `*Components` - the named sub-risks that sum to the zone total
//! - `*Factors` - every probability and loss value used, for audit
//! - `*ZoneRisk` - one zone's breakdown (JSON-serializable)
//! - `evaluate_zone(zone, frequencies)` - pure per-zone function
//!
//! ## Available Risks
//!
//! - [`life`] - R1 = Ra + Rb + Rc* + Rm* + Ru + Rv + Rw* + Rz*
//! - [`service`] - R2 = Rb2 + Rc2 + Rm2 + Rv2 + Rw2 + Rz2
//! - [`heritage`] - R3 = Rb3 + Rv3
//! - [`economic`] - R4 = Ra4* + Rb4 + Rc4 + Rm4 + Ru4* + Rv4 + Rw4 + Rz4
//!
//! ## Example
//!
//! ```rust
//! use risk_core::calculations::RiskEngine;
//! use risk_core::lines::LineParameters;
//! use risk_core::structure::GeometricParameters;
//! use risk_core::zone::ZoneParameters;
//!
//! let geometry = GeometricParameters {
//!     length_m: 20.0,
//!     width_m: 10.0,
//!     height_m: 10.0,
//!     ng: 2.0,
//!     cd: 1.0,
//!     ad_manual: None,
//!     am_manual: None,
//! };
//! let zones = vec![ZoneParameters::new("Zone 1")];
//! let lines = vec![LineParameters::new("Power", 100.0)];
//!
//! let engine = RiskEngine::new(geometry, zones, lines).unwrap();
//! let r1 = engine.compute_r1().unwrap();
//!
//! println!("R1 = {:.3e}", r1.total);
//! assert!(r1.total > 0.0);
//! assert!(r1.zone("Zone 1").is_some());
//! ```

pub mod economic;
pub mod heritage;
pub mod life;
pub mod report;
pub mod service;

use std::collections::HashSet;

use rayon::prelude::*;

use crate::errors::{CalcError, CalcResult};
use crate::lines::{LineParameters, LineTotals};
use crate::settings::EngineSettings;
use crate::structure::{CollectionAreas, GeometricParameters};
use crate::zone::ZoneParameters;

pub use economic::EconomicZoneRisk;
pub use heritage::HeritageZoneRisk;
pub use life::LifeZoneRisk;
pub use report::{Frequencies, RiskKind, RiskReport, ZoneFrequencies, ZoneRisk};
pub use service::ServiceZoneRisk;

/// Risk calculation engine for one structure.
///
/// Inputs are validated on construction and never change afterwards, so
/// every `compute_*` call is a pure function of the engine.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    geometry: GeometricParameters,
    zones: Vec<ZoneParameters>,
    lines: Vec<LineParameters>,
    settings: EngineSettings,
    areas: CollectionAreas,
}

impl RiskEngine {
    /// Create an engine with default settings.
    ///
    /// # Returns
    ///
    /// * `Ok(RiskEngine)` - all inputs valid
    /// * `Err(CalcError)` - the first invalid input found
    pub fn new(
        geometry: GeometricParameters,
        zones: Vec<ZoneParameters>,
        lines: Vec<LineParameters>,
    ) -> CalcResult<Self> {
        Self::with_settings(geometry, zones, lines, EngineSettings::default())
    }

    /// Create an engine with explicit settings.
    pub fn with_settings(
        geometry: GeometricParameters,
        zones: Vec<ZoneParameters>,
        lines: Vec<LineParameters>,
        settings: EngineSettings,
    ) -> CalcResult<Self> {
        settings.validate()?;
        geometry.validate()?;
        for (index, line) in lines.iter().enumerate() {
            line.validate(index)?;
        }

        let mut seen = HashSet::new();
        for (index, zone) in zones.iter().enumerate() {
            zone.validate(index)?;
            if !seen.insert(zone.name.as_str()) {
                return Err(CalcError::duplicate_zone(&zone.name));
            }
        }

        let areas = geometry.collection_areas();
        if !areas.ad.is_finite() || !areas.am.is_finite() {
            return Err(CalcError::calculation_failed(
                "collection areas",
                format!("Ad = {}, Am = {} are not finite", areas.ad, areas.am),
            ));
        }

        Ok(RiskEngine {
            geometry,
            zones,
            lines,
            settings,
            areas,
        })
    }

    /// Collection areas Ad and Am
    pub fn areas(&self) -> CollectionAreas {
        self.areas
    }

    /// Settings in effect
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Zones in evaluation order
    pub fn zones(&self) -> &[ZoneParameters] {
        &self.zones
    }

    /// Nd, Nm and per-line frequencies.
    pub fn frequencies(&self) -> Frequencies {
        let ng = self.geometry.ng;
        let lines: Vec<_> = self
            .lines
            .iter()
            .map(|line| line.frequencies(ng, self.settings.induced_area_factor))
            .collect();
        Frequencies {
            nd: self.areas.nd(ng, self.geometry.cd),
            nm: self.areas.nm(ng),
            totals: LineTotals::sum(&lines),
            lines,
        }
    }

    /// R1: risk of loss of human life.
    pub fn compute_r1(&self) -> CalcResult<RiskReport<LifeZoneRisk>> {
        self.evaluate(RiskKind::R1, life::evaluate_zone)
    }

    /// R2: risk of loss of public service.
    pub fn compute_r2(&self) -> CalcResult<RiskReport<ServiceZoneRisk>> {
        self.evaluate(RiskKind::R2, service::evaluate_zone)
    }

    /// R3: risk of loss of cultural heritage.
    pub fn compute_r3(&self) -> CalcResult<RiskReport<HeritageZoneRisk>> {
        self.evaluate(RiskKind::R3, heritage::evaluate_zone)
    }

    /// R4: risk of loss of economic value.
    pub fn compute_r4(&self) -> CalcResult<RiskReport<EconomicZoneRisk>> {
        self.evaluate(RiskKind::R4, economic::evaluate_zone)
    }

    /// Shared driver: frequencies first, then every zone in parallel.
    fn evaluate<Z, F>(&self, risk: RiskKind, evaluate_zone: F) -> CalcResult<RiskReport<Z>>
    where
        Z: ZoneRisk + Send,
        F: Fn(&ZoneParameters, &Frequencies) -> Z + Sync,
    {
        let frequencies = self.frequencies();

        let zones: Vec<Z> = self
            .zones
            .par_iter()
            .map(|zone| evaluate_zone(zone, &frequencies))
            .collect();

        let total: f64 = zones.iter().map(|z| z.total()).sum();

        if let Some(bad) = zones.iter().find(|z| !z.total().is_finite()) {
            return Err(CalcError::calculation_failed(
                format!("{:?}", risk),
                format!("zone '{}' produced a non-finite total", bad.zone()),
            ));
        }
        if !total.is_finite() {
            return Err(CalcError::calculation_failed(
                format!("{:?}", risk),
                "total is not finite",
            ));
        }

        Ok(RiskReport {
            risk,
            total,
            ad: self.areas.ad,
            am: self.areas.am,
            lines: frequencies.lines,
            zones,
        })
    }
}
