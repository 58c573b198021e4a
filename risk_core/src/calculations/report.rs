//! Result containers shared by every risk type.

use serde::{Deserialize, Serialize};

use crate::lines::{LineFrequencies, LineTotals};

/// The risk indices computed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskKind {
    /// Loss of human life (including permanent injury)
    R1,
    /// Loss of service to the public
    R2,
    /// Loss of cultural heritage
    R3,
    /// Loss of economic value
    R4,
}

impl RiskKind {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskKind::R1 => "R1 - Loss of human life",
            RiskKind::R2 => "R2 - Loss of public service",
            RiskKind::R3 => "R3 - Loss of cultural heritage",
            RiskKind::R4 => "R4 - Loss of economic value",
        }
    }
}

/// Frequencies shared by every zone of one evaluation.
///
/// Computed once at the start of each `compute_*` call, before any zone is
/// evaluated, then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequencies {
    /// Flashes to the structure per year
    pub nd: f64,
    /// Flashes near the structure per year
    pub nm: f64,
    /// Per-line frequencies, in line order
    pub lines: Vec<LineFrequencies>,
    /// Sums over all lines
    pub totals: LineTotals,
}

impl Frequencies {
    /// Σ over lines of (Nl + Ndj)·P·L
    pub fn over_direct(&self, probability: f64, loss: f64) -> f64 {
        self.lines
            .iter()
            .map(|line| line.direct() * probability * loss)
            .sum()
    }

    /// Σ over lines of Ni·P·L
    pub fn over_induced(&self, probability: f64, loss: f64) -> f64 {
        self.lines
            .iter()
            .map(|line| line.ni * probability * loss)
            .sum()
    }

    /// The frequency block reported in each zone breakdown
    pub fn for_zone(&self) -> ZoneFrequencies {
        ZoneFrequencies {
            nd: self.nd,
            nm: self.nm,
            nl: self.totals.nl,
            ndj: self.totals.ndj,
            ni: self.totals.ni,
        }
    }
}

/// Frequencies as reported per zone (line values summed over all lines).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneFrequencies {
    pub nd: f64,
    pub nm: f64,
    pub nl: f64,
    pub ndj: f64,
    pub ni: f64,
}

/// Common view of a zone breakdown, used to aggregate totals.
pub trait ZoneRisk {
    /// Zone name
    fn zone(&self) -> &str;

    /// Sum of the zone's components
    fn total(&self) -> f64;
}

/// Result of one `compute_*` call.
///
/// ## JSON Example
///
/// ```json
/// {
///   "risk": "R1",
///   "total": 2.1e-7,
///   "ad": 1000.0,
///   "am": 805398.16,
///   "zones": [ { "zone": "Z1", "total": 2.1e-7, "...": "..." } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport<Z> {
    /// Which risk this report holds
    pub risk: RiskKind,

    /// Sum of all zone totals
    pub total: f64,

    /// Collection area Ad used (m²)
    pub ad: f64,

    /// Collection area Am used (m²)
    pub am: f64,

    /// Per-line frequencies of this evaluation
    pub lines: Vec<LineFrequencies>,

    /// Zone breakdowns, in input order
    pub zones: Vec<Z>,
}

impl<Z: ZoneRisk> RiskReport<Z> {
    /// Look up a zone breakdown by name
    pub fn zone(&self, name: &str) -> Option<&Z> {
        self.zones.iter().find(|z| z.zone() == name)
    }

    /// Zone names with their totals, largest first
    pub fn ranked_zones(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.zones.iter().map(|z| (z.zone(), z.total())).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}
