//! # Incoming Service Lines
//!
//! Each line (power, telecom, ...) entering the structure brings its own
//! exposure: flashes to the line itself, to the structure at its far end,
//! and flashes near the line that induce surges.
//!
//! ```text
//!   adjacent        line (length Ll)
//!   structure ──────────────────────────── structure
//!     Ndj              Nl, Ni                 Nd, Nm
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{
    adjacent_collection_area, adjacent_strike_frequency, induced_surge_frequency, line_direct_area,
    line_induced_area, line_strike_frequency,
};
use crate::errors::{ensure_non_negative, CalcResult};

/// Structure at the far end of a line ("adjacent structure").
///
/// All-zero dimensions mean there is none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacentStructure {
    /// Length Lj (m)
    pub length_m: f64,
    /// Width Wj (m)
    pub width_m: f64,
    /// Height Hj (m)
    pub height_m: f64,
    /// Location factor Cdj (Table A.1)
    pub cdj: f64,
}

impl Default for AdjacentStructure {
    fn default() -> Self {
        AdjacentStructure {
            length_m: 0.0,
            width_m: 0.0,
            height_m: 0.0,
            cdj: 1.0,
        }
    }
}

impl AdjacentStructure {
    /// Whether an adjacent structure is present
    pub fn exists(&self) -> bool {
        !(self.length_m == 0.0 && self.width_m == 0.0 && self.height_m == 0.0)
    }

    /// Collection area Adj (m²), 0 when absent
    pub fn collection_area(&self) -> f64 {
        adjacent_collection_area(self.length_m, self.width_m, self.height_m)
    }
}

/// Parameters for one incoming service line.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Power",
///   "length_m": 1000.0,
///   "ci": 0.5,
///   "ce": 1.0,
///   "ct": 0.2,
///   "adjacent": { "length_m": 0, "width_m": 0, "height_m": 0, "cdj": 1.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineParameters {
    /// Line label (e.g., "Power", "Telecom")
    pub name: String,

    /// Line length Ll (m)
    pub length_m: f64,

    /// Installation factor Ci (Table A.2)
    #[serde(default = "default_ci")]
    pub ci: f64,

    /// Environment factor Ce (Table A.4)
    #[serde(default = "default_ce")]
    pub ce: f64,

    /// Line type factor Ct (Table A.3)
    #[serde(default = "default_ct")]
    pub ct: f64,

    /// Optional structure at the far end of the line
    #[serde(default)]
    pub adjacent: AdjacentStructure,
}

fn default_ci() -> f64 {
    0.5
}

fn default_ce() -> f64 {
    1.0
}

fn default_ct() -> f64 {
    0.2
}

impl Default for LineParameters {
    /// 1 km buried rural power line fed through a HV/LV transformer.
    fn default() -> Self {
        LineParameters {
            name: "Power".to_string(),
            length_m: 1000.0,
            ci: default_ci(),
            ce: default_ce(),
            ct: default_ct(),
            adjacent: AdjacentStructure::default(),
        }
    }
}

impl LineParameters {
    /// Create a line with default factors
    pub fn new(name: impl Into<String>, length_m: f64) -> Self {
        LineParameters {
            name: name.into(),
            length_m,
            ..Default::default()
        }
    }

    /// Attach an adjacent structure (builder pattern)
    pub fn with_adjacent(mut self, adjacent: AdjacentStructure) -> Self {
        self.adjacent = adjacent;
        self
    }

    /// Validate input parameters. `index` locates the line in error messages.
    pub fn validate(&self, index: usize) -> CalcResult<()> {
        let field = |name: &str| format!("lines[{}].{}", index, name);
        ensure_non_negative(field("length_m"), self.length_m)?;
        ensure_non_negative(field("ci"), self.ci)?;
        ensure_non_negative(field("ce"), self.ce)?;
        ensure_non_negative(field("ct"), self.ct)?;
        ensure_non_negative(field("adjacent.length_m"), self.adjacent.length_m)?;
        ensure_non_negative(field("adjacent.width_m"), self.adjacent.width_m)?;
        ensure_non_negative(field("adjacent.height_m"), self.adjacent.height_m)?;
        ensure_non_negative(field("adjacent.cdj"), self.adjacent.cdj)?;
        Ok(())
    }

    /// Event frequencies for this line.
    ///
    /// `induced_area_factor` is the `Ai` coefficient per metre of line.
    pub fn frequencies(&self, ng: f64, induced_area_factor: f64) -> LineFrequencies {
        let al = line_direct_area(self.length_m);
        let ai = line_induced_area(self.length_m, induced_area_factor);
        let adj = self.adjacent.collection_area();

        LineFrequencies {
            line: self.name.clone(),
            al,
            ai,
            adj,
            nl: line_strike_frequency(ng, al, self.ci, self.ce, self.ct),
            ndj: adjacent_strike_frequency(ng, adj, self.adjacent.cdj, self.ct),
            ni: induced_surge_frequency(ng, ai, self.ci, self.ce, self.ct),
        }
    }
}

/// Per-line areas and frequencies, computed once per risk evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFrequencies {
    /// Line name
    pub line: String,
    /// Al (m²)
    pub al: f64,
    /// Ai (m²)
    pub ai: f64,
    /// Adj (m²)
    pub adj: f64,
    /// Flashes to the line per year
    pub nl: f64,
    /// Flashes to the adjacent structure per year
    pub ndj: f64,
    /// Flashes near the line per year
    pub ni: f64,
}

impl LineFrequencies {
    /// Nl + Ndj: events that inject current directly into the line
    pub fn direct(&self) -> f64 {
        self.nl + self.ndj
    }
}

/// Sums of line frequencies over every line, as reported in zone breakdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Σ Nl
    pub nl: f64,
    /// Σ Ndj
    pub ndj: f64,
    /// Σ Ni
    pub ni: f64,
}

impl LineTotals {
    /// Sum the frequencies of every line
    pub fn sum(lines: &[LineFrequencies]) -> Self {
        lines.iter().fold(LineTotals::default(), |acc, l| LineTotals {
            nl: acc.nl + l.nl,
            ndj: acc.ndj + l.ndj,
            ni: acc.ni + l.ni,
        })
    }
}
