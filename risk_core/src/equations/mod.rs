//! # IEC 62305-2 Equations
//!
//! The closed-form formulas the risk engine is assembled from. Keeping them
//! in one place makes each one easy to check against the standard and keeps
//! the engine code down to "which value goes where".
//!
//! ## Modules
//!
//! - [`areas`] - Collection areas of the structure, its surroundings and lines
//! - [`frequency`] - Annual numbers of dangerous events (Nd, Nm, Nl, Ndj, Ni)
//! - [`shielding`] - Ks1..Ks4 and the surge probability Pms
//! - [`loss`] - Occupancy and value fractions used by the loss factors
//!
//! ## Units
//!
//! - Lengths in metres, areas in m²
//! - Ground flash density Ng in flashes/km²/year
//! - Withstand voltage Uw in kV
//! - Presence time tz in hours/year
//!
//! ## References
//!
//! - IEC 62305-2: Protection against lightning - Risk management

pub mod areas;
pub mod frequency;
pub mod loss;
pub mod shielding;

pub use areas::{
    adjacent_collection_area,
    line_direct_area,
    line_induced_area,
    near_collection_area,
    resolve_area,
    structure_collection_area,
    DEFAULT_INDUCED_AREA_FACTOR,
};

pub use frequency::{
    adjacent_strike_frequency,
    direct_strike_frequency,
    induced_surge_frequency,
    line_strike_frequency,
    near_strike_frequency,
};

pub use loss::{occupancy_fraction, population_fraction, value_ratio, HOURS_PER_YEAR};

pub use shielding::{ks1, ks2, ks4, pm, pms};
