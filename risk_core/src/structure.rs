//! # Structure Geometry
//!
//! Dimensions and location of the structure being assessed, and the
//! collection areas derived from them.
//!
//! ## Example
//!
//! ```rust
//! use risk_core::structure::GeometricParameters;
//!
//! let geom = GeometricParameters {
//!     length_m: 20.0,
//!     width_m: 15.0,
//!     height_m: 10.0,
//!     ng: 2.0,
//!     cd: 0.5,
//!     ad_manual: None,
//!     am_manual: None,
//! };
//! geom.validate().unwrap();
//!
//! let areas = geom.collection_areas();
//! assert!(areas.ad > 300.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{
    direct_strike_frequency, near_collection_area, near_strike_frequency, resolve_area,
    structure_collection_area,
};
use crate::errors::{ensure_non_negative, ensure_positive, CalcResult};

/// Global geometric parameters for the structure.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_m": 20.0,
///   "width_m": 15.0,
///   "height_m": 10.0,
///   "ng": 2.0,
///   "cd": 0.5,
///   "ad_manual": null,
///   "am_manual": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricParameters {
    /// Structure length L (m)
    pub length_m: f64,

    /// Structure width W (m)
    pub width_m: f64,

    /// Structure height H (m)
    pub height_m: f64,

    /// Ground flash density Ng (flashes/km²/year)
    pub ng: f64,

    /// Location factor Cd (Table A.1: 0.25, 0.5, 1 or 2)
    pub cd: f64,

    /// Manually entered Ad (m²); replaces the derived value when set and non-zero
    #[serde(default)]
    pub ad_manual: Option<f64>,

    /// Manually entered Am (m²); replaces the derived value when set and non-zero
    #[serde(default)]
    pub am_manual: Option<f64>,
}

impl Default for GeometricParameters {
    /// A 20 ft shipping container standing on its own.
    fn default() -> Self {
        GeometricParameters {
            length_m: 6.058,
            width_m: 2.438,
            height_m: 2.896,
            ng: 1.0,
            cd: 1.0,
            ad_manual: None,
            am_manual: None,
        }
    }
}

impl GeometricParameters {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("structure.length_m", self.length_m)?;
        ensure_positive("structure.width_m", self.width_m)?;
        ensure_positive("structure.height_m", self.height_m)?;
        ensure_positive("structure.ng", self.ng)?;
        ensure_positive("structure.cd", self.cd)?;
        if let Some(ad) = self.ad_manual {
            ensure_non_negative("structure.ad_manual", ad)?;
        }
        if let Some(am) = self.am_manual {
            ensure_non_negative("structure.am_manual", am)?;
        }
        Ok(())
    }

    /// Collection areas, honouring manual overrides.
    pub fn collection_areas(&self) -> CollectionAreas {
        let derived_ad = structure_collection_area(self.length_m, self.width_m, self.height_m);
        let derived_am = near_collection_area(self.length_m, self.width_m);
        CollectionAreas {
            ad: resolve_area(self.ad_manual, derived_ad),
            am: resolve_area(self.am_manual, derived_am),
            ad_is_manual: self.ad_manual.is_some_and(|a| a != 0.0),
            am_is_manual: self.am_manual.is_some_and(|a| a != 0.0),
        }
    }
}

/// Collection areas of the structure, fixed for the life of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectionAreas {
    /// Area for flashes to the structure (m²)
    pub ad: f64,

    /// Area for flashes near the structure (m²)
    pub am: f64,

    /// `ad` came from a manual override
    pub ad_is_manual: bool,

    /// `am` came from a manual override
    pub am_is_manual: bool,
}

impl CollectionAreas {
    /// Nd for the given flash density and location factor
    pub fn nd(&self, ng: f64, cd: f64) -> f64 {
        direct_strike_frequency(ng, self.ad, cd)
    }

    /// Nm for the given flash density
    pub fn nm(&self, ng: f64) -> f64 {
        near_strike_frequency(ng, self.am)
    }
}
