//! # Collection Area Formulas
//!
//! Effective ground areas within which a lightning flash is taken to affect
//! the structure, its surroundings, or an incoming service line.
//!
//! ## Notation
//!
//! - `L`, `W`, `H` = Length, width and height of a rectangular structure (m)
//! - `Ad` = Collection area for flashes to the structure (m²)
//! - `Am` = Collection area for flashes near the structure (m²)
//! - `Adj` = Collection area of an adjacent structure at the far end of a line (m²)
//! - `Al` = Collection area for flashes to a line (m²)
//! - `Ai` = Collection area for flashes near a line (m²)
//!
//! ## References
//!
//! - IEC 62305-2, Annex A

use std::f64::consts::PI;

/// Radius around the structure within which a flash induces surges (m)
pub const NEAR_STRIKE_DISTANCE_M: f64 = 500.0;

/// `Al` per metre of line length
pub const LINE_DIRECT_AREA_FACTOR: f64 = 40.0;

/// `Ai` per metre of line length used when no other value is configured.
///
/// Published versions of the method disagree here (100 vs 4000 per metre,
/// a 40× spread in `Ni`); this default still needs confirmation against the
/// edition of the standard in use.
pub const DEFAULT_INDUCED_AREA_FACTOR: f64 = 4000.0;

/// Alternative `Ai` coefficient found in other versions of the method.
pub const ALTERNATE_INDUCED_AREA_FACTOR: f64 = 100.0;

// =============================================================================
// STRUCTURE AREAS
// =============================================================================

/// Collection area of an isolated rectangular structure
///
/// ```text
///        3H                    3H
///   ◄──────────►┌─────────┐◄──────────►
///               │    L×W  │
///               └─────────┘
/// ```
///
/// # Formula (IEC 62305-2 Eq. A.2)
/// Ad = L·W + 6·H·(L+W) + 9·π·H²
///
/// # Example
/// ```rust
/// use risk_core::equations::areas::structure_collection_area;
///
/// let ad = structure_collection_area(10.0, 10.0, 10.0);
/// // 100 + 1200 + 900π = 4127.43 m²
/// assert!((ad - 4127.43).abs() < 0.01);
/// ```
#[inline]
pub fn structure_collection_area(l: f64, w: f64, h: f64) -> f64 {
    (l * w) + (6.0 * h * (l + w)) + (9.0 * PI * h.powi(2))
}

/// Collection area for flashes striking near the structure
///
/// # Formula (IEC 62305-2 Eq. A.7)
/// Am = 2·500·(L+W) + π·500²
///
/// # Example
/// ```rust
/// use risk_core::equations::areas::near_collection_area;
///
/// let am = near_collection_area(10.0, 10.0);
/// assert!((am - 805_398.16).abs() < 0.01);
/// ```
#[inline]
pub fn near_collection_area(l: f64, w: f64) -> f64 {
    let dm = NEAR_STRIKE_DISTANCE_M;
    (2.0 * dm * (l + w)) + (PI * dm.powi(2))
}

/// Collection area of the adjacent structure at the far end of a line.
///
/// Uses the `Ad` formula. All-zero dimensions mean "no adjacent structure"
/// and return exactly 0.
#[inline]
pub fn adjacent_collection_area(lj: f64, wj: f64, hj: f64) -> f64 {
    if lj == 0.0 && wj == 0.0 && hj == 0.0 {
        return 0.0;
    }
    structure_collection_area(lj, wj, hj)
}

/// Pick a manually entered area over the derived one.
///
/// A missing or zero override means "not set"; the two values are never blended.
///
/// # Example
/// ```rust
/// use risk_core::equations::areas::resolve_area;
///
/// assert_eq!(resolve_area(Some(500.0), 4127.4), 500.0);
/// assert_eq!(resolve_area(Some(0.0), 4127.4), 4127.4);
/// assert_eq!(resolve_area(None, 4127.4), 4127.4);
/// ```
#[inline]
pub fn resolve_area(manual: Option<f64>, derived: f64) -> f64 {
    match manual {
        Some(area) if area != 0.0 => area,
        _ => derived,
    }
}

// =============================================================================
// LINE AREAS
// =============================================================================

/// Collection area for flashes to a line: Al = 40·Ll
#[inline]
pub fn line_direct_area(length_m: f64) -> f64 {
    LINE_DIRECT_AREA_FACTOR * length_m
}

/// Collection area for flashes near a line: Ai = k·Ll
///
/// `factor` is the configured `k` (see [`DEFAULT_INDUCED_AREA_FACTOR`]).
#[inline]
pub fn line_induced_area(length_m: f64, factor: f64) -> f64 {
    factor * length_m
}
