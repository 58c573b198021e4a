//! # Loss Fractions
//!
//! Building blocks of the relative loss factors `L`: the share of people
//! exposed in a zone, the share of the year they are there, and the share of
//! the economic or heritage value held by the zone.

/// Hours in a year (denominator of `tz/8760`)
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// (nz/nt)·(tz/8760): fraction of people in the zone weighted by presence time
///
/// # Example
/// ```rust
/// use risk_core::equations::loss::occupancy_fraction;
///
/// // 10 of 100 people, present 2190 h/yr
/// assert!((occupancy_fraction(10.0, 100.0, 2190.0) - 0.025).abs() < 1e-12);
/// ```
#[inline]
pub fn occupancy_fraction(nz: f64, nt: f64, tz: f64) -> f64 {
    (nz / nt) * (tz / HOURS_PER_YEAR)
}

/// nz/nt: fraction of the served population in the zone (no time weighting)
#[inline]
pub fn population_fraction(nz: f64, nt: f64) -> f64 {
    nz / nt
}

/// part/total, or 0 when the total value is zero.
///
/// An absent economic base contributes no loss.
///
/// # Example
/// ```rust
/// use risk_core::equations::loss::value_ratio;
///
/// assert_eq!(value_ratio(50.0, 200.0), 0.25);
/// assert_eq!(value_ratio(50.0, 0.0), 0.0);
/// ```
#[inline]
pub fn value_ratio(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    part / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_occupancy() {
        assert_eq!(occupancy_fraction(1.0, 1.0, HOURS_PER_YEAR), 1.0);
    }

    #[test]
    fn test_population_fraction() {
        assert_eq!(population_fraction(25.0, 100.0), 0.25);
    }

    #[test]
    fn test_value_ratio_guard() {
        assert_eq!(value_ratio(0.0, 0.0), 0.0);
        assert_eq!(value_ratio(1000.0, 0.0), 0.0);
        assert_eq!(value_ratio(1000.0, 4000.0), 0.25);
    }
}
