//! # Shielding and Withstand Factors
//!
//! Reduction factors that describe how well the structure's spatial shields,
//! internal wiring and equipment withstand voltage limit the surge reaching
//! internal systems when lightning strikes nearby.
//!
//! ```text
//! Pms = (Ks1 × Ks2 × Ks3 × Ks4)²
//! Pm  = Pspd × Pms
//! ```
//!
//! ## Reference
//!
//! IEC 62305-2, Annex B (Eq. B.5 – B.7)

/// Ks1/Ks2 slope per metre of mesh width
pub const MESH_WIDTH_SLOPE: f64 = 0.12;

/// Ks1 = 0.12·wm1, saturating at 1.0
///
/// # Example
/// ```rust
/// use risk_core::equations::shielding::ks1;
///
/// assert!((ks1(5.0) - 0.6).abs() < 1e-12);
/// assert_eq!(ks1(10.0), 1.0);
/// ```
#[inline]
pub fn ks1(wm1: f64) -> f64 {
    (MESH_WIDTH_SLOPE * wm1).min(1.0)
}

/// Ks2 = 0.12·wm2, saturating at 1.0
#[inline]
pub fn ks2(wm2: f64) -> f64 {
    (MESH_WIDTH_SLOPE * wm2).min(1.0)
}

/// Ks4 = 1/Uw, capped at 1.0. A withstand voltage of zero or below gives 1.0.
#[inline]
pub fn ks4(uw_kv: f64) -> f64 {
    if uw_kv <= 0.0 {
        return 1.0;
    }
    (1.0 / uw_kv).min(1.0)
}

/// Pms = (Ks1·Ks2·Ks3·Ks4)²
#[inline]
pub fn pms(wm1: f64, wm2: f64, ks3: f64, uw_kv: f64) -> f64 {
    (ks1(wm1) * ks2(wm2) * ks3 * ks4(uw_kv)).powi(2)
}

/// Pm = Pspd·Pms
#[inline]
pub fn pm(pspd: f64, pms: f64) -> f64 {
    pspd * pms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ks1_saturates() {
        assert!((ks1(5.0) - 0.6).abs() < 1e-12);
        assert_eq!(ks1(10.0), 1.0);
        assert_eq!(ks1(100.0), 1.0);
        assert_eq!(ks1(0.0), 0.0);
    }

    #[test]
    fn test_ks2_matches_ks1() {
        for w in [0.5, 2.0, 8.0, 9.0] {
            assert_eq!(ks1(w), ks2(w));
        }
    }

    #[test]
    fn test_ks4_guard() {
        assert_eq!(ks4(0.0), 1.0);
        assert_eq!(ks4(-2.5), 1.0);
        assert_eq!(ks4(0.5), 1.0);
        assert!((ks4(2.5) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_pms_defaults() {
        // wm = 2 m, unshielded wiring, Uw = 1 kV: (0.24 · 0.24 · 1 · 1)²
        let p = pms(2.0, 2.0, 1.0, 1.0);
        assert!((p - 0.0576_f64.powi(2)).abs() < 1e-15);
    }

    #[test]
    fn test_pm() {
        assert!((pm(0.02, 0.5) - 0.01).abs() < 1e-15);
    }
}
