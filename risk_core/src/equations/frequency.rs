//! # Annual Event Frequencies
//!
//! Expected number of dangerous events per year. Every frequency is the
//! ground flash density times a collection area times dimensionless
//! location/installation factors; `1e-6` converts m² to km².
//!
//! | Symbol | Event                                   |
//! |--------|-----------------------------------------|
//! | Nd     | Flash to the structure                  |
//! | Nm     | Flash near the structure                |
//! | Nl     | Flash to a service line                 |
//! | Ndj    | Flash to the adjacent structure of a line |
//! | Ni     | Flash near a service line               |

/// m² → km²
pub const AREA_TO_KM2: f64 = 1e-6;

/// Nd = Ng·Ad·Cd·10⁻⁶
///
/// # Example
/// ```rust
/// use risk_core::equations::frequency::direct_strike_frequency;
///
/// let nd = direct_strike_frequency(2.0, 1000.0, 1.0);
/// assert!((nd - 2e-3).abs() < 1e-15);
/// ```
#[inline]
pub fn direct_strike_frequency(ng: f64, ad: f64, cd: f64) -> f64 {
    ng * ad * cd * AREA_TO_KM2
}

/// Nm = Ng·Am·10⁻⁶
#[inline]
pub fn near_strike_frequency(ng: f64, am: f64) -> f64 {
    ng * am * AREA_TO_KM2
}

/// Nl = Ng·Al·Ci·Ce·Ct·10⁻⁶
#[inline]
pub fn line_strike_frequency(ng: f64, al: f64, ci: f64, ce: f64, ct: f64) -> f64 {
    ng * al * ci * ce * ct * AREA_TO_KM2
}

/// Ndj = Ng·Adj·Cdj·Ct·10⁻⁶, or 0 when there is no adjacent structure
#[inline]
pub fn adjacent_strike_frequency(ng: f64, adj: f64, cdj: f64, ct: f64) -> f64 {
    if adj == 0.0 {
        return 0.0;
    }
    ng * adj * cdj * ct * AREA_TO_KM2
}

/// Ni = Ng·Ai·Ci·Ce·Ct·10⁻⁶
#[inline]
pub fn induced_surge_frequency(ng: f64, ai: f64, ci: f64, ce: f64, ct: f64) -> f64 {
    ng * ai * ci * ce * ct * AREA_TO_KM2
}
