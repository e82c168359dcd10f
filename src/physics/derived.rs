//! Closed-form quantities derived from fit parameters.
//!
//! All functions are pure: fit parameters and constants in, scalar out.

use std::f64::consts::PI;

use crate::physics::constants::{ELEMENTARY_CHARGE, HBAR, MHZ_PER_MT_TO_HZ_PER_T, PROTON_MASS};

/// `|measured − accepted| / |accepted| × 100`.
///
/// Returns `None` when `accepted` is zero or either value is not finite.
pub fn percent_error(measured: f64, accepted: f64) -> Option<f64> {
    if !(measured.is_finite() && accepted.is_finite()) || accepted == 0.0 {
        return None;
    }
    Some(((measured - accepted) / accepted).abs() * 100.0)
}

/// Nuclear magneton `μ_N = e·ħ / (2·m_p)` (J/T).
pub fn nuclear_magneton() -> f64 {
    ELEMENTARY_CHARGE * HBAR / (2.0 * PROTON_MASS)
}

/// Gyromagnetic ratio γ (rad·s⁻¹·T⁻¹) from the slope `γ/2π` of ν against B₀
/// in MHz/mT.
pub fn gamma_from_slope(gamma_over_2pi_mhz_per_mt: f64) -> f64 {
    gamma_over_2pi_mhz_per_mt * MHZ_PER_MT_TO_HZ_PER_T * 2.0 * PI
}

/// Nuclear g-factor `g = γ·ħ / μ_N`.
pub fn g_factor(gamma: f64) -> f64 {
    gamma * HBAR / nuclear_magneton()
}

/// Photoelectric stopping voltage fit `U₀ = a·ν + b`.
///
/// Einstein's relation `e·|U₀| = h·ν − W` with the stopping voltage recorded as
/// a negative bias gives `a = −h/e` and `b = W/e`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoelectricConstants {
    /// Planck constant estimate (J·s).
    pub planck: f64,
    /// Cut-off frequency where the stopping voltage vanishes (Hz).
    pub threshold_frequency: f64,
    /// Work function of the cathode (eV).
    pub work_function_ev: f64,
}

/// Derive Planck's constant, threshold frequency and work function from the
/// stopping-voltage line (`slope` in V/Hz, `intercept` in V).
///
/// Returns `None` for a zero slope (no frequency dependence).
pub fn photoelectric_constants(slope: f64, intercept: f64) -> Option<PhotoelectricConstants> {
    if slope == 0.0 || !(slope.is_finite() && intercept.is_finite()) {
        return None;
    }
    Some(PhotoelectricConstants {
        planck: -ELEMENTARY_CHARGE * slope,
        threshold_frequency: -intercept / slope,
        work_function_ev: intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::{G_FACTOR_19F, PLANCK};

    #[test]
    fn percent_error_reference_value() {
        let e = percent_error(5.0, 5.257733).unwrap();
        assert!((e - 4.90198).abs() < 1e-4, "e={e}");
    }

    #[test]
    fn percent_error_is_symmetric_in_sign() {
        assert_eq!(percent_error(11.0, 10.0), percent_error(9.0, 10.0));
        assert_eq!(percent_error(10.0, 10.0), Some(0.0));
    }

    #[test]
    fn percent_error_rejects_zero_reference() {
        assert_eq!(percent_error(1.0, 0.0), None);
        assert_eq!(percent_error(f64::NAN, 1.0), None);
    }

    #[test]
    fn nuclear_magneton_codata() {
        // μ_N = 5.0507837461e-27 J/T
        let mu = nuclear_magneton();
        assert!((mu - 5.0507837461e-27).abs() < 1e-35, "mu={mu}");
    }

    #[test]
    fn g_factor_from_lab_sheet_slopes() {
        let g_h = g_factor(gamma_from_slope(0.04238));
        let g_f = g_factor(gamma_from_slope(0.03996));
        assert!((g_h - 5.5598).abs() < 1e-3, "g_h={g_h}");
        assert!((g_f - 5.2423).abs() < 1e-3, "g_f={g_f}");
        assert!(percent_error(g_f, G_FACTOR_19F).unwrap() < 0.5);
    }

    #[test]
    fn photoelectric_constants_recover_planck() {
        let slope = -PLANCK / ELEMENTARY_CHARGE;
        let c = photoelectric_constants(slope, 2.0).unwrap();
        assert!((c.planck - PLANCK).abs() < 1e-45);
        assert!((c.work_function_ev - 2.0).abs() < 1e-12);
        assert!((c.threshold_frequency - 2.0 / (PLANCK / ELEMENTARY_CHARGE)).abs() < 1.0);
        assert!(photoelectric_constants(0.0, 1.0).is_none());
    }
}
