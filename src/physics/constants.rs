//! Physical constants (CODATA 2018, SI units) and accepted reference values.

/// Elementary charge (C).
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Planck constant (J·s).
pub const PLANCK: f64 = 6.62607015e-34;

/// Reduced Planck constant ħ (J·s).
pub const HBAR: f64 = 1.054571817e-34;

/// Proton mass (kg).
pub const PROTON_MASS: f64 = 1.67262192369e-27;

/// Accepted nuclear g-factor of ¹H.
pub const G_FACTOR_1H: f64 = 5.5856946893;

/// Accepted nuclear g-factor of ¹⁹F.
pub const G_FACTOR_19F: f64 = 5.257733;

/// MHz/mT → Hz/T.
pub const MHZ_PER_MT_TO_HZ_PER_T: f64 = 1e9;
