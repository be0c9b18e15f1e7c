//! Baseline physical constants and frequency bands.
//!
//! ## References
//!
//! Physical constants are based on CODATA 2018 recommended values:
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Note: Latest CODATA 2022 values differ in final digits for ε₀

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;

/// Hertz per gigahertz.
pub const GIGAHERTZ: f64 = 1.0e9;

/// Inclusive frequency band (Hz) covered by the tissue property tables.
pub const TISSUE_BAND_HZ: (f64, f64) = (1.0e9, 100.0e9);
/// Inclusive frequency band (Hz) covered by the incident power density limits.
pub const EXPOSURE_BAND_HZ: (f64, f64) = (6.0e9, 300.0e9);

/// Returns `true` when `hz` lies inside the inclusive `band`.
#[inline]
#[must_use]
pub fn in_band(hz: f64, band: (f64, f64)) -> bool {
    hz >= band.0 && hz <= band.1
}
