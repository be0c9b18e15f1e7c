//! Frequency sweep builders.

use crate::constants::GIGAHERTZ;
use crate::errors::{DosimetryError, Result};
use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            let mut values: Vec<Scalar> = (0..n).map(|i| start + step * i as Scalar).collect();
            // pin the endpoint so band-edge rules see the exact stop value
            values[n - 1] = stop;
            values
        }
    }
}

/// Generates `n` logarithmically spaced samples between `start_hz` and `stop_hz`.
///
/// # Errors
/// [`DosimetryError::InvalidArgument`] unless both bounds are positive.
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Result<Vec<Scalar>> {
    if !(start_hz > 0.0 && stop_hz > 0.0) {
        return Err(DosimetryError::InvalidArgument(format!(
            "logarithmic sweep bounds must be positive, got [{start_hz}, {stop_hz}]"
        )));
    }
    let mut values: Vec<Scalar> = linspace(start_hz.log10(), stop_hz.log10(), n)
        .into_iter()
        .map(|exp| 10f64.powf(exp))
        .collect();
    if let Some(first) = values.first_mut() {
        *first = start_hz;
    }
    if n > 1 {
        values[n - 1] = stop_hz;
    }
    Ok(values)
}

/// Converts frequencies given in GHz to Hz.
#[must_use]
pub fn from_ghz(values_ghz: &[Scalar]) -> Vec<Scalar> {
    values_ghz.iter().map(|f| f * GIGAHERTZ).collect()
}
