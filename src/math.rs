//! Shared numerical primitives anchored on `nalgebra` and `num-complex`.

use nalgebra::DMatrix;

use crate::errors::{DosimetryError, Result};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for permittivities and reflection coefficients.
pub type CScalar = num_complex::Complex<Scalar>;

/// How non-finite intermediate values are treated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericMode {
    /// Zero divisors and non-finite results are reported as [`DosimetryError::Numeric`].
    #[default]
    Checked,
    /// IEEE-754 `inf`/`NaN` propagate to the caller unchanged.
    PassThrough,
}

impl NumericMode {
    /// Returns `true` for [`NumericMode::Checked`].
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}

/// Fails with a numeric error when `value` is `inf` or `NaN`.
pub fn ensure_finite(name: &str, value: Scalar) -> Result<Scalar> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DosimetryError::Numeric(format!("{name} is not finite ({value})")))
    }
}

/// Complex counterpart of [`ensure_finite`].
pub fn ensure_finite_complex(name: &str, value: CScalar) -> Result<CScalar> {
    if value.re.is_finite() && value.im.is_finite() {
        Ok(value)
    } else {
        Err(DosimetryError::Numeric(format!("{name} is not finite ({value})")))
    }
}

/// Per-column arithmetic mean of `samples`.
#[must_use]
pub fn column_means(samples: &DMatrix<Scalar>) -> Vec<Scalar> {
    let n = samples.nrows() as Scalar;
    samples.column_iter().map(|col| col.sum() / n).collect()
}

/// Per-column standard deviation with an `N - 1` denominator.
///
/// Columns of a single sample yield `NaN`, as with any unbiased estimator.
#[must_use]
pub fn column_std_unbiased(samples: &DMatrix<Scalar>, means: &[Scalar]) -> Vec<Scalar> {
    let dof = samples.nrows() as Scalar - 1.0;
    samples
        .column_iter()
        .zip(means)
        .map(|(col, mean)| {
            let ss: Scalar = col.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / dof).sqrt()
        })
        .collect()
}
