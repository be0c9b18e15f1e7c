//! Plane-wave reflection at a planar air/tissue boundary.
//!
//! Angles are consumed in radians. Use [`Incidence::from_degrees`] when working in degrees.

use std::fmt;
use std::str::FromStr;

use crate::errors::{DosimetryError, Result};
use crate::materials::TissueRecord;
use crate::math::{ensure_finite_complex, CScalar, NumericMode, Scalar};

/// Polarization of the incident plane wave relative to the plane of incidence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Polarization {
    /// Electric field in the plane of incidence (TM).
    #[default]
    Parallel,
    /// Electric field normal to the plane of incidence (TE).
    Orthogonal,
}

impl Polarization {
    /// Every supported polarization.
    pub const ALL: [Self; 2] = [Self::Parallel, Self::Orthogonal];

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Orthogonal => "orthogonal",
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarization {
    type Err = DosimetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "parallel" => Ok(Self::Parallel),
            "orthogonal" => Ok(Self::Orthogonal),
            _ => Err(DosimetryError::InvalidArgument(format!(
                "unsupported polarization '{s}', choose from: parallel, orthogonal"
            ))),
        }
    }
}

/// Angle of incidence measured from the surface normal, stored in radians.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Incidence {
    radians: Scalar,
}

impl Incidence {
    /// Normal incidence (0 rad).
    #[must_use]
    pub const fn normal() -> Self {
        Self { radians: 0.0 }
    }

    /// Angle given in radians.
    #[must_use]
    pub const fn from_radians(radians: Scalar) -> Self {
        Self { radians }
    }

    /// Angle given in degrees.
    #[must_use]
    pub fn from_degrees(degrees: Scalar) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// Angle in radians.
    #[must_use]
    pub const fn radians(self) -> Scalar {
        self.radians
    }
}

/// Raw Fresnel amplitude reflection coefficient with IEEE-754 semantics.
fn fresnel(permittivity: CScalar, angle_rad: Scalar, polarization: Polarization) -> (CScalar, CScalar) {
    let (sin, cos) = angle_rad.sin_cos();
    let s = (permittivity - sin * sin).sqrt();
    match polarization {
        Polarization::Parallel => {
            let num = -permittivity * cos + s;
            let den = permittivity * cos + s;
            (num, den)
        }
        Polarization::Orthogonal => {
            let num = CScalar::new(cos, 0.0) - s;
            let den = CScalar::new(cos, 0.0) + s;
            (num, den)
        }
    }
}

/// Reflection coefficient Γ for relative `permittivity` at `angle_rad` from the normal.
///
/// Complex permittivities use the principal square root. At normal incidence the
/// result does not depend on `polarization`.
///
/// # Errors
/// [`DosimetryError::InvalidArgument`] for non-finite inputs and
/// [`DosimetryError::Numeric`] when the denominator vanishes.
pub fn reflection_coefficient(
    permittivity: CScalar,
    angle_rad: Scalar,
    polarization: Polarization,
) -> Result<CScalar> {
    reflection_coefficient_with(permittivity, angle_rad, polarization, NumericMode::Checked)
}

/// As [`reflection_coefficient`], with an explicit [`NumericMode`].
pub fn reflection_coefficient_with(
    permittivity: CScalar,
    angle_rad: Scalar,
    polarization: Polarization,
    mode: NumericMode,
) -> Result<CScalar> {
    if !permittivity.re.is_finite() || !permittivity.im.is_finite() {
        return Err(DosimetryError::InvalidArgument(format!(
            "permittivity must be finite, got {permittivity}"
        )));
    }
    if !angle_rad.is_finite() {
        return Err(DosimetryError::InvalidArgument(format!(
            "angle of incidence must be finite, got {angle_rad}"
        )));
    }
    let (num, den) = fresnel(permittivity, angle_rad, polarization);
    if mode.is_checked() {
        if den.norm_sqr() == 0.0 {
            return Err(DosimetryError::Numeric(format!(
                "reflection coefficient denominator vanishes for permittivity {permittivity}"
            )));
        }
        return ensure_finite_complex("reflection coefficient", num / den);
    }
    Ok(num / den)
}

/// Complex transmission coefficient `1 − Γ²`.
#[must_use]
pub fn transmission_coefficient(gamma: CScalar) -> CScalar {
    CScalar::new(1.0, 0.0) - gamma * gamma
}

/// Power transmission `|1 − Γ²|`, the fraction of incident power density entering the tissue.
#[must_use]
pub fn power_transmission(gamma: CScalar) -> Scalar {
    transmission_coefficient(gamma).norm()
}

/// Reflection model for a fixed incidence and polarization.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReflectionModel {
    /// Angle of incidence.
    pub incidence: Incidence,
    /// Polarization of the incident wave.
    pub polarization: Polarization,
    /// Include the conductive loss term in the permittivity.
    pub lossy: bool,
    /// Treatment of non-finite results.
    pub numeric_mode: NumericMode,
}

impl ReflectionModel {
    /// Normal incidence on a lossy medium.
    #[must_use]
    pub fn lossy() -> Self {
        Self {
            lossy: true,
            ..Self::default()
        }
    }

    /// Normal incidence using only the real permittivity.
    #[must_use]
    pub fn lossless() -> Self {
        Self::default()
    }

    /// Sets the angle of incidence.
    #[must_use]
    pub fn with_incidence(mut self, incidence: Incidence) -> Self {
        self.incidence = incidence;
        self
    }

    /// Sets the polarization.
    #[must_use]
    pub fn with_polarization(mut self, polarization: Polarization) -> Self {
        self.polarization = polarization;
        self
    }

    /// Permittivity this model uses for `record`.
    #[must_use]
    pub fn permittivity(&self, record: &TissueRecord) -> CScalar {
        if self.lossy {
            record.complex_permittivity()
        } else {
            record.real_permittivity()
        }
    }

    /// Reflection coefficient for a tissue record.
    pub fn reflection(&self, record: &TissueRecord) -> Result<CScalar> {
        reflection_coefficient_with(
            self.permittivity(record),
            self.incidence.radians(),
            self.polarization,
            self.numeric_mode,
        )
    }

    /// Power transmission `|1 − Γ²|` for a tissue record.
    pub fn transmission(&self, record: &TissueRecord) -> Result<Scalar> {
        self.reflection(record).map(power_transmission)
    }

    /// Power transmission for each record, in order.
    pub fn transmission_spectrum(&self, records: &[TissueRecord]) -> Result<Vec<Scalar>> {
        records.iter().map(|r| self.transmission(r)).collect()
    }
}
