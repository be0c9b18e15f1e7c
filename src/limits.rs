//! Incident power density (IPD) reference levels for local exposure between 6 and 300 GHz.

use std::fmt;
use std::str::FromStr;

use crate::constants::{in_band, EXPOSURE_BAND_HZ, GIGAHERTZ};
use crate::errors::{DosimetryError, Result};
use crate::math::Scalar;

/// Frequency exponent of the transition region between 6 and 300 GHz.
const TRANSITION_EXPONENT: Scalar = -0.177;

/// Regulatory body whose limit table is applied.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LimitStandard {
    /// ICNIRP 2020 guidelines.
    #[default]
    Icnirp,
    /// IEEE C95.1-2019.
    Ieee,
}

impl LimitStandard {
    /// Every supported standard.
    pub const ALL: [Self; 2] = [Self::Icnirp, Self::Ieee];

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Icnirp => "icnirp",
            Self::Ieee => "ieee",
        }
    }
}

impl fmt::Display for LimitStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LimitStandard {
    type Err = DosimetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "icnirp" => Ok(Self::Icnirp),
            "ieee" => Ok(Self::Ieee),
            _ => Err(DosimetryError::InvalidArgument(format!(
                "unsupported limit standard '{s}', choose from: icnirp, ieee"
            ))),
        }
    }
}

/// Population the limit applies to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExposureCategory {
    /// Trained workers in controlled environments.
    Occupational,
    /// Members of the public.
    #[default]
    GeneralPublic,
}

impl ExposureCategory {
    /// Every supported category.
    pub const ALL: [Self; 2] = [Self::Occupational, Self::GeneralPublic];

    /// Human-readable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Occupational => "occupational",
            Self::GeneralPublic => "general public",
        }
    }
}

impl fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExposureCategory {
    type Err = DosimetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "occupational" => Ok(Self::Occupational),
            "general public" | "general_public" | "general-public" => Ok(Self::GeneralPublic),
            _ => Err(DosimetryError::InvalidArgument(format!(
                "unsupported exposure category '{s}', choose from: occupational, general public"
            ))),
        }
    }
}

/// Spatially averaged incident power density limit in W/m².
///
/// # Errors
/// [`DosimetryError::OutOfRange`] when `frequency_hz` is outside [6, 300] GHz.
pub fn incident_power_density(
    frequency_hz: Scalar,
    standard: LimitStandard,
    category: ExposureCategory,
) -> Result<Scalar> {
    if !in_band(frequency_hz, EXPOSURE_BAND_HZ) {
        return Err(DosimetryError::frequency_out_of_range(frequency_hz, EXPOSURE_BAND_HZ));
    }
    let (lower, upper) = EXPOSURE_BAND_HZ;

    #[allow(clippy::float_cmp)]
    let ipd = if frequency_hz == lower {
        match category {
            ExposureCategory::Occupational => 200.0,
            ExposureCategory::GeneralPublic => 40.0,
        }
    } else if frequency_hz < upper {
        let scale = (frequency_hz / GIGAHERTZ).powf(TRANSITION_EXPONENT);
        let coefficient = match (category, standard) {
            (ExposureCategory::Occupational, LimitStandard::Icnirp) => 275.0,
            (ExposureCategory::Occupational, LimitStandard::Ieee) => 274.8,
            (ExposureCategory::GeneralPublic, _) => 55.0,
        };
        coefficient * scale
    } else {
        match category {
            ExposureCategory::Occupational => 100.0,
            ExposureCategory::GeneralPublic => 20.0,
        }
    };
    Ok(ipd)
}

/// Whole-body average power density limit in W/m², independent of frequency above 2 GHz.
#[must_use]
pub const fn whole_body_power_density(category: ExposureCategory) -> Scalar {
    match category {
        ExposureCategory::Occupational => 50.0,
        ExposureCategory::GeneralPublic => 10.0,
    }
}

/// Evaluates the local IPD limit at every frequency of a sweep.
pub fn reference_level_curve(
    standard: LimitStandard,
    category: ExposureCategory,
    frequencies_hz: &[Scalar],
) -> Result<Vec<Scalar>> {
    frequencies_hz
        .iter()
        .map(|&f| incident_power_density(f, standard, category))
        .collect()
}

/// A single limit query.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureQuery {
    /// Frequency in Hz.
    pub frequency_hz: Scalar,
    /// Limit table.
    pub standard: LimitStandard,
    /// Exposed population.
    pub category: ExposureCategory,
}

impl ExposureQuery {
    /// Builds a query from string identifiers.
    pub fn parse(frequency_hz: Scalar, standard: &str, category: &str) -> Result<Self> {
        Ok(Self {
            frequency_hz,
            standard: standard.parse()?,
            category: category.parse()?,
        })
    }

    /// Evaluates the IPD limit in W/m².
    pub fn evaluate(&self) -> Result<Scalar> {
        incident_power_density(self.frequency_hz, self.standard, self.category)
    }
}
