//! Tissue identifiers and dielectric property records.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::constants::VACUUM_PERMITTIVITY;
use crate::errors::DosimetryError;
use crate::math::{CScalar, Scalar};

/// Human tissues with tabulated dielectric properties.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Tissue {
    Air,
    Blood,
    BloodVessel,
    BodyFluid,
    BoneCancellous,
    BoneCortical,
    BoneMarrow,
    BrainGreyMatter,
    BrainWhiteMatter,
    Cerebellum,
    CerebroSpinalFluid,
    Dura,
    Fat,
    Muscle,
    SkinDry,
    SkinWet,
}

impl Tissue {
    /// Every supported tissue, in table order.
    pub const ALL: [Self; 16] = [
        Self::Air,
        Self::Blood,
        Self::BloodVessel,
        Self::BodyFluid,
        Self::BoneCancellous,
        Self::BoneCortical,
        Self::BoneMarrow,
        Self::BrainGreyMatter,
        Self::BrainWhiteMatter,
        Self::Cerebellum,
        Self::CerebroSpinalFluid,
        Self::Dura,
        Self::Fat,
        Self::Muscle,
        Self::SkinDry,
        Self::SkinWet,
    ];

    /// Canonical lowercase identifier, as stored in the property tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Blood => "blood",
            Self::BloodVessel => "blood_vessel",
            Self::BodyFluid => "body_fluid",
            Self::BoneCancellous => "bone_cancellous",
            Self::BoneCortical => "bone_cortical",
            Self::BoneMarrow => "bone_marrow",
            Self::BrainGreyMatter => "brain_grey_matter",
            Self::BrainWhiteMatter => "brain_white_matter",
            Self::Cerebellum => "cerebellum",
            Self::CerebroSpinalFluid => "cerebro_spinal_fluid",
            Self::Dura => "dura",
            Self::Fat => "fat",
            Self::Muscle => "muscle",
            Self::SkinDry => "skin_dry",
            Self::SkinWet => "skin_wet",
        }
    }

    /// Comma-separated list of all identifiers, for error messages.
    #[must_use]
    pub fn supported() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for Tissue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tissue {
    type Err = DosimetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| {
                DosimetryError::InvalidArgument(format!(
                    "unsupported tissue '{s}', choose from: {}",
                    Self::supported()
                ))
            })
    }
}

/// Dielectric properties of one tissue at one frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TissueRecord {
    /// Tissue the record belongs to.
    pub tissue: Tissue,
    /// Frequency in Hz.
    pub frequency_hz: Scalar,
    /// Conductivity σ in S/m.
    pub conductivity: Scalar,
    /// Relative permittivity ε_r (real part).
    pub relative_permittivity: Scalar,
    /// Loss tangent tan δ.
    pub loss_tangent: Scalar,
    /// Power penetration depth in meters.
    pub penetration_depth_m: Scalar,
}

impl TissueRecord {
    /// Complex relative permittivity `ε_r − jσ/(ωε₀)` at the record's frequency.
    #[must_use]
    pub fn complex_permittivity(&self) -> CScalar {
        complex_permittivity(self.relative_permittivity, self.conductivity, self.frequency_hz)
    }

    /// Real (lossless) relative permittivity as a complex number.
    #[must_use]
    pub fn real_permittivity(&self) -> CScalar {
        CScalar::new(self.relative_permittivity, 0.0)
    }
}

/// Imaginary part magnitude σ/(2πfε₀) of the relative permittivity.
#[must_use]
pub fn dielectric_loss(conductivity: Scalar, frequency_hz: Scalar) -> Scalar {
    conductivity / (2.0 * PI * frequency_hz * VACUUM_PERMITTIVITY)
}

/// Complex relative permittivity with the engineering sign convention `ε' − jε''`.
#[must_use]
pub fn complex_permittivity(
    relative_permittivity: Scalar,
    conductivity: Scalar,
    frequency_hz: Scalar,
) -> CScalar {
    CScalar::new(
        relative_permittivity,
        -dielectric_loss(conductivity, frequency_hz),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Skin_Dry".parse::<Tissue>().unwrap(), Tissue::SkinDry);
        assert_eq!("CEREBRO_SPINAL_FLUID".parse::<Tissue>().unwrap(), Tissue::CerebroSpinalFluid);
        for t in Tissue::ALL {
            assert_eq!(t.to_string().parse::<Tissue>().unwrap(), t);
        }
    }

    #[test]
    fn unsupported_tissue_lists_choices() {
        let err = "liver".parse::<Tissue>().unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, DosimetryError::InvalidArgument(_)));
        for t in Tissue::ALL {
            assert!(msg.contains(t.as_str()), "missing {t} in {msg}");
        }
    }

    #[test]
    fn loss_term_matches_loss_tangent_definition() {
        // tan δ = ε''/ε' for a record that is internally consistent
        let f = 10.0e9;
        let sigma = 8.0;
        let eps_r = 31.0;
        let record = TissueRecord {
            tissue: Tissue::SkinDry,
            frequency_hz: f,
            conductivity: sigma,
            relative_permittivity: eps_r,
            loss_tangent: dielectric_loss(sigma, f) / eps_r,
            penetration_depth_m: 1.0e-3,
        };
        let eps = record.complex_permittivity();
        assert_relative_eq!(eps.re, eps_r, epsilon = 1e-12);
        assert!(eps.im < 0.0);
        assert_relative_eq!(-eps.im / eps.re, record.loss_tangent, max_relative = 1e-12);
        assert_relative_eq!(-eps.im, 14.380_0, max_relative = 1e-4);
    }
}
