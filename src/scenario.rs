//! End-to-end exposure scenarios.
//!
//! A scenario looks up a tissue at a set of frequencies, derives the power
//! transmission coefficient at the air/tissue boundary, applies the regulatory
//! incident power density limit at the surface and estimates the absorbed power
//! density at each requested depth.

use tracing::info;

use crate::absorption::{AbsorptionEstimate, AbsorptionInputs, AbsorptionSampler, SamplingConfig};
use crate::errors::{DosimetryError, Result};
use crate::limits::{incident_power_density, ExposureCategory, LimitStandard};
use crate::materials::Tissue;
use crate::math::Scalar;
use crate::reflection::{Incidence, Polarization, ReflectionModel};
use crate::tissue::TissueDatabase;

/// Description of an absorption scenario.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Exposed tissue.
    pub tissue: Tissue,
    /// Frequencies in Hz; each must be present in the tissue table.
    pub frequencies_hz: Vec<Scalar>,
    /// Limit table used for the surface power density.
    pub standard: LimitStandard,
    /// Exposed population.
    pub category: ExposureCategory,
    /// Depths below the surface in meters.
    pub depths_m: Vec<Scalar>,
    /// Angle of incidence in degrees.
    pub incidence_deg: Scalar,
    /// Polarization of the incident wave.
    pub polarization: Polarization,
    /// Include conductive losses in the permittivity.
    pub use_complex_permittivity: bool,
    /// Monte-Carlo settings.
    pub sampling: SamplingConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "skin_dry_icnirp_general_public".into(),
            tissue: Tissue::SkinDry,
            frequencies_hz: vec![10e9, 30e9, 60e9, 100e9],
            standard: LimitStandard::Icnirp,
            category: ExposureCategory::GeneralPublic,
            depths_m: vec![0.0, 1.0e-3],
            incidence_deg: 0.0,
            polarization: Polarization::Parallel,
            use_complex_permittivity: true,
            sampling: SamplingConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parses a YAML scenario; missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| DosimetryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML scenario from `path`.
    #[cfg(feature = "serde")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DosimetryError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.frequencies_hz.is_empty() {
            return Err(DosimetryError::Config("at least one frequency is required".into()));
        }
        if self.depths_m.is_empty() {
            return Err(DosimetryError::Config("at least one depth is required".into()));
        }
        if !(self.incidence_deg.is_finite() && (0.0..90.0).contains(&self.incidence_deg)) {
            return Err(DosimetryError::Config(format!(
                "incidence angle must lie in [0, 90) degrees, got {}",
                self.incidence_deg
            )));
        }
        Ok(())
    }

    /// Reflection model implied by the configuration.
    #[must_use]
    pub fn reflection_model(&self) -> ReflectionModel {
        ReflectionModel {
            lossy: self.use_complex_permittivity,
            numeric_mode: self.sampling.numeric_mode,
            ..ReflectionModel::default()
        }
        .with_incidence(Incidence::from_degrees(self.incidence_deg))
        .with_polarization(self.polarization)
    }
}

/// Per-frequency quantities at the tissue surface.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Frequency in Hz.
    pub frequency_hz: Scalar,
    /// Power transmission coefficient `|1 − Γ²|`.
    pub transmission: Scalar,
    /// Power penetration depth in meters.
    pub penetration_depth_m: Scalar,
    /// Incident power density limit at the surface in W/m².
    pub surface_ipd_w_m2: Scalar,
}

/// Absorbed power density estimate at one depth.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DepthProfile {
    /// Depth below the surface in meters.
    pub depth_m: Scalar,
    /// Estimate per frequency, in the order of the scenario frequencies.
    pub estimate: AbsorptionEstimate,
}

/// Result of [`run_absorption_scenario`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorptionReport {
    /// Scenario identifier.
    pub name: String,
    /// Exposed tissue.
    pub tissue: Tissue,
    /// Surface quantities per frequency.
    pub surface: Vec<SurfacePoint>,
    /// One profile per requested depth.
    pub depths: Vec<DepthProfile>,
}

/// Runs the full lookup → reflection → limit → sampling chain.
pub fn run_absorption_scenario(db: &TissueDatabase, config: &ScenarioConfig) -> Result<AbsorptionReport> {
    config.validate()?;
    info!(
        name = %config.name,
        tissue = %config.tissue,
        standard = %config.standard,
        category = %config.category,
        frequencies = config.frequencies_hz.len(),
        depths = config.depths_m.len(),
        "running absorption scenario"
    );

    let model = config.reflection_model();
    let surface = config
        .frequencies_hz
        .iter()
        .map(|&f| -> Result<SurfacePoint> {
            let record = db.lookup_tissue(config.tissue, f)?;
            Ok(SurfacePoint {
                frequency_hz: f,
                transmission: model.transmission(&record)?,
                penetration_depth_m: record.penetration_depth_m,
                surface_ipd_w_m2: incident_power_density(f, config.standard, config.category)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let base = AbsorptionInputs {
        surface_ipd_w_m2: surface.iter().map(|p| p.surface_ipd_w_m2).collect(),
        transmission_coefficient: surface.iter().map(|p| p.transmission).collect(),
        penetration_depth_m: surface.iter().map(|p| p.penetration_depth_m).collect(),
        depth_m: 0.0,
    };
    let sampler = AbsorptionSampler::new(config.sampling);
    let depths = config
        .depths_m
        .iter()
        .map(|&depth_m| -> Result<DepthProfile> {
            Ok(DepthProfile {
                depth_m,
                estimate: sampler.estimate(&base.at_depth(depth_m))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AbsorptionReport {
        name: config.name.clone(),
        tissue: config.tissue,
        surface,
        depths,
    })
}

/// Penetration depth and transmission of one tissue at one frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenetrationPoint {
    /// Frequency in Hz.
    pub frequency_hz: Scalar,
    /// Power penetration depth in meters.
    pub penetration_depth_m: Scalar,
    /// Power transmission coefficient `|1 − Γ²|`.
    pub transmission: Scalar,
}

/// Penetration depth and transmission coefficient of `tissue` across `frequencies_hz`.
pub fn penetration_profile(
    db: &TissueDatabase,
    tissue: Tissue,
    frequencies_hz: &[Scalar],
    model: &ReflectionModel,
) -> Result<Vec<PenetrationPoint>> {
    frequencies_hz
        .iter()
        .map(|&f| -> Result<PenetrationPoint> {
            let record = db.lookup_tissue(tissue, f)?;
            Ok(PenetrationPoint {
                frequency_hz: f,
                penetration_depth_m: record.penetration_depth_m,
                transmission: model.transmission(&record)?,
            })
        })
        .collect()
}
