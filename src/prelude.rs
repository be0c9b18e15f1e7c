//! Convenience re-exports for exposure-assessment workflows.

pub use crate::absorption::{
    take_sample, AbsorptionEstimate, AbsorptionInputs, AbsorptionSampler, SamplingConfig, SamplingRuns,
};
pub use crate::constants::*;
pub use crate::errors::DosimetryError;
pub use crate::io::{write_absorption_csv, write_penetration_csv, write_reference_levels_csv};
pub use crate::limits::{
    incident_power_density, reference_level_curve, whole_body_power_density, ExposureCategory,
    ExposureQuery, LimitStandard,
};
pub use crate::materials::{complex_permittivity, dielectric_loss, Tissue, TissueRecord};
pub use crate::math::{CScalar, NumericMode, Scalar};
pub use crate::reflection::{
    power_transmission, reflection_coefficient, reflection_coefficient_with, transmission_coefficient,
    Incidence, Polarization, ReflectionModel,
};
pub use crate::scenario::{
    penetration_profile, run_absorption_scenario, AbsorptionReport, DepthProfile, PenetrationPoint,
    ScenarioConfig, SurfacePoint,
};
pub use crate::sweep::{from_ghz, linspace, logspace_hz};
pub use crate::tissue::{TissueDataError, TissueDatabase};
