#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants and frequency bands used throughout the library.
pub mod constants;
/// Shared numerical primitives and checked arithmetic helpers.
pub mod math;
/// Tissue identifiers, dielectric records and complex permittivity.
pub mod materials;
/// Exact-match tissue property database.
pub mod tissue;
/// Plane-wave reflection and power transmission at a tissue boundary.
pub mod reflection;
/// Regulatory incident power density reference levels.
pub mod limits;
/// Monte-Carlo estimation of absorbed power density at depth.
pub mod absorption;
/// Frequency sweep builders.
pub mod sweep;
/// End-to-end exposure scenarios combining all components.
pub mod scenario;
/// CSV export of computed curves.
pub mod io;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
