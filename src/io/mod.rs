//! I/O helpers for exporting computed curves to the plotting layer.

pub mod csv;

pub use csv::*;
