//! Exact-match lookup of tabulated tissue dielectric properties.
//!
//! The source is a comma-separated table with one row per tissue and frequency:
//!
//! ```text
//! tissue,frequency_hz,conductivity,relative_permittivity,loss_tangent,penetration_depth_m
//! skin_dry,10e9,8.01,31.29,0.46,2.6e-3
//! ```
//!
//! There is no interpolation: a query frequency must equal a stored frequency.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::{in_band, TISSUE_BAND_HZ};
use crate::errors::{DosimetryError, Result};
use crate::materials::{Tissue, TissueRecord};
use crate::math::Scalar;

/// Failures reading the tissue property source.
#[derive(Debug, Error)]
pub enum TissueDataError {
    /// The file could not be opened or read.
    #[error("failed to read tissue table {path}: {source}")]
    Io {
        /// Path of the table.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A row could not be parsed.
    #[error("malformed tissue table row {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

const COLUMNS: usize = 6;

/// In-memory tissue property table.
///
/// Loading reads the source once; the database is immutable afterwards and may be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct TissueDatabase {
    records: Vec<TissueRecord>,
}

impl TissueDatabase {
    /// Wraps already parsed records.
    #[must_use]
    pub const fn from_records(records: Vec<TissueRecord>) -> Self {
        Self { records }
    }

    /// Loads the table at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TissueDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self::from_reader(file).map_err(|err| match err {
            DosimetryError::TissueData(TissueDataError::Io { source, .. }) => {
                TissueDataError::Io {
                    path: path.to_path_buf(),
                    source,
                }
                .into()
            }
            other => other,
        })?;
        debug!(path = %path.display(), rows = db.len(), "loaded tissue table");
        Ok(db)
    }

    /// Parses a table from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut records = Vec::new();
        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|source| TissueDataError::Io {
                path: PathBuf::new(),
                source,
            })?;
            if let Some(record) = parse_row(idx + 1, &line)? {
                records.push(record);
            }
        }
        Ok(Self { records })
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All stored rows in source order.
    #[must_use]
    pub fn records(&self) -> &[TissueRecord] {
        &self.records
    }

    /// Frequencies stored for `tissue`, in source order.
    #[must_use]
    pub fn frequencies(&self, tissue: Tissue) -> Vec<Scalar> {
        self.records
            .iter()
            .filter(|r| r.tissue == tissue)
            .map(|r| r.frequency_hz)
            .collect()
    }

    /// Looks up `tissue_name` (case-insensitive) at exactly `frequency_hz`.
    pub fn lookup(&self, tissue_name: &str, frequency_hz: Scalar) -> Result<TissueRecord> {
        let tissue: Tissue = tissue_name.parse()?;
        self.lookup_tissue(tissue, frequency_hz)
    }

    /// Looks up `tissue` at exactly `frequency_hz`, returning the first matching row.
    pub fn lookup_tissue(&self, tissue: Tissue, frequency_hz: Scalar) -> Result<TissueRecord> {
        if !in_band(frequency_hz, TISSUE_BAND_HZ) {
            return Err(DosimetryError::frequency_out_of_range(frequency_hz, TISSUE_BAND_HZ));
        }
        #[allow(clippy::float_cmp)]
        let found = self
            .records
            .iter()
            .find(|r| r.tissue == tissue && r.frequency_hz == frequency_hz);
        found.copied().ok_or_else(|| {
            debug!(%tissue, frequency_hz, "no exact tissue record");
            DosimetryError::NotFound {
                tissue: tissue.to_string(),
                frequency_hz,
            }
        })
    }

    /// Looks up `tissue_name` at each of `frequencies_hz`, failing on the first miss.
    pub fn lookup_many(&self, tissue_name: &str, frequencies_hz: &[Scalar]) -> Result<Vec<TissueRecord>> {
        let tissue: Tissue = tissue_name.parse()?;
        frequencies_hz
            .iter()
            .map(|&f| self.lookup_tissue(tissue, f))
            .collect()
    }
}

fn parse_row(line_no: usize, line: &str) -> Result<Option<TissueRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if fields.len() != COLUMNS {
        return Err(TissueDataError::Parse {
            line: line_no,
            message: format!("expected {COLUMNS} fields, found {}", fields.len()),
        }
        .into());
    }
    // header row
    if line_no == 1 && fields[1].parse::<Scalar>().is_err() {
        return Ok(None);
    }

    let tissue = match fields[0].parse::<Tissue>() {
        Ok(t) => t,
        Err(_) => {
            warn!(line = line_no, tissue = fields[0], "skipping row for unsupported tissue");
            return Ok(None);
        }
    };
    let number = |col: usize| -> Result<Scalar> {
        fields[col].parse::<Scalar>().map_err(|e| {
            TissueDataError::Parse {
                line: line_no,
                message: format!("column {} ('{}'): {e}", col + 1, fields[col]),
            }
            .into()
        })
    };

    Ok(Some(TissueRecord {
        tissue,
        frequency_hz: number(1)?,
        conductivity: number(2)?,
        relative_permittivity: number(3)?,
        loss_tangent: number(4)?,
        penetration_depth_m: number(5)?,
    }))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const TABLE: &str = "\
tissue,frequency_hz,conductivity,relative_permittivity,loss_tangent,penetration_depth_m
skin_dry,1e9,0.9,40.9,0.4,0.0195
skin_dry,10e9,8.01,31.29,0.46,0.0026
# duplicate row: first one wins
skin_dry,10e9,99,99,99,99
muscle,10e9,10.6,42.8,0.45,0.0021
";

    fn db() -> TissueDatabase {
        TissueDatabase::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[test]
    fn lookup_returns_stored_row() {
        let r = db().lookup("SKIN_DRY", 10e9).unwrap();
        assert_eq!(r.tissue, Tissue::SkinDry);
        assert_relative_eq!(r.conductivity, 8.01);
        assert_relative_eq!(r.relative_permittivity, 31.29);
        assert_relative_eq!(r.loss_tangent, 0.46);
        assert_relative_eq!(r.penetration_depth_m, 0.0026);
    }

    #[test]
    fn missing_frequency_is_not_found() {
        let err = db().lookup("skin_dry", 20e9).unwrap_err();
        assert!(matches!(err, DosimetryError::NotFound { .. }));
        let err = db().lookup("fat", 10e9).unwrap_err();
        assert!(matches!(err, DosimetryError::NotFound { .. }));
    }

    #[test]
    fn frequency_outside_table_band_is_rejected() {
        for f in [0.5e9, 101e9, f64::NAN] {
            let err = db().lookup("skin_dry", f).unwrap_err();
            assert!(matches!(err, DosimetryError::OutOfRange { .. }), "{f}: {err}");
        }
    }

    #[test]
    fn unsupported_tissue_is_invalid_argument() {
        let err = db().lookup("liver", 10e9).unwrap_err();
        assert!(matches!(err, DosimetryError::InvalidArgument(_)));
        assert!(err.to_string().contains("skin_wet"));
    }

    #[test]
    fn lookup_many_preserves_order() {
        let rows = db().lookup_many("skin_dry", &[10e9, 1e9]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(rows[0].frequency_hz, 10e9);
        assert_relative_eq!(rows[1].frequency_hz, 1e9);
        assert_eq!(db().frequencies(Tissue::SkinDry), vec![1e9, 10e9, 10e9]);
    }

    #[test]
    fn malformed_row_reports_line() {
        let err = TissueDatabase::from_reader("skin_dry,1e9,abc,1,1,1\n".as_bytes()).unwrap_err();
        match err {
            DosimetryError::TissueData(TissueDataError::Parse { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected error {other}"),
        }
        let err = TissueDatabase::from_reader("skin_dry,1e9\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DosimetryError::TissueData(TissueDataError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TissueDatabase::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DosimetryError::TissueData(TissueDataError::Io { .. })));
    }
}
