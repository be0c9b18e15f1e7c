//! CSV writers for absorption, penetration and reference-level data.

use std::io::{self, Write};

use crate::limits::{ExposureCategory, LimitStandard};
use crate::math::Scalar;
use crate::scenario::{AbsorptionReport, PenetrationPoint};

/// Writes one row per frequency and depth: surface quantities plus the estimate.
pub fn write_absorption_csv<W: Write>(mut w: W, report: &AbsorptionReport) -> io::Result<()> {
    writeln!(
        w,
        "tissue,frequency_hz,depth_m,surface_ipd_w_m2,transmission,penetration_depth_m,absorbed_mean_w_m2,absorbed_error_w_m2"
    )?;
    for profile in &report.depths {
        for (point, (mean, error)) in report
            .surface
            .iter()
            .zip(profile.estimate.mean.iter().zip(&profile.estimate.error))
        {
            writeln!(
                w,
                "{},{:.6e},{:.6e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
                report.tissue,
                point.frequency_hz,
                profile.depth_m,
                point.surface_ipd_w_m2,
                point.transmission,
                point.penetration_depth_m,
                mean,
                error
            )?;
        }
    }
    Ok(())
}

/// Writes penetration depth and transmission per frequency.
pub fn write_penetration_csv<W: Write>(mut w: W, points: &[PenetrationPoint]) -> io::Result<()> {
    writeln!(w, "frequency_hz,penetration_depth_m,transmission")?;
    for p in points {
        writeln!(
            w,
            "{:.6e},{:.16e},{:.16e}",
            p.frequency_hz, p.penetration_depth_m, p.transmission
        )?;
    }
    Ok(())
}

/// Writes reference-level curves; each entry of `curves` must have one value per frequency.
pub fn write_reference_levels_csv<W: Write>(
    mut w: W,
    frequencies_hz: &[Scalar],
    curves: &[(LimitStandard, ExposureCategory, Vec<Scalar>)],
) -> io::Result<()> {
    writeln!(w, "standard,category,frequency_hz,ipd_w_m2")?;
    for (standard, category, values) in curves {
        if values.len() != frequencies_hz.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{standard}/{category} curve has {} values for {} frequencies",
                    values.len(),
                    frequencies_hz.len()
                ),
            ));
        }
        for (f, v) in frequencies_hz.iter().zip(values) {
            writeln!(w, "{standard},{category},{f:.6e},{v:.16e}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penetration_csv_has_header_and_rows() {
        let points = [PenetrationPoint {
            frequency_hz: 10e9,
            penetration_depth_m: 2.6e-3,
            transmission: 0.5,
        }];
        let mut buf = Vec::new();
        write_penetration_csv(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("1.000000e10,"));
    }

    #[test]
    fn reference_levels_reject_ragged_curves() {
        let curves = [(LimitStandard::Ieee, ExposureCategory::Occupational, vec![1.0])];
        let err = write_reference_levels_csv(Vec::new(), &[6e9, 7e9], &curves).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
