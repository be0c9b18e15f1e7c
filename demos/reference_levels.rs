use std::error::Error;
use std::io;

use rf_dosimetry::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let (start, stop) = EXPOSURE_BAND_HZ;
    let freqs = linspace(start, stop, 1001);

    let mut curves = Vec::new();
    for standard in LimitStandard::ALL {
        for category in ExposureCategory::ALL {
            let values = reference_level_curve(standard, category, &freqs)?;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            tracing::info!(%standard, %category, min, max, "reference levels");
            curves.push((standard, category, values));
        }
    }
    for category in ExposureCategory::ALL {
        tracing::info!(%category, ipd_w_m2 = whole_body_power_density(category), "whole-body limit");
    }

    write_reference_levels_csv(io::stdout().lock(), &freqs, &curves)?;
    Ok(())
}
