use std::error::Error;
use std::io;

use rf_dosimetry::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .compact()
        .init();

    let table = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/data/tissue_properties.csv".to_string());
    let db = TissueDatabase::from_path(&table)?;

    // Absorbed power density in dry skin at the surface and 1 mm deep.
    let report = run_absorption_scenario(&db, &ScenarioConfig::default())?;
    write_absorption_csv(io::stdout().lock(), &report)?;

    // Penetration depth and lossless transmission from 1 to 100 GHz.
    let freqs = from_ghz(&[1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]);
    let profile = penetration_profile(&db, Tissue::SkinDry, &freqs, &ReflectionModel::lossless())?;
    println!();
    write_penetration_csv(io::stdout().lock(), &profile)?;
    Ok(())
}
