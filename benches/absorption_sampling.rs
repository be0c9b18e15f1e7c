use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rf_dosimetry::absorption::{AbsorptionInputs, AbsorptionSampler, SamplingConfig};
use rf_dosimetry::limits::{incident_power_density, ExposureCategory, LimitStandard};
use rf_dosimetry::materials::complex_permittivity;
use rf_dosimetry::reflection::{power_transmission, reflection_coefficient, Polarization};

fn skin_inputs() -> AbsorptionInputs {
    // dry skin at 10, 30, 60 and 100 GHz
    let table = [
        (10e9, 8.014, 31.29, 0.002_364),
        (30e9, 27.23, 16.50, 0.000_788),
        (60e9, 36.39, 7.98, 0.000_504),
        (100e9, 39.36, 5.60, 0.000_404),
    ];
    let mut inputs = AbsorptionInputs {
        surface_ipd_w_m2: Vec::new(),
        transmission_coefficient: Vec::new(),
        penetration_depth_m: Vec::new(),
        depth_m: 1.0e-3,
    };
    for (f, sigma, eps_r, delta) in table {
        let gamma = reflection_coefficient(complex_permittivity(eps_r, sigma, f), 0.0, Polarization::Parallel)
            .expect("finite reflection");
        inputs.surface_ipd_w_m2.push(
            incident_power_density(f, LimitStandard::Icnirp, ExposureCategory::GeneralPublic)
                .expect("in band"),
        );
        inputs.transmission_coefficient.push(power_transmission(gamma));
        inputs.penetration_depth_m.push(delta);
    }
    inputs
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("absorption_sampling");
    let inputs = skin_inputs();

    for sample_size in [100_usize, 1000] {
        let sampler = AbsorptionSampler::new(SamplingConfig::new(100, sample_size, 0));
        group.bench_function(BenchmarkId::new("runs_100", sample_size), |b| {
            b.iter(|| sampler.estimate(&inputs).expect("valid inputs"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
