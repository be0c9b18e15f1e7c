//! Monte-Carlo estimate of absorbed power density inside tissue.
//!
//! Each run draws `sample_size` uniform scalers in `[0, 1)` per frequency, scales the
//! transmitted surface power density `S₀·T` by them and attenuates the result by
//! `exp(−2d/δ)`. Runs are reduced to per-frequency means and unbiased standard
//! deviations, and the runs are reduced again to a single estimate.
//!
//! The uniform scaler is a statistical envelope for unknown sub-wavelength field
//! variability at the surface, not a field solution.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::errors::{DosimetryError, Result};
use crate::math::{column_means, column_std_unbiased, ensure_finite, NumericMode, Scalar};

/// Repetition and sample counts for the sampler.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Independent repetitions.
    pub number_of_runs: usize,
    /// Samples drawn per frequency in each run.
    pub sample_size: usize,
    /// Base seed; each run derives its own stream from it.
    pub seed: u64,
    /// Treatment of non-finite values.
    pub numeric_mode: NumericMode,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            number_of_runs: 1000,
            sample_size: 1000,
            seed: 0,
            numeric_mode: NumericMode::Checked,
        }
    }
}

impl SamplingConfig {
    /// Creates a configuration with the given counts and seed.
    #[must_use]
    pub fn new(number_of_runs: usize, sample_size: usize, seed: u64) -> Self {
        Self {
            number_of_runs,
            sample_size,
            seed,
            ..Self::default()
        }
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the numeric mode.
    #[must_use]
    pub fn with_numeric_mode(mut self, numeric_mode: NumericMode) -> Self {
        self.numeric_mode = numeric_mode;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.number_of_runs == 0 {
            return Err(DosimetryError::InvalidArgument("number_of_runs must be at least 1".into()));
        }
        if self.sample_size < 2 {
            return Err(DosimetryError::InvalidArgument(format!(
                "sample_size must be at least 2 for an unbiased standard deviation, got {}",
                self.sample_size
            )));
        }
        Ok(())
    }

    fn run_rng(&self, run: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ (run as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Per-frequency inputs to the sampler at one tissue depth.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorptionInputs {
    /// Incident power density at the surface in W/m²; a single value applies to every frequency.
    pub surface_ipd_w_m2: Vec<Scalar>,
    /// Power transmission coefficient `|1 − Γ²|` per frequency.
    pub transmission_coefficient: Vec<Scalar>,
    /// Power penetration depth in meters per frequency.
    pub penetration_depth_m: Vec<Scalar>,
    /// Depth below the surface in meters.
    pub depth_m: Scalar,
}

impl AbsorptionInputs {
    /// Number of frequency points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transmission_coefficient.len()
    }

    /// True if there are no frequency points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transmission_coefficient.is_empty()
    }

    /// Same inputs evaluated at a different depth.
    #[must_use]
    pub fn at_depth(&self, depth_m: Scalar) -> Self {
        Self {
            depth_m,
            ..self.clone()
        }
    }

    fn surface_ipd(&self, j: usize) -> Scalar {
        if self.surface_ipd_w_m2.len() == 1 {
            self.surface_ipd_w_m2[0]
        } else {
            self.surface_ipd_w_m2[j]
        }
    }

    /// Attenuation factor `exp(−2d/δ)` per frequency.
    #[must_use]
    pub fn attenuation(&self) -> Vec<Scalar> {
        self.penetration_depth_m
            .iter()
            .map(|delta| (-2.0 * self.depth_m / delta).exp())
            .collect()
    }

    /// Largest attainable absorbed power density `S₀·T·exp(−2d/δ)` per frequency.
    ///
    /// # Errors
    /// [`DosimetryError::InvalidArgument`] when the per-frequency vectors disagree in length.
    pub fn peak_absorbed(&self) -> Result<Vec<Scalar>> {
        self.validate_shape()?;
        Ok(self.peak_unchecked())
    }

    fn peak_unchecked(&self) -> Vec<Scalar> {
        self.attenuation()
            .into_iter()
            .enumerate()
            .map(|(j, att)| self.surface_ipd(j) * self.transmission_coefficient[j] * att)
            .collect()
    }

    fn validate(&self, mode: NumericMode) -> Result<()> {
        self.validate_shape()?;
        if !mode.is_checked() {
            return Ok(());
        }

        for (j, (&t, &delta)) in self
            .transmission_coefficient
            .iter()
            .zip(&self.penetration_depth_m)
            .enumerate()
        {
            ensure_finite("surface incident power density", self.surface_ipd(j))?;
            ensure_finite("transmission coefficient", t)?;
            if t == 0.0 {
                return Err(DosimetryError::Numeric(format!(
                    "transmission coefficient is zero at frequency index {j}"
                )));
            }
            if !(delta.is_finite() && delta > 0.0) {
                return Err(DosimetryError::Numeric(format!(
                    "penetration depth must be positive and finite, got {delta} at frequency index {j}"
                )));
            }
        }
        Ok(())
    }

    fn validate_shape(&self) -> Result<()> {
        let n = self.len();
        if n == 0 {
            return Err(DosimetryError::InvalidArgument("at least one frequency point is required".into()));
        }
        if self.penetration_depth_m.len() != n {
            return Err(DosimetryError::InvalidArgument(format!(
                "penetration_depth_m has {} entries, transmission_coefficient has {n}",
                self.penetration_depth_m.len()
            )));
        }
        if self.surface_ipd_w_m2.len() != n && self.surface_ipd_w_m2.len() != 1 {
            return Err(DosimetryError::InvalidArgument(format!(
                "surface_ipd_w_m2 has {} entries, expected 1 or {n}",
                self.surface_ipd_w_m2.len()
            )));
        }
        if !self.depth_m.is_finite() || self.depth_m < 0.0 {
            return Err(DosimetryError::InvalidArgument(format!(
                "depth_m must be finite and non-negative, got {}",
                self.depth_m
            )));
        }
        if self
            .surface_ipd_w_m2
            .iter()
            .chain(&self.transmission_coefficient)
            .any(|&v| v < 0.0)
        {
            return Err(DosimetryError::InvalidArgument(
                "power densities and transmission coefficients must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Draws one `sample_size × n_freq` matrix of absorbed power density samples.
///
/// # Errors
/// [`DosimetryError::InvalidArgument`] when the per-frequency vectors disagree in length
/// or the depth is negative.
pub fn take_sample<R: Rng>(
    rng: &mut R,
    sample_size: usize,
    inputs: &AbsorptionInputs,
) -> Result<DMatrix<Scalar>> {
    inputs.peak_absorbed().map(|peak| draw_sample(rng, sample_size, &peak))
}

fn draw_sample<R: Rng>(rng: &mut R, sample_size: usize, peak: &[Scalar]) -> DMatrix<Scalar> {
    DMatrix::from_fn(sample_size, peak.len(), |_, j| rng.gen::<Scalar>() * peak[j])
}

/// Per-run statistics, one row per run and one column per frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRuns {
    /// Mean of each run.
    pub means: DMatrix<Scalar>,
    /// Unbiased standard deviation of each run.
    pub stds: DMatrix<Scalar>,
}

impl SamplingRuns {
    /// Number of runs.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.means.nrows()
    }

    /// Reduces the runs to mean-of-means and mean-of-stds.
    #[must_use]
    pub fn estimate(&self) -> AbsorptionEstimate {
        AbsorptionEstimate {
            mean: column_means(&self.means),
            error: column_means(&self.stds),
        }
    }

    /// Spread of the run means across runs (unbiased), per frequency.
    ///
    /// Shrinks as `1/√sample_size`, unlike the per-run standard deviation which
    /// converges to the spread of the underlying distribution.
    #[must_use]
    pub fn standard_error(&self) -> Vec<Scalar> {
        let means = column_means(&self.means);
        column_std_unbiased(&self.means, &means)
    }
}

/// Reported absorbed power density and its error band, per frequency, in W/m².
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorptionEstimate {
    /// Mean of the run means.
    pub mean: Vec<Scalar>,
    /// Mean of the run standard deviations.
    pub error: Vec<Scalar>,
}

/// Monte-Carlo sampler of absorbed power density.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsorptionSampler {
    config: SamplingConfig,
}

impl AbsorptionSampler {
    /// Creates a sampler with `config`.
    #[must_use]
    pub const fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    /// Sampler configuration.
    #[must_use]
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Executes every run and returns the per-run statistics.
    ///
    /// Each run uses an independent random stream derived from the seed, so results do
    /// not depend on whether runs execute sequentially or in parallel.
    pub fn run(&self, inputs: &AbsorptionInputs) -> Result<SamplingRuns> {
        self.config.validate()?;
        inputs.validate(self.config.numeric_mode)?;
        let n_freq = inputs.len();
        debug!(
            runs = self.config.number_of_runs,
            sample_size = self.config.sample_size,
            frequencies = n_freq,
            depth_m = inputs.depth_m,
            "sampling absorbed power density"
        );

        let peak = inputs.peak_unchecked();
        let single_run = |run: usize| {
            let mut rng = self.config.run_rng(run);
            let sample = draw_sample(&mut rng, self.config.sample_size, &peak);
            let means = column_means(&sample);
            let stds = column_std_unbiased(&sample, &means);
            (means, stds)
        };

        #[cfg(feature = "parallel")]
        let per_run: Vec<(Vec<Scalar>, Vec<Scalar>)> =
            (0..self.config.number_of_runs).into_par_iter().map(single_run).collect();
        #[cfg(not(feature = "parallel"))]
        let per_run: Vec<(Vec<Scalar>, Vec<Scalar>)> =
            (0..self.config.number_of_runs).map(single_run).collect();

        let n_runs = per_run.len();
        let runs = SamplingRuns {
            means: DMatrix::from_fn(n_runs, n_freq, |i, j| per_run[i].0[j]),
            stds: DMatrix::from_fn(n_runs, n_freq, |i, j| per_run[i].1[j]),
        };

        if self.config.numeric_mode.is_checked() {
            for &v in runs.means.iter().chain(runs.stds.iter()) {
                ensure_finite("absorbed power density", v)?;
            }
        }
        Ok(runs)
    }

    /// Executes every run and reduces to the reported estimate.
    pub fn estimate(&self, inputs: &AbsorptionInputs) -> Result<AbsorptionEstimate> {
        self.run(inputs).map(|runs| runs.estimate())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn inputs(depth_m: Scalar) -> AbsorptionInputs {
        AbsorptionInputs {
            surface_ipd_w_m2: vec![36.0, 30.6, 26.6, 24.3],
            transmission_coefficient: vec![0.53, 0.62, 0.71, 0.78],
            penetration_depth_m: vec![2.6e-3, 0.9e-3, 0.6e-3, 0.5e-3],
            depth_m,
        }
    }

    #[test]
    fn sample_matrix_has_expected_shape_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = inputs(1e-3);
        let sample = take_sample(&mut rng, 50, &input).unwrap();
        assert_eq!(sample.shape(), (50, 4));
        for (j, peak) in input.peak_absorbed().unwrap().into_iter().enumerate() {
            assert!(sample.column(j).iter().all(|&v| (0.0..peak).contains(&v)));
        }
    }

    #[test]
    fn runs_have_one_row_per_repetition() {
        let runs = AbsorptionSampler::new(SamplingConfig::new(12, 30, 1)).run(&inputs(0.0)).unwrap();
        assert_eq!(runs.runs(), 12);
        assert_eq!(runs.means.shape(), (12, 4));
        assert_eq!(runs.stds.shape(), (12, 4));
    }

    #[test]
    fn estimate_converges_to_uniform_moments() {
        let input = inputs(0.0);
        let est = AbsorptionSampler::new(SamplingConfig::new(200, 500, 3)).estimate(&input).unwrap();
        for (j, peak) in input.peak_absorbed().unwrap().into_iter().enumerate() {
            assert_relative_eq!(est.mean[j], peak / 2.0, max_relative = 0.01);
            assert_relative_eq!(est.error[j], peak / 12.0_f64.sqrt(), max_relative = 0.01);
        }
    }

    #[test]
    fn deeper_tissue_absorbs_less() {
        let sampler = AbsorptionSampler::new(SamplingConfig::new(20, 100, 11));
        let surface = sampler.estimate(&inputs(0.0)).unwrap();
        for depth in [1e-4, 1e-3, 5e-3] {
            let deep = sampler.estimate(&inputs(depth)).unwrap();
            for j in 0..4 {
                assert!(surface.mean[j] >= deep.mean[j]);
            }
        }
    }

    #[test]
    fn standard_error_shrinks_with_sample_size() {
        let input = inputs(0.0);
        let small = AbsorptionSampler::new(SamplingConfig::new(200, 10, 5)).run(&input).unwrap();
        let large = AbsorptionSampler::new(SamplingConfig::new(200, 1000, 5)).run(&input).unwrap();
        for (s, l) in small.standard_error().iter().zip(large.standard_error()) {
            assert!(l < *s, "{l} !< {s}");
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let sampler = AbsorptionSampler::new(SamplingConfig::new(5, 20, 42));
        let a = sampler.estimate(&inputs(1e-3)).unwrap();
        let b = sampler.estimate(&inputs(1e-3)).unwrap();
        assert_eq!(a, b);
        let c = AbsorptionSampler::new(SamplingConfig::new(5, 20, 43)).estimate(&inputs(1e-3)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn scalar_ipd_broadcasts() {
        let mut input = inputs(0.0);
        input.surface_ipd_w_m2 = vec![10.0];
        let peak = input.peak_absorbed().unwrap();
        assert_relative_eq!(peak[3], 10.0 * 0.78, epsilon = 1e-12);
        assert!(AbsorptionSampler::new(SamplingConfig::new(2, 4, 0)).run(&input).is_ok());
    }

    #[test]
    fn mismatched_lengths_are_invalid() {
        let mut input = inputs(0.0);
        input.penetration_depth_m.pop();
        let err = AbsorptionSampler::default().run(&input).unwrap_err();
        assert!(matches!(err, DosimetryError::InvalidArgument(_)));

        let mut input = inputs(0.0);
        input.surface_ipd_w_m2.truncate(2);
        let err = AbsorptionSampler::default().run(&input).unwrap_err();
        assert!(matches!(err, DosimetryError::InvalidArgument(_)));
    }

    #[test]
    fn take_sample_rejects_ragged_inputs() {
        let input = AbsorptionInputs {
            surface_ipd_w_m2: vec![10.0, 10.0],
            transmission_coefficient: vec![0.5, 0.5],
            penetration_depth_m: vec![1e-3; 3],
            depth_m: 0.0,
        };
        let err = take_sample(&mut StdRng::seed_from_u64(0), 4, &input).unwrap_err();
        assert!(matches!(err, DosimetryError::InvalidArgument(_)));
        assert!(matches!(input.peak_absorbed(), Err(DosimetryError::InvalidArgument(_))));

        let input = AbsorptionInputs {
            surface_ipd_w_m2: vec![10.0, 10.0, 10.0],
            penetration_depth_m: vec![1e-3, 1e-3],
            ..input
        };
        let err = take_sample(&mut StdRng::seed_from_u64(0), 4, &input).unwrap_err();
        assert!(matches!(err, DosimetryError::InvalidArgument(_)));
    }

    #[test]
    fn degenerate_counts_are_invalid() {
        for config in [SamplingConfig::new(0, 10, 0), SamplingConfig::new(10, 1, 0)] {
            let err = AbsorptionSampler::new(config).run(&inputs(0.0)).unwrap_err();
            assert!(matches!(err, DosimetryError::InvalidArgument(_)));
        }
    }

    #[test]
    fn zero_penetration_depth_is_numeric_error_unless_passed_through() {
        let mut input = inputs(1e-3);
        input.penetration_depth_m[0] = 0.0;
        let config = SamplingConfig::new(2, 4, 0);
        let err = AbsorptionSampler::new(config).run(&input).unwrap_err();
        assert!(matches!(err, DosimetryError::Numeric(_)));

        let runs = AbsorptionSampler::new(config.with_numeric_mode(NumericMode::PassThrough))
            .run(&input)
            .unwrap();
        // exp(-inf) attenuates to exactly zero
        assert_eq!(runs.means[(0, 0)], 0.0);
    }

    #[test]
    fn zero_transmission_is_numeric_error() {
        let mut input = inputs(0.0);
        input.transmission_coefficient[2] = 0.0;
        let err = AbsorptionSampler::new(SamplingConfig::new(2, 4, 0)).run(&input).unwrap_err();
        assert!(matches!(err, DosimetryError::Numeric(_)));
    }
}
