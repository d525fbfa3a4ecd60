// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical checks of sampler output.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::generators::RandomSource;
use crate::uniform01::Uniform01;
use crate::utils;

/// Number of equal-width bins used by the distribution test.
pub const FRACTION_BINS: usize = 256;

/// Get p value for given degrees of freedom and chi squared value.
fn chi_squared_p_value(df: u32, chi_squared: f64) -> f64 {
    let chi_squared_dist = ChiSquared::new(df as f64).unwrap();
    chi_squared_dist.cdf(chi_squared)
}

/// Draw 'sample_size' f64 fractions using the supplied source.
/// Measures the distribution among equal-width bins of [0,1).
/// Returns chi2 statistic, p value.
pub fn fraction_bin_test(source: &mut impl RandomSource, sample_size: usize) -> (f64, f64) {
    let dist = Uniform01::<f64>::new();
    let mut counts: [usize; FRACTION_BINS] = [0; FRACTION_BINS];
    for _ in 0..sample_size {
        let sample = dist.sample(source);
        counts[(sample * FRACTION_BINS as f64) as usize] += 1;
    }
    let expected: f64 = sample_size as f64 / FRACTION_BINS as f64;
    let mut chi_squared: f64 = 0.0;
    for value in counts {
        chi_squared += (value as f64 - expected).powi(2) / expected;
    }
    let p = 1.0 - chi_squared_p_value(FRACTION_BINS as u32 - 1, chi_squared);
    (chi_squared, p)
}

/// Draw 'sample_size' f64 fractions and compare their mean against 1/2.
/// The variance of a uniform [0,1) variate is 1/12.
/// Returns the mean, p value.
pub fn sample_mean_test(source: &mut impl RandomSource, sample_size: usize) -> (f64, f64) {
    let dist = Uniform01::<f64>::new();
    let mut sum: f64 = 0.0;
    for _ in 0..sample_size {
        sum += dist.sample(source);
    }
    let mean = sum / sample_size as f64;
    let z = (mean - 0.5) * f64::sqrt(12.0 * sample_size as f64);
    let p = statrs::function::erf::erfc(z.abs() * utils::INV_ROOT2);
    (mean, p)
}
