// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical shakeout of the uniform fraction samplers.

mod strings;

use bitfrac::generators::{RandomSource, ReferenceRand, ReferenceRand32};
use bitfrac::stats;

const SAMPLE_SIZE_EXPONENT: usize = 20;
const SAMPLE_SIZE: usize = 1 << SAMPLE_SIZE_EXPONENT;
const P_LIMIT: f64 = 0.001;

fn run_checks(source: &mut impl RandomSource, source_name: &str) {
    let (chi_squared, p_bins) = stats::fraction_bin_test(source, SAMPLE_SIZE);
    let (mean, p_mean) = stats::sample_mean_test(source, SAMPLE_SIZE);
    let verdict = if p_bins > P_LIMIT && p_mean > P_LIMIT {
        strings::PASS_STR
    } else {
        strings::FAIL_STR
    };
    println!(
        "{:<12}: chi2: {:<10.4} (p: {:.6})   mean: {:.6} (p: {:.6})   - {}",
        source_name, chi_squared, p_bins, mean, p_mean, verdict
    );
}

fn main() {
    let mut source = ReferenceRand::new(0);
    run_checks(&mut source, "Reference64");
    let mut source = ReferenceRand32::new(0);
    run_checks(&mut source, "Reference32");
}
