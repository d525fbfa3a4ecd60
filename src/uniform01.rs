// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Low overhead uniform distribution over the half-open interval [0,1).
//! When the source's declared range is [0, 2^k - 1] with k covering the
//! target mantissa, one raw output maps straight to fraction bits;
//! otherwise outputs are accumulated until the full precision is covered.

use core::marker::PhantomData;

use crate::float_bits::FloatBits;
use crate::generators::RandomSource;
use crate::utils;

/// True if `value` is one below a binary power (or zero).
pub const fn is_pow2_minus1(value: u64) -> bool {
    value & value.wrapping_add(1) == 0
}

/// Source draws needed to cover `digits` significant bits when each draw
/// contributes floor(log2(span + 1)) of them.
const fn canonical_calls(span: u64, digits: u32) -> u32 {
    let bits_per_call = if span == u64::MAX {
        64
    } else if span == 0 {
        1
    } else {
        utils::floor_log2(span + 1)
    };
    digits.div_ceil(bits_per_call)
}

/// Uniform distribution over [0,1) for a float type.
/// Stateless; all instances for the same float type are interchangeable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uniform01<F> {
    _float: PhantomData<F>,
}

impl<F> Uniform01<F> {
    pub const fn new() -> Self {
        Uniform01 {
            _float: PhantomData,
        }
    }
}

macro_rules! uniform01_impl {
    ($fty:ty, $uty:ty) => {
        impl Uniform01<$fty> {
            /// Smallest sample; attainable.
            pub const fn min(&self) -> $fty {
                0.0
            }

            /// Upper bound of the interval; never attained.
            pub const fn max(&self) -> $fty {
                1.0
            }

            /// True if raw output of G feeds the fraction bits directly.
            /// Holds when G covers [0, 2^k - 1] and k spans the mantissa.
            pub const fn uses_raw_bits<G: RandomSource>() -> bool {
                G::MIN == 0
                    && is_pow2_minus1(G::MAX)
                    && (1u64 << <$fty>::MANTISSA_DIGITS) - 1 <= G::MAX
            }

            /// Runtime form of uses_raw_bits for diagnostics; the source
            /// state is left untouched.
            pub fn uses_raw_bits_for<G: RandomSource>(&self, _source: &G) -> bool {
                Self::uses_raw_bits::<G>()
            }

            /// Draw one sample, advancing the source as often as the
            /// selected path requires (exactly once on the raw path).
            pub fn sample<G: RandomSource>(&self, source: &mut G) -> $fty {
                if Self::uses_raw_bits::<G>() {
                    <$fty as FloatBits>::bits_as_fraction(source.next() as $uty)
                } else {
                    Self::sample_canonical(source)
                }
            }

            // Weighted accumulation of as many draws as the mantissa needs,
            // radix = number of distinct source outputs per draw.
            fn sample_canonical<G: RandomSource>(source: &mut G) -> $fty {
                let span = G::MAX - G::MIN;
                let radix = span as $fty + 1.0;
                let calls = canonical_calls(span, <$fty>::MANTISSA_DIGITS);
                let mut acc: $fty = 0.0;
                let mut scale: $fty = 1.0;
                for _ in 0..calls {
                    acc = acc * radix + source.next().wrapping_sub(G::MIN) as $fty;
                    scale *= radix;
                }
                let sample = acc / scale;
                if sample < 1.0 {
                    sample
                } else {
                    // accumulated rounding can land on 1.0; step back
                    // inside the interval
                    <$fty as FloatBits>::as_float(<$fty as FloatBits>::as_unsigned(1.0) - 1)
                }
            }
        }
    };
}

uniform01_impl!(f32, u32);
uniform01_impl!(f64, u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_bits::FloatBits;
    use crate::generators::testgens::{OnlyOne, OnlyZero, SmallRange};
    use crate::generators::{RandomSource, ReferenceRand, ReferenceRand32};

    #[test]
    fn stateless_value_semantics() {
        let a = Uniform01::<f64>::new();
        let b = Uniform01::<f64>::new();
        assert_eq!(a, b);
        assert_eq!(a.min(), 0.0);
        assert_eq!(a.max(), 1.0);

        let c = Uniform01::<f32>::new();
        assert_eq!(c, Uniform01::default());
        assert_eq!(c.min(), 0.0);
        assert_eq!(c.max(), 1.0);
    }

    #[test]
    fn pow2_minus1_predicate() {
        assert!(is_pow2_minus1(0));
        assert!(is_pow2_minus1(1));
        assert!(is_pow2_minus1((1 << 32) - 1));
        assert!(is_pow2_minus1(u64::MAX));
        assert!(!is_pow2_minus1(2));
        assert!(!is_pow2_minus1(100));
    }

    #[test]
    fn raw_bits_classification() {
        assert!(Uniform01::<f64>::uses_raw_bits::<ReferenceRand>());
        assert!(Uniform01::<f32>::uses_raw_bits::<ReferenceRand>());
        assert!(Uniform01::<f32>::uses_raw_bits::<ReferenceRand32>());
        assert!(!Uniform01::<f64>::uses_raw_bits::<ReferenceRand32>());
        assert!(!Uniform01::<f64>::uses_raw_bits::<SmallRange>());
        assert!(!Uniform01::<f32>::uses_raw_bits::<SmallRange>());

        let dist = Uniform01::<f64>::new();
        assert!(dist.uses_raw_bits_for(&OnlyZero));
        assert!(!dist.uses_raw_bits_for(&SmallRange::new()));
    }

    #[test]
    fn degenerate_sources_pin_the_interval_ends() {
        let dist = Uniform01::<f64>::new();
        assert_eq!(dist.sample(&mut OnlyZero), 0.0);
        let top = dist.sample(&mut OnlyOne);
        assert!(top < 1.0);
        assert_eq!(f64::as_float(top.as_unsigned() + 1), 1.0);

        let dist = Uniform01::<f32>::new();
        assert_eq!(dist.sample(&mut OnlyZero), 0.0);
        let top = dist.sample(&mut OnlyOne);
        assert!(top < 1.0);
        assert_eq!(f32::as_float(top.as_unsigned() + 1), 1.0);
    }

    #[test]
    fn raw_path_matches_bits_as_fraction() {
        let mut sampled = ReferenceRand::new(42);
        let mut mirrored = ReferenceRand::new(42);
        let dist = Uniform01::<f64>::new();
        for _ in 0..100 {
            assert_eq!(
                dist.sample(&mut sampled),
                f64::bits_as_fraction(mirrored.next())
            );
        }

        let mut sampled = ReferenceRand::new(7);
        let mut mirrored = ReferenceRand::new(7);
        let dist = Uniform01::<f32>::new();
        for _ in 0..100 {
            assert_eq!(
                dist.sample(&mut sampled),
                f32::bits_as_fraction(mirrored.next() as u32)
            );
        }
    }

    #[test]
    fn fallback_stays_inside_the_interval() {
        let dist = Uniform01::<f64>::new();
        let mut small = SmallRange::new();
        for _ in 0..1000 {
            let x = dist.sample(&mut small);
            assert!((0.0..1.0).contains(&x));
        }
        let mut r32 = ReferenceRand32::new(1);
        for _ in 0..1000 {
            let x = dist.sample(&mut r32);
            assert!((0.0..1.0).contains(&x));
        }

        let dist = Uniform01::<f32>::new();
        let mut small = SmallRange::new();
        for _ in 0..1000 {
            let x = dist.sample(&mut small);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn draw_counts_per_sample() {
        struct TallyFull {
            calls: usize,
        }
        impl RandomSource for TallyFull {
            const MIN: u64 = 0;
            const MAX: u64 = u64::MAX;
            fn next(&mut self) -> u64 {
                self.calls += 1;
                0
            }
        }

        struct TallySmall {
            calls: usize,
        }
        impl RandomSource for TallySmall {
            const MIN: u64 = 1;
            const MAX: u64 = 100;
            fn next(&mut self) -> u64 {
                self.calls += 1;
                1
            }
        }

        let dist = Uniform01::<f64>::new();
        let mut tally = TallyFull { calls: 0 };
        for _ in 0..5 {
            dist.sample(&mut tally);
        }
        assert_eq!(tally.calls, 5);

        let mut tally = TallySmall { calls: 0 };
        dist.sample(&mut tally);
        assert_eq!(tally.calls, canonical_calls(99, f64::MANTISSA_DIGITS) as usize);
    }

    #[test]
    fn canonical_call_counts() {
        assert_eq!(canonical_calls(u64::MAX, 53), 1);
        assert_eq!(canonical_calls(u64::MAX, 24), 1);
        assert_eq!(canonical_calls(99, 53), 9);
        assert_eq!(canonical_calls(99, 24), 4);
        assert_eq!(canonical_calls(1, 24), 24);
        assert_eq!(canonical_calls(0, 53), 53);
    }
}
