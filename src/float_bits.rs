// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Bit-level access to IEEE-754 floating point values.
//! Exposes the storage layout of f32 and f64, reinterpretation between
//! floats and same-width integers, and the exact mapping from raw bits
//! to fractions in the half-open interval [0,1).

/// Bit mask of the given width at the given offset.
macro_rules! mask {
    ($uty:ty, $offset:expr, $bits:expr) => {
        (((1 as $uty) << $bits) - 1) << $offset
    };
}

/// Integer types usable as raw bit material for scale_to_fraction.
/// Signed types contribute their bit pattern; the sign carries no meaning.
pub trait RawBits: Copy {
    /// Width of the type in bits.
    const WIDTH: u32;
    /// Bit pattern, zero-extended to 128 bits.
    fn raw(self) -> u128;
}

macro_rules! raw_bits_impl {
    ($($ty:ty => $uty:ty),* $(,)?) => {$(
        impl RawBits for $ty {
            const WIDTH: u32 = <$uty>::BITS;

            fn raw(self) -> u128 {
                self as $uty as u128
            }
        }
    )*};
}

raw_bits_impl!(
    u8 => u8, u16 => u16, u32 => u32, u64 => u64, u128 => u128,
    i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128,
);

/// Storage layout of an IEEE-754 binary float, plus the bit manipulations
/// built on top of it.
/// All conversions are total: every bit pattern is a valid input and NaN
/// payloads, signed zeros and infinities survive round trips unchanged.
pub trait FloatBits: Copy {
    /// Unsigned bit-pattern carrier of identical width.
    type Unsigned: Copy + PartialEq + core::fmt::Debug;
    /// Signed bit-pattern carrier of identical width.
    type Signed: Copy + PartialEq + core::fmt::Debug;

    const SIGN_OFFSET: u32;
    const SIGN_BITS: u32;
    const EXPONENT_OFFSET: u32;
    const EXPONENT_BITS: u32;
    const EXPONENT_BIAS: u32;
    const FRACTION_OFFSET: u32;
    const FRACTION_BITS: u32;

    const SIGN_MASK: Self::Unsigned;
    const EXPONENT_MASK: Self::Unsigned;
    const FRACTION_MASK: Self::Unsigned;

    /// Bit pattern reinterpreted as an unsigned integer.
    fn as_unsigned(self) -> Self::Unsigned;
    /// Bit pattern reinterpreted as a signed integer.
    fn as_integer(self) -> Self::Signed;
    /// Exact inverse of as_unsigned.
    fn as_float(bits: Self::Unsigned) -> Self;

    /// Interpret the low FRACTION_BITS + 1 bits as a fraction in [0,1).
    /// The mapping is exact, monotone in the unsigned argument, and hits
    /// every multiple of 2^-(FRACTION_BITS + 1) in the interval.
    fn bits_as_fraction(bits: Self::Unsigned) -> Self;
    /// Re-scale an integer of any width to [0,1), keeping its high bits.
    fn scale_to_fraction<T: RawBits>(value: T) -> Self;
}

macro_rules! float_bits_impl {
    ($fty:ty, $uty:ty, $ity:ty, $exp_bits:expr, $exp_bias:expr, $frac_bits:expr) => {
        impl FloatBits for $fty {
            type Unsigned = $uty;
            type Signed = $ity;

            const SIGN_OFFSET: u32 = <$uty>::BITS - 1;
            const SIGN_BITS: u32 = 1;
            const EXPONENT_OFFSET: u32 = $frac_bits;
            const EXPONENT_BITS: u32 = $exp_bits;
            const EXPONENT_BIAS: u32 = $exp_bias;
            const FRACTION_OFFSET: u32 = 0;
            const FRACTION_BITS: u32 = $frac_bits;

            const SIGN_MASK: $uty = mask!($uty, Self::SIGN_OFFSET, Self::SIGN_BITS);
            const EXPONENT_MASK: $uty = mask!($uty, Self::EXPONENT_OFFSET, Self::EXPONENT_BITS);
            const FRACTION_MASK: $uty = mask!($uty, Self::FRACTION_OFFSET, Self::FRACTION_BITS);

            fn as_unsigned(self) -> $uty {
                <$uty>::from_ne_bytes(self.to_ne_bytes())
            }

            fn as_integer(self) -> $ity {
                <$ity>::from_ne_bytes(self.to_ne_bytes())
            }

            fn as_float(bits: $uty) -> $fty {
                <$fty>::from_ne_bytes(bits.to_ne_bytes())
            }

            fn bits_as_fraction(bits: $uty) -> $fty {
                // M is the bit directly above the mantissa field,
                // HALF the bit pattern of 0.5.
                const M: $uty = (1 as $uty) << $frac_bits;
                const HALF: $uty = ($exp_bias - 1) << $frac_bits;

                // The low mantissa bits give an exact value in [0.5,1.0);
                // bit M selects whether 0.5 is subtracted back out.
                // Both operands are dyadic, so the subtraction never rounds.
                Self::as_float((bits & (M - 1)) | HALF)
                    - Self::as_float((bits & M).wrapping_sub(1) & HALF)
            }

            fn scale_to_fraction<T: RawBits>(value: T) -> $fty {
                const DIGITS: u32 = $frac_bits + 1;
                let raw = value.raw();
                let scaled = if T::WIDTH > DIGITS {
                    raw >> (T::WIDTH - DIGITS)
                } else {
                    raw << (DIGITS - T::WIDTH)
                };
                Self::bits_as_fraction(scaled as $uty)
            }
        }

        // Layout consistency; a platform without IEEE-754 binary floats
        // or mismatched carrier widths must fail to build.
        const _: () = {
            assert!(core::mem::size_of::<$fty>() == core::mem::size_of::<$uty>());
            assert!(core::mem::size_of::<$fty>() == core::mem::size_of::<$ity>());
            assert!(<$fty>::RADIX == 2);
            assert!(<$fty>::MANTISSA_DIGITS == $frac_bits + 1);
            assert!(<$fty>::MAX_EXP == $exp_bias + 1);
            assert!(<$fty as FloatBits>::FRACTION_OFFSET == 0);
            assert!(<$fty as FloatBits>::SIGN_BITS == 1);
            assert!(
                <$fty as FloatBits>::FRACTION_OFFSET + <$fty as FloatBits>::FRACTION_BITS
                    == <$fty as FloatBits>::EXPONENT_OFFSET
            );
            assert!(
                <$fty as FloatBits>::EXPONENT_OFFSET + <$fty as FloatBits>::EXPONENT_BITS
                    == <$fty as FloatBits>::SIGN_OFFSET
            );
        };
    };
}

float_bits_impl!(f32, u32, i32, 8, 127, 23);
float_bits_impl!(f64, u64, i64, 11, 1023, 52);
