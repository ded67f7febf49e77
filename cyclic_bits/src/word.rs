//! Storage granule for packed bits.
//!
//! A [`Word`] is a fixed-width unsigned integer. Bit `k` of a word is
//! `(word >> k) & 1`, so the least-significant bit of word `i` holds logical
//! bit `i * BITS`.

use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr};

use bytemuck::Pod;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned integer used as the storage granule of packed bits.
pub trait Word:
    sealed::Sealed
    + Pod
    + Debug
    + Eq
    + Hash
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + Shl<usize, Output = Self>
    + Shr<usize, Output = Self>
{
    const BITS: usize;
    /// `log2(BITS)`, so `i >> SHIFT` is the word holding bit `i`.
    const SHIFT: usize;
    /// `BITS - 1`, so `i & LIMIT` is the offset of bit `i` inside its word.
    const LIMIT: usize = Self::BITS - 1;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn trailing_zeros(self) -> usize;
    fn leading_zeros(self) -> usize;
    fn count_ones(self) -> usize;
    fn reverse_bits(self) -> Self;

    /// Ones in the lowest `n` positions. Total for `n` in `0..=BITS`.
    #[inline]
    fn low_mask(n: usize) -> Self {
        debug_assert!(n <= Self::BITS);
        if n == 0 {
            Self::ZERO
        } else {
            Self::MAX >> (Self::BITS - n)
        }
    }

    /// Ones in the highest `n` positions. Total for `n` in `0..=BITS`.
    #[inline]
    fn high_mask(n: usize) -> Self {
        debug_assert!(n <= Self::BITS);
        if n == 0 {
            Self::ZERO
        } else {
            Self::MAX << (Self::BITS - n)
        }
    }

    /// The single bit at offset `bit` (taken modulo `BITS`).
    #[inline]
    fn bit(bit: usize) -> Self {
        Self::ONE << (bit & Self::LIMIT)
    }
}

macro_rules! implement_word {
    ($word_type:ty) => {
        impl Word for $word_type {
            const BITS: usize = <$word_type>::BITS as usize;
            const SHIFT: usize = (<$word_type>::BITS).trailing_zeros() as usize;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$word_type>::MAX;

            #[inline]
            fn trailing_zeros(self) -> usize {
                <$word_type>::trailing_zeros(self) as usize
            }

            #[inline]
            fn leading_zeros(self) -> usize {
                <$word_type>::leading_zeros(self) as usize
            }

            #[inline]
            fn count_ones(self) -> usize {
                <$word_type>::count_ones(self) as usize
            }

            #[inline]
            fn reverse_bits(self) -> Self {
                <$word_type>::reverse_bits(self)
            }
        }
    };
}

implement_word!(u32);
implement_word!(u64);

/// Number of words needed to hold `bits` bits.
#[inline]
pub fn words_for<W: Word>(bits: usize) -> usize {
    bits.div_ceil(W::BITS)
}

/// Valid bits in the last word of a `size`-bit sequence, in `1..=BITS`.
///
/// Returns `BITS` (not 0) when `size` is a whole number of words, and 0 only
/// for the empty sequence.
#[inline]
pub fn last_word_bits<W: Word>(size: usize) -> usize {
    match size & W::LIMIT {
        0 if size == 0 => 0,
        0 => W::BITS,
        n => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_cover_edges() {
        assert_eq!(<u64 as Word>::low_mask(0), 0);
        assert_eq!(<u64 as Word>::low_mask(64), u64::MAX);
        assert_eq!(<u64 as Word>::low_mask(3), 0b111);
        assert_eq!(<u32 as Word>::high_mask(0), 0);
        assert_eq!(<u32 as Word>::high_mask(32), u32::MAX);
        assert_eq!(<u32 as Word>::high_mask(1), 0x8000_0000);
    }

    #[test]
    fn shift_constants() {
        assert_eq!(<u32 as Word>::SHIFT, 5);
        assert_eq!(<u64 as Word>::SHIFT, 6);
        assert_eq!(<u64 as Word>::LIMIT, 63);
    }

    #[test]
    fn last_word_bits_never_reports_zero_for_full_words() {
        assert_eq!(last_word_bits::<u64>(0), 0);
        assert_eq!(last_word_bits::<u64>(64), 64);
        assert_eq!(last_word_bits::<u64>(65), 1);
        assert_eq!(last_word_bits::<u32>(17), 17);
        assert_eq!(words_for::<u32>(33), 2);
        assert_eq!(words_for::<u64>(0), 0);
    }
}
