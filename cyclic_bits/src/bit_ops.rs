//! Word-array primitives shared by the vector, the rotation engine and the
//! matrix. None of these loop over single bits.

use alloc::vec;
use alloc::vec::Vec;

use crate::index::BitIndex;
use crate::word::{Word, last_word_bits, words_for};

/// Ones from `first_bit` to `last_bit`, both inclusive, inside one word.
#[inline]
pub fn range_mask<W: Word>(first_bit: usize, last_bit: usize) -> W {
    debug_assert!(first_bit <= last_bit && last_bit < W::BITS);
    W::low_mask(last_bit + 1) & !W::low_mask(first_bit)
}

/// Copies bits `[start, end)` of `words` into a fresh array aligned at bit 0.
///
/// The result holds exactly `ceil((end - start) / BITS)` words and its bits
/// past `end - start` are zero. Each output word is assembled from at most two
/// input words: the upper part of the word holding `start + i * BITS` and the
/// lower part of its successor.
pub fn extract_bits<W: Word>(words: &[W], start: usize, end: usize) -> Vec<W> {
    debug_assert!(start <= end && end <= words.len() * W::BITS);
    let total = end - start;
    let mut out = vec![W::zeroed(); words_for::<W>(total)];
    let first = BitIndex::<W>::new(start);

    for (i, slot) in out.iter_mut().enumerate() {
        let idx = first.word + i;
        let mut value = words[idx] >> first.bit;
        if first.bit != 0 {
            if let Some(&next) = words.get(idx + 1) {
                value |= next << (W::BITS - first.bit);
            }
        }
        *slot = value;
    }
    if let Some(last) = out.last_mut() {
        *last &= W::low_mask(last_word_bits::<W>(total));
    }
    out
}

/// Returns `out_len` words holding `src` moved up by `offset` bits.
///
/// Bits that would land at or past `out_len * BITS` are dropped.
pub fn offset_bits<W: Word>(src: &[W], offset: usize, out_len: usize) -> Vec<W> {
    let mut out = vec![W::zeroed(); out_len];
    let shift = BitIndex::<W>::new(offset);

    for (i, &word) in src.iter().enumerate() {
        let lo = i + shift.word;
        if lo >= out_len {
            break;
        }
        out[lo] |= word << shift.bit;
        if shift.bit != 0 && lo + 1 < out_len {
            out[lo + 1] |= word >> (W::BITS - shift.bit);
        }
    }
    out
}

/// `dst[i] ^= src[i]` over the common prefix.
pub fn xor_into<W: Word>(dst: &mut [W], src: &[W]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// `dst[i] |= src[i]` over the common prefix.
pub fn or_into<W: Word>(dst: &mut [W], src: &[W]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d |= s;
    }
}

/// True when every bit at or past `size` in the first `words_for(size)` words
/// is zero, and any words beyond those are zero as well.
pub fn tail_is_clear<W: Word>(words: &[W], size: usize) -> bool {
    let used = words_for::<W>(size);
    let last_ok = match words[..used.min(words.len())].last() {
        Some(&last) => last & !W::low_mask(last_word_bits::<W>(size)) == W::ZERO,
        None => true,
    };
    last_ok && words.iter().skip(used).all(|&w| w == W::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_mask_inclusive() {
        assert_eq!(range_mask::<u32>(0, 31), u32::MAX);
        assert_eq!(range_mask::<u32>(3, 3), 1 << 3);
        assert_eq!(range_mask::<u64>(1, 4), 0b1_1110);
    }

    #[test]
    fn extract_across_word_boundary() {
        // bits 60..68 of a 2-word array
        let words: [u64; 2] = [0xF000_0000_0000_0000, 0b1010];
        let out = extract_bits(&words, 60, 68);
        assert_eq!(out, vec![0b1010_1111]);
    }

    #[test]
    fn extract_masks_the_tail() {
        let words: [u32; 2] = [u32::MAX, u32::MAX];
        let out = extract_bits(&words, 1, 40);
        assert_eq!(out, vec![u32::MAX, 0x7F]);
        assert!(extract_bits(&words, 5, 5).is_empty());
    }

    #[test]
    fn offset_moves_bits_up_and_drops_overflow() {
        let src: [u32; 1] = [0xFFFF_0001];
        let out = offset_bits(&src, 20, 2);
        assert_eq!(out, vec![0x0010_0000, 0x000F_FFF0]);
        let out = offset_bits(&src, 40, 2);
        assert_eq!(out, vec![0, 0xFF00_0100]);
        let out = offset_bits(&src, 64, 2);
        assert_eq!(out, vec![0, 0]);
    }

    #[test]
    fn tail_check() {
        assert!(tail_is_clear::<u64>(&[0b111], 3));
        assert!(!tail_is_clear::<u64>(&[0b1111], 3));
        assert!(tail_is_clear::<u64>(&[u64::MAX], 64));
        assert!(!tail_is_clear::<u64>(&[0, 1], 64));
        assert!(tail_is_clear::<u32>(&[], 0));
    }
}
