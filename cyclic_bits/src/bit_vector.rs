//! Growable, word-packed bit vector with cyclic rotation.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```rust
//! use cyclic_bits::BitVector;
//!
//! let mut bits = BitVector::<u64>::new(17);
//! bits.set(16).unwrap();
//! bits.rotate(1);
//!
//! assert!(bits.get(0).unwrap());
//! assert_eq!(bits.len(), 17);
//! ```
//!
//! ## Windowed rotation
//!
//! ```rust
//! use cyclic_bits::BitVector;
//!
//! let mut bits: BitVector<u32> = [true, false, false, true, true].into_iter().collect();
//! // rotate bits 1..4 by one, leaving bit 0 and bit 4 alone
//! bits.rotate_window(1, 1, 4).unwrap();
//! assert_eq!(bits.iter().collect::<Vec<_>>(), [true, true, false, false, true]);
//! ```
//!
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::bit_ops::{range_mask, xor_into};
use crate::error::BitsError;
use crate::index::BitIndex;
use crate::rotate::{RotationScratch, check_shape};
use crate::word::{Word, last_word_bits, words_for};

type Result<T> = core::result::Result<T, BitsError>;

/// Spare capacity is sized so that the used bits fill at most this share
/// of it after growth, as `LOAD_NUM / LOAD_DEN`.
const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

/// A sequence of `len` bits stored in words of type `W`.
///
/// Bit `i` lives in word `i / W::BITS` at offset `i % W::BITS`. Bits past
/// `len`, including whole spare words kept for growth, are always zero.
#[derive(Debug, Clone)]
pub struct BitVector<W: Word = u64> {
    words: Vec<W>,
    len: usize,
}

pub type BitVector32 = BitVector<u32>;
pub type BitVector64 = BitVector<u64>;

impl<W: Word> BitVector<W> {
    /// Creates a vector of `len` zero bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_bits::BitVector;
    ///
    /// let bits = BitVector::<u32>::new(40);
    /// assert_eq!(bits.len(), 40);
    /// assert_eq!(bits.words().len(), 2);
    /// ```
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![W::zeroed(); words_for::<W>(len)],
            len,
        }
    }

    /// Creates an empty vector that can hold `bits` bits before reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![W::zeroed(); words_for::<W>(bits)],
            len: 0,
        }
    }

    /// Wraps existing storage.
    ///
    /// `words` must hold exactly `ceil(len / W::BITS)` words and every bit at
    /// or past `len` must be zero, otherwise the words are rejected rather than
    /// padded or truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_bits::{BitVector, BitsError};
    ///
    /// let bits = BitVector::from_words(vec![0b101u64], 3).unwrap();
    /// assert!(bits.get(2).unwrap());
    ///
    /// let err = BitVector::from_words(vec![0u64, 0], 64).unwrap_err();
    /// assert_eq!(err, BitsError::WordCountMismatch { expected: 1, found: 2 });
    /// ```
    pub fn from_words(words: Vec<W>, len: usize) -> Result<Self> {
        check_shape(&words, len)?;
        Ok(Self { words, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits addressable without reallocating.
    pub fn capacity(&self) -> usize {
        self.words.len() * W::BITS
    }

    /// The `ceil(len / W::BITS)` words holding the bits, without spare capacity.
    pub fn words(&self) -> &[W] {
        &self.words[..self.used_words()]
    }

    pub fn into_words(mut self) -> Vec<W> {
        let used = self.used_words();
        self.words.truncate(used);
        self.words
    }

    /// Native-endian byte view of [`words`](Self::words).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.words())
    }

    #[inline]
    fn used_words(&self) -> usize {
        words_for::<W>(self.len)
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<BitIndex<W>> {
        if index >= self.len {
            return Err(BitsError::IndexOutOfBounds(index, self.len));
        }
        Ok(BitIndex::new(index))
    }

    #[inline]
    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if end < start || end > self.len {
            return Err(BitsError::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        let at = self.check_index(index)?;
        Ok(self.words[at.word] & at.mask() != W::ZERO)
    }

    pub fn set(&mut self, index: usize) -> Result<()> {
        let at = self.check_index(index)?;
        self.words[at.word] |= at.mask();
        Ok(())
    }

    pub fn unset(&mut self, index: usize) -> Result<()> {
        let at = self.check_index(index)?;
        self.words[at.word] &= !at.mask();
        Ok(())
    }

    pub fn flip(&mut self, index: usize) -> Result<()> {
        let at = self.check_index(index)?;
        self.words[at.word] ^= at.mask();
        Ok(())
    }

    pub fn set_to(&mut self, index: usize, value: bool) -> Result<()> {
        if value {
            self.set(index)
        } else {
            self.unset(index)
        }
    }

    /// Overwrites the whole word containing bit `index` with `value`.
    ///
    /// The least-significant bit of `value` lands on the first bit of that
    /// word. Bits of `value` that would fall past `len` are dropped.
    pub fn set_bulk(&mut self, index: usize, value: W) -> Result<()> {
        let at = self.check_index(index)?;
        let used = self.used_words();
        self.words[at.word] = if at.word + 1 == used {
            value & W::low_mask(last_word_bits::<W>(self.len))
        } else {
            value
        };
        Ok(())
    }

    /// Sets every bit in `[start, end)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_bits::BitVector;
    ///
    /// let mut bits = BitVector::<u64>::new(100);
    /// bits.set_range(60, 70).unwrap();
    /// assert!(bits.is_range(60, 70, true).unwrap());
    /// assert!(bits.is_range(0, 60, false).unwrap());
    /// ```
    pub fn set_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(());
        }
        let first = BitIndex::<W>::new(start);
        let last = BitIndex::<W>::new(end - 1);
        for word in first.word..=last.word {
            let lo = if word == first.word { first.bit } else { 0 };
            let hi = if word == last.word { last.bit } else { W::LIMIT };
            self.words[word] |= range_mask::<W>(lo, hi);
        }
        Ok(())
    }

    /// True iff every bit in `[start, end)` equals `value`. An empty range
    /// matches.
    pub fn is_range(&self, start: usize, end: usize, value: bool) -> Result<bool> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(true);
        }
        let first = BitIndex::<W>::new(start);
        let last = BitIndex::<W>::new(end - 1);
        for word in first.word..=last.word {
            let lo = if word == first.word { first.bit } else { 0 };
            let hi = if word == last.word { last.bit } else { W::LIMIT };
            let mask = range_mask::<W>(lo, hi);
            let expected = if value { mask } else { W::ZERO };
            if self.words[word] & mask != expected {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Index of the first set bit at or after `from`, or `len` if there is none.
    pub fn next_set(&self, from: usize) -> usize {
        self.scan(from, |word| word)
    }

    /// Index of the first unset bit at or after `from`, or `len` if there is
    /// none.
    pub fn next_unset(&self, from: usize) -> usize {
        self.scan(from, |word| !word)
    }

    fn scan(&self, from: usize, view: impl Fn(W) -> W) -> usize {
        if from >= self.len {
            return self.len;
        }
        let used = self.used_words();
        let at = BitIndex::<W>::new(from);
        let mut word = at.word;
        // mask off lesser bits first
        let mut current = view(self.words[word]) & !W::low_mask(at.bit);
        while current == W::ZERO {
            word += 1;
            if word == used {
                return self.len;
            }
            current = view(self.words[word]);
        }
        ((word << W::SHIFT) + current.trailing_zeros()).min(self.len)
    }

    /// Clears every bit. The length is unchanged.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = W::ZERO);
    }

    pub fn count_ones(&self) -> usize {
        self.words().iter().map(|&w| w.count_ones()).sum()
    }

    /// Flips every bit that is set in `other`.
    pub fn xor(&mut self, other: &BitVector<W>) -> Result<()> {
        if self.len != other.len {
            return Err(BitsError::SizeMismatch {
                left: self.len,
                right: other.len,
            });
        }
        let used = self.used_words();
        xor_into(&mut self.words[..used], other.words());
        Ok(())
    }

    fn ensure_capacity(&mut self, bits: usize) {
        if bits > self.capacity() {
            let target = (bits * LOAD_DEN).div_ceil(LOAD_NUM);
            self.words.resize(words_for::<W>(target), W::ZERO);
        }
    }

    /// Appends the low `num_bits` of `value` at the end, assuming the bits of
    /// `value` above `num_bits` are zero.
    fn push_low_bits(&mut self, value: W, num_bits: usize) {
        if num_bits == 0 {
            return;
        }
        self.ensure_capacity(self.len + num_bits);
        let at = BitIndex::<W>::new(self.len);
        self.words[at.word] |= value << at.bit;
        if at.bit + num_bits > W::BITS {
            self.words[at.word + 1] |= value >> (W::BITS - at.bit);
        }
        self.len += num_bits;
    }

    pub fn append_bit(&mut self, bit: bool) {
        self.push_low_bits(if bit { W::ONE } else { W::ZERO }, 1);
    }

    /// Appends the low `num_bits` of `value`, most-significant first.
    ///
    /// Appending 6 bits from `0b01_1110` appends `0, 1, 1, 1, 1, 0` in that
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_bits::BitVector;
    ///
    /// let mut bits = BitVector::<u32>::new(0);
    /// bits.append_bits(0b01_1110, 6).unwrap();
    /// let appended: Vec<bool> = bits.iter().collect();
    /// assert_eq!(appended, [false, true, true, true, true, false]);
    /// ```
    pub fn append_bits(&mut self, value: W, num_bits: usize) -> Result<()> {
        if num_bits > W::BITS {
            return Err(BitsError::TooManyBits(num_bits, W::BITS));
        }
        if num_bits == 0 {
            return Ok(());
        }
        // bit `num_bits - 1` of `value` must become the first appended bit
        let ordered = value.reverse_bits() >> (W::BITS - num_bits);
        self.push_low_bits(ordered, num_bits);
        Ok(())
    }

    /// Appends every bit of `other`, a word at a time.
    pub fn append_vector(&mut self, other: &BitVector<W>) {
        self.ensure_capacity(self.len + other.len);
        let words = other.words();
        let count = words.len();
        for (i, &word) in words.iter().enumerate() {
            let bits = if i + 1 == count {
                last_word_bits::<W>(other.len)
            } else {
                W::BITS
            };
            self.push_low_bits(word, bits);
        }
    }

    /// Reverses the order of the bits: bit `i` swaps with bit `len - 1 - i`.
    ///
    /// Words are reversed as a whole first, which leaves the padding of the
    /// old last word at the bottom of word 0. The sequence is then shifted
    /// down by that padding, carrying between neighbouring words.
    pub fn reverse(&mut self) {
        let used = self.used_words();
        if used == 0 {
            return;
        }
        let words = &mut self.words[..used];
        words.reverse();
        for word in words.iter_mut() {
            *word = word.reverse_bits();
        }

        let pad = used * W::BITS - self.len;
        if pad != 0 {
            for i in 0..used {
                let spill = match words.get(i + 1) {
                    Some(&next) => next << (W::BITS - pad),
                    None => W::ZERO,
                };
                words[i] = (words[i] >> pad) | spill;
            }
        }
    }

    /// Rotates the bits cyclically: bit `i` moves to `(i + amount) mod len`.
    /// Negative amounts rotate the other way.
    pub fn rotate(&mut self, amount: i64) {
        let used = self.used_words();
        RotationScratch::with_words(used).rotate_in_place(&mut self.words[..used], self.len, amount);
    }

    /// [`rotate`](Self::rotate) reusing a caller-owned carry buffer.
    pub fn rotate_with(&mut self, scratch: &mut RotationScratch<W>, amount: i64) {
        let used = self.used_words();
        scratch.rotate_in_place(&mut self.words[..used], self.len, amount);
    }

    /// A rotated copy; `self` is left as is.
    pub fn rotated(&self, amount: i64) -> Self {
        let mut copy = Self {
            words: self.words().to_vec(),
            len: self.len,
        };
        copy.rotate(amount);
        copy
    }

    /// Rotates only bits `[start, end)` by `amount` within that window.
    pub fn rotate_window(&mut self, amount: i64, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        let used = self.used_words();
        RotationScratch::with_words(used).rotate_window(
            &mut self.words[..used],
            self.len,
            amount,
            start,
            end,
        )
    }

    pub fn iter(&self) -> Iter<'_, W> {
        Iter {
            vector: self,
            index: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn raw_words(&self) -> &[W] {
        &self.words
    }
}

impl<W: Word> Default for BitVector<W> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<W: Word> PartialEq for BitVector<W> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.words() == other.words()
    }
}

impl<W: Word> Eq for BitVector<W> {}

impl<W: Word> Hash for BitVector<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.words().hash(state);
    }
}

/// One glyph per bit, a space before every group of eight.
impl<W: Word> fmt::Display for BitVector<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                f.write_str(" ")?;
            }
            f.write_str(if bit { "█" } else { "_" })?;
        }
        Ok(())
    }
}

pub struct Iter<'a, W: Word> {
    vector: &'a BitVector<W>,
    index: usize,
}

impl<'a, W: Word> Iterator for Iter<'a, W> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.vector.len {
            None
        } else {
            let at = BitIndex::<W>::new(self.index);
            self.index += 1;
            Some(self.vector.words[at.word] & at.mask() != W::ZERO)
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, W: Word> ExactSizeIterator for Iter<'a, W> {}

impl<'a, W: Word> IntoIterator for &'a BitVector<W> {
    type Item = bool;
    type IntoIter = Iter<'a, W>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<W: Word> Extend<bool> for BitVector<W> {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.append_bit(bit);
        }
    }
}

impl<W: Word> FromIterator<bool> for BitVector<W> {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut vector = Self::default();
        vector.extend(iter);
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_ops::tail_is_clear;
    use alloc::string::ToString;

    fn bools<W: Word>(v: &BitVector<W>) -> Vec<bool> {
        v.iter().collect()
    }

    #[test]
    fn basic_bit_access() -> Result<()> {
        let mut v = BitVector::<u64>::new(70);
        v.set(0)?;
        v.set(65)?;
        v.flip(3)?;
        assert!(v.get(0)?);
        assert!(v.get(65)?);
        assert!(v.get(3)?);
        v.flip(3)?;
        v.unset(65)?;
        assert!(!v.get(3)?);
        assert!(!v.get(65)?);
        assert_eq!(v.count_ones(), 1);
        Ok(())
    }

    #[test]
    fn unset_clears_only_one_bit() -> Result<()> {
        let mut v = BitVector::<u32>::new(8);
        v.set_range(0, 8)?;
        v.unset(4)?;
        assert_eq!(v.words(), &[0b1110_1111]);
        Ok(())
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut v = BitVector::<u32>::new(5);
        assert_eq!(v.get(5), Err(BitsError::IndexOutOfBounds(5, 5)));
        assert!(v.set(9).is_err());
        assert!(v.flip(5).is_err());
        assert!(v.set_bulk(5, 1).is_err());
    }

    #[test]
    fn range_contract() -> Result<()> {
        let mut v = BitVector::<u64>::new(130);
        assert!(v.set_range(5, 4).is_err());
        assert!(v.set_range(0, 131).is_err());
        assert!(v.is_range(3, 3, true)?);
        v.set_range(3, 3)?;
        assert_eq!(v.count_ones(), 0);

        v.set_range(62, 129)?;
        assert_eq!(v.count_ones(), 67);
        assert!(v.is_range(62, 129, true)?);
        assert!(!v.is_range(61, 129, true)?);
        assert!(v.is_range(129, 130, false)?);
        assert!(!v.is_range(0, 63, false)?);
        Ok(())
    }

    #[test]
    fn set_bulk_keeps_tail_clear() -> Result<()> {
        let mut v = BitVector::<u32>::new(40);
        v.set_bulk(0, u32::MAX)?;
        v.set_bulk(35, u32::MAX)?;
        assert_eq!(v.words(), &[u32::MAX, 0xFF]);
        assert!(tail_is_clear(v.raw_words(), v.len()));
        Ok(())
    }

    #[test]
    fn next_set_and_unset() -> Result<()> {
        let mut v = BitVector::<u64>::new(150);
        v.set(3)?;
        v.set(140)?;
        assert_eq!(v.next_set(0), 3);
        assert_eq!(v.next_set(4), 140);
        assert_eq!(v.next_set(141), 150);
        assert_eq!(v.next_set(500), 150);

        v.set_range(0, 150)?;
        v.unset(77)?;
        assert_eq!(v.next_unset(0), 77);
        assert_eq!(v.next_unset(78), 150);
        Ok(())
    }

    #[test]
    fn append_bits_most_significant_first() -> Result<()> {
        let mut v = BitVector::<u64>::new(0);
        v.append_bits(0b01_1110, 6)?;
        assert_eq!(bools(&v), [false, true, true, true, true, false]);
        v.append_bits(u64::MAX, 64)?;
        assert_eq!(v.len(), 70);
        assert!(v.is_range(6, 70, true)?);
        v.append_bits(1, 0)?;
        assert_eq!(v.len(), 70);
        assert_eq!(v.append_bits(0, 65), Err(BitsError::TooManyBits(65, 64)));
        Ok(())
    }

    #[test]
    fn append_grows_geometrically() {
        let mut v = BitVector::<u32>::with_capacity(0);
        for i in 0..100 {
            v.append_bit(i % 3 == 0);
        }
        assert_eq!(v.len(), 100);
        assert!(v.capacity() >= 100);
        assert_eq!(v.count_ones(), 34);
        assert!(tail_is_clear(v.raw_words(), v.len()));
    }

    #[test]
    fn append_vector_word_at_a_time() {
        let a: BitVector<u32> = (0..45).map(|i| i % 2 == 0).collect();
        let b: BitVector<u32> = (0..37).map(|i| i % 5 == 0).collect();
        let mut joined = a.clone();
        joined.append_vector(&b);
        let expected: Vec<bool> = bools(&a).into_iter().chain(bools(&b)).collect();
        assert_eq!(bools(&joined), expected);
    }

    #[test]
    fn reverse_handles_partial_word() -> Result<()> {
        for len in [1usize, 5, 31, 32, 33, 64, 95, 100] {
            let v: BitVector<u32> = (0..len).map(|i| i % 3 == 1 || i == 0).collect();
            let mut r = v.clone();
            r.reverse();
            for i in 0..len {
                assert_eq!(r.get(i)?, v.get(len - 1 - i)?, "len {len} bit {i}");
            }
            assert!(tail_is_clear(r.raw_words(), len));
            r.reverse();
            assert_eq!(r, v);
        }
        Ok(())
    }

    #[test]
    fn equality_ignores_spare_capacity() {
        let mut grown = BitVector::<u64>::with_capacity(1000);
        grown.extend([true, false, true]);
        let exact = BitVector::from_words(vec![0b101u64], 3).unwrap();
        assert_eq!(grown, exact);
        assert_ne!(exact, BitVector::from_words(vec![0b101u64], 4).unwrap());
    }

    #[test]
    fn from_words_rejects_dirty_tail() {
        assert_eq!(
            BitVector::from_words(vec![0b1000u32], 3),
            Err(BitsError::TailNotClear { size: 3 })
        );
    }

    #[test]
    fn xor_requires_equal_sizes() -> Result<()> {
        let mut a = BitVector::<u64>::new(10);
        let mut b = BitVector::<u64>::new(10);
        a.set(1)?;
        b.set(1)?;
        b.set(2)?;
        a.xor(&b)?;
        assert_eq!(bools(&a).iter().filter(|&&x| x).count(), 1);
        assert!(a.get(2)?);
        assert!(a.xor(&BitVector::new(11)).is_err());
        Ok(())
    }

    #[test]
    fn rotate_and_rotated() -> Result<()> {
        let mut v = BitVector::<u64>::new(17);
        v.set(16)?;
        let copy = v.rotated(1);
        assert!(v.get(16)?);
        assert!(copy.get(0)?);
        v.rotate(1);
        assert_eq!(v, copy);
        v.rotate(-1);
        assert!(v.get(16)?);
        Ok(())
    }

    #[test]
    fn rotate_with_shared_scratch() -> Result<()> {
        let mut scratch = RotationScratch::new();
        let mut v: BitVector<u32> = (0..77).map(|i| i % 7 == 0).collect();
        let original = v.clone();
        for amount in [5, 33, -12, 64] {
            v.rotate_with(&mut scratch, amount);
        }
        assert_eq!(v, original.rotated(5 + 33 - 12 + 64));
        Ok(())
    }

    #[test]
    fn rotate_window_on_grown_vector() -> Result<()> {
        let mut v = BitVector::<u64>::with_capacity(512);
        v.extend((0..70).map(|i| i == 1 || i == 67));
        v.rotate_window(1, 1, 68)?;
        assert!(v.get(2)?);
        assert!(v.get(1)?);
        assert_eq!(v.count_ones(), 2);
        assert!(tail_is_clear(v.raw_words(), v.len()));
        assert!(v.rotate_window(1, 10, 71).is_err());
        Ok(())
    }

    #[test]
    fn display_groups_by_byte() {
        let v: BitVector<u64> = (0..10).map(|i| i == 0 || i == 9).collect();
        assert_eq!(v.to_string(), " █_______ _█");
    }

    #[test]
    fn byte_view_matches_words() {
        let v = BitVector::from_words(vec![0x0102_0304u32], 32).unwrap();
        assert_eq!(v.as_bytes(), &0x0102_0304u32.to_ne_bytes());
        assert_eq!(v.into_words(), vec![0x0102_0304]);
    }
}
