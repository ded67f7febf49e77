//! Cyclic rotation of a packed bit sequence.
//!
//! A sequence of `size` bits lives in `ceil(size / BITS)` words, the last of
//! which is only partially used. Rotating by `amount` (positive moves bit `i`
//! to `(i + amount) mod size`) is done with word moves, shifts and masks:
//!
//! 1. `amount` is reduced into `[0, size)`.
//! 2. It is split into a word part `amount / BITS` and a residual
//!    `amount % BITS`.
//! 3. The word part rotates the word array and then *collapses* the partial
//!    last word back to the end of the array (see `rotate_and_collapse`).
//! 4. The residual computes one carry per word, the bits that spill into the
//!    next word in rotation order, with the wraparound carry taken from the
//!    partial last word and, if it is too short, from the word before it.
//! 5. Every word is shifted by the residual and or'd with the carry it
//!    receives, and the last word is masked back to its valid bits.
//!
//! ```rust
//! use cyclic_bits::rotate::rotate_words;
//!
//! // 17 bits, only bit 16 set
//! let mut words = [1u64 << 16];
//! rotate_words(&mut words, 17, 1).unwrap();
//! assert_eq!(words, [1]);
//! ```

use alloc::vec::Vec;

use crate::bit_ops::{extract_bits, offset_bits, or_into, xor_into};
use crate::error::BitsError;
use crate::word::{Word, last_word_bits, words_for};

type Result<T> = core::result::Result<T, BitsError>;

/// Reduces `amount` into `[0, bound)`, treating negative values cyclically.
///
/// Returns 0 for an empty bound.
#[inline]
pub fn normalize_cyclic(amount: i64, bound: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    (amount as i128).rem_euclid(bound as i128) as usize
}

/// Rotates the word slots themselves by `amount` positions, positive toward
/// higher indices. Bits inside each word are untouched.
pub fn rotate_word_order<W: Word>(words: &mut [W], amount: i64) {
    let k = normalize_cyclic(amount, words.len());
    if k != 0 {
        words.rotate_right(k);
    }
}

/// Checks that `words` is exactly the storage of a `size`-bit sequence.
pub fn check_shape<W: Word>(words: &[W], size: usize) -> Result<()> {
    let expected = words_for::<W>(size);
    if words.len() != expected {
        return Err(BitsError::WordCountMismatch {
            expected,
            found: words.len(),
        });
    }
    if let Some(&last) = words.last() {
        if last & !W::low_mask(last_word_bits::<W>(size)) != W::ZERO {
            return Err(BitsError::TailNotClear { size });
        }
    }
    Ok(())
}

/// Rotates a whole number of words, `word_shift` in `1..words.len()`.
///
/// After the slot rotation the partial last word sits at `word_shift - 1`
/// and the sequence read around it is off by `BITS - last_bits` bits. Walking
/// backward from there to the physical end, each step moves the gap one slot
/// down: the current word takes the high `BITS - last_bits` bits of its
/// predecessor below its own `last_bits` bits, and the predecessor keeps only
/// its low `last_bits` bits, becoming the new partial word.
fn rotate_and_collapse<W: Word>(words: &mut [W], size: usize, word_shift: usize) {
    debug_assert!(word_shift > 0 && word_shift < words.len());
    rotate_word_order(words, word_shift as i64);

    let last_bits = last_word_bits::<W>(size);
    if last_bits == W::BITS {
        return;
    }
    let n = words.len();
    let lift = W::BITS - last_bits;
    let keep = W::low_mask(last_bits);

    for current in (0..word_shift).rev() {
        let prev = if current == 0 { n - 1 } else { current - 1 };
        let carried = words[prev] >> last_bits;
        words[current] = (words[current] << lift) | carried;
        words[prev] &= keep;
    }
}

/// Reusable scratch space for rotations.
///
/// Holds the carry buffer between calls so that repeated rotations of
/// same-sized sequences do not reallocate. The buffer is only ever read and
/// written by the engine while it owns `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct RotationScratch<W: Word> {
    carries: Vec<W>,
}

impl<W: Word> RotationScratch<W> {
    pub fn new() -> Self {
        Self {
            carries: Vec::new(),
        }
    }

    /// Scratch sized for sequences of up to `words` words.
    pub fn with_words(words: usize) -> Self {
        Self {
            carries: Vec::with_capacity(words),
        }
    }

    /// Rotates the `size`-bit sequence stored in `words` by `amount`, in place.
    ///
    /// Fails with [`BitsError::WordCountMismatch`] or
    /// [`BitsError::TailNotClear`] when `words` is not the exact storage of a
    /// `size`-bit sequence.
    pub fn rotate(&mut self, words: &mut [W], size: usize, amount: i64) -> Result<()> {
        check_shape(words, size)?;
        self.rotate_in_place(words, size, amount);
        Ok(())
    }

    /// [`rotate`](Self::rotate) for storage already known to be well formed.
    pub(crate) fn rotate_in_place(&mut self, words: &mut [W], size: usize, amount: i64) {
        debug_assert!(check_shape(words, size).is_ok());
        let amount = normalize_cyclic(amount, size);
        if amount == 0 {
            return;
        }

        let word_shift = amount >> W::SHIFT;
        let residual = amount & W::LIMIT;

        if word_shift != 0 {
            rotate_and_collapse(words, size, word_shift);
        }
        if residual != 0 {
            self.fill_carries(words, size, residual);
            self.apply_carries(words, size, residual);
        }
    }

    /// Rotates bits `[start, end)` of the sequence by `amount` within that
    /// window, leaving every other bit untouched.
    ///
    /// The window is extracted to a bit-0-aligned temporary, rotated at size
    /// `end - start`, and spliced back: the original window bits are xor'd
    /// out and the rotated ones or'd in at `start`.
    pub fn rotate_window(
        &mut self,
        words: &mut [W],
        size: usize,
        amount: i64,
        start: usize,
        end: usize,
    ) -> Result<()> {
        check_shape(words, size)?;
        if start > end || end > size {
            return Err(BitsError::InvalidRange {
                start,
                end,
                len: size,
            });
        }
        let width = end - start;
        if normalize_cyclic(amount, width) == 0 {
            return Ok(());
        }

        let mut window = extract_bits(words, start, end);
        let original = offset_bits(&window, start, words.len());
        self.rotate_in_place(&mut window, width, amount);
        let rotated = offset_bits(&window, start, words.len());

        xor_into(words, &original);
        or_into(words, &rotated);
        Ok(())
    }

    /// Carry destined for word `i`, stored at `carries[i]`.
    ///
    /// Word `i < last` produces its top `residual` bits for word `i + 1`.
    /// The last word produces the wraparound carry for word 0: the top
    /// `residual` bits of the logical sequence. When the last word holds
    /// fewer than `residual` valid bits, the remaining `residual - last_bits`
    /// bleed over from the word before it.
    fn fill_carries(&mut self, words: &[W], size: usize, residual: usize) {
        let n = words.len();
        let last = n - 1;
        let last_bits = last_word_bits::<W>(size);
        let spill = W::BITS - residual;

        self.carries.clear();
        self.carries
            .extend(words[..last].iter().map(|&word| word >> spill));

        let wrap = if residual <= last_bits {
            words[last] >> (last_bits - residual)
        } else {
            let bleed = residual - last_bits;
            (words[last - 1] >> (W::BITS - bleed)) | (words[last] << bleed)
        };
        self.carries.push(wrap);
        self.carries.rotate_right(1);
    }

    fn apply_carries(&self, words: &mut [W], size: usize, residual: usize) {
        for (word, &carry) in words.iter_mut().zip(&self.carries) {
            *word = (*word << residual) | carry;
        }
        if let Some(last) = words.last_mut() {
            *last &= W::low_mask(last_word_bits::<W>(size));
        }
    }
}

/// Rotates the `size`-bit sequence in `words` by `amount`, in place.
///
/// Positive amounts move bit `i` to `(i + amount) mod size`.
pub fn rotate_words<W: Word>(words: &mut [W], size: usize, amount: i64) -> Result<()> {
    RotationScratch::with_words(words.len()).rotate(words, size, amount)
}

/// Like [`rotate_words`] but leaves `words` untouched and returns the result.
pub fn rotate_words_copy<W: Word>(words: &[W], size: usize, amount: i64) -> Result<Vec<W>> {
    let mut copy = words.to_vec();
    rotate_words(&mut copy, size, amount)?;
    Ok(copy)
}

/// Rotates only bits `[start, end)` of the sequence; see
/// [`RotationScratch::rotate_window`].
pub fn rotate_window_words<W: Word>(
    words: &mut [W],
    size: usize,
    amount: i64,
    start: usize,
    end: usize,
) -> Result<()> {
    RotationScratch::with_words(words.len()).rotate_window(words, size, amount, start, end)
}
