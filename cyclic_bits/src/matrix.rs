//! Two-dimensional bit grid stored as fixed-width rows of words.
//!
//! # Examples
//!
//! ```rust
//! use cyclic_bits::BitMatrix;
//!
//! let mut m = BitMatrix::<u64>::new(70, 3).expect("Failed to create matrix");
//! m.set(69, 1).unwrap();
//!
//! // Rotate row 1 one step: x = 69 wraps around to x = 0
//! m.rotate_row(1, 1).unwrap();
//! assert!(m.get(0, 1).unwrap());
//! assert!(!m.get(69, 1).unwrap());
//! ```

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::bit_ops::xor_into;
use crate::bit_vector::BitVector;
use crate::error::BitsError;
use crate::index::BitIndex;
use crate::rotate::RotationScratch;
use crate::word::{Word, last_word_bits, words_for};

type Result<T> = core::result::Result<T, BitsError>;

/// Row `y` occupies words `[y * row_size, (y + 1) * row_size)`, laid out
/// exactly like the words of a [`BitVector`] of length `width`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix<W: Word = u64> {
    width: usize,
    height: usize,
    row_size: usize,
    words: Vec<W>,
}

pub type BitMatrix32 = BitMatrix<u32>;
pub type BitMatrix64 = BitMatrix<u64>;

impl<W: Word> BitMatrix<W> {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BitsError::InvalidDimensions { width, height });
        }
        let row_size = words_for::<W>(width);
        Ok(Self {
            width,
            height,
            row_size,
            words: vec![W::zeroed(); row_size * height],
        })
    }

    pub fn square(dimension: usize) -> Result<Self> {
        Self::new(dimension, dimension)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Words per row.
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    #[inline]
    fn locate(&self, x: usize, y: usize) -> Result<(usize, W)> {
        if x >= self.width {
            return Err(BitsError::IndexOutOfBounds(x, self.width));
        }
        if y >= self.height {
            return Err(BitsError::IndexOutOfBounds(y, self.height));
        }
        let at = BitIndex::<W>::new(x);
        Ok((y * self.row_size + at.word, at.mask()))
    }

    #[inline]
    fn check_row(&self, y: usize) -> Result<core::ops::Range<usize>> {
        if y >= self.height {
            return Err(BitsError::IndexOutOfBounds(y, self.height));
        }
        let start = y * self.row_size;
        Ok(start..start + self.row_size)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        let (offset, mask) = self.locate(x, y)?;
        Ok(self.words[offset] & mask != W::ZERO)
    }

    pub fn set(&mut self, x: usize, y: usize) -> Result<()> {
        let (offset, mask) = self.locate(x, y)?;
        self.words[offset] |= mask;
        Ok(())
    }

    pub fn unset(&mut self, x: usize, y: usize) -> Result<()> {
        let (offset, mask) = self.locate(x, y)?;
        self.words[offset] &= !mask;
        Ok(())
    }

    pub fn flip(&mut self, x: usize, y: usize) -> Result<()> {
        let (offset, mask) = self.locate(x, y)?;
        self.words[offset] ^= mask;
        Ok(())
    }

    /// Flips every cell. Padding past `width` in each row stays zero.
    pub fn flip_all(&mut self) {
        for y in 0..self.height {
            let row = &mut self.words[y * self.row_size..(y + 1) * self.row_size];
            for word in row.iter_mut() {
                *word = !*word;
            }
            if let Some(last) = row.last_mut() {
                *last &= W::low_mask(last_word_bits::<W>(self.width));
            }
        }
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = W::ZERO);
    }

    /// Flips every cell that is set in `mask`.
    pub fn xor(&mut self, mask: &BitMatrix<W>) -> Result<()> {
        if self.width != mask.width || self.height != mask.height {
            return Err(BitsError::DimensionMismatch);
        }
        xor_into(&mut self.words, &mask.words);
        Ok(())
    }

    /// Sets the `width` x `height` block whose top-left cell is `(left, top)`.
    pub fn set_region(&mut self, left: usize, top: usize, width: usize, height: usize) -> Result<()> {
        if height == 0 || width == 0 {
            return Err(BitsError::InvalidDimensions { width, height });
        }
        let (right, bottom) = match (left.checked_add(width), top.checked_add(height)) {
            (Some(right), Some(bottom)) if right <= self.width && bottom <= self.height => {
                (right, bottom)
            }
            _ => return Err(BitsError::RegionOutOfBounds),
        };
        for y in top..bottom {
            let mut row = self.row(y)?;
            row.set_range(left, right)?;
            self.set_row(y, &row)?;
        }
        Ok(())
    }

    /// Copies row `y` out as a vector of length `width`.
    pub fn row(&self, y: usize) -> Result<BitVector<W>> {
        let range = self.check_row(y)?;
        let mut row = BitVector::new(self.width);
        for (i, &word) in self.words[range].iter().enumerate() {
            row.set_bulk(i << W::SHIFT, word)?;
        }
        Ok(row)
    }

    /// Overwrites row `y` with `row`, which must have length `width`.
    pub fn set_row(&mut self, y: usize, row: &BitVector<W>) -> Result<()> {
        let range = self.check_row(y)?;
        if row.len() != self.width {
            return Err(BitsError::SizeMismatch {
                left: self.width,
                right: row.len(),
            });
        }
        self.words[range].copy_from_slice(row.words());
        Ok(())
    }

    /// Rotates row `y` cyclically; `(x, y)` moves to `((x + amount) mod width, y)`.
    pub fn rotate_row(&mut self, y: usize, amount: i64) -> Result<()> {
        let range = self.check_row(y)?;
        let width = self.width;
        RotationScratch::with_words(self.row_size).rotate(&mut self.words[range], width, amount)
    }

    /// Rotates every row by the same amount.
    pub fn rotate_rows(&mut self, amount: i64) -> Result<()> {
        let mut scratch = RotationScratch::with_words(self.row_size);
        for y in 0..self.height {
            let start = y * self.row_size;
            scratch.rotate(&mut self.words[start..start + self.row_size], self.width, amount)?;
        }
        Ok(())
    }

    /// Turns the grid upside down: `(x, y)` moves to
    /// `(width - 1 - x, height - 1 - y)`.
    pub fn rotate_180(&mut self) -> Result<()> {
        for top in 0..self.height.div_ceil(2) {
            let bottom = self.height - 1 - top;
            let mut top_row = self.row(top)?;
            let mut bottom_row = self.row(bottom)?;
            top_row.reverse();
            bottom_row.reverse();
            self.set_row(top, &bottom_row)?;
            self.set_row(bottom, &top_row)?;
        }
        Ok(())
    }

    /// Renders the grid with `set` and `unset` per cell and `\n` after each row.
    pub fn render(&self, set: &str, unset: &str) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for y in 0..self.height {
            for x in 0..self.width {
                let bit = self.words[y * self.row_size + (x >> W::SHIFT)] & W::bit(x) != W::ZERO;
                out.push_str(if bit { set } else { unset });
            }
            out.push('\n');
        }
        out
    }
}

impl<W: Word> fmt::Display for BitMatrix<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("X ", "  "))
    }
}
