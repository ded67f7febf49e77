//! # cyclic_bits
//!
//! A `no_std` compatible word-packed bit vector whose whole bit sequence can
//! be rotated cyclically by any signed amount, using word shifts and masks
//! only, even when its length is not a multiple of the word width.
//!
//! ```rust
//! use cyclic_bits::BitVector;
//!
//! // 65 bits: one full u64 plus a single bit in the last word
//! let mut bits = BitVector::<u64>::new(65);
//! for i in [0, 62, 63, 64] {
//!     bits.set(i).unwrap();
//! }
//! let original = bits.clone();
//!
//! bits.rotate(3);
//! assert!(bits.get(1).unwrap()); // 63 + 3 wraps to 1
//! bits.rotate(-3);
//! assert_eq!(bits, original);
//! ```
//!
//! ## Word width
//!
//! ```rust
//! use cyclic_bits::{BitVector32, BitVector64};
//!
//! // Same 100 bits, 4 words of u32 or 2 words of u64
//! assert_eq!(BitVector32::new(100).words().len(), 4);
//! assert_eq!(BitVector64::new(100).words().len(), 2);
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub use error::{BitsError, ErrorKind};

pub mod bit_ops;
pub mod index;
pub mod rotate;
pub mod word;

pub mod bit_vector;
pub mod matrix;

pub use bit_vector::{BitVector, BitVector32, BitVector64};
pub use matrix::{BitMatrix, BitMatrix32, BitMatrix64};
pub use rotate::{RotationScratch, normalize_cyclic, rotate_window_words, rotate_words};
pub use word::Word;
