use core::marker::PhantomData;

use crate::word::Word;

/// A logical bit position split into its word slot and in-word offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitIndex<W> {
    pub word: usize,
    pub bit: usize,
    _word: PhantomData<W>,
}

impl<W: Word> BitIndex<W> {
    #[inline]
    pub fn new(index: usize) -> Self {
        BitIndex {
            word: index >> W::SHIFT,
            bit: index & W::LIMIT,
            _word: PhantomData,
        }
    }

    #[inline]
    pub fn mask(self) -> W {
        W::bit(self.bit)
    }

    #[inline]
    pub fn get(self) -> usize {
        (self.word << W::SHIFT) | self.bit
    }
}

impl<W: Word> From<usize> for BitIndex<W> {
    #[inline]
    fn from(index: usize) -> Self {
        BitIndex::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_joins() {
        let idx = BitIndex::<u32>::new(70);
        assert_eq!((idx.word, idx.bit), (2, 6));
        assert_eq!(idx.mask(), 1 << 6);
        assert_eq!(idx.get(), 70);
        let idx: BitIndex<u64> = 64.into();
        assert_eq!((idx.word, idx.bit), (1, 0));
    }
}
