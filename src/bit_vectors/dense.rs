//! Dense bit vector with a block-partitioned rank index.

use crate::bit_vectors::data::{BitVectorBuilder, BitVectorData};
use crate::bit_vectors::rank_index::RankIndex;
use crate::bit_vectors::{Access, NumBits, Rank, Select};
use crate::builder::{Build, Builder};
use crate::error::Result;

/// Bit vector that stores every bit verbatim and answers rank in constant
/// time through a cumulative block index.
///
/// This composes [`BitVectorData`] with a [`RankIndex`]: rank queries read
/// one block entry plus a handful of word popcounts; select queries
/// binary-search the block boundaries and finish inside a single block.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ranksel::bit_vectors::prelude::*;
/// use ranksel::bit_vectors::DenseBitVector;
///
/// let bv = DenseBitVector::from_bytes(&[0b1001], 4)?;
///
/// assert_eq!(bv.len(), 4);
/// assert_eq!(bv.access(1), Some(false));
///
/// assert_eq!(bv.rank1(1)?, 1);
/// assert_eq!(bv.rank0(1)?, 0);
///
/// assert_eq!(bv.select1(1)?, 3);
/// assert_eq!(bv.select0(0)?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseBitVector {
    data: BitVectorData,
    index: RankIndex,
}

impl DenseBitVector {
    /// Creates a new vector from a byte buffer and an explicit bit length.
    ///
    /// Logical bit `i` is bit `i % 8` counted from the least-significant bit
    /// of byte `i / 8`. Construction runs in O(`len`) and the result is
    /// immutable.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`](crate::error::Error::InvalidLength) if
    /// `len > bytes.len() * 8`.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self> {
        let data = BitVectorData::from_bytes(bytes, len)?;
        Ok(Self::from_data(data))
    }

    /// Creates a new vector from input bit stream `bits`.
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        Self::from_data(BitVectorData::from_bits(bits))
    }

    fn from_data(data: BitVectorData) -> Self {
        let index = RankIndex::new(&data);
        Self { data, index }
    }

    /// Returns the reference of the internal bit vector data.
    pub const fn data(&self) -> &BitVectorData {
        &self.data
    }

    /// Returns the reference of the internal rank index.
    pub const fn rank_index(&self) -> &RankIndex {
        &self.index
    }

    /// Returns the number of bits stored.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the vector is empty.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NumBits for DenseBitVector {
    /// Returns the number of bits stored (just wrapping [`Self::len()`]).
    #[inline(always)]
    fn num_bits(&self) -> usize {
        self.len()
    }

    /// Returns the number of bits set.
    #[inline(always)]
    fn num_ones(&self) -> usize {
        self.index.num_ones()
    }
}

impl Access for DenseBitVector {
    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    fn access(&self, pos: usize) -> Option<bool> {
        self.data.access(pos)
    }
}

impl Rank for DenseBitVector {
    /// Returns the number of ones from the 0-th bit to the `pos-1`-th bit.
    ///
    /// # Complexity
    ///
    /// Constant
    ///
    /// # Examples
    ///
    /// ```
    /// use ranksel::bit_vectors::{DenseBitVector, Rank};
    ///
    /// let bv = DenseBitVector::from_bits([true, false, false, true]);
    ///
    /// assert_eq!(bv.rank1(1), Ok(1));
    /// assert_eq!(bv.rank1(4), Ok(2));
    /// assert!(bv.rank1(5).is_err());
    /// ```
    fn rank1(&self, pos: usize) -> Result<usize> {
        self.index.rank1(&self.data, pos)
    }

    /// Returns the number of zeros from the 0-th bit to the `pos-1`-th bit.
    ///
    /// # Complexity
    ///
    /// Constant
    fn rank0(&self, pos: usize) -> Result<usize> {
        self.index.rank0(&self.data, pos)
    }
}

impl Select for DenseBitVector {
    /// Searches the position of the `k`-th bit set.
    ///
    /// # Complexity
    ///
    /// Logarithmic in the number of blocks
    ///
    /// # Examples
    ///
    /// ```
    /// use ranksel::bit_vectors::{DenseBitVector, Select};
    ///
    /// let bv = DenseBitVector::from_bits([true, false, false, true]);
    ///
    /// assert_eq!(bv.select1(0), Ok(0));
    /// assert_eq!(bv.select1(1), Ok(3));
    /// assert!(bv.select1(2).is_err());
    /// ```
    fn select1(&self, k: usize) -> Result<usize> {
        self.index.select1(&self.data, k)
    }

    /// Searches the position of the `k`-th bit unset.
    ///
    /// # Complexity
    ///
    /// Logarithmic in the number of blocks
    fn select0(&self, k: usize) -> Result<usize> {
        self.index.select0(&self.data, k)
    }
}

/// Streaming builder for [`DenseBitVector`].
#[derive(Debug, Default, Clone)]
pub struct DenseBitVectorBuilder {
    inner: BitVectorBuilder,
}

impl DenseBitVectorBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.inner.push_bit(bit);
    }
}

impl Builder for DenseBitVectorBuilder {
    type Item = bool;
    type Build = DenseBitVector;

    fn push(&mut self, item: Self::Item) -> Result<()> {
        self.push_bit(item);
        Ok(())
    }

    fn build(self) -> Self::Build {
        DenseBitVector::from_data(self.inner.freeze())
    }
}

impl Build for DenseBitVector {
    type Builder = DenseBitVectorBuilder;

    fn builder() -> Self::Builder {
        DenseBitVectorBuilder::new()
    }
}
