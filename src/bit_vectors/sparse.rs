//! Sparse bit vector storing only the positions of set bits.

use crate::bit_vectors::data::{BitVectorData, WORD_LEN};
use crate::bit_vectors::{Access, NumBits, Rank, Select};
use crate::broadword;
use crate::builder::{Build, Builder};
use crate::error::{Error, Result};
use num_traits::ToPrimitive;

/// The number of index-space bits covered by one bucket.
const BUCKET_SHIFT: usize = 8;
const BUCKET_LEN: usize = 1 << BUCKET_SHIFT;
const BUCKET_MASK: usize = BUCKET_LEN - 1;

/// Bit vector that stores the ordered positions of set bits through a
/// two-level index, trading query time for space on sparse inputs.
///
/// The position space is partitioned into fixed 256-bit buckets.
/// `bucket_ranks[b]` holds the number of ones before bucket `b` (cumulative
/// in bit-index space), and each set bit contributes its low 8 bits to a
/// flat `u8` offset array; bucket `b` owns the strictly increasing slice
/// `offsets[bucket_ranks[b]..bucket_ranks[b + 1]]`.
///
/// Zeros are not stored: `select0` derives clear-bit runs from the gaps
/// between consecutive stored positions.
///
/// The query contract is identical to
/// [`DenseBitVector`](crate::bit_vectors::DenseBitVector): for the same
/// input, both engines return the same answers and fail with the same error
/// classification.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ranksel::bit_vectors::prelude::*;
/// use ranksel::bit_vectors::SparseBitVector;
///
/// let bv = SparseBitVector::from_bytes(&[0b1001], 4)?;
///
/// assert_eq!(bv.len(), 4);
/// assert_eq!(bv.num_ones(), 2);
///
/// assert_eq!(bv.rank1(1)?, 1);
/// assert_eq!(bv.select1(1)?, 3);
/// assert_eq!(bv.select0(0)?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SparseBitVector {
    len: usize,
    bucket_ranks: Vec<usize>,
    offsets: Vec<u8>,
}

impl SparseBitVector {
    /// Creates a new vector from a byte buffer and an explicit bit length.
    ///
    /// Logical bit `i` is bit `i % 8` counted from the least-significant bit
    /// of byte `i / 8`. The buffer is scanned once to enumerate set-bit
    /// positions; the buffer itself is not retained.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `len > bytes.len() * 8`.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self> {
        let data = BitVectorData::from_bytes(bytes, len)?;
        Ok(Self::from_data(&data))
    }

    /// Creates a new vector from input bit stream `bits`.
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut positions = vec![];
        let mut len = 0;
        for bit in bits {
            if bit {
                positions.push(len);
            }
            len += 1;
        }
        Self::from_sorted_positions(&positions, len)
    }

    /// Creates a new vector directly from a strictly increasing sequence of
    /// set-bit positions, without materializing a byte buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if a position is not castable to `usize`,
    /// not strictly increasing, or not less than `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranksel::bit_vectors::{Select, SparseBitVector};
    ///
    /// let bv = SparseBitVector::from_positions(&[0u32, 80, 160, 240], 264).unwrap();
    /// assert_eq!(bv.select1(1), Ok(80));
    /// assert_eq!(bv.select1(2), Ok(160));
    /// ```
    pub fn from_positions<T: ToPrimitive>(positions: &[T], len: usize) -> Result<Self> {
        let mut converted = Vec::with_capacity(positions.len());
        for p in positions {
            let pos = p
                .to_usize()
                .ok_or_else(|| Error::invalid_length("positions must be castable to usize"))?;
            if pos >= len {
                return Err(Error::invalid_length(format!(
                    "position {pos} is not less than bit length {len}"
                )));
            }
            if converted.last().is_some_and(|&prev| prev >= pos) {
                return Err(Error::invalid_length(
                    "positions must be strictly increasing",
                ));
            }
            converted.push(pos);
        }
        Ok(Self::from_sorted_positions(&converted, len))
    }

    /// Enumerates set positions word by word through LSB isolation.
    fn from_data(data: &BitVectorData) -> Self {
        let mut positions = vec![];
        for (wpos, &word) in data.words().iter().enumerate() {
            let mut cur_pos = wpos * WORD_LEN;
            let mut cur_word = word;
            while let Some(l) = broadword::lsb(cur_word) {
                cur_pos += l;
                cur_word >>= l;
                positions.push(cur_pos);
                cur_word >>= 1;
                cur_pos += 1;
            }
        }
        Self::from_sorted_positions(&positions, data.len())
    }

    fn from_sorted_positions(positions: &[usize], len: usize) -> Self {
        let num_buckets = len.div_ceil(BUCKET_LEN);
        let mut bucket_ranks = vec![0usize; num_buckets + 1];
        let mut offsets = Vec::with_capacity(positions.len());
        for &pos in positions {
            bucket_ranks[(pos >> BUCKET_SHIFT) + 1] += 1;
            offsets.push((pos & BUCKET_MASK) as u8);
        }
        for b in 1..bucket_ranks.len() {
            bucket_ranks[b] += bucket_ranks[b - 1];
        }
        Self {
            len,
            bucket_ranks,
            offsets,
        }
    }

    /// Returns the number of bits stored.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the vector is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    fn num_buckets(&self) -> usize {
        self.bucket_ranks.len() - 1
    }

    /// Offsets of the set bits inside bucket `b`, strictly increasing.
    #[inline(always)]
    fn bucket_offsets(&self, b: usize) -> &[u8] {
        &self.offsets[self.bucket_ranks[b]..self.bucket_ranks[b + 1]]
    }

    /// The number of zeros before bucket `b`, clamped at the vector length
    /// for the final partial bucket.
    #[inline(always)]
    fn bucket_rank0(&self, b: usize) -> usize {
        (b << BUCKET_SHIFT).min(self.len) - self.bucket_ranks[b]
    }
}

impl NumBits for SparseBitVector {
    /// Returns the number of bits stored (just wrapping [`Self::len()`]).
    #[inline(always)]
    fn num_bits(&self) -> usize {
        self.len
    }

    /// Returns the number of bits set.
    #[inline(always)]
    fn num_ones(&self) -> usize {
        self.offsets.len()
    }
}

impl Access for SparseBitVector {
    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    fn access(&self, pos: usize) -> Option<bool> {
        if pos < self.len {
            let low = (pos & BUCKET_MASK) as u8;
            Some(self.bucket_offsets(pos >> BUCKET_SHIFT).binary_search(&low).is_ok())
        } else {
            None
        }
    }
}

impl Rank for SparseBitVector {
    /// Returns the number of ones from the 0-th bit to the `pos-1`-th bit.
    ///
    /// Locates the bucket by direct index, then binary-searches the
    /// bucket's offset slice for positions below `pos`.
    ///
    /// # Complexity
    ///
    /// Logarithmic in the bucket occupancy
    ///
    /// # Examples
    ///
    /// ```
    /// use ranksel::bit_vectors::{Rank, SparseBitVector};
    ///
    /// let bv = SparseBitVector::from_bits([true, false, false, true]);
    ///
    /// assert_eq!(bv.rank1(1), Ok(1));
    /// assert_eq!(bv.rank1(4), Ok(2));
    /// assert!(bv.rank1(5).is_err());
    /// ```
    fn rank1(&self, pos: usize) -> Result<usize> {
        if self.len < pos {
            return Err(Error::out_of_range(format!(
                "rank position {pos} exceeds bit length {}",
                self.len
            )));
        }
        if pos == self.len {
            return Ok(self.num_ones());
        }
        let bucket = pos >> BUCKET_SHIFT;
        let low = (pos & BUCKET_MASK) as u8;
        let in_bucket = self.bucket_offsets(bucket).partition_point(|&o| o < low);
        Ok(self.bucket_ranks[bucket] + in_bucket)
    }

    /// Returns the number of zeros from the 0-th bit to the `pos-1`-th bit.
    fn rank0(&self, pos: usize) -> Result<usize> {
        Ok(pos - self.rank1(pos)?)
    }
}

impl Select for SparseBitVector {
    /// Searches the position of the `k`-th bit set.
    ///
    /// Binary-searches the cumulative bucket counts for the bucket holding
    /// the `k`-th one, then indexes directly into the flat offset array.
    ///
    /// # Complexity
    ///
    /// Logarithmic in the number of buckets
    ///
    /// # Examples
    ///
    /// ```
    /// use ranksel::bit_vectors::{Select, SparseBitVector};
    ///
    /// let bv = SparseBitVector::from_bits([true, false, false, true]);
    ///
    /// assert_eq!(bv.select1(0), Ok(0));
    /// assert_eq!(bv.select1(1), Ok(3));
    /// assert!(bv.select1(2).is_err());
    /// ```
    fn select1(&self, k: usize) -> Result<usize> {
        if self.num_ones() <= k {
            return Err(Error::out_of_range(format!(
                "select1 rank {k} meets or exceeds the number of ones {}",
                self.num_ones()
            )));
        }
        let bucket = self.bucket_ranks.partition_point(|&r| r <= k) - 1;
        Ok((bucket << BUCKET_SHIFT) + self.offsets[k] as usize)
    }

    /// Searches the position of the `k`-th bit unset.
    ///
    /// Zeros are not stored explicitly, so the bucket is located through
    /// the derived zero counts and the final position is found by walking
    /// the clear-bit runs between consecutive stored positions.
    ///
    /// # Complexity
    ///
    /// Logarithmic in the number of buckets plus the bucket occupancy
    fn select0(&self, k: usize) -> Result<usize> {
        let num_zeros = self.len - self.num_ones();
        if num_zeros <= k {
            return Err(Error::out_of_range(format!(
                "select0 rank {k} meets or exceeds the number of zeros {num_zeros}"
            )));
        }

        let bucket = {
            let (mut a, mut b) = (0, self.num_buckets());
            while b - a > 1 {
                let mid = a + (b - a) / 2;
                if self.bucket_rank0(mid) <= k {
                    a = mid;
                } else {
                    b = mid;
                }
            }
            a
        };

        let bucket_start = bucket << BUCKET_SHIFT;
        let mut remaining = k - self.bucket_rank0(bucket);
        let mut next_zero = bucket_start;
        for &o in self.bucket_offsets(bucket) {
            let one_pos = bucket_start + o as usize;
            let run = one_pos - next_zero;
            if remaining < run {
                return Ok(next_zero + remaining);
            }
            remaining -= run;
            next_zero = one_pos + 1;
        }
        Ok(next_zero + remaining)
    }
}

/// Streaming builder for [`SparseBitVector`].
#[derive(Debug, Default, Clone)]
pub struct SparseBitVectorBuilder {
    len: usize,
    positions: Vec<usize>,
}

impl SparseBitVectorBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if bit {
            self.positions.push(self.len);
        }
        self.len += 1;
    }
}

impl Builder for SparseBitVectorBuilder {
    type Item = bool;
    type Build = SparseBitVector;

    fn push(&mut self, item: Self::Item) -> Result<()> {
        self.push_bit(item);
        Ok(())
    }

    fn build(self) -> Self::Build {
        SparseBitVector::from_sorted_positions(&self.positions, self.len)
    }
}

impl Build for SparseBitVector {
    type Builder = SparseBitVectorBuilder;

    fn builder() -> Self::Builder {
        SparseBitVectorBuilder::new()
    }
}
