//! Block-partitioned rank index for [`DenseBitVector`](crate::bit_vectors::DenseBitVector).

use crate::bit_vectors::data::{BitVectorData, WORD_LEN};
use crate::broadword;
use crate::error::{Error, Result};

/// The number of words per block.
const BLOCK_LEN: usize = 8;
/// The number of bits per block.
const BLOCK_BITS: usize = BLOCK_LEN * WORD_LEN;

/// Cumulative popcount index over fixed 512-bit blocks, separated from the
/// bit vector data it was built from.
///
/// `block_ranks[k]` holds the number of ones before block `k`, i.e. the rank
/// of bit position `k * 512`; the final entry holds the total number of
/// ones. The sequence is monotone non-decreasing and immutable after
/// construction.
///
/// Queries take the [`BitVectorData`] used in construction; rank resolves in
/// constant time, select in time logarithmic in the number of blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankIndex {
    block_ranks: Vec<usize>,
}

impl RankIndex {
    /// Builds the index by prefix-summing per-block popcounts in one pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranksel::bit_vectors::{BitVectorData, RankIndex};
    ///
    /// let data = BitVectorData::from_bits([true, false, false, true]);
    /// let idx = RankIndex::new(&data);
    ///
    /// assert_eq!(idx.rank1(&data, 1), Ok(1));
    /// assert_eq!(idx.rank1(&data, 4), Ok(2));
    /// assert!(idx.rank1(&data, 5).is_err());
    /// ```
    pub fn new(data: &BitVectorData) -> Self {
        let num_blocks = data.num_words().div_ceil(BLOCK_LEN);
        let mut block_ranks = Vec::with_capacity(num_blocks + 1);
        block_ranks.push(0);

        let mut next_rank = 0;
        for (i, &word) in data.words().iter().enumerate() {
            next_rank += broadword::popcount(word);
            if (i + 1) % BLOCK_LEN == 0 {
                block_ranks.push(next_rank);
            }
        }
        if data.num_words() % BLOCK_LEN != 0 {
            block_ranks.push(next_rank);
        }

        Self { block_ranks }
    }

    /// Gets the number of bits set.
    #[inline(always)]
    pub fn num_ones(&self) -> usize {
        self.block_ranks[self.block_ranks.len() - 1]
    }

    #[inline(always)]
    fn num_blocks(&self) -> usize {
        self.block_ranks.len() - 1
    }

    #[inline(always)]
    fn block_rank(&self, block: usize) -> usize {
        self.block_ranks[block]
    }

    #[inline(always)]
    fn block_rank0(&self, block: usize) -> usize {
        block * BLOCK_BITS - self.block_rank(block)
    }

    /// Returns the number of ones from the 0-th bit to the `pos-1`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `data.len() < pos`.
    ///
    /// # Safety
    ///
    /// `data` must be the one used in construction.
    pub fn rank1(&self, data: &BitVectorData, pos: usize) -> Result<usize> {
        if data.len() < pos {
            return Err(Error::out_of_range(format!(
                "rank position {pos} exceeds bit length {}",
                data.len()
            )));
        }
        if pos == data.len() {
            return Ok(self.num_ones());
        }
        let (wpos, left) = (pos / WORD_LEN, pos % WORD_LEN);
        let block = wpos / BLOCK_LEN;
        let mut r = self.block_rank(block);
        for &word in &data.words()[block * BLOCK_LEN..wpos] {
            r += broadword::popcount(word);
        }
        if left != 0 {
            r += broadword::popcount(data.words()[wpos] << (WORD_LEN - left));
        }
        Ok(r)
    }

    /// Returns the number of zeros from the 0-th bit to the `pos-1`-th bit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `data.len() < pos`.
    pub fn rank0(&self, data: &BitVectorData, pos: usize) -> Result<usize> {
        Ok(pos - self.rank1(data, pos)?)
    }

    /// Searches the position of the `k`-th bit set.
    ///
    /// Binary-searches `block_ranks` for the block holding the `k`-th one,
    /// then scans at most eight words inside it.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `self.num_ones() <= k`.
    ///
    /// # Safety
    ///
    /// `data` must be the one used in construction.
    pub fn select1(&self, data: &BitVectorData, k: usize) -> Result<usize> {
        if self.num_ones() <= k {
            return Err(Error::out_of_range(format!(
                "select1 rank {k} meets or exceeds the number of ones {}",
                self.num_ones()
            )));
        }

        let block = {
            let (mut a, mut b) = (0, self.num_blocks());
            while b - a > 1 {
                let mid = a + (b - a) / 2;
                if self.block_rank(mid) <= k {
                    a = mid;
                } else {
                    b = mid;
                }
            }
            a
        };

        let mut wpos = block * BLOCK_LEN;
        let mut cur_rank = self.block_rank(block);
        loop {
            let cnt = broadword::popcount(data.words()[wpos]);
            if k < cur_rank + cnt {
                break;
            }
            wpos += 1;
            cur_rank += cnt;
        }
        Ok(wpos * WORD_LEN + broadword::select_in_word(data.words()[wpos], k - cur_rank).unwrap())
    }

    /// Searches the position of the `k`-th bit unset.
    ///
    /// Symmetric to [`Self::select1`] using the zero-complement count
    /// `block * 512 - block_ranks[block]`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `data.len() - self.num_ones() <= k`.
    ///
    /// # Safety
    ///
    /// `data` must be the one used in construction.
    pub fn select0(&self, data: &BitVectorData, k: usize) -> Result<usize> {
        let num_zeros = data.len() - self.num_ones();
        if num_zeros <= k {
            return Err(Error::out_of_range(format!(
                "select0 rank {k} meets or exceeds the number of zeros {num_zeros}"
            )));
        }

        let block = {
            let (mut a, mut b) = (0, self.num_blocks());
            while b - a > 1 {
                let mid = a + (b - a) / 2;
                if self.block_rank0(mid) <= k {
                    a = mid;
                } else {
                    b = mid;
                }
            }
            a
        };

        // Complemented words expose the padding past `len` as ones, but a
        // valid `k` always resolves at a position below `len` first.
        let mut wpos = block * BLOCK_LEN;
        let mut cur_rank = self.block_rank0(block);
        loop {
            let cnt = broadword::popcount(!data.words()[wpos]);
            if k < cur_rank + cnt {
                break;
            }
            wpos += 1;
            cur_rank += cnt;
        }
        Ok(wpos * WORD_LEN + broadword::select0_in_word(data.words()[wpos], k - cur_rank).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_rank1(data: &BitVectorData, pos: usize) -> usize {
        use crate::bit_vectors::Access;
        (0..pos).filter(|&i| data.access(i) == Some(true)).count()
    }

    #[test]
    fn test_block_ranks_invariant() {
        // 1000 bits spanning two 512-bit blocks, every third bit set.
        let data = BitVectorData::from_bits((0..1000).map(|i| i % 3 == 0));
        let idx = RankIndex::new(&data);
        assert_eq!(idx.num_blocks(), 2);
        for block in 0..=idx.num_blocks() {
            let boundary = (block * BLOCK_BITS).min(data.len());
            assert_eq!(idx.block_rank(block), naive_rank1(&data, boundary));
        }
    }

    #[test]
    fn test_rank_across_blocks() {
        let data = BitVectorData::from_bits((0..1500).map(|i| i % 7 == 0));
        let idx = RankIndex::new(&data);
        for pos in (0..=1500).step_by(11) {
            assert_eq!(idx.rank1(&data, pos), Ok(naive_rank1(&data, pos)));
        }
        assert!(idx.rank1(&data, 1501).is_err());
    }

    #[test]
    fn test_select_across_blocks() {
        let data = BitVectorData::from_bits((0..1500).map(|i| i % 7 == 0));
        let idx = RankIndex::new(&data);
        let num_ones = idx.num_ones();
        for k in 0..num_ones {
            assert_eq!(idx.select1(&data, k), Ok(k * 7));
        }
        assert!(idx.select1(&data, num_ones).is_err());

        let num_zeros = data.len() - num_ones;
        for k in (0..num_zeros).step_by(13) {
            let pos = idx.select0(&data, k).unwrap();
            assert_eq!(idx.rank0(&data, pos), Ok(k));
        }
        assert!(idx.select0(&data, num_zeros).is_err());
    }

    #[test]
    fn test_empty_data() {
        let data = BitVectorData::from_bytes(&[], 0).unwrap();
        let idx = RankIndex::new(&data);
        assert_eq!(idx.num_ones(), 0);
        assert_eq!(idx.rank1(&data, 0), Ok(0));
        assert!(idx.rank1(&data, 1).is_err());
        assert!(idx.select1(&data, 0).is_err());
        assert!(idx.select0(&data, 0).is_err());
    }
}
