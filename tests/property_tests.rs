use proptest::prelude::*;
use ranksel::bit_vectors::prelude::*;
use ranksel::{DenseBitVector, Error, SparseBitVector};

fn bit_at(bytes: &[u8], i: usize) -> bool {
    (bytes[i / 8] >> (i % 8)) & 1 == 1
}

proptest! {
    #[test]
    fn test_dense_rank_select_property(
        bytes in prop::collection::vec(any::<u8>(), 1..64),
        len_cut in 0..8usize,
    ) {
        let len = (bytes.len() * 8).saturating_sub(len_cut);
        let bv = DenseBitVector::from_bytes(&bytes, len).unwrap();

        // Rank against a running count, select round-trips for every bit.
        let mut ones = 0;
        for i in 0..len {
            prop_assert_eq!(bv.rank1(i), Ok(ones));
            prop_assert_eq!(bv.rank0(i), Ok(i - ones));
            if bit_at(&bytes, i) {
                prop_assert_eq!(bv.select1(ones), Ok(i));
                ones += 1;
            } else {
                prop_assert_eq!(bv.select0(i - ones), Ok(i));
            }
        }
        prop_assert_eq!(bv.rank1(len), Ok(ones));
        prop_assert_eq!(bv.num_ones(), ones);
        prop_assert!(bv.rank1(len + 1).is_err());
        prop_assert!(bv.select1(ones).is_err());
        prop_assert!(bv.select0(len - ones).is_err());
    }

    #[test]
    fn test_cross_engine_equivalence(
        bytes in prop::collection::vec(any::<u8>(), 0..80),
        len_cut in 0..16usize,
    ) {
        let len = (bytes.len() * 8).saturating_sub(len_cut);
        let dense = DenseBitVector::from_bytes(&bytes, len).unwrap();
        let sparse = SparseBitVector::from_bytes(&bytes, len).unwrap();

        prop_assert_eq!(dense.num_bits(), sparse.num_bits());
        prop_assert_eq!(dense.num_ones(), sparse.num_ones());
        prop_assert_eq!(dense.num_zeros(), sparse.num_zeros());

        // Valid and invalid queries must agree in value and classification.
        for i in 0..=(len + 2) {
            prop_assert_eq!(dense.rank1(i), sparse.rank1(i));
            prop_assert_eq!(dense.rank0(i), sparse.rank0(i));
            prop_assert_eq!(dense.access(i), sparse.access(i));
        }
        for k in 0..=(dense.num_ones() + 2) {
            prop_assert_eq!(dense.select1(k), sparse.select1(k));
        }
        for k in 0..=(dense.num_zeros() + 2) {
            prop_assert_eq!(dense.select0(k), sparse.select0(k));
        }
    }

    #[test]
    fn test_rank_is_monotone_with_unit_steps(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        let len = bytes.len() * 8;
        let bv = DenseBitVector::from_bytes(&bytes, len).unwrap();
        for i in 0..len {
            let step = bv.rank1(i + 1).unwrap() - bv.rank1(i).unwrap();
            prop_assert!(step <= 1);
            prop_assert_eq!(step == 1, bv.access(i).unwrap());
        }
    }

    #[test]
    fn test_select_is_strictly_increasing(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        let len = bytes.len() * 8;
        let sparse = SparseBitVector::from_bytes(&bytes, len).unwrap();
        let mut prev = None;
        for k in 0..sparse.num_ones() {
            let pos = sparse.select1(k).unwrap();
            prop_assert!(prev.is_none() || prev.unwrap() < pos);
            prop_assert_eq!(sparse.rank1(pos), Ok(k));
            prev = Some(pos);
        }
    }

    #[test]
    fn test_invalid_length_agrees(
        bytes in prop::collection::vec(any::<u8>(), 0..8),
        extra in 1..64usize,
    ) {
        let len = bytes.len() * 8 + extra;
        let dense = DenseBitVector::from_bytes(&bytes, len).unwrap_err();
        let sparse = SparseBitVector::from_bytes(&bytes, len).unwrap_err();
        prop_assert!(matches!(dense, Error::InvalidLength(_)));
        prop_assert!(matches!(sparse, Error::InvalidLength(_)));
    }

    #[test]
    fn test_streaming_builders_agree_with_bytes(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        let len = bytes.len() * 8;
        let bits = (0..len).map(|i| bit_at(&bytes, i));

        let dense = DenseBitVector::from_iter(bits.clone()).unwrap();
        prop_assert_eq!(&dense, &DenseBitVector::from_bytes(&bytes, len).unwrap());

        let sparse = SparseBitVector::from_iter(bits).unwrap();
        prop_assert_eq!(&sparse, &SparseBitVector::from_bytes(&bytes, len).unwrap());
    }
}

#[test]
fn test_trailing_buffer_bits_are_ignored() {
    // Same logical prefix, different garbage past the length.
    let a = DenseBitVector::from_bytes(&[0b0000_0101, 0x00], 3).unwrap();
    let b = DenseBitVector::from_bytes(&[0b1111_1101, 0xFF], 3).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.num_ones(), 2);
    assert_eq!(a.select0(0), Ok(1));
    assert!(a.select0(1).is_err());

    let a = SparseBitVector::from_bytes(&[0b0000_0101, 0x00], 3).unwrap();
    let b = SparseBitVector::from_bytes(&[0b1111_1101, 0xFF], 3).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.select0(0), Ok(1));
    assert!(a.select0(1).is_err());
}
