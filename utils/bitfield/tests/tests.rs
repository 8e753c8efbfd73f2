use bitfield::{Bitlist, Bitvector, Bitvector1024, Bitvector128, Bitvector16, Bitvector4, Error};
use bitfield::typenum::Unsigned;

mod bitlist {
    use super::*;

    #[test]
    fn len_of_new_matches_declared_size() {
        for n in 0..=300 {
            assert_eq!(Bitlist::new(n).len(), n);
        }
    }

    #[test]
    fn length_bit_position_is_a_function_of_length() {
        for n in 0..=64 {
            let mut b = Bitlist::new(n);
            for i in (0..n).step_by(2) {
                b.set_bit_at(i, true);
            }

            let wire = b.clone().into_raw_bytes();
            let decoded = Bitlist::from_bytes(wire).unwrap();
            assert_eq!(decoded.len(), n);
            assert_eq!(decoded, b);

            // the canonical form carries the data bits only
            let canonical = b.bytes();
            assert!(canonical.len() <= b.as_slice().len());
            let ones: usize = canonical.iter().map(|byte| byte.count_ones() as usize).sum();
            assert_eq!(ones, b.count());
        }
    }

    #[test]
    fn count_matches_bit_at() {
        let mut b = Bitlist::new(100);
        for i in [0, 7, 8, 9, 63, 64, 99, 100, 150].iter() {
            b.set_bit_at(*i, true);
        }

        assert_eq!(b.count(), 7);
        assert_eq!(b.count(), (0..b.len()).filter(|i| b.bit_at(*i)).count());
        assert_eq!(b.bit_indices(), vec![0, 7, 8, 9, 63, 64, 99]);
    }

    #[test]
    fn bytes_of_length_bit_only_is_empty() {
        for n in 0..40 {
            assert!(Bitlist::new(n).bytes().is_empty());
        }
    }

    #[test]
    fn union_of_signers() {
        let mut a = Bitlist::new(12);
        a.set_bit_at(1, true);
        a.set_bit_at(11, true);
        let mut b = Bitlist::new(12);
        b.set_bit_at(2, true);

        let union = a.or(&b).unwrap();
        assert_eq!(union.bit_indices(), vec![1, 2, 11]);
        assert_eq!(union.contains(&a), Ok(true));
        assert_eq!(union.contains(&b), Ok(true));
        assert_eq!(a.overlaps(&b), Ok(false));
        assert_eq!(union.overlaps(&b), Ok(true));
    }
}

mod bitvector {
    use super::*;

    #[test]
    fn new_bitvector16() {
        let b = Bitvector16::new();
        assert_eq!(b.len(), 16);
        assert_eq!(b.as_slice(), &[0x00, 0x00]);
    }

    #[test]
    fn bit_at() {
        let b = Bitvector16::from_raw_bytes(vec![0x0E, 0x00]);
        assert!(b.bit_at(3));
        assert!(!b.bit_at(4));
    }

    #[test]
    fn shift() {
        let mut b = Bitvector16::from_raw_bytes(vec![0x01, 0x23]);
        b.shift(-1);
        assert_eq!(b.as_slice(), &[0x00, 0x91]);

        let mut b = Bitvector16::from_raw_bytes(vec![0x01, 0x23]);
        b.shift(1);
        assert_eq!(b.as_slice(), &[0x02, 0x46]);
    }

    #[test]
    fn contains_is_bytewise() {
        let a = Bitvector16::from_raw_bytes(vec![0xFF, 0x85]);
        let b = Bitvector16::from_raw_bytes(vec![0x13, 0x8F]);

        // `a` has more bits set than `b` but does not contain it
        assert!(a.count() > b.count());
        assert_eq!(a.contains(&b), Ok(false));

        let c = Bitvector16::from_raw_bytes(vec![0xFF, 0x8F]);
        assert_eq!(c.contains(&b), Ok(true));
    }

    #[test]
    fn mismatched_lengths_fail() {
        let a = Bitvector16::new();
        let b = Bitvector16::from_raw_bytes(vec![0x00, 0x00, 0x00]);
        let err = Error::LengthMismatch { left: 2, right: 3 };

        assert_eq!(a.contains(&b), Err(err.clone()));
        assert_eq!(a.overlaps(&b), Err(err.clone()));
        assert_eq!(a.or(&b), Err(err));
    }

    #[test]
    fn bytes_never_exceed_declared_width() {
        let b = Bitvector16::from_raw_bytes(vec![0x12, 0x34, 0xF1, 0x00]);
        assert_eq!(b.bytes(), vec![0x12, 0x34]);
    }

    fn check_width<N: Unsigned + Clone>() {
        let mut b = Bitvector::<N>::new();
        let width = N::to_usize();
        assert_eq!(b.len(), width);
        assert_eq!(b.as_slice().len(), (width + 7) / 8);

        for i in 0..width + 8 {
            b.set_bit_at(i, true);
        }
        assert_eq!(b.count(), width);
        assert_eq!(b.bit_indices(), (0..width).collect::<Vec<_>>());
        assert!(Bitvector::<N>::from_bytes(b.bytes()).is_ok());

        b.shift(-1);
        assert_eq!(b.count(), width - 1);
    }

    #[test]
    fn every_width_shares_the_contract() {
        check_width::<bitfield::typenum::U4>();
        check_width::<bitfield::typenum::U16>();
        check_width::<bitfield::typenum::U64>();
        check_width::<bitfield::typenum::U128>();
        check_width::<bitfield::typenum::U512>();
        check_width::<bitfield::typenum::U1024>();

        assert_eq!(Bitvector4::new().len(), 4);
        assert_eq!(Bitvector128::new().as_slice().len(), 16);
        assert_eq!(Bitvector1024::new().as_slice().len(), 128);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn bitlist_round_trip() {
        let mut b = Bitlist::new(10);
        b.set_bit_at(9, true);

        let yaml = serde_yaml::to_string(&b).unwrap();
        let decoded: Bitlist = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(decoded, b);
        assert_eq!(decoded.len(), 10);
    }

    #[test]
    fn bitvector_round_trip() {
        let b = Bitvector16::from_raw_bytes(vec![0x12, 0x34]);

        let yaml = serde_yaml::to_string(&b).unwrap();
        let decoded: Bitvector16 = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(decoded, b);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(serde_yaml::from_str::<Bitlist>("[1, 0]").is_err());
        assert!(serde_yaml::from_str::<Bitvector16>("[1]").is_err());
        assert!(serde_yaml::from_str::<Bitvector4>("[255]").is_err());
        assert!(serde_yaml::from_str::<Bitvector4>("[15]").is_ok());
    }
}
