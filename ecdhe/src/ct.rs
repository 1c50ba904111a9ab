//! Constant-time byte comparison.

use subtle::{Choice, ConstantTimeEq};

/// Compare two byte slices in time independent of where they differ.
///
/// Slices of different length compare unequal immediately; lengths are not
/// secret. Equal-length slices are always scanned in full.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter()
        .zip(b)
        .fold(Choice::from(1), |acc, (x, y)| acc & x.ct_eq(y))
        .into()
}

#[cfg(test)]
mod tests {
    use super::ct_eq;
    use proptest::prelude::*;

    #[test]
    fn equal() {
        assert!(ct_eq(b"", b""));
        assert!(ct_eq(b"digest", b"digest"));
    }

    #[test]
    fn mismatch_at_any_position() {
        let a = [0x5au8; 32];
        for i in 0..a.len() {
            let mut b = a;
            b[i] ^= 0x01;
            assert!(!ct_eq(&a, &b), "mismatch at {i} not detected");
        }
    }

    #[test]
    fn length_mismatch() {
        assert!(!ct_eq(b"abc", b"ab"));
        assert!(!ct_eq(b"", b"a"));
    }

    proptest! {
        #[test]
        fn agrees_with_slice_eq(a in prop::collection::vec(any::<u8>(), 0..64),
                                b in prop::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(ct_eq(&a, &b), a == b);
            prop_assert!(ct_eq(&a, &a.clone()));
        }
    }
}
