//! XOR algebra over fixed-length byte sequences
//!
//! Key sums are combined with XOR, so adding and removing the same key are
//! the same operation on the byte level. Lengths must always agree: nothing
//! here truncates or pads.

use crate::error::IbfError;

/// XOR two byte sequences of equal length into a new vector.
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Result<Vec<u8>, IbfError> {
    if a.len() != b.len() {
        return Err(IbfError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// XOR `src` into `dst` in place.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn xor_assign(dst: &mut [u8], src: &[u8]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "Cannot XOR byte sequences of different lengths"
    );
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}

/// True if every byte is zero (an empty slice is all-zero).
pub fn is_all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// Byte-wise equality, including length.
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_bytes_combines_each_position() {
        let a = [0b1010_1010, 0xFF, 0x00];
        let b = [0b0101_0101, 0x0F, 0x00];

        let c = xor_bytes(&a, &b).expect("equal lengths");

        assert_eq!(c, vec![0xFF, 0xF0, 0x00]);
    }

    #[test]
    fn test_xor_bytes_rejects_length_mismatch() {
        let result = xor_bytes(&[1, 2, 3], &[1, 2]);

        assert!(matches!(
            result,
            Err(IbfError::LengthMismatch { left: 3, right: 2 })
        ));
    }

    #[test]
    fn test_xor_with_self_is_zero() {
        let key = b"0123456789abcdef0123456789abcdef";
        let mut acc = key.to_vec();

        xor_assign(&mut acc, key);

        assert!(is_all_zero(&acc));
    }

    #[test]
    #[should_panic(expected = "different lengths")]
    fn test_xor_assign_panics_on_length_mismatch() {
        let mut dst = vec![0u8; 4];
        xor_assign(&mut dst, &[1, 2, 3]);
    }

    #[test]
    fn test_is_all_zero() {
        assert!(is_all_zero(&[]));
        assert!(is_all_zero(&[0; 32]));
        assert!(!is_all_zero(&[0, 0, 1, 0]));
    }

    #[test]
    fn test_bytes_equal_checks_length_and_content() {
        assert!(bytes_equal(b"abc", b"abc"));
        assert!(!bytes_equal(b"abc", b"abd"));
        assert!(!bytes_equal(b"abc", b"abcd"));
    }
}
