//! Content fingerprints.
//!
//! A fingerprint is the SHA-256 of the in-order key sequence, each key
//! encoded big-endian. Two trees holding the same multiset of keys have the
//! same fingerprint regardless of their shape, which makes fingerprints
//! useful for comparing the outcome of concurrent runs against a serial
//! replay.

use sha2::{Digest, Sha256};

/// Keys that have a fixed byte encoding for fingerprinting.
pub trait FingerprintKey {
    fn feed(&self, hasher: &mut Sha256);
}

macro_rules! impl_fingerprint_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl FingerprintKey for $t {
                #[inline]
                fn feed(&self, hasher: &mut Sha256) {
                    hasher.update(self.to_be_bytes());
                }
            }
        )*
    };
}

impl_fingerprint_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize);

/// SHA-256 over the given keys, in iteration order
pub fn fingerprint<'a, K, I>(keys: I) -> [u8; 32]
where
    K: FingerprintKey + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut hasher = Sha256::new();
    for key in keys {
        key.feed(&mut hasher);
    }
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_empty() {
        let empty: [i64; 0] = [];
        assert_eq!(
            hex::encode(fingerprint(&empty)),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_order_sensitive() {
        assert_eq!(fingerprint(&[1i64, 2, 3]), fingerprint(&vec![1i64, 2, 3]));
        assert_ne!(fingerprint(&[1i64, 2, 3]), fingerprint(&[3i64, 2, 1]));
        assert_ne!(fingerprint(&[1i64, 2]), fingerprint(&[1i64, 2, 2]));
    }
}
