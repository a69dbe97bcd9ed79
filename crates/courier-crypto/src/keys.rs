use rand_core::{OsRng, RngCore};

use crate::error::CryptoError;

/// AES-256 key size in bytes.
pub const KEY_LEN: usize = 32;

/// Generate a random 256-bit key, e.g. for provisioning a new deployment.
pub fn generate_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode a key to hex for storage in external configuration.
pub fn key_to_hex(key: &[u8; KEY_LEN]) -> String {
    hex::encode(key)
}

/// Decode a hex-encoded key as supplied via configuration.
pub fn key_from_hex(encoded: &str) -> Result<[u8; KEY_LEN], CryptoError> {
    let bytes = hex::decode(encoded.trim())?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            got,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let key = generate_key();
        assert_eq!(key_from_hex(&key_to_hex(&key)).unwrap(), key);
    }

    #[test]
    fn rejects_short_key() {
        let err = key_from_hex("deadbeef").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidKeyLength { expected: 32, got: 4 }
        ));
    }

    #[test]
    fn rejects_non_hex() {
        assert!(key_from_hex("not hex at all").is_err());
    }
}
