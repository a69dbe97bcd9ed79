use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::{OsRng, RngCore};

use crate::error::CryptoError;
use crate::keys::KEY_LEN;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size; also the IV length.
pub const IV_LEN: usize = 16;

/// One encrypted value at rest: ciphertext plus the IV it was produced with.
/// Only meaningful together with the single process-wide key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedField {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
}

impl EncryptedField {
    /// Hex halves in storage order: (encrypted data, iv).
    pub fn to_hex(&self) -> (String, String) {
        (hex::encode(&self.ciphertext), hex::encode(&self.iv))
    }

    pub fn from_hex(data: &str, iv: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            ciphertext: hex::decode(data)?,
            iv: hex::decode(iv)?,
        })
    }
}

/// Stateless encrypt/decrypt primitive holding the process-wide key.
/// Constructed once at startup from configuration and shared read-only
/// across concurrent requests.
#[derive(Clone)]
pub struct CipherBox {
    key: [u8; KEY_LEN],
}

impl CipherBox {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext under a fresh random IV. Calling twice with the
    /// same plaintext yields different ciphertext/iv pairs.
    pub fn encrypt(&self, plaintext: &[u8]) -> EncryptedField {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        EncryptedField {
            ciphertext,
            iv: iv.to_vec(),
        }
    }

    /// Decrypt a stored field. Fails on a wrong-length IV, a ciphertext that
    /// is not a positive multiple of the block size, or bad padding after
    /// decryption. Never panics on corrupt input.
    pub fn decrypt(&self, field: &EncryptedField) -> Result<Vec<u8>, CryptoError> {
        let iv: [u8; IV_LEN] =
            field
                .iv
                .as_slice()
                .try_into()
                .map_err(|_| CryptoError::InvalidIvLength {
                    expected: IV_LEN,
                    got: field.iv.len(),
                })?;

        if field.ciphertext.is_empty() || field.ciphertext.len() % IV_LEN != 0 {
            return Err(CryptoError::CiphertextLength(field.ciphertext.len()));
        }

        Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&field.ciphertext)
            .map_err(|_| CryptoError::Padding)
    }
}
