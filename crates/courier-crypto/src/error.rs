use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key must be {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("iv must be {expected} bytes, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    CiphertextLength(usize),

    #[error("padding check failed")]
    Padding,

    #[error("invalid hex encoding")]
    Encoding(#[from] hex::FromHexError),
}
