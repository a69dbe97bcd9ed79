/// Courier Crypto Library
///
/// Symmetric at-rest encryption for stored credentials and message bodies:
/// AES-256-CBC with PKCS#7 padding and a fresh random IV per call, under a
/// single process-wide key. CBC with a per-call IV keeps repeated plaintexts
/// (common passwords, repeated messages) from producing repeated ciphertexts.
pub mod cipher;
pub mod error;
pub mod keys;

pub use cipher::{CipherBox, EncryptedField};
pub use error::CryptoError;
