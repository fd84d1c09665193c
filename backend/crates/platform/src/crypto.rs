//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// Length of signing secrets in bytes
pub const SECRET_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("Secret is not valid base64")]
    InvalidEncoding,

    #[error("Secret must be {expected} bytes (got {actual})")]
    InvalidLength { expected: usize, actual: usize },
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a fresh signing secret
pub fn random_secret() -> [u8; SECRET_LEN] {
    let mut secret = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Decode a base64 signing secret of exactly [`SECRET_LEN`] bytes
pub fn decode_secret(encoded: &str) -> Result<[u8; SECRET_LEN], SecretError> {
    let bytes = from_base64(encoded.trim()).map_err(|_| SecretError::InvalidEncoding)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| SecretError::InvalidLength {
            expected: SECRET_LEN,
            actual,
        })
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_secret_differs() {
        assert_ne!(random_secret(), random_secret());
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        let encoded = to_base64(data);
        let decoded = from_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_decode_secret() {
        let secret = [7u8; SECRET_LEN];
        let encoded = to_base64(&secret);
        assert_eq!(decode_secret(&encoded), Ok(secret));
        assert_eq!(decode_secret(&format!(" {encoded}\n")), Ok(secret));
    }

    #[test]
    fn test_decode_secret_rejects_bad_input() {
        assert_eq!(
            decode_secret("***"),
            Err(SecretError::InvalidEncoding)
        );
        assert_eq!(
            decode_secret(&to_base64(&[1u8; 16])),
            Err(SecretError::InvalidLength {
                expected: SECRET_LEN,
                actual: 16
            })
        );
    }
}
