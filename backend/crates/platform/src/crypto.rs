//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a random URL-safe token carrying `entropy_bytes` bytes of entropy
///
/// Encoded as unpadded URL-safe base64, so it can go into cookies and query
/// strings without escaping.
pub fn random_token(entropy_bytes: usize) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes(entropy_bytes))
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
