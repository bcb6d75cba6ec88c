use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a token. Raw tokens are never persisted.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 32 random bytes, hex-encoded, for single-use links such as password resets.
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
