//! Opaque random tokens: share links and session handles.
//!
//! The share-link family is the simpler, revocable counterpart to the signed
//! capability token: a random opaque value whose SHA-256 digest is stored on
//! the employee row. It carries no expiry and is invalidated only by
//! overwriting the stored digest. Only the digest ever touches the database,
//! so a leaked backup cannot be replayed as a link.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Byte length of random tokens (hex-encoded to twice this many characters).
const TOKEN_BYTES: usize = 32;

/// Generate a random 32-byte token, hex encoded.
///
/// Also used for employee session handles.
pub fn random_token_hex() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 digest of a share-link token, hex encoded, as stored on the
/// employee row.
pub fn hash_share_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Generate a fresh share-link token and its storable digest.
pub fn generate_share_token() -> (String, String) {
    let token = random_token_hex();
    let digest = hash_share_token(&token);
    (token, digest)
}
