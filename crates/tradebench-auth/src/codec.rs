//! base64url and HMAC-SHA256 primitives shared by the signed token families.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Encode bytes as unpadded base64url.
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode an unpadded base64url segment.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::InvalidEncoding)
}

/// Sign an encoded payload segment, returning the base64url signature.
///
/// The MAC is computed over the *encoded* payload string, not the raw bytes,
/// so the signature covers exactly what travels on the wire.
pub fn sign(payload_b64: &str, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload_b64.as_bytes());
    encode_segment(&mac.finalize().into_bytes())
}

/// Verify a signature segment against an encoded payload.
///
/// Comparison is constant-time via `Mac::verify_slice`; ordinary equality
/// would leak a byte-by-byte timing oracle on the signature.
pub fn verify_signature(
    payload_b64: &str,
    signature_b64: &str,
    secret: &[u8],
) -> Result<(), TokenError> {
    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::InvalidSignature)?;

    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| TokenError::InvalidSignature)?;
    mac.update(payload_b64.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)
}
