use std::fmt;

/// Error type for token verification.
///
/// The same taxonomy covers every signed token family. Verification failures
/// are deterministic given their inputs and are never retried — the correct
/// client action is re-authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Token does not split into exactly payload and signature segments.
    InvalidFormat,

    /// Payload segment is not valid base64url.
    InvalidEncoding,

    /// Payload bytes are not a valid JSON object.
    InvalidPayload,

    /// Signature does not match the payload under the configured secret.
    InvalidSignature,

    /// Expiry claim absent, non-numeric, or in the past.
    Expired,

    /// Required claims are absent or malformed.
    MissingFields,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::InvalidFormat => write!(f, "invalid token format"),
            TokenError::InvalidEncoding => write!(f, "invalid token encoding"),
            TokenError::InvalidPayload => write!(f, "invalid token payload"),
            TokenError::InvalidSignature => write!(f, "invalid token signature"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::MissingFields => write!(f, "token missing required fields"),
        }
    }
}

impl std::error::Error for TokenError {}
