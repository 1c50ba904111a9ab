//! Error type

use thiserror::Error;

/// Key exchange errors.
///
/// Framing and authentication failures are fatal to the exchange attempt:
/// callers should abort the session rather than retry or fall back to an
/// unauthenticated exchange.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Curve arithmetic failed, e.g. a coordinate was read from the point
    /// at infinity.
    #[error(transparent)]
    Curve(#[from] ecgroup::Error),

    /// The framing of an ECDH public key was inconsistent with its length.
    #[error("malformed ECDH public key")]
    MalformedPublicKey,

    /// The remote public key does not lie on the configured curve.
    #[error("ECDH public key is not on the curve")]
    PointNotOnCurve,

    /// Authenticated message shorter than its 4-byte header.
    #[error("authenticated message truncated")]
    TruncatedMessage,

    /// Authenticated message length disagrees with its header.
    #[error("authenticated message part lengths did not match")]
    LengthMismatch,

    /// A message part is too long for its 16-bit length field.
    #[error("message part of {0} bytes exceeds the 65535 byte frame limit")]
    FrameOverflow(usize),

    /// The supplied key material is not an RSA key.
    #[error("only RSA identity keys are supported")]
    UnsupportedKeyType,

    /// The identity certificate could not be parsed as X.509.
    #[error("malformed X.509 identity certificate")]
    InvalidCertificate,

    /// No key material was supplied.
    #[error("identity key cannot be empty")]
    MissingKey,

    /// The remote proof of identity did not verify.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// PBKDF2 needs at least one iteration.
    #[error("iteration count must be at least 1")]
    InvalidIterationCount,

    /// PBKDF2 salt below the minimum length.
    #[error("salt must be at least {min} bytes, got {len}")]
    SaltTooShort {
        /// Supplied salt length
        len: usize,

        /// Minimum accepted salt length
        min: usize,
    },

    /// RSA operation failed for a reason other than verification.
    #[error("RSA error: {0}")]
    Rsa(String),
}

impl Error {
    /// Was this a coordinate read on the point at infinity?
    pub fn is_invalid_point_access(&self) -> bool {
        matches!(self, Self::Curve(ecgroup::Error::InvalidPointAccess))
    }
}

/// Result type with the `ecdhe` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
