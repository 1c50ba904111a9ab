//! Stretching raw shared secrets into symmetric keys with PBKDF2.
//!
//! The x-coordinate produced by ECDH is not uniformly distributed and must
//! not be used directly as a cipher key.

use crate::{Error, Result};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Minimum accepted salt length in bytes.
pub const MIN_SALT_LEN: usize = 8;

/// Pseudorandom function used by PBKDF2.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Prf {
    /// HMAC-SHA-1.
    #[default]
    HmacSha1,

    /// HMAC-SHA-256.
    HmacSha256,
}

/// Derive `len` bytes from `secret` with PBKDF2.
pub fn stretch(
    prf: Prf,
    secret: &[u8],
    salt: &[u8],
    iterations: u32,
    len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if iterations == 0 {
        return Err(Error::InvalidIterationCount);
    }

    if salt.len() < MIN_SALT_LEN {
        return Err(Error::SaltTooShort {
            len: salt.len(),
            min: MIN_SALT_LEN,
        });
    }

    let mut out = Zeroizing::new(vec![0u8; len]);
    match prf {
        Prf::HmacSha1 => pbkdf2_hmac::<Sha1>(secret, salt, iterations, &mut out),
        Prf::HmacSha256 => pbkdf2_hmac::<Sha256>(secret, salt, iterations, &mut out),
    }

    Ok(out)
}
