//! Elliptic Curve Diffie-Hellman (Ephemeral) Support.
//!
//! Public keys travel as `[xLen: u32 LE][x][y]`, where `x` and `y` are the
//! minimal big-endian encodings of the affine coordinates and the length of
//! `y` is whatever remains of the buffer. Private keys use the same integer
//! encoding.
//!
//! # Usage
//!
//! ```
//! use ecdhe::EcDiffieHellman;
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! // Alice
//! let alice = EcDiffieHellman::new(&mut OsRng)?;
//! let alice_public = alice.public_key()?;
//!
//! // Bob
//! let bob = EcDiffieHellman::new(&mut OsRng)?;
//! let bob_public = bob.public_key()?;
//!
//! // Both participants arrive on the same shared secret
//! let alice_shared = alice.shared_secret_raw(&bob_public)?;
//! let bob_shared = bob.shared_secret_raw(&alice_public)?;
//! assert_eq!(alice_shared, bob_shared);
//!
//! // Stretch the raw secret before using it as a key
//! let key = alice.shared_secret_stretched(&bob_public, 32, 10_000, "session salt")?;
//! assert_eq!(key.len(), 32);
//! # Ok::<(), ecdhe::Error>(())
//! ```

use crate::{
    Error, Result,
    kdf::{self, Prf},
};
use core::fmt;
use ecgroup::{CurveGroup, CurvePoint, Domain, EllipticCurve};
use rand_core::CryptoRngCore;
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// Size of the x-coordinate length prefix of an encoded public key.
const X_LEN_SIZE: usize = 4;

/// Ephemeral Diffie-Hellman key pair.
///
/// The private scalar is fixed at construction and the public point is
/// always derived from it.
pub struct EcDiffieHellman<'d, G: CurveGroup = EllipticCurve> {
    domain: &'d Domain<G>,
    secret: Zeroizing<Vec<u8>>,
    public: CurvePoint,
}

impl EcDiffieHellman<'static> {
    /// Generate a key pair on Curve25519.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        Self::with_domain(Domain::curve25519(), rng)
    }

    /// Generate a key pair on Curve25519 using the operating system's
    /// cryptographically secure random number generator.
    #[cfg(feature = "getrandom")]
    pub fn generate() -> Result<Self> {
        Self::new(&mut rand_core::OsRng)
    }
}

impl<'d, G: CurveGroup> EcDiffieHellman<'d, G> {
    /// Generate a key pair on the given domain.
    ///
    /// The private scalar has as many random bits as the generator's order
    /// and is not reduced modulo the order, so it may exceed it.
    pub fn with_domain<R: CryptoRngCore + ?Sized>(
        domain: &'d Domain<G>,
        rng: &mut R,
    ) -> Result<Self> {
        let bits = domain.scalar_bits();
        let len = bits.div_ceil(8) as usize;
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        rng.fill_bytes(&mut bytes);

        // drop the excess high bits of the leading byte
        if let Some(first) = bytes.first_mut() {
            *first &= 0xffu8 >> (len as u64 * 8 - bits);
        }

        trace!(bits, "generating ephemeral ECDH key pair");
        Self::from_private_key(domain, &bytes)
    }

    /// Restore a key pair from an encoded private scalar.
    pub fn from_private_key(domain: &'d Domain<G>, bytes: &[u8]) -> Result<Self> {
        let curve = domain.curve();
        let scalar = curve.decode(bytes);
        let public = curve.scalar_mul(domain.generator(), &scalar)?;
        let secret = Zeroizing::new(curve.encode(&scalar));

        Ok(Self {
            domain,
            secret,
            public,
        })
    }

    /// Domain parameters of this key pair.
    pub fn domain(&self) -> &'d Domain<G> {
        self.domain
    }

    /// Public point: the generator multiplied by the private scalar.
    pub fn public_point(&self) -> &CurvePoint {
        &self.public
    }

    /// Serialize the public point.
    ///
    /// Fails with [`ecgroup::Error::InvalidPointAccess`] if the public point
    /// is the point at infinity, e.g. for a zero private scalar.
    pub fn public_key(&self) -> Result<Vec<u8>> {
        let (x, y) = self.public.coordinates()?;
        let curve = self.domain.curve();
        encode_public_key(&curve.encode(x), &curve.encode(y))
    }

    /// Encoded private scalar.
    pub fn private_key(&self) -> Zeroizing<Vec<u8>> {
        self.secret.clone()
    }

    /// Compute the raw shared secret with a peer's serialized public key:
    /// the encoded x-coordinate of the peer's point multiplied by the
    /// private scalar.
    ///
    /// The result is not uniformly random; see
    /// [`EcDiffieHellman::shared_secret_stretched`].
    pub fn shared_secret_raw(&self, remote_public_key: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let curve = self.domain.curve();
        let remote = public_key_to_point(curve, remote_public_key)?;

        if !curve.contains(&remote) {
            debug!("rejected ECDH public key not on the curve");
            return Err(Error::PointNotOnCurve);
        }

        let scalar = curve.decode(&self.secret);
        let shared = curve.scalar_mul(&remote, &scalar)?;
        Ok(Zeroizing::new(curve.encode(shared.x()?)))
    }

    /// Compute the shared secret and stretch it into `len` bytes with
    /// PBKDF2-HMAC-SHA1.
    ///
    /// `salt` may be text (used as UTF-8) or raw bytes.
    pub fn shared_secret_stretched(
        &self,
        remote_public_key: &[u8],
        len: usize,
        iterations: u32,
        salt: impl AsRef<[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.shared_secret_stretched_with(Prf::default(), remote_public_key, len, iterations, salt)
    }

    /// Compute the shared secret and stretch it into `len` bytes with
    /// PBKDF2 using the given pseudorandom function.
    pub fn shared_secret_stretched_with(
        &self,
        prf: Prf,
        remote_public_key: &[u8],
        len: usize,
        iterations: u32,
        salt: impl AsRef<[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let raw = self.shared_secret_raw(remote_public_key)?;
        kdf::stretch(prf, &raw, salt.as_ref(), iterations, len)
    }
}

impl<G: CurveGroup> fmt::Debug for EcDiffieHellman<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcDiffieHellman")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// Frame encoded public key coordinates as `[xLen: u32 LE][x][y]`.
pub fn encode_public_key(x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
    let x_len = u32::try_from(x.len()).map_err(|_| Error::FrameOverflow(x.len()))?;

    let mut out = Vec::with_capacity(X_LEN_SIZE + x.len() + y.len());
    out.extend_from_slice(&x_len.to_le_bytes());
    out.extend_from_slice(x);
    out.extend_from_slice(y);
    Ok(out)
}

/// Split a framed public key into its encoded `(x, y)` coordinates.
pub fn decode_public_key(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    let Some((prefix, rest)) = bytes.split_first_chunk::<X_LEN_SIZE>() else {
        debug!(len = bytes.len(), "ECDH public key shorter than its length prefix");
        return Err(Error::MalformedPublicKey);
    };

    let x_len =
        usize::try_from(u32::from_le_bytes(*prefix)).map_err(|_| Error::MalformedPublicKey)?;
    if x_len > rest.len() {
        debug!(
            x_len,
            len = bytes.len(),
            "ECDH public key x-coordinate length exceeds buffer"
        );
        return Err(Error::MalformedPublicKey);
    }

    Ok(rest.split_at(x_len))
}

/// Decode a framed public key into a [`CurvePoint`] using the given
/// curve's integer encoding. No on-curve validation is performed.
pub fn public_key_to_point<G: CurveGroup>(curve: &G, bytes: &[u8]) -> Result<CurvePoint> {
    let (x, y) = decode_public_key(bytes)?;
    Ok(CurvePoint::new(curve.decode(x), curve.decode(y)))
}
