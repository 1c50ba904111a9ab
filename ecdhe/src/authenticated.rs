//! Ephemeral Diffie-Hellman authenticated with a long-term RSA identity key.
//!
//! Each peer sends `[publicLen: u16 LE][proofLen: u16 LE][public][proof]`
//! where `public` is an ECDH public key and `proof` depends on the sender's
//! role:
//!
//! | Role | Proof sent | Remote proof checked by |
//! |---|---|---|
//! | signer (private key) | PKCS#1 v1.5 SHA-256 signature over `public` | decrypting it and comparing SHA-256 digests |
//! | verifier (public key) | PKCS#1 v1.5 encryption of SHA-256(`public`) | verifying the signature |
//!
//! Only the verifier learns anything about its peer: anyone can encrypt
//! with the public key, so the verifier's proof does not show possession of
//! the private key. The signer side therefore gets no authentication of
//! the remote peer from this exchange.

use crate::{Error, Result, ct::ct_eq, ecdh::EcDiffieHellman};
use core::fmt;
use rand_core::CryptoRngCore;
use rsa::{
    Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    traits::PublicKeyParts,
};
use sha2::{Digest, Sha256};
use tracing::debug;
use x509_cert::{
    Certificate,
    der::{Decode, Encode},
};
use zeroize::Zeroizing;

/// Size of the two length fields heading an authenticated message.
const HEADER_SIZE: usize = 4;

/// Long-term RSA identity key.
#[derive(Clone, PartialEq)]
pub enum IdentityKey {
    /// Key pair: this side signs.
    Private(RsaPrivateKey),

    /// Public key only: this side verifies.
    Public(RsaPublicKey),
}

impl IdentityKey {
    /// Load an identity key from DER.
    ///
    /// Accepts PKCS#8 and PKCS#1 private keys, and SubjectPublicKeyInfo and
    /// PKCS#1 public keys.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        if der.is_empty() {
            return Err(Error::MissingKey);
        }

        if let Ok(key) = RsaPrivateKey::from_pkcs8_der(der) {
            return Ok(Self::Private(key));
        }
        if let Ok(key) = RsaPrivateKey::from_pkcs1_der(der) {
            return Ok(Self::Private(key));
        }
        if let Ok(key) = RsaPublicKey::from_public_key_der(der) {
            return Ok(Self::Public(key));
        }
        if let Ok(key) = RsaPublicKey::from_pkcs1_der(der) {
            return Ok(Self::Public(key));
        }

        debug!(len = der.len(), "identity key DER is not RSA key material");
        Err(Error::UnsupportedKeyType)
    }

    /// Load an identity key from PEM.
    ///
    /// Accepts the same encodings as [`IdentityKey::from_der`].
    #[cfg(feature = "pem")]
    pub fn from_pem(pem: &str) -> Result<Self> {
        if pem.trim().is_empty() {
            return Err(Error::MissingKey);
        }

        if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(pem) {
            return Ok(Self::Private(key));
        }
        if let Ok(key) = RsaPrivateKey::from_pkcs1_pem(pem) {
            return Ok(Self::Private(key));
        }
        if let Ok(key) = RsaPublicKey::from_public_key_pem(pem) {
            return Ok(Self::Public(key));
        }
        if let Ok(key) = RsaPublicKey::from_pkcs1_pem(pem) {
            return Ok(Self::Public(key));
        }

        debug!("identity key PEM is not RSA key material");
        Err(Error::UnsupportedKeyType)
    }

    /// Load the public identity key from a DER-encoded X.509 certificate.
    ///
    /// Only the SubjectPublicKeyInfo is read: the certificate's signature,
    /// validity period and chain are not checked.
    pub fn from_certificate_der(der: &[u8]) -> Result<Self> {
        if der.is_empty() {
            return Err(Error::MissingKey);
        }

        let certificate = Certificate::from_der(der).map_err(|e| {
            debug!(error = %e, len = der.len(), "failed to parse identity certificate");
            Error::InvalidCertificate
        })?;
        Self::from_certificate(&certificate)
    }

    /// Load the public identity key from a PEM-encoded X.509 certificate.
    ///
    /// See [`IdentityKey::from_certificate_der`].
    #[cfg(feature = "pem")]
    pub fn from_certificate_pem(pem: &str) -> Result<Self> {
        use x509_cert::der::DecodePem;

        if pem.trim().is_empty() {
            return Err(Error::MissingKey);
        }

        let certificate = Certificate::from_pem(pem).map_err(|e| {
            debug!(error = %e, "failed to parse identity certificate PEM");
            Error::InvalidCertificate
        })?;
        Self::from_certificate(&certificate)
    }

    /// Take the public identity key out of a parsed X.509 certificate.
    ///
    /// Fails with [`Error::UnsupportedKeyType`] unless the certificate
    /// carries an RSA public key.
    pub fn from_certificate(certificate: &Certificate) -> Result<Self> {
        let spki = &certificate.tbs_certificate.subject_public_key_info;
        let spki_der = spki.to_der().map_err(|_| Error::InvalidCertificate)?;

        match RsaPublicKey::from_public_key_der(&spki_der) {
            Ok(key) => Ok(Self::Public(key)),
            Err(_) => {
                debug!(algorithm = %spki.algorithm.oid, "identity certificate key is not RSA");
                Err(Error::UnsupportedKeyType)
            }
        }
    }

    /// Is the private component present?
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// Public half of the identity key.
    pub fn public_key(&self) -> RsaPublicKey {
        match self {
            Self::Private(key) => key.to_public_key(),
            Self::Public(key) => key.clone(),
        }
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (variant, bits) = match self {
            Self::Private(key) => ("Private", key.n().bits()),
            Self::Public(key) => ("Public", key.n().bits()),
        };
        f.debug_struct("IdentityKey")
            .field("kind", &variant)
            .field("modulus_bits", &bits)
            .finish()
    }
}

impl From<RsaPrivateKey> for IdentityKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Private(key)
    }
}

impl From<RsaPublicKey> for IdentityKey {
    fn from(key: RsaPublicKey) -> Self {
        Self::Public(key)
    }
}

/// Ephemeral Curve25519 Diffie-Hellman bound to an RSA identity key.
///
/// The role is fixed by the identity key: holding the private key makes
/// this side the signer.
pub struct EcDiffieHellmanRsa {
    ecdh: EcDiffieHellman<'static>,
    identity: IdentityKey,
}

impl EcDiffieHellmanRsa {
    /// Wrap a freshly generated ephemeral key pair.
    pub fn new<R: CryptoRngCore>(rng: &mut R, identity: impl Into<IdentityKey>) -> Result<Self> {
        Ok(Self {
            ecdh: EcDiffieHellman::new(rng)?,
            identity: identity.into(),
        })
    }

    /// Wrap a fresh ephemeral key pair generated with the operating
    /// system's cryptographically secure random number generator.
    #[cfg(feature = "getrandom")]
    pub fn generate(identity: impl Into<IdentityKey>) -> Result<Self> {
        Self::new(&mut rand_core::OsRng, identity)
    }

    /// Does this side hold the private identity key?
    pub fn is_signer(&self) -> bool {
        self.identity.is_private()
    }

    /// Identity key this exchange is bound to.
    pub fn identity(&self) -> &IdentityKey {
        &self.identity
    }

    /// Ephemeral key pair.
    pub fn ecdh(&self) -> &EcDiffieHellman<'static> {
        &self.ecdh
    }

    /// Build the message to send to the peer: the ephemeral public key plus
    /// this side's proof.
    ///
    /// `rng` supplies the PKCS#1 v1.5 encryption padding on the verifier
    /// side and is unused by the signer.
    pub fn secure_public_part<R: CryptoRngCore>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let public_part = self.ecdh.public_key()?;
        let digest = Sha256::digest(&public_part);

        let proof_part = match &self.identity {
            IdentityKey::Private(key) => key
                .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
                .map_err(|e| Error::Rsa(e.to_string()))?,
            IdentityKey::Public(key) => key
                .encrypt(rng, Pkcs1v15Encrypt, &digest)
                .map_err(|e| Error::Rsa(e.to_string()))?,
        };

        encode_secure_part(&public_part, &proof_part)
    }

    /// Check the peer's message and compute the raw shared secret from it.
    ///
    /// `rng` blinds the RSA decryption on the signer side and is unused by
    /// the verifier.
    pub fn verified_shared_part<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        secure_part: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let (public_part, proof_part) = decode_secure_part(secure_part)?;
        let digest = Sha256::digest(public_part);

        match &self.identity {
            IdentityKey::Private(key) => {
                let claimed = key
                    .decrypt_blinded(rng, Pkcs1v15Encrypt, proof_part)
                    .map(Zeroizing::new)
                    .map_err(|e| {
                        debug!(error = %e, "failed to decrypt peer proof");
                        Error::AuthenticationFailed
                    })?;

                if !ct_eq(&claimed, &digest) {
                    debug!("peer proof digest mismatch");
                    return Err(Error::AuthenticationFailed);
                }
            }
            IdentityKey::Public(key) => {
                key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, proof_part)
                    .map_err(|e| {
                        debug!(
                            error = %e,
                            modulus_bits = key.n().bits(),
                            "peer signature rejected"
                        );
                        Error::AuthenticationFailed
                    })?;
            }
        }

        self.ecdh.shared_secret_raw(public_part)
    }
}

impl fmt::Debug for EcDiffieHellmanRsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcDiffieHellmanRsa")
            .field("ecdh", &self.ecdh)
            .field("is_signer", &self.is_signer())
            .finish_non_exhaustive()
    }
}

/// Frame an authenticated message as
/// `[publicLen: u16 LE][proofLen: u16 LE][public][proof]`.
///
/// Parts longer than 65535 bytes are rejected rather than truncated.
pub fn encode_secure_part(public_part: &[u8], proof_part: &[u8]) -> Result<Vec<u8>> {
    let public_len =
        u16::try_from(public_part.len()).map_err(|_| Error::FrameOverflow(public_part.len()))?;
    let proof_len =
        u16::try_from(proof_part.len()).map_err(|_| Error::FrameOverflow(proof_part.len()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE + public_part.len() + proof_part.len());
    out.extend_from_slice(&public_len.to_le_bytes());
    out.extend_from_slice(&proof_len.to_le_bytes());
    out.extend_from_slice(public_part);
    out.extend_from_slice(proof_part);
    Ok(out)
}

/// Split an authenticated message into its `(public, proof)` parts.
pub fn decode_secure_part(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    let Some((header, body)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
        debug!(len = bytes.len(), "authenticated message truncated");
        return Err(Error::TruncatedMessage);
    };

    let public_len = usize::from(u16::from_le_bytes([header[0], header[1]]));
    let proof_len = usize::from(u16::from_le_bytes([header[2], header[3]]));

    if public_len + proof_len != body.len() {
        debug!(
            public_len,
            proof_len,
            len = bytes.len(),
            "authenticated message part lengths did not match"
        );
        return Err(Error::LengthMismatch);
    }

    Ok(body.split_at(public_len))
}
