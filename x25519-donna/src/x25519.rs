// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// Derived from curve25519-donna, Copyright 2008 Google Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Adam Langley <agl@imperialviolet.org>

//! x25519 Diffie-Hellman key exchange
//!
//! This implements x25519 key exchange as specified by Mike Hamburg
//! and Adam Langley in [RFC7748](https://tools.ietf.org/html/rfc7748).
//!
//! Two interfaces are provided.  The byte-oriented functions
//! ([`clamp`], [`derive_public`], [`compute_shared`],
//! [`generate_private_key_from_rng`]) accept slices and report a wrong
//! length as [`Error::InvalidArgument`].  The typed interface
//! ([`PrivateKey`], [`PublicKey`], [`SharedSecret`]) enforces lengths at
//! compile time.
//!
//! The raw shared secret is the \\(u\\)-coordinate of a curve point, not a
//! uniformly random string: hash it before using it as a symmetric key.

use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::errors::Error;
use crate::montgomery::MontgomeryPoint;

/// Length in bytes of keys and shared secrets.
pub const KEY_LENGTH: usize = 32;

/// Clamp a raw 32-byte scalar into an X25519 private key.
///
/// Clears the three low bits (making the scalar a multiple of the
/// cofactor 8), clears bit 255 and sets bit 254 (fixing the bit length).
/// Clamping is idempotent.
#[must_use]
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Check that an argument is exactly [`KEY_LENGTH`] bytes long.
fn check_length(name: &'static str, actual: usize) -> Result<(), Error> {
    if actual == KEY_LENGTH {
        return Ok(());
    }
    log::debug!(
        "rejecting {}: expected {} bytes, got {}",
        name,
        KEY_LENGTH,
        actual
    );
    Err(Error::InvalidArgument {
        name,
        expected: KEY_LENGTH,
        actual,
    })
}

/// Check that `bytes` is exactly [`KEY_LENGTH`] long and copy it out.
fn key_bytes(name: &'static str, bytes: &[u8]) -> Result<[u8; 32], Error> {
    check_length(name, bytes.len())?;
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Clamp a copy of `raw_key`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `raw_key` is not 32 bytes long.
pub fn clamp(raw_key: &[u8]) -> Result<[u8; 32], Error> {
    key_bytes("raw key", raw_key).map(clamp_integer)
}

/// Clamp `key` where it lies, for callers that own a disposable buffer.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `key` is not 32 bytes long; `key` is left
/// untouched.
pub fn clamp_in_place(key: &mut [u8]) -> Result<(), Error> {
    #[allow(unused_mut)]
    let mut clamped = clamp(key)?;
    key.copy_from_slice(&clamped);

    #[cfg(feature = "zeroize")]
    clamped.zeroize();

    Ok(())
}

/// Compute the public key belonging to `private_key`.
///
/// The scalar is clamped before use, so a raw key yields the same
/// public key as its clamped form.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `private_key` is not 32 bytes long.
pub fn derive_public(private_key: &[u8]) -> Result<[u8; 32], Error> {
    #[allow(unused_mut)]
    let mut k = key_bytes("private key", private_key)?;
    let public = MontgomeryPoint::mul_base_clamped(k).to_bytes();

    #[cfg(feature = "zeroize")]
    k.zeroize();

    Ok(public)
}

/// Compute the raw shared secret between `private_key` and the peer's
/// `peer_public_key`.
///
/// The peer key is not validated.  A low-order peer key, such as all
/// zeros, produces a publicly predictable secret (all zeros) rather than
/// an error; see [`SharedSecret::was_contributory`].
///
/// # Errors
///
/// [`Error::InvalidArgument`] if either argument is not 32 bytes long.
pub fn compute_shared(private_key: &[u8], peer_public_key: &[u8]) -> Result<[u8; 32], Error> {
    check_length("private key", private_key.len())?;
    let u = key_bytes("public key", peer_public_key)?;
    #[allow(unused_mut)]
    let mut k = key_bytes("private key", private_key)?;
    let shared = x25519(k, u);

    #[cfg(feature = "zeroize")]
    k.zeroize();

    Ok(shared)
}

/// Draw a fresh, clamped private key from `csprng`.
///
/// # Errors
///
/// [`Error::Rng`] if the generator fails.
pub fn generate_private_key_from_rng<R: RngCore + CryptoRng + ?Sized>(
    csprng: &mut R,
) -> Result<[u8; 32], Error> {
    let mut bytes = [0u8; 32];
    csprng.try_fill_bytes(&mut bytes).map_err(|e| {
        log::warn!("failed to draw private key material: {}", e);
        Error::Rng
    })?;
    clamp_in_place(&mut bytes)?;
    Ok(bytes)
}

/// Draw a fresh, clamped private key from the operating system's
/// random number generator.
///
/// # Errors
///
/// [`Error::Rng`] if the operating system generator fails.
#[cfg(feature = "getrandom")]
pub fn generate_private_key() -> Result<[u8; 32], Error> {
    generate_private_key_from_rng(&mut rand_core::OsRng)
}

/// The bare, byte-oriented x25519 function, exactly as specified in RFC7748.
///
/// This can be used with [`X25519_BASEPOINT_BYTES`](crate::X25519_BASEPOINT_BYTES)
/// for people who cannot use the typed API.
///
/// # Example
///
/// ```
/// use x25519_donna::{x25519, X25519_BASEPOINT_BYTES};
///
/// let alice_secret = [0x11u8; 32];
/// let bob_secret = [0x22u8; 32];
///
/// let alice_public = x25519(alice_secret, X25519_BASEPOINT_BYTES);
/// let bob_public = x25519(bob_secret, X25519_BASEPOINT_BYTES);
///
/// assert_eq!(x25519(alice_secret, bob_public), x25519(bob_secret, alice_public));
/// ```
#[must_use]
pub fn x25519(k: [u8; 32], u: [u8; 32]) -> [u8; 32] {
    MontgomeryPoint(u).mul_clamped(k).to_bytes()
}

/// A Diffie-Hellman public key.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct PublicKey([u8; 32]);

impl From<[u8; 32]> for PublicKey {
    /// Given a byte array, construct a x25519 `PublicKey`.
    fn from(bytes: [u8; 32]) -> PublicKey {
        PublicKey(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<PublicKey, Error> {
        key_bytes("public key", bytes).map(PublicKey)
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for PublicKey {
    /// View this public key as a byte array.
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A Diffie-Hellman private key, held in clamped form, which may be used
/// to compute any number of [`SharedSecret`]s.
///
/// It is wiped from memory when dropped if the `zeroize` feature is
/// enabled.
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key to produce a [`SharedSecret`].
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(MontgomeryPoint(their_public.0).mul_clamped(self.0))
    }

    /// Generate a new [`PrivateKey`] with the supplied RNG.
    ///
    /// # Errors
    ///
    /// [`Error::Rng`] if the generator fails.
    pub fn random_from_rng<R: RngCore + CryptoRng + ?Sized>(
        csprng: &mut R,
    ) -> Result<PrivateKey, Error> {
        generate_private_key_from_rng(csprng).map(PrivateKey)
    }

    /// Generate a new [`PrivateKey`] from the operating system's RNG.
    ///
    /// # Errors
    ///
    /// [`Error::Rng`] if the operating system generator fails.
    #[cfg(feature = "getrandom")]
    pub fn random() -> Result<PrivateKey, Error> {
        Self::random_from_rng(&mut rand_core::OsRng)
    }

    /// Extract this key's (clamped) bytes for serialization.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this key's (clamped) bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for PrivateKey {
    /// Load a private key from a byte array, clamping it.
    fn from(bytes: [u8; 32]) -> PrivateKey {
        PrivateKey(clamp_integer(bytes))
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<PrivateKey, Error> {
        clamp(bytes).map(PrivateKey)
    }
}

impl<'a> From<&'a PrivateKey> for PublicKey {
    /// Given an x25519 [`PrivateKey`], compute its corresponding [`PublicKey`].
    fn from(secret: &'a PrivateKey) -> PublicKey {
        PublicKey(MontgomeryPoint::mul_base_clamped(secret.0).to_bytes())
    }
}

impl AsRef<[u8]> for PrivateKey {
    /// View this key as a byte array.
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::ZeroizeOnDrop for PrivateKey {}

/// The result of a Diffie-Hellman key exchange.
///
/// Each party computes this using their [`PrivateKey`] and their
/// counterparty's [`PublicKey`].  It must be passed through a hash or KDF
/// before being used as a key.
pub struct SharedSecret(MontgomeryPoint);

impl SharedSecret {
    /// Convert this shared secret to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this shared secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Ensure in constant-time that this shared secret did not result from a
    /// key exchange with non-contributory behaviour.
    ///
    /// A peer can force the secret to zero by sending a low-order public
    /// key such as all zeros.  Whether that matters depends on the
    /// protocol; the exchange itself never rejects such keys.
    ///
    /// # Returns
    ///
    /// Returns `true` if the key exchange was contributory (good), and `false`
    /// otherwise (can be bad for some protocols).
    #[must_use]
    pub fn was_contributory(&self) -> bool {
        !bool::from(self.0.is_identity())
    }
}

impl AsRef<[u8]> for SharedSecret {
    /// View this shared secret key as a byte array.
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::ZeroizeOnDrop for SharedSecret {}
