// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// Derived from curve25519-donna, Copyright 2008 Google Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Adam Langley <agl@imperialviolet.org>

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(docsrs)))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # x25519-donna
//!
//! A pure-Rust implementation of x25519 elliptic curve Diffie-Hellman key
//! exchange, as specified by Mike Hamburg and Adam Langley in
//! [RFC7748](https://tools.ietf.org/html/rfc7748), built on the
//! curve25519-donna field arithmetic: ten signed 64-bit limbs in radix
//! \\(2\^{25.5}\\), reduced in two stages, with no secret-dependent branches
//! or memory accesses.
//!
//! ## Examples
//!
//! Alice and Bob each draw a private key and publish the matching public
//! key:
//!
//! ```
//! # use rand::{rngs::StdRng, SeedableRng};
//! use x25519_donna::{PrivateKey, PublicKey};
//!
//! # let mut csprng = StdRng::seed_from_u64(7);
//! let alice_secret = PrivateKey::random_from_rng(&mut csprng)?;
//! let alice_public = PublicKey::from(&alice_secret);
//!
//! let bob_secret = PrivateKey::random_from_rng(&mut csprng)?;
//! let bob_public = PublicKey::from(&bob_secret);
//!
//! let alice_shared = alice_secret.diffie_hellman(&bob_public);
//! let bob_shared = bob_secret.diffie_hellman(&alice_public);
//! assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
//! # Ok::<(), x25519_donna::Error>(())
//! ```
//!
//! The same exchange is available over plain byte slices, for callers
//! whose keys arrive from the wire:
//!
//! ```
//! use x25519_donna::{compute_shared, derive_public};
//!
//! let alice_secret = [0x77u8; 32];
//! let bob_secret = [0x5du8; 32];
//!
//! let alice_public = derive_public(&alice_secret)?;
//! let bob_public = derive_public(&bob_secret)?;
//!
//! assert_eq!(
//!     compute_shared(&alice_secret, &bob_public)?,
//!     compute_shared(&bob_secret, &alice_public)?,
//! );
//! # Ok::<(), x25519_donna::Error>(())
//! ```
//!
//! The raw shared secret is a curve coordinate, not a uniformly random
//! key.  Pass it through a hash or KDF before use.
//!
//! Peer public keys are not validated.  A low-order peer key yields an
//! all-zero secret; protocols that care can check
//! [`SharedSecret::was_contributory`].
//!
//! ## Feature flags
//!
//! * `std` (default): implements `std::error::Error` for [`Error`].
//! * `zeroize` (default): wipes private keys, shared secrets and ladder
//!   scratch state when they are dropped.
//! * `getrandom`: enables `generate_private_key()` and
//!   `PrivateKey::random()`, drawing from the operating system.
//! * `serde`: derives `Serialize`/`Deserialize` for [`PublicKey`].

#[cfg(feature = "std")]
extern crate std;

//------------------------------------------------------------------------
// x25519-donna public API
//------------------------------------------------------------------------

// Curve constants.
pub mod constants;

// Montgomery-form points and the scalar multiplication ladder.
pub mod montgomery;

mod errors;
mod x25519;

pub use crate::constants::X25519_BASEPOINT_BYTES;
pub use crate::errors::Error;
pub use crate::x25519::*;

//------------------------------------------------------------------------
// x25519-donna internal modules
//------------------------------------------------------------------------

// Arithmetic in GF(2^255 - 19).
pub(crate) mod field;

// Byte encoding and decoding of field elements.
pub(crate) mod encoding;
