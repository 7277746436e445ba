// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// Derived from curve25519-donna, Copyright 2008 Google Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Adam Langley <agl@imperialviolet.org>

//! Curve constants.

use crate::montgomery::MontgomeryPoint;

/// The X25519 basepoint, `u = 9`, for use with the bare, byte-oriented
/// [`x25519`](crate::x25519()) function.
pub const X25519_BASEPOINT_BYTES: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// The X25519 basepoint, in Montgomery form.
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint(X25519_BASEPOINT_BYTES);

/// `(A - 2) / 4`, where `A = 486662` is the Montgomery curve coefficient.
/// Used in the doubling half of the ladder step.
pub(crate) const A24: u32 = 121665;
