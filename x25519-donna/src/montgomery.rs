// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// Derived from curve25519-donna, Copyright 2008 Google Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Adam Langley <agl@imperialviolet.org>

//! Scalar multiplication on the Montgomery form of Curve25519.
//!
//! We use variables \\( u, v \\) for the Montgomery curve, following
//! RFC 7748, so that “Montgomery \\(u\\)” here corresponds to the
//! \\(x\\)-coordinate of the original Curve25519 paper.
//!
//! Montgomery arithmetic works not on the curve itself, but on the
//! \\(u\\)-line, which discards sign information and unifies the curve
//! and its quadratic twist.  See [_Montgomery curves and their
//! arithmetic_][costello-smith] by Costello and Smith for more details.
//!
//! The [`MontgomeryPoint`] struct contains the affine \\(u\\)-coordinate
//! \\(u\_0(P)\\) of a point \\(P\\) on either the curve or the twist.
//! Here the map \\(u\_0 : \mathcal M \rightarrow \mathbb F\_p \\) is
//! defined by \\(u\_0((u,v)) = u\\) for points not at infinity and
//! \\(u\_0(\mathcal O) = 0\\).
//!
//! Scalar multiplication is provided by the Montgomery ladder, which
//! processes one scalar bit per step and always performs the same
//! operations, swapping its two working points in constant time
//! according to the bit.
//!
//! No validation is performed on the input point: multiplying a
//! low-order point, or the all-zero encoding, yields a (weak) result
//! rather than an error.
//!
//! [costello-smith]: https://eprint.iacr.org/2017/212.pdf

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use core::hash::{Hash, Hasher};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants::{A24, X25519_BASEPOINT};
use crate::field::FieldElement;
use crate::x25519::clamp_integer;

/// Holds the \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519 or its twist.
#[derive(Copy, Clone, Debug, Default)]
pub struct MontgomeryPoint(pub [u8; 32]);

/// Equality of `MontgomeryPoint`s is defined mod p.
impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        let self_fe = FieldElement::from_bytes(&self.0);
        let other_fe = FieldElement::from_bytes(&other.0);

        self_fe.to_bytes().ct_eq(&other_fe.to_bytes())
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

// Equal MontgomeryPoints must hash to the same value. So we have to get them
// into a canonical encoding first.
impl Hash for MontgomeryPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let canonical_bytes = FieldElement::from_bytes(&self.0).to_bytes();
        canonical_bytes.hash(state);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl MontgomeryPoint {
    /// Multiply this point by `clamp_integer(bytes)`.  For a description
    /// of clamping, see [`clamp_integer`].
    ///
    /// The peer point is not validated; see the module documentation.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> MontgomeryPoint {
        #[allow(unused_mut)]
        let mut scalar = clamp_integer(bytes);
        let affine_u = FieldElement::from_bytes(&self.0);

        let result = ladder(&scalar, &affine_u).as_affine();

        #[cfg(feature = "zeroize")]
        scalar.zeroize();

        result
    }

    /// Multiply the basepoint by `clamp_integer(bytes)`.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> MontgomeryPoint {
        X25519_BASEPOINT.mul_clamped(bytes)
    }

    /// Determine, in constant time, whether this is the \\(u\\)-coordinate
    /// of the identity (or of the order-2 point), i.e. zero mod p.
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&MontgomeryPoint::default())
    }

    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

// ------------------------------------------------------------------------
// Ladder internals
// ------------------------------------------------------------------------

/// A `ProjectivePoint` holds a point on the projective line
/// \\( \mathbb P(\mathbb F\_p) \\), which we identify with the Kummer
/// line of the Montgomery curve.  \\( (X:Z) \\) stands for \\( u = X/Z \\).
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub X: FieldElement,
    pub Z: FieldElement,
}

impl ProjectivePoint {
    /// The point at infinity, \\( (1:0) \\).
    pub(crate) const IDENTITY: ProjectivePoint = ProjectivePoint {
        X: FieldElement::ONE,
        Z: FieldElement::ZERO,
    };

    /// Dehomogenize this point to affine coordinates.
    ///
    /// The point at infinity maps to zero, since zero inverts to zero.
    pub(crate) fn as_affine(&self) -> MontgomeryPoint {
        let u = &self.X * &self.Z.invert();
        MontgomeryPoint(u.to_bytes())
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(
        a: &ProjectivePoint,
        b: &ProjectivePoint,
        choice: Choice,
    ) -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }

    fn conditional_swap(a: &mut ProjectivePoint, b: &mut ProjectivePoint, choice: Choice) {
        FieldElement::conditional_swap(&mut a.X, &mut b.X, choice);
        FieldElement::conditional_swap(&mut a.Z, &mut b.Z, choice);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Z.zeroize();
    }
}

/// The two working points of the ladder: \\( nQ \\) and \\( nQ + Q \\).
#[derive(Copy, Clone, Debug)]
struct LadderState {
    nQ: ProjectivePoint,
    nQpQ: ProjectivePoint,
}

impl LadderState {
    /// Swap the two working points if `choice` is set.
    fn conditional_swap(&mut self, choice: Choice) {
        ProjectivePoint::conditional_swap(&mut self.nQ, &mut self.nQpQ, choice);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for LadderState {
    fn zeroize(&mut self) {
        self.nQ.zeroize();
        self.nQpQ.zeroize();
    }
}

/// Perform the double-and-add step of the Montgomery ladder.
///
/// Given projective points
/// \\( (X\_Q : Z\_Q) = u(Q) \\),
/// \\( (X\_{Q'} : Z\_{Q'}) = u(Q') \\),
/// and the affine difference
/// \\(      u\_{Q-Q'} = u(Q-Q') \\), write
/// $$
///     (X\_Q : Z\_Q) \gets u(\[2\]Q)
/// $$
/// and
/// $$
///     (X\_{Q'} : Z\_{Q'}) \gets u(Q + Q')
/// $$
/// into `output`.  `input` is left as it was.
#[rustfmt::skip] // keep alignment of explanatory comments
fn differential_add_and_double(
    input: &LadderState,
    output: &mut LadderState,
    affine_QmQp: &FieldElement,
) {
    let Q = &input.nQ;
    let Qp = &input.nQpQ;

    let t0 = &Q.X + &Q.Z;                  // X_Q + Z_Q
    let t1 = Q.Z.subtract_from(&Q.X);      // X_Q - Z_Q
    let t2 = &Qp.X + &Qp.Z;                // X_Q' + Z_Q'
    let t3 = Qp.Z.subtract_from(&Qp.X);    // X_Q' - Z_Q'

    let t4 = &t2 * &t1;                    // (X_Q' + Z_Q')(X_Q - Z_Q)
    let t5 = &t0 * &t3;                    // (X_Q + Z_Q)(X_Q' - Z_Q')

    let t6 = &t4 + &t5;                    // 2(X_Q X_Q' - Z_Q Z_Q')
    let t7 = t5.subtract_from(&t4);        // 2(X_Q Z_Q' - X_Q' Z_Q)

    output.nQpQ.X = t6.square();           // 4(X_Q X_Q' - Z_Q Z_Q')^2
    output.nQpQ.Z = &t7.square() * affine_QmQp; // 4(X_Q Z_Q' - X_Q' Z_Q)^2 u(Q-Q')

    let t8 = t0.square();                  // (X_Q + Z_Q)^2
    let t9 = t1.square();                  // (X_Q - Z_Q)^2

    output.nQ.X = &t8 * &t9;               // (X_Q^2 - Z_Q^2)^2

    let t10 = t9.subtract_from(&t8);       // 4 X_Q Z_Q
    let t11 = t10.scale(A24).reduce();     // 4 a24 X_Q Z_Q
    let t12 = &t11 + &t8;                  // (X_Q + Z_Q)^2 + 4 a24 X_Q Z_Q

    output.nQ.Z = &t10 * &t12;             // 4 X_Q Z_Q ((X_Q + Z_Q)^2 + 4 a24 X_Q Z_Q)
}

/// Borrow the slot being read from and the slot being written to.
fn split_slots(
    slots: &mut [LadderState; 2],
    current: usize,
) -> (&mut LadderState, &mut LadderState) {
    let (first, second) = slots.split_at_mut(1);
    if current == 0 {
        (&mut first[0], &mut second[0])
    } else {
        (&mut second[0], &mut first[0])
    }
}

/// Compute \\( n \cdot u(Q) \\) in projective coordinates, where `scalar`
/// holds \\( n \\) in little-endian order and `affine_u` is \\( u(Q) \\).
///
/// All 256 bits are processed, most significant first.  For each bit the
/// working points are swapped in according to the bit, stepped from one
/// slot into the other, and swapped back out in the slot just written.
/// The slots then trade roles, so no point is ever copied.
pub(crate) fn ladder(scalar: &[u8; 32], affine_u: &FieldElement) -> ProjectivePoint {
    let mut slots = [
        LadderState {
            nQ: ProjectivePoint::IDENTITY,
            nQpQ: ProjectivePoint {
                X: *affine_u,
                Z: FieldElement::ONE,
            },
        },
        LadderState {
            nQ: ProjectivePoint::IDENTITY,
            nQpQ: ProjectivePoint::IDENTITY,
        },
    ];
    let mut current = 0;

    for byte in scalar.iter().rev() {
        for j in (0..8).rev() {
            let bit = Choice::from((*byte >> j) & 1);

            let (input, output) = split_slots(&mut slots, current);
            input.conditional_swap(bit);
            differential_add_and_double(input, output, affine_u);
            output.conditional_swap(bit);

            current ^= 1;
        }
    }

    let result = slots[current].nQ;

    #[cfg(feature = "zeroize")]
    for slot in slots.iter_mut() {
        slot.zeroize();
    }

    result
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
