// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// Derived from curve25519-donna, Copyright 2008 Google Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Adam Langley <agl@imperialviolet.org>

//! Field arithmetic for ℤ/(2²⁵⁵-19), using signed 64-bit limbs in
//! radix 2^25.5.
//!
//! Based on Adam Langley's curve25519-donna.
//!
//! Products are computed in two stages: a schoolbook multiplication
//! producing a 19-limb double-degree polynomial, then a degree
//! reduction (folding the high limbs back using 2^255 = 19 mod p)
//! followed by a coefficient reduction (carry propagation).  Every
//! function here runs in time independent of the limb values.

use core::fmt::Debug;
use core::ops::{Add, Mul};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Width in limbs of a field element.
pub(crate) const LIMBS: usize = 10;

/// A double-degree product of two field elements, before degree
/// reduction.
pub(crate) type UnreducedProduct = [i64; 2 * LIMBS - 1];

/// A degree-reduced product awaiting coefficient reduction.  The extra
/// top limb catches the carry out of limb 9.
pub(crate) type CarryLimbs = [i64; LIMBS + 1];

/// A `FieldElement` represents an element of the field GF(2^255 - 19).
///
/// An element t, entries t[0],...,t[9], represents the integer
/// t[0]+2^26 t[1]+2^51 t[2]+2^77 t[3]+2^102 t[4]+...+2^230 t[9].
/// The limbs are alternately 26 and 25 bits wide.
///
/// In *reduced* form the even limbs satisfy |t[i]| < 2^26 and the odd
/// limbs |t[i]| < 2^25, except that t[2] may reach 2^26 in magnitude
/// straight out of a multiplication.  Sums and differences of reduced
/// elements are valid multiplication inputs; anything larger must be
/// reduced first.
#[derive(Copy, Clone)]
pub(crate) struct FieldElement(pub(crate) [i64; LIMBS]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl Eq for FieldElement {}
impl PartialEq for FieldElement {
    /// Test equality of the encoded residues.
    ///
    /// # Warning
    ///
    /// This comparison is *not* constant time.  It is only used by tests
    /// and debug assertions.
    fn eq(&self, other: &FieldElement) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    /// Limb-wise sum.  The result is not reduced.
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut output = *self;
        for i in 0..LIMBS {
            output.0[i] += rhs.0[i];
        }
        output
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        self.mul_reduced(rhs)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        let mut output = *a;
        output.conditional_assign(b, choice);
        output
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        let mask = -(choice.unwrap_u8() as i64);
        for i in 0..LIMBS {
            self.0[i] ^= mask & (self.0[i] ^ other.0[i]);
        }
    }

    /// Swap `a` and `b` if `choice` is set, using an XOR mask so that
    /// both limb arrays are read and written regardless of `choice`.
    fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        let mask = -(choice.unwrap_u8() as i64);
        for i in 0..LIMBS {
            let x = mask & (a.0[i] ^ b.0[i]);
            a.0[i] ^= x;
            b.0[i] ^= x;
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Return `v / 2^26`, rounding toward zero, using only shifts and adds.
#[inline(always)]
fn div_by_2_26(v: i64) -> i64 {
    // All ones if v is negative, else zero.
    let sign = v >> 63;
    // 2^26 - 1 if v is negative, else zero.
    let roundoff = ((sign as u64) >> 38) as i64;
    (v + roundoff) >> 26
}

/// Return `v / 2^25`, rounding toward zero, using only shifts and adds.
#[inline(always)]
fn div_by_2_25(v: i64) -> i64 {
    let sign = v >> 63;
    // 2^25 - 1 if v is negative, else zero.
    let roundoff = ((sign as u64) >> 39) as i64;
    (v + roundoff) >> 25
}

/// Multiply by 19 as `16x + 2x + x`.
#[inline(always)]
fn times_19(x: i64) -> i64 {
    (x << 4) + (x << 1) + x
}

impl FieldElement {
    /// Construct zero.
    pub(crate) const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Construct one.
    pub(crate) const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Compute `minuend - self`.
    ///
    /// Note the order: `self` is the subtrahend.  The result is not
    /// reduced.
    pub(crate) fn subtract_from(&self, minuend: &FieldElement) -> FieldElement {
        let mut output = *minuend;
        for i in 0..LIMBS {
            output.0[i] -= self.0[i];
        }
        output
    }

    /// Multiply every limb by the small constant `k`.  The result is not
    /// reduced.
    pub(crate) fn scale(&self, k: u32) -> FieldElement {
        let k = k as i64;
        let mut output = *self;
        for i in 0..LIMBS {
            output.0[i] *= k;
        }
        output
    }

    /// Schoolbook product of two reduced elements, as a 19-limb
    /// polynomial.
    ///
    /// A term `f[i] g[j]` with both `i` and `j` odd lands on a limb whose
    /// weight is half of `2^(26i - i/2) 2^(26j - j/2)`, so it is doubled.
    #[rustfmt::skip]
    pub(crate) fn multiply(&self, rhs: &FieldElement) -> UnreducedProduct {
        let [f0, f1, f2, f3, f4, f5, f6, f7, f8, f9] = self.0;
        let [g0, g1, g2, g3, g4, g5, g6, g7, g8, g9] = rhs.0;

        let f1_2 = 2 * f1;
        let f3_2 = 2 * f3;
        let f5_2 = 2 * f5;
        let f7_2 = 2 * f7;
        let f9_2 = 2 * f9;

        [
            f0*g0,
            f0*g1 + f1*g0,
            f0*g2 + f1_2*g1 + f2*g0,
            f0*g3 + f1*g2 + f2*g1 + f3*g0,
            f0*g4 + f1_2*g3 + f2*g2 + f3_2*g1 + f4*g0,
            f0*g5 + f1*g4 + f2*g3 + f3*g2 + f4*g1 + f5*g0,
            f0*g6 + f1_2*g5 + f2*g4 + f3_2*g3 + f4*g2 + f5_2*g1 + f6*g0,
            f0*g7 + f1*g6 + f2*g5 + f3*g4 + f4*g3 + f5*g2 + f6*g1 + f7*g0,
            f0*g8 + f1_2*g7 + f2*g6 + f3_2*g5 + f4*g4 + f5_2*g3 + f6*g2 + f7_2*g1 + f8*g0,
            f0*g9 + f1*g8 + f2*g7 + f3*g6 + f4*g5 + f5*g4 + f6*g3 + f7*g2 + f8*g1 + f9*g0,
            f1_2*g9 + f2*g8 + f3_2*g7 + f4*g6 + f5_2*g5 + f6*g4 + f7_2*g3 + f8*g2 + f9_2*g1,
            f2*g9 + f3*g8 + f4*g7 + f5*g6 + f6*g5 + f7*g4 + f8*g3 + f9*g2,
            f3_2*g9 + f4*g8 + f5_2*g7 + f6*g6 + f7_2*g5 + f8*g4 + f9_2*g3,
            f4*g9 + f5*g8 + f6*g7 + f7*g6 + f8*g5 + f9*g4,
            f5_2*g9 + f6*g8 + f7_2*g7 + f8*g6 + f9_2*g5,
            f6*g9 + f7*g8 + f8*g7 + f9*g6,
            f7_2*g9 + f8*g8 + f9_2*g7,
            f8*g9 + f9*g8,
            f9_2*g9,
        ]
    }

    /// Square of a reduced element, as a 19-limb polynomial.
    ///
    /// Each cross term `f[i] f[j]` with `i != j` is computed once and
    /// doubled, on top of the odd-odd doubling of `multiply`.
    #[rustfmt::skip]
    pub(crate) fn square_inner(&self) -> UnreducedProduct {
        let [f0, f1, f2, f3, f4, f5, f6, f7, f8, f9] = self.0;

        let f0_2 = 2 * f0;
        let f1_2 = 2 * f1;
        let f2_2 = 2 * f2;
        let f3_2 = 2 * f3;
        let f4_2 = 2 * f4;
        let f5_2 = 2 * f5;
        let f6_2 = 2 * f6;
        let f7_2 = 2 * f7;
        let f8_2 = 2 * f8;
        let f9_2 = 2 * f9;

        [
            f0*f0,
            f0_2*f1,
            f0_2*f2 + f1_2*f1,
            f0_2*f3 + f1_2*f2,
            f0_2*f4 + f1_2*f3_2 + f2*f2,
            f0_2*f5 + f1_2*f4   + f2_2*f3,
            f0_2*f6 + f1_2*f5_2 + f2_2*f4 + f3_2*f3,
            f0_2*f7 + f1_2*f6   + f2_2*f5 + f3_2*f4,
            f0_2*f8 + f1_2*f7_2 + f2_2*f6 + f3_2*f5_2 + f4*f4,
            f0_2*f9 + f1_2*f8   + f2_2*f7 + f3_2*f6   + f4_2*f5,
            f1_2*f9_2 + f2_2*f8 + f3_2*f7_2 + f4_2*f6 + f5_2*f5,
            f2_2*f9   + f3_2*f8 + f4_2*f7   + f5_2*f6,
            f3_2*f9_2 + f4_2*f8 + f5_2*f7_2 + f6*f6,
            f4_2*f9   + f5_2*f8 + f6_2*f7,
            f5_2*f9_2 + f6_2*f8 + f7_2*f7,
            f6_2*f9   + f7_2*f8,
            f7_2*f9_2 + f8*f8,
            f8_2*f9,
            f9_2*f9,
        ]
    }

    /// Fold limbs 10..18 of a double-degree product onto limbs 0..8.
    ///
    /// Limb `10 + i` has weight `2^255` times the weight of limb `i`, and
    /// `2^255 = 19 (mod p)`.  The returned carry slot is left at zero.
    pub(crate) fn reduce_degree(mut t: UnreducedProduct) -> CarryLimbs {
        for i in (0..LIMBS - 1).rev() {
            t[i] += times_19(t[i + LIMBS]);
        }

        let mut output = [0i64; LIMBS + 1];
        output[..LIMBS].copy_from_slice(&t[..LIMBS]);
        output
    }

    /// Propagate carries so that every limb is back within its width.
    ///
    /// On entry every |t[i]| < 2^62.  On exit limbs 0, 1 and 3..9 are
    /// reduced and |t[2]| <= 2^26.
    pub(crate) fn reduce_coefficients(mut t: CarryLimbs) -> FieldElement {
        t[LIMBS] = 0;

        let mut i = 0;
        while i < LIMBS {
            let over = div_by_2_26(t[i]);
            t[i] -= over << 26;
            t[i + 1] += over;

            let over = div_by_2_25(t[i + 1]);
            t[i + 1] -= over << 25;
            t[i + 2] += over;

            i += 2;
        }

        // |t[10]| < 2^38 and limbs 0..9 are reduced.
        t[0] += times_19(t[LIMBS]);
        t[LIMBS] = 0;

        // |t[0]| < 2^26 + 19 * 2^38, so |over| <= 77825.
        let over = div_by_2_26(t[0]);
        t[0] -= over << 26;
        t[1] += over;

        // |t[1]| < 2^25 + 77825, so |over| <= 1.
        let over = div_by_2_25(t[1]);
        t[1] -= over << 25;
        t[2] += over;

        let mut output = FieldElement::ZERO;
        output.0.copy_from_slice(&t[..LIMBS]);
        output
    }

    /// Run a coefficient reduction over an element that is already of
    /// degree 9, such as the output of `scale` or of a previous reduction.
    pub(crate) fn reduce(&self) -> FieldElement {
        let mut t = [0i64; LIMBS + 1];
        t[..LIMBS].copy_from_slice(&self.0);
        FieldElement::reduce_coefficients(t)
    }

    /// Multiply two elements, returning a reduced element.
    pub(crate) fn mul_reduced(&self, rhs: &FieldElement) -> FieldElement {
        FieldElement::reduce_coefficients(FieldElement::reduce_degree(self.multiply(rhs)))
    }

    /// Square this element, returning a reduced element.
    pub(crate) fn square(&self) -> FieldElement {
        FieldElement::reduce_coefficients(FieldElement::reduce_degree(self.square_inner()))
    }

    /// Requires k > 0; raise self to the 2^k-th power.
    fn pow2k(&self, k: u32) -> FieldElement {
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Given a nonzero field element, compute its inverse.
    ///
    /// The inverse is computed as self^(p-2), since x^(p-2)x = x^(p-1) = 1
    /// (mod p).  The addition chain is fixed, so this runs in the same
    /// time for every input.  Zero maps to zero.
    #[rustfmt::skip]
    pub(crate) fn invert(&self) -> FieldElement {
        // Each temporary is self^e; squaring doubles e, multiplying two
        // temporaries adds their exponents.
        //
        //                                          exponent
        let z2       = self.square();            // 2
        let t0       = z2.pow2k(2);              // 8
        let z9       = &t0 * self;               // 9
        let z11      = &z9 * &z2;                // 11
        let t0       = z11.square();             // 22
        let z2_5_0   = &t0 * &z9;                // 2^5 - 2^0
        let t0       = z2_5_0.pow2k(5);          // 2^10 - 2^5
        let z2_10_0  = &t0 * &z2_5_0;            // 2^10 - 2^0
        let t0       = z2_10_0.pow2k(10);        // 2^20 - 2^10
        let z2_20_0  = &t0 * &z2_10_0;           // 2^20 - 2^0
        let t0       = z2_20_0.pow2k(20);        // 2^40 - 2^20
        let t0       = &t0 * &z2_20_0;           // 2^40 - 2^0
        let t0       = t0.pow2k(10);             // 2^50 - 2^10
        let z2_50_0  = &t0 * &z2_10_0;           // 2^50 - 2^0
        let t0       = z2_50_0.pow2k(50);        // 2^100 - 2^50
        let z2_100_0 = &t0 * &z2_50_0;           // 2^100 - 2^0
        let t0       = z2_100_0.pow2k(100);      // 2^200 - 2^100
        let t0       = &t0 * &z2_100_0;          // 2^200 - 2^0
        let t0       = t0.pow2k(50);             // 2^250 - 2^50
        let z2_250_0 = &t0 * &z2_50_0;           // 2^250 - 2^0
        let t0       = z2_250_0.pow2k(5);        // 2^255 - 2^5

        &t0 * &z11                               // 2^255 - 21
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Random element a of GF(2^255-19), from Sage
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68, 0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7,
        0x03, 0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4, 0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3,
        0xa9, 0x17,
    ];

    /// Byte representation of a**2
    static ASQ_BYTES: [u8; 32] = [
        0x75, 0x97, 0x24, 0x9e, 0xe6, 0x06, 0xfe, 0xab, 0x24, 0x04, 0x56, 0x68, 0x07, 0x91, 0x2d,
        0x5d, 0x0b, 0x0f, 0x3f, 0x1c, 0xb2, 0x6e, 0xf2, 0xe2, 0x63, 0x9c, 0x12, 0xba, 0x73, 0x0b,
        0xe3, 0x62,
    ];

    /// Byte representation of 1/a
    static AINV_BYTES: [u8; 32] = [
        0x96, 0x1b, 0xcd, 0x8d, 0x4d, 0x5e, 0xa2, 0x3a, 0xe9, 0x36, 0x37, 0x93, 0xdb, 0x7b, 0x4d,
        0x70, 0xb8, 0x0d, 0xc0, 0x55, 0xd0, 0x4c, 0x1d, 0x7b, 0x90, 0x71, 0xd8, 0xe9, 0xb6, 0x18,
        0xe6, 0x30,
    ];

    fn assert_reduced(fe: &FieldElement) {
        for (i, limb) in fe.0.iter().enumerate() {
            let bound = if i % 2 == 0 { 1i64 << 26 } else { 1i64 << 25 };
            assert!(limb.abs() <= bound, "limb {} = {} out of range", i, limb);
        }
    }

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, &a * &a);
    }

    #[test]
    fn a_square_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, a.square());
    }

    #[test]
    fn a_invert_vs_inverse_of_a_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let should_be_inverse = a.invert();
        assert_eq!(ainv, should_be_inverse);
        assert_eq!(FieldElement::ONE, &a * &should_be_inverse);
    }

    #[test]
    fn invert_of_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn invert_of_one_is_one() {
        assert_eq!(FieldElement::ONE.invert(), FieldElement::ONE);
    }

    #[test]
    fn square_and_multiply_agree_before_reduction() {
        let a = FieldElement::from_bytes(&A_BYTES);
        assert_eq!(a.square_inner(), a.multiply(&a));
    }

    #[test]
    fn products_come_out_reduced() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&ASQ_BYTES);
        // Sums and differences are the largest inputs the ladder feeds in.
        let sum = &a + &b;
        let diff = b.subtract_from(&a);
        assert_reduced(&(&sum * &diff));
        assert_reduced(&sum.square());
        assert_reduced(&diff.square());
    }

    #[test]
    fn subtract_from_takes_subtrahend_as_receiver() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&ASQ_BYTES);
        // (a - b) + b == a
        let a_minus_b = b.subtract_from(&a);
        assert_eq!((&a_minus_b + &b).reduce(), a);
        // b - b == 0
        assert_eq!(b.subtract_from(&b).reduce(), FieldElement::ZERO);
    }

    #[test]
    fn scale_matches_multiplication_by_small_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let mut k = FieldElement::ZERO;
        k.0[0] = 121665;
        assert_eq!(a.scale(121665).reduce(), &a * &k);
    }

    #[test]
    fn reduce_degree_folds_high_limbs_times_19() {
        let mut t = [0i64; 19];
        t[10] = 1;
        t[18] = 2;
        t[9] = 5;
        let folded = FieldElement::reduce_degree(t);
        assert_eq!(folded[0], 19);
        assert_eq!(folded[8], 38);
        assert_eq!(folded[9], 5);
        assert_eq!(folded[10], 0);
    }

    #[test]
    fn reduce_coefficients_handles_negative_limbs() {
        // -1 in limb 0 is p - 1.
        let mut t = [0i64; 11];
        t[0] = -1;
        let minus_one = FieldElement::reduce_coefficients(t);
        assert_reduced(&minus_one);
        assert_eq!(&minus_one + &FieldElement::ONE, FieldElement::ZERO);

        // A carry out of the top limb wraps around as 19.
        let mut t = [0i64; 11];
        t[9] = 1 << 25;
        let wrapped = FieldElement::reduce_coefficients(t);
        let mut nineteen = FieldElement::ZERO;
        nineteen.0[0] = 19;
        assert_eq!(wrapped, nineteen);
    }

    #[test]
    fn conditional_swap() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&ASQ_BYTES);

        let (mut x, mut y) = (a, b);
        FieldElement::conditional_swap(&mut x, &mut y, Choice::from(0));
        assert_eq!(x.0, a.0);
        assert_eq!(y.0, b.0);

        FieldElement::conditional_swap(&mut x, &mut y, Choice::from(1));
        assert_eq!(x.0, b.0);
        assert_eq!(y.0, a.0);
    }

    #[test]
    fn conditional_assign() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&ASQ_BYTES);

        let mut x = a;
        x.conditional_assign(&b, Choice::from(0));
        assert_eq!(x.0, a.0);
        x.conditional_assign(&b, Choice::from(1));
        assert_eq!(x.0, b.0);
    }
}
