// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// Derived from curve25519-donna, Copyright 2008 Google Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Adam Langley <agl@imperialviolet.org>

//! Conversion between 32-byte little-endian strings and `FieldElement`s.

use subtle::Choice;
use subtle::ConstantTimeEq;
use subtle::ConstantTimeGreater;

use crate::field::FieldElement;
use crate::field::LIMBS;

/// Convert an array of (at least) four bytes into an i64.
#[inline]
fn load4(input: &[u8]) -> i64 {
       (input[0] as i64)
    | ((input[1] as i64) << 8)
    | ((input[2] as i64) << 16)
    | ((input[3] as i64) << 24)
}

/// Width in bits of limb `i`.
#[inline(always)]
const fn limb_bits(i: usize) -> u32 {
    if i & 1 == 1 {
        25
    } else {
        26
    }
}

/// Carry every limb into its width, flooring, so each ends up
/// non-negative.  The carry out of limb 9 wraps back into limb 0 as 19.
///
/// Carries are arithmetic shifts, so negative limbs borrow and oversized
/// limbs carry without a branch on either.
fn carry_pass(h: &mut [i32; LIMBS]) {
    for i in 0..LIMBS - 1 {
        let bits = limb_bits(i);
        let carry = h[i] >> bits;
        h[i] -= carry << bits;
        h[i + 1] += carry;
    }
    let carry = h[9] >> 25;
    h[9] -= carry << 25;
    h[0] += carry * 19;
}

impl FieldElement {
    /// Load a `FieldElement` from the low 255 bits of a 256-bit input.
    ///
    /// The limb boundaries are not byte aligned, so successive 4-byte
    /// reads overlap.
    ///
    /// # Warning
    ///
    /// This function does not check that the input used the canonical
    /// representative.  It masks the high bit, but it will happily
    /// decode 2^255 - 18 to 1.
    #[rustfmt::skip]
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        FieldElement([
            (load4(&bytes[ 0..])     ) & 0x3ff_ffff,
            (load4(&bytes[ 3..]) >> 2) & 0x1ff_ffff,
            (load4(&bytes[ 6..]) >> 3) & 0x3ff_ffff,
            (load4(&bytes[ 9..]) >> 5) & 0x1ff_ffff,
            (load4(&bytes[12..]) >> 6) & 0x3ff_ffff,
            (load4(&bytes[16..])     ) & 0x1ff_ffff,
            (load4(&bytes[19..]) >> 1) & 0x3ff_ffff,
            (load4(&bytes[22..]) >> 3) & 0x1ff_ffff,
            (load4(&bytes[25..]) >> 4) & 0x3ff_ffff,
            (load4(&bytes[28..]) >> 6) & 0x1ff_ffff,
        ])
    }

    /// Serialize this `FieldElement` to a 32-byte array.  The encoding is
    /// canonical.
    ///
    /// A coefficient reduction runs first, so any element the arithmetic
    /// produces (including unreduced sums) may be passed in.  That
    /// reduction may leave a limb at exactly its width; `contract` carries
    /// it.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        self.reduce().contract()
    }

    /// Pack a fully reduced element into its canonical encoding.
    ///
    /// # Preconditions
    ///
    /// * every limb of magnitude at most 2^26, as left by a coefficient
    ///   reduction.
    #[rustfmt::skip]
    fn contract(&self) -> [u8; 32] {
        let mut h = [0i32; LIMBS];
        for i in 0..LIMBS {
            h[i] = self.0[i] as i32;
        }

        // After the first pass limbs 1..9 are in range and h[0] is in
        // range plus 19 times the carry out of limb 9.  The second pass
        // carries out of limb 9 only after rippling through limbs 1..9,
        // and the last 0-to-1 step settles whatever that leaves in h[0].
        carry_pass(&mut h);
        carry_pass(&mut h);

        let carry = h[0] >> 26;
        h[0] -= carry << 26;
        h[1] += carry;

        // h is now in [0, 2^255).  It is at least p exactly when
        // h[1..9] are all ones and h[0] >= 2^26 - 19; subtract p then.
        let mut is_high: Choice = !(0x3ff_ffed_u32).ct_gt(&(h[0] as u32));
        for i in 1..LIMBS {
            let top = (1i32 << limb_bits(i)) - 1;
            is_high &= h[i].ct_eq(&top);
        }
        let mask = -(is_high.unwrap_u8() as i32);
        h[0] -= mask & 0x3ff_ffed;
        for i in 1..LIMBS {
            h[i] -= mask & ((1i32 << limb_bits(i)) - 1);
        }

        let mut s = [0u8; 32];
        s[ 0] =  (h[0]      ) as u8;
        s[ 1] =  (h[0] >>  8) as u8;
        s[ 2] =  (h[0] >> 16) as u8;
        s[ 3] = ((h[0] >> 24) | (h[1] << 2)) as u8;
        s[ 4] =  (h[1] >>  6) as u8;
        s[ 5] =  (h[1] >> 14) as u8;
        s[ 6] = ((h[1] >> 22) | (h[2] << 3)) as u8;
        s[ 7] =  (h[2] >>  5) as u8;
        s[ 8] =  (h[2] >> 13) as u8;
        s[ 9] = ((h[2] >> 21) | (h[3] << 5)) as u8;
        s[10] =  (h[3] >>  3) as u8;
        s[11] =  (h[3] >> 11) as u8;
        s[12] = ((h[3] >> 19) | (h[4] << 6)) as u8;
        s[13] =  (h[4] >>  2) as u8;
        s[14] =  (h[4] >> 10) as u8;
        s[15] =  (h[4] >> 18) as u8;
        s[16] =  (h[5]      ) as u8;
        s[17] =  (h[5] >>  8) as u8;
        s[18] =  (h[5] >> 16) as u8;
        s[19] = ((h[5] >> 24) | (h[6] << 1)) as u8;
        s[20] =  (h[6] >>  7) as u8;
        s[21] =  (h[6] >> 15) as u8;
        s[22] = ((h[6] >> 23) | (h[7] << 3)) as u8;
        s[23] =  (h[7] >>  5) as u8;
        s[24] =  (h[7] >> 13) as u8;
        s[25] = ((h[7] >> 21) | (h[8] << 4)) as u8;
        s[26] =  (h[8] >>  4) as u8;
        s[27] =  (h[8] >> 12) as u8;
        s[28] = ((h[8] >> 20) | (h[9] << 6)) as u8;
        s[29] =  (h[9] >>  2) as u8;
        s[30] =  (h[9] >> 10) as u8;
        s[31] =  (h[9] >> 18) as u8;

        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }
}
