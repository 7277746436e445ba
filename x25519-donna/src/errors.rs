// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// See LICENSE for licensing information.

//! Errors which may occur when handing byte buffers to the key agreement
//! functions, or when drawing a fresh private key.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur while clamping, deriving public keys, computing
/// shared secrets, or generating private keys.
///
/// Note that a peer public key which is not a valid curve point is *not*
/// an error: the computation still completes (see
/// [`SharedSecret::was_contributory`](crate::SharedSecret::was_contributory)).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// An argument had the wrong length in bytes.
    InvalidArgument {
        /// Which argument was rejected.
        name: &'static str,
        /// The length in bytes it must have.
        expected: usize,
        /// The length in bytes it was given.
        actual: usize,
    },
    /// The random number generator failed to produce key material.
    Rng,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidArgument {
                name,
                expected,
                actual,
            } => write!(
                f,
                "{} must be {} bytes in length (but was {} bytes long)",
                name, expected, actual
            ),
            Error::Rng => write!(f, "random number generator failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::*;

    #[test]
    fn display_names_the_argument() {
        use std::string::ToString;

        let err = Error::InvalidArgument {
            name: "public key",
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "public key must be 32 bytes in length (but was 31 bytes long)"
        );
        assert_eq!(Error::Rng.to_string(), "random number generator failed");
    }
}
