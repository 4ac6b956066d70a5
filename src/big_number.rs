/*!
[`BigNumber`] is the facade the rest of the crate uses to do modular
arithmetic and big-endian byte encoding. Everything funnels through here so
the core routines never touch `num_bigint` directly.

Unlike the ancestor of this module (which stored bytes little-endian for a
WoW-flavored client), every encoding here is big-endian and padding-aware,
because the padded-vs-minimal distinction is load-bearing for interoperability.
*/
use std::convert::TryFrom;
use std::fmt::{Debug, Display, Formatter};

use num_bigint::BigUint;
use num_traits::Zero as _;
use rand::{thread_rng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

#[derive(derive_more::Error, derive_more::Display, Debug)]
pub enum BigNumberError {
    #[display("invalid hex string")]
    InvalidHexStr,
}

/// A non-negative big integer, encoded big-endian wherever it touches bytes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigNumber(BigUint);

impl Default for BigNumber {
    fn default() -> Self {
        Self(BigUint::zero())
    }
}

impl BigNumber {
    /// Big-endian decode. Leading zero bytes do not affect the value.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Big-endian encode, left-padded with zero bytes to
    /// `max(min_width, minimal width)`. `min_width == 0` yields the minimal
    /// encoding.
    pub fn to_bytes_be(&self, min_width: usize) -> Vec<u8> {
        let raw = self.0.to_bytes_be();
        if raw.len() >= min_width {
            return raw;
        }
        let mut padded = vec![0_u8; min_width];
        padded[min_width - raw.len()..].copy_from_slice(&raw);
        padded
    }

    /// The minimal big-endian width of this value, in bytes (0 for zero).
    pub fn byte_len(&self) -> usize {
        self.0.to_bytes_be().len()
    }

    /// Draws a uniformly random non-negative integer whose minimal big-endian
    /// encoding is exactly `n` bytes (`n == 0` yields zero). The top bit may
    /// be zero; this is a byte-length guarantee, not a bit-length one. Rejects
    /// and redraws on a zero top byte so the width is exact, not merely an
    /// upper bound.
    pub fn random_of_byte_len(n: usize) -> Self {
        if n == 0 {
            return Self::default();
        }
        let mut rng = thread_rng();
        let mut buf = vec![0_u8; n];
        loop {
            rng.fill_bytes(&mut buf);
            if buf[0] != 0 {
                return Self(BigUint::from_bytes_be(&buf));
            }
        }
    }

    pub fn modpow(&self, exponent: &Self, modulus: &Self) -> Self {
        Self(self.0.modpow(&exponent.0, &modulus.0))
    }

    pub fn modmul(&self, rhs: &Self, modulus: &Self) -> Self {
        Self((&self.0 * &rhs.0) % &modulus.0)
    }

    pub fn modadd(&self, rhs: &Self, modulus: &Self) -> Self {
        Self((&self.0 + &rhs.0) % &modulus.0)
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Self(&self.0 * &rhs.0)
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Self(&self.0 + &rhs.0)
    }

    /// Non-negative subtraction; panics on underflow, since SRP-6a never
    /// subtracts outside a prior modular reduction (see [`Self::sub_mod`]).
    pub fn sub(&self, rhs: &Self) -> Self {
        Self(&self.0 - &rhs.0)
    }

    /// `(self - rhs) mod modulus`, valid for any self, rhs in `[0, modulus)`.
    /// This is the one subtraction SRP-6a performs that can go negative
    /// before reduction (`B - k*g^x`).
    pub fn sub_mod(&self, rhs: &Self, modulus: &Self) -> Self {
        if &self.0 >= &rhs.0 {
            Self((&self.0 - &rhs.0) % &modulus.0)
        } else {
            Self((&modulus.0 - &rhs.0 + &self.0) % &modulus.0)
        }
    }

    pub fn rem(&self, modulus: &Self) -> Self {
        Self(&self.0 % &modulus.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Zeroize for BigNumber {
    fn zeroize(&mut self) {
        // `BigUint` does not expose its limb storage for scrubbing, so the
        // best this facade can do is drop the old value and replace it with
        // zero; see DESIGN.md for the same caveat this crate's grounding
        // example (an SRP client using `zeroize`) documents for `BigUint`.
        self.0 = BigUint::zero();
    }
}

impl Drop for BigNumber {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<u32> for BigNumber {
    fn from(n: u32) -> Self {
        Self(BigUint::from(n))
    }
}

impl From<&BigNumber> for String {
    fn from(x: &BigNumber) -> Self {
        hex::encode_upper(x.0.to_bytes_be())
    }
}

impl From<BigNumber> for String {
    fn from(x: BigNumber) -> Self {
        (&x).into()
    }
}

impl TryFrom<&str> for BigNumber {
    type Error = BigNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let padded = if value.len() % 2 != 0 {
            format!("0{value}")
        } else {
            value.to_owned()
        };
        let bytes = hex::decode(padded).map_err(|_| BigNumberError::InvalidHexStr)?;
        Ok(Self::from_bytes_be(&bytes))
    }
}

impl TryFrom<String> for BigNumber {
    type Error = BigNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl Debug for BigNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigNumber(\"{self}\")")
    }
}

impl Display for BigNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s: String = self.into();
        write!(f, "{s}")
    }
}
