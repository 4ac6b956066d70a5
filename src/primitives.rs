/*!
Type aliases for the SRP-6a variables, so the rest of the crate can read
like the formulas in [RFC 2945] instead of a wall of `BigNumber`.

[RFC 2945]: https://datatracker.ietf.org/doc/html/rfc2945
*/
use crate::big_number::BigNumber;

/// A large safe prime, `N = 2q+1` where `q` is prime. All arithmetic happens
/// modulo `N`.
#[doc(alias = "N")]
pub type PrimeModulus = BigNumber;

/// A generator of the prime field of order `N-1`.
#[doc(alias = "g")]
pub type Generator = BigNumber;

/// A user's salt, `s`. Kept as raw bytes rather than a [`BigNumber`]: the
/// spec treats salt as opaque (no canonicalisation), and a `BigNumber`
/// round-trip would silently drop a leading zero byte, which a `BigNumber`
/// cannot tell apart from "no byte at all".
#[doc(alias = "s")]
pub type Salt = Vec<u8>;

/// A public ephemeral value: `A` (client) or `B` (server).
#[doc(alias("A", "B"))]
pub type PublicKey = BigNumber;

/// A private ephemeral exponent: `a` (client) or `b` (server).
#[doc(alias("a", "b"))]
pub type PrivateKey = BigNumber;

/// The password verifier `v = g^x mod N`, stored server-side.
#[doc(alias = "v")]
pub type PasswordVerifier = BigNumber;

/// The multiplier parameter `k = H(N, g)`.
#[doc(alias = "k")]
pub type MultiplierParameter = BigNumber;

/// The random scrambling parameter `u = H(A, B)`.
#[doc(alias = "u")]
pub type Scrambler = BigNumber;

/// The private exponent `x`, derived from `(I, P, s)`.
#[doc(alias = "x")]
pub type PrivateExponent = BigNumber;

/// The premaster secret `S`, identical on both sides after a successful run.
#[doc(alias = "S")]
pub type SessionSecret = BigNumber;

/// `I`, the username, as an owned [`String`].
#[doc(alias = "I")]
pub type Username = String;
/// `I`, the username, borrowed.
pub type UsernameRef<'a> = &'a str;
/// `P`, the cleartext password.
#[doc(alias = "P")]
pub type ClearTextPassword = str;

/// `M1`/`M2`, a digest-sized proof value.
#[doc(alias("M1", "M2"))]
pub type Proof = Vec<u8>;

/// `K`, the session key: `H(S)` encoded minimally. Zeroised on drop since it
/// is retained for the life of the session.
#[doc(alias = "K")]
pub type SessionKey = zeroize::Zeroizing<Vec<u8>>;
