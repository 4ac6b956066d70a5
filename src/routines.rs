/*!
The eleven pure functions that realise the SRP-6a formulas, plus the two
mandatory safety checks, collected into a [`RoutineTable`] the caller may
partially override before a session's first protocol call.

This is the Rust rendering of the original implementation's `std::function`
member table: composition over inheritance. Each field is a boxed closure
constructed to the default below; replace a field to inject a fixed
ephemeral value in tests, or to experiment with a non-standard profile.
*/
use zeroize::Zeroizing;

use crate::big_number::BigNumber;
use crate::digest::{hash, DigestKind};
use crate::flags::Flags;
use crate::group::Group;
use crate::primitives::{
    MultiplierParameter, PasswordVerifier, PrivateExponent, PrivateKey, Proof, PublicKey, Salt,
    Scrambler, SessionKey, SessionSecret, UsernameRef,
};

fn enc(x: &BigNumber, minimal: bool, pad_width: usize) -> Vec<u8> {
    if minimal {
        x.to_bytes_be(0)
    } else {
        x.to_bytes_be(pad_width)
    }
}

/// `k = H(N, g)`, padded unless [`Flags::SKIP_ZEROES_K_U_X`] is set.
pub fn default_compute_k(digest: DigestKind, group: &Group, flags: Flags) -> MultiplierParameter {
    let minimal = flags.contains(Flags::SKIP_ZEROES_K_U_X);
    let l = group.byte_len();
    let n_enc = enc(&group.n, minimal, l);
    let g_enc = enc(&group.g, minimal, l);
    MultiplierParameter::from_bytes_be(&hash(digest, &[&n_enc, &g_enc]))
}

/// `x = H(s || H(I || ":" || P))`, dropping `I` when
/// [`Flags::NO_USERNAME_IN_X`] is set.
pub fn default_compute_x(
    digest: DigestKind,
    username: UsernameRef,
    password: &str,
    salt: &Salt,
    flags: Flags,
) -> PrivateExponent {
    let inner = if flags.contains(Flags::NO_USERNAME_IN_X) {
        hash(digest, &[b":", password.as_bytes()])
    } else {
        hash(digest, &[username.as_bytes(), b":", password.as_bytes()])
    };
    PrivateExponent::from_bytes_be(&hash(digest, &[salt.as_slice(), &inner]))
}

/// `A = g^a mod N` (and, with the same formula, `v = g^x mod N`).
pub fn default_compute_pubkey(group: &Group, exponent: &PrivateKey) -> PublicKey {
    group.g.modpow(exponent, &group.n)
}

/// `B = (k*v + g^b) mod N`.
pub fn default_compute_b_pub(
    group: &Group,
    v: &PasswordVerifier,
    k: &MultiplierParameter,
    b: &PrivateKey,
) -> PublicKey {
    let kv = k.modmul(v, &group.n);
    let g_b = group.g.modpow(b, &group.n);
    kv.modadd(&g_b, &group.n)
}

/// `u = H(enc(A) || enc(B))`.
pub fn default_compute_u(
    digest: DigestKind,
    group: &Group,
    a_pub: &PublicKey,
    b_pub: &PublicKey,
    flags: Flags,
) -> Scrambler {
    let minimal = flags.contains(Flags::SKIP_ZEROES_K_U_X);
    let l = group.byte_len();
    let a_enc = enc(a_pub, minimal, l);
    let b_enc = enc(b_pub, minimal, l);
    Scrambler::from_bytes_be(&hash(digest, &[&a_enc, &b_enc]))
}

/// `S = (B - k*g^x)^(a + u*x) mod N`, the client's path to the premaster
/// secret. The subtraction is reduced mod N before exponentiation.
pub fn default_compute_s_client(
    group: &Group,
    b_pub: &PublicKey,
    k: &MultiplierParameter,
    x: &PrivateExponent,
    a: &PrivateKey,
    u: &Scrambler,
) -> SessionSecret {
    let g_x = group.g.modpow(x, &group.n);
    let k_gx = k.modmul(&g_x, &group.n);
    let base = b_pub.sub_mod(&k_gx, &group.n);
    let exponent = a.add(&u.mul(x));
    base.modpow(&exponent, &group.n)
}

/// `S = (A * v^u)^b mod N`, the server's path to the premaster secret.
pub fn default_compute_s_server(
    group: &Group,
    a_pub: &PublicKey,
    v: &PasswordVerifier,
    u: &Scrambler,
    b: &PrivateKey,
) -> SessionSecret {
    let v_u = v.modpow(u, &group.n);
    let base = a_pub.modmul(&v_u, &group.n);
    base.modpow(b, &group.n)
}

/// `K = H(toBytes(S, minimal))`. This crate follows the spec's normative
/// single-hash construction rather than the classic RFC 2945 SHA-interleave.
pub fn default_compute_session_key(digest: DigestKind, s: &SessionSecret) -> SessionKey {
    Zeroizing::new(hash(digest, &[&s.to_bytes_be(0)]))
}

/// `M1 = H((H(N) xor H(g)) || H(I) || s || enc(A) || enc(B) || K)`.
#[allow(clippy::too_many_arguments)]
pub fn default_compute_m1(
    digest: DigestKind,
    group: &Group,
    username: UsernameRef,
    salt: &Salt,
    a_pub: &PublicKey,
    b_pub: &PublicKey,
    session_key: &SessionKey,
    flags: Flags,
) -> Proof {
    let minimal = flags.contains(Flags::SKIP_ZEROES_M1_M2);
    let l = group.byte_len();
    let h_n = hash(digest, &[&enc(&group.n, minimal, l)]);
    let h_g = hash(digest, &[&enc(&group.g, minimal, l)]);
    let xor_ng: Vec<u8> = h_n.iter().zip(h_g.iter()).map(|(a, b)| a ^ b).collect();
    let h_i = hash(digest, &[username.as_bytes()]);
    let a_enc = enc(a_pub, minimal, l);
    let b_enc = enc(b_pub, minimal, l);
    hash(
        digest,
        &[&xor_ng, &h_i, salt.as_slice(), &a_enc, &b_enc, session_key.as_slice()],
    )
}

/// `M2 = H(enc(A) || M1 || K)`.
pub fn default_compute_m2(
    digest: DigestKind,
    group: &Group,
    a_pub: &PublicKey,
    m1: &Proof,
    session_key: &SessionKey,
    flags: Flags,
) -> Proof {
    let minimal = flags.contains(Flags::SKIP_ZEROES_M1_M2);
    let a_enc = enc(a_pub, minimal, group.byte_len());
    hash(digest, &[&a_enc, m1.as_slice(), session_key.as_slice()])
}

/// Draws `a` or `b`: uniformly random, exactly `byte_len` bytes.
pub fn default_random_exponent(byte_len: usize) -> PrivateKey {
    PrivateKey::random_of_byte_len(byte_len)
}

/// Client safety check on receiving `B`: `B mod N != 0` and `u != 0`.
pub fn default_client_safety_check(group: &Group, b_pub: &PublicKey, u: &Scrambler) -> bool {
    !b_pub.rem(&group.n).is_zero() && !u.is_zero()
}

/// Server safety check on receiving `A`: `A mod N != 0`.
pub fn default_server_safety_check(group: &Group, a_pub: &PublicKey) -> bool {
    !a_pub.rem(&group.n).is_zero()
}

pub type RandomExponentFn = Box<dyn Fn(usize) -> PrivateKey + Send + Sync>;
pub type ComputePubkeyFn = Box<dyn Fn(&Group, &PrivateKey) -> PublicKey + Send + Sync>;
pub type ComputeBPubFn = Box<
    dyn Fn(&Group, &PasswordVerifier, &MultiplierParameter, &PrivateKey) -> PublicKey
        + Send
        + Sync,
>;
pub type ComputeKFn = Box<dyn Fn(DigestKind, &Group, Flags) -> MultiplierParameter + Send + Sync>;
pub type ComputeXFn = Box<
    dyn Fn(DigestKind, UsernameRef, &str, &Salt, Flags) -> PrivateExponent + Send + Sync,
>;
pub type ComputeUFn = Box<
    dyn Fn(DigestKind, &Group, &PublicKey, &PublicKey, Flags) -> Scrambler + Send + Sync,
>;
pub type ComputeSClientFn = Box<
    dyn Fn(
            &Group,
            &PublicKey,
            &MultiplierParameter,
            &PrivateExponent,
            &PrivateKey,
            &Scrambler,
        ) -> SessionSecret
        + Send
        + Sync,
>;
pub type ComputeSServerFn = Box<
    dyn Fn(&Group, &PublicKey, &PasswordVerifier, &Scrambler, &PrivateKey) -> SessionSecret
        + Send
        + Sync,
>;
pub type ComputeSessionKeyFn = Box<dyn Fn(DigestKind, &SessionSecret) -> SessionKey + Send + Sync>;
pub type ComputeM1Fn = Box<
    dyn Fn(
            DigestKind,
            &Group,
            UsernameRef,
            &Salt,
            &PublicKey,
            &PublicKey,
            &SessionKey,
            Flags,
        ) -> Proof
        + Send
        + Sync,
>;
pub type ComputeM2Fn = Box<
    dyn Fn(DigestKind, &Group, &PublicKey, &Proof, &SessionKey, Flags) -> Proof + Send + Sync,
>;
pub type ClientSafetyCheckFn = Box<dyn Fn(&Group, &PublicKey, &Scrambler) -> bool + Send + Sync>;
pub type ServerSafetyCheckFn = Box<dyn Fn(&Group, &PublicKey) -> bool + Send + Sync>;

/// The eleven formula routines plus the two safety checks, each independently
/// overridable. Built with [`RoutineTable::default`] unless the caller wants
/// to substitute a step (most commonly the random-exponent draw, to pin `a`
/// or `b` in a test).
pub struct RoutineTable {
    pub random_exponent: RandomExponentFn,
    pub compute_pubkey: ComputePubkeyFn,
    pub compute_b_pub: ComputeBPubFn,
    pub compute_k: ComputeKFn,
    pub compute_x: ComputeXFn,
    pub compute_u: ComputeUFn,
    pub compute_s_client: ComputeSClientFn,
    pub compute_s_server: ComputeSServerFn,
    pub compute_session_key: ComputeSessionKeyFn,
    pub compute_m1: ComputeM1Fn,
    pub compute_m2: ComputeM2Fn,
    pub client_safety_check: ClientSafetyCheckFn,
    pub server_safety_check: ServerSafetyCheckFn,
}

impl Default for RoutineTable {
    fn default() -> Self {
        Self {
            random_exponent: Box::new(default_random_exponent),
            compute_pubkey: Box::new(default_compute_pubkey),
            compute_b_pub: Box::new(default_compute_b_pub),
            compute_k: Box::new(default_compute_k),
            compute_x: Box::new(default_compute_x),
            compute_u: Box::new(default_compute_u),
            compute_s_client: Box::new(default_compute_s_client),
            compute_s_server: Box::new(default_compute_s_server),
            compute_session_key: Box::new(default_compute_session_key),
            compute_m1: Box::new(default_compute_m1),
            compute_m2: Box::new(default_compute_m2),
            client_safety_check: Box::new(default_client_safety_check),
            server_safety_check: Box::new(default_server_safety_check),
        }
    }
}
