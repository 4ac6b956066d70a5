/*!
[`ClientSession`] runs the client side of the SRP-6a handshake: a small
runtime-checked state machine (`Fresh -> Started -> Challenged ->
{VerifiedOk, VerifiedFail}`) sequencing the [`RoutineTable`] formulas and
holding the private `a`, the derived `K`, and the proof `M1`.
*/
use log::debug;
use subtle::ConstantTimeEq;

use crate::config::SessionConfig;
use crate::primitives::{PrivateKey, Proof, PublicKey, Salt, SessionKey, UsernameRef};
use crate::routines::RoutineTable;
use crate::{Result, Srp6Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Started,
    Challenged,
    VerifiedOk,
    VerifiedFail,
}

/// The client side of one SRP-6a login. Not safe for concurrent use across
/// threads; construct one per login attempt.
pub struct ClientSession {
    config: SessionConfig,
    routines: RoutineTable,
    state: State,
    a: PrivateKey,
    a_pub: PublicKey,
    b_pub: PublicKey,
    m1: Proof,
    session_key: Option<SessionKey>,
}

impl ClientSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            routines: Self::default_routines(),
            state: State::Fresh,
            a: PrivateKey::default(),
            a_pub: PublicKey::default(),
            b_pub: PublicKey::default(),
            m1: Proof::new(),
            session_key: None,
        }
    }

    /// Builds a session with a caller-supplied routine table, e.g. to
    /// override `random_exponent` for deterministic tests.
    pub fn with_routines(config: SessionConfig, routines: RoutineTable) -> Self {
        Self {
            config,
            routines,
            state: State::Fresh,
            a: PrivateKey::default(),
            a_pub: PublicKey::default(),
            b_pub: PublicKey::default(),
            m1: Proof::new(),
            session_key: None,
        }
    }

    /// Draws a random `a` of `byteLen(N)` bytes, computes `A`, and returns
    /// its padded-to-`byteLen(N)` wire encoding.
    pub fn start_authentication(&mut self) -> Result<Vec<u8>> {
        if self.state != State::Fresh {
            return Err(Srp6Error::ProtocolMisuse);
        }
        let group = self.config.group.group();
        let l = group.byte_len();
        let a = (self.routines.random_exponent)(l);
        self.begin(a);
        self.state = State::Started;
        Ok(self.a_pub.to_bytes_be(l))
    }

    /// Identical to [`Self::start_authentication`] but takes a caller-supplied
    /// `a`, for deterministic tests. If `a_bytes` is empty or its minimal
    /// width isn't exactly `byteLen(N)`, falls back to a freshly drawn random
    /// `a` — silently, matching the pre-existing behaviour this hook
    /// preserves for compatibility.
    pub fn insecure_start_authentication(&mut self, a_bytes: &[u8]) -> Result<Vec<u8>> {
        if self.state != State::Fresh {
            return Err(Srp6Error::ProtocolMisuse);
        }
        let group = self.config.group.group();
        let l = group.byte_len();
        let candidate = PrivateKey::from_bytes_be(a_bytes);
        let a = if a_bytes.is_empty() || candidate.byte_len() != l {
            (self.routines.random_exponent)(l)
        } else {
            candidate
        };
        self.begin(a);
        self.state = State::Started;
        Ok(self.a_pub.to_bytes_be(l))
    }

    /// The routine table a fresh session starts with. Identical to
    /// [`RoutineTable::default`] except when built with the `norand`
    /// feature, where `a` is pinned to the RFC 5054 appendix B test vector
    /// instead of drawn from the CSPRNG, so [`crate`]'s official-vector test
    /// can reproduce `A` byte-for-byte.
    fn default_routines() -> RoutineTable {
        #[cfg(feature = "norand")]
        {
            let mut routines = RoutineTable::default();
            routines.random_exponent =
                Box::new(|_| PrivateKey::from_bytes_be(&crate::protocol_details::testdata::A_PRIVATE));
            routines
        }
        #[cfg(not(feature = "norand"))]
        RoutineTable::default()
    }

    fn begin(&mut self, a: PrivateKey) {
        let group = self.config.group.group();
        self.a_pub = (self.routines.compute_pubkey)(group, &a);
        self.a = a;
    }

    /// Consumes the server's `B`, runs the client safety check, and on
    /// success computes `K` and `M1`. Returns `Ok(None)` (not an error) if
    /// the safety check fails, per the propagation policy: callers must not
    /// branch on why authentication failed. `want_m2` lets a caller that
    /// wants to precompute its expected `M2` ask for it here instead of
    /// waiting for [`Self::verify_session`].
    pub fn process_challenge(
        &mut self,
        username: UsernameRef,
        password: &str,
        salt: &Salt,
        b_bytes: &[u8],
        want_m2: bool,
    ) -> Result<Option<(Proof, Option<Proof>)>> {
        if self.state != State::Started {
            return Err(Srp6Error::ProtocolMisuse);
        }
        match self.try_process_challenge(username, password, salt, b_bytes, want_m2) {
            Ok(result) => {
                self.state = State::Challenged;
                Ok(Some(result))
            }
            Err(Srp6Error::SafetyCheckFailed) => {
                self.state = State::VerifiedFail;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn try_process_challenge(
        &mut self,
        username: UsernameRef,
        password: &str,
        salt: &Salt,
        b_bytes: &[u8],
        want_m2: bool,
    ) -> Result<(Proof, Option<Proof>)> {
        let group = self.config.group.group();
        let b_pub = PublicKey::from_bytes_be(b_bytes);
        let u = (self.routines.compute_u)(
            self.config.digest,
            group,
            &self.a_pub,
            &b_pub,
            self.config.flags,
        );
        if !(self.routines.client_safety_check)(group, &b_pub, &u) {
            return Err(Srp6Error::SafetyCheckFailed);
        }
        let k = (self.routines.compute_k)(self.config.digest, group, self.config.flags);
        let x = (self.routines.compute_x)(
            self.config.digest,
            username,
            password,
            salt,
            self.config.flags,
        );
        let s = (self.routines.compute_s_client)(group, &b_pub, &k, &x, &self.a, &u);
        let session_key = (self.routines.compute_session_key)(self.config.digest, &s);
        let m1 = (self.routines.compute_m1)(
            self.config.digest,
            group,
            username,
            salt,
            &self.a_pub,
            &b_pub,
            &session_key,
            self.config.flags,
        );
        let m2 = want_m2.then(|| {
            (self.routines.compute_m2)(
                self.config.digest,
                group,
                &self.a_pub,
                &m1,
                &session_key,
                self.config.flags,
            )
        });
        debug!("client derived session key, a_pub={a_pub}, b_pub={b_pub}", a_pub = self.a_pub, b_pub = b_pub);
        self.b_pub = b_pub;
        self.m1 = m1.clone();
        self.session_key = Some(session_key);
        Ok((m1, m2))
    }

    /// Recomputes `M2` from the stored `(A, M1, K)` and compares it,
    /// constant-time, against `m2_bytes`.
    pub fn verify_session(&mut self, m2_bytes: &[u8]) -> Result<bool> {
        if self.state != State::Challenged {
            return Err(Srp6Error::ProtocolMisuse);
        }
        let group = self.config.group.group();
        let session_key = self
            .session_key
            .as_ref()
            .expect("session_key is set once state reaches Challenged");
        let expected = (self.routines.compute_m2)(
            self.config.digest,
            group,
            &self.a_pub,
            &self.m1,
            session_key,
            self.config.flags,
        );
        let ok = bool::from(expected.ct_eq(m2_bytes));
        self.state = if ok { State::VerifiedOk } else { State::VerifiedFail };
        Ok(ok)
    }

    /// Minimally-encoded `K`; empty before [`Self::process_challenge`]
    /// succeeds.
    pub fn session_key(&self) -> Vec<u8> {
        self.session_key
            .as_ref()
            .map(|k| k.to_vec())
            .unwrap_or_default()
    }
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::server::ServerSession;
    use crate::api::verifier::VerifierGenerator;

    #[test]
    fn out_of_order_calls_are_rejected() {
        let mut client = ClientSession::default();
        assert_eq!(
            client.process_challenge("u", "p", &vec![0u8; 4], &[1, 2, 3], false),
            Err(Srp6Error::ProtocolMisuse)
        );
        assert_eq!(client.verify_session(&[1, 2, 3]), Err(Srp6Error::ProtocolMisuse));
    }

    #[test]
    fn start_authentication_twice_is_protocol_misuse() {
        let mut client = ClientSession::default();
        client.start_authentication().unwrap();
        assert_eq!(client.start_authentication(), Err(Srp6Error::ProtocolMisuse));
    }

    #[test]
    fn safety_check_failure_yields_none_not_error() {
        let config = SessionConfig::default();
        let (salt, verifier) = VerifierGenerator::new(config).generate_with_salt("u", "p", 16);
        let mut server = ServerSession::new(config);
        server.start_authentication("u", &salt, &verifier).unwrap();

        let mut client = ClientSession::new(config);
        client.start_authentication().unwrap();
        let zero_b = vec![0u8; config.group.group().byte_len()];
        let result = client
            .process_challenge("u", "p", &salt, &zero_b, false)
            .unwrap();
        assert!(result.is_none());
        assert!(client.session_key().is_empty());
    }

    #[test]
    fn insecure_start_falls_back_on_wrong_width() {
        let mut client = ClientSession::default();
        let l = client.config.group.group().byte_len();
        let a_pub_fallback = client.insecure_start_authentication(&[]).unwrap();
        assert_eq!(a_pub_fallback.len(), l);

        let mut client2 = ClientSession::default();
        let too_short = vec![1u8; 4];
        let a_pub2 = client2.insecure_start_authentication(&too_short).unwrap();
        assert_eq!(a_pub2.len(), l);
        // freshly drawn a, not derived from the 4-byte input
        assert_ne!(client2.a.to_bytes_be(0), too_short);
    }
}
