/*!
[`ServerSession`] runs the server side of the SRP-6a handshake: a small
runtime-checked state machine (`Fresh -> Started -> {VerifiedOk,
VerifiedFail}`) sequencing the [`RoutineTable`] formulas and holding the
`username`, `salt`, `v`, the private `b`, and the derived `K`. The server
never sees the password, only the verifier stored at registration.
*/
use log::debug;
use subtle::ConstantTimeEq;

use crate::config::SessionConfig;
use crate::primitives::{
    PasswordVerifier, PrivateKey, Proof, PublicKey, Salt, SessionKey, Username,
};
use crate::routines::RoutineTable;
use crate::{Result, Srp6Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Started,
    VerifiedOk,
    VerifiedFail,
}

/// The server side of one SRP-6a login. Not safe for concurrent use across
/// threads; construct one per login attempt.
pub struct ServerSession {
    config: SessionConfig,
    routines: RoutineTable,
    state: State,
    username: Username,
    salt: Salt,
    v: PasswordVerifier,
    b: PrivateKey,
    b_pub: PublicKey,
    session_key: Option<SessionKey>,
}

impl ServerSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            routines: Self::default_routines(),
            state: State::Fresh,
            username: Username::new(),
            salt: Salt::new(),
            v: PasswordVerifier::default(),
            b: PrivateKey::default(),
            b_pub: PublicKey::default(),
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
            username: Username::new(),
            salt: Salt::new(),
            v: PasswordVerifier::default(),
            b: PrivateKey::default(),
            b_pub: PublicKey::default(),
            session_key: None,
        }
    }

    /// The routine table a fresh session starts with. Identical to
    /// [`RoutineTable::default`] except when built with the `norand`
    /// feature, where `b` is pinned to the RFC 5054 appendix B test vector
    /// instead of drawn from the CSPRNG, so [`crate`]'s official-vector test
    /// can reproduce `B` byte-for-byte.
    fn default_routines() -> RoutineTable {
        #[cfg(feature = "norand")]
        {
            let mut routines = RoutineTable::default();
            routines.random_exponent =
                Box::new(|_| PrivateKey::from_bytes_be(&crate::protocol_details::testdata::B_PRIVATE));
            routines
        }
        #[cfg(not(feature = "norand"))]
        RoutineTable::default()
    }

    /// Stores `(username, salt, v)`, draws a random `b` of `byteLen(N)`
    /// bytes, computes `k` and `B`, and returns `B`'s padded-to-`byteLen(N)`
    /// wire encoding.
    pub fn start_authentication(
        &mut self,
        username: &str,
        salt: &Salt,
        verifier: &[u8],
    ) -> Result<Vec<u8>> {
        if self.state != State::Fresh {
            return Err(Srp6Error::ProtocolMisuse);
        }
        let group = self.config.group.group();
        let l = group.byte_len();
        let v = PasswordVerifier::from_bytes_be(verifier);
        let b = (self.routines.random_exponent)(l);
        let k = (self.routines.compute_k)(self.config.digest, group, self.config.flags);
        let b_pub = (self.routines.compute_b_pub)(group, &v, &k, &b);

        self.username = username.to_owned();
        self.salt = salt.clone();
        self.v = v;
        self.b = b;
        self.b_pub = b_pub.clone();
        self.state = State::Started;
        debug!("server started authentication for {username}");
        Ok(b_pub.to_bytes_be(l))
    }

    /// Consumes the client's `A` and `M1`, runs the server safety check,
    /// computes `u`, `K`, and the expected `M1`, and compares it
    /// constant-time against the one received. On match, also computes and
    /// returns `M2`. Returns `(false, None)` (not an error) on a safety
    /// check failure or `M1` mismatch, per the propagation policy: callers
    /// must not branch on why authentication failed.
    pub fn verify_session(&mut self, a_bytes: &[u8], m1_bytes: &[u8]) -> Result<(bool, Option<Proof>)> {
        if self.state != State::Started {
            return Err(Srp6Error::ProtocolMisuse);
        }
        let group = self.config.group.group();
        let a_pub = PublicKey::from_bytes_be(a_bytes);
        if !(self.routines.server_safety_check)(group, &a_pub) {
            self.state = State::VerifiedFail;
            return Ok((false, None));
        }
        let u = (self.routines.compute_u)(
            self.config.digest,
            group,
            &a_pub,
            &self.b_pub,
            self.config.flags,
        );
        let s = (self.routines.compute_s_server)(group, &a_pub, &self.v, &u, &self.b);
        let session_key = (self.routines.compute_session_key)(self.config.digest, &s);
        let expected_m1 = (self.routines.compute_m1)(
            self.config.digest,
            group,
            &self.username,
            &self.salt,
            &a_pub,
            &self.b_pub,
            &session_key,
            self.config.flags,
        );
        if !bool::from(expected_m1.ct_eq(m1_bytes)) {
            self.state = State::VerifiedFail;
            return Ok((false, None));
        }
        let m2 = (self.routines.compute_m2)(
            self.config.digest,
            group,
            &a_pub,
            &expected_m1,
            &session_key,
            self.config.flags,
        );
        debug!("server verified session for {}", self.username);
        self.session_key = Some(session_key);
        self.state = State::VerifiedOk;
        Ok((true, Some(m2)))
    }

    /// Minimally-encoded `K`; empty before [`Self::verify_session`]
    /// succeeds.
    pub fn session_key(&self) -> Vec<u8> {
        self.session_key
            .as_ref()
            .map(|k| k.to_vec())
            .unwrap_or_default()
    }
}

impl Default for ServerSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
