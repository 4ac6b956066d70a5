/*!
[`VerifierGenerator`] turns a `(username, password, salt)` triple into the
one-way verifier `v` a server stores at registration, in place of the
password. It is stateless beyond its [`SessionConfig`] and [`RoutineTable`];
`generate` is a pure function of its inputs.
*/
use log::debug;

use crate::big_number::BigNumber;
use crate::config::SessionConfig;
use crate::primitives::{PasswordVerifier, Salt, UsernameRef};
use crate::routines::RoutineTable;

/// Computes password verifiers for a fixed [`SessionConfig`].
pub struct VerifierGenerator {
    config: SessionConfig,
    routines: RoutineTable,
}

impl VerifierGenerator {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            routines: RoutineTable::default(),
        }
    }

    /// Builds a generator with a caller-supplied routine table, e.g. to pin
    /// the x-routine for deterministic tests.
    pub fn with_routines(config: SessionConfig, routines: RoutineTable) -> Self {
        Self { config, routines }
    }

    /// `v = g^x mod N` for a caller-supplied salt, returned with minimal-width
    /// encoding.
    pub fn generate(&self, username: UsernameRef, password: &str, salt: &Salt) -> Vec<u8> {
        let group = self.config.group.group();
        let x = (self.routines.compute_x)(
            self.config.digest,
            username,
            password,
            salt,
            self.config.flags,
        );
        let v: PasswordVerifier = (self.routines.compute_pubkey)(group, &x);
        debug!("generated verifier for {username}");
        v.to_bytes_be(0)
    }

    /// Draws a random salt of `salt_len` bytes from the same CSPRNG the
    /// ephemeral exponents use, then generates alongside it.
    pub fn generate_with_salt(
        &self,
        username: UsernameRef,
        password: &str,
        salt_len: usize,
    ) -> (Salt, Vec<u8>) {
        let salt = BigNumber::random_of_byte_len(salt_len).to_bytes_be(salt_len);
        let v = self.generate(username, password, &salt);
        (salt, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestKind;
    use crate::flags::Flags;
    use crate::group::GroupSize;

    #[test]
    fn generate_is_deterministic() {
        let config = SessionConfig::new(GroupSize::Bits2048, DigestKind::Sha256, Flags::NONE);
        let gen = VerifierGenerator::new(config);
        let salt = vec![1, 2, 3, 4, 5];
        let v1 = gen.generate("alice", "hunter2", &salt);
        let v2 = gen.generate("alice", "hunter2", &salt);
        assert_eq!(v1, v2);
    }

    #[test]
    fn generate_with_salt_draws_distinct_salts() {
        let config = SessionConfig::default();
        let gen = VerifierGenerator::new(config);
        let (salt_a, v_a) = gen.generate_with_salt("alice", "hunter2", 16);
        let (salt_b, v_b) = gen.generate_with_salt("alice", "hunter2", 16);
        assert_ne!(salt_a, salt_b, "two draws collided; broken RNG");
        assert_ne!(v_a, v_b);
    }

    #[test]
    fn no_username_in_x_changes_the_verifier() {
        let salt = vec![0xaa; 16];
        let standard = SessionConfig::new(GroupSize::Bits2048, DigestKind::Sha256, Flags::NONE);
        let no_user = SessionConfig::new(
            GroupSize::Bits2048,
            DigestKind::Sha256,
            Flags::NO_USERNAME_IN_X,
        );
        let v1 = VerifierGenerator::new(standard).generate("alice", "hunter2", &salt);
        let v2 = VerifierGenerator::new(no_user).generate("alice", "hunter2", &salt);
        assert_ne!(v1, v2);
    }
}
