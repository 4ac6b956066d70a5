/*!
[`SessionConfig`] is the entire configuration surface of this library: which
safe-prime group, which digest, and which interoperability flags. There is
no file or environment configuration layer — a protocol library has nothing
to read at startup beyond what the caller passes in.
*/
use crate::digest::DigestKind;
use crate::flags::Flags;
use crate::group::GroupSize;

/// `(group, digestKind, flags)` — set before the first protocol call on a
/// role and not meant to change mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    pub group: GroupSize,
    pub digest: DigestKind,
    pub flags: Flags,
}

impl SessionConfig {
    pub fn new(group: GroupSize, digest: DigestKind, flags: Flags) -> Self {
        Self {
            group,
            digest,
            flags,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            group: GroupSize::default(),
            digest: DigestKind::default(),
            flags: Flags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_2048_sha256_no_flags() {
        let config = SessionConfig::default();
        assert_eq!(config.group, GroupSize::Bits2048);
        assert_eq!(config.digest, DigestKind::Sha256);
        assert_eq!(config.flags, Flags::NONE);
    }
}
