/*!
The safe-prime (N, g) groups used by SRP-6a.

Values are the RFC 5054 appendix A constants. Rather than re-transcribing
multi-kilobit hex literals by hand — and risking a silent off-by-a-digit bug
nobody would ever notice until two independent implementations failed to
interoperate — this module sources the bytes from the `srp` crate's `groups`
module, which already carries them bit-exact for exactly this purpose.
*/
use std::sync::OnceLock;

use log::debug;

use crate::big_number::BigNumber;
use crate::primitives::{Generator, PrimeModulus};
use crate::{Result, Srp6Error};

/// One of the seven RFC 5054 key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GroupSize {
    Bits1024,
    Bits1536,
    Bits2048,
    Bits3072,
    Bits4096,
    Bits6144,
    Bits8192,
}

impl GroupSize {
    /// Maps a raw bit count onto a [`GroupSize`], or fails with [`Srp6Error::UnknownGroup`].
    ///
    /// This is the `GroupRegistry::group(bits)` operation: the enum above is the
    /// typed convenience, this is the raw entry point the spec describes.
    pub fn from_bits(bits: u32) -> Result<Self> {
        Ok(match bits {
            1024 => Self::Bits1024,
            1536 => Self::Bits1536,
            2048 => Self::Bits2048,
            3072 => Self::Bits3072,
            4096 => Self::Bits4096,
            6144 => Self::Bits6144,
            8192 => Self::Bits8192,
            _ => return Err(Srp6Error::UnknownGroup(bits)),
        })
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::Bits1024 => 1024,
            Self::Bits1536 => 1536,
            Self::Bits2048 => 2048,
            Self::Bits3072 => 3072,
            Self::Bits4096 => 4096,
            Self::Bits6144 => 6144,
            Self::Bits8192 => 8192,
        }
    }

    /// Returns the immutable, process-lifetime (N, g) pair for this size.
    pub fn group(self) -> &'static Group {
        fn cell() -> &'static [OnceLock<Group>; 7] {
            static CELLS: [OnceLock<Group>; 7] = [
                OnceLock::new(),
                OnceLock::new(),
                OnceLock::new(),
                OnceLock::new(),
                OnceLock::new(),
                OnceLock::new(),
                OnceLock::new(),
            ];
            &CELLS
        }

        let index = match self {
            Self::Bits1024 => 0,
            Self::Bits1536 => 1,
            Self::Bits2048 => 2,
            Self::Bits3072 => 3,
            Self::Bits4096 => 4,
            Self::Bits6144 => 5,
            Self::Bits8192 => 6,
        };

        cell()[index].get_or_init(|| {
            let group = Group::from_rfc5054(self);
            debug!("initialised {:?} group, byte_len={}", self, group.byte_len());
            group
        })
    }
}

impl Default for GroupSize {
    fn default() -> Self {
        Self::Bits2048
    }
}

/// An immutable safe-prime modulus `N` and generator `g`.
#[derive(Debug, Clone)]
pub struct Group {
    pub n: PrimeModulus,
    pub g: Generator,
}

impl Group {
    /// `byteLen(N)`, the canonical padding width for this group.
    pub fn byte_len(&self) -> usize {
        self.n.byte_len()
    }

    fn from_rfc5054(size: GroupSize) -> Self {
        use srp::groups::{G_1024, G_1536, G_2048, G_3072, G_4096, G_6144, G_8192};

        let (n, g) = match size {
            GroupSize::Bits1024 => (G_1024.n.to_bytes_be(), G_1024.g.to_bytes_be()),
            GroupSize::Bits1536 => (G_1536.n.to_bytes_be(), G_1536.g.to_bytes_be()),
            GroupSize::Bits2048 => (G_2048.n.to_bytes_be(), G_2048.g.to_bytes_be()),
            GroupSize::Bits3072 => (G_3072.n.to_bytes_be(), G_3072.g.to_bytes_be()),
            GroupSize::Bits4096 => (G_4096.n.to_bytes_be(), G_4096.g.to_bytes_be()),
            GroupSize::Bits6144 => (G_6144.n.to_bytes_be(), G_6144.g.to_bytes_be()),
            GroupSize::Bits8192 => (G_8192.n.to_bytes_be(), G_8192.g.to_bytes_be()),
        };

        Self {
            n: BigNumber::from_bytes_be(&n),
            g: BigNumber::from_bytes_be(&g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_seven_sizes_resolve() {
        for bits in [1024, 1536, 2048, 3072, 4096, 6144, 8192] {
            let size = GroupSize::from_bits(bits).unwrap();
            assert_eq!(size.bits(), bits);
            let group = size.group();
            assert_eq!(group.byte_len(), (bits / 8) as usize);
            assert!(!group.n.is_zero());
            assert!(!group.g.is_zero());
        }
    }

    #[test]
    fn unknown_group_size_is_rejected() {
        assert!(matches!(
            GroupSize::from_bits(777),
            Err(Srp6Error::UnknownGroup(777))
        ));
    }

    #[test]
    fn groups_are_cached_and_stable() {
        let a = GroupSize::Bits2048.group() as *const Group;
        let b = GroupSize::Bits2048.group() as *const Group;
        assert_eq!(a, b, "group() should hand back the same static instance");
    }

    #[test]
    fn byte_len_matches_rfc5054_group_size_for_every_entry() {
        let expected = [
            (GroupSize::Bits1024, 128),
            (GroupSize::Bits1536, 192),
            (GroupSize::Bits2048, 256),
            (GroupSize::Bits3072, 384),
            (GroupSize::Bits4096, 512),
            (GroupSize::Bits6144, 768),
            (GroupSize::Bits8192, 1024),
        ];
        for (size, bytes) in expected {
            assert_eq!(size.group().byte_len(), bytes);
        }
    }
}
