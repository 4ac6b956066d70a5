/*!
The three independent interoperability flags, modeled as an open bitset
rather than a closed enum — exactly as [`crate::digest::DigestKind`] is
closed but this is not: future quirks should be addable here without
breaking callers, mirroring the original C++ `enum Flags` bitmask.
*/
use std::ops::{BitOr, BitOrAssign};

/// Bitset of SRP-6a interoperability quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Flags(u8);

impl Flags {
    /// Derive `x` as `H(":" || password)`, omitting the username from the
    /// inner hash.
    pub const NO_USERNAME_IN_X: Flags = Flags(1 << 0);

    /// Use minimal (unpadded) big-endian encodings of N, g, A, B when
    /// computing `k` and `u`.
    pub const SKIP_ZEROES_K_U_X: Flags = Flags(1 << 1);

    /// Use minimal (unpadded) big-endian encodings of g, N, A, B inside
    /// M1/M2 (the Apple SRP hack).
    pub const SKIP_ZEROES_M1_M2: Flags = Flags(1 << 2);

    pub const NONE: Flags = Flags(0);

    pub fn contains(self, flag: Flags) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// All eight combinations of the three named bits, for exhaustive tests.
    pub fn all_combinations() -> [Flags; 8] {
        let mut combos = [Flags::NONE; 8];
        for (i, combo) in combos.iter_mut().enumerate() {
            *combo = Flags(i as u8);
        }
        combos
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Self) -> Self::Output {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(Flags::default(), Flags::NONE);
        assert!(!Flags::NONE.contains(Flags::NO_USERNAME_IN_X));
    }

    #[test]
    fn bits_are_independent() {
        let combo = Flags::NO_USERNAME_IN_X | Flags::SKIP_ZEROES_M1_M2;
        assert!(combo.contains(Flags::NO_USERNAME_IN_X));
        assert!(combo.contains(Flags::SKIP_ZEROES_M1_M2));
        assert!(!combo.contains(Flags::SKIP_ZEROES_K_U_X));
    }

    #[test]
    fn all_combinations_are_distinct() {
        let combos = Flags::all_combinations();
        for (i, a) in combos.iter().enumerate() {
            for (j, b) in combos.iter().enumerate() {
                assert_eq!(i == j, a == b);
            }
        }
    }
}
