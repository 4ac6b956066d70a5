/*!
A streaming hash builder over the five SHA variants SRP-6a deployments use
in the wild: SHA-1 (RFC 5054's own choice) through SHA-512 (the Apple-style
deployments this crate also targets).
*/
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

pub use digest::Digest as _DigestTrait;

/// Which of the five supported SHA variants to hash with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DigestKind {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestKind {
    /// Digest output width in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub fn builder(self) -> Digest {
        Digest {
            kind: self,
            inner: match self {
                Self::Sha1 => Inner::Sha1(Sha1::new()),
                Self::Sha224 => Inner::Sha224(Sha224::new()),
                Self::Sha256 => Inner::Sha256(Sha256::new()),
                Self::Sha384 => Inner::Sha384(Sha384::new()),
                Self::Sha512 => Inner::Sha512(Sha512::new()),
            },
        }
    }
}

impl Default for DigestKind {
    fn default() -> Self {
        Self::Sha256
    }
}

enum Inner {
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

/// A streaming digest over one of the five [`DigestKind`] variants.
pub struct Digest {
    kind: DigestKind,
    inner: Inner,
}

impl Digest {
    pub fn new(kind: DigestKind) -> Self {
        kind.builder()
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            Inner::Sha1(h) => h.update(data),
            Inner::Sha224(h) => h.update(data),
            Inner::Sha256(h) => h.update(data),
            Inner::Sha384(h) => h.update(data),
            Inner::Sha512(h) => h.update(data),
        }
    }

    /// Consumes the builder and returns the digest bytes.
    pub fn finalize(self) -> Vec<u8> {
        match self.inner {
            Inner::Sha1(h) => h.finalize().to_vec(),
            Inner::Sha224(h) => h.finalize().to_vec(),
            Inner::Sha256(h) => h.finalize().to_vec(),
            Inner::Sha384(h) => h.finalize().to_vec(),
            Inner::Sha512(h) => h.finalize().to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }
}

/// Concatenates `parts` in order and digests the result in one shot.
pub fn hash(kind: DigestKind, parts: &[&[u8]]) -> Vec<u8> {
    let mut digest = kind.builder();
    for part in parts {
        digest.update(part);
    }
    digest.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_nist_widths() {
        assert_eq!(DigestKind::Sha1.size(), 20);
        assert_eq!(DigestKind::Sha224.size(), 28);
        assert_eq!(DigestKind::Sha256.size(), 32);
        assert_eq!(DigestKind::Sha384.size(), 48);
        assert_eq!(DigestKind::Sha512.size(), 64);
    }

    #[test]
    fn one_shot_matches_streaming() {
        for kind in [
            DigestKind::Sha1,
            DigestKind::Sha224,
            DigestKind::Sha256,
            DigestKind::Sha384,
            DigestKind::Sha512,
        ] {
            let mut d = kind.builder();
            d.update(b"hello, ");
            d.update(b"world");
            let streamed = d.finalize();
            let oneshot = hash(kind, &[b"hello, ", b"world"]);
            assert_eq!(streamed, oneshot);
            assert_eq!(streamed.len(), kind.size());
        }
    }

    #[test]
    fn sha1_matches_known_vector() {
        // SHA1("abc")
        let got = hash(DigestKind::Sha1, &[b"abc"]);
        assert_eq!(
            hex::encode(got),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
