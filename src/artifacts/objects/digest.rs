//! Content digests
//!
//! Every piece of persistent state is addressed by the digest of its content:
//! blobs by the digest of their bytes, commits by the digest of their
//! canonical serialization. The digest is a 40-character lowercase
//! hexadecimal string, which keeps on-disk names portable and makes short
//! prefixes (4+ characters) practical for lookup.
//!
//! The hashing primitive lives behind [`digest_bytes`] so that it can be
//! swapped without touching any caller.

use sha1::{Digest as _, Sha1};
use std::path::PathBuf;

/// Width of a textual digest in characters
pub const DIGEST_LENGTH: usize = 40;

/// Shortest digest prefix accepted when resolving abbreviated targets
pub const MIN_PREFIX_LENGTH: usize = 4;

/// Width of the abbreviated form used in user-facing output
const SHORT_LENGTH: usize = 7;

/// Textual content digest
///
/// Always [`DIGEST_LENGTH`] lowercase hex characters. Identifies blobs and
/// commits in the object and commit stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    /// Parse and validate a digest from its textual form
    pub fn try_parse(raw: String) -> anyhow::Result<Self> {
        if raw.len() != DIGEST_LENGTH {
            anyhow::bail!("invalid digest length: {}", raw.len());
        }
        if !raw.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            anyhow::bail!("invalid digest characters: {}", raw);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display
    pub fn to_short(&self) -> &str {
        &self.0[..SHORT_LENGTH]
    }

    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// File name of the object or commit record holding this digest's content
    pub fn to_file_name(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the digest of a byte sequence
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    let mut hasher = Sha1::new();
    hasher.update(bytes);

    let raw = hasher.finalize();
    let mut hex = String::with_capacity(DIGEST_LENGTH);
    for byte in raw {
        hex.push_str(&format!("{:02x}", byte));
    }
    Digest(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_content_has_a_valid_digest() {
        let digest = digest_bytes(b"");
        assert_eq!(digest.as_str(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn known_content_digest() {
        let digest = digest_bytes(b"hello");
        assert_eq!(digest.as_str(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    }

    #[test]
    fn short_form_is_seven_characters() {
        let digest = digest_bytes(b"hello");
        assert_eq!(digest.to_short(), "aaf4c61");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Digest::try_parse("abc123".to_string()).is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(Digest::try_parse("z".repeat(DIGEST_LENGTH)).is_err());
    }

    proptest! {
        #[test]
        fn digest_is_deterministic(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(digest_bytes(&content), digest_bytes(&content));
        }

        #[test]
        fn digest_has_fixed_width_and_alphabet(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let digest = digest_bytes(&content);
            prop_assert_eq!(digest.as_str().len(), DIGEST_LENGTH);
            prop_assert!(digest.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn parse_round_trips(content in proptest::collection::vec(any::<u8>(), 0..64)) {
            let digest = digest_bytes(&content);
            let reparsed = Digest::try_parse(digest.as_str().to_string()).unwrap();
            prop_assert_eq!(digest, reparsed);
        }
    }
}
