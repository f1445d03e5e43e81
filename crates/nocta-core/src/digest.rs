//! # Content Digests
//!
//! Defines `ContentDigest` and `sha256_digest()` for content-addressed
//! storage of evidence media. Proof artifacts (images, video) are opaque
//! byte blobs; their digest doubles as the stable storage key, so the same
//! upload always resolves to the same file reference.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A SHA-256 content digest over an opaque byte blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a content digest from raw digest bytes.
    ///
    /// Prefer [`sha256_digest()`] for computing digests from content.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute the SHA-256 content digest of a byte blob.
pub fn sha256_digest(data: &[u8]) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    ContentDigest::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = sha256_digest(b"door photo bytes");
        let b = sha256_digest(b"door photo bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn digest_differs_for_different_content() {
        let a = sha256_digest(b"clip one");
        let b = sha256_digest(b"clip two");
        assert_ne!(a, b);
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let digest = sha256_digest(b"anything");
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn empty_input_matches_known_vector() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_digest(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn display_is_self_describing() {
        let digest = sha256_digest(b"x");
        let display = format!("{digest}");
        assert!(display.starts_with("sha256:"));
        assert_eq!(display.len(), "sha256:".len() + 64);
    }

    #[test]
    fn serde_roundtrip() {
        let digest = sha256_digest(b"serialize me");
        let json = serde_json::to_string(&digest).unwrap();
        let deser: ContentDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(digest, deser);
    }
}
