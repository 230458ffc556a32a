//! Content digests of archive members.

use serde::Serialize;
use serde::Serializer;
use sha1::Digest;
use sha1::Sha1;
use std::fmt;

/// A 160-bit SHA-1 digest of a member's line-ending-normalized content.
///
/// Used only to group identical content across artifacts, not as a
/// security boundary: two different contents sharing a digest are assumed
/// not to occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest {
    bytes: [u8; 20],
}

impl ContentDigest {
    /// Creates a digest from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// Hashes bytes exactly as given.
    #[must_use]
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self::from_bytes(hasher.finalize().into())
    }

    /// Normalizes CRLF line endings to LF, then hashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use honesty_core::ContentDigest;
    ///
    /// assert_eq!(
    ///     ContentDigest::of_normalized(b"x=1\r\n"),
    ///     ContentDigest::of_normalized(b"x=1\n"),
    /// );
    /// ```
    #[must_use]
    pub fn of_normalized(data: &[u8]) -> Self {
        Self::of(&normalize_line_endings(data))
    }

    /// Returns the lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Replaces every CRLF byte pair with a single LF byte.
///
/// Lone CR bytes are kept.
///
/// # Examples
///
/// ```
/// use honesty_core::normalize_line_endings;
///
/// assert_eq!(normalize_line_endings(b"a\r\nb\rc\n"), b"a\nb\rc\n");
/// ```
#[must_use]
pub fn normalize_line_endings(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if byte == b'\r' && iter.peek() == Some(&b'\n') {
            continue;
        }
        out.push(byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha1() {
        // sha1("") is a well-known constant
        assert_eq!(
            ContentDigest::of(b"").to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_crlf_and_lf_agree() {
        let lf = ContentDigest::of_normalized(b"import os\nprint(os.sep)\n");
        let crlf = ContentDigest::of_normalized(b"import os\r\nprint(os.sep)\r\n");
        assert_eq!(lf, crlf);
        assert_ne!(lf, ContentDigest::of(b"import os\r\nprint(os.sep)\r\n"));
    }

    #[test]
    fn test_different_content_differs() {
        assert_ne!(
            ContentDigest::of_normalized(b"x=1\n"),
            ContentDigest::of_normalized(b"x=2\n")
        );
    }

    #[test]
    fn test_normalize_edge_cases() {
        assert_eq!(normalize_line_endings(b""), b"");
        assert_eq!(normalize_line_endings(b"\r"), b"\r");
        assert_eq!(normalize_line_endings(b"\r\r\n"), b"\r\n");
        assert_eq!(normalize_line_endings(b"\n\r"), b"\n\r");
    }

    #[test]
    fn test_display_is_hex() {
        let digest = ContentDigest::from_bytes([0xab; 20]);
        assert_eq!(digest.to_string(), "ab".repeat(20));
        assert_eq!(digest.as_bytes(), &[0xab; 20]);
    }
}
