//! Compression codecs wrapping tar streams.
//!
//! Source distributions are almost always gzip or bzip2 tarballs, but the
//! codec is detected from the stream's leading bytes rather than trusted
//! from the filename.
//!
//! # Supported Codecs
//!
//! - **Gzip** (`1f 8b`)
//! - **Bzip2** (`BZh`)
//! - **Xz** (`fd 37 7a 58 5a 00`)
//! - **Zstd** (`28 b5 2f fd`)

use std::io::BufRead;
use std::io::Read;
use std::io::{self};

/// Compression codec of a tar stream.
///
/// # Examples
///
/// ```
/// use honesty_core::formats::compression::CompressionCodec;
///
/// assert_eq!(CompressionCodec::from_magic(&[0x1f, 0x8b, 0x08]), Some(CompressionCodec::Gzip));
/// assert_eq!(CompressionCodec::from_magic(b"BZh91AY"), Some(CompressionCodec::Bzip2));
/// assert_eq!(CompressionCodec::from_magic(b"plain"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,
    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,
    /// Xz compression (LZMA2 algorithm).
    Xz,
    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xb5, 0x2f, 0xfd];

impl CompressionCodec {
    /// Identifies the codec from the first bytes of a stream.
    #[must_use]
    pub fn from_magic(header: &[u8]) -> Option<Self> {
        if header.starts_with(GZIP_MAGIC) {
            Some(Self::Gzip)
        } else if header.starts_with(BZIP2_MAGIC) {
            Some(Self::Bzip2)
        } else if header.starts_with(XZ_MAGIC) {
            Some(Self::Xz)
        } else if header.starts_with(ZSTD_MAGIC) {
            Some(Self::Zstd)
        } else {
            None
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Wraps a buffered reader in the matching decoder.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder cannot be initialized.
    pub fn decoder<'a, R: BufRead + 'a>(self, reader: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Self::Gzip => Box::new(flate2::bufread::MultiGzDecoder::new(reader)),
            Self::Bzip2 => Box::new(bzip2::bufread::BzDecoder::new(reader)),
            Self::Xz => Box::new(xz2::bufread::XzDecoder::new(reader)),
            Self::Zstd => Box::new(zstd::stream::read::Decoder::with_buffer(reader)?),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_magic() {
        assert_eq!(
            CompressionCodec::from_magic(XZ_MAGIC),
            Some(CompressionCodec::Xz)
        );
        assert_eq!(
            CompressionCodec::from_magic(ZSTD_MAGIC),
            Some(CompressionCodec::Zstd)
        );
        assert_eq!(CompressionCodec::from_magic(&[0x1f]), None);
        assert_eq!(CompressionCodec::from_magic(b""), None);
    }

    #[test]
    fn test_codec_name() {
        assert_eq!(CompressionCodec::Gzip.name(), "gzip");
        assert_eq!(CompressionCodec::Bzip2.name(), "bzip2");
        assert_eq!(CompressionCodec::Xz.name(), "xz");
        assert_eq!(CompressionCodec::Zstd.name(), "zstd");
    }

    #[test]
    fn test_gzip_decoder_round_trip() {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"hello tar").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(
            CompressionCodec::from_magic(&compressed),
            Some(CompressionCodec::Gzip)
        );
        let mut decoded = String::new();
        CompressionCodec::Gzip
            .decoder(compressed.as_slice())
            .unwrap()
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "hello tar");
    }
}
