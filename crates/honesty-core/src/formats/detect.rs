//! Container format detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::HonestyError;
use crate::Result;

use super::compression::CompressionCodec;

/// Extensions always opened as ZIP containers.
pub const ZIP_EXTENSIONS: [&str; 3] = [".zip", ".egg", ".whl"];

/// Bytes needed to see the `ustar` magic of a tar header.
const SNIFF_LEN: usize = 512;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const USTAR_OFFSET: usize = 257;
const USTAR_MAGIC: &[u8] = b"ustar";

/// Archive container formats understood by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// ZIP container (wheels, eggs, zip sdists, wininst installers).
    Zip,
    /// Tar stream, optionally compressed.
    Tar(Option<CompressionCodec>),
}

/// Classifies a container from its leading bytes.
///
/// Anything that is neither a compressed stream nor a tar header is
/// treated as ZIP, whose central directory sits at the end of the file;
/// this covers self-extracting installers with an executable stub in
/// front.
///
/// # Examples
///
/// ```
/// use honesty_core::formats::compression::CompressionCodec;
/// use honesty_core::formats::detect::ContainerKind;
/// use honesty_core::formats::detect::sniff_container;
///
/// assert_eq!(
///     sniff_container(&[0x1f, 0x8b, 0x08, 0x00]),
///     ContainerKind::Tar(Some(CompressionCodec::Gzip))
/// );
/// assert_eq!(sniff_container(b"PK\x03\x04rest"), ContainerKind::Zip);
/// assert_eq!(sniff_container(b"MZ\x90\x00"), ContainerKind::Zip);
/// ```
#[must_use]
pub fn sniff_container(header: &[u8]) -> ContainerKind {
    if header.starts_with(ZIP_MAGIC) {
        return ContainerKind::Zip;
    }
    if let Some(codec) = CompressionCodec::from_magic(header) {
        return ContainerKind::Tar(Some(codec));
    }
    if header
        .get(USTAR_OFFSET..USTAR_OFFSET + USTAR_MAGIC.len())
        .is_some_and(|magic| magic == USTAR_MAGIC)
    {
        return ContainerKind::Tar(None);
    }
    ContainerKind::Zip
}

/// Returns `true` if the filename alone selects the ZIP reader.
#[must_use]
pub fn has_zip_extension(path: &Path) -> bool {
    let name = path.to_string_lossy();
    ZIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Detects the container format of a local archive.
///
/// `.zip`, `.egg`, and `.whl` files are ZIP by extension; every other file
/// is sniffed by content.
///
/// # Errors
///
/// Returns [`HonestyError::ArchiveOpen`] if the file cannot be read.
pub fn detect_container(path: &Path) -> Result<ContainerKind> {
    if has_zip_extension(path) {
        return Ok(ContainerKind::Zip);
    }

    let open_error = |e: std::io::Error| HonestyError::ArchiveOpen {
        archive: path.to_path_buf(),
        reason: e.to_string(),
    };
    let file = File::open(path).map_err(open_error)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut header)
        .map_err(open_error)?;

    Ok(sniff_container(&header))
}
