//! Archive container readers.
//!
//! [`open_archive`] picks a [`MemberArchive`] implementation for a local
//! file: ZIP for `.zip`/`.egg`/`.whl`, otherwise whatever the leading bytes
//! say. Indexing and probing code only sees the trait.

pub mod compression;
pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

use std::path::Path;

use crate::Result;

pub use detect::ContainerKind;
pub use self::tar::TarMembers;
pub use traits::Member;
pub use traits::MemberArchive;
pub use traits::MemberVisitor;
pub use traits::OpenContent;
pub use self::zip::ZipMembers;

/// Opens a local archive with the reader matching its container format.
///
/// # Errors
///
/// Returns [`HonestyError::ArchiveOpen`](crate::HonestyError::ArchiveOpen)
/// if the file cannot be read or is not a supported container.
///
/// # Examples
///
/// ```no_run
/// use honesty_core::formats::open_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut archive = open_archive("cache/foo/foo-1.0.tar.gz".as_ref())?;
/// for name in archive.member_names()? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn open_archive(path: &Path) -> Result<Box<dyn MemberArchive>> {
    match detect::detect_container(path)? {
        ContainerKind::Zip => Ok(Box::new(ZipMembers::open(path)?)),
        ContainerKind::Tar(codec) => Ok(Box::new(TarMembers::open(path, codec)?)),
    }
}
