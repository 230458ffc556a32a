//! Tar archive reader.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::HonestyError;
use crate::Result;

use super::compression::CompressionCodec;
use super::traits::Member;
use super::traits::MemberArchive;
use super::traits::MemberVisitor;

/// Tar archive reader, optionally decompressing the stream.
///
/// Tar streams are not seekable once compressed, so every pass reopens the
/// file.
#[derive(Debug)]
pub struct TarMembers {
    path: PathBuf,
    codec: Option<CompressionCodec>,
}

impl TarMembers {
    /// Creates a reader for the tarball at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HonestyError::ArchiveOpen`] if the file cannot be opened.
    pub fn open(path: &Path, codec: Option<CompressionCodec>) -> Result<Self> {
        File::open(path).map_err(|e| open_error(path, &e))?;
        Ok(Self {
            path: path.to_path_buf(),
            codec,
        })
    }

    /// Returns the detected compression codec.
    #[must_use]
    pub fn codec(&self) -> Option<CompressionCodec> {
        self.codec
    }

    fn stream(&self) -> Result<Box<dyn Read>> {
        let file = File::open(&self.path).map_err(|e| open_error(&self.path, &e))?;
        let reader = BufReader::new(file);
        match self.codec {
            None => Ok(Box::new(reader)),
            Some(codec) => codec
                .decoder(reader)
                .map_err(|e| open_error(&self.path, &e)),
        }
    }
}

fn open_error(path: &Path, err: &dyn std::fmt::Display) -> HonestyError {
    HonestyError::ArchiveOpen {
        archive: path.to_path_buf(),
        reason: err.to_string(),
    }
}

impl MemberArchive for TarMembers {
    fn format_name(&self) -> &str {
        match self.codec {
            None => "tar",
            Some(CompressionCodec::Gzip) => "tar.gz",
            Some(CompressionCodec::Bzip2) => "tar.bz2",
            Some(CompressionCodec::Xz) => "tar.xz",
            Some(CompressionCodec::Zstd) => "tar.zst",
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn for_each_member(&mut self, visitor: &mut MemberVisitor<'_>) -> Result<()> {
        let mut archive = tar::Archive::new(self.stream()?);
        let entries = archive
            .entries()
            .map_err(|e| open_error(&self.path, &format!("failed to read TAR entries: {e}")))?;

        for entry in entries {
            let mut entry = entry
                .map_err(|e| open_error(&self.path, &format!("failed to read TAR entry: {e}")))?;
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let size = entry.size();
            let is_file = entry.header().entry_type().is_file();

            let member = Member::new(&self.path, &name, size, is_file, &mut entry);
            if visitor(member)?.is_break() {
                break;
            }
        }
        Ok(())
    }
}
