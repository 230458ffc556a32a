//! ZIP archive reader.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::HonestyError;
use crate::Result;

use super::traits::Member;
use super::traits::MemberArchive;
use super::traits::MemberVisitor;
use super::traits::OpenContent;

/// ZIP archive reader for wheels, eggs, zip sdists, and installers with an
/// appended ZIP directory.
pub struct ZipMembers {
    path: PathBuf,
    archive: zip::ZipArchive<BufReader<File>>,
}

impl ZipMembers {
    /// Opens the ZIP container at `path` and reads its central directory.
    ///
    /// # Errors
    ///
    /// Returns [`HonestyError::ArchiveOpen`] if the file cannot be opened or
    /// carries no valid central directory.
    pub fn open(path: &Path) -> Result<Self> {
        let open_error = |reason: String| HonestyError::ArchiveOpen {
            archive: path.to_path_buf(),
            reason,
        };
        let file = File::open(path).map_err(|e| open_error(e.to_string()))?;
        let archive =
            zip::ZipArchive::new(BufReader::new(file)).map_err(|e| open_error(e.to_string()))?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Number of entries in the central directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl MemberArchive for ZipMembers {
    fn format_name(&self) -> &str {
        "zip"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn member_names(&mut self) -> Result<Vec<String>> {
        Ok(self.archive.file_names().map(str::to_string).collect())
    }

    fn for_each_member(&mut self, visitor: &mut MemberVisitor<'_>) -> Result<()> {
        for index in 0..self.archive.len() {
            let (name, size, is_file) = {
                let file =
                    self.archive
                        .by_index_raw(index)
                        .map_err(|e| HonestyError::MemberRead {
                            archive: self.path.clone(),
                            member: format!("#{index}"),
                            reason: e.to_string(),
                        })?;
                (file.name().to_string(), file.size(), file.is_file())
            };

            let mut content = ZipContent {
                archive: &mut self.archive,
                index,
            };
            let member = Member::deferred(&self.path, &name, size, is_file, &mut content);
            if visitor(member)?.is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// Decoder for one entry, created only when the entry is read.
struct ZipContent<'z> {
    archive: &'z mut zip::ZipArchive<BufReader<File>>,
    index: usize,
}

impl OpenContent for ZipContent<'_> {
    fn open(&mut self) -> io::Result<Box<dyn Read + '_>> {
        let file = self.archive.by_index(self.index).map_err(io::Error::from)?;
        Ok(Box::new(file))
    }
}
