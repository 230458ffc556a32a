//! Capability interface shared by archive container readers.

use std::io;
use std::io::Read;
use std::ops::ControlFlow;
use std::path::Path;

use crate::HonestyError;
use crate::Result;
use crate::types::digest::normalize_line_endings;

/// Member content that is decoded only when a visitor reads it.
///
/// Implemented by containers with random access. Members that are only
/// enumerated never get a decoder, so their compression method is never
/// checked.
pub trait OpenContent {
    /// Opens a decoder over the member content.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the member cannot be decoded.
    fn open(&mut self) -> io::Result<Box<dyn Read + '_>>;
}

enum Content<'a> {
    Stream(&'a mut dyn Read),
    Deferred(&'a mut dyn OpenContent),
}

/// One archive member, borrowed for the duration of a visitor call.
pub struct Member<'a> {
    archive: &'a Path,
    name: &'a str,
    size: u64,
    is_file: bool,
    content: Content<'a>,
}

impl<'a> Member<'a> {
    /// Wraps a member's metadata and an already positioned content stream.
    pub fn new(
        archive: &'a Path,
        name: &'a str,
        size: u64,
        is_file: bool,
        reader: &'a mut dyn Read,
    ) -> Self {
        Self {
            archive,
            name,
            size,
            is_file,
            content: Content::Stream(reader),
        }
    }

    /// Wraps a member's metadata and content that is opened on first read.
    pub fn deferred(
        archive: &'a Path,
        name: &'a str,
        size: u64,
        is_file: bool,
        content: &'a mut dyn OpenContent,
    ) -> Self {
        Self {
            archive,
            name,
            size,
            is_file,
            content: Content::Deferred(content),
        }
    }

    /// Raw member name as stored in the container.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Size declared by the container header.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns `true` for regular files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    /// Reads the whole member, refusing more than `max` bytes.
    ///
    /// The limit is enforced on bytes actually decompressed, not on the
    /// declared size.
    pub fn read_all(&mut self, max: u64) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let limit = max.saturating_add(1);
        let read = match &mut self.content {
            Content::Stream(reader) => Read::take(&mut **reader, limit).read_to_end(&mut data),
            Content::Deferred(content) => content
                .open()
                .and_then(|reader| reader.take(limit).read_to_end(&mut data)),
        }
        .map_err(|e| HonestyError::MemberRead {
            archive: self.archive.to_path_buf(),
            member: self.name.to_string(),
            reason: e.to_string(),
        })?;

        if read as u64 > max {
            return Err(HonestyError::MemberTooLarge {
                archive: self.archive.to_path_buf(),
                member: self.name.to_string(),
                size: read as u64,
                max,
            });
        }
        Ok(data)
    }

    /// Reads the whole member and normalizes CRLF line endings to LF.
    pub fn read_normalized(&mut self, max: u64) -> Result<Vec<u8>> {
        self.read_all(max).map(|data| normalize_line_endings(&data))
    }
}

/// A member visitor: return `ControlFlow::Break` to stop early.
pub type MemberVisitor<'v> = dyn FnMut(Member<'_>) -> Result<ControlFlow<()>> + 'v;

/// Read access to the members of one archive container.
///
/// Implementations stream members in container order. Each call to
/// [`for_each_member`](Self::for_each_member) is a fresh pass.
pub trait MemberArchive {
    /// Returns the container format name.
    fn format_name(&self) -> &str;

    /// Local path of the archive.
    fn path(&self) -> &Path;

    /// Visits every member in container order until the visitor breaks.
    ///
    /// # Errors
    ///
    /// Returns [`HonestyError::ArchiveOpen`] when the container structure is
    /// unreadable and propagates any error returned by the visitor.
    fn for_each_member(&mut self, visitor: &mut MemberVisitor<'_>) -> Result<()>;

    /// Lists every member name.
    ///
    /// # Errors
    ///
    /// Same as [`for_each_member`](Self::for_each_member).
    fn member_names(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        self.for_each_member(&mut |member| {
            names.push(member.name().to_string());
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(names)
    }
}
