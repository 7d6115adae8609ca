//! PPTX container access.
//!
//! The archive is unpacked into a private temporary directory that lives
//! exactly as long as the [`PptxArchive`] value, so every exit path
//! (success, error, panic) removes it.

use beamer_core::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::TempDir;
use zip::ZipArchive;

/// Folder holding the slide parts.
pub const SLIDES_DIR: &str = "ppt/slides";

/// Folder holding embedded media.
pub const MEDIA_DIR: &str = "ppt/media";

/// Matches slide part file names such as `slide12.xml`.
static SLIDE_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^slide(\d+)\.xml$").unwrap());

/// A slide part found in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePart {
    /// Number taken from the file name (`slide3.xml` is 3).
    pub number: usize,
    /// Archive-internal path, e.g. `ppt/slides/slide3.xml`.
    pub path: String,
}

/// An unpacked PPTX file.
pub struct PptxArchive {
    dir: TempDir,
}

impl PptxArchive {
    /// Open and unpack the PPTX file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| {
            Error::InvalidArchive(format!("Failed to open {}: {}", path.display(), e))
        })?;
        log::debug!("Unpacking {}", path.display());
        Self::from_reader(BufReader::new(file))
    }

    /// Unpack a PPTX container from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::InvalidArchive(format!("Failed to open ZIP: {}", e)))?;

        let dir = tempfile::Builder::new().prefix("pptx2beamer-").tempdir()?;
        archive
            .extract(dir.path())
            .map_err(|e| Error::ZipError(format!("Failed to extract archive: {}", e)))?;

        log::debug!(
            "Extracted {} entries into {}",
            archive.len(),
            dir.path().display()
        );
        Ok(Self { dir })
    }

    /// Root of the unpacked file tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Filesystem path of an archive-internal part such as `ppt/presentation.xml`.
    pub fn path_of(&self, part: &str) -> PathBuf {
        part.split('/')
            .filter(|c| !c.is_empty())
            .fold(self.root().to_path_buf(), |acc, c| acc.join(c))
    }

    /// Whether a part exists as a regular file.
    pub fn contains(&self, part: &str) -> bool {
        self.path_of(part).is_file()
    }

    /// Read a part as text. A part that does not exist is `Ok(None)`;
    /// a part that is not valid UTF-8 is an XML error.
    pub fn read_part(&self, part: &str) -> Result<Option<String>> {
        let path = self.path_of(part);
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::XmlError(format!("{} is not valid UTF-8: {}", part, e)))?;
        Ok(Some(text.to_string()))
    }

    /// Slide parts in slide-number order.
    ///
    /// Only files named `slideN.xml` count. If two files carry the same
    /// number (`slide1.xml`, `slide01.xml`) the first in name order is kept.
    pub fn slide_parts(&self) -> Result<Vec<SlidePart>> {
        let dir = self.path_of(SLIDES_DIR);
        if !dir.is_dir() {
            log::debug!("No {} folder in archive", SLIDES_DIR);
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        let mut parts: Vec<SlidePart> = Vec::new();
        for name in names {
            let Some(number) = slide_number(&name) else {
                continue;
            };
            if parts.iter().any(|p| p.number == number) {
                log::warn!("Ignoring {}: slide {} already present", name, number);
                continue;
            }
            parts.push(SlidePart {
                number,
                path: format!("{}/{}", SLIDES_DIR, name),
            });
        }

        parts.sort_by_key(|p| p.number);
        Ok(parts)
    }

    /// Regular files in the media folder, sorted by name.
    pub fn media_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.path_of(MEDIA_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Slide number of a part file name, or `None` if it is not `slideN.xml`.
pub fn slide_number(file_name: &str) -> Option<usize> {
    SLIDE_PART_REGEX
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}
