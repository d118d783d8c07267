//! Memory-mapped reader for shape files
//!
//! A shape file starts with a line holding the record count, followed by one
//! `<ShapeKind> <height> <secondary>` record per line. The declared count is
//! informational only and never checked against the records.

use crate::error::{ShapeContext, ShapeResult};
use crate::shape::Shape;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Memory-mapped shape file
pub struct ShapeFile {
    path: PathBuf,
    // Empty files cannot be mapped
    mmap: Option<Mmap>,
}

impl ShapeFile {
    /// Open and map `path`
    pub fn open(path: &Path) -> ShapeResult<Self> {
        let display = path.display().to_string();
        let file = File::open(path).with_file_context(&display)?;
        let len = file.metadata().with_file_context(&display)?.len();

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the map is read-only and lives no longer than this ShapeFile.
            // Concurrent truncation of the input by another process is not supported.
            let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("mapping {display}"))?;
            Some(mmap)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Record count declared on the first line, if it is a number
    pub fn declared_count(&self) -> Option<usize> {
        self.numbered_lines()
            .next()
            .and_then(|(_, line)| line.trim().parse().ok())
    }

    /// Parse the data records in file order.
    ///
    /// Blank lines are skipped. Errors carry the 1-based line number they occurred on.
    pub fn records(&self) -> impl Iterator<Item = ShapeResult<Shape>> + '_ {
        self.numbered_lines()
            .skip(1)
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_no, line)| Shape::parse_record(&line).map_err(|e| e.at_line(line_no)))
    }

    /// Parse every record, stopping at the first error
    pub fn read_all(&self) -> ShapeResult<Vec<Shape>> {
        self.records().collect()
    }

    fn numbered_lines(&self) -> impl Iterator<Item = (usize, std::borrow::Cow<'_, str>)> + '_ {
        split_lines(self.bytes())
            .enumerate()
            .map(|(idx, line)| (idx + 1, String::from_utf8_lossy(line)))
    }
}

/// Split on `\n`, dropping a trailing `\r` from each line
fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    let data = data.strip_suffix(b"\n").unwrap_or(data);
    let empty = data.is_empty();
    data.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(move |_| !empty)
}

/// Normalize a user-supplied path: strip one pair of surrounding double quotes
/// and turn backslashes into forward slashes
pub fn normalize_path(raw: &str) -> String {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    unquoted.replace('\\', "/")
}
