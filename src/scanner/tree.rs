use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::ignore::IgnorePatterns;

/// Indentation added per nesting level.
pub const INDENT: &str = "|   ";

/// One directory entry as reported by an [`EntryLister`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lists the immediate entries of a directory.
///
/// Implementations must return entries in the order the underlying source
/// enumerates them; the tree builder never sorts.
pub trait EntryLister {
    fn list(&self, dir: &Path) -> Result<Vec<TreeEntry>>;
}

/// Blocking lister backed by `std::fs::read_dir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl EntryLister for FsLister {
    fn list(&self, dir: &Path) -> Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // `Path::is_dir` follows symlinks
            let path = entry.path();
            entries.push(TreeEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: path.is_dir(),
                path,
            });
        }
        Ok(entries)
    }
}

/// Textual, indented listing of a project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTree {
    lines: Vec<String>,
}

impl ProjectTree {
    pub fn build(root: &Path, patterns: &IgnorePatterns) -> Result<Self> {
        Self::build_with(&FsLister, root, patterns)
    }

    pub fn build_with<L: EntryLister>(
        lister: &L,
        root: &Path,
        patterns: &IgnorePatterns,
    ) -> Result<Self> {
        let mut lines = Vec::new();
        walk(lister, root, patterns, "", &mut lines)?;
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the tree with a trailing newline after every line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn walk<L: EntryLister>(
    lister: &L,
    dir: &Path,
    patterns: &IgnorePatterns,
    prefix: &str,
    lines: &mut Vec<String>,
) -> Result<()> {
    for entry in lister.list(dir)? {
        if patterns.is_ignored(&entry.name) {
            continue;
        }

        lines.push(format!("{}{}", prefix, entry.name));
        if entry.is_dir {
            let child_prefix = format!("{}{}", prefix, INDENT);
            walk(lister, &entry.path, patterns, &child_prefix, lines)?;
        }
    }
    Ok(())
}
