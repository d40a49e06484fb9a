use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::record::ProjectRecord;

/// JSON array file holding one record per scanned project.
///
/// Every append rewrites the whole file. There is no locking, so a store
/// must have exactly one writer; mutation takes `&mut self` to keep it that
/// way within a process.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the store file if it exists.
    pub fn reset(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Existing records, or an empty list when the file does not exist yet.
    pub fn load(&self) -> Result<Vec<ProjectRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let records = serde_json::from_str(&content)?;
        Ok(records)
    }

    /// Loads the array, pushes `record` and rewrites the file.
    pub fn append(&mut self, record: &ProjectRecord) -> Result<usize> {
        let mut records = self.load()?;
        records.push(record.clone());
        self.write_all(&records)?;
        Ok(records.len())
    }

    fn write_all(&self, records: &[ProjectRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        records.serialize(&mut serializer)?;
        writer.flush()?;
        Ok(())
    }
}
