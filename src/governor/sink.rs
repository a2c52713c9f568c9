//! Decision sinks (append-only)

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::decision::DecisionRecord;
use crate::error::{Error, Result};

/// Append-only receiver of decision records
pub trait DecisionSink: Send + Sync {
    fn append(&self, record: &DecisionRecord) -> Result<()>;
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct InMemoryDecisionSink {
    records: Mutex<Vec<DecisionRecord>>,
}

impl InMemoryDecisionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far
    pub fn records(&self) -> Vec<DecisionRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DecisionSink for InMemoryDecisionSink {
    fn append(&self, record: &DecisionRecord) -> Result<()> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
        Ok(())
    }
}

impl<S: DecisionSink + ?Sized> DecisionSink for std::sync::Arc<S> {
    fn append(&self, record: &DecisionRecord) -> Result<()> {
        (**self).append(record)
    }
}

/// One JSON document per line, appended to a file
#[derive(Debug)]
pub struct JsonLinesDecisionSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesDecisionSink {
    /// Open for appending, creating the file if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(format!("opening decision log {}", path.display()), e))?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back, oldest first
    pub fn read_all(&self) -> Result<Vec<DecisionRecord>> {
        read_json_lines(&self.path)
    }
}

impl DecisionSink for JsonLinesDecisionSink {
    fn append(&self, record: &DecisionRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| Error::Sink(e.to_string()))?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{line}").map_err(|e| Error::Sink(format!("{}: {e}", self.path.display())))
    }
}

/// Parse a JSON-lines file, skipping blank lines
pub(crate) fn read_json_lines<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| Error::Serialization { path: path.to_path_buf(), message: e.to_string() })
        })
        .collect()
}
