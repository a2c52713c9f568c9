//! Prediction sinks

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::record::PredictionRecord;
use crate::error::{Error, Result};
use crate::governor::read_json_lines;

/// Append-only store for served predictions
pub trait PredictionSink: Send + Sync {
    fn append(&self, records: &[PredictionRecord]) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryPredictionSink {
    records: Mutex<Vec<PredictionRecord>>,
}

impl InMemoryPredictionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<PredictionRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PredictionSink for InMemoryPredictionSink {
    fn append(&self, records: &[PredictionRecord]) -> Result<()> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(records);
        Ok(())
    }
}

/// Appends one JSON document per prediction
#[derive(Debug)]
pub struct JsonLinesPredictionSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesPredictionSink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(format!("opening prediction log {}", path.display()), e))?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<Vec<PredictionRecord>> {
        read_json_lines(&self.path)
    }
}

impl PredictionSink for JsonLinesPredictionSink {
    fn append(&self, records: &[PredictionRecord]) -> Result<()> {
        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record).map_err(|e| Error::Sink(e.to_string()))?;
            buf.push(b'\n');
        }
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(&buf).map_err(|e| Error::Sink(format!("{}: {e}", self.path.display())))
    }
}
