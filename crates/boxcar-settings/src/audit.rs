//! Mutation audit log
//!
//! Append-only trail of setting mutations. Each record is written before the
//! store applies the change. The CSV sink creates its file with a fixed
//! header line on first write and appends one line per mutation afterwards.
//! Header and append are separate writes; a failure between them is not
//! rolled back.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use boxcar_common::{Result, Value};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header line of the mutation log
pub const AUDIT_HEADER: &str = "frame,controller,constant,old_value,new_value";

/// One setting mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    /// Simulation frame (-1 when the caller has none)
    pub frame: i64,
    pub controller: String,
    pub constant: String,
    pub old_value: Value,
    pub new_value: Value,
}

impl MutationRecord {
    /// CSV line (without trailing newline)
    pub fn to_csv_line(&self) -> String {
        [
            self.frame.to_string(),
            csv_field(&self.controller),
            csv_field(&self.constant),
            csv_field(&self.old_value.to_string()),
            csv_field(&self.new_value.to_string()),
        ]
        .join(",")
    }
}

/// Quote a cell when it contains a separator, quote, or line break
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Audit log sink
pub trait AuditSink: Send + Sync {
    /// Append one record; failures abort the mutation
    fn append(&self, record: &MutationRecord) -> Result<()>;
}

/// CSV file sink
#[derive(Debug, Clone)]
pub struct CsvAuditSink {
    path: PathBuf,
}

impl CsvAuditSink {
    /// Sink writing `file_name` inside `dir`; the directory must already exist
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_header(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        writeln!(file, "{}", AUDIT_HEADER)?;
        debug!(path = %self.path.display(), "Created audit log");
        Ok(())
    }
}

impl AuditSink for CsvAuditSink {
    fn append(&self, record: &MutationRecord) -> Result<()> {
        self.ensure_header()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", record.to_csv_line())?;
        Ok(())
    }
}

/// In-memory sink, for embedding callers and tests
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: RwLock<Vec<MutationRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records appended so far
    pub fn records(&self) -> Vec<MutationRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&self, record: &MutationRecord) -> Result<()> {
        self.records.write().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frame: i64, old: Value, new: Value) -> MutationRecord {
        MutationRecord {
            frame,
            controller: "ga".to_string(),
            constant: "mutation_rate".to_string(),
            old_value: old,
            new_value: new,
        }
    }

    #[test]
    fn test_csv_line() {
        let line = record(-1, Value::Float(0.5), Value::Float(0.25)).to_csv_line();
        assert_eq!(line, "-1,ga,mutation_rate,0.5,0.25");
    }

    #[test]
    fn test_csv_line_quotes_tuples() {
        let line = record(3, Value::float_tuple(&[0.0, -9.8]), Value::float_tuple(&[0.0, -4.9]))
            .to_csv_line();
        assert_eq!(line, "3,ga,mutation_rate,\"(0.0, -9.8)\",\"(0.0, -4.9)\"");
    }

    #[test]
    fn test_csv_sink_writes_header_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = CsvAuditSink::new(dir.path(), "updates.csv");

        sink.append(&record(1, Value::Float(0.5), Value::Float(0.4)))
            .unwrap();
        sink.append(&record(2, Value::Float(0.4), Value::Float(0.3)))
            .unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                AUDIT_HEADER,
                "1,ga,mutation_rate,0.5,0.4",
                "2,ga,mutation_rate,0.4,0.3",
            ]
        );
    }

    #[test]
    fn test_csv_sink_appends_to_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("log.csv"), format!("{}\n", AUDIT_HEADER)).unwrap();

        let sink = CsvAuditSink::new(dir.path(), "log.csv");
        sink.append(&record(9, Value::Int(1), Value::Int(2))).unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_csv_sink_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = CsvAuditSink::new(dir.path().join("missing"), "log.csv");
        assert!(sink.append(&record(0, Value::Int(1), Value::Int(2))).is_err());
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemoryAuditSink::new();
        assert!(sink.is_empty());
        sink.append(&record(0, Value::Int(1), Value::Int(2))).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].new_value, Value::Int(2));
    }
}
