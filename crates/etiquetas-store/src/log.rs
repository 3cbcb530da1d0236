//! # Event Log
//!
//! One CSV file per event kind, written append-only under an exclusive
//! advisory lock.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append(record)                                                         │
//! │                                                                         │
//! │   1. open(create + append)                                             │
//! │   2. lock_exclusive()            ◄── other writers block here           │
//! │   3. len == 0 ? write header                                           │
//! │   4. write record                                                      │
//! │   5. flush                                                             │
//! │   6. drop handle                 ──► lock released                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no read-modify-write: concurrent appends never lose rows, and a
//! retry after a failed attempt never duplicates the header.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use etiquetas_core::LogRecord;
use fs2::FileExt;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::retry::retry_once;
use crate::DEFAULT_RETRY_DELAY;

// =============================================================================
// Log Kinds
// =============================================================================

/// Which event a log file records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// `calificaciones.csv`: user ratings.
    Ratings,
    /// `provincias.csv`: province of each label download.
    Provinces,
}

impl LogKind {
    pub const fn file_name(&self) -> &'static str {
        match self {
            LogKind::Ratings => "calificaciones.csv",
            LogKind::Provinces => "provincias.csv",
        }
    }

    pub const fn header(&self) -> [&'static str; 3] {
        match self {
            LogKind::Ratings => ["Fecha", "Hora", "Evaluación"],
            LogKind::Provinces => ["Fecha", "Hora", "Provincia"],
        }
    }
}

/// Result of a best-effort write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The record is on disk (first attempt or the retry).
    Written,
    /// Both attempts failed; the record was discarded.
    Dropped,
}

impl AppendOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, AppendOutcome::Written)
    }
}

// =============================================================================
// Event Log
// =============================================================================

/// Handle on one CSV log file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
    kind: LogKind,
    retry_delay: Duration,
}

impl EventLog {
    /// Opens the log in `data_dir`, creating the directory and the file with
    /// its header row when missing.
    pub fn open(data_dir: impl AsRef<Path>, kind: LogKind) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::io(data_dir, e))?;

        let log = EventLog {
            path: data_dir.join(kind.file_name()),
            kind,
            retry_delay: DEFAULT_RETRY_DELAY,
        };
        log.write_locked(None)?;

        info!(path = %log.path.display(), "Event log ready");
        Ok(log)
    }

    /// Overrides the pause before the single retry.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record. A single attempt; errors are returned.
    pub fn append(&self, record: &LogRecord) -> StoreResult<()> {
        self.write_locked(Some(record))
    }

    /// Appends one record with one delayed retry. Never fails: a second
    /// failure is logged and reported as [`AppendOutcome::Dropped`].
    pub fn record(&self, record: &LogRecord) -> AppendOutcome {
        self.record_with(record, |r| self.append(r))
    }

    fn record_with<F>(&self, record: &LogRecord, mut append: F) -> AppendOutcome
    where
        F: FnMut(&LogRecord) -> StoreResult<()>,
    {
        match retry_once(self.retry_delay, || append(record)) {
            Ok(()) => {
                debug!(log = self.kind.file_name(), field = %record.field, "Event recorded");
                AppendOutcome::Written
            }
            Err(err) => {
                warn!(
                    log = self.kind.file_name(),
                    field = %record.field,
                    error = %err,
                    "Event dropped after retry"
                );
                AppendOutcome::Dropped
            }
        }
    }

    /// Reads every record back, skipping the header.
    pub fn read_all(&self) -> StoreResult<Vec<LogRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(LogRecord {
                date: row.get(0).unwrap_or_default().to_string(),
                time: row.get(1).unwrap_or_default().to_string(),
                field: row.get(2).unwrap_or_default().to_string(),
            });
        }
        Ok(records)
    }

    /// Opens for append, locks, writes the header if the file is empty and
    /// then the record, if any. The lock is released when the handle drops.
    fn write_locked(&self, record: Option<&LogRecord>) -> StoreResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        file.lock_exclusive()
            .map_err(|e| StoreError::lock(&self.path, e))?;

        let is_empty = file
            .metadata()
            .map_err(|e| StoreError::io(&self.path, e))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&file);

        if is_empty {
            writer.write_record(self.kind.header())?;
        }
        if let Some(record) = record {
            writer.write_record([&record.date, &record.time, &record.field])?;
        }
        writer.flush().map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn record(field: &str) -> LogRecord {
        LogRecord {
            date: "07/03/25".to_string(),
            time: "09:05:01".to_string(),
            field: field.to_string(),
        }
    }

    fn lines(log: &EventLog) -> Vec<String> {
        std::fs::read_to_string(log.path())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_open_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");

        let ratings = EventLog::open(&data, LogKind::Ratings).unwrap();
        let provinces = EventLog::open(&data, LogKind::Provinces).unwrap();

        assert_eq!(lines(&ratings), vec!["Fecha,Hora,Evaluación"]);
        assert_eq!(lines(&provinces), vec!["Fecha,Hora,Provincia"]);
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        EventLog::open(dir.path(), LogKind::Ratings).unwrap();
        let log = EventLog::open(dir.path(), LogKind::Ratings).unwrap();
        assert_eq!(lines(&log).len(), 1);
    }

    #[test]
    fn test_append_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::open(dir.path(), LogKind::Provinces).unwrap();

        log.append(&record("Córdoba")).unwrap();
        log.append(&record("Santiago del Estero")).unwrap();

        assert_eq!(
            lines(&log),
            vec![
                "Fecha,Hora,Provincia",
                "07/03/25,09:05:01,Córdoba",
                "07/03/25,09:05:01,Santiago del Estero",
            ]
        );
        assert_eq!(log.read_all().unwrap()[1].field, "Santiago del Estero");
    }

    #[test]
    fn test_append_restores_header_after_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::open(dir.path(), LogKind::Ratings).unwrap();
        std::fs::write(log.path(), b"").unwrap();

        log.append(&record("Muy mala")).unwrap();

        assert_eq!(lines(&log), vec!["Fecha,Hora,Evaluación", "07/03/25,09:05:01,Muy mala"]);
    }

    #[test]
    fn test_failed_attempt_then_retry_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::open(dir.path(), LogKind::Ratings)
            .unwrap()
            .with_retry_delay(Duration::ZERO);

        let mut attempts = 0;
        let outcome = log.record_with(&record("Buena"), |r| {
            attempts += 1;
            if attempts == 1 {
                Err(StoreError::io(
                    log.path(),
                    std::io::Error::new(std::io::ErrorKind::WouldBlock, "busy"),
                ))
            } else {
                log.append(r)
            }
        });

        assert_eq!(outcome, AppendOutcome::Written);
        assert_eq!(attempts, 2);
        assert_eq!(lines(&log), vec!["Fecha,Hora,Evaluación", "07/03/25,09:05:01,Buena"]);
    }

    #[test]
    fn test_record_dropped_when_file_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::open(dir.path(), LogKind::Provinces)
            .unwrap()
            .with_retry_delay(Duration::ZERO);

        // replace the log file with a directory so every open fails
        std::fs::remove_file(log.path()).unwrap();
        std::fs::create_dir(log.path()).unwrap();

        assert!(log.append(&record("Salta")).is_err());
        assert_eq!(log.record(&record("Salta")), AppendOutcome::Dropped);
    }

    #[test]
    fn test_concurrent_appends_keep_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(EventLog::open(dir.path(), LogKind::Provinces).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..25 {
                        log.append(&record(&format!("T{}-{}", t, i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let all = lines(&log);
        assert_eq!(all.len(), 1 + 8 * 25);
        assert_eq!(all.iter().filter(|l| l.starts_with("Fecha")).count(), 1);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::open(dir.path(), LogKind::Ratings).unwrap();
        log.append(&record("Buena, gracias")).unwrap();

        assert_eq!(lines(&log)[1], "07/03/25,09:05:01,\"Buena, gracias\"");
        assert_eq!(log.read_all().unwrap()[0].field, "Buena, gracias");
    }
}
