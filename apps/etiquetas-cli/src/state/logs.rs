//! # Log State
//!
//! The two event logs, opened (and created with headers) at startup.

use std::path::Path;
use std::time::Duration;

use etiquetas_core::{LogRecord, Province, Rating};
use etiquetas_store::{clock, AppendOutcome, EventLog, LogKind, StoreResult};

use crate::config::AppConfig;

/// Province and rating logs.
#[derive(Debug, Clone)]
pub struct LogState {
    provinces: EventLog,
    ratings: EventLog,
}

impl LogState {
    /// Opens both logs under the configured data directory.
    pub fn open(config: &AppConfig) -> StoreResult<Self> {
        Self::open_in(&config.data_dir, config.retry_delay())
    }

    /// Opens both logs under `data_dir` with an explicit retry delay.
    pub fn open_in(data_dir: &Path, retry_delay: Duration) -> StoreResult<Self> {
        Ok(LogState {
            provinces: EventLog::open(data_dir, LogKind::Provinces)?.with_retry_delay(retry_delay),
            ratings: EventLog::open(data_dir, LogKind::Ratings)?.with_retry_delay(retry_delay),
        })
    }

    /// Records a label download for `province`, stamped now.
    pub fn record_province(&self, province: &Province) -> AppendOutcome {
        let record = LogRecord::new(&clock::buenos_aires_now(), province.name());
        self.provinces.record(&record)
    }

    /// Records a rating, stamped now.
    pub fn record_rating(&self, rating: Rating) -> AppendOutcome {
        let record = LogRecord::new(&clock::buenos_aires_now(), rating.label());
        self.ratings.record(&record)
    }

    pub fn provinces(&self) -> &EventLog {
        &self.provinces
    }

    pub fn ratings(&self) -> &EventLog {
        &self.ratings
    }
}
