//! Step journal for composed test steps.
//!
//! Every composed action and assertion run through an
//! [`Automator`](crate::automator::Automator) is appended to a [`Journal`]
//! as a [`StepRecord`]. The journal keeps the most recent records in memory
//! and can optionally persist every record as JSON Lines, so a failed run
//! leaves behind a readable trail of what was tapped, typed and captured.
//!
//! # Example
//!
//! ```
//! use tapwright_core::journal::{Journal, StepOutcome, StepRecord};
//!
//! let journal = Journal::new();
//! journal.record(StepRecord::new("tap", None, StepOutcome::Passed, 12));
//! assert_eq!(journal.len(), 1);
//! assert!(journal.failures().is_empty());
//! ```

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::selector::Selector;

/// Maximum number of records to retain in memory.
const MAX_JOURNAL_SIZE: usize = 1000;

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepOutcome {
    Passed,
    Failed(String),
}

/// A recorded step with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Unique identifier for this record.
    pub id: Uuid,

    /// When the step finished.
    pub timestamp: DateTime<Utc>,

    /// Short step name, e.g. `tap` or `assert_present`.
    pub step: String,

    /// The selector the step targeted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,

    pub outcome: StepOutcome,

    /// Wall time the step took, including waits and scrolls.
    pub duration_ms: u64,

    /// Screenshot tags captured during the step, in capture order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
}

impl StepRecord {
    /// Creates a record with a fresh UUID, timestamped now.
    pub fn new(
        step: impl Into<String>,
        selector: Option<Selector>,
        outcome: StepOutcome,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            step: step.into(),
            selector,
            outcome,
            duration_ms,
            screenshots: Vec::new(),
        }
    }

    pub fn with_screenshots(mut self, screenshots: Vec<String>) -> Self {
        self.screenshots = screenshots;
        self
    }

    pub fn passed(&self) -> bool {
        self.outcome == StepOutcome::Passed
    }
}

/// Ring buffer of step records with an optional JSON Lines sink.
#[derive(Default)]
pub struct Journal {
    records: Mutex<VecDeque<StepRecord>>,
    log_writer: Mutex<Option<BufWriter<File>>>,
}

impl Journal {
    /// An in-memory journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal that also appends every record to `path` as JSON Lines.
    pub fn with_log_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            records: Mutex::new(VecDeque::new()),
            log_writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    pub fn record(&self, record: StepRecord) {
        if let Ok(mut guard) = self.log_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let written = serde_json::to_string(&record)
                    .map_err(std::io::Error::from)
                    .and_then(|line| {
                        writeln!(writer, "{}", line)?;
                        writer.flush()
                    });
                if let Err(e) = written {
                    warn!(error = %e, "failed to persist step record");
                }
            }
        }

        if let Ok(mut records) = self.records.lock() {
            if records.len() >= MAX_JOURNAL_SIZE {
                records.pop_front();
            }
            records.push_back(record);
        }
    }

    /// A snapshot of the retained records, oldest first.
    pub fn records(&self) -> Vec<StepRecord> {
        self.records
            .lock()
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Retained records whose step failed.
    pub fn failures(&self) -> Vec<StepRecord> {
        self.records().into_iter().filter(|r| !r.passed()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}
