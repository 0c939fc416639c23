//! Pipe-delimited template ingestion
//!
//! Streams records from the source file and runs each through the per-line
//! state machine: parse, resolve category, coerce flags, insert. Malformed
//! rows and per-row store failures are skipped; only a missing or unreadable
//! source file aborts the run.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::core::store::{TemplateRecord, TemplateStore};

/// Exact number of fields per input line
pub const FIELD_COUNT: usize = 10;

/// Field delimiter in the source file
pub const DELIMITER: u8 = b'|';

/// Options for a load run
#[derive(Debug, Default)]
pub struct LoadOptions {
    /// Validate and report without touching the store
    pub dry_run: bool,
}

/// Counters for a completed load run
#[derive(Debug, Default)]
pub struct LoadStats {
    pub rows_processed: usize,
    /// Rows inserted, or rows that passed validation in a dry run
    pub records_inserted: usize,
    pub skipped_malformed: usize,
    pub skipped_category: usize,
    pub skipped_insert: usize,
}

impl LoadStats {
    pub fn skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_category + self.skipped_insert
    }
}

/// Terminal state of one input line
#[derive(Debug)]
pub enum LineOutcome {
    /// Row written to the catalog
    Inserted {
        id: i64,
        domain: String,
        category: String,
    },
    /// Dry run: row is well-formed and would be inserted
    Valid { domain: String, category: String },
    /// Row not written
    Skipped { reason: SkipReason },
}

/// Why a line was skipped
#[derive(Debug)]
pub enum SkipReason {
    /// Wrong number of fields
    FieldCount(usize),
    /// Record could not be read from the source
    Unreadable(String),
    /// Category lookup-or-create failed
    Category(String),
    /// Row insert failed
    Insert(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount(n) => {
                write!(f, "expected {} fields, got {}", FIELD_COUNT, n)
            }
            SkipReason::Unreadable(e) => write!(f, "unreadable record: {}", e),
            SkipReason::Category(e) => write!(f, "category lookup failed: {}", e),
            SkipReason::Insert(e) => write!(f, "insert failed: {}", e),
        }
    }
}

/// Fatal, whole-run failures
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Stream the source file into the catalog
///
/// Lines are processed strictly in input order, one at a time; `on_line`
/// observes each terminal state as it is reached. Returns the run counters,
/// or a fatal error if the file itself cannot be read.
pub fn load_file<F>(
    store: &TemplateStore,
    path: &Path,
    options: &LoadOptions,
    mut on_line: F,
) -> Result<LoadStats, LoadError>
where
    F: FnMut(usize, &LineOutcome),
{
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut stats = LoadStats::default();

    for (idx, result) in rdr.records().enumerate() {
        let line_no = idx + 1;
        stats.rows_processed += 1;

        let outcome = match result {
            Ok(record) => process_record(store, &record, options),
            Err(e) => LineOutcome::Skipped {
                reason: SkipReason::Unreadable(e.to_string()),
            },
        };

        match &outcome {
            LineOutcome::Inserted { .. } | LineOutcome::Valid { .. } => {
                stats.records_inserted += 1
            }
            LineOutcome::Skipped { reason } => match reason {
                SkipReason::FieldCount(_) | SkipReason::Unreadable(_) => {
                    stats.skipped_malformed += 1
                }
                SkipReason::Category(_) => stats.skipped_category += 1,
                SkipReason::Insert(_) => stats.skipped_insert += 1,
            },
        }

        on_line(line_no, &outcome);
    }

    Ok(stats)
}

/// Run one record through the state machine
fn process_record(
    store: &TemplateStore,
    record: &StringRecord,
    options: &LoadOptions,
) -> LineOutcome {
    if record.len() != FIELD_COUNT {
        return LineOutcome::Skipped {
            reason: SkipReason::FieldCount(record.len()),
        };
    }

    let category = record[0].to_string();
    let domain = record[3].to_string();

    if options.dry_run {
        return LineOutcome::Valid { domain, category };
    }

    let category_id = match store.resolve_category(&category) {
        Ok(id) => id,
        Err(e) => {
            return LineOutcome::Skipped {
                reason: SkipReason::Category(e.to_string()),
            }
        }
    };

    let row = TemplateRecord {
        category_id,
        apex_domain: record[1].to_string(),
        protocol: record[2].to_string(),
        domain: domain.clone(),
        url_path: record[4].to_string(),
        alive: coerce_flag(&record[5], true),
        twofa_required: coerce_flag(&record[6], false),
        high_value: coerce_flag(&record[7], false),
        notes: record[8].to_string(),
        description: record[9].to_string(),
    };

    match store.insert_template(&row) {
        Ok(id) => LineOutcome::Inserted {
            id,
            domain,
            category,
        },
        Err(e) => LineOutcome::Skipped {
            reason: SkipReason::Insert(e.to_string()),
        },
    }
}

/// Coerce a raw flag field to a boolean
///
/// Digits-only text is non-zero/zero; anything else falls back to the
/// field default. Works on digit strings of any length, so inputs too long
/// for an integer type coerce the same way short ones do.
fn coerce_flag(raw: &str, default: bool) -> bool {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.bytes().any(|b| b != b'0')
    } else {
        default
    }
}
