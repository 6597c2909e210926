//! Input loaders and output writers.
//!
//! Everything file-shaped lives here; the assignment core only ever sees
//! the normalized types from [`models`](crate::models). Three input
//! formats:
//!
//! - Signup sheet: CSV export of the recruitment form (`signup`)
//! - Whitelist files: one tab-separated file per area (`whitelist`)
//! - Area stats: `area\tsubmissions` lines (`area_stats`)
//!
//! and the assignment-table writer plus text report rendering (`report`).

mod area_stats;
mod report;
mod signup;
mod whitelist;

pub use area_stats::{load_area_stats, parse_area_stats, AreaStats};
pub use report::{render_recruitment, render_stats, sanitize_area_filename, write_assignment_tables};
pub use signup::{load_contacts, load_signups, parse_contacts, parse_signups};
pub use whitelist::{find_whitelist_files, load_whitelist, parse_whitelist};

use thiserror::Error;

/// Errors raised while loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying file-system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level parse failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The signup sheet lacks a required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A whitelist file header line is malformed.
    #[error("{source_name}: malformed header on line {line}: {text:?}")]
    MalformedHeader {
        /// File the line came from.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A tab-separated data line is malformed.
    #[error("{source_name}: malformed line {line}: {text:?}")]
    MalformedLine {
        /// File the line came from.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
}
