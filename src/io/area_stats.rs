//! Area submission-count loader.
//!
//! Tab-separated `area\tsubmissions` lines; `#` comments and blank lines
//! are skipped. Area names are lower-cased to join with the whitelist and
//! signup data.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::LoadError;

/// Per-area submission counts.
#[derive(Debug, Clone, Default)]
pub struct AreaStats {
    /// Papers per area, keyed by lower-cased name.
    pub papers: BTreeMap<String, u32>,
    /// Sum of all submissions.
    pub total_submissions: u32,
}

/// Loads an area-stats file.
pub fn load_area_stats(path: &Path) -> Result<AreaStats, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_area_stats(&content, &path.display().to_string())
}

/// Parses area-stats content; `source_name` labels error messages.
pub fn parse_area_stats(content: &str, source_name: &str) -> Result<AreaStats, LoadError> {
    let mut stats = AreaStats::default();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let malformed = || LoadError::MalformedLine {
            source_name: source_name.to_string(),
            line: idx + 1,
            text: line.to_string(),
        };

        let mut parts = line.split('\t');
        let (Some(area), Some(count), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let submissions: u32 = count.trim().parse().map_err(|_| malformed())?;
        stats
            .papers
            .insert(area.trim().to_lowercase(), submissions);
        stats.total_submissions += submissions;
    }

    tracing::info!(
        areas = stats.papers.len(),
        total_submissions = stats.total_submissions,
        "loaded area stats"
    );
    Ok(stats)
}
