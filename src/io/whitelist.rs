//! Per-area whitelist file parser.
//!
//! One file per area, tab-separated:
//!
//! ```text
//! #Area<TAB>machine translation
//! #Reviewer load<TAB>4
//! #Paper load<TAB>3
//! Ada Lovelace<TAB>ada@example.org
//! *Grace Hopper<TAB>grace@example.org
//! ```
//!
//! The three `#` header lines carry the area name, papers per reviewer,
//! and reviewers per paper. A `*` name prefix forces the reviewer into the
//! area instead of whitelisting them. Later `#` lines and blank lines are
//! skipped. Entries are resolved against the registry later, by
//! [`validation::build_area_table`](crate::validation::build_area_table).

use std::fs;
use std::path::{Path, PathBuf};

use super::LoadError;
use crate::models::{WhitelistEntry, WhitelistSpec};

/// Loads and parses one whitelist file.
pub fn load_whitelist(path: &Path) -> Result<WhitelistSpec, LoadError> {
    tracing::info!(path = %path.display(), "loading whitelist");
    let content = fs::read_to_string(path)?;
    parse_whitelist(&content, &path.display().to_string())
}

/// Value of the `#<label>\t<value>` header line at `idx`.
fn header_value<'a>(
    lines: &[&'a str],
    idx: usize,
    source_name: &str,
) -> Result<&'a str, LoadError> {
    let text = lines.get(idx).copied().unwrap_or("");
    text.strip_prefix('#')
        .and_then(|rest| rest.splitn(2, '\t').nth(1))
        .map(str::trim)
        .ok_or_else(|| LoadError::MalformedHeader {
            source_name: source_name.to_string(),
            line: idx + 1,
            text: text.to_string(),
        })
}

/// Integer-valued header line at `idx`.
fn numeric_header(lines: &[&str], idx: usize, source_name: &str) -> Result<u32, LoadError> {
    let value = header_value(lines, idx, source_name)?;
    value.parse().map_err(|_| LoadError::MalformedHeader {
        source_name: source_name.to_string(),
        line: idx + 1,
        text: lines[idx].to_string(),
    })
}

/// Parses whitelist file content; `source_name` labels error messages.
pub fn parse_whitelist(content: &str, source_name: &str) -> Result<WhitelistSpec, LoadError> {
    let lines: Vec<&str> = content.lines().collect();

    let area = header_value(&lines, 0, source_name)?.to_lowercase();
    let reviewer_load = numeric_header(&lines, 1, source_name)?;
    let paper_load = numeric_header(&lines, 2, source_name)?;

    let mut entries = Vec::new();
    for (idx, raw) in lines.iter().enumerate().skip(3) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split('\t');
        let (Some(name), Some(email), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(LoadError::MalformedLine {
                source_name: source_name.to_string(),
                line: idx + 1,
                text: line.to_string(),
            });
        };

        let name = name.trim();
        let (name, forced) = match name.strip_prefix('*') {
            Some(stripped) => (stripped.trim(), true),
            None => (name, false),
        };
        if forced {
            tracing::debug!(reviewer = name, area = %area, "forced assignment entry");
        }
        entries.push(WhitelistEntry {
            name: name.to_string(),
            email: email.trim().to_lowercase(),
            forced,
        });
    }

    tracing::info!(area = %area, entries = entries.len(), "parsed whitelist");
    Ok(WhitelistSpec {
        area,
        reviewer_load,
        paper_load,
        entries,
    })
}

/// Finds all whitelist files whose path starts with `prefix`, sorted.
///
/// `data/whitelist_` matches `data/whitelist_parsing.tsv`,
/// `data/whitelist_semantics.tsv`, and so on.
pub fn find_whitelist_files(prefix: &str) -> Result<Vec<PathBuf>, LoadError> {
    let prefix_path = Path::new(prefix);
    let dir = match prefix_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let stem = prefix_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_string_lossy()
            .starts_with(stem.as_str());
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    const SAMPLE: &str = "#Area\tMachine Translation\n\
                          #Reviewer load\t4\n\
                          #Paper load\t3\n\
                          Ada Lovelace\tada@x.org\n\
                          *Grace Hopper\tGRACE@x.org\n\
                          \n\
                          # a comment\n\
                          Alan Turing\talan@x.org\n";

    #[test]
    fn test_parse_whitelist() {
        let spec = parse_whitelist(SAMPLE, "test").unwrap();

        assert_eq!(spec.area, "machine translation");
        assert_eq!(spec.reviewer_load, 4);
        assert_eq!(spec.paper_load, 3);
        assert_eq!(spec.entries.len(), 3);

        assert_eq!(spec.entries[0].name, "Ada Lovelace");
        assert!(!spec.entries[0].forced);
        assert_eq!(spec.entries[1].name, "Grace Hopper");
        assert_eq!(spec.entries[1].email, "grace@x.org");
        assert!(spec.entries[1].forced);
        assert!(!spec.entries[2].forced);
    }

    #[test]
    fn test_missing_hash_header_rejected() {
        let content = "Area\tparsing\n#Reviewer load\t4\n#Paper load\t3\n";
        let err = parse_whitelist(content, "test").unwrap_err();
        assert!(matches!(err, LoadError::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn test_non_numeric_load_rejected() {
        let content = "#Area\tparsing\n#Reviewer load\tlots\n#Paper load\t3\n";
        let err = parse_whitelist(content, "test").unwrap_err();
        assert!(matches!(err, LoadError::MalformedHeader { line: 2, .. }));
    }

    #[test]
    fn test_malformed_entry_rejected() {
        let content = "#Area\tparsing\n#Reviewer load\t4\n#Paper load\t3\n\
                       no-tab-in-this-line\n";
        let err = parse_whitelist(content, "test").unwrap_err();
        assert!(matches!(err, LoadError::MalformedLine { line: 4, .. }));
    }

    #[test]
    fn test_truncated_file_rejected() {
        let err = parse_whitelist("#Area\tparsing\n", "test").unwrap_err();
        assert!(matches!(err, LoadError::MalformedHeader { line: 2, .. }));
    }

    #[test]
    fn test_find_whitelist_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["wl_parsing.tsv", "wl_semantics.tsv", "other.txt"] {
            let mut f = File::create(dir.path().join(name)).unwrap();
            writeln!(f, "#Area\tx\n#Reviewer load\t1\n#Paper load\t1").unwrap();
        }

        let prefix = dir.path().join("wl_");
        let files = find_whitelist_files(&prefix.to_string_lossy()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["wl_parsing.tsv", "wl_semantics.tsv"]);
    }
}
