//! Pre-assignment configuration checks.
//!
//! Resolves parsed whitelist files against the reviewer registry and the
//! area submission counts, producing the final [`AreaTable`] — or every
//! configuration error found, so a chair can fix them all in one pass.
//! Detects:
//! - Whitelist or forced entries referencing an unknown reviewer
//! - A reviewer forced to more than one area
//! - Areas present in only one of the whitelist set / stats file
//! - Duplicate whitelist files and non-positive loads
//!
//! All of these abort the run before any assignment work happens.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Area, AreaTable, ReviewerKey, ReviewerRegistry, WhitelistSpec};

/// A configuration error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A whitelist or forced entry references an email with no signup.
    UnknownReviewer,
    /// A reviewer is forced to two different areas.
    ConflictingForcedArea,
    /// A whitelist area has no entry in the submission stats.
    MissingAreaStats,
    /// A stats area has no whitelist file.
    MissingWhitelist,
    /// Two whitelist files name the same area.
    DuplicateArea,
    /// A reviewer load or paper load of zero.
    InvalidLoad,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Builds the validated area table from parsed whitelists, per-area paper
/// counts, and the signup registry.
///
/// Returns the table only when the configuration is clean; otherwise all
/// detected errors.
pub fn build_area_table(
    whitelists: &[WhitelistSpec],
    paper_counts: &BTreeMap<String, u32>,
    registry: &ReviewerRegistry,
) -> Result<AreaTable, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut table = AreaTable::new();
    let mut forced_area: HashMap<ReviewerKey, String> = HashMap::new();

    for spec in whitelists {
        let name = spec.area.to_lowercase();
        if table.contains(&name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateArea,
                format!("Duplicate whitelist for area '{name}'"),
            ));
            continue;
        }
        if spec.reviewer_load == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLoad,
                format!("Area '{name}' has a reviewer load of zero"),
            ));
        }
        if spec.paper_load == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLoad,
                format!("Area '{name}' has a paper load of zero"),
            ));
        }

        let paper_count = match paper_counts.get(&name) {
            Some(&count) => count,
            None => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingAreaStats,
                    format!("Area '{name}' has a whitelist but no submission count"),
                ));
                0
            }
        };

        let mut area = Area::new(name.clone(), paper_count, spec.reviewer_load, spec.paper_load);
        for entry in &spec.entries {
            let Some(key) = registry.key_for_email(&entry.email) else {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReviewer,
                    format!(
                        "Whitelist for area '{name}' contains unknown reviewer \"{}\" <{}>",
                        entry.name, entry.email
                    ),
                ));
                continue;
            };
            if entry.forced {
                match forced_area.get(key) {
                    Some(other) if other != &name => {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::ConflictingForcedArea,
                            format!(
                                "Reviewer \"{}\" <{}> is forced to both '{other}' and '{name}'",
                                entry.name, entry.email
                            ),
                        ));
                    }
                    _ => {
                        forced_area.insert(key.clone(), name.clone());
                        area.forced.insert(key.clone());
                    }
                }
            } else {
                area.whitelist.insert(key.clone());
            }
        }
        table.insert(area);
    }

    for name in paper_counts.keys() {
        if !table.contains(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingWhitelist,
                format!("Area '{name}' has submissions but no whitelist file"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(table)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WhitelistEntry;

    fn registry() -> ReviewerRegistry {
        let mut reg = ReviewerRegistry::new();
        reg.insert("Ada", "ada@x.org", None, vec![]);
        reg.insert("Grace", "grace@x.org", None, vec![]);
        reg
    }

    fn entry(name: &str, email: &str, forced: bool) -> WhitelistEntry {
        WhitelistEntry {
            name: name.into(),
            email: email.into(),
            forced,
        }
    }

    fn spec(area: &str, entries: Vec<WhitelistEntry>) -> WhitelistSpec {
        WhitelistSpec {
            area: area.into(),
            reviewer_load: 4,
            paper_load: 3,
            entries,
        }
    }

    fn counts(areas: &[(&str, u32)]) -> BTreeMap<String, u32> {
        areas.iter().map(|&(a, n)| (a.to_string(), n)).collect()
    }

    #[test]
    fn test_clean_configuration() {
        let reg = registry();
        let specs = vec![spec(
            "parsing",
            vec![entry("Ada", "ada@x.org", false), entry("Grace", "grace@x.org", true)],
        )];

        let table = build_area_table(&specs, &counts(&[("parsing", 12)]), &reg).unwrap();
        let area = table.get("parsing").unwrap();
        assert_eq!(area.paper_count, 12);
        assert_eq!(area.whitelist.len(), 1);
        assert_eq!(area.forced.len(), 1);
        assert!(area.whitelist.contains(reg.key_for_email("ada@x.org").unwrap()));
        assert!(area.forced.contains(reg.key_for_email("grace@x.org").unwrap()));
    }

    #[test]
    fn test_unknown_reviewer_is_fatal() {
        let specs = vec![spec("parsing", vec![entry("Ghost", "ghost@x.org", false)])];
        let errors =
            build_area_table(&specs, &counts(&[("parsing", 1)]), &registry()).unwrap_err();

        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownReviewer));
    }

    #[test]
    fn test_forced_to_two_areas_is_fatal() {
        let specs = vec![
            spec("parsing", vec![entry("Ada", "ada@x.org", true)]),
            spec("semantics", vec![entry("Ada", "ada@x.org", true)]),
        ];
        let errors = build_area_table(
            &specs,
            &counts(&[("parsing", 1), ("semantics", 1)]),
            &registry(),
        )
        .unwrap_err();

        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ConflictingForcedArea));
    }

    #[test]
    fn test_forced_twice_to_same_area_is_fine() {
        let specs = vec![spec(
            "parsing",
            vec![entry("Ada", "ada@x.org", true), entry("Ada", "ada@x.org", true)],
        )];
        let table = build_area_table(&specs, &counts(&[("parsing", 1)]), &registry()).unwrap();
        assert_eq!(table.get("parsing").unwrap().forced.len(), 1);
    }

    #[test]
    fn test_area_name_mismatches() {
        let specs = vec![spec("parsing", vec![])];
        let errors = build_area_table(&specs, &counts(&[("semantics", 5)]), &registry()).unwrap_err();

        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingAreaStats));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingWhitelist));
    }

    #[test]
    fn test_zero_loads_rejected() {
        let mut bad = spec("parsing", vec![]);
        bad.reviewer_load = 0;
        bad.paper_load = 0;
        let errors = build_area_table(&[bad], &counts(&[("parsing", 1)]), &registry()).unwrap_err();

        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidLoad)
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_whitelist_rejected() {
        let specs = vec![spec("parsing", vec![]), spec("Parsing", vec![])];
        let errors = build_area_table(&specs, &counts(&[("parsing", 1)]), &registry()).unwrap_err();

        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateArea));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let specs = vec![spec(
            "parsing",
            vec![entry("Ghost", "ghost@x.org", false), entry("Phantom", "phantom@x.org", true)],
        )];
        let errors = build_area_table(&specs, &BTreeMap::new(), &registry()).unwrap_err();
        assert!(errors.len() >= 3); // two unknown reviewers + missing stats
    }
}
