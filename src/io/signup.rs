//! Signup-sheet and contact-list CSV loaders.
//!
//! The signup sheet is a spreadsheet export: one header row, then one row
//! per signup. Column names are matched case-insensitively. Area columns
//! look like `Areas [Machine Translation (MT, ...)]`; the area name is the
//! text between `[` and the opening `(`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::LoadError;
use crate::models::{AreaChoice, Rating, ReviewerRegistry};
use crate::recruitment::ContactRecord;

/// Accepted signup-sheet name columns, most specific first.
const NAME_COLUMNS: [&str; 2] = ["name (first last)", "name"];
/// Accepted signup-sheet email columns, most specific first.
const EMAIL_COLUMNS: [&str; 2] = ["email address", "email"];
/// Optional personal review-load column.
const LOAD_COLUMN: &str = "reduced review load (optional)";

/// Lower-cased header cells mapped to column indexes.
struct ColumnMap {
    headers: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_headers(record: &csv::StringRecord) -> Self {
        let headers: Vec<String> = record.iter().map(|h| h.trim().to_lowercase()).collect();
        let by_name = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self { headers, by_name }
    }

    fn find(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|c| self.by_name.get(*c)).copied()
    }

    /// Columns shaped like `areas [<name> (...)]`, with the extracted name.
    fn area_columns(&self) -> Vec<(usize, String)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                let rest = h.strip_prefix("areas [")?;
                let end = rest.find(" (")?;
                Some((i, rest[..end].to_string()))
            })
            .collect()
    }
}

/// Field at `idx`, empty for short rows.
fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("")
}

/// Loads the signup sheet into a deduplicated registry.
pub fn load_signups(path: &Path) -> Result<ReviewerRegistry, LoadError> {
    parse_signups(File::open(path)?)
}

/// Parses signup CSV data into a deduplicated registry.
pub fn parse_signups<R: Read>(reader: R) -> Result<ReviewerRegistry, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?);

    let name_col = columns
        .find(&NAME_COLUMNS)
        .ok_or_else(|| LoadError::MissingColumn("name".into()))?;
    let email_col = columns
        .find(&EMAIL_COLUMNS)
        .ok_or_else(|| LoadError::MissingColumn("email".into()))?;
    let load_col = columns.find(&[LOAD_COLUMN]);
    let area_columns = columns.area_columns();

    let mut registry = ReviewerRegistry::new();
    let mut rows = 0usize;
    for result in csv_reader.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows += 1;

        let name = field(&record, name_col);
        let email = field(&record, email_col).trim().to_lowercase();
        if !email.contains('@') || email.contains(' ') {
            tracing::warn!(name, email = %email, "invalid-looking email address");
        }

        let max_load = load_col.and_then(|col| field(&record, col).trim().parse::<u32>().ok());
        if let Some(load) = max_load {
            tracing::info!(name, email = %email, load, "registered personal review-load cap");
        }

        let choices: Vec<AreaChoice> = area_columns
            .iter()
            .filter_map(|(col, area)| {
                Rating::parse_signup(field(&record, *col))
                    .map(|rating| AreaChoice::new(area.clone(), rating))
            })
            .collect();

        registry.insert(name, &email, max_load, choices);
    }

    tracing::info!(rows, reviewers = registry.len(), "loaded signup sheet");
    Ok(registry)
}

/// Loads a recruitment contact list.
///
/// Requires `name` and `email` columns; optional `decline` and `chair`
/// columns count as set when non-empty. Other columns are ignored.
pub fn load_contacts(path: &Path) -> Result<Vec<ContactRecord>, LoadError> {
    parse_contacts(File::open(path)?)
}

/// Parses contact-list CSV data.
pub fn parse_contacts<R: Read>(reader: R) -> Result<Vec<ContactRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?);

    let name_col = columns.find(&NAME_COLUMNS);
    let email_col = columns.find(&EMAIL_COLUMNS);
    let decline_col = columns.find(&["decline"]);
    let chair_col = columns.find(&["chair"]);

    let mut contacts = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let get = |col: Option<usize>| col.map_or("", |c| field(&record, c));
        contacts.push(ContactRecord {
            name: get(name_col).trim().to_string(),
            email: get(email_col).trim().to_string(),
            declined: !get(decline_col).trim().is_empty(),
            chair: !get(chair_col).trim().is_empty(),
        });
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rating, WANT_CHOICE, WILLING_CHOICE, WILL_NOT_CHOICE};

    #[test]
    fn test_parse_signups_basic() {
        let csv_data = format!(
            "Name,Email,Areas [Parsing (P1)],Areas [Semantics (S1)]\n\
             Ada Lovelace,ada@x.org,{WANT_CHOICE},{WILLING_CHOICE}\n\
             Grace Hopper,grace@x.org,{WILL_NOT_CHOICE},\n"
        );
        let reg = parse_signups(csv_data.as_bytes()).unwrap();

        assert_eq!(reg.len(), 2);
        let ada = reg.get(reg.key_for_email("ada@x.org").unwrap()).unwrap();
        assert_eq!(ada.rating_for("parsing"), Some(Rating::First));
        assert_eq!(ada.rating_for("semantics"), Some(Rating::Second));

        let grace = reg.get(reg.key_for_email("grace@x.org").unwrap()).unwrap();
        assert!(grace.choices.is_empty());
    }

    #[test]
    fn test_parse_signups_alternate_columns_and_load() {
        let csv_data = format!(
            "Name (First Last),Email Address,Reduced review load (optional),Areas [Parsing (P1)]\n\
             Ada Lovelace,ada@x.org,3,{WANT_CHOICE}\n\
             Grace Hopper,grace@x.org,not-a-number,{WANT_CHOICE}\n"
        );
        let reg = parse_signups(csv_data.as_bytes()).unwrap();

        let ada = reg.get(reg.key_for_email("ada@x.org").unwrap()).unwrap();
        assert_eq!(ada.max_load, Some(3));
        let grace = reg.get(reg.key_for_email("grace@x.org").unwrap()).unwrap();
        assert_eq!(grace.max_load, None);
    }

    #[test]
    fn test_parse_signups_merges_duplicate_rows() {
        let csv_data = format!(
            "Name,Email,Areas [Parsing (P1)]\n\
             Ada,ada@x.org,{WILLING_CHOICE}\n\
             Ada Lovelace,ADA@x.org,{WANT_CHOICE}\n"
        );
        let reg = parse_signups(csv_data.as_bytes()).unwrap();

        assert_eq!(reg.len(), 1);
        let ada = reg.get(reg.key_for_email("ada@x.org").unwrap()).unwrap();
        assert_eq!(ada.rating_for("parsing"), Some(Rating::First));
    }

    #[test]
    fn test_parse_signups_missing_email_column() {
        let err = parse_signups("Name,Whatever\nAda,x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == "email"));
    }

    #[test]
    fn test_parse_signups_skips_blank_rows_and_short_rows() {
        let csv_data = format!(
            "Name,Email,Areas [Parsing (P1)]\n\
             ,,\n\
             Ada,ada@x.org,{WANT_CHOICE}\n\
             Short,short@x.org\n"
        );
        let reg = parse_signups(csv_data.as_bytes()).unwrap();
        assert_eq!(reg.len(), 2);
        let short = reg.get(reg.key_for_email("short@x.org").unwrap()).unwrap();
        assert!(short.choices.is_empty());
    }

    #[test]
    fn test_area_column_requires_paren() {
        // Without the "(...)" suffix the column is not an area column.
        let csv_data = "Name,Email,Areas [Parsing]\nAda,ada@x.org,x\n";
        let reg = parse_signups(csv_data.as_bytes()).unwrap();
        let ada = reg.get(reg.key_for_email("ada@x.org").unwrap()).unwrap();
        assert!(ada.choices.is_empty());
    }

    #[test]
    fn test_parse_contacts() {
        let csv_data = "Name,Email,Decline,Chair,Notes\n\
                        Ada,ada@x.org,,,invited twice\n\
                        Bob,bob@x.org,yes,,\n\
                        Cara,cara@x.org,,semantics,\n";
        let contacts = parse_contacts(csv_data.as_bytes()).unwrap();

        assert_eq!(contacts.len(), 3);
        assert!(!contacts[0].declined && !contacts[0].chair);
        assert!(contacts[1].declined);
        assert!(contacts[2].chair);
    }

    #[test]
    fn test_parse_contacts_minimal_columns() {
        let contacts = parse_contacts("Name,Email\nAda,ada@x.org\n".as_bytes()).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].email, "ada@x.org");
    }
}
