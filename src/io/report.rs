//! Assignment-table writer and text report rendering.
//!
//! The writer produces one combined table plus one file per area, both
//! tab-separated with a `#`-prefixed header line so they round-trip
//! through the whitelist-style loaders. The renderers turn the stats
//! structs into the plain-text summaries printed at the end of a run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::models::Roster;
use crate::recruitment::RecruitmentReport;
use crate::stats::AssignmentStats;

/// Replaces filesystem-hostile characters in an area name.
pub fn sanitize_area_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '/' | '&' => '_',
            c => c,
        })
        .collect()
}

/// Writes `<prefix>_all_list.csv` plus `<prefix><area>.csv` per area.
///
/// The max-papers column is filled only when a personal load cap bound;
/// otherwise the area default applies and the cell is left empty.
pub fn write_assignment_tables(prefix: &str, roster: &Roster) -> io::Result<()> {
    let all_path = PathBuf::from(format!("{prefix}_all_list.csv"));
    let mut all = BufWriter::new(File::create(&all_path)?);
    writeln!(all, "#name\temail\tmax papers to assign\tarea")?;

    for (area, area_roster) in roster.iter() {
        let area_path = PathBuf::from(format!("{prefix}{}.csv", sanitize_area_filename(area)));
        let mut per_area = BufWriter::new(File::create(&area_path)?);
        writeln!(per_area, "#name\temail\tmax papers to assign")?;

        for assigned in &area_roster.reviewers {
            let cap = if assigned.capped {
                assigned.load.to_string()
            } else {
                String::new()
            };
            writeln!(all, "{}\t{}\t{}\t{}", assigned.name, assigned.email, cap, area)?;
            writeln!(per_area, "{}\t{}\t{}", assigned.name, assigned.email, cap)?;
        }
        per_area.flush()?;
    }
    all.flush()?;

    tracing::info!(prefix, areas = roster.areas.len(), "wrote assignment tables");
    Ok(())
}

/// Renders the end-of-run assignment summary.
pub fn render_stats<W: Write>(out: &mut W, stats: &AssignmentStats) -> io::Result<()> {
    if stats.all_areas_filled {
        writeln!(out, "All areas full.")?;
    } else {
        writeln!(out, "Not all areas full.")?;
        writeln!(out, "Needs reviewers: {}", stats.unfilled_areas.join("   |   "))?;
    }

    for cov in &stats.per_area {
        let marker = if cov.is_short() { "* " } else { "" };
        writeln!(
            out,
            "{marker}{} (Reviewers: {}, Max review capacity: {}, Actual reviews needed: {}, Coverage: {:.0}%)",
            cov.area, cov.reviewer_count, cov.max_review_capacity, cov.papers, cov.coverage_pct
        )?;
    }

    writeln!(out, "Average choice rating: {:.2}", stats.average_rating)?;
    writeln!(out, "Reviewers with first choice: {}", stats.first_choice)?;
    writeln!(out, "Reviewers with second choice: {}", stats.second_choice)?;
    writeln!(out, "Reviewers with no choice: {}", stats.no_choice)?;
    writeln!(out, "Assigned reviewers: {}", stats.assigned_total)?;
    writeln!(out, "Total reviewers: {}", stats.total_reviewers)?;
    writeln!(out, "Unassigned reviewers: {}", stats.unassigned.join(", "))?;
    Ok(())
}

/// Renders a recruitment progress report.
pub fn render_recruitment<W: Write>(out: &mut W, report: &RecruitmentReport) -> io::Result<()> {
    writeln!(out, "Reviewers who haven't signed up yet:")?;
    for (name, email) in &report.not_responded {
        writeln!(out, "\t{name}\t{email}")?;
    }

    writeln!(out, "Reviewers signed up who weren't contacted:")?;
    for (name, email, rating) in &report.uncontacted_signups {
        writeln!(out, "\t{name}\t{email}\t{}", rating.value())?;
    }

    writeln!(out, "Number of people who haven't responded: {}", report.not_responded.len())?;
    writeln!(out, "Number of people who are missing an email address: {}", report.missing_email)?;
    writeln!(out, "Number of signed up reviewers from contact list: {}", report.signed_up)?;
    writeln!(out, "\tListed area as first choice: {}", report.first_choice)?;
    writeln!(out, "\tListed area as second choice: {}", report.second_choice)?;
    writeln!(out, "\tListed area as no choice: {}", report.no_choice)?;
    writeln!(out, "Number of people who declined: {}", report.declined)?;
    writeln!(out, "Number of people who are chairing another area: {}", report.chairing)?;
    writeln!(
        out,
        "Number of people who signed up but weren't contacted: {}",
        report.uncontacted_signups.len()
    )?;
    writeln!(out, "\tFirst choice: {}", report.uncontacted_first)?;
    writeln!(out, "\tSecond choice: {}", report.uncontacted_second)?;
    writeln!(out, "Total number of all reviewers who signed up: {}", report.total_signups)?;
    writeln!(out, "Total number of reviewers in contact list: {}", report.total_contacts)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AreaRoster, AssignedReviewer};
    use crate::stats::AreaCoverage;
    use std::fs;

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        roster.areas.insert(
            "machine translation".into(),
            AreaRoster {
                reviewers: vec![
                    AssignedReviewer {
                        key: "ada_ada@x.org".into(),
                        name: "Ada".into(),
                        email: "ada@x.org".into(),
                        load: 2,
                        capped: true,
                    },
                    AssignedReviewer {
                        key: "bob_bob@x.org".into(),
                        name: "Bob".into(),
                        email: "bob@x.org".into(),
                        load: 4,
                        capped: false,
                    },
                ],
                load_units: 6,
                full: true,
            },
        );
        roster
    }

    #[test]
    fn test_write_assignment_tables() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("out_").to_string_lossy().into_owned();

        write_assignment_tables(&prefix, &sample_roster()).unwrap();

        let all = fs::read_to_string(format!("{prefix}_all_list.csv")).unwrap();
        assert!(all.starts_with("#name\temail\tmax papers to assign\tarea\n"));
        assert!(all.contains("Ada\tada@x.org\t2\tmachine translation"));
        assert!(all.contains("Bob\tbob@x.org\t\tmachine translation"));

        // Spaces in the area name become underscores in the per-area file.
        let per_area = fs::read_to_string(format!("{prefix}machine_translation.csv")).unwrap();
        assert!(per_area.contains("Ada\tada@x.org\t2"));
        assert!(!per_area.contains("area"));
    }

    #[test]
    fn test_sanitize_area_filename() {
        assert_eq!(sanitize_area_filename("speech & signal/ml"), "speech___signal_ml");
        assert_eq!(sanitize_area_filename("parsing"), "parsing");
    }

    #[test]
    fn test_render_stats_flags_short_areas() {
        let stats = AssignmentStats {
            per_area: vec![
                AreaCoverage {
                    area: "parsing".into(),
                    reviewer_count: 2,
                    load_units: 6,
                    max_review_capacity: 2,
                    papers: 10,
                    coverage_pct: 20.0,
                    full: false,
                },
                AreaCoverage {
                    area: "semantics".into(),
                    reviewer_count: 5,
                    load_units: 30,
                    max_review_capacity: 10,
                    papers: 10,
                    coverage_pct: 100.0,
                    full: true,
                },
            ],
            average_rating: 1.25,
            first_choice: 6,
            second_choice: 1,
            no_choice: 0,
            assigned_total: 7,
            total_reviewers: 9,
            unassigned: vec!["x_x@x.org".into(), "y_y@x.org".into()],
            all_areas_filled: false,
            unfilled_areas: vec!["parsing".into()],
        };

        let mut buf = Vec::new();
        render_stats(&mut buf, &stats).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Not all areas full."));
        assert!(text.contains("Needs reviewers: parsing"));
        assert!(text.contains("* parsing (Reviewers: 2,"));
        assert!(text.contains("\nsemantics (Reviewers: 5,"));
        assert!(text.contains("Coverage: 100%"));
        assert!(text.contains("Average choice rating: 1.25"));
        assert!(text.contains("Unassigned reviewers: x_x@x.org, y_y@x.org"));
    }

    #[test]
    fn test_render_recruitment() {
        let report = RecruitmentReport {
            not_responded: vec![("Sam".into(), "sam@x.org".into())],
            missing_email: 1,
            signed_up: 2,
            first_choice: 1,
            second_choice: 1,
            no_choice: 0,
            declined: 1,
            chairing: 1,
            uncontacted_signups: vec![(
                "Ada".into(),
                "ada@x.org".into(),
                crate::models::Rating::First,
            )],
            uncontacted_first: 1,
            uncontacted_second: 0,
            total_signups: 3,
            total_contacts: 6,
        };

        let mut buf = Vec::new();
        render_recruitment(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("\tSam\tsam@x.org"));
        assert!(text.contains("\tAda\tada@x.org\t1"));
        assert!(text.contains("Number of people who haven't responded: 1"));
        assert!(text.contains("Number of people who declined: 1"));
    }
}
