//! Batch driver for reviewer assignment and recruitment checks.
//!
//! `assign` runs the full pipeline: load signups, whitelists, and area
//! stats; validate; assign; print the summary; write the tables.
//! `check` matches a contact list against the signup sheet for one area.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use area_assign::assign::{AssignConfig, AssignmentEngine, CandidateIndex, RoundPlan};
use area_assign::io::{
    find_whitelist_files, load_area_stats, load_contacts, load_signups, load_whitelist,
    render_recruitment, render_stats, write_assignment_tables,
};
use area_assign::recruitment::RecruitmentReport;
use area_assign::stats::AssignmentStats;
use area_assign::validation::build_area_table;

#[derive(Parser)]
#[command(name = "area-assign", version, about = "Reviewer recruitment and area assignment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign signed-up reviewers to areas.
    Assign {
        /// Signup sheet (CSV export of the recruitment form).
        reviewer_csv: PathBuf,
        /// Per-area submission counts (tab-separated).
        area_stats: PathBuf,
        /// Path prefix shared by all whitelist files.
        whitelist_prefix: String,
        /// Path prefix for the output assignment tables.
        output_prefix: String,
        /// Ignore whitelists; everyone who rated an area is a candidate.
        #[arg(long)]
        accept_all: bool,
        /// Minimum reviewers per area before it counts as full.
        #[arg(long, default_value_t = 10)]
        min_reviewers: usize,
        /// Area that receives extra reviewers each round (repeatable).
        #[arg(long = "priority-area")]
        priority_areas: Vec<String>,
        /// Quota multiplier for priority areas.
        #[arg(long, default_value_t = 2)]
        priority_factor: u32,
        /// Area that takes its entire whitelist up front (repeatable).
        #[arg(long = "assign-all-area")]
        assign_all_areas: Vec<String>,
    },
    /// Check recruitment progress for one area.
    Check {
        /// Signup sheet (CSV export of the recruitment form).
        reviewer_csv: PathBuf,
        /// Contact list with name/email and optional decline/chair columns.
        contacts_csv: PathBuf,
        /// Area to report choice counts for.
        area: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Assign {
            reviewer_csv,
            area_stats,
            whitelist_prefix,
            output_prefix,
            accept_all,
            min_reviewers,
            priority_areas,
            priority_factor,
            assign_all_areas,
        } => {
            let registry = load_signups(&reviewer_csv)
                .with_context(|| format!("loading signups from {}", reviewer_csv.display()))?;
            let stats = load_area_stats(&area_stats)
                .with_context(|| format!("loading area stats from {}", area_stats.display()))?;

            let whitelist_files = find_whitelist_files(&whitelist_prefix)?;
            if whitelist_files.is_empty() {
                bail!("no whitelist files match prefix {whitelist_prefix:?}");
            }
            let whitelists = whitelist_files
                .iter()
                .map(|path| load_whitelist(path))
                .collect::<Result<Vec<_>, _>>()?;

            let mut table = match build_area_table(&whitelists, &stats.papers, &registry) {
                Ok(table) => table,
                Err(errors) => {
                    for error in &errors {
                        eprintln!("error: {}", error.message);
                    }
                    bail!("configuration invalid: {} error(s)", errors.len());
                }
            };
            for name in &priority_areas {
                match table.get_mut(name) {
                    Some(area) => area.is_priority = true,
                    None => bail!("--priority-area {name:?} is not a known area"),
                }
            }
            for name in &assign_all_areas {
                match table.get_mut(name) {
                    Some(area) => area.assign_all = true,
                    None => bail!("--assign-all-area {name:?} is not a known area"),
                }
            }

            let config = AssignConfig::new()
                .with_accept_all(accept_all)
                .with_min_reviewers(min_reviewers)
                .with_priority_factor(priority_factor);
            let candidates = CandidateIndex::build(&registry, &table, config.accept_all_reviewers);
            let plan = RoundPlan::compute(&table, config.priority_factor);
            let roster = AssignmentEngine::new()
                .with_config(config)
                .assign(&registry, &table, candidates, &plan);

            let summary = AssignmentStats::calculate(&roster, &registry, &table);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            render_stats(&mut out, &summary)?;
            out.flush()?;

            write_assignment_tables(&output_prefix, &roster)
                .with_context(|| format!("writing assignment tables to {output_prefix}*"))?;
            Ok(())
        }
        Command::Check {
            reviewer_csv,
            contacts_csv,
            area,
        } => {
            let registry = load_signups(&reviewer_csv)
                .with_context(|| format!("loading signups from {}", reviewer_csv.display()))?;
            let contacts = load_contacts(&contacts_csv)
                .with_context(|| format!("loading contacts from {}", contacts_csv.display()))?;

            let report = RecruitmentReport::compute(&registry, &contacts, &area);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            render_recruitment(&mut out, &report)?;
            out.flush()?;
            Ok(())
        }
    }
}
