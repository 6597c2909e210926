//! Reviewer recruitment and area assignment for conference organization.
//!
//! Matches reviewer signups against recruitment contact lists and assigns
//! accepted reviewers to subject areas under whitelist, personal-load, and
//! capacity constraints using a single greedy round-robin pass.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Reviewer`, `ReviewerRegistry`, `Area`,
//!   `AreaTable`, `Roster`
//! - **`assign`**: The assignment core — candidate index, round quotas,
//!   greedy engine
//! - **`stats`**: Coverage and choice-satisfaction metrics for a finished
//!   assignment
//! - **`recruitment`**: Contacted-vs-signed-up progress matching
//! - **`validation`**: Pre-assignment configuration checks
//! - **`io`**: Signup CSV, whitelist, and area-stats loaders plus the
//!   assignment table writer
//!
//! # Pipeline
//!
//! ```text
//! signup CSV ──┐
//! whitelists ──┼─ validation ─ candidates ─ round quotas ─ engine ─ roster
//! area stats ──┘                                                      │
//!                                               stats + output tables ┘
//! ```
//!
//! All stages are synchronous and deterministic: areas iterate in
//! lexicographic order, reviewers in signup order, candidates by preference
//! rating with stable tie-breaks. Given identical inputs the output is
//! identical.

pub mod assign;
pub mod io;
pub mod models;
pub mod recruitment;
pub mod stats;
pub mod validation;
