//! Domain models for reviewer assignment.
//!
//! Provides the core data types for representing a reviewer recruitment
//! round: who signed up and with which area preferences, what each area
//! needs and permits, and the resulting assignment.
//!
//! | Type | Role |
//! |------|------|
//! | `Reviewer` | One deduplicated signup with per-area preference ratings |
//! | `ReviewerRegistry` | Identity-resolved, insertion-ordered reviewer store |
//! | `Area` / `AreaTable` | Per-area demand, loads, whitelist, and overrides |
//! | `Roster` | The solution: area → assigned reviewers with effective loads |

mod area;
mod registry;
mod reviewer;
mod roster;

pub use area::{Area, AreaTable, WhitelistEntry, WhitelistSpec};
pub use registry::ReviewerRegistry;
pub use reviewer::{
    reviewer_key, AreaChoice, Rating, Reviewer, ReviewerKey, WANT_CHOICE, WILLING_CHOICE,
    WILL_NOT_CHOICE,
};
pub use roster::{AreaRoster, AssignedReviewer, Roster};
