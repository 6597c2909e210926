//! Reviewer model and identity derivation.
//!
//! A reviewer is identified by a key derived from name and email so that
//! signup rows, whitelist entries, and contact lists all join on the same
//! identity regardless of casing or stray whitespace.

use serde::{Deserialize, Serialize};

/// Canonical reviewer identity.
///
/// Derived once by [`reviewer_key`] and used everywhere a reviewer is
/// referenced: candidate queues, whitelists, forced assignments, rosters.
pub type ReviewerKey = String;

/// Signup-sheet cell marking an area as a first choice.
pub const WANT_CHOICE: &str = "Want to review (1st Choices)";
/// Signup-sheet cell marking an area as a second choice.
pub const WILLING_CHOICE: &str = "Willing to review (2nd Choices)";
/// Signup-sheet cell explicitly opting out of an area.
pub const WILL_NOT_CHOICE: &str = "Will not review";

/// Derives the canonical key for a reviewer.
///
/// Case-insensitive and whitespace-collapsed, so signup rows, whitelist
/// entries, and contact lists with cosmetic differences still join.
///
/// # Example
/// ```
/// use area_assign::models::reviewer_key;
///
/// let a = reviewer_key(" Ada  Lovelace ", "ADA@example.org");
/// let b = reviewer_key("ada lovelace", "ada@example.org ");
/// assert_eq!(a, b);
/// ```
pub fn reviewer_key(name: &str, email: &str) -> ReviewerKey {
    let name_part = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    let email_part = email.trim().to_lowercase().replace(' ', "_");
    format!("{name_part}_{email_part}")
}

/// How strongly a reviewer wants an area.
///
/// Ordered so that `First < Second`: a smaller rating is a better one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// "Want to review" — the reviewer's first choice.
    First,
    /// "Willing to review" — acceptable, but not preferred.
    Second,
}

impl Rating {
    /// Numeric value (1 = first choice, 2 = second choice).
    #[inline]
    pub fn value(self) -> u32 {
        match self {
            Rating::First => 1,
            Rating::Second => 2,
        }
    }

    /// Maps a raw signup-sheet cell to a rating.
    ///
    /// Returns `None` for "Will not review", an empty cell, or anything
    /// unrecognized. This is the only place the sheet's literal strings are
    /// interpreted; past this boundary only `Rating` values circulate.
    pub fn parse_signup(cell: &str) -> Option<Self> {
        match cell.trim() {
            WANT_CHOICE => Some(Rating::First),
            WILLING_CHOICE => Some(Rating::Second),
            _ => None,
        }
    }
}

/// A single (area, rating) preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaChoice {
    /// Area name (lower-cased).
    pub area: String,
    /// The reviewer's rating for that area.
    pub rating: Rating,
}

impl AreaChoice {
    /// Creates a choice; the area name is lower-cased.
    pub fn new(area: impl Into<String>, rating: Rating) -> Self {
        Self {
            area: area.into().to_lowercase(),
            rating,
        }
    }
}

/// A deduplicated reviewer signup.
///
/// Holds the display identity, per-area preferences, and an optional
/// personal review-load cap. Invariant: at most one rating per area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reviewer {
    /// Canonical key (see [`reviewer_key`]).
    pub key: ReviewerKey,
    /// Display name as entered on the signup sheet.
    pub name: String,
    /// Normalized (lower-cased, trimmed) email address.
    pub email: String,
    /// Personal cap on papers to review, if the reviewer requested one.
    /// Caps an area's default load; never raises it.
    pub max_load: Option<u32>,
    /// Area preferences in the order they were discovered.
    pub choices: Vec<AreaChoice>,
}

impl Reviewer {
    /// Creates a reviewer from raw name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        let email = email.into().trim().to_lowercase();
        Self {
            key: reviewer_key(&name, &email),
            name: name.trim().to_string(),
            email,
            max_load: None,
            choices: Vec::new(),
        }
    }

    /// Sets the personal load cap.
    pub fn with_max_load(mut self, load: u32) -> Self {
        self.max_load = Some(load);
        self
    }

    /// Adds or improves a preference (builder form of [`merge_choice`]).
    ///
    /// [`merge_choice`]: Reviewer::merge_choice
    pub fn with_choice(mut self, area: impl Into<String>, rating: Rating) -> Self {
        self.merge_choice(AreaChoice::new(area, rating));
        self
    }

    /// Merges one preference, keeping the better rating on conflict.
    ///
    /// Duplicate signup rows for the same person may rate the same area
    /// differently; the lower-numbered (better) rating wins.
    pub fn merge_choice(&mut self, choice: AreaChoice) {
        match self.choices.iter_mut().find(|c| c.area == choice.area) {
            Some(existing) => {
                if choice.rating < existing.rating {
                    existing.rating = choice.rating;
                }
            }
            None => self.choices.push(choice),
        }
    }

    /// The reviewer's rating for an area, if they selected it.
    pub fn rating_for(&self, area: &str) -> Option<Rating> {
        self.choices.iter().find(|c| c.area == area).map(|c| c.rating)
    }

    /// Whether the email looks plausible (contains `@`, no embedded spaces).
    pub fn has_plausible_email(&self) -> bool {
        self.email.contains('@') && !self.email.contains(' ')
    }
}
