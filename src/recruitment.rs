//! Recruitment progress matching.
//!
//! Area chairs email candidate reviewers and track responses in a contact
//! list; candidates sign up through a shared form. This module matches the
//! two, case-insensitively on name or email, and reports who has not
//! responded, who declined, and who signed up without ever being contacted.
//!
//! People sometimes sign up under a different name or email than the one
//! they were contacted at, so the not-responded list is best-effort.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{Rating, Reviewer, ReviewerRegistry};

/// One row of a contact list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Name the reviewer was contacted under.
    pub name: String,
    /// Email the reviewer was contacted at.
    pub email: String,
    /// The reviewer declined the invitation.
    pub declined: bool,
    /// The reviewer is chairing another area.
    pub chair: bool,
}

impl ContactRecord {
    /// Creates a contact record.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            declined: false,
            chair: false,
        }
    }

    /// Marks the contact as declined.
    pub fn with_declined(mut self) -> Self {
        self.declined = true;
        self
    }

    /// Marks the contact as chairing another area.
    pub fn with_chair(mut self) -> Self {
        self.chair = true;
        self
    }
}

/// Progress report for one area's recruitment drive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecruitmentReport {
    /// Contacts with no signup, no decline, and no chair role: (name, email).
    pub not_responded: Vec<(String, String)>,
    /// Contacts missing an email address.
    pub missing_email: usize,
    /// Contacts found in the signup sheet.
    pub signed_up: usize,
    /// Signed-up contacts rating the target area first choice.
    pub first_choice: usize,
    /// Signed-up contacts rating the target area second choice.
    pub second_choice: usize,
    /// Signed-up contacts with no rating for the target area.
    pub no_choice: usize,
    /// Contacts who declined.
    pub declined: usize,
    /// Contacts chairing another area.
    pub chairing: usize,
    /// Signups for the target area who were never contacted, sorted by
    /// name: (name, email, rating).
    pub uncontacted_signups: Vec<(String, String, Rating)>,
    /// Uncontacted signups rating the area first choice.
    pub uncontacted_first: usize,
    /// Uncontacted signups rating the area second choice.
    pub uncontacted_second: usize,
    /// Total signups in the registry.
    pub total_signups: usize,
    /// Total rows in the contact list.
    pub total_contacts: usize,
}

impl RecruitmentReport {
    /// Matches a contact list against the signup registry for one area.
    pub fn compute(registry: &ReviewerRegistry, contacts: &[ContactRecord], area: &str) -> Self {
        let area = area.to_lowercase();

        let mut by_name: HashMap<String, &Reviewer> = HashMap::new();
        let mut by_email: HashMap<String, &Reviewer> = HashMap::new();
        for reviewer in registry.iter() {
            let name_lower = reviewer.name.to_lowercase();
            if !name_lower.is_empty() {
                by_name.insert(name_lower, reviewer);
            }
            if !reviewer.email.is_empty() {
                by_email.insert(reviewer.email.clone(), reviewer);
            }
        }

        let mut report = Self {
            total_signups: registry.len(),
            total_contacts: contacts.len(),
            ..Self::default()
        };

        let mut contacted_names = HashSet::new();
        let mut contacted_emails = HashSet::new();

        for contact in contacts {
            let name_lower = contact.name.trim().to_lowercase();
            let email_lower = contact.email.trim().to_lowercase();
            if !name_lower.is_empty() {
                contacted_names.insert(name_lower.clone());
            }
            if !email_lower.is_empty() {
                contacted_emails.insert(email_lower.clone());
            }

            let signup = by_name
                .get(&name_lower)
                .or_else(|| by_email.get(&email_lower))
                .copied();

            if email_lower.is_empty() {
                report.missing_email += 1;
            } else if signup.is_none() && !contact.declined && !contact.chair {
                report
                    .not_responded
                    .push((contact.name.clone(), contact.email.clone()));
            } else if let Some(reviewer) = signup {
                report.signed_up += 1;
                match reviewer.rating_for(&area) {
                    Some(Rating::First) => report.first_choice += 1,
                    Some(Rating::Second) => report.second_choice += 1,
                    None => report.no_choice += 1,
                }
            } else if contact.declined {
                report.declined += 1;
            } else {
                report.chairing += 1;
            }
        }

        for reviewer in registry.iter() {
            let Some(rating) = reviewer.rating_for(&area) else {
                continue;
            };
            let name_lower = reviewer.name.to_lowercase();
            if contacted_names.contains(&name_lower) || contacted_emails.contains(&reviewer.email) {
                continue;
            }
            match rating {
                Rating::First => report.uncontacted_first += 1,
                Rating::Second => report.uncontacted_second += 1,
            }
            report
                .uncontacted_signups
                .push((reviewer.name.clone(), reviewer.email.clone(), rating));
        }
        report.uncontacted_signups.sort();

        report
    }
}
