//! Report aggregation over already-fetched documents.
//!
//! Each metric is a single linear pass. Nothing is cached; callers refetch
//! and recompute on every request.

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::entities::{Application, CompanyStatus};

/// Tally of admission application statuses.
///
/// Statuses outside pending/approved/rejected count toward `total` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl StatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                Some("pending") => counts.pending += 1,
                Some("approved") => counts.approved += 1,
                Some("rejected") => counts.rejected += 1,
                _ => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub suspended: u64,
}

/// Per-institution application tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionTally {
    pub institution_id: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

pub fn application_counts(applications: &[Application]) -> StatusCounts {
    StatusCounts::tally(applications.iter().map(|a| a.status()))
}

/// Tally of company statuses; unknown or missing statuses count toward
/// `total` only.
pub fn company_counts<'a>(statuses: impl IntoIterator<Item = Option<&'a str>>) -> CompanyCounts {
    let mut counts = CompanyCounts::default();
    for status in statuses {
        counts.total += 1;
        match status.and_then(CompanyStatus::parse) {
            Some(CompanyStatus::Pending) => counts.pending += 1,
            Some(CompanyStatus::Approved) => counts.approved += 1,
            Some(CompanyStatus::Suspended) => counts.suspended += 1,
            None => {}
        }
    }
    counts
}

/// Distinct institution ids referenced by applications, in first-seen order.
pub fn distinct_institutions(applications: &[Application]) -> Vec<String> {
    let mut seen = HashSet::new();
    applications
        .iter()
        .filter_map(|a| a.institution_id())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Status tally for each institution, in first-seen order.
pub fn per_institution(applications: &[Application]) -> Vec<InstitutionTally> {
    distinct_institutions(applications)
        .into_iter()
        .map(|institution_id| {
            let counts = StatusCounts::tally(
                applications
                    .iter()
                    .filter(|a| a.institution_id() == Some(institution_id.as_str()))
                    .map(|a| a.status()),
            );
            InstitutionTally {
                institution_id,
                counts,
            }
        })
        .collect()
}

/// Number of distinct students with at least one application.
pub fn unique_students(applications: &[Application]) -> u64 {
    applications
        .iter()
        .filter_map(|a| a.student_id())
        .collect::<HashSet<_>>()
        .len() as u64
}
