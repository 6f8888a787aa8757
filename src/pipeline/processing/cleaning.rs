use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::pipeline::processing::dedup::Deduplicator;
use crate::pipeline::processing::validators::{is_valid_email, FilterRules};
use crate::types::{Profile, RawProfile};

/// Why a record was kept out of the cleaned dataset.
///
/// Variants are listed in gate order; the first failing gate decides the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Duplicate,
    InvalidEmail,
    BrandName,
    TestData,
    InvalidUrl,
}

impl RejectionReason {
    pub const ALL: [RejectionReason; 5] = [
        RejectionReason::Duplicate,
        RejectionReason::InvalidEmail,
        RejectionReason::BrandName,
        RejectionReason::TestData,
        RejectionReason::InvalidUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Duplicate => "duplicate",
            RejectionReason::InvalidEmail => "invalid_email",
            RejectionReason::BrandName => "brand_name",
            RejectionReason::TestData => "test_data",
            RejectionReason::InvalidUrl => "invalid_url",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate decision for a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Accept,
    Reject(RejectionReason),
}

/// Per-reason rejection counts plus totals for one cleaning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RejectionStats {
    pub total_input: usize,
    pub accepted: usize,
    pub duplicate: usize,
    pub invalid_email: usize,
    pub brand_name: usize,
    pub test_data: usize,
    pub invalid_url: usize,
}

impl RejectionStats {
    pub fn count(&self, reason: RejectionReason) -> usize {
        match reason {
            RejectionReason::Duplicate => self.duplicate,
            RejectionReason::InvalidEmail => self.invalid_email,
            RejectionReason::BrandName => self.brand_name,
            RejectionReason::TestData => self.test_data,
            RejectionReason::InvalidUrl => self.invalid_url,
        }
    }

    pub fn rejected(&self) -> usize {
        RejectionReason::ALL.iter().map(|r| self.count(*r)).sum()
    }

    fn record_rejection(&mut self, reason: RejectionReason) {
        let slot = match reason {
            RejectionReason::Duplicate => &mut self.duplicate,
            RejectionReason::InvalidEmail => &mut self.invalid_email,
            RejectionReason::BrandName => &mut self.brand_name,
            RejectionReason::TestData => &mut self.test_data,
            RejectionReason::InvalidUrl => &mut self.invalid_url,
        };
        *slot += 1;
    }
}

/// Accepted profiles in input order, plus the statistics for the run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningOutcome {
    pub accepted: Vec<Profile>,
    pub stats: RejectionStats,
}

/// Ordered gate sequence: duplicate, email, person name, test data, profile URL.
///
/// Deterministic and free of I/O; the only state is the deduplicator owned by each run.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    rules: FilterRules,
}

impl CleaningPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: FilterRules) -> Self {
        Self { rules }
    }

    /// Evaluate the gates for one record against the current seen-set
    pub fn assess(&self, record: &RawProfile, dedup: &Deduplicator) -> GateDecision {
        let email = record.email.as_deref();
        let name = record.name.as_deref();

        if dedup.is_duplicate(email) {
            return GateDecision::Reject(RejectionReason::Duplicate);
        }
        if !is_valid_email(email) {
            return GateDecision::Reject(RejectionReason::InvalidEmail);
        }
        if !self.rules.is_person_name(name) {
            return GateDecision::Reject(RejectionReason::BrandName);
        }
        if self.rules.is_test_data(email, name) {
            return GateDecision::Reject(RejectionReason::TestData);
        }
        if !self.rules.is_valid_profile_url(record.profile_link.as_deref()) {
            return GateDecision::Reject(RejectionReason::InvalidUrl);
        }
        GateDecision::Accept
    }

    /// Clean a batch with a fresh seen-set
    pub fn clean(&self, records: &[RawProfile]) -> CleaningOutcome {
        let mut dedup = Deduplicator::new();
        self.clean_with(records, &mut dedup)
    }

    /// Clean a batch against a caller-owned seen-set
    pub fn clean_with(&self, records: &[RawProfile], dedup: &mut Deduplicator) -> CleaningOutcome {
        let mut outcome = CleaningOutcome {
            accepted: Vec::with_capacity(records.len()),
            stats: RejectionStats {
                total_input: records.len(),
                ..RejectionStats::default()
            },
        };

        for record in records {
            match self.assess(record, dedup) {
                GateDecision::Accept => {
                    let profile = Profile {
                        name: record.name.clone().unwrap_or_default(),
                        email: record.email.clone().unwrap_or_default(),
                        profile_link: record.profile_link.clone().unwrap_or_default(),
                        role_type: record.role_type.clone().unwrap_or_default(),
                    };
                    dedup.record(&profile.email);
                    outcome.accepted.push(profile);
                }
                GateDecision::Reject(reason) => {
                    debug!(
                        reason = %reason,
                        email = record.email.as_deref().unwrap_or("<missing>"),
                        "Rejected record"
                    );
                    outcome.stats.record_rejection(reason);
                }
            }
        }

        outcome.stats.accepted = outcome.accepted.len();
        info!(
            "Validation results: raw={} valid={} filtered={}",
            outcome.stats.total_input,
            outcome.stats.accepted,
            outcome.stats.rejected()
        );
        outcome
    }
}
