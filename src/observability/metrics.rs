//! Metric recording for the scraper
//!
//! Thin wrappers over the `metrics` facade. No recorder is installed by default, in which
//! case every call is a no-op; embedding applications can install their own exporter.

use std::fmt;

use crate::pipeline::processing::cleaning::{RejectionReason, RejectionStats};

/// Every metric name used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Collector metrics
    CollectorPagesFetched,
    CollectorFetchErrors,
    CollectorProfilesCollected,

    // Fallback metrics
    FallbackRecordsGenerated,

    // Cleaning metrics
    CleaningRecordsProcessed,
    CleaningRecordsAccepted,
    CleaningRecordsRejected,
    CleaningBatchSize,

    // Export metrics
    ExportRowsWritten,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::CollectorPagesFetched => "twine_collector_pages_fetched_total",
            MetricName::CollectorFetchErrors => "twine_collector_fetch_errors_total",
            MetricName::CollectorProfilesCollected => "twine_collector_profiles_collected_total",
            MetricName::FallbackRecordsGenerated => "twine_fallback_records_generated_total",
            MetricName::CleaningRecordsProcessed => "twine_cleaning_records_processed_total",
            MetricName::CleaningRecordsAccepted => "twine_cleaning_records_accepted_total",
            MetricName::CleaningRecordsRejected => "twine_cleaning_records_rejected_total",
            MetricName::CleaningBatchSize => "twine_cleaning_batch_size",
            MetricName::ExportRowsWritten => "twine_export_rows_written_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod collector {
    use super::MetricName;

    pub fn page_fetched(role: &'static str) {
        ::metrics::counter!(MetricName::CollectorPagesFetched.as_str(), "role" => role).increment(1);
    }

    pub fn fetch_failed(role: &'static str) {
        ::metrics::counter!(MetricName::CollectorFetchErrors.as_str(), "role" => role).increment(1);
    }

    pub fn profiles_collected(role: &'static str, count: usize) {
        ::metrics::counter!(MetricName::CollectorProfilesCollected.as_str(), "role" => role)
            .increment(count as u64);
    }
}

pub mod fallback {
    use super::MetricName;

    pub fn records_generated(role: &'static str, count: usize) {
        ::metrics::counter!(MetricName::FallbackRecordsGenerated.as_str(), "role" => role)
            .increment(count as u64);
    }
}

pub mod cleaning {
    use super::{MetricName, RejectionReason, RejectionStats};

    /// Record the outcome of one cleaning run
    pub fn batch_cleaned(stats: &RejectionStats) {
        ::metrics::counter!(MetricName::CleaningRecordsProcessed.as_str())
            .increment(stats.total_input as u64);
        ::metrics::counter!(MetricName::CleaningRecordsAccepted.as_str())
            .increment(stats.accepted as u64);
        ::metrics::histogram!(MetricName::CleaningBatchSize.as_str())
            .record(stats.total_input as f64);

        for reason in RejectionReason::ALL {
            let count = stats.count(reason);
            if count > 0 {
                ::metrics::counter!(
                    MetricName::CleaningRecordsRejected.as_str(),
                    "reason" => reason.as_str()
                )
                .increment(count as u64);
            }
        }
    }
}

pub mod export {
    use super::MetricName;

    pub fn rows_written(count: usize) {
        ::metrics::counter!(MetricName::ExportRowsWritten.as_str()).increment(count as u64);
    }
}
