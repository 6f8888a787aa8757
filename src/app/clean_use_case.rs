use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::app::ports::ProfileSink;
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::cleaning::{CleaningOutcome, CleaningPipeline, RejectionStats};
use crate::types::{Profile, RawProfile};

const SAMPLE_SIZE: usize = 3;

/// Summary of one clean-and-export pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanSummary {
    pub rejections: RejectionStats,
    /// Accepted profile count keyed by role label
    pub per_role: BTreeMap<String, usize>,
    pub rows_written: usize,
}

/// Runs the cleaning pipeline over a batch and hands accepted profiles to a sink
pub struct CleanUseCase {
    pipeline: CleaningPipeline,
    sink: Box<dyn ProfileSink>,
}

impl CleanUseCase {
    pub fn new(pipeline: CleaningPipeline, sink: Box<dyn ProfileSink>) -> Self {
        Self { pipeline, sink }
    }

    pub fn execute(&self, records: &[RawProfile]) -> Result<CleanSummary> {
        info!("Running validation pipeline over {} records...", records.len());
        let CleaningOutcome { accepted, stats } = self.pipeline.clean(records);
        metrics::cleaning::batch_cleaned(&stats);
        log_breakdown(&stats);

        let rows_written = if accepted.is_empty() {
            warn!("No data to save");
            0
        } else {
            let written = self.sink.write_profiles(&accepted)?;
            metrics::export::rows_written(written);
            log_sample(&accepted);
            written
        };

        Ok(CleanSummary {
            per_role: count_per_role(&accepted),
            rejections: stats,
            rows_written,
        })
    }
}

fn count_per_role(profiles: &[Profile]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for profile in profiles {
        *counts.entry(profile.role_type.clone()).or_insert(0) += 1;
    }
    counts
}

fn log_breakdown(stats: &RejectionStats) {
    info!("Raw profiles: {}", stats.total_input);
    info!("Valid profiles: {}", stats.accepted);
    info!("Filtered: {}", stats.rejected());
    if stats.rejected() > 0 {
        info!(
            "Breakdown - Duplicates: {}, Brands: {}, Test: {}, Invalid Emails: {}, Invalid URLs: {}",
            stats.duplicate, stats.brand_name, stats.test_data, stats.invalid_email, stats.invalid_url
        );
    }
}

fn log_sample(profiles: &[Profile]) {
    info!("Sample output (first {} profiles):", SAMPLE_SIZE.min(profiles.len()));
    for (i, profile) in profiles.iter().take(SAMPLE_SIZE).enumerate() {
        info!("  {}. {} | {}", i + 1, profile.name, profile.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemorySink {
        written: Arc<Mutex<Vec<Profile>>>,
    }

    impl ProfileSink for MemorySink {
        fn write_profiles(&self, profiles: &[Profile]) -> Result<usize> {
            self.written.lock().unwrap().extend_from_slice(profiles);
            Ok(profiles.len())
        }
    }

    #[test]
    fn test_execute_writes_accepted_and_counts_roles() {
        let sink = MemorySink::default();
        let use_case = CleanUseCase::new(CleaningPipeline::new(), Box::new(sink.clone()));

        let records = vec![
            RawProfile::new(
                "John Smith",
                "john.smith@gmail.com",
                "https://www.twine.net/profile/john-smith-1",
                "UGC Creator",
            ),
            RawProfile::new(
                "Ava Hill",
                "ava.hill@yahoo.com",
                "https://www.twine.net/profile/ava-hill-1001",
                "Video Editor",
            ),
            RawProfile::new(
                "Creative Media Studio",
                "contact@studio.com",
                "https://www.twine.net/profile/studio-1",
                "UGC Creator",
            ),
        ];

        let summary = use_case.execute(&records).unwrap();
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.rejections.brand_name, 1);
        assert_eq!(summary.per_role.get("UGC Creator"), Some(&1));
        assert_eq!(summary.per_role.get("Video Editor"), Some(&1));
        assert_eq!(sink.written.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_execute_skips_sink_when_nothing_accepted() {
        let sink = MemorySink::default();
        let use_case = CleanUseCase::new(CleaningPipeline::new(), Box::new(sink.clone()));

        let summary = use_case.execute(&[]).unwrap();
        assert_eq!(summary.rows_written, 0);
        assert!(sink.written.lock().unwrap().is_empty());
    }
}
