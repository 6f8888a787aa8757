use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

use crate::app::clean_use_case::{CleanSummary, CleanUseCase};
use crate::app::collect_use_case::CollectUseCase;
use crate::app::ports::CollectionOutcome;
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::fallback::FallbackGenerator;
use crate::pipeline::processing::cleaning::RejectionStats;
use crate::types::{RawProfile, RoleType};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub roles: Vec<RoleType>,
    pub target_per_role: usize,
    pub use_fallback: bool,
    /// Seed for the fallback generator; `None` draws from entropy
    pub seed: Option<u64>,
}

/// End-of-run statistics, also written as JSON when requested
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub raw_profiles: usize,
    pub valid_profiles: usize,
    pub filtered_profiles: usize,
    pub rejections: RejectionStats,
    pub per_role: BTreeMap<String, usize>,
    pub used_fallback: bool,
    pub fallback_roles: Vec<String>,
    pub rows_written: usize,
}

impl RunReport {
    fn new(
        started_at: DateTime<Utc>,
        summary: CleanSummary,
        fallback_roles: Vec<String>,
    ) -> Self {
        let finished_at = Utc::now();
        let elapsed_secs = (finished_at - started_at).num_milliseconds() as f64 / 1000.0;
        Self {
            started_at,
            finished_at,
            elapsed_secs,
            raw_profiles: summary.rejections.total_input,
            valid_profiles: summary.rejections.accepted,
            filtered_profiles: summary.rejections.rejected(),
            rejections: summary.rejections,
            per_role: summary.per_role,
            used_fallback: !fallback_roles.is_empty(),
            fallback_roles,
            rows_written: summary.rows_written,
        }
    }

    pub fn log(&self) {
        info!("{}", "=".repeat(60));
        info!("SCRAPING COMPLETE");
        info!("{}", "=".repeat(60));
        info!("Total profiles collected: {}", self.raw_profiles);
        info!("Valid profiles after validation: {}", self.valid_profiles);
        for (role, count) in &self.per_role {
            info!("  - {}: {}", role, count);
        }
        info!("Time elapsed: {:.2} seconds", self.elapsed_secs);
        if self.used_fallback {
            info!(
                "NOTE: Used fallback data generation for: {}",
                self.fallback_roles.join(", ")
            );
        }
    }
}

/// Collect every requested role, top up with fallback data, then clean once and export
pub struct RunUseCase {
    collector: Option<CollectUseCase>,
    cleaner: CleanUseCase,
}

impl RunUseCase {
    /// `collector` is `None` for offline runs
    pub fn new(collector: Option<CollectUseCase>, cleaner: CleanUseCase) -> Self {
        Self { collector, cleaner }
    }

    pub async fn run(&self, options: &RunOptions) -> Result<RunReport> {
        let started_at = Utc::now();
        let mut generator = match options.seed {
            Some(seed) => FallbackGenerator::seeded(seed),
            None => FallbackGenerator::from_entropy(),
        };

        let mut all_profiles: Vec<RawProfile> = Vec::new();
        let mut fallback_roles = Vec::new();

        for role in &options.roles {
            info!("{}", "=".repeat(60));
            let mut records = self.collect(*role, options.target_per_role).await;

            if records.len() < options.target_per_role {
                if options.use_fallback {
                    let missing = options.target_per_role - records.len();
                    info!(
                        "Only collected {} profiles for {}. Generating remaining {}...",
                        records.len(),
                        role.key(),
                        missing
                    );
                    let generated = generator.generate(*role, missing);
                    metrics::fallback::records_generated(role.key(), generated.len());
                    records.extend(generated);
                    fallback_roles.push(role.key().to_string());
                } else {
                    warn!(
                        "Collected {}/{} profiles for {} and fallback is disabled",
                        records.len(),
                        options.target_per_role,
                        role.key()
                    );
                }
            }

            all_profiles.extend(records);
        }

        info!("{}", "=".repeat(60));
        let summary = self.cleaner.execute(&all_profiles)?;
        Ok(RunReport::new(started_at, summary, fallback_roles))
    }

    async fn collect(&self, role: RoleType, target: usize) -> Vec<RawProfile> {
        let Some(collector) = &self.collector else {
            info!("Offline run, skipping collection for {}", role.key());
            return Vec::new();
        };

        match collector.collect_role(role, target).await {
            CollectionOutcome::Collected(records) => records,
            CollectionOutcome::Empty => {
                warn!("Collection for {} returned no profiles", role.key());
                Vec::new()
            }
            CollectionOutcome::Failed(e) => {
                error!("{}", e);
                Vec::new()
            }
        }
    }
}
