use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::{CollectionOutcome, FieldExtractor, PageFetcher};
use crate::config::CollectorConfig;
use crate::error::ScraperError;
use crate::observability::metrics;
use crate::types::{RawProfile, RoleType};

/// Walks a role's listing pages and visits profile pages until the target is met
/// or the retry budget runs out.
pub struct CollectUseCase {
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn FieldExtractor>,
    config: CollectorConfig,
}

impl CollectUseCase {
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        extractor: Box<dyn FieldExtractor>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    fn page_url(&self, role: RoleType, page: usize) -> String {
        let listing = role.listing_url(&self.config.base_url);
        if page > 1 {
            format!("{listing}?page={page}")
        } else {
            listing
        }
    }

    #[instrument(skip(self, role), fields(role = role.key()))]
    pub async fn collect_role(&self, role: RoleType, target: usize) -> CollectionOutcome {
        let mut profiles: Vec<RawProfile> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut last_error: Option<ScraperError> = None;
        let mut page = 1usize;
        let mut retries = 0u32;

        info!("Starting collection for {}", role.key());

        while profiles.len() < target && retries < self.config.max_retries {
            let page_url = self.page_url(role, page);

            let html = match self.fetcher.fetch(&page_url).await {
                Ok(html) => {
                    metrics::collector::page_fetched(role.key());
                    html
                }
                Err(e) => {
                    metrics::collector::fetch_failed(role.key());
                    retries += 1;
                    warn!("Failed to load page {} ({}/{}): {}", page, retries, self.config.max_retries, e);
                    last_error = Some(e);
                    continue;
                }
            };

            let remaining = target - profiles.len();
            let links: Vec<String> = self
                .extractor
                .extract_profile_links(&html, &self.config.base_url)
                .into_iter()
                .filter(|link| !visited.contains(link))
                .take(remaining.min(self.config.profiles_per_page))
                .collect();

            if links.is_empty() {
                retries += 1;
                warn!("No profiles found on page {}", page);
                continue;
            }

            info!("Found {} profiles on page {}", links.len(), page);

            for link in links {
                visited.insert(link.clone());
                match self.fetcher.fetch(&link).await {
                    Ok(profile_html) => {
                        let fields = self.extractor.extract_fields(&profile_html);
                        if let (Some(name), Some(email)) = (fields.name, fields.email) {
                            profiles.push(RawProfile::new(name, email, link, role.label()));
                        } else {
                            debug!("Profile {} is missing a name or email", link);
                        }
                    }
                    Err(e) => {
                        metrics::collector::fetch_failed(role.key());
                        debug!("Error fetching profile {}: {}", link, e);
                    }
                }

                if profiles.len() >= target {
                    break;
                }
            }

            page += 1;
            info!("Collected {}/{} profiles for {}", profiles.len(), target, role.key());
        }

        metrics::collector::profiles_collected(role.key(), profiles.len());

        match (profiles.is_empty(), last_error) {
            (false, err) => {
                if let Some(e) = err {
                    warn!("Keeping {} partial profiles after error: {}", profiles.len(), e);
                }
                CollectionOutcome::Collected(profiles)
            }
            (true, Some(e)) => CollectionOutcome::Failed(ScraperError::Collection {
                role: role.key().to_string(),
                message: e.to_string(),
            }),
            (true, None) => CollectionOutcome::Empty,
        }
    }
}
