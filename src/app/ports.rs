use async_trait::async_trait;

use crate::error::{Result, ScraperError};
use crate::types::{Profile, RawProfile};

/// Given a URL, return the page HTML or fail
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Best-effort field extraction from fetched HTML
pub trait FieldExtractor: Send + Sync {
    /// Candidate name and email from a profile page
    fn extract_fields(&self, html: &str) -> ExtractedFields;

    /// Absolute profile URLs found on a listing page, in document order without repeats
    fn extract_profile_links(&self, html: &str, base_url: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Result of one collection pass for a role
#[derive(Debug)]
pub enum CollectionOutcome {
    /// At least one record was collected, possibly fewer than the target
    Collected(Vec<RawProfile>),
    /// The site responded but yielded no usable profiles
    Empty,
    /// Nothing was collected because fetching failed
    Failed(ScraperError),
}

impl CollectionOutcome {
    pub fn into_records(self) -> Vec<RawProfile> {
        match self {
            CollectionOutcome::Collected(records) => records,
            CollectionOutcome::Empty | CollectionOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CollectionOutcome::Collected(records) => records.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Destination for accepted profiles
pub trait ProfileSink {
    /// Write every profile, returning the number of rows written
    fn write_profiles(&self, profiles: &[Profile]) -> Result<usize>;
}
