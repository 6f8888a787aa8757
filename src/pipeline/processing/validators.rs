//! Record validators
//!
//! Each check is a pure predicate over optional text. Missing input never panics: it
//! simply fails the check (or, for the test-data check, is treated as empty text).

use crate::constants::{
    BRAND_KEYWORDS, BRAND_NAME_PREFIX, MIN_PROFILE_URL_LEN, PROFILE_URL_PREFIX,
    TEST_EMAIL_PATTERNS, TEST_NAMES,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

static DEFAULT_RULES: Lazy<FilterRules> = Lazy::new(FilterRules::default);

/// Heuristic lists and thresholds behind the name, test-data and URL checks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    pub brand_keywords: Vec<String>,
    pub brand_prefix: String,
    pub test_email_patterns: Vec<String>,
    pub test_names: Vec<String>,
    pub profile_url_prefix: String,
    pub min_profile_url_len: usize,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            brand_keywords: BRAND_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            brand_prefix: BRAND_NAME_PREFIX.to_string(),
            test_email_patterns: TEST_EMAIL_PATTERNS.iter().map(|s| s.to_string()).collect(),
            test_names: TEST_NAMES.iter().map(|s| s.to_string()).collect(),
            profile_url_prefix: PROFILE_URL_PREFIX.to_string(),
            min_profile_url_len: MIN_PROFILE_URL_LEN,
        }
    }
}

impl FilterRules {
    /// True for names that look like an individual rather than a business.
    ///
    /// Substring matching is intentionally loose: "Steam Works" is rejected for "team".
    pub fn is_person_name(&self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return false;
        };

        let trimmed = name.trim();
        if trimmed.chars().count() < 2 {
            return false;
        }

        let lowered = trimmed.to_lowercase();
        if self
            .brand_keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
        {
            return false;
        }

        !lowered.starts_with(&self.brand_prefix.to_lowercase())
    }

    /// True when the record looks like placeholder data.
    ///
    /// The email check is a substring match, the name check an exact match.
    pub fn is_test_data(&self, email: Option<&str>, name: Option<&str>) -> bool {
        let email = email.unwrap_or_default().to_lowercase();
        if self
            .test_email_patterns
            .iter()
            .any(|pattern| email.contains(&pattern.to_lowercase()))
        {
            return true;
        }

        let name = name.unwrap_or_default().trim().to_lowercase();
        self.test_names
            .iter()
            .any(|candidate| candidate.to_lowercase() == name)
    }

    pub fn is_valid_profile_url(&self, url: Option<&str>) -> bool {
        match url {
            Some(url) if !url.is_empty() => {
                url.starts_with(&self.profile_url_prefix)
                    && url.chars().count() > self.min_profile_url_len
            }
            _ => false,
        }
    }
}

/// Syntactic email check; no DNS or mailbox verification
pub fn is_valid_email(email: Option<&str>) -> bool {
    match email {
        Some(email) if !email.is_empty() => EMAIL_RE.is_match(email),
        _ => false,
    }
}

pub fn is_person_name(name: Option<&str>) -> bool {
    DEFAULT_RULES.is_person_name(name)
}

pub fn is_test_data(email: Option<&str>, name: Option<&str>) -> bool {
    DEFAULT_RULES.is_test_data(email, name)
}

pub fn is_valid_profile_url(url: Option<&str>) -> bool {
    DEFAULT_RULES.is_valid_profile_url(url)
}
