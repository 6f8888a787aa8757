/// Site and role constants to ensure consistency across the codebase
/// These constants define the mapping between CLI role keys, display labels and URLs

// Target site
pub const TWINE_BASE_URL: &str = "https://www.twine.net";
pub const PROFILE_URL_PREFIX: &str = "https://www.twine.net/";
pub const PROFILE_PATH_PREFIX: &str = "https://www.twine.net/profile/";
pub const MIN_PROFILE_URL_LEN: usize = 30;

// Role keys (used in CLI and config)
pub const UGC_CREATORS_ROLE: &str = "ugc_creators";
pub const VIDEO_EDITORS_ROLE: &str = "video_editors";

// Role display labels (written to exports)
pub const UGC_CREATOR_LABEL: &str = "UGC Creator";
pub const VIDEO_EDITOR_LABEL: &str = "Video Editor";

// Listing pages, relative to the site base
pub const UGC_CREATORS_LISTING_PATH: &str = "/find/ugc-creators";
pub const VIDEO_EDITORS_LISTING_PATH: &str = "/find/video-editors";

// Brand indicators; a name containing any of these is treated as a business
pub const BRAND_KEYWORDS: &[&str] = &[
    "studio",
    "media",
    "agency",
    "productions",
    "designs",
    "labs",
    "official",
    "channel",
    "team",
    "llc",
    "inc",
    "ltd",
    "pvt",
    "gmbh",
    "plc",
    "company",
    "group",
    "collective",
    "enterprise",
    "corporation",
];

pub const BRAND_NAME_PREFIX: &str = "the ";

// Placeholder data
pub const TEST_EMAIL_PATTERNS: &[&str] = &["test@", "example@", "sample@", "demo@", "placeholder@"];
pub const TEST_NAMES: &[&str] = &["test", "sample", "demo", "placeholder", "example"];

// Export layout
pub const EXPORT_HEADER: [&str; 4] = ["name", "email", "profile_link", "role_type"];
pub const DEFAULT_OUTPUT_FILE: &str = "scraped_profiles.csv";
pub const DEFAULT_CONFIG_FILE: &str = "twine_scraper.toml";

// Collection defaults
pub const DEFAULT_TARGET_PER_ROLE: usize = 50;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const MAX_GENERATE_COUNT: usize = 100_000;
pub const DEFAULT_PROFILES_PER_PAGE: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Get all supported role keys
pub fn get_supported_roles() -> Vec<&'static str> {
    vec![UGC_CREATORS_ROLE, VIDEO_EDITORS_ROLE]
}
