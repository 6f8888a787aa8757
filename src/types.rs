use crate::constants::{
    get_supported_roles, UGC_CREATORS_LISTING_PATH, UGC_CREATORS_ROLE, UGC_CREATOR_LABEL,
    VIDEO_EDITORS_LISTING_PATH, VIDEO_EDITORS_ROLE, VIDEO_EDITOR_LABEL,
};
use crate::error::{Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role categories collected from the listings site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleType {
    #[serde(rename = "UGC Creator")]
    UgcCreator,
    #[serde(rename = "Video Editor")]
    VideoEditor,
}

impl RoleType {
    pub const ALL: [RoleType; 2] = [RoleType::UgcCreator, RoleType::VideoEditor];

    /// Resolve an internal role key ("ugc_creators" / "video_editors")
    pub fn from_key(key: &str) -> Result<Self> {
        match key.trim() {
            UGC_CREATORS_ROLE => Ok(RoleType::UgcCreator),
            VIDEO_EDITORS_ROLE => Ok(RoleType::VideoEditor),
            other => Err(ScraperError::UnknownRole(format!(
                "{other} (supported: {})",
                get_supported_roles().join(", ")
            ))),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RoleType::UgcCreator => UGC_CREATORS_ROLE,
            RoleType::VideoEditor => VIDEO_EDITORS_ROLE,
        }
    }

    /// Label written to the `role_type` column
    pub fn label(&self) -> &'static str {
        match self {
            RoleType::UgcCreator => UGC_CREATOR_LABEL,
            RoleType::VideoEditor => VIDEO_EDITOR_LABEL,
        }
    }

    /// Suffix used in synthesized profile slugs
    pub fn slug_suffix(&self) -> &'static str {
        match self {
            RoleType::UgcCreator => "ugc-creator",
            RoleType::VideoEditor => "video-editor",
        }
    }

    /// Listing page for this role under `base_url`
    pub fn listing_url(&self, base_url: &str) -> String {
        let path = match self {
            RoleType::UgcCreator => UGC_CREATORS_LISTING_PATH,
            RoleType::VideoEditor => VIDEO_EDITORS_LISTING_PATH,
        };
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    /// Offset applied to synthesized profile ids so the two roles never share one
    pub fn profile_id_offset(&self) -> usize {
        match self {
            RoleType::UgcCreator => 0,
            RoleType::VideoEditor => 1000,
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoleType {
    type Err = ScraperError;

    /// Accepts either the role key or the display label
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(role) = RoleType::ALL
            .iter()
            .find(|r| r.label().eq_ignore_ascii_case(trimmed))
        {
            return Ok(*role);
        }
        RoleType::from_key(&trimmed.to_ascii_lowercase())
    }
}

/// A candidate profile as produced by a collector, the fallback generator or an input file.
/// Every field may be missing; the cleaning pipeline decides what that means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "profileLink")]
    pub profile_link: Option<String>,
    #[serde(alias = "roleType")]
    pub role_type: Option<String>,
}

impl RawProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        profile_link: impl Into<String>,
        role_type: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            profile_link: Some(profile_link.into()),
            role_type: Some(role_type.into()),
        }
    }
}

/// A profile that passed every cleaning gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub profile_link: String,
    pub role_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_key_round_trip() {
        for role in RoleType::ALL {
            assert_eq!(RoleType::from_key(role.key()).unwrap(), role);
        }
        assert!(matches!(
            RoleType::from_key("photographers"),
            Err(ScraperError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_role_parses_label_or_key() {
        assert_eq!("Video Editor".parse::<RoleType>().unwrap(), RoleType::VideoEditor);
        assert_eq!("ugc_creators".parse::<RoleType>().unwrap(), RoleType::UgcCreator);
        assert_eq!(RoleType::UgcCreator.to_string(), "UGC Creator");
    }

    #[test]
    fn test_listing_url_joins_base() {
        assert_eq!(
            RoleType::VideoEditor.listing_url("https://www.twine.net/"),
            "https://www.twine.net/find/video-editors"
        );
    }

    #[test]
    fn test_raw_profile_tolerates_missing_fields() {
        let raw: RawProfile =
            serde_json::from_str(r#"{"name": "Ava Hill", "profileLink": "https://www.twine.net/x"}"#)
                .unwrap();
        assert_eq!(raw.name.as_deref(), Some("Ava Hill"));
        assert_eq!(raw.email, None);
        assert_eq!(raw.profile_link.as_deref(), Some("https://www.twine.net/x"));
    }
}
