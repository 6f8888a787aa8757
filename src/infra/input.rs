use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, ScraperError};
use crate::infra::export::ExportFormat;
use crate::types::RawProfile;

/// Load raw profiles from a JSON array or a CSV file with the export header.
///
/// Missing columns or keys load as missing fields; the cleaning pipeline rejects them.
pub fn load_raw_profiles(path: &Path) -> Result<Vec<RawProfile>> {
    let format = ExportFormat::from_path(path)
        .ok_or_else(|| ScraperError::UnsupportedFormat(path.display().to_string()))?;

    let reader = BufReader::new(File::open(path)?);
    let profiles = match format {
        ExportFormat::Json => read_json(reader)?,
        ExportFormat::Csv => read_csv(reader)?,
    };

    info!("Loaded {} raw profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

/// Read a JSON array of profile objects.
///
/// Fields that are not strings load as missing, so one malformed record fails its own
/// gate instead of the whole file.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawProfile>> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(values.iter().map(raw_profile_from_value).collect())
}

fn raw_profile_from_value(value: &Value) -> RawProfile {
    let field = |keys: &[&str]| -> Option<String> {
        let found = keys.iter().find_map(|key| value.get(key))?;
        match found.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                if !found.is_null() {
                    debug!("Ignoring non-string value for {}: {}", keys[0], found);
                }
                None
            }
        }
    };

    RawProfile {
        name: field(&["name"]),
        email: field(&["email"]),
        profile_link: field(&["profile_link", "profileLink"]),
        role_type: field(&["role_type", "roleType"]),
    }
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawProfile>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut profiles = Vec::new();
    for row in rdr.deserialize::<RawProfile>() {
        profiles.push(row?);
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::CleaningPipeline;

    #[test]
    fn test_read_csv_with_empty_cells() {
        let data = "name,email,profile_link,role_type\r\n\
                    Ava Hill,ava@gmail.com,https://www.twine.net/profile/ava-hill-1,UGC Creator\r\n\
                    \"Hill, Owen\",,https://www.twine.net/profile/owen-1,Video Editor\r\n";

        let profiles = read_csv(data.as_bytes()).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].email.as_deref(), Some("ava@gmail.com"));
        assert_eq!(profiles[1].name.as_deref(), Some("Hill, Owen"));
        assert_eq!(profiles[1].email, None);
    }

    #[test]
    fn test_read_json_accepts_camel_case_keys() {
        let data = r#"[{"name": "Ava Hill", "email": "ava@gmail.com", "profileLink": "https://www.twine.net/profile/a", "roleType": "UGC Creator"}, {}]"#;
        let profiles = read_json(data.as_bytes()).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(
            profiles[0].profile_link.as_deref(),
            Some("https://www.twine.net/profile/a")
        );
        assert_eq!(profiles[1], RawProfile::default());
    }

    #[test]
    fn test_non_string_fields_only_fail_their_own_record() {
        let data = r#"[
            {"name": "John Smith", "email": "john.smith@gmail.com",
             "profileLink": "https://www.twine.net/profile/john-smith-1", "roleType": "UGC Creator"},
            {"name": "Ava Hill", "email": 42,
             "profileLink": "https://www.twine.net/profile/ava-hill-2", "roleType": "UGC Creator"},
            {"name": ["Owen"], "email": null, "profile_link": true},
            "not an object"
        ]"#;

        let profiles = read_json(data.as_bytes()).unwrap();
        assert_eq!(profiles.len(), 4);
        assert_eq!(profiles[1].email, None);
        assert_eq!(profiles[1].name.as_deref(), Some("Ava Hill"));
        assert_eq!(profiles[2], RawProfile::default());
        assert_eq!(profiles[3], RawProfile::default());

        let outcome = CleaningPipeline::new().clean(&profiles);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted[0].name, "John Smith");
        assert_eq!(outcome.stats.invalid_email, 3);
    }

    #[test]
    fn test_json_that_is_not_an_array_is_an_error() {
        let err = read_json(r#"{"name": "Ava Hill"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, ScraperError::Json(_)));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = load_raw_profiles(Path::new("profiles.xml")).unwrap_err();
        assert!(matches!(err, ScraperError::UnsupportedFormat(_)));
    }
}
