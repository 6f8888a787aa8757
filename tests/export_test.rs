use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use twine_scraper::app::clean_use_case::CleanUseCase;
use twine_scraper::app::ports::ProfileSink;
use twine_scraper::infra::export::{ExportFormat, FileExporter};
use twine_scraper::infra::input::load_raw_profiles;
use twine_scraper::pipeline::{CleaningPipeline, FallbackGenerator};
use twine_scraper::types::{Profile, RoleType};

fn profile(name: &str, email: &str) -> Profile {
    Profile {
        name: name.to_string(),
        email: email.to_string(),
        profile_link: format!(
            "https://www.twine.net/profile/{}",
            name.to_lowercase().replace(' ', "-")
        ),
        role_type: "Video Editor".to_string(),
    }
}

#[test]
fn test_csv_export_creates_parent_dirs() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("profiles.csv");
    let exporter = FileExporter::new(&path, ExportFormat::Csv);

    let written = exporter.write_profiles(&[
        profile("Ava Hill", "ava.hill@gmail.com"),
        profile("Owen Hall", "owen.hall@icloud.com"),
    ])?;

    assert_eq!(written, 2);
    let content = fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.split("\r\n").collect();
    assert_eq!(lines[0], "name,email,profile_link,role_type");
    assert_eq!(
        lines[1],
        "Ava Hill,ava.hill@gmail.com,https://www.twine.net/profile/ava-hill,Video Editor"
    );
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "");
    Ok(())
}

#[test]
fn test_json_export_is_an_array_of_profiles() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("profiles.json");
    FileExporter::new(&path, ExportFormat::Json)
        .write_profiles(&[profile("Ava Hill", "ava.hill@gmail.com")])?;

    let parsed: Vec<Profile> = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(parsed, vec![profile("Ava Hill", "ava.hill@gmail.com")]);
    Ok(())
}

#[test]
fn test_exported_csv_cleans_back_to_the_same_rows() -> Result<()> {
    let dir = tempdir()?;
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let batch = FallbackGenerator::seeded(8).generate(RoleType::UgcCreator, 12);
    let summary = CleanUseCase::new(
        CleaningPipeline::new(),
        Box::new(FileExporter::new(&first, ExportFormat::Csv)),
    )
    .execute(&batch)?;
    assert_eq!(summary.rows_written, 12);
    assert_eq!(summary.per_role.get("UGC Creator"), Some(&12));

    // A second pass over the exported file keeps every row
    let reloaded = load_raw_profiles(&first)?;
    let summary = CleanUseCase::new(
        CleaningPipeline::new(),
        Box::new(FileExporter::new(&second, ExportFormat::Csv)),
    )
    .execute(&reloaded)?;
    assert_eq!(summary.rows_written, 12);
    assert_eq!(fs::read_to_string(&first)?, fs::read_to_string(&second)?);
    Ok(())
}

#[test]
fn test_nothing_accepted_writes_no_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.csv");
    let batch = twine_scraper::pipeline::fallback::invalid_tail(RoleType::UgcCreator);

    let summary = CleanUseCase::new(
        CleaningPipeline::new(),
        Box::new(FileExporter::new(&path, ExportFormat::Csv)),
    )
    .execute(&batch)?;

    assert_eq!(summary.rows_written, 0);
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_raw_generated_batch_round_trips_through_files() -> Result<()> {
    let dir = tempdir()?;
    let records = FallbackGenerator::seeded(21).generate(RoleType::VideoEditor, 5);

    for (file, format) in [("raw/batch.csv", ExportFormat::Csv), ("raw/batch.json", ExportFormat::Json)] {
        let path = dir.path().join(file);
        let written = FileExporter::new(&path, format).write_raw(&records)?;
        assert_eq!(written, records.len());
        assert_eq!(load_raw_profiles(&path)?, records);
    }
    Ok(())
}

#[test]
fn test_raw_json_batch_is_pure_json() -> Result<()> {
    let records = FallbackGenerator::seeded(4).generate(RoleType::UgcCreator, 2);
    let mut buf = Vec::new();
    twine_scraper::infra::export::write_json(&mut buf, &records)?;

    let parsed: Vec<serde_json::Value> = serde_json::from_slice(&buf)?;
    assert_eq!(parsed.len(), 2 + 4);
    assert_eq!(parsed[0]["role_type"], "UGC Creator");
    Ok(())
}
