use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::ports::ProfileSink;
use crate::constants::EXPORT_HEADER;
use crate::error::Result;
use crate::types::{Profile, RawProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer from a file extension, if it names a known format
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Some(ExportFormat::Csv),
            Some("json") => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Write the header row and one CRLF-terminated row per profile, quoting only where needed
pub fn write_csv<W: Write>(writer: W, profiles: &[Profile]) -> Result<usize> {
    write_csv_rows(
        writer,
        profiles.iter().map(|p| {
            [
                p.name.as_str(),
                p.email.as_str(),
                p.profile_link.as_str(),
                p.role_type.as_str(),
            ]
        }),
    )
}

/// Same layout as [`write_csv`]; missing fields become empty cells
pub fn write_raw_csv<W: Write>(writer: W, records: &[RawProfile]) -> Result<usize> {
    write_csv_rows(
        writer,
        records.iter().map(|r| {
            [
                r.name.as_deref().unwrap_or_default(),
                r.email.as_deref().unwrap_or_default(),
                r.profile_link.as_deref().unwrap_or_default(),
                r.role_type.as_deref().unwrap_or_default(),
            ]
        }),
    )
}

fn write_csv_rows<'a, W, I>(writer: W, rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = [&'a str; 4]>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(EXPORT_HEADER)?;
    let mut written = 0;
    for row in rows {
        wtr.write_record(row)?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

pub fn write_json<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<usize> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(records.len())
}

pub fn to_csv_string(profiles: &[Profile]) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(&mut buf, profiles)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// File-backed sink for accepted profiles
pub struct FileExporter {
    path: PathBuf,
    format: ExportFormat,
}

impl FileExporter {
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write records that have not been through the cleaning pipeline
    pub fn write_raw(&self, records: &[RawProfile]) -> Result<usize> {
        let mut writer = self.create()?;
        let written = match self.format {
            ExportFormat::Csv => write_raw_csv(&mut writer, records)?,
            ExportFormat::Json => write_json(&mut writer, records)?,
        };
        writer.flush()?;

        info!("Saved {} raw records to {}", written, self.path.display());
        Ok(written)
    }

    fn create(&self) -> Result<BufWriter<File>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(BufWriter::new(File::create(&self.path)?))
    }
}

impl ProfileSink for FileExporter {
    fn write_profiles(&self, profiles: &[Profile]) -> Result<usize> {
        let mut writer = self.create()?;
        let written = match self.format {
            ExportFormat::Csv => write_csv(&mut writer, profiles)?,
            ExportFormat::Json => write_json(&mut writer, profiles)?,
        };
        writer.flush()?;

        info!("Saved {} profiles to {}", written, self.path.display());
        Ok(written)
    }
}
