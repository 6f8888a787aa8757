use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use twine_scraper::app::clean_use_case::CleanUseCase;
use twine_scraper::app::collect_use_case::CollectUseCase;
use twine_scraper::app::run_use_case::{RunOptions, RunUseCase};
use twine_scraper::config::Config;
use twine_scraper::constants;
use twine_scraper::infra::export::{write_json, write_raw_csv, ExportFormat, FileExporter};
use twine_scraper::infra::html_extractor::HtmlFieldExtractor;
use twine_scraper::infra::http_client::ReqwestFetcher;
use twine_scraper::infra::input::load_raw_profiles;
use twine_scraper::logging;
use twine_scraper::pipeline::{CleaningPipeline, FallbackGenerator};
use twine_scraper::types::RoleType;

#[derive(Parser)]
#[command(name = "twine_scraper")]
#[command(about = "Twine freelancer profile scraper with validation and CSV export")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to $TWINE_SCRAPER_CONFIG, then ./twine_scraper.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output file for accepted profiles
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format; inferred from the output extension when omitted
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,
    /// Write the run statistics as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect both roles, top up with fallback data, clean and export
    Run {
        /// Roles to collect (comma-separated). Available: ugc_creators, video_editors
        #[arg(long)]
        roles: Option<String>,
        #[arg(long)]
        target_per_role: Option<usize>,
        /// Keep whatever was collected, even when short of the target
        #[arg(long)]
        no_fallback: bool,
        /// Skip the network entirely and rely on fallback data
        #[arg(long)]
        offline: bool,
        /// Seed for reproducible fallback data
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate synthetic profiles for one role
    Generate {
        #[arg(long, default_value = constants::UGC_CREATORS_ROLE)]
        role: String,
        #[arg(
            long,
            default_value_t = constants::DEFAULT_TARGET_PER_ROLE,
            value_parser = RangedU64ValueParser::<usize>::new().range(0..=constants::MAX_GENERATE_COUNT as u64)
        )]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Run the generated batch through the cleaning pipeline and export it
        #[arg(long)]
        clean: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Clean an existing CSV or JSON file of raw profiles and export the survivors
    Clean {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn build_exporter(config: &Config, args: &OutputArgs) -> FileExporter {
    let path = args.output.clone().unwrap_or_else(|| config.output.path.clone());
    let format = args
        .format
        .or_else(|| ExportFormat::from_path(&path))
        .unwrap_or(config.output.format);
    FileExporter::new(path, format)
}

fn write_report<T: Serialize>(path: Option<&Path>, report: &T) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("Wrote run report to {}", path.display());
    Ok(())
}

fn parse_roles(roles: Option<&str>) -> anyhow::Result<Vec<RoleType>> {
    match roles {
        Some(list) => list
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<RoleType>().map_err(anyhow::Error::from))
            .collect(),
        None => Ok(RoleType::ALL.to_vec()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let pipeline = CleaningPipeline::with_rules(config.filters.clone());

    match cli.command {
        Commands::Run {
            roles,
            target_per_role,
            no_fallback,
            offline,
            seed,
            output,
        } => {
            println!("🚀 Running Twine scraper...");
            let options = RunOptions {
                roles: parse_roles(roles.as_deref())?,
                target_per_role: target_per_role.unwrap_or(config.collector.target_per_role),
                use_fallback: config.collector.use_fallback && !no_fallback,
                seed,
            };

            let collector = if offline {
                None
            } else {
                let fetcher = ReqwestFetcher::new(&config.collector)?;
                Some(CollectUseCase::new(
                    Box::new(fetcher),
                    Box::new(HtmlFieldExtractor::new()),
                    config.collector.clone(),
                ))
            };
            let exporter = build_exporter(&config, &output);
            let cleaner = CleanUseCase::new(pipeline, Box::new(exporter));

            match RunUseCase::new(collector, cleaner).run(&options).await {
                Ok(report) => {
                    report.log();
                    write_report(output.report.as_deref(), &report)?;
                    println!("✅ Run completed: {} profiles exported", report.rows_written);
                }
                Err(e) => {
                    error!("Run failed: {}", e);
                    println!("❌ Run failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Generate {
            role,
            count,
            seed,
            clean,
            output,
        } => {
            let role: RoleType = role.parse()?;
            let mut generator = match seed {
                Some(seed) => FallbackGenerator::seeded(seed),
                None => FallbackGenerator::from_entropy(),
            };
            let records = generator.generate(role, count);
            info!("Generated {} {} records", records.len(), role.label());

            if clean {
                let exporter = build_exporter(&config, &output);
                let summary = CleanUseCase::new(pipeline, Box::new(exporter)).execute(&records)?;
                write_report(output.report.as_deref(), &summary)?;
                println!("✅ Exported {} of {} generated profiles", summary.rows_written, records.len());
            } else {
                let written = if output.output.is_some() {
                    let exporter = build_exporter(&config, &output);
                    let written = exporter.write_raw(&records)?;
                    println!("✅ Wrote {} generated records to {}", written, exporter.path().display());
                    written
                } else {
                    // Logs go to stderr, so stdout carries only the batch
                    let stdout = std::io::stdout().lock();
                    match output.format.unwrap_or(ExportFormat::Json) {
                        ExportFormat::Csv => write_raw_csv(stdout, &records)?,
                        ExportFormat::Json => {
                            let written = write_json(stdout, &records)?;
                            println!();
                            written
                        }
                    }
                };
                let report = serde_json::json!({
                    "role": role.label(),
                    "generated": records.len(),
                    "rows_written": written,
                });
                write_report(output.report.as_deref(), &report)?;
            }
        }
        Commands::Clean { input, output } => {
            println!("🔨 Cleaning {}...", input.display());
            let records = load_raw_profiles(&input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            let exporter = build_exporter(&config, &output);
            let summary = CleanUseCase::new(pipeline, Box::new(exporter)).execute(&records)?;
            write_report(output.report.as_deref(), &summary)?;
            println!(
                "✅ Kept {} of {} profiles",
                summary.rejections.accepted, summary.rejections.total_input
            );
        }
    }
    Ok(())
}
