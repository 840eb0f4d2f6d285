//! Colloscope command-line front end
//!
//! Loads one class colloscope from the configuration and runs a query or an
//! export on it.
//!
//! # Usage
//!
//! ```bash
//! colloscope export --class MP2I --group 7 --format calendar --output agenda.csv
//! colloscope upcoming --class MP2I --group 7 --count 5
//! colloscope groups --class MPI
//! colloscope check --class MPI
//! colloscope inspect --class MPI
//! colloscope normalize --input export.csv --output colloscope_mpi.csv
//! ```
//!
//! # Environment Variables
//!
//! - `COLLOSCOPE_CONFIG`: Configuration file, when `--config` is not given
//! - `RUST_LOG`: Log filter (default: info)

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use colloscope_engine::config::ColloscopeConfig;
use colloscope_engine::export::ExportFormat;
use colloscope_engine::io::ColloscopeLoader;
use colloscope_engine::preprocessing::ColloscopeValidator;
use colloscope_engine::services::digest::DEFAULT_UPCOMING_COUNT;
use colloscope_engine::services::{export_for_group, upcoming_digest, ColloscopeRegistry, LoadedColloscope};

#[derive(Parser)]
#[command(name = "colloscope", version, about = "Query and export oral examination timetables")]
struct Cli {
    /// Configuration file (defaults to COLLOSCOPE_CONFIG or ./colloscope.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the sessions of one group
    Export {
        #[arg(long)]
        class: String,
        #[arg(long)]
        group: String,
        /// document, table, calendar or tasklist
        #[arg(long, default_value = "document")]
        format: ExportFormat,
        /// Output file (defaults to the format's file name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the next sessions of one group
    Upcoming {
        #[arg(long)]
        class: String,
        #[arg(long)]
        group: String,
        #[arg(long, default_value_t = DEFAULT_UPCOMING_COUNT)]
        count: usize,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// List the groups of a class
    Groups {
        #[arg(long)]
        class: String,
    },
    /// Print the validation report of a class
    Check {
        #[arg(long)]
        class: String,
    },
    /// Print a JSON summary of a class
    Inspect {
        #[arg(long)]
        class: String,
    },
    /// Convert a spreadsheet export to the native layout
    Normalize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Command::Export {
            class,
            group,
            format,
            output,
        } => {
            let (config, loaded) = load_class(config_path, &class)?;
            let export = export_for_group(&loaded.colloscope, &group, format, &config.export.options)?;
            let path = output.unwrap_or_else(|| PathBuf::from(export.file_name()));
            fs::write(&path, &export.body)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            info!("Wrote {} bytes to {}", export.len(), path.display());
        }
        Command::Upcoming {
            class,
            group,
            count,
            as_of,
        } => {
            let (config, loaded) = load_class(config_path, &class)?;
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            let digest = upcoming_digest(
                loaded.colloscope.entries(),
                &group,
                as_of,
                count,
                config.export.options.locale,
                config.export.upcoming_limit,
            )?;
            print!("{}", digest);
        }
        Command::Groups { class } => {
            let (_, loaded) = load_class(config_path, &class)?;
            let mut stdout = io::stdout().lock();
            for group in loaded.colloscope.groups() {
                writeln!(stdout, "{}", group)?;
            }
        }
        Command::Check { class } => {
            let (_, loaded) = load_class(config_path, &class)?;
            let report = ColloscopeValidator::validate(&loaded.colloscope);
            for warning in &report.warnings {
                println!("warning: {}", warning);
            }
            println!(
                "{} sessions, {} groups, {} weeks, {} holidays, {} warnings",
                report.stats.total_entries,
                report.stats.groups,
                report.stats.weeks,
                report.stats.holidays,
                report.warnings.len()
            );
        }
        Command::Inspect { class } => {
            let (_, loaded) = load_class(config_path, &class)?;
            let colloscope = &loaded.colloscope;
            let report = ColloscopeValidator::validate(colloscope);
            let summary = serde_json::json!({
                "class": class,
                "layout": loaded.layout,
                "checksum": loaded.checksum,
                "loaded_at": loaded.loaded_at,
                "sessions": colloscope.len(),
                "groups": colloscope.groups(),
                "weeks": colloscope
                    .weeks()
                    .iter()
                    .map(|week| week.format("%d/%m/%Y").to_string())
                    .collect::<Vec<_>>(),
                "holidays": colloscope
                    .holidays()
                    .iter()
                    .map(|holiday| holiday.date.format("%d/%m/%Y").to_string())
                    .collect::<Vec<_>>(),
                "validation": report,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Normalize { input, output } => {
            ColloscopeLoader::normalize_file(&input, &output)?;
            info!("Wrote {}", output.display());
        }
    }

    Ok(())
}

/// Load the configuration, then the configured source of `class` into a
/// fresh registry.
fn load_class(config_path: Option<PathBuf>, class: &str) -> Result<(ColloscopeConfig, LoadedColloscope)> {
    let config = match config_path {
        Some(path) => ColloscopeConfig::from_file(path)?,
        None => ColloscopeConfig::from_default_location()?,
    };
    let source = config
        .class(class)
        .with_context(|| format!("Class {} is not configured (known: {})", class, config.class_names().join(", ")))?;
    let bytes = fs::read(&source.path)
        .with_context(|| format!("Failed to read colloscope file: {}", source.path.display()))?;

    let registry = ColloscopeRegistry::new(config.parser.clone());
    registry
        .reload(&source.name, &bytes, source.layout)
        .with_context(|| format!("Failed to parse colloscope file: {}", source.path.display()))?;
    let loaded = registry.get(&source.name)?;
    Ok((config, loaded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upcoming_count_defaults_to_five() {
        let cli = Cli::try_parse_from(["colloscope", "upcoming", "--class", "MPI", "--group", "3"]).unwrap();
        match cli.command {
            Command::Upcoming { count, as_of, .. } => {
                assert_eq!(count, 5);
                assert!(as_of.is_none());
            }
            _ => panic!("expected the upcoming command"),
        }
    }

    #[test]
    fn test_export_format_alias() {
        let cli = Cli::try_parse_from([
            "colloscope", "export", "--class", "MPI", "--group", "3", "--format", "pdf",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Export { format: ExportFormat::Document, .. }
        ));
    }
}
