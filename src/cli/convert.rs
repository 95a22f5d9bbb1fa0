use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use trajflat::filter::FilterOptions;
use trajflat::pipeline::{BatchSummary, ConversionConfig, Converter, ProgressEvent};
use trajflat::writer::WriterConfig;

use super::config::SettingsFile;

/// Flags of the convert command
pub struct ConvertArgs {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// `Some` when `--drop-legacy` or `--keep-legacy` was given
    pub drop_legacy: Option<bool>,
    /// `Some` when `--drop-hydrogen` or `--keep-hydrogen` was given
    pub drop_hydrogen: Option<bool>,
    /// `Some` when `--tsv` or `--csv` was given
    pub tsv: Option<bool>,
    pub config: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Convert every archive in the input directory
pub fn run(args: ConvertArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };
    let config = resolve_config(&args, file_config);

    info!("trajflat - .npz to flat table conversion");
    info!("=========================================");

    let converter = Converter::new(config);
    let summary = converter.run_with_progress(print_progress)?;

    print_summary(&summary, converter.config().writer.extension());

    if let Some(report) = &args.report {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize report")?;
        std::fs::write(report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        info!("Report written to {}", report.display());
    }

    if summary.has_failures() {
        anyhow::bail!(
            "{} of {} archives could not be converted",
            summary.skipped.len(),
            summary.skipped.len() + summary.converted.len()
        );
    }

    Ok(())
}

/// Merge CLI flags over config file values over defaults
fn resolve_config(args: &ConvertArgs, file_config: SettingsFile) -> ConversionConfig {
    let file = file_config.conversion;
    let defaults = ConversionConfig::default();

    let drop_legacy_fields = args
        .drop_legacy
        .or(file.drop_legacy_fields)
        .unwrap_or(defaults.filter.drop_legacy_fields);
    let drop_hydrogen = args
        .drop_hydrogen
        .or(file.drop_hydrogen)
        .unwrap_or(defaults.filter.drop_hydrogen);
    let writer = if args.tsv.or(file.tsv).unwrap_or(false) {
        WriterConfig::tsv()
    } else {
        defaults.writer
    };

    ConversionConfig {
        input_dir: args
            .input_dir
            .clone()
            .or(file.input_dir)
            .unwrap_or(defaults.input_dir),
        output_dir: args
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or(defaults.output_dir),
        filter: FilterOptions {
            drop_legacy_fields,
            drop_hydrogen,
        },
        writer,
    }
}

fn print_progress(event: ProgressEvent<'_>) {
    match event {
        ProgressEvent::Started(input) => println!("{}", input.display()),
        ProgressEvent::Converted(converted) => println!(
            "Saved data from {} to {}",
            converted
                .input
                .file_name()
                .unwrap_or_default()
                .to_string_lossy(),
            converted.output.display()
        ),
        ProgressEvent::Skipped(skipped) => {
            eprintln!("Skipped {}: {}", skipped.input.display(), skipped.reason)
        }
    }
}

fn print_summary(summary: &BatchSummary, extension: &str) {
    let line = format!(
        "All .npz files have been processed and saved as .{} files in {}.",
        extension,
        summary.output_dir.display()
    );

    #[cfg(feature = "colorized_output")]
    {
        use console::style;

        if summary.has_failures() {
            println!(
                "{} ({} skipped)",
                style(line).yellow(),
                style(summary.skipped.len()).red().bold()
            );
        } else {
            println!("{}", style(line).green());
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        if summary.has_failures() {
            println!("{} ({} skipped)", line, summary.skipped.len());
        } else {
            println!("{}", line);
        }
    }
}
