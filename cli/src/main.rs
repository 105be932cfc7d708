//! docseg CLI - document segmentation tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docseg::{
    load_document, render, BatchReport, Docseg, DocumentProfile, GridConfig, GridExtractor,
    JsonFormat, TableRegion,
};

#[derive(Parser)]
#[command(name = "docseg")]
#[command(version)]
#[command(about = "Segment positioned page dumps into sections, tables, and metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment documents with a profile
    Process {
        /// Profile (JSON)
        #[arg(short, long, value_name = "PROFILE", env = "DOCSEG_PROFILE")]
        profile: PathBuf,

        /// Page dumps (JSON)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Extract a ruled table from one page
    Table {
        /// Page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Bottom of the table region
        #[arg(long, allow_negative_numbers = true)]
        y_min: f32,

        /// Top of the table region
        #[arg(long, allow_negative_numbers = true)]
        y_max: f32,

        /// Left of the table region
        #[arg(long, allow_negative_numbers = true, default_value = "-1")]
        x_min: f32,

        /// Right of the table region
        #[arg(long, default_value = "10000")]
        x_max: f32,

        /// Use text baselines instead of ruling lines as row boundaries
        #[arg(long)]
        text_rows: bool,

        /// Treat row 0 as header and column 0 as row index
        #[arg(long)]
        header: bool,

        /// Output JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },

    /// Validate and show a profile
    Profile {
        /// Profile (JSON)
        #[arg(value_name = "PROFILE")]
        path: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Batch report as JSON
    Json,
    /// Readable section blocks
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Process {
            profile,
            inputs,
            output,
            format,
            compact,
            sequential,
        }) => cmd_process(&profile, &inputs, output.as_deref(), format, compact, sequential),
        Some(Commands::Table {
            input,
            page,
            y_min,
            y_max,
            x_min,
            x_max,
            text_rows,
            header,
            json,
        }) => {
            let region = TableRegion::new(y_min, y_max).with_x_range(x_min, x_max);
            let config = GridConfig {
                use_ruling_lines: !text_rows,
                header,
            };
            cmd_table(&input, page, &region, config, json)
        }
        Some(Commands::Profile { path }) => cmd_profile(&path),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!(
                "{}",
                "Usage: docseg process --profile <PROFILE> <FILE>...".yellow()
            );
            println!("       docseg --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_process(
    profile_path: &Path,
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let docseg = Docseg::from_profile_file(profile_path)?.with_parallel(!sequential);
    log::debug!(
        "profile {} loaded from {}",
        docseg.profile().series,
        profile_path.display()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Segmenting {} document(s) as {}...",
        inputs.len(),
        docseg.profile().series
    ));
    let report = docseg.process_files(inputs)?;
    pb.finish_and_clear();

    let rendered = match format {
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::report_to_json(&report, json_format)?
        }
        OutputFormat::Text => render::to_text(&report.records),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    print_summary(&report, inputs.len());
    Ok(())
}

fn print_summary(report: &BatchReport, documents: usize) {
    eprintln!(
        "{} {} record(s) from {} document(s)",
        "Done!".green().bold(),
        report.records.len(),
        documents - report.failures.len()
    );
    for failure in &report.failures {
        eprintln!(
            "  {} {}: {}",
            "✗".red(),
            failure.file_name.bold(),
            failure.reason
        );
    }
}

fn cmd_table(
    input: &Path,
    page: u32,
    region: &TableRegion,
    config: GridConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    let table = GridExtractor::with_config(config).extract(doc.get_page(page)?, region)?;

    if json {
        println!("{}", render::table_to_json(&table, JsonFormat::Pretty)?);
    } else {
        println!("{}", render::table_to_text(&table));
        eprintln!(
            "{} {} rows x {} columns",
            "Table".cyan().bold(),
            table.row_count(),
            table.column_count()
        );
    }
    Ok(())
}

fn cmd_profile(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let profile = DocumentProfile::from_json_file(path)?;

    println!("{}", "Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Series".bold(), profile.series);
    println!("{}: {:?}", "Mode".bold(), profile.mode);
    println!("{}: {}", "Column threshold".bold(), profile.column_threshold);
    println!("{}: {}", "Footer font size".bold(), profile.footer_font_size);
    println!("{}: {} phrase(s)", "Stop-list".bold(), profile.stop_strings.len());
    println!();
    println!("{}", profile.to_json_pretty()?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docseg".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Geometry-heuristic document segmentation tool");
    println!();
    println!("License: MIT");
}
