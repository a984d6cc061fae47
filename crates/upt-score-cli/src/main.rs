//! upt-score CLI - read unit total scores from report workbooks

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use upt_score::prelude::*;
use upt_score::{extract_from_path_with, CsvWriteOptions, CsvWriter, EntryStatus};

/// Exit status when no score was produced
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "upt-score")]
#[command(author, version, about = "Read unit total scores from report workbooks")]
struct Cli {
    /// More logging on stderr (-v debug, -vv trace); RUST_LOG applies otherwise
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where to look for the score
#[derive(Args)]
struct LookupArgs {
    /// Cell read first
    #[arg(long, default_value = "D13")]
    cell: CellAddress,

    /// Label searched for when the cell holds no number
    #[arg(long, default_value = "total score")]
    label: String,

    /// Treat scores of zero or below as missing
    #[arg(long)]
    require_positive: bool,
}

impl LookupArgs {
    fn extractor(&self) -> ScoreExtractor {
        ScoreExtractor::with_options(
            &ExtractOptions::default()
                .with_fixed_cell(self.cell)
                .with_label(&self.label),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the total score from one workbook
    Extract {
        /// Uploaded workbook (xlsx, xlsm, csv)
        input: PathBuf,

        /// Unit sheet name (matched ignoring case)
        #[arg(short, long)]
        sheet: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,
    },

    /// Extract scores from many workbooks into a CSV report
    Batch {
        /// Uploaded workbooks
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Sheet name to read in every file (default: each file's name without extension)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Target score to compare against
        #[arg(short, long)]
        target: Option<f64>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        #[command(flatten)]
        lookup: LookupArgs,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            sheet,
            json,
            lookup,
        } => extract(&input, &sheet, json, &lookup),
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Batch {
            inputs,
            sheet,
            target,
            output,
            delimiter,
            lookup,
        } => batch(
            &inputs,
            sheet.as_deref(),
            target,
            output.as_deref(),
            delimiter,
            &lookup,
        ),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn extract(input: &Path, sheet: &str, json: bool, lookup: &LookupArgs) -> Result<ExitCode> {
    let result = extract_from_path_with(&lookup.extractor(), input, sheet)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    if json {
        let text = serde_json::to_string_pretty(&result).context("Failed to encode result")?;
        println!("{}", text);
    } else {
        println!("{}", result);
    }

    match result.score() {
        Some(score) if lookup.require_positive && score <= 0.0 => {
            eprintln!("Score {} is not positive", score);
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::from(EXIT_NOT_FOUND)),
    }
}

fn list_sheets(input: &Path) -> Result<ExitCode> {
    let workbook =
        Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        let range = sheet
            .used_range()
            .map_or_else(|| "empty".to_string(), |r| r.to_string());
        let hidden = if sheet.is_visible() { "" } else { "\thidden" };
        println!("{}\t{}\t{}{}", i, sheet.name(), range, hidden);
    }

    Ok(ExitCode::SUCCESS)
}

fn batch(
    inputs: &[PathBuf],
    sheet: Option<&str>,
    target: Option<f64>,
    output: Option<&Path>,
    delimiter: char,
    lookup: &LookupArgs,
) -> Result<ExitCode> {
    ensure!(delimiter.is_ascii(), "Delimiter must be a single ASCII character");

    let extractor = lookup.extractor();
    let mut report = ScoreReport::new().with_require_positive(lookup.require_positive);
    if let Some(target) = target {
        report = report.with_target(target);
    }

    for input in inputs {
        let sheet_name = match sheet {
            Some(name) => name.to_string(),
            None => input
                .file_stem()
                .and_then(|s| s.to_str())
                .with_context(|| format!("Cannot derive a sheet name from '{}'", input.display()))?
                .to_string(),
        };
        let result = extract_from_path_with(&extractor, input, &sheet_name);
        report.record(input.display().to_string(), sheet_name, result);
    }

    let sheet = report.to_worksheet().context("Failed to build report")?;
    let options = CsvWriteOptions {
        delimiter: delimiter as u8,
        ..Default::default()
    };

    if let Some(output_path) = output {
        CsvWriter::write_file(&sheet, output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} rows to '{}'", report.len(), output_path.display());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        CsvWriter::write(&sheet, &mut handle, &options).context("Failed to write to stdout")?;
        handle.flush().context("Failed to write to stdout")?;
    }

    match report.mean_score() {
        Some(mean) => eprintln!(
            "{}/{} scores found, mean {:.2}",
            report.found_count(),
            report.len(),
            mean
        ),
        None => eprintln!("0/{} scores found", report.len()),
    }

    let all_found = report
        .entries()
        .iter()
        .all(|entry| report.status(entry) == EntryStatus::Found);
    Ok(if all_found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NOT_FOUND)
    })
}
