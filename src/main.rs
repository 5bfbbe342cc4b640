use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use timetable_tools::catalog::{MatchMode, ModuleCatalog};
use timetable_tools::consolidate::{ConsolidateOptions, DEFAULT_TOLERANCE_MINUTES, consolidate};
use timetable_tools::finder::find_course;
use timetable_tools::grid::ExtractConfig;
use timetable_tools::grid::extract::DEFAULT_LOCATION_MARKER;
use timetable_tools::io::schedule_json;
use timetable_tools::sync::{self, RunSummary};
use timetable_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract(args) => execute_extract(args),
        Command::Consolidate(args) => execute_consolidate(args),
        Command::Convert(args) => execute_convert(args),
        Command::Find(args) => execute_find(args),
    }
}

fn execute_extract(args: ExtractArgs) -> Result<()> {
    ensure_exists(&args.input)?;

    let mut config = ExtractConfig::new(ModuleCatalog::load(&args.modules)?);
    config.match_mode = args.match_mode;
    config.location_marker = args.location_marker.clone();
    let options = args.merge.options();

    let summary = match InputFormat::detect(&args.input) {
        Some(InputFormat::Excel) => sync::excel_to_schedule(
            &args.input,
            &args.output,
            args.sheet.as_deref(),
            &config,
            &options,
        )?,
        Some(InputFormat::Csv) => {
            sync::csv_to_schedule(&args.input, &args.output, &config, &options)?
        }
        None => {
            return Err(ToolError::UnsupportedConversion {
                from: extension_of(&args.input),
                to: "json".to_string(),
            });
        }
    };

    report(&summary);
    Ok(())
}

fn execute_consolidate(args: ConsolidateArgs) -> Result<()> {
    ensure_exists(&args.input)?;
    let summary = sync::consolidate_document(&args.input, &args.output, &args.merge.options())?;
    report(&summary);
    Ok(())
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    ensure_exists(&args.input)?;
    if InputFormat::detect(&args.input) != Some(InputFormat::Excel) {
        return Err(ToolError::UnsupportedConversion {
            from: extension_of(&args.input),
            to: "csv".to_string(),
        });
    }

    let rows = sync::excel_to_csv(&args.input, &args.output, args.sheet.as_deref())?;
    println!("wrote {rows} rows to {}", args.output.display());
    Ok(())
}

fn execute_find(args: FindArgs) -> Result<()> {
    ensure_exists(&args.schedule)?;
    let observations = schedule_json::read_observations(&args.schedule)?;
    let schedule = consolidate(observations, &ConsolidateOptions::default()).schedule;

    let hits = find_course(&schedule, &args.query);
    if hits.is_empty() {
        println!("no sessions found for {}", args.query);
        return Ok(());
    }

    for (module, record) in hits {
        println!(
            "{module}  {}  {}  {}  {}",
            record.day, record.time, record.location, record.label
        );
    }
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn report(summary: &RunSummary) {
    println!(
        "combined schedules for {} modules ({} sessions from {} observations, {} skipped)",
        summary.modules, summary.sessions, summary.observations, summary.malformed
    );
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Turn an exported university timetable into per-module class schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and consolidate module sessions from an XLSX or CSV timetable.
    Extract(ExtractArgs),
    /// Re-merge the sessions of an existing schedule document.
    Consolidate(ConsolidateArgs),
    /// Convert a worksheet to CSV with merged cells filled in.
    Convert(ConvertArgs),
    /// Look up a course in a schedule document.
    Find(FindArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Largest gap in minutes between slots that still merge.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE_MINUTES)]
    tolerance: u32,

    /// Treat class labels that differ only in case as the same session.
    #[arg(long)]
    fold_label_case: bool,
}

impl MergeArgs {
    fn options(&self) -> ConsolidateOptions {
        ConsolidateOptions {
            tolerance_minutes: self.tolerance,
            fold_label_case: self.fold_label_case,
        }
    }
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Timetable file (.xlsx, .xlsm or .csv).
    #[arg(long)]
    input: PathBuf,

    /// Output schedule document.
    #[arg(long)]
    output: PathBuf,

    /// Module codes to look for: one per line, or a JSON array.
    #[arg(long)]
    modules: PathBuf,

    /// Worksheet to read; defaults to the first one.
    #[arg(long)]
    sheet: Option<String>,

    /// How module codes are matched inside class cells.
    #[arg(long, value_enum, default_value_t = MatchMode::Token)]
    match_mode: MatchMode,

    /// Text that marks a venue row.
    #[arg(long, default_value = DEFAULT_LOCATION_MARKER)]
    location_marker: String,

    #[command(flatten)]
    merge: MergeArgs,
}

#[derive(clap::Args)]
struct ConsolidateArgs {
    /// Schedule document to re-merge.
    #[arg(long)]
    input: PathBuf,

    /// Output schedule document.
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    merge: MergeArgs,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Workbook to convert.
    #[arg(long)]
    input: PathBuf,

    /// CSV file to write.
    #[arg(long)]
    output: PathBuf,

    /// Worksheet to read; defaults to the first one.
    #[arg(long)]
    sheet: Option<String>,
}

#[derive(clap::Args)]
struct FindArgs {
    /// Schedule document to search.
    #[arg(long)]
    schedule: PathBuf,

    /// Full or partial module code, e.g. "CHEM 101".
    query: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InputFormat {
    Excel,
    Csv,
}

impl InputFormat {
    fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" => Some(InputFormat::Excel),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}
