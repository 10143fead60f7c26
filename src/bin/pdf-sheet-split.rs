//! PDF Sheet Split CLI tool
//!
//! Splits a two-up scanned first page of a PDF into two logical pages.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use pdf_sheet_split::pdf::{extract_metadata, split_pdf, SplitOptions};
use pdf_sheet_split::{Error, SplitPolicy};

/// Exit code when the input file is missing
const EXIT_INPUT_MISSING: i32 = 1;
/// Exit code when the output file exists and --force was not given
const EXIT_OUTPUT_EXISTS: i32 = 2;
const EXIT_FAILURE: i32 = 3;

/// PDF Sheet Split - Turn a two-up first page into two pages
#[derive(Parser)]
#[command(name = "pdf-sheet-split")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Split the first page of a booklet scan
    pdf-sheet-split split -i scan.pdf -o pages.pdf

    # Cut left/right without rotating, replacing an existing output
    pdf-sheet-split split -i scan.pdf -o pages.pdf --policy crop-only --force

    # Show rotation and crop box of every page
    pdf-sheet-split info pages.pdf")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the first page into two pages, appending the second half at the end
    Split {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,

        /// How the sheet is cut and turned
        #[arg(long, value_enum, default_value_t = PolicyArg::Compensated)]
        policy: PolicyArg,
    },

    /// Show rotation and crop box of every page in a PDF
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Cut across the height and turn 0°/180° sheets a quarter turn
    Compensated,
    /// Only adjust crop boxes: left/right for 0°/180°, bottom/top for 90°/270°
    CropOnly,
}

impl From<PolicyArg> for SplitPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Compensated => SplitPolicy::compensated(),
            PolicyArg::CropOnly => SplitPolicy::crop_only(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Split { input, output, force, policy } => {
            cmd_split(input, output, force, policy)
        }
        Commands::Info { input } => {
            cmd_info(input)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(exit_code(&e));
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<Error>() {
        Some(Error::FileNotFound(_)) => EXIT_INPUT_MISSING,
        Some(Error::OutputExists(_)) => EXIT_OUTPUT_EXISTS,
        _ => EXIT_FAILURE,
    }
}

/// Split the first page of a PDF
fn cmd_split(input: PathBuf, output: PathBuf, force: bool, policy: PolicyArg) -> anyhow::Result<()> {
    let options = SplitOptions {
        input_path: input,
        output_path: output,
        overwrite: force,
        policy: policy.into(),
    };

    let report = split_pdf(&options)
        .with_context(|| format!("Failed to split {}", options.input_path.display()))?;

    let plan = report.outcome.plan;
    eprintln!(
        "Page 1: crop {} rotation {}",
        plan.first.crop_box, plan.first.rotation
    );
    eprintln!(
        "Page {}: crop {} rotation {}",
        report.outcome.last_index + 1,
        plan.last.crop_box,
        plan.last.rotation
    );
    eprintln!(
        "Split {} pages into {}: {}",
        report.input_pages,
        report.output_pages,
        options.output_path.display()
    );

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    let metadata = extract_metadata(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    for page in metadata.pages {
        println!(
            "  {:>4}  rotate {:>4}  crop {}",
            page.number, page.rotation, page.crop_box
        );
    }

    Ok(())
}
