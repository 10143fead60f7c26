//! Splitting the first page of a PDF file

use std::path::PathBuf;
use tracing::info;
use crate::document::PageDocument;
use crate::error::{Error, Result};
use crate::pdf::document::PdfDocument;
use crate::policy::SplitPolicy;
use crate::split::{split_first_page, SplitOutcome};

/// Options for splitting a PDF
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// PDF whose first page holds two logical pages
    pub input_path: PathBuf,
    /// Where the result is written
    pub output_path: PathBuf,
    /// Replace the output file if it already exists
    pub overwrite: bool,
    /// How the sheet is cut and turned
    pub policy: SplitPolicy,
}

impl SplitOptions {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            overwrite: false,
            policy: SplitPolicy::default(),
        }
    }
}

/// Summary of a completed split
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub input_pages: usize,
    pub output_pages: usize,
    pub outcome: SplitOutcome,
}

/// Split the first page of a PDF into two pages and save the result
///
/// Page 1 keeps the lower (or left) half of the sheet and a copy of it holding
/// the other half is appended as the last page. No content streams are
/// rewritten.
///
/// # Example
///
/// ```no_run
/// use pdf_sheet_split::pdf::{split_pdf, SplitOptions};
///
/// let options = SplitOptions::new("scan.pdf", "scan-split.pdf");
/// let report = split_pdf(&options).expect("Failed to split");
/// assert_eq!(report.output_pages, report.input_pages + 1);
/// ```
pub fn split_pdf(options: &SplitOptions) -> Result<SplitReport> {
    if !options.input_path.exists() {
        return Err(Error::FileNotFound(options.input_path.clone()));
    }
    if options.output_path.exists() && !options.overwrite {
        return Err(Error::OutputExists(options.output_path.clone()));
    }

    info!(
        "Copying pages from {} to {}",
        options.input_path.display(),
        options.output_path.display()
    );
    let mut pdf = PdfDocument::load(&options.input_path)?;
    let input_pages = pdf.page_count();

    let outcome = split_first_page(&mut pdf, &options.policy)?;

    pdf.save(&options.output_path)?;
    info!("Saved document to {}", options.output_path.display());

    Ok(SplitReport {
        input_pages,
        output_pages: pdf.page_count(),
        outcome,
    })
}
