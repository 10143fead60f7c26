//! PDF Sheet Split Library
//!
//! Splits a scanned sheet holding two facing pages, stored as the first page
//! of a PDF, into two logical pages. Nothing is re-rendered: the first page is
//! duplicated onto the end of the document and both copies get a crop box
//! covering one half of the sheet, plus a rotation that shows it upright.
//!
//! - [`split`] works on anything implementing [`PageDocument`]
//! - [`pdf::split_pdf`] does the whole load, split and save round trip
//! - [`SplitPolicy`] decides the cut axis and rotation per sheet rotation
//!
//! # Example
//!
//! ```no_run
//! use pdf_sheet_split::pdf::{split_pdf, SplitOptions};
//!
//! let options = SplitOptions::new("booklet-scan.pdf", "booklet-pages.pdf");
//! split_pdf(&options).expect("Failed to split PDF");
//! ```

pub mod document;
pub mod error;
pub mod geometry;
pub mod pdf;
pub mod policy;
pub mod split;

// Re-export commonly used items
pub use document::{MemoryDocument, MemoryPage, PageDocument};
pub use error::{Error, Result};
pub use geometry::{Rect, Rotation, SplitAxis};
pub use policy::{SplitPolicy, SplitRule};
pub use split::{plan_split, split, split_first_page, PageView, SplitOutcome, SplitPlan};
