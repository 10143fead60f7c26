//! PDF container support

pub mod document;
pub mod metadata;
pub mod split;

// Re-export commonly used items
pub use document::PdfDocument;
pub use metadata::{extract_metadata, inspect_pages, page_infos, PageInfo, PdfMetadata};
pub use split::{split_pdf, SplitOptions, SplitReport};
