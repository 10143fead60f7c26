//! PDF metadata and per-page geometry

use std::path::Path;
use lopdf::{Document, Object};
use crate::document::PageDocument;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::pdf::document::PdfDocument;

/// Count pages by reading the Count field from the Pages dictionary
/// This is more reliable than get_pages() which doesn't handle nested page trees
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = match doc.trailer.get(b"Root")? {
        Object::Reference(id) => *id,
        _ => return Err(Error::MalformedPage("Root is not a reference".to_string())),
    };

    let pages_id = match doc.get_dictionary(catalog_id)?.get(b"Pages")? {
        Object::Reference(id) => *id,
        _ => return Err(Error::MalformedPage("Pages is not a reference".to_string())),
    };

    match doc.get_dictionary(pages_id)?.get(b"Count")? {
        Object::Integer(n) if *n >= 0 => Ok(*n as usize),
        _ => Err(Error::MalformedPage("Count is not a non-negative integer".to_string())),
    }
}

/// Geometry of a single page
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    /// 1-based page number
    pub number: usize,
    /// Raw `/Rotate` value, inherited if necessary
    pub rotation: i64,
    /// Effective crop box (falls back to the media box)
    pub crop_box: Rect,
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages according to the page tree's Count field
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
    /// Geometry of every page in display order
    pub pages: Vec<PageInfo>,
}

/// Collect rotation and crop box for every page
pub fn page_infos(pdf: &PdfDocument) -> Result<Vec<PageInfo>> {
    (0..pdf.page_count())
        .map(|index| {
            Ok(PageInfo {
                number: index + 1,
                rotation: pdf.rotation(index)?,
                crop_box: pdf.crop_box(index)?,
            })
        })
        .collect()
}

/// Load a PDF and report the geometry of every page
pub fn inspect_pages(path: &Path) -> Result<Vec<PageInfo>> {
    let pdf = PdfDocument::load(path)?;
    page_infos(&pdf)
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    let pdf = PdfDocument::load(path)?;
    let doc = pdf.inner();

    let page_count = count_pages_from_catalog(doc)?;

    let mut title = None;
    let mut author = None;

    if let Ok(Object::Reference(info_id)) = doc.trailer.get(b"Info") {
        if let Ok(info_dict) = doc.get_dictionary(*info_id) {
            title = info_string(info_dict, b"Title");
            author = info_string(info_dict, b"Author");
        }
    }

    Ok(PdfMetadata {
        page_count,
        title,
        author,
        pages: page_infos(&pdf)?,
    })
}

fn info_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let bytes = dict.get(key).ok()?.as_str().ok()?;
    String::from_utf8(bytes.to_vec()).ok()
}
