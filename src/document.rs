//! Page-level document abstraction
//!
//! The splitter only needs to read and write two attributes per page and to
//! append a page that views the same content as an existing one. Anything that
//! can do that implements [`PageDocument`]; the PDF-backed implementation lives
//! in [`crate::pdf::PdfDocument`] and [`MemoryDocument`] keeps everything in
//! memory.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Rotation};

/// An ordered sequence of pages with per-page rotation and crop box
///
/// Page indices are 0-based.
pub trait PageDocument {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Raw rotation in degrees, as stored
    ///
    /// This is not validated so callers can report values that aren't right
    /// angles.
    fn rotation(&self, index: usize) -> Result<i64>;

    fn set_rotation(&mut self, index: usize, rotation: Rotation) -> Result<()>;

    /// Visible region of the page
    fn crop_box(&self, index: usize) -> Result<Rect>;

    fn set_crop_box(&mut self, index: usize, crop_box: Rect) -> Result<()>;

    /// Append a new last page showing the same content as page `source`
    ///
    /// The new page starts with the source page's rotation and crop box, but
    /// changing them afterwards must not affect the source page. Returns the
    /// index of the new page.
    fn append_page_view(&mut self, source: usize) -> Result<usize>;
}

/// A page held in memory
///
/// `content` is shared between all pages that view it.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    pub content: Arc<[u8]>,
    pub rotation: i64,
    pub crop_box: Rect,
}

impl MemoryPage {
    pub fn new(content: impl Into<Arc<[u8]>>, rotation: i64, crop_box: Rect) -> Self {
        Self {
            content: content.into(),
            rotation,
            crop_box,
        }
    }
}

/// In-memory [`PageDocument`]
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<MemoryPage>,
}

impl MemoryDocument {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[MemoryPage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Result<&MemoryPage> {
        let count = self.pages.len();
        self.pages
            .get(index)
            .ok_or(Error::PageOutOfRange { index, count })
    }

    fn page_mut(&mut self, index: usize) -> Result<&mut MemoryPage> {
        let count = self.pages.len();
        self.pages
            .get_mut(index)
            .ok_or(Error::PageOutOfRange { index, count })
    }
}

impl PageDocument for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rotation(&self, index: usize) -> Result<i64> {
        Ok(self.page(index)?.rotation)
    }

    fn set_rotation(&mut self, index: usize, rotation: Rotation) -> Result<()> {
        self.page_mut(index)?.rotation = rotation.degrees();
        Ok(())
    }

    fn crop_box(&self, index: usize) -> Result<Rect> {
        Ok(self.page(index)?.crop_box)
    }

    fn set_crop_box(&mut self, index: usize, crop_box: Rect) -> Result<()> {
        self.page_mut(index)?.crop_box = crop_box;
        Ok(())
    }

    fn append_page_view(&mut self, source: usize) -> Result<usize> {
        // Cloning the page clones the Arc, not the content
        let view = self.page(source)?.clone();
        self.pages.push(view);
        Ok(self.pages.len() - 1)
    }
}
