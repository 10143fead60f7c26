//! [`PageDocument`] over a `lopdf::Document`

use std::path::Path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;
use crate::document::PageDocument;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Rotation};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page entries that must stay unique to one page and are left off copies
const PAGE_UNIQUE: [&[u8]; 2] = [b"Annots", b"StructParents"];

/// Guard against cycles in malformed page trees
const MAX_TREE_DEPTH: usize = 64;

/// A loaded PDF with its pages in display order
pub struct PdfDocument {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl PdfDocument {
    /// Wrap an already loaded document
    pub fn new(doc: Document) -> Self {
        // get_pages() is keyed by 1-based page number, so values come out in order
        let page_ids = doc.get_pages().into_values().collect();
        Self { doc, page_ids }
    }

    /// Load a PDF from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let doc = Document::load(path)?;
        Ok(Self::new(doc))
    }

    /// Write the document to disk as is, without recompressing streams
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.doc.save(path)?;
        Ok(())
    }

    pub fn inner(&self) -> &Document {
        &self.doc
    }

    pub fn into_inner(self) -> Document {
        self.doc
    }

    /// Object id of the page at `index`
    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(Error::PageOutOfRange {
                index,
                count: self.page_ids.len(),
            })
    }

    /// Look up `key` on the page, then on each ancestor `/Pages` node
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Result<Option<&Object>> {
        let mut node = self.doc.get_dictionary(page_id)?;

        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(value) = node.get(key) {
                return Ok(Some(value));
            }
            let parent_id = match node.get(b"Parent") {
                Ok(parent) => parent.as_reference()?,
                Err(_) => return Ok(None),
            };
            node = self.doc.get_dictionary(parent_id)?;
        }

        Err(Error::MalformedPage(format!(
            "page tree above object {} {} is too deep or cyclic",
            page_id.0, page_id.1
        )))
    }

    /// Follow a single indirect reference, if any
    fn resolve<'a>(&'a self, object: &'a Object) -> Result<&'a Object> {
        match object {
            Object::Reference(id) => Ok(self.doc.get_object(*id)?),
            other => Ok(other),
        }
    }

    fn page_box(&self, page_id: ObjectId, key: &[u8]) -> Result<Option<Rect>> {
        let Some(value) = self.inherited_attribute(page_id, key)? else {
            return Ok(None);
        };
        let array = self.resolve(value)?.as_array()?;
        if array.len() != 4 {
            return Err(Error::MalformedPage(format!(
                "{} must have 4 elements, found {}",
                String::from_utf8_lossy(key),
                array.len()
            )));
        }

        let mut corners = [0.0; 4];
        for (corner, element) in corners.iter_mut().zip(array) {
            *corner = as_number(self.resolve(element)?).ok_or_else(|| {
                Error::MalformedPage(format!(
                    "{} element is not a number",
                    String::from_utf8_lossy(key)
                ))
            })?;
        }

        Ok(Some(Rect::from_corners(corners[0], corners[1], corners[2], corners[3])))
    }

    /// Object id of the root `/Pages` node
    fn root_pages_id(&self) -> Result<ObjectId> {
        let catalog_id = self.doc.trailer.get(b"Root")?.as_reference()?;
        let catalog = self.doc.get_dictionary(catalog_id)?;
        Ok(catalog.get(b"Pages")?.as_reference()?)
    }

    fn page_dict_mut(&mut self, index: usize) -> Result<&mut Dictionary> {
        let page_id = self.page_id(index)?;
        Ok(self.doc.get_dictionary_mut(page_id)?)
    }
}

impl PageDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn rotation(&self, index: usize) -> Result<i64> {
        let page_id = self.page_id(index)?;
        let Some(value) = self.inherited_attribute(page_id, b"Rotate")? else {
            return Ok(0);
        };

        match self.resolve(value)? {
            Object::Integer(degrees) => Ok(*degrees),
            Object::Real(degrees) if degrees.fract() == 0.0 => Ok(*degrees as i64),
            // A fractional angle is never a right angle
            Object::Real(degrees) => Err(Error::InvalidRotation(*degrees as f64)),
            other => Err(Error::MalformedPage(format!(
                "/Rotate is not a number: {:?}",
                other
            ))),
        }
    }

    fn set_rotation(&mut self, index: usize, rotation: Rotation) -> Result<()> {
        self.page_dict_mut(index)?
            .set("Rotate", Object::Integer(rotation.degrees()));
        Ok(())
    }

    fn crop_box(&self, index: usize) -> Result<Rect> {
        let page_id = self.page_id(index)?;

        // CropBox defaults to MediaBox when absent
        if let Some(crop_box) = self.page_box(page_id, b"CropBox")? {
            return Ok(crop_box);
        }
        self.page_box(page_id, b"MediaBox")?
            .ok_or_else(|| Error::MalformedPage(format!("page {} has no MediaBox", index + 1)))
    }

    fn set_crop_box(&mut self, index: usize, crop_box: Rect) -> Result<()> {
        let corners = crop_box.corners().iter().map(|&v| number_object(v)).collect();
        self.page_dict_mut(index)?
            .set("CropBox", Object::Array(corners));
        Ok(())
    }

    fn append_page_view(&mut self, source: usize) -> Result<usize> {
        let source_id = self.page_id(source)?;
        let pages_id = self.root_pages_id()?;

        // Make sure the root node can take another kid before adding anything
        let root = self.doc.get_dictionary(pages_id)?;
        root.get(b"Kids")?.as_array()?;
        let count = root.get(b"Count")?.as_i64()?;

        // Shallow copy: /Contents and /Resources keep pointing at the same
        // objects, so content is shared rather than duplicated
        let mut page = self.doc.get_dictionary(source_id)?.clone();
        for key in INHERITABLE {
            if !page.has(key) {
                if let Some(value) = self.inherited_attribute(source_id, key)? {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }
        for key in PAGE_UNIQUE {
            page.remove(key);
        }
        page.set("Parent", Object::Reference(pages_id));

        let page_id = self.doc.add_object(Object::Dictionary(page));

        let pages = self.doc.get_dictionary_mut(pages_id)?;
        pages.get_mut(b"Kids")?.as_array_mut()?.push(Object::Reference(page_id));
        pages.set("Count", Object::Integer(count + 1));

        debug!(
            source = source + 1,
            object = page_id.0,
            "Appended view of page"
        );

        self.page_ids.push(page_id);
        Ok(self.page_ids.len() - 1)
    }
}

fn as_number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(n) => Some(*n as f64),
        Object::Real(n) => Some(*n as f64),
        _ => None,
    }
}

/// Integral values are written as integers to keep the output tidy
fn number_object(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Stream;

    /// Page tree with an intermediate node that carries the inherited attributes
    fn nested_document() -> Document {
        let mut doc = Document::with_version("1.5");
        let root_id = doc.new_object_id();
        let node_id = doc.new_object_id();

        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"0 0 m 10 10 l S".to_vec()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(node_id));
        page.set("Contents", Object::Reference(content_id));
        let page_id = doc.add_object(Object::Dictionary(page));

        let mut node = Dictionary::new();
        node.set("Type", Object::Name(b"Pages".to_vec()));
        node.set("Parent", Object::Reference(root_id));
        node.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        node.set("Count", Object::Integer(1));
        node.set("Rotate", Object::Integer(-90));
        node.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(400),
                Object::Integer(300),
            ]),
        );
        doc.objects.insert(node_id, Object::Dictionary(node));

        let mut root = Dictionary::new();
        root.set("Type", Object::Name(b"Pages".to_vec()));
        root.set("Kids", Object::Array(vec![Object::Reference(node_id)]));
        root.set("Count", Object::Integer(1));
        doc.objects.insert(root_id, Object::Dictionary(root));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(root_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc
    }

    #[test]
    fn test_inherited_attributes() {
        let pdf = PdfDocument::new(nested_document());

        assert_eq!(pdf.page_count(), 1);
        assert_eq!(pdf.rotation(0).unwrap(), -90);
        assert_eq!(pdf.crop_box(0).unwrap(), Rect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn test_append_materializes_inherited_attributes() {
        let mut pdf = PdfDocument::new(nested_document());
        let index = pdf.append_page_view(0).unwrap();

        assert_eq!(index, 1);
        assert_eq!(pdf.rotation(1).unwrap(), -90);
        assert_eq!(pdf.crop_box(1).unwrap(), Rect::new(0.0, 0.0, 400.0, 300.0));

        let original = pdf.inner().get_dictionary(pdf.page_id(0).unwrap()).unwrap();
        let copy = pdf.inner().get_dictionary(pdf.page_id(1).unwrap()).unwrap();
        assert_eq!(
            original.get(b"Contents").unwrap().as_reference().unwrap(),
            copy.get(b"Contents").unwrap().as_reference().unwrap()
        );

        let doc = pdf.into_inner();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_geometry_of_copy_is_independent() {
        let mut pdf = PdfDocument::new(nested_document());
        pdf.append_page_view(0).unwrap();

        pdf.set_rotation(1, Rotation::Deg90).unwrap();
        pdf.set_crop_box(1, Rect::new(0.0, 150.0, 400.0, 150.0)).unwrap();

        assert_eq!(pdf.rotation(0).unwrap(), -90);
        assert_eq!(pdf.crop_box(0).unwrap(), Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(pdf.rotation(1).unwrap(), 90);
        assert_eq!(pdf.crop_box(1).unwrap(), Rect::new(0.0, 150.0, 400.0, 150.0));
    }

    fn root_pages_id(doc: &Document) -> ObjectId {
        let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        doc.get_dictionary(catalog_id)
            .unwrap()
            .get(b"Pages")
            .unwrap()
            .as_reference()
            .unwrap()
    }

    #[test]
    fn test_append_without_count_leaves_tree_untouched() {
        let mut doc = nested_document();
        let root_id = root_pages_id(&doc);
        doc.get_dictionary_mut(root_id).unwrap().remove(b"Count");
        let objects_before = doc.objects.len();

        let mut pdf = PdfDocument::new(doc);
        let result = crate::split::split_first_page(&mut pdf, &crate::policy::SplitPolicy::default());

        assert!(result.is_err());
        assert_eq!(pdf.page_count(), 1);
        assert_eq!(pdf.rotation(0).unwrap(), -90);
        assert_eq!(pdf.crop_box(0).unwrap(), Rect::new(0.0, 0.0, 400.0, 300.0));

        let doc = pdf.into_inner();
        let kids = doc
            .get_dictionary(root_id)
            .unwrap()
            .get(b"Kids")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(kids.len(), 1);
        assert_eq!(doc.objects.len(), objects_before);
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_fractional_rotation_is_invalid_rotation() {
        let mut doc = nested_document();
        let page_id = doc.get_pages()[&1];
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Rotate", Object::Real(45.5));

        let pdf = PdfDocument::new(doc);
        assert!(matches!(
            pdf.rotation(0),
            Err(Error::InvalidRotation(degrees)) if degrees == 45.5
        ));
    }

    #[test]
    fn test_number_object() {
        assert!(matches!(number_object(50.0), Object::Integer(50)));
        assert!(matches!(number_object(395.5), Object::Real(_)));
    }

    #[test]
    fn test_page_out_of_range() {
        let pdf = PdfDocument::new(nested_document());
        assert!(matches!(
            pdf.crop_box(3),
            Err(Error::PageOutOfRange { index: 3, count: 1 })
        ));
    }
}
