//! Splitting a two-up first page into two logical pages
//!
//! The first page of the document is duplicated onto the end, then both copies
//! get a crop box covering one half of the sheet. Content is never touched;
//! only the crop box and rotation of the first and last page change.

use tracing::{debug, info};
use crate::document::PageDocument;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Rotation};
use crate::policy::{SplitPolicy, SplitRule};

/// Rotation and crop box for one half of the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView {
    pub rotation: Rotation,
    pub crop_box: Rect,
}

/// Computed geometry for both halves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlan {
    /// Rule the plan was derived from
    pub rule: SplitRule,
    /// Lower (or left) half, stays as the first page
    pub first: PageView,
    /// Upper (or right) half, becomes the appended last page
    pub last: PageView,
}

/// What `split_first_page` did to the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOutcome {
    /// Index of the appended page
    pub last_index: usize,
    pub plan: SplitPlan,
}

/// Compute both halves for a sheet with the given raw rotation and crop box
///
/// Pure function of its inputs; nothing is modified.
pub fn plan_split(rotation: i64, crop_box: Rect, policy: &SplitPolicy) -> Result<SplitPlan> {
    let rotation = Rotation::from_degrees(rotation)?;
    let rule = policy.rule(rotation);
    let (lower, upper) = crop_box.bisect(rule.axis)?;
    let turned = rotation.turned(rule.turn);

    Ok(SplitPlan {
        rule,
        first: PageView { rotation: turned, crop_box: lower },
        last: PageView { rotation: turned, crop_box: upper },
    })
}

/// Split the first page of `doc` in place using `policy`
///
/// Everything is validated before the document is touched, so on error the
/// document is left as it was.
pub fn split_first_page<D: PageDocument>(doc: &mut D, policy: &SplitPolicy) -> Result<SplitOutcome> {
    if doc.page_count() == 0 {
        return Err(Error::EmptyDocument);
    }

    let rotation = doc.rotation(0)?;
    let crop_box = doc.crop_box(0)?;
    let plan = plan_split(rotation, crop_box, policy)?;

    debug!(
        policy = %policy,
        rotation,
        crop_box = %crop_box,
        axis = ?plan.rule.axis,
        "Planned split of first page"
    );

    info!("Adding additional copy of first page to end of document");
    let last_index = doc.append_page_view(0)?;

    info!("Applying crop box adjustments");
    apply_view(doc, 0, &plan.first)?;
    apply_view(doc, last_index, &plan.last)?;

    Ok(SplitOutcome { last_index, plan })
}

/// Split the first page of `doc` with the default policy and hand it back
pub fn split<D: PageDocument>(mut doc: D) -> Result<D> {
    split_first_page(&mut doc, &SplitPolicy::default())?;
    Ok(doc)
}

fn apply_view<D: PageDocument>(doc: &mut D, index: usize, view: &PageView) -> Result<()> {
    doc.set_crop_box(index, view.crop_box)?;
    doc.set_rotation(index, view.rotation)
}
