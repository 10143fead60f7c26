//! Split policies: which axis to cut and how far to turn the halves
//!
//! A policy is an explicit table with one entry per right-angle rotation of
//! the original sheet. Keeping it as data rather than branching in the
//! splitter means each entry, including the ones that leave rotation alone,
//! can be checked on its own.

use std::fmt;
use crate::geometry::{Rotation, SplitAxis};

/// What to do with a sheet shown at one particular rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRule {
    /// Where the crop box is cut
    pub axis: SplitAxis,
    /// Extra clockwise quarter turns applied to both halves
    pub turn: u8,
}

impl SplitRule {
    pub const fn new(axis: SplitAxis, turn: u8) -> Self {
        Self { axis, turn }
    }
}

/// A named rotation -> rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    name: &'static str,
    /// Indexed by `Rotation::quarter_turns()`
    rules: [SplitRule; 4],
}

impl SplitPolicy {
    /// Cut every sheet across its height, and turn sheets shown at 0° or 180°
    /// by one quarter so their halves read upright
    pub const fn compensated() -> Self {
        const TURN: SplitRule = SplitRule::new(SplitAxis::Horizontal, 1);
        const KEEP: SplitRule = SplitRule::new(SplitAxis::Horizontal, 0);
        Self {
            name: "compensated",
            rules: [TURN, KEEP, TURN, KEEP],
        }
    }

    /// Only adjust crop boxes: sheets at 0° or 180° are cut into left and
    /// right halves, sheets at 90° or 270° into bottom and top halves
    pub const fn crop_only() -> Self {
        const SIDE_BY_SIDE: SplitRule = SplitRule::new(SplitAxis::Vertical, 0);
        const STACKED: SplitRule = SplitRule::new(SplitAxis::Horizontal, 0);
        Self {
            name: "crop-only",
            rules: [SIDE_BY_SIDE, STACKED, SIDE_BY_SIDE, STACKED],
        }
    }

    /// Rule for a sheet currently shown at `rotation`
    pub fn rule(&self, rotation: Rotation) -> SplitRule {
        self.rules[rotation.quarter_turns() as usize]
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self::compensated()
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
