//! Page geometry: crop rectangles, rotations and bisection

use std::fmt;
use crate::error::{Error, Result};

/// Axis-aligned rectangle in a page's unrotated user space (points)
///
/// The origin is the lower-left corner, matching PDF's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from a PDF box array `[llx lly urx ury]`
    ///
    /// Corners may come in either order; the result always has a
    /// non-negative width and height.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// Corners as `[llx, lly, urx, ury]`
    pub fn corners(&self) -> [f64; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Length of the side that gets halved when cutting along `axis`
    pub fn extent(&self, axis: SplitAxis) -> f64 {
        match axis {
            SplitAxis::Horizontal => self.height,
            SplitAxis::Vertical => self.width,
        }
    }

    /// Cut the rectangle in two along `axis`
    ///
    /// Returns `(lower, upper)`: bottom then top for a horizontal cut, left
    /// then right for a vertical one. The lower half takes `extent / 2` and
    /// the upper half takes whatever remains, so the two always add back up
    /// to the original extent.
    pub fn bisect(&self, axis: SplitAxis) -> Result<(Rect, Rect)> {
        let extent = self.extent(axis);
        if !extent.is_finite() || extent <= 0.0 {
            return Err(Error::InvalidGeometry {
                width: self.width,
                height: self.height,
            });
        }

        let half = extent / 2.0;
        let rest = extent - half;

        Ok(match axis {
            SplitAxis::Horizontal => (
                Rect { height: half, ..*self },
                Rect { y: self.y + half, height: rest, ..*self },
            ),
            SplitAxis::Vertical => (
                Rect { width: half, ..*self },
                Rect { x: self.x + half, width: rest, ..*self },
            ),
        })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {} {}]", self.x, self.y, self.width, self.height)
    }
}

/// Direction of the cut line through a crop box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Cut line runs left to right; halves the height
    Horizontal,
    /// Cut line runs bottom to top; halves the width
    Vertical,
}

/// Quarter-turn page rotation, clockwise as in PDF's `/Rotate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations in clockwise order
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Parse a raw `/Rotate` value
    ///
    /// PDF allows any multiple of 90, including negative ones, so the value is
    /// normalized into `0..360` first.
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidRotation(degrees as f64));
        }
        Ok(Self::from_quarter_turns(degrees.rem_euclid(360) / 90))
    }

    fn from_quarter_turns(turns: i64) -> Self {
        Self::ALL[turns.rem_euclid(4) as usize]
    }

    pub fn degrees(self) -> i64 {
        self.quarter_turns() * 90
    }

    pub fn quarter_turns(self) -> i64 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Rotate further clockwise by `turns` quarter turns, wrapping at 360
    pub fn turned(self, turns: u8) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + i64::from(turns))
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bisect_horizontal() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let (lower, upper) = rect.bisect(SplitAxis::Horizontal).unwrap();

        assert_eq!(lower, Rect::new(0.0, 0.0, 200.0, 50.0));
        assert_eq!(upper, Rect::new(0.0, 50.0, 200.0, 50.0));
    }

    #[test]
    fn test_bisect_vertical_with_offset_origin() {
        let rect = Rect::new(10.0, 20.0, 300.0, 400.0);
        let (left, right) = rect.bisect(SplitAxis::Vertical).unwrap();

        assert_eq!(left, Rect::new(10.0, 20.0, 150.0, 400.0));
        assert_eq!(right, Rect::new(160.0, 20.0, 150.0, 400.0));
    }

    #[test]
    fn test_bisect_odd_extent_conserves_height() {
        let rect = Rect::new(0.0, 3.0, 612.0, 791.0);
        let (lower, upper) = rect.bisect(SplitAxis::Horizontal).unwrap();

        assert_eq!(lower.height + upper.height, rect.height);
        assert_eq!(upper.y, lower.y + lower.height);
        assert_eq!(upper.y + upper.height, rect.y + rect.height);
    }

    #[test]
    fn test_bisect_is_pure() {
        let rect = Rect::new(5.5, 7.25, 33.0, 17.0);
        assert_eq!(
            rect.bisect(SplitAxis::Horizontal).unwrap(),
            rect.bisect(SplitAxis::Horizontal).unwrap()
        );
    }

    #[test]
    fn test_bisect_rejects_zero_extent_only_on_split_axis() {
        // Zero width does not matter when the height is halved
        assert!(Rect::new(0.0, 0.0, 0.0, 100.0).bisect(SplitAxis::Horizontal).is_ok());

        let result = Rect::new(0.0, 0.0, 100.0, 0.0).bisect(SplitAxis::Horizontal);
        assert!(matches!(result, Err(Error::InvalidGeometry { .. })));

        let result = Rect::new(0.0, 0.0, 0.0, 100.0).bisect(SplitAxis::Vertical);
        assert!(matches!(result, Err(Error::InvalidGeometry { .. })));

        let result = Rect::new(0.0, 0.0, 100.0, -5.0).bisect(SplitAxis::Horizontal);
        assert!(matches!(result, Err(Error::InvalidGeometry { .. })));

        let result = Rect::new(0.0, 0.0, -5.0, 100.0).bisect(SplitAxis::Vertical);
        assert!(matches!(result, Err(Error::InvalidGeometry { .. })));
    }

    #[test]
    fn test_bisect_rejects_non_finite() {
        let result = Rect::new(0.0, 0.0, 100.0, f64::NAN).bisect(SplitAxis::Horizontal);
        assert!(matches!(result, Err(Error::InvalidGeometry { .. })));
    }

    #[test]
    fn test_from_corners_normalizes_order() {
        let rect = Rect::from_corners(612.0, 792.0, 0.0, 0.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 612.0, 792.0));
        assert_eq!(rect.corners(), [0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(Error::InvalidRotation(degrees)) if degrees == 45.0
        ));
    }

    #[test]
    fn test_rotation_turned_wraps() {
        assert_eq!(Rotation::Deg0.turned(1), Rotation::Deg90);
        assert_eq!(Rotation::Deg180.turned(1), Rotation::Deg270);
        assert_eq!(Rotation::Deg270.turned(1), Rotation::Deg0);
        assert_eq!(Rotation::Deg90.turned(0), Rotation::Deg90);
    }
}
