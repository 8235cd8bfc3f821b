/// Print sheet dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
}

impl CanvasSpec {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSpec {
    /// Six-inch sheet at 300 dpi.
    fn default() -> Self {
        Self::new(1795, 1205)
    }
}

/// Size of a single photo copy before any layout rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhotoSpec {
    pub width: u32,
    pub height: u32,
}

impl PhotoSpec {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn transposed(self) -> Self {
        Self { width: self.height, height: self.width }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for PhotoSpec {
    /// One-inch ID photo.
    fn default() -> Self {
        Self::new(295, 413)
    }
}

/// Gaps between neighbouring photos and margins to the sheet edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacingSpec {
    pub gap_horizontal: u32,
    pub gap_vertical: u32,
    pub margin_horizontal: u32,
    pub margin_vertical: u32,
}

impl SpacingSpec {
    /// Region left for the photo block once both margins are removed on each axis.
    pub fn usable_block(&self, canvas: CanvasSpec) -> (u32, u32) {
        (
            canvas.width.saturating_sub(self.margin_horizontal.saturating_mul(2)),
            canvas.height.saturating_sub(self.margin_vertical.saturating_mul(2)),
        )
    }
}

impl Default for SpacingSpec {
    fn default() -> Self {
        Self { gap_horizontal: 30, gap_vertical: 30, margin_horizontal: 70, margin_vertical: 50 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Photos are tiled as given.
    Unrotated,
    /// Photo axes are swapped for tiling; pixels are transposed and mirrored vertically.
    Rotated,
}

impl Orientation {
    /// Photo dimensions as they occupy a grid cell in this orientation.
    pub fn apply(self, photo: PhotoSpec) -> PhotoSpec {
        match self {
            Orientation::Unrotated => photo,
            Orientation::Rotated => photo.transposed(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutMode {
    pub columns: u32,
    pub rows: u32,
    pub orientation: Orientation,
}

impl LayoutMode {
    pub fn capacity(&self) -> u32 {
        self.columns * self.rows
    }

    /// True when the photo does not fit even once along some axis.
    pub fn is_degenerate(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

/// Bounding box exactly enclosing the tiled grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CenterBlock {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// Placement box of one photo on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhotoRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PhotoRect {
    pub fn new(position: Position, size: PhotoSpec) -> Self {
        Self { x: position.x, y: position.y, width: size.width, height: size.height }
    }

    /// Whether the half-open pixel areas of both rectangles share a pixel.
    pub fn overlaps(&self, other: &PhotoRect) -> bool {
        let (left, top) = (u64::from(self.x), u64::from(self.y));
        let (other_left, other_top) = (u64::from(other.x), u64::from(other.y));
        left < other_left + u64::from(other.width)
            && other_left < left + u64::from(self.width)
            && top < other_top + u64::from(other.height)
            && other_top < top + u64::from(self.height)
    }

    pub fn fits_within(&self, canvas: CanvasSpec) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(canvas.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(canvas.height)
    }
}

/// Ordered photo positions together with the cell size they were computed for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementPlan {
    pub positions: Vec<Position>,
    pub orientation: Orientation,
    /// Per-photo size after the orientation swap.
    pub cell: PhotoSpec,
}

impl PlacementPlan {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = PhotoRect> + '_ {
        self.positions.iter().map(move |&position| PhotoRect::new(position, self.cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_block_removes_both_margins() {
        let spacing = SpacingSpec::default();
        assert_eq!(spacing.usable_block(CanvasSpec::default()), (1655, 1105));
    }

    #[test]
    fn usable_block_saturates_on_oversized_margins() {
        let spacing = SpacingSpec { margin_horizontal: 2000, ..SpacingSpec::default() };
        assert_eq!(spacing.usable_block(CanvasSpec::default()), (0, 1105));
    }

    #[test]
    fn rotated_orientation_swaps_cell_axes() {
        let photo = PhotoSpec::new(295, 413);
        assert_eq!(Orientation::Unrotated.apply(photo), photo);
        assert_eq!(Orientation::Rotated.apply(photo), PhotoSpec::new(413, 295));
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = PhotoRect { x: 0, y: 0, width: 10, height: 10 };
        let b = PhotoRect { x: 10, y: 0, width: 10, height: 10 };
        let c = PhotoRect { x: 9, y: 9, width: 10, height: 10 };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn rect_bounds_are_exclusive_of_the_far_edge() {
        let canvas = CanvasSpec::new(100, 50);
        assert!(PhotoRect { x: 90, y: 40, width: 10, height: 10 }.fits_within(canvas));
        assert!(!PhotoRect { x: 91, y: 40, width: 10, height: 10 }.fits_within(canvas));
        assert!(!PhotoRect { x: 0, y: u32::MAX, width: 1, height: 1 }.fits_within(canvas));
    }
}
