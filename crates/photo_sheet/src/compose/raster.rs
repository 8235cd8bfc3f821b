use image::{imageops, GenericImage, ImageBuffer, Rgb, RgbImage};

use crate::layout::geometry::{CanvasSpec, PhotoRect, PhotoSpec, Position};
use crate::SheetError;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
/// Light gray used for crop guides.
pub const CROP_LINE_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

/// Axis-aligned segment with inclusive endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl LineSegment {
    fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        Self { start, end }
    }
}

pub fn white_canvas(canvas: CanvasSpec) -> RgbImage {
    RgbImage::from_pixel(canvas.width, canvas.height, BACKGROUND)
}

/// Reflects the image over its main diagonal.
pub fn transpose(image: &RgbImage) -> RgbImage {
    ImageBuffer::from_fn(image.height(), image.width(), |x, y| *image.get_pixel(y, x))
}

/// Turns a photo into its rotated layout form: transpose, then mirror vertically.
pub fn rotate_for_layout(image: &RgbImage) -> RgbImage {
    imageops::flip_vertical(&transpose(image))
}

/// Copies `photo` onto `canvas` with its top-left corner at `position`.
///
/// The whole rectangle must lie inside the canvas; nothing is clipped.
pub fn stamp(
    canvas: &mut RgbImage,
    photo: &RgbImage,
    position: Position,
) -> Result<(), SheetError> {
    let size = PhotoSpec::new(photo.width(), photo.height());
    let rect = PhotoRect::new(position, size);
    let bounds = CanvasSpec::new(canvas.width(), canvas.height());
    if !rect.fits_within(bounds) {
        return Err(SheetError::InvalidPlacement {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            canvas_width: bounds.width,
            canvas_height: bounds.height,
        });
    }

    canvas.copy_from(photo, position.x, position.y)?;
    Ok(())
}

/// Left, right, top and bottom edges of a placement box.
///
/// The right and bottom edges sit one pixel past the photo, in the gap.
pub fn crop_guides(rect: PhotoRect) -> [LineSegment; 4] {
    let left = rect.x;
    let top = rect.y;
    let right = rect.x.saturating_add(rect.width);
    let bottom = rect.y.saturating_add(rect.height);

    [
        LineSegment::new((left, top), (left, bottom)),
        LineSegment::new((right, top), (right, bottom)),
        LineSegment::new((left, top), (right, top)),
        LineSegment::new((left, bottom), (right, bottom)),
    ]
}

/// Draws a 1-pixel segment, silently skipping pixels outside the canvas.
pub fn draw_segment(canvas: &mut RgbImage, segment: LineSegment, color: Rgb<u8>) {
    debug_assert!(
        segment.start.0 == segment.end.0 || segment.start.1 == segment.end.1,
        "only axis-aligned segments are supported"
    );

    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }

    let (x0, x1) = ordered(segment.start.0, segment.end.0);
    let (y0, y1) = ordered(segment.start.1, segment.end.1);
    let x1 = x1.min(canvas.width() - 1);
    let y1 = y1.min(canvas.height() - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Outlines every rectangle and returns the number of segments drawn.
pub fn draw_crop_guides<I>(canvas: &mut RgbImage, rects: I) -> usize
where
    I: IntoIterator<Item = PhotoRect>,
{
    let mut drawn = 0;
    for rect in rects {
        for segment in crop_guides(rect) {
            draw_segment(canvas, segment, CROP_LINE_COLOR);
            drawn += 1;
        }
    }
    drawn
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn transpose_swaps_axes() {
        let image = gradient(3, 2);
        let transposed = transpose(&image);
        assert_eq!(transposed.dimensions(), (2, 3));
        assert_eq!(transposed.get_pixel(1, 2), &Rgb([2, 1, 0]));
    }

    #[test]
    fn layout_rotation_is_counter_clockwise_quarter_turn() {
        let image = gradient(4, 3);
        assert_eq!(rotate_for_layout(&image), imageops::rotate270(&image));
    }

    #[test]
    fn stamp_copies_pixels_at_position() {
        let mut canvas = white_canvas(CanvasSpec::new(10, 10));
        let photo = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
        stamp(&mut canvas, &photo, Position { x: 7, y: 8 }).unwrap();
        assert_eq!(canvas.get_pixel(7, 8), &Rgb([1, 2, 3]));
        assert_eq!(canvas.get_pixel(9, 9), &Rgb([1, 2, 3]));
        assert_eq!(canvas.get_pixel(6, 8), &BACKGROUND);
    }

    #[test]
    fn stamp_rejects_rect_past_canvas_edge() {
        let mut canvas = white_canvas(CanvasSpec::new(10, 10));
        let photo = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
        let err = stamp(&mut canvas, &photo, Position { x: 8, y: 0 }).unwrap_err();
        assert!(matches!(
            err,
            SheetError::InvalidPlacement { x: 8, y: 0, width: 3, height: 2, canvas_width: 10, .. }
        ));
        assert!(canvas.pixels().all(|pixel| *pixel == BACKGROUND));
    }

    #[test]
    fn crop_guides_outline_rect_inclusively() {
        let mut canvas = white_canvas(CanvasSpec::new(8, 8));
        let rect = PhotoRect { x: 1, y: 2, width: 3, height: 2 };
        assert_eq!(draw_crop_guides(&mut canvas, [rect]), 4);

        for (x, y) in [(1, 2), (4, 2), (1, 4), (4, 4), (2, 2), (1, 3), (4, 3), (3, 4)] {
            assert_eq!(canvas.get_pixel(x, y), &CROP_LINE_COLOR, "({x}, {y})");
        }
        assert_eq!(canvas.get_pixel(2, 3), &BACKGROUND);
        assert_eq!(canvas.get_pixel(5, 2), &BACKGROUND);
    }

    #[test]
    fn segments_past_canvas_edge_are_clipped() {
        let mut canvas = white_canvas(CanvasSpec::new(4, 4));
        let rect = PhotoRect { x: 2, y: 2, width: 2, height: 2 };
        draw_crop_guides(&mut canvas, [rect]);
        assert_eq!(canvas.get_pixel(3, 2), &CROP_LINE_COLOR);
        assert_eq!(canvas.get_pixel(2, 3), &CROP_LINE_COLOR);
        assert_eq!(canvas.get_pixel(3, 3), &BACKGROUND);
    }
}
