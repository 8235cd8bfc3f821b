//! Fixed sheet with four one-inch photos and two two-inch photos.
//!
//! The one-inch photos form a 2x2 block on the left. The two-inch photos are
//! too tall to stack upright (`2 * 626 + 30` exceeds the sheet height), so
//! they are turned a quarter counter-clockwise and stacked on the right.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use log::debug;

use super::raster;
use crate::layout::geometry::{CanvasSpec, PhotoRect, PhotoSpec, Position};
use crate::SheetError;

/// One-inch photo size.
pub const SMALL_PHOTO: PhotoSpec = PhotoSpec::new(295, 413);
/// Two-inch photo size, before the quarter turn.
pub const LARGE_PHOTO: PhotoSpec = PhotoSpec::new(413, 626);
pub const MIXED_GAP: u32 = 30;

/// Placement boxes of the mixed sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixedLayout {
    /// Row-major 2x2 block of small photos.
    pub small: [PhotoRect; 4],
    /// Top and bottom rotated large photos.
    pub large: [PhotoRect; 2],
}

impl MixedLayout {
    pub fn rects(&self) -> impl Iterator<Item = PhotoRect> + '_ {
        self.small.iter().chain(self.large.iter()).copied()
    }
}

/// Computes the mixed sheet placement for already rotated large photos.
///
/// The whole composite is centered on `canvas`; one that does not fit is an
/// [`SheetError::InvalidPlacement`].
pub fn mixed_layout(
    canvas: CanvasSpec,
    gap: u32,
    small: PhotoSpec,
    rotated_large: PhotoSpec,
) -> Result<MixedLayout, SheetError> {
    let left_width = small.width * 2 + gap;
    let left_height = small.height * 2 + gap;
    let right_width = rotated_large.width;
    let right_height = rotated_large.height * 2 + gap;

    let total_width = left_width + gap + right_width;
    let total_height = left_height.max(right_height);

    let (Some(slack_x), Some(slack_y)) =
        (canvas.width.checked_sub(total_width), canvas.height.checked_sub(total_height))
    else {
        return Err(SheetError::InvalidPlacement {
            x: 0,
            y: 0,
            width: total_width,
            height: total_height,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        });
    };
    let start_x = slack_x / 2;
    let start_y = slack_y / 2;

    let small_at = |row: u32, column: u32| {
        let position = Position {
            x: start_x + column * (small.width + gap),
            y: start_y + row * (small.height + gap),
        };
        PhotoRect::new(position, small)
    };

    let right_x = start_x + left_width + gap;
    let large_at = |index: u32| {
        let position = Position { x: right_x, y: start_y + index * (rotated_large.height + gap) };
        PhotoRect::new(position, rotated_large)
    };

    Ok(MixedLayout {
        small: [small_at(0, 0), small_at(0, 1), small_at(1, 0), small_at(1, 1)],
        large: [large_at(0), large_at(1)],
    })
}

/// Renders four copies of `small` and two rotated copies of `large` on one sheet.
///
/// Each input is resized to its canonical size unless it already matches.
pub fn compose_mixed(
    small: &DynamicImage,
    large: &DynamicImage,
    canvas: CanvasSpec,
    crop_line: bool,
) -> Result<RgbImage, SheetError> {
    let small = fit_canonical(small, SMALL_PHOTO)?;
    let large = fit_canonical(large, LARGE_PHOTO)?;
    let rotated = imageops::rotate270(&large);

    let small_size = PhotoSpec::new(small.width(), small.height());
    let rotated_size = PhotoSpec::new(rotated.width(), rotated.height());
    let layout = mixed_layout(canvas, MIXED_GAP, small_size, rotated_size)?;

    let mut sheet = raster::white_canvas(canvas);
    for rect in &layout.small {
        raster::stamp(&mut sheet, &small, Position { x: rect.x, y: rect.y })?;
    }
    for rect in &layout.large {
        raster::stamp(&mut sheet, &rotated, Position { x: rect.x, y: rect.y })?;
    }

    if crop_line {
        let segments = raster::draw_crop_guides(&mut sheet, layout.rects());
        debug!("drew {segments} crop guide segments on mixed sheet");
    }

    Ok(sheet)
}

fn fit_canonical(photo: &DynamicImage, size: PhotoSpec) -> Result<RgbImage, SheetError> {
    if photo.width() == 0 || photo.height() == 0 {
        return Err(SheetError::InvalidImageInput(format!(
            "source photo has empty dimensions {}x{}",
            photo.width(),
            photo.height()
        )));
    }

    let rgb = photo.to_rgb8();
    if rgb.dimensions() == (size.width, size.height) {
        return Ok(rgb);
    }

    debug!("resizing {}x{} photo to {}x{}", rgb.width(), rgb.height(), size.width, size.height);
    Ok(imageops::resize(&rgb, size.width, size.height, FilterType::Triangle))
}
