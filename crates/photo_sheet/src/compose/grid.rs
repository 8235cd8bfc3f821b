use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use log::{debug, warn};

use super::raster;
use crate::layout::geometry::{CanvasSpec, Orientation, PhotoSpec, PlacementPlan};
use crate::SheetError;

/// Tiles copies of `photo` on a white sheet at every position of `plan`.
///
/// `target` is the unrotated cell size the photo is resized to. Only a height
/// mismatch triggers the resize, so a photo that already has the target height
/// but a different width is passed through and then rejected because it no
/// longer matches the plan cell.
pub fn compose_grid(
    photo: &DynamicImage,
    plan: &PlacementPlan,
    target: PhotoSpec,
    canvas: CanvasSpec,
    crop_line: bool,
) -> Result<RgbImage, SheetError> {
    let prepared = prepare_photo(photo, target, plan.orientation)?;

    let placed = PhotoSpec::new(prepared.width(), prepared.height());
    if placed != plan.cell {
        return Err(SheetError::InvalidImageInput(format!(
            "prepared photo is {}x{} but the layout cell is {}x{}",
            placed.width, placed.height, plan.cell.width, plan.cell.height
        )));
    }

    let mut sheet = raster::white_canvas(canvas);
    for &position in &plan.positions {
        raster::stamp(&mut sheet, &prepared, position)?;
    }

    if crop_line {
        let segments = raster::draw_crop_guides(&mut sheet, plan.rects());
        debug!("drew {segments} crop guide segments");
    }

    debug!(
        "composed {} photos of {}x{} on {}x{} sheet",
        plan.len(),
        placed.width,
        placed.height,
        canvas.width,
        canvas.height
    );

    Ok(sheet)
}

/// Resizes and orients the source photo into the form that gets stamped.
pub fn prepare_photo(
    photo: &DynamicImage,
    target: PhotoSpec,
    orientation: Orientation,
) -> Result<RgbImage, SheetError> {
    if photo.width() == 0 || photo.height() == 0 {
        return Err(SheetError::InvalidImageInput(format!(
            "source photo has empty dimensions {}x{}",
            photo.width(),
            photo.height()
        )));
    }
    if target.is_empty() {
        return Err(SheetError::InvalidImageInput(format!(
            "target cell has empty dimensions {}x{}",
            target.width, target.height
        )));
    }

    let mut rgb = photo.to_rgb8();
    if rgb.height() != target.height {
        rgb = imageops::resize(&rgb, target.width, target.height, FilterType::Triangle);
    } else if rgb.width() != target.width {
        warn!(
            "photo width {} differs from target width {} at matching height, not resizing",
            rgb.width(),
            target.width
        );
    }

    Ok(match orientation {
        Orientation::Unrotated => rgb,
        Orientation::Rotated => raster::rotate_for_layout(&rgb),
    })
}
