use log::debug;

use super::geometry::{CanvasSpec, CenterBlock, LayoutMode, Orientation, PhotoSpec, SpacingSpec};

/// Most photo rows a sheet is ever tiled with.
pub const MAX_ROWS: u32 = 3;
/// Most photo columns a sheet is ever tiled with.
pub const MAX_COLUMNS: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolvedLayout {
    pub mode: LayoutMode,
    pub block: CenterBlock,
}

/// Picks grid dimensions and orientation for `photo` inside a `limit` sized block.
///
/// `forced` pins the orientation; with `None` the rotated grid wins only when it
/// holds strictly more photos, so ties stay unrotated. Photos that do not fit
/// even once along an axis yield a count of 0 there, and the result is returned
/// as-is.
pub fn solve_layout(
    photo: PhotoSpec,
    spacing: SpacingSpec,
    limit: (u32, u32),
    forced: Option<Orientation>,
) -> SolvedLayout {
    let unrotated = fit_orientation(photo, spacing, limit, Orientation::Unrotated);
    let rotated = fit_orientation(photo, spacing, limit, Orientation::Rotated);

    let solved = match forced {
        Some(Orientation::Unrotated) => unrotated,
        Some(Orientation::Rotated) => rotated,
        None if rotated.mode.capacity() > unrotated.mode.capacity() => rotated,
        None => unrotated,
    };

    debug!(
        "layout for {}x{} in {}x{}: unrotated {}, rotated {}, picked {:?} {}x{}",
        photo.width,
        photo.height,
        limit.0,
        limit.1,
        unrotated.mode.capacity(),
        rotated.mode.capacity(),
        solved.mode.orientation,
        solved.mode.columns,
        solved.mode.rows,
    );

    solved
}

/// Solves against the usable block left on `canvas` once the margins are removed.
pub fn solve_for_canvas(
    photo: PhotoSpec,
    spacing: SpacingSpec,
    canvas: CanvasSpec,
    forced: Option<Orientation>,
) -> SolvedLayout {
    solve_layout(photo, spacing, spacing.usable_block(canvas), forced)
}

fn fit_orientation(
    photo: PhotoSpec,
    spacing: SpacingSpec,
    limit: (u32, u32),
    orientation: Orientation,
) -> SolvedLayout {
    let cell = orientation.apply(photo);
    let (columns, width) = fit_axis(cell.width, spacing.gap_horizontal, limit.0, MAX_COLUMNS);
    let (rows, height) = fit_axis(cell.height, spacing.gap_vertical, limit.1, MAX_ROWS);

    SolvedLayout {
        mode: LayoutMode { columns, rows, orientation },
        block: CenterBlock { width, height },
    }
}

/// Grows the photo count along one axis while the run stays strictly below `limit`.
///
/// Returns the accepted count and the extent it spans. The extent falls back to
/// `size` when not even one photo fits.
fn fit_axis(size: u32, gap: u32, limit: u32, cap: u32) -> (u32, u32) {
    let mut count = 0;
    let mut extent = size;

    for candidate in 1..=cap {
        let span =
            u64::from(size) * u64::from(candidate) + u64::from(gap) * u64::from(candidate - 1);
        if span >= u64::from(limit) {
            break;
        }

        count = candidate;
        extent = span as u32;
    }

    (count, extent)
}
