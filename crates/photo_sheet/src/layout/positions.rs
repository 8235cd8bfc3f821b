use super::geometry::{CanvasSpec, PhotoSpec, PlacementPlan, Position, SpacingSpec};
use super::solver::SolvedLayout;

/// Lays out the solved grid centered on `canvas`.
///
/// Positions are emitted row-major: the row index varies slowest. `photo` is the
/// unrotated photo size; the plan's cell is swapped when the layout is rotated.
pub fn generate_positions(
    solved: &SolvedLayout,
    canvas: CanvasSpec,
    spacing: SpacingSpec,
    photo: PhotoSpec,
) -> PlacementPlan {
    let mode = solved.mode;
    let cell = mode.orientation.apply(photo);
    if mode.is_degenerate() {
        return PlacementPlan { positions: Vec::new(), orientation: mode.orientation, cell };
    }

    // Only a degenerate block can be wider than the canvas, and it places nothing.
    let anchor_x = canvas.width.saturating_sub(solved.block.width) / 2;
    let anchor_y = canvas.height.saturating_sub(solved.block.height) / 2;

    // A lone column or row never steps, so the gap may be arbitrarily large there.
    let step_x = cell.width.saturating_add(spacing.gap_horizontal);
    let step_y = cell.height.saturating_add(spacing.gap_vertical);

    let mut positions = Vec::with_capacity(mode.capacity() as usize);
    for row in 0..mode.rows {
        for column in 0..mode.columns {
            positions.push(Position { x: anchor_x + column * step_x, y: anchor_y + row * step_y });
        }
    }

    PlacementPlan { positions, orientation: mode.orientation, cell }
}
