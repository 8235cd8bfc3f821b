mod compose;
mod config;
mod layout;

use image::{DynamicImage, RgbImage};
use log::debug;

pub use compose::{
    grid::{compose_grid, prepare_photo},
    mixed::{compose_mixed, mixed_layout, MixedLayout, LARGE_PHOTO, MIXED_GAP, SMALL_PHOTO},
    raster::{crop_guides, draw_crop_guides, LineSegment, BACKGROUND, CROP_LINE_COLOR},
};
pub use config::{LayoutDirection, SheetConfig, SheetOverrides};
pub use layout::{
    geometry::{
        CanvasSpec, CenterBlock, LayoutMode, Orientation, PhotoRect, PhotoSpec, PlacementPlan,
        Position, SpacingSpec,
    },
    positions::generate_positions,
    solver::{solve_for_canvas, solve_layout, SolvedLayout, MAX_COLUMNS, MAX_ROWS},
};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("image operation failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid image input: {0}")]
    InvalidImageInput(String),
    #[error(
        "photo at ({x}, {y}) sized {width}x{height} does not fit a \
         {canvas_width}x{canvas_height} canvas"
    )]
    InvalidPlacement {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },
    #[error("photo does not fit the sheet ({columns} columns, {rows} rows)")]
    DegenerateLayout { columns: u32, rows: u32 },
}

/// Solved layout together with the rendered sheet.
#[derive(Clone, Debug)]
pub struct SheetOutput {
    pub sheet: RgbImage,
    pub layout: SolvedLayout,
    pub plan: PlacementPlan,
}

/// Runs the solve, place and composite steps for one configuration.
#[derive(Clone, Debug, Default)]
pub struct SheetRenderer {
    config: SheetConfig,
}

impl SheetRenderer {
    pub fn new(config: SheetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Solves the grid and computes photo positions without touching pixels.
    pub fn plan(&self) -> (SolvedLayout, PlacementPlan) {
        let config = &self.config;
        let layout =
            solve_for_canvas(config.cell, config.spacing, config.canvas, config.direction.forced());
        let plan = generate_positions(&layout, config.canvas, config.spacing, config.cell);
        (layout, plan)
    }

    /// Tiles `photo` over a sheet.
    ///
    /// Unlike the lower level steps, a layout that places no photo at all is
    /// reported as [`SheetError::DegenerateLayout`].
    pub fn render(&self, photo: &DynamicImage) -> Result<SheetOutput, SheetError> {
        let config = &self.config;
        let (layout, plan) = self.plan();
        if layout.mode.is_degenerate() {
            return Err(SheetError::DegenerateLayout {
                columns: layout.mode.columns,
                rows: layout.mode.rows,
            });
        }

        debug!(
            "rendering {}x{} grid ({:?}) on {}x{} sheet",
            layout.mode.columns,
            layout.mode.rows,
            layout.mode.orientation,
            config.canvas.width,
            config.canvas.height
        );

        let sheet = compose_grid(photo, &plan, config.cell, config.canvas, config.crop_line)?;
        Ok(SheetOutput { sheet, layout, plan })
    }

    /// Renders the fixed four one-inch plus two two-inch sheet.
    ///
    /// Only the canvas size and crop guide settings apply.
    pub fn render_mixed(
        &self,
        small: &DynamicImage,
        large: &DynamicImage,
    ) -> Result<RgbImage, SheetError> {
        compose_mixed(small, large, self.config.canvas, self.config.crop_line)
    }
}
