use serde::Deserialize;

use crate::layout::geometry::{CanvasSpec, Orientation, PhotoSpec, SpacingSpec};

/// How the grid orientation is picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Whichever orientation holds more photos, unrotated on ties.
    #[default]
    Auto,
    /// Always tile the photo as given.
    Horizontal,
    /// Always tile the photo turned a quarter.
    Vertical,
}

impl LayoutDirection {
    pub fn forced(self) -> Option<Orientation> {
        match self {
            LayoutDirection::Auto => None,
            LayoutDirection::Horizontal => Some(Orientation::Unrotated),
            LayoutDirection::Vertical => Some(Orientation::Rotated),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SheetConfig {
    pub canvas: CanvasSpec,
    pub spacing: SpacingSpec,
    /// Size every photo copy is resized to before layout rotation.
    pub cell: PhotoSpec,
    pub direction: LayoutDirection,
    pub crop_line: bool,
}

/// Partial settings, as read from a config file or the command line.
///
/// Only these keys are recognized; unknown keys are rejected when parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetOverrides {
    pub layout_direction: Option<LayoutDirection>,
    pub crop_line: Option<bool>,
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
}

impl SheetOverrides {
    /// Layers `other` on top of `self`, keeping values `other` leaves unset.
    pub fn merge(self, other: SheetOverrides) -> SheetOverrides {
        SheetOverrides {
            layout_direction: other.layout_direction.or(self.layout_direction),
            crop_line: other.crop_line.or(self.crop_line),
            canvas_width: other.canvas_width.or(self.canvas_width),
            canvas_height: other.canvas_height.or(self.canvas_height),
            cell_width: other.cell_width.or(self.cell_width),
            cell_height: other.cell_height.or(self.cell_height),
        }
    }

    pub fn apply(&self, config: &mut SheetConfig) {
        if let Some(direction) = self.layout_direction {
            config.direction = direction;
        }
        if let Some(crop_line) = self.crop_line {
            config.crop_line = crop_line;
        }
        if let Some(width) = self.canvas_width {
            config.canvas.width = width;
        }
        if let Some(height) = self.canvas_height {
            config.canvas.height = height;
        }
        if let Some(width) = self.cell_width {
            config.cell.width = width;
        }
        if let Some(height) = self.cell_height {
            config.cell.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_six_inch_sheet() {
        let config = SheetConfig::default();
        assert_eq!(config.canvas, CanvasSpec::new(1795, 1205));
        assert_eq!(config.cell, PhotoSpec::new(295, 413));
        assert_eq!(config.spacing, SpacingSpec::default());
        assert_eq!(config.direction, LayoutDirection::Auto);
        assert!(!config.crop_line);
    }

    #[test]
    fn direction_maps_to_forced_orientation() {
        assert_eq!(LayoutDirection::Auto.forced(), None);
        assert_eq!(LayoutDirection::Horizontal.forced(), Some(Orientation::Unrotated));
        assert_eq!(LayoutDirection::Vertical.forced(), Some(Orientation::Rotated));
    }

    #[test]
    fn later_overrides_win() {
        let file = SheetOverrides {
            crop_line: Some(true),
            canvas_width: Some(1000),
            ..SheetOverrides::default()
        };
        let flags = SheetOverrides { canvas_width: Some(1200), ..SheetOverrides::default() };

        let mut config = SheetConfig::default();
        file.merge(flags).apply(&mut config);
        assert!(config.crop_line);
        assert_eq!(config.canvas, CanvasSpec::new(1200, 1205));
        assert_eq!(config.cell, PhotoSpec::default());
    }
}
