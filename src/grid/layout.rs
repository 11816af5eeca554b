//! Grid geometry
//!
//! All coordinates are in pixels. Cells and labels are positioned in *plot*
//! coordinates, whose origin is the top-left corner of the first cell; the
//! plot is shifted by `(margin.left, margin.top)` inside the canvas.
//!
//! ```text
//!  ┌──────────────────────── canvas ────────────────────────┐
//!  │            margin.top (rotated candidate labels)       │
//!  │  skill labels   ┌────┬────┬────┐                       │
//!  │  (margin.left)  │cell│cell│cell│  margin.right         │
//!  │                 ├────┼────┼────┤                       │
//!  │                 └────┴────┴────┘                       │
//!  │            margin.bottom                               │
//!  └────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

pub const CELL_WIDTH: f64 = 50.0;
pub const CELL_HEIGHT: f64 = 35.0;
/// Gap left between neighbouring cell rectangles.
pub const CELL_INSET: f64 = 4.0;

pub const MARGIN_TOP: f64 = 60.0;
pub const MARGIN_RIGHT: f64 = 50.0;
pub const MARGIN_BOTTOM: f64 = 50.0;
/// Narrowest left margin; widened when a skill label would not fit.
pub const MIN_MARGIN_LEFT: f64 = 290.0;

/// Rough advance width of one character of a 16 px row label.
pub const LABEL_CHAR_WIDTH: f64 = 9.0;
/// Space kept between the longest row label and the first column.
pub const LABEL_GUTTER: f64 = 20.0;

/// Baseline of the candidate labels above the plot.
pub const COLUMN_LABEL_Y: f64 = -20.0;
/// Tilt of the candidate labels, degrees (negative is counter-clockwise).
pub const COLUMN_LABEL_ANGLE: f64 = -45.0;

pub const ROW_LABEL_FONT_SIZE: f64 = 16.0;
pub const EXPERIENCE_LABEL_FONT_SIZE: f64 = 17.0;
pub const COLUMN_LABEL_FONT_SIZE: f64 = 12.0;
pub const CELL_TEXT_FONT_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Geometry of a grid with `rows × columns` cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLayout {
    pub margin: Margin,
    pub rows: usize,
    pub columns: usize,
}

impl GridLayout {
    /// Lay out a grid whose row labels are `labels`.
    pub fn new<S: AsRef<str>>(labels: &[S], columns: usize) -> Self {
        let longest = labels
            .iter()
            .map(|label| label.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        Self {
            margin: Margin {
                top: MARGIN_TOP,
                right: MARGIN_RIGHT,
                bottom: MARGIN_BOTTOM,
                left: left_margin_for(longest),
            },
            rows: labels.len(),
            columns,
        }
    }

    pub fn width(&self) -> f64 {
        CELL_WIDTH * self.columns as f64 + self.margin.left + self.margin.right
    }

    pub fn height(&self) -> f64 {
        CELL_HEIGHT * self.rows as f64 + self.margin.top + self.margin.bottom
    }

    /// Top-left corner of a cell, plot coordinates.
    pub fn cell_origin(&self, row: usize, column: usize) -> (f64, f64) {
        (column as f64 * CELL_WIDTH, row as f64 * CELL_HEIGHT)
    }

    /// Size of the drawn rectangle inside a cell slot.
    pub fn cell_rect_size(&self) -> (f64, f64) {
        (CELL_WIDTH - CELL_INSET, CELL_HEIGHT - CELL_INSET)
    }

    /// Anchor of the value text, relative to the cell origin.
    pub fn cell_text_anchor(&self) -> (f64, f64) {
        ((CELL_WIDTH - 2.0) / 2.0, (CELL_HEIGHT - 2.0) / 2.0)
    }

    /// Row label anchor: flush with the left canvas edge, vertically centered.
    pub fn row_label_anchor(&self, row: usize) -> (f64, f64) {
        (-self.margin.left, row as f64 * CELL_HEIGHT + CELL_HEIGHT / 2.0)
    }

    /// Candidate label anchor, centered over its column.
    pub fn column_label_anchor(&self, column: usize) -> (f64, f64) {
        (column as f64 * CELL_WIDTH + CELL_WIDTH / 2.0, COLUMN_LABEL_Y)
    }
}

fn left_margin_for(longest_label_chars: usize) -> f64 {
    let needed = longest_label_chars as f64 * LABEL_CHAR_WIDTH + LABEL_GUTTER;
    needed.max(MIN_MARGIN_LEFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size() {
        let layout = GridLayout::new(&["Experience", "SQL", "Go"], 4);
        assert_eq!(layout.width(), 50.0 * 4.0 + 290.0 + 50.0);
        assert_eq!(layout.height(), 35.0 * 3.0 + 60.0 + 50.0);
    }

    #[test]
    fn test_short_labels_keep_minimum_left_margin() {
        let layout = GridLayout::new(&["Experience"], 1);
        assert_eq!(layout.margin.left, MIN_MARGIN_LEFT);
    }

    #[test]
    fn test_long_label_widens_left_margin() {
        let long = "x".repeat(40);
        let layout = GridLayout::new(&[long.as_str()], 1);
        assert_eq!(layout.margin.left, 40.0 * LABEL_CHAR_WIDTH + LABEL_GUTTER);
        assert!(layout.margin.left > MIN_MARGIN_LEFT);
    }

    #[test]
    fn test_cell_geometry() {
        let layout = GridLayout::new(&["a", "b", "c"], 3);
        assert_eq!(layout.cell_origin(2, 1), (50.0, 70.0));
        assert_eq!(layout.cell_rect_size(), (46.0, 31.0));
        assert_eq!(layout.cell_text_anchor(), (24.0, 16.5));
    }

    #[test]
    fn test_label_anchors() {
        let layout = GridLayout::new(&["a", "b"], 2);
        assert_eq!(layout.row_label_anchor(1), (-290.0, 52.5));
        assert_eq!(layout.column_label_anchor(1), (75.0, -20.0));
    }

    #[test]
    fn test_empty_grid_is_margins_only() {
        let layout = GridLayout::new::<&str>(&[], 0);
        assert_eq!(layout.width(), 340.0);
        assert_eq!(layout.height(), 110.0);
    }
}
