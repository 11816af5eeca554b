//! Render a matrix into a drawable scene
//!
//! The scene is a flat list of positioned labels and cells with their colors
//! and text already decided. Nothing in here knows about SVG, HTML or any
//! event system: writers in [`crate::report`] turn a scene into markup, and
//! [`super::interaction`] drives hover and click behaviour over it.
//!
//! The whole scene is rebuilt whenever the selection changes. It is never
//! patched in place.

use super::layout::{
    GridLayout, Margin, CELL_TEXT_FONT_SIZE, COLUMN_LABEL_ANGLE, COLUMN_LABEL_FONT_SIZE,
    EXPERIENCE_LABEL_FONT_SIZE, ROW_LABEL_FONT_SIZE,
};
use crate::candidate::CandidateId;
use crate::color::{self, Band, Color};
use crate::matrix::{CellValue, Matrix, Row, RowKind};
use serde::Serialize;

/// Placeholder shown instead of a grid when nothing is selected.
pub const EMPTY_MESSAGE: &str = "No candidates selected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn css(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Skill name on the left of a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowLabel {
    pub text: String,
    pub kind: RowKind,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub weight: FontWeight,
}

/// Rotated candidate initials above a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnLabel {
    pub candidate: CandidateId,
    pub name: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Degrees, applied around `(x, y)`.
    pub rotation: f64,
    pub font_size: f64,
    /// Tooltip shown while hovered.
    pub tooltip: String,
}

/// One rectangle of the grid plus its value text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub row: usize,
    pub column: usize,
    pub candidate: CandidateId,
    pub skill: String,
    pub kind: RowKind,
    /// Top-left of the cell slot, plot coordinates.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    /// `None` for Experience cells, which are not banded.
    pub band: Option<Band>,
    pub text: String,
    /// Text anchor relative to `(x, y)`.
    pub text_x: f64,
    pub text_y: f64,
    pub text_color: Color,
    pub font_size: f64,
    /// Experience values are always shown; skill values only on hover.
    pub text_always_visible: bool,
    pub tooltip: String,
}

/// A fully laid-out grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridScene {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub row_labels: Vec<RowLabel>,
    pub column_labels: Vec<ColumnLabel>,
    pub cells: Vec<CellView>,
}

impl GridScene {
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellView> {
        let columns = self.column_labels.len();
        if column >= columns {
            return None;
        }
        self.cells.get(row * columns + column)
    }

    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn columns(&self) -> usize {
        self.column_labels.len()
    }
}

/// What the comparison area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Empty { message: String },
    Grid(GridScene),
}

impl View {
    pub fn scene(&self) -> Option<&GridScene> {
        match self {
            View::Grid(scene) => Some(scene),
            View::Empty { .. } => None,
        }
    }
}

/// Tooltip text for a candidate label.
pub fn label_tooltip(total: Option<&str>) -> String {
    format!("Total Score: {}", total.unwrap_or("0"))
}

/// Tooltip text for a cell.
pub fn cell_tooltip(row: &Row, value: &CellValue) -> String {
    match row.kind {
        RowKind::Experience => format!("{}: {}", row.skill, value.display()),
        RowKind::Skill => format!("Skill: {}\nScore: {}", row.skill, value.display()),
    }
}

/// Confirmation asked before a candidate is removed from the comparison.
pub fn removal_prompt(name: &str) -> String {
    format!("Remove {} from selected candidates?", name)
}

/// Lay out `matrix`, or the empty placeholder when it has no columns.
pub fn render(matrix: &Matrix) -> View {
    if matrix.is_empty() {
        return View::Empty {
            message: EMPTY_MESSAGE.to_string(),
        };
    }

    let labels: Vec<&str> = matrix.rows.iter().map(|row| row.skill.as_str()).collect();
    let layout = GridLayout::new(&labels, matrix.columns.len());

    let row_labels = matrix
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (x, y) = layout.row_label_anchor(i);
            let (font_size, weight) = match row.kind {
                RowKind::Experience => (EXPERIENCE_LABEL_FONT_SIZE, FontWeight::Bold),
                RowKind::Skill => (ROW_LABEL_FONT_SIZE, FontWeight::Normal),
            };
            RowLabel {
                text: row.skill.clone(),
                kind: row.kind,
                x,
                y,
                font_size,
                weight,
            }
        })
        .collect();

    let column_labels = matrix
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let (x, y) = layout.column_label_anchor(i);
            ColumnLabel {
                candidate: column.id.clone(),
                name: column.name.clone(),
                text: column.label.clone(),
                x,
                y,
                rotation: COLUMN_LABEL_ANGLE,
                font_size: COLUMN_LABEL_FONT_SIZE,
                tooltip: label_tooltip(matrix.totals.get(&column.id)),
            }
        })
        .collect();

    let (width, height) = layout.cell_rect_size();
    let (text_x, text_y) = layout.cell_text_anchor();
    let mut cells = Vec::with_capacity(matrix.rows.len() * matrix.columns.len());

    for (r, row) in matrix.rows.iter().enumerate() {
        for (c, column) in matrix.columns.iter().enumerate() {
            let value = row
                .get(&column.id)
                .cloned()
                .unwrap_or(CellValue::Score(0.0));
            let (x, y) = layout.cell_origin(r, c);

            let (fill, band, text_color) = match value.score() {
                Some(score) if row.kind == RowKind::Skill => (
                    color::color_for(score),
                    Some(Band::for_score(score)),
                    color::text_color_for(score),
                ),
                _ => (color::NEUTRAL_FILL, None, color::TEXT_DARK),
            };

            cells.push(CellView {
                row: r,
                column: c,
                candidate: column.id.clone(),
                skill: row.skill.clone(),
                kind: row.kind,
                x,
                y,
                width,
                height,
                fill,
                band,
                text: value.display(),
                text_x,
                text_y,
                text_color,
                font_size: CELL_TEXT_FONT_SIZE,
                text_always_visible: row.kind == RowKind::Experience,
                tooltip: cell_tooltip(row, &value),
            });
        }
    }

    tracing::debug!(
        rows = matrix.rows.len(),
        columns = matrix.columns.len(),
        width = layout.width(),
        height = layout.height(),
        "laid out comparison grid"
    );

    View::Grid(GridScene {
        width: layout.width(),
        height: layout.height(),
        margin: layout.margin,
        row_labels,
        column_labels,
        cells,
    })
}
