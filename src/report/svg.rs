//! Static SVG rendering of a grid scene
//!
//! The SVG stands on its own: skill values are hidden and revealed on hover by
//! an embedded stylesheet, Experience values are always shown. Every label and
//! cell carries `data-*` attributes (column, candidate, tooltip text) so the
//! HTML page can bind its event handlers without recomputing anything.

use super::xml_escape;
use crate::grid::{CellView, ColumnLabel, GridScene, RowLabel, View};
use std::io::{self, Write};

const STYLE: &str = ".skillgrid .value { opacity: 0; pointer-events: none; }
.skillgrid .value.always, .skillgrid .cell:hover .value { opacity: 1; }
.skillgrid .candidate-label { cursor: pointer; }";

pub fn write<W: Write>(writer: &mut W, view: &View) -> io::Result<()> {
    match view {
        View::Empty { message } => write_empty(writer, message),
        View::Grid(scene) => write_scene(writer, scene),
    }
}

/// Render `view` to a string.
pub fn to_string(view: &View) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write(&mut buf, view);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_empty<W: Write>(writer: &mut W, message: &str) -> io::Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="skillgrid empty" width="400" height="40" viewBox="0 0 400 40">"#
    )?;
    writeln!(
        writer,
        r##"  <text x="0" y="24" font-size="16" fill="#555">{}</text>"##,
        xml_escape(message)
    )?;
    writeln!(writer, "</svg>")
}

fn write_scene<W: Write>(writer: &mut W, scene: &GridScene) -> io::Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="skillgrid" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = scene.width,
        h = scene.height
    )?;
    writeln!(writer, "  <style>{}</style>", STYLE)?;
    writeln!(
        writer,
        r#"  <g transform="translate({},{})">"#,
        scene.margin.left, scene.margin.top
    )?;

    writeln!(writer, r#"    <g class="row-labels">"#)?;
    for label in &scene.row_labels {
        write_row_label(writer, label)?;
    }
    writeln!(writer, "    </g>")?;

    writeln!(writer, r#"    <g class="column-labels">"#)?;
    for (i, label) in scene.column_labels.iter().enumerate() {
        write_column_label(writer, i, label)?;
    }
    writeln!(writer, "    </g>")?;

    writeln!(writer, r#"    <g class="cells">"#)?;
    for cell in &scene.cells {
        write_cell(writer, cell)?;
    }
    writeln!(writer, "    </g>")?;

    writeln!(writer, "  </g>")?;
    writeln!(writer, "</svg>")
}

fn write_row_label<W: Write>(writer: &mut W, label: &RowLabel) -> io::Result<()> {
    writeln!(
        writer,
        r#"      <text class="row-label" x="{}" y="{}" font-size="{}" font-weight="{}" dominant-baseline="middle">{}</text>"#,
        label.x,
        label.y,
        label.font_size,
        label.weight.css(),
        xml_escape(&label.text)
    )
}

fn write_column_label<W: Write>(writer: &mut W, column: usize, label: &ColumnLabel) -> io::Result<()> {
    writeln!(
        writer,
        r#"      <text class="candidate-label" data-column="{col}" data-candidate="{id}" data-name="{name}" data-tooltip="{tip}" x="{x}" y="{y}" transform="rotate({rot} {x} {y})" font-size="{size}" font-weight="bold">{text}</text>"#,
        col = column,
        id = xml_escape(label.candidate.as_str()),
        name = xml_escape(&label.name),
        tip = xml_escape(&label.tooltip),
        x = label.x,
        y = label.y,
        rot = label.rotation,
        size = label.font_size,
        text = xml_escape(&label.text)
    )
}

fn write_cell<W: Write>(writer: &mut W, cell: &CellView) -> io::Result<()> {
    writeln!(
        writer,
        r#"      <g class="cell" data-row="{}" data-column="{}" data-candidate="{}" data-tooltip="{}" transform="translate({},{})">"#,
        cell.row,
        cell.column,
        xml_escape(cell.candidate.as_str()),
        xml_escape(&cell.tooltip),
        cell.x,
        cell.y
    )?;
    writeln!(
        writer,
        r#"        <rect width="{}" height="{}" fill="{}"/>"#,
        cell.width, cell.height, cell.fill
    )?;
    writeln!(
        writer,
        r#"        <text class="{}" x="{}" y="{}" fill="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        if cell.text_always_visible { "value always" } else { "value" },
        cell.text_x,
        cell.text_y,
        cell.text_color,
        cell.font_size,
        xml_escape(&cell.text)
    )?;
    writeln!(writer, "      </g>")
}
