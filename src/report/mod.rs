//! Report generation for comparisons
//!
//! This module writes a built [`Matrix`] out in one of several formats:
//!
//! - **HTML**: self-contained page with the grid, hover tooltips and legend
//! - **SVG**: the grid alone, values revealed on hover by CSS
//! - **JSON**: matrix, summary and laid-out scene for programmatic consumption
//!
//! # Usage
//!
//! ```ignore
//! use skillgrid::report;
//!
//! // Automatically picks format based on extension
//! report::generate("compare.html", &matrix)?;  // HTML
//! report::generate("compare.svg", &matrix)?;   // SVG
//! report::generate("compare.json", &matrix)?;  // JSON
//! ```

pub mod html;
pub mod json;
pub mod svg;

use crate::candidate::CandidateId;
use crate::matrix::Matrix;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, matrix: &Matrix) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "html" | "htm" => html::write(&mut file, matrix, &html::PageOptions::default()),
        "svg" => svg::write(&mut file, &crate::grid::render(matrix)),
        _ => json::write(&mut file, matrix),
    }?;

    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Candidate with the highest matrix total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader {
    pub id: CandidateId,
    pub name: String,
    pub total: String,
}

/// Headline numbers for one comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub candidates: usize,
    /// Skill rows, not counting Experience.
    pub skills: usize,
    pub leader: Option<Leader>,
}

impl Summary {
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let mut leader: Option<(f64, Leader)> = None;

        for column in &matrix.columns {
            let total = matrix.totals.get(&column.id).unwrap_or("0");
            let value = total.parse::<f64>().unwrap_or(0.0);
            // Strictly greater: the first column wins ties
            if leader.as_ref().map_or(true, |(best, _)| value > *best) {
                leader = Some((
                    value,
                    Leader {
                        id: column.id.clone(),
                        name: column.name.clone(),
                        total: total.to_string(),
                    },
                ));
            }
        }

        Self {
            candidates: matrix.columns.len(),
            skills: matrix.rows.iter().filter(|row| !row.is_experience()).count(),
            leader: leader.map(|(_, leader)| leader),
        }
    }

    /// "`N` Candidates"
    pub fn heading(&self) -> String {
        format!("{} Candidates", self.candidates)
    }
}

/// Escape text for XML/HTML content and attribute values. Newlines become
/// character references so they survive attribute normalization.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(c),
        }
    }
    out
}
