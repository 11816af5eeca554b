//! Skill × candidate matrix
//!
//! Pivots the per-candidate nested skill data into a dense table with one row
//! per skill and one column per selected candidate.
//!
//! # Row universe
//!
//! The synthetic `Experience` row always comes first. The remaining rows are
//! every distinct skill name found across the selected candidates, in the order
//! they were first seen (candidate order, then group order, then skill order).
//! The order is not alphabetical. It is stable across re-renders
//! as long as the selection is.
//!
//! # Cell values
//!
//! | Row        | Value                                                         |
//! |------------|---------------------------------------------------------------|
//! | Experience | Years of work experience, one decimal, as text (`"2.5"`)     |
//! | Skill      | First score entry's consensus score, `0` if absent or missing |
//!
//! # Totals
//!
//! Each candidate's matrix total is the sum of its skill-row cells (never the
//! Experience row), formatted with two decimals. This is *not* the ranking
//! total from [`crate::candidate::score`], which sums every score entry.

use crate::candidate::{name, CandidateId, CandidateRecord, MalformedDate};
use crate::format;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashSet;

/// Name of the synthetic first row.
pub const EXPERIENCE_ROW: &str = "Experience";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    #[error("candidate {candidate}: {source}")]
    MalformedDate {
        candidate: CandidateId,
        #[source]
        source: MalformedDate,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Experience,
    Skill,
}

/// One cell of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Years of experience, already formatted.
    Experience(String),
    Score(f64),
}

impl CellValue {
    /// Numeric score, if this is a skill cell.
    pub fn score(&self) -> Option<f64> {
        match self {
            CellValue::Score(score) => Some(*score),
            CellValue::Experience(_) => None,
        }
    }

    /// Text as it appears inside the cell.
    pub fn display(&self) -> String {
        match self {
            CellValue::Experience(years) => years.clone(),
            CellValue::Score(score) => format::score(*score),
        }
    }
}

/// A row of the pivoted matrix, keyed by candidate id in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub skill: String,
    pub kind: RowKind,
    cells: Vec<(CandidateId, CellValue)>,
}

impl Row {
    pub fn is_experience(&self) -> bool {
        self.kind == RowKind::Experience
    }

    pub fn get(&self, candidate: &CandidateId) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(id, _)| id == candidate)
            .map(|(_, value)| value)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CandidateId, &CellValue)> {
        self.cells.iter().map(|(id, value)| (id, value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// Serialized the way the grid consumes it: { "skill": "SQL", "<id>": 3, ... }
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 1))?;
        map.serialize_entry("skill", &self.skill)?;
        for (id, value) in &self.cells {
            map.serialize_entry(id.as_str(), value)?;
        }
        map.end()
    }
}

/// A candidate column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: CandidateId,
    pub name: String,
    /// Initials shown above the column, e.g. `A.L`.
    pub label: String,
}

/// Matrix totals per candidate, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals(Vec<(CandidateId, String)>);

impl Totals {
    pub fn get(&self, candidate: &CandidateId) -> Option<&str> {
        self.0
            .iter()
            .find(|(id, _)| id == candidate)
            .map(|(_, total)| total.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CandidateId, &str)> {
        self.0.iter().map(|(id, total)| (id, total.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Totals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, total) in &self.0 {
            map.serialize_entry(id.as_str(), total)?;
        }
        map.end()
    }
}

/// Immutable snapshot of one comparison. Rebuilt from scratch whenever the
/// selection changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matrix {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub totals: Totals,
}

impl Matrix {
    /// True when no candidates were selected. Callers show a placeholder
    /// instead of a grid.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, candidate: &CandidateId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == candidate)
    }
}

/// Every distinct skill name across `candidates`, `Experience` first.
pub fn skill_universe<C: Borrow<CandidateRecord>>(candidates: &[C]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut universe = vec![EXPERIENCE_ROW.to_string()];
    seen.insert(EXPERIENCE_ROW);

    for candidate in candidates {
        let candidate: &CandidateRecord = candidate.borrow();
        for skill in candidate.skills() {
            // Nameless skills still count toward ranking, but have no row
            let Some(name) = skill.name.as_deref() else {
                tracing::debug!(candidate = %candidate.id, "skill without a name has no row");
                continue;
            };
            if seen.insert(name) {
                universe.push(name.to_string());
            }
        }
    }

    universe
}

/// Build the pivoted matrix for the selected candidates, in selection order.
///
/// An empty selection yields an empty matrix. The only failure is an
/// employment date that cannot be parsed.
pub fn build_matrix<C: Borrow<CandidateRecord>>(candidates: &[C]) -> Result<Matrix, MatrixError> {
    if candidates.is_empty() {
        return Ok(Matrix::default());
    }

    let columns: Vec<Column> = candidates
        .iter()
        .map(|c| {
            let c: &CandidateRecord = c.borrow();
            Column {
                id: c.id.clone(),
                name: c.name.clone(),
                label: name::initials_label(&c.name),
            }
        })
        .collect();

    let rows = skill_universe(candidates)
        .into_iter()
        .map(|skill| build_row(skill, candidates))
        .collect::<Result<Vec<_>, _>>()?;

    let totals = Totals(
        columns
            .iter()
            .map(|column| (column.id.clone(), matrix_total(&rows, &column.id)))
            .collect(),
    );

    tracing::debug!(
        candidates = columns.len(),
        rows = rows.len(),
        "built comparison matrix"
    );

    Ok(Matrix {
        columns,
        rows,
        totals,
    })
}

fn build_row<C: Borrow<CandidateRecord>>(skill: String, candidates: &[C]) -> Result<Row, MatrixError> {
    let kind = if skill == EXPERIENCE_ROW {
        RowKind::Experience
    } else {
        RowKind::Skill
    };

    let cells = candidates
        .iter()
        .map(|c| {
            let c: &CandidateRecord = c.borrow();
            let value = match kind {
                RowKind::Experience => {
                    let years = crate::candidate::experience_years(&c.employment_history)
                        .map_err(|source| MatrixError::MalformedDate {
                            candidate: c.id.clone(),
                            source,
                        })?;
                    CellValue::Experience(years)
                }
                RowKind::Skill => CellValue::Score(
                    c.find_skill(&skill)
                        .map(|s| s.representative_score())
                        .unwrap_or(0.0),
                ),
            };
            Ok::<_, MatrixError>((c.id.clone(), value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Row { skill, kind, cells })
}

fn matrix_total(rows: &[Row], candidate: &CandidateId) -> String {
    let sum: f64 = rows
        .iter()
        .filter(|row| !row.is_experience())
        .filter_map(|row| row.get(candidate).and_then(CellValue::score))
        .sum();
    format::fixed(sum, 2)
}
