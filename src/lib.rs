//! Skillgrid - Compare candidates side by side on a skill heatmap
//!
//! Skillgrid takes a handful of selected candidates, each carrying assessed
//! skill scores and an employment history, and lays them out as a grid: one
//! column per candidate, one row per skill, cells color-banded by score. A
//! synthetic `Experience` row on top shows years of work experience.
//!
//! # Overview
//!
//! ```text
//! raw records ──▶ CandidateRecord ──▶ build_matrix ──▶ render ──▶ svg / html / json
//!                      │                                 │
//!                 total_score (ranking)            GridSession (hover, tooltip,
//!                                                   confirm-then-remove)
//! ```
//!
//! Two different totals exist. The *ranking total* ([`total_score`]) sums
//! every consensus score a candidate has and orders the candidate list. The
//! *matrix total* sums the representative score of each skill row and is shown
//! in the candidate label tooltip.
//!
//! # Quick Start
//!
//! ```no_run
//! use skillgrid::{build_matrix, grid, report, Roster, Selection};
//! use std::path::Path;
//!
//! # fn main() -> skillgrid::Result<()> {
//! let roster = Roster::load(Path::new("candidates/"))?;
//! let mut selection = Selection::new();
//! for ranked in roster.rank().iter().take(3) {
//!     selection.toggle(ranked.id.clone());
//! }
//!
//! let matrix = build_matrix(&selection.resolve(&roster))?;
//! match grid::render(&matrix) {
//!     grid::View::Empty { message } => println!("{}", message),
//!     grid::View::Grid(scene) => println!("{} × {} grid", scene.rows(), scene.columns()),
//! }
//! report::generate("compare.html", &matrix)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Score Bands
//!
//! | Score      | Band          | Fill      |
//! |------------|---------------|-----------|
//! | ≥ 3.5      | darkest green | `#003F0B` |
//! | ≥ 2.5      | hard green    | `#199741` |
//! | ≥ 1.5      | normal green  | `#A6D96A` |
//! | ≥ 0.5      | yellow        | `#F9F8A6` |
//! | otherwise  | white         | `#FFFFFF` |
//!
//! # Modules
//!
//! - [`candidate`]: typed records, ranking total, experience, name labels
//! - [`roster`]: loading records from disk and ranking them
//! - [`selection`]: ordered selection of candidate ids
//! - [`matrix`]: the skill × candidate pivot
//! - [`color`]: score bands
//! - [`grid`]: layout, scene and interaction
//! - [`tooltip`]: the single floating tooltip
//! - [`report`]: output formatters (HTML, SVG, JSON)
//! - [`serve`]: local interactive server

pub mod candidate;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod matrix;
pub mod report;
pub mod roster;
pub mod selection;
pub mod serve;
pub mod telemetry;
pub mod tooltip;

pub use candidate::{total_score, CandidateId, CandidateRecord};
pub use color::{color_for, Band};
pub use error::{Error, Result};
pub use matrix::{build_matrix, Matrix, MatrixError};
pub use roster::{RankedCandidate, Roster};
pub use selection::Selection;
