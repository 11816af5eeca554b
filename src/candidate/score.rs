//! Ranking total score
//!
//! The candidate list is ordered by the sum of *every* consensus score across
//! all skill groups, skills and score entries. This is a different number from
//! the per-cell representative score and from the matrix total (see
//! [`crate::matrix`]).

use super::record::CandidateRecord;

/// Sum of all present, non-zero consensus scores. Missing collections count as empty.
pub fn total_score(record: &CandidateRecord) -> f64 {
    record
        .skills()
        .flat_map(|skill| skill.scores.iter())
        .filter_map(|entry| entry.consensus_score)
        .filter(|score| *score != 0.0 && !score.is_nan())
        .sum()
}
