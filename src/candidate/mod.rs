//! Candidate records and the per-candidate metrics derived from them
//!
//! - [`record`]: typed record plus the adapter from the raw nested shape
//! - [`score`]: ranking total (sum of every consensus score)
//! - [`experience`]: months and years of work experience
//! - [`name`]: initials and shortened display labels

pub mod experience;
pub mod name;
pub mod record;
pub mod score;

pub use experience::{experience_years, DateField, MalformedDate};
pub use record::{
    CandidateId, CandidateRecord, EmploymentInterval, RawCandidate, RawDetail, RawSummary,
    ScoreEntry, Skill, SkillGroup,
};
pub use score::total_score;
