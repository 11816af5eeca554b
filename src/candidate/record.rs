//! Candidate records and the adapter from the raw detail shape
//!
//! The retrieval service hands back deeply nested, loosely typed JSON. A summary
//! record carries `{ id, name }` and the per-id detail record looks like this:
//!
//! ```text
//! {
//!   data:      { data: { skillset: [ { skills: [ { name, pos: [ { consensus_score } ] } ] } ] } },
//!   user_data: { user: { workEx: [ { start_date, end_date } ] } }
//! }
//! ```
//!
//! Any level may be missing or `null`. The `Raw*` types mirror that shape with
//! every field optional; [`CandidateRecord::from_parts`] walks it exactly once and
//! defaults absent collections to empty, so the matrix builder never sees the
//! nesting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a candidate.
///
/// The service emits ids as either JSON strings or numbers; both collapse to the
/// same textual id here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Typed record
// ============================================================================

/// One candidate, normalized from the raw nested shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub skill_groups: Vec<SkillGroup>,
    pub employment_history: Vec<EmploymentInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub name: Option<String>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    /// `None` when the record carries no name; such a skill never gets a row.
    pub name: Option<String>,
    pub scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub consensus_score: Option<f64>,
}

/// A job in the employment history. Dates stay textual until experience is
/// computed; see [`crate::candidate::experience`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmploymentInterval {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Skill {
    /// The score shown in the matrix: the first entry's consensus score, or 0.
    ///
    /// Every entry after the first is ignored; the ranking
    /// total in [`crate::candidate::score`] sums all of them instead.
    pub fn representative_score(&self) -> f64 {
        self.scores
            .first()
            .and_then(|entry| entry.consensus_score)
            .unwrap_or(0.0)
    }
}

impl CandidateRecord {
    /// Build a record from a summary and its detail payload.
    pub fn from_parts(summary: RawSummary, detail: RawDetail) -> Self {
        let skill_groups = detail
            .data
            .and_then(|envelope| envelope.data)
            .and_then(|assessment| assessment.skillset)
            .unwrap_or_default()
            .into_iter()
            .map(SkillGroup::from)
            .collect();

        let employment_history = detail
            .user_data
            .and_then(|user_data| user_data.user)
            .and_then(|user| user.work_ex)
            .unwrap_or_default()
            .into_iter()
            .map(|job| EmploymentInterval {
                start_date: job.start_date,
                end_date: job.end_date,
            })
            .collect();

        Self {
            id: summary.id.into(),
            name: summary.name.unwrap_or_default(),
            skill_groups,
            employment_history,
        }
    }

    /// Build a record from a merged `{ id, name, data, user_data }` object.
    pub fn from_raw(raw: RawCandidate) -> Self {
        Self::from_parts(raw.summary, raw.detail)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawCandidate>(json).map(Self::from_raw)
    }

    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value::<RawCandidate>(value).map(Self::from_raw)
    }

    /// All skills across all groups, in record order.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skill_groups.iter().flat_map(|group| group.skills.iter())
    }

    /// First skill with this exact name, searching groups in order.
    pub fn find_skill(&self, name: &str) -> Option<&Skill> {
        self.skills().find(|skill| skill.name.as_deref() == Some(name))
    }
}

impl From<RawSkillGroup> for SkillGroup {
    fn from(raw: RawSkillGroup) -> Self {
        Self {
            name: raw.name,
            skills: raw
                .skills
                .unwrap_or_default()
                .into_iter()
                .map(|skill| Skill {
                    name: skill.name,
                    scores: skill
                        .pos
                        .unwrap_or_default()
                        .into_iter()
                        .map(|entry| ScoreEntry {
                            consensus_score: entry.consensus_score,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Raw wire shape
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for CandidateId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => CandidateId(text),
            RawId::Number(number) => CandidateId(number.to_string()),
        }
    }
}

/// Entry of the candidate list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Per-id detail payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetail {
    #[serde(default)]
    pub data: Option<RawDataEnvelope>,
    #[serde(default)]
    pub user_data: Option<RawUserData>,
}

/// Summary and detail merged into one object, as the list page keeps them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandidate {
    #[serde(flatten)]
    pub summary: RawSummary,
    #[serde(flatten)]
    pub detail: RawDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDataEnvelope {
    #[serde(default)]
    pub data: Option<RawAssessment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAssessment {
    #[serde(default)]
    pub skillset: Option<Vec<RawSkillGroup>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSkillGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<RawSkill>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSkill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pos: Option<Vec<RawScoreEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScoreEntry {
    #[serde(default)]
    pub consensus_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserData {
    #[serde(default)]
    pub user: Option<RawUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default, rename = "workEx")]
    pub work_ex: Option<Vec<RawWorkEx>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkEx {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==========================================================================
    // ADAPTER TESTS
    // ==========================================================================
    //
    // The adapter is the only place that knows about the nested wire shape.
    // Missing levels must collapse to empty collections, never to errors.
    // ==========================================================================

    fn full_record() -> serde_json::Value {
        json!({
            "id": 7,
            "name": "Ada Lovelace",
            "data": { "data": { "skillset": [
                { "name": "Data", "skills": [
                    { "name": "SQL", "pos": [ { "consensus_score": 3 }, { "consensus_score": 1 } ] },
                    { "name": "Python", "pos": [] }
                ]},
                { "name": "Design", "skills": [
                    { "name": "Figma", "pos": [ { "consensus_score": null } ] }
                ]}
            ]}},
            "user_data": { "user": { "workEx": [
                { "start_date": "2020-01-01", "end_date": "2022-07-01" }
            ]}}
        })
    }

    #[test]
    fn test_numeric_id_becomes_text() {
        let record = CandidateRecord::from_value(full_record()).unwrap();
        assert_eq!(record.id, CandidateId::new("7"));
        assert_eq!(record.name, "Ada Lovelace");
    }

    #[test]
    fn test_string_id_kept() {
        let record = CandidateRecord::from_value(json!({ "id": "c-1", "name": "X Y" })).unwrap();
        assert_eq!(record.id.as_str(), "c-1");
    }

    #[test]
    fn test_nested_skills_flattened_in_order() {
        let record = CandidateRecord::from_value(full_record()).unwrap();
        let names: Vec<&str> = record.skills().filter_map(|s| s.name.as_deref()).collect();
        assert_eq!(names, vec!["SQL", "Python", "Figma"]);
        assert_eq!(record.employment_history.len(), 1);
    }

    #[test]
    fn test_missing_nested_collections_default_to_empty() {
        // Every level absent or null
        for value in [
            json!({ "id": 1, "name": "A B" }),
            json!({ "id": 1, "name": "A B", "data": null, "user_data": null }),
            json!({ "id": 1, "name": "A B", "data": { "data": {} }, "user_data": { "user": {} } }),
            json!({ "id": 1, "name": "A B", "data": { "data": { "skillset": [ { "skills": null } ] } } }),
        ] {
            let record = CandidateRecord::from_value(value).unwrap();
            assert_eq!(record.skills().count(), 0);
            assert!(record.employment_history.is_empty());
        }
    }

    #[test]
    fn test_missing_name_defaults_to_empty() {
        let record = CandidateRecord::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(record.name, "");
    }

    #[test]
    fn test_missing_skill_name_differs_from_empty() {
        let record = CandidateRecord::from_value(json!({
            "id": 1,
            "data": { "data": { "skillset": [ { "skills": [ { "pos": [] }, { "name": "", "pos": [] } ] } ] } }
        }))
        .unwrap();
        let names: Vec<Option<&str>> = record.skills().map(|s| s.name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("")]);
        assert!(record.find_skill("").is_some());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(CandidateRecord::from_value(json!({ "name": "No Id" })).is_err());
    }

    #[test]
    fn test_from_parts_matches_merged_form() {
        let summary: RawSummary = serde_json::from_value(json!({ "id": 7, "name": "Ada Lovelace" })).unwrap();
        let mut detail_value = full_record();
        let detail_obj = detail_value.as_object_mut().unwrap();
        detail_obj.remove("id");
        detail_obj.remove("name");
        let detail: RawDetail = serde_json::from_value(detail_value).unwrap();

        let from_parts = CandidateRecord::from_parts(summary, detail);
        let merged = CandidateRecord::from_value(full_record()).unwrap();
        assert_eq!(from_parts, merged);
    }

    // ==========================================================================
    // REPRESENTATIVE SCORE TESTS
    // ==========================================================================

    #[test]
    fn test_representative_score_is_first_entry() {
        let record = CandidateRecord::from_value(full_record()).unwrap();
        assert_eq!(record.find_skill("SQL").unwrap().representative_score(), 3.0);
    }

    #[test]
    fn test_representative_score_defaults_to_zero() {
        let record = CandidateRecord::from_value(full_record()).unwrap();
        // No entries at all
        assert_eq!(record.find_skill("Python").unwrap().representative_score(), 0.0);
        // First entry present but null
        assert_eq!(record.find_skill("Figma").unwrap().representative_score(), 0.0);
    }

    #[test]
    fn test_find_skill_first_match_wins() {
        let record = CandidateRecord::from_value(json!({
            "id": 1, "name": "A B",
            "data": { "data": { "skillset": [
                { "skills": [ { "name": "SQL", "pos": [ { "consensus_score": 2 } ] } ] },
                { "skills": [ { "name": "SQL", "pos": [ { "consensus_score": 4 } ] } ] }
            ]}}
        }))
        .unwrap();
        assert_eq!(record.find_skill("SQL").unwrap().representative_score(), 2.0);
        assert!(record.find_skill("sql").is_none());
    }
}
