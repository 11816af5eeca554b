//! Candidate roster
//!
//! A roster is every candidate known to the tool, loaded from disk:
//!
//! - a `.json` file holding either one candidate object or an array of them
//! - a directory, walked recursively for `.json` files, each parsed as above
//!
//! Directory files are parsed in parallel. A broken file inside a directory is
//! logged and skipped; a broken file given directly is an error.
//!
//! The roster also produces the ranking list: candidates ordered by ranking
//! total, with the top [`RECOMMENDED_COUNT`] flagged as most recommended.

use crate::candidate::{name, total_score, CandidateId, CandidateRecord, RawCandidate};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How many leading candidates of the ranking are flagged as recommended.
pub const RECOMMENDED_COUNT: usize = 5;

/// Title of the ranking list.
pub const RANKING_TITLE: &str = "Most Recommended";

/// Separator placed between the recommended block and the rest of the
/// ranking list. Lists no longer than the block have no separator.
pub const RECOMMENDED_NOTE: &str =
    "Recommendations are based on your skill requirements and candidates' performance.";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a candidate record: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} does not exist")]
    NotFound(PathBuf),
}

/// All `.json` files under `path`, sorted for a stable roster order. A plain
/// file is returned as-is.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>, RecordError> {
    if !path.exists() {
        return Err(RecordError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    Ok(files)
}

/// Parse every candidate in one file.
pub fn parse_file(path: &Path) -> Result<Vec<CandidateRecord>, RecordError> {
    let text = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text).map_err(|source| RecordError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON document holding one candidate or an array of candidates.
///
/// The leading bracket picks the shape, so a bad field is reported with its
/// name and position.
pub fn parse_str(json: &str) -> serde_json::Result<Vec<CandidateRecord>> {
    if json.trim_start().starts_with('[') {
        let raw: Vec<RawCandidate> = serde_json::from_str(json)?;
        Ok(raw.into_iter().map(CandidateRecord::from_raw).collect())
    } else {
        let raw: RawCandidate = serde_json::from_str(json)?;
        Ok(vec![CandidateRecord::from_raw(raw)])
    }
}

/// A candidate's place in the ranking list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub id: CandidateId,
    pub name: String,
    pub short_name: String,
    pub total_score: f64,
    pub recommended: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    candidates: Vec<CandidateRecord>,
}

impl Roster {
    /// Build a roster, dropping repeated ids (the first record wins).
    pub fn new(candidates: Vec<CandidateRecord>) -> Self {
        let mut seen = HashSet::new();
        let candidates = candidates
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.id.clone());
                if !fresh {
                    tracing::warn!(candidate = %c.id, "duplicate candidate id, keeping the first record");
                }
                fresh
            })
            .collect();
        Self { candidates }
    }

    /// Load from a file or directory.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let files = discover(path)?;
        Self::from_files(&files, path.is_dir(), |_| {})
    }

    /// Parse `files` in parallel, calling `on_file` after each one.
    ///
    /// With `skip_broken`, unreadable or malformed files are logged and left
    /// out instead of failing the whole load.
    pub fn from_files<F>(files: &[PathBuf], skip_broken: bool, on_file: F) -> Result<Self, RecordError>
    where
        F: Fn(&Path) + Sync,
    {
        let parsed: Vec<Result<Vec<CandidateRecord>, RecordError>> = files
            .par_iter()
            .map(|path| {
                let result = parse_file(path);
                on_file(path);
                result
            })
            .collect();

        let mut candidates = Vec::new();
        for result in parsed {
            match result {
                Ok(records) => candidates.extend(records),
                Err(e) if skip_broken => tracing::warn!(error = %e, "skipping roster file"),
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(files = files.len(), candidates = candidates.len(), "loaded roster");
        Ok(Self::new(candidates))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.candidates.iter()
    }

    pub fn get(&self, id: &CandidateId) -> Option<&CandidateRecord> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    /// Candidates by descending ranking total. Ties keep roster order.
    pub fn rank(&self) -> Vec<RankedCandidate> {
        let mut scored: Vec<(&CandidateRecord, f64)> =
            self.candidates.iter().map(|c| (c, total_score(c))).collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (c, total))| RankedCandidate {
                id: c.id.clone(),
                name: c.name.clone(),
                short_name: name::short_name(&c.name),
                total_score: total,
                recommended: i < RECOMMENDED_COUNT,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn candidate(id: &str, name: &str, scores: &[f64]) -> serde_json::Value {
        let skills: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| json!({ "name": format!("S{}", i), "pos": [ { "consensus_score": s } ] }))
            .collect();
        json!({
            "id": id,
            "name": name,
            "data": { "data": { "skillset": [ { "name": "Core", "skills": skills } ] } }
        })
    }

    // ==========================================================================
    // PARSING TESTS
    // ==========================================================================

    #[test]
    fn test_parse_single_object() {
        let records = parse_str(&candidate("a", "Ada Lovelace", &[3.0]).to_string()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, CandidateId::new("a"));
    }

    #[test]
    fn test_parse_array() {
        let doc = json!([candidate("a", "Ada", &[]), candidate("b", "Bo", &[])]);
        let records = parse_str(&doc.to_string()).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_rejects_non_candidate() {
        assert!(parse_str("42").is_err());
        assert!(parse_str(r#"{"name": "no id"}"#).is_err());
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        let err = parse_str(r#"{"name": "no id"}"#).unwrap_err().to_string();
        assert!(err.contains("missing field `id`"), "{}", err);

        let err = parse_str(r#"  [ {"id": 1}, {"name": "no id"} ]"#).unwrap_err().to_string();
        assert!(err.contains("missing field `id`"), "{}", err);

        let doc = json!({ "id": 1, "data": { "data": { "skillset": [ { "skills": [
            { "name": "SQL", "pos": [ { "consensus_score": "high" } ] }
        ]}]}}});
        let err = parse_str(&doc.to_string()).unwrap_err().to_string();
        assert!(err.contains("high"), "{}", err);
        assert!(!err.contains("did not match any variant"), "{}", err);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let records = parse_str(
            &json!([candidate("a", "First", &[]), candidate("a", "Second", &[])]).to_string(),
        )
        .unwrap();
        let roster = Roster::new(records);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(&CandidateId::new("a")).unwrap().name, "First");
    }

    // ==========================================================================
    // LOADING TESTS
    // ==========================================================================

    #[test]
    fn test_load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), candidate("a", "Ada", &[1.0]).to_string()).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested/b.json"),
            json!([candidate("b", "Bo", &[]), candidate("c", "Cy", &[])]).to_string(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let roster = Roster::load(dir.path()).unwrap();
        let mut ids: Vec<&str> = roster.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_single_broken_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = Roster::load(&path).unwrap_err();
        assert!(matches!(err, RecordError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_path() {
        let err = Roster::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RecordError::NotFound(_)));
    }

    #[test]
    fn test_from_files_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        for id in ["a", "b", "c"] {
            fs::write(dir.path().join(format!("{}.json", id)), candidate(id, id, &[]).to_string()).unwrap();
        }
        let files = discover(dir.path()).unwrap();
        let seen = std::sync::atomic::AtomicUsize::new(0);

        let roster = Roster::from_files(&files, true, |_| {
            seen.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(seen.into_inner(), 3);
    }

    // ==========================================================================
    // RANKING TESTS
    // ==========================================================================

    #[test]
    fn test_rank_by_total_descending() {
        let roster = Roster::new(vec![
            CandidateRecord::from_value(candidate("low", "Lo W", &[1.0])).unwrap(),
            CandidateRecord::from_value(candidate("high", "Hi Gh", &[3.0, 4.0])).unwrap(),
            CandidateRecord::from_value(candidate("mid", "Mi D", &[2.5])).unwrap(),
        ]);
        let ranked = roster.rank();
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert_eq!(ranked[0].total_score, 7.0);
        assert_eq!(ranked[0].short_name, "Hi G");
    }

    #[test]
    fn test_rank_ties_keep_roster_order() {
        let roster = Roster::new(vec![
            CandidateRecord::from_value(candidate("x", "X", &[2.0])).unwrap(),
            CandidateRecord::from_value(candidate("y", "Y", &[2.0])).unwrap(),
        ]);
        let ids: Vec<String> = roster.rank().into_iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_top_five_are_recommended() {
        let records = (0..7)
            .map(|i| CandidateRecord::from_value(candidate(&i.to_string(), "N", &[i as f64])).unwrap())
            .collect();
        let ranked = Roster::new(records).rank();
        let flags: Vec<bool> = ranked.iter().map(|r| r.recommended).collect();
        assert_eq!(flags, vec![true, true, true, true, true, false, false]);
    }
}
