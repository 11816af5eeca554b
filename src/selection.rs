//! Ordered set of selected candidate ids
//!
//! Selection order is column order in the grid. Nothing here is persisted.

use crate::candidate::{CandidateId, CandidateRecord};
use crate::roster::Roster;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<CandidateId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection from ids in order. Repeats are dropped.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = CandidateId>,
    {
        let mut selection = Self::new();
        for id in ids {
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Add `id` at the end, or remove it if already selected. Returns whether
    /// the candidate is selected afterwards.
    pub fn toggle(&mut self, id: CandidateId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Returns false if `id` was not selected.
    pub fn remove(&mut self, id: &CandidateId) -> bool {
        match self.ids.iter().position(|selected| selected == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// "`N` Candidates" header shown above the grid.
    pub fn heading(&self) -> String {
        format!("{} Candidates", self.ids.len())
    }

    /// Records for the selected ids, in selection order. Ids missing from the
    /// roster are skipped.
    pub fn resolve<'a>(&self, roster: &'a Roster) -> Vec<&'a CandidateRecord> {
        self.ids
            .iter()
            .filter_map(|id| {
                let record = roster.get(id);
                if record.is_none() {
                    tracing::warn!(candidate = %id, "selected candidate is not in the roster");
                }
                record
            })
            .collect()
    }
}
