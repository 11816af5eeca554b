//! JSON snapshot of a comparison

use super::Summary;
use crate::grid::View;
use crate::matrix::Matrix;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
pub struct Snapshot<'a> {
    pub generated: String,
    pub summary: Summary,
    pub matrix: &'a Matrix,
    pub view: View,
}

impl<'a> Snapshot<'a> {
    pub fn new(matrix: &'a Matrix) -> Self {
        Self {
            generated: chrono::Local::now().to_rfc3339(),
            summary: Summary::from_matrix(matrix),
            matrix,
            view: crate::grid::render(matrix),
        }
    }
}

pub fn write<W: Write>(writer: &mut W, matrix: &Matrix) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &Snapshot::new(matrix))?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateRecord;
    use crate::matrix::build_matrix;
    use serde_json::{json, Value};

    #[test]
    fn test_snapshot_shape() {
        let records = vec![CandidateRecord::from_value(json!({
            "id": 7, "name": "Ada Lovelace",
            "data": { "data": { "skillset": [ { "skills": [
                { "name": "SQL", "pos": [ { "consensus_score": 2.5 } ] }
            ]}]}}
        }))
        .unwrap()];
        let matrix = build_matrix(&records).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &matrix).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["summary"]["candidates"], 1);
        assert_eq!(value["matrix"]["rows"][0], json!({ "skill": "Experience", "7": "0.0" }));
        assert_eq!(value["matrix"]["rows"][1], json!({ "skill": "SQL", "7": 2.5 }));
        assert_eq!(value["matrix"]["totals"], json!({ "7": "2.50" }));
        assert_eq!(value["view"]["view"], "grid");
    }
}
