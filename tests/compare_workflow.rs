//! End-to-end: load a roster from disk, pick candidates, build and render the
//! comparison, interact with it, and write every report format.

use serde_json::json;
use skillgrid::candidate::CandidateId;
use skillgrid::grid::{self, GridSession, HoverTarget, View};
use skillgrid::report;
use skillgrid::tooltip::{AnchorMode, ContainerRect, Pointer};
use skillgrid::{build_matrix, Band, Roster, Selection};
use std::cell::RefCell;
use std::fs;

fn write_roster(dir: &std::path::Path) {
    let team = json!([
        {
            "id": "c-1",
            "name": "Ada Lovelace",
            "data": { "data": { "skillset": [
                { "name": "Backend", "skills": [
                    { "name": "SQL", "pos": [ { "consensus_score": 3 }, { "consensus_score": 2 } ] },
                    { "name": "Go", "pos": [ { "consensus_score": 1.5 } ] }
                ]}
            ]}},
            "user_data": { "user": { "workEx": [
                { "start_date": "2019-03-01", "end_date": "2021-09-15" }
            ]}}
        },
        {
            "id": 2,
            "name": "Grace Hopper",
            "data": { "data": { "skillset": [
                { "name": "Systems", "skills": [
                    { "name": "COBOL", "pos": [ { "consensus_score": 4 } ] },
                    { "name": "SQL", "pos": [ { "consensus_score": 0.4 } ] }
                ]}
            ]}},
            "user_data": { "user": { "workEx": [
                { "start_date": "2010-01-01", "end_date": "2015-01-01" },
                { "start_date": "2015-06", "end_date": "2016-01-31T00:00:00Z" }
            ]}}
        }
    ]);
    fs::write(dir.join("team.json"), team.to_string()).unwrap();

    let solo = json!({ "id": "c-3", "name": "Linus" });
    fs::create_dir(dir.join("more")).unwrap();
    fs::write(dir.join("more/solo.json"), solo.to_string()).unwrap();
}

#[test]
fn compare_selected_candidates() {
    let dir = tempfile::tempdir().unwrap();
    write_roster(dir.path());

    let roster = Roster::load(dir.path()).unwrap();
    assert_eq!(roster.len(), 3);

    // Ranking sums every score entry: Ada 3+2+1.5, Grace 4+0.4, Linus 0
    let ranked = roster.rank();
    let order: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["c-1", "2", "c-3"]);
    assert!(ranked.iter().all(|r| r.recommended));

    let mut selection = Selection::new();
    selection.toggle(CandidateId::new("2"));
    selection.toggle(CandidateId::new("c-1"));
    assert_eq!(selection.heading(), "2 Candidates");

    let matrix = build_matrix(&selection.resolve(&roster)).unwrap();
    let skills: Vec<&str> = matrix.rows.iter().map(|r| r.skill.as_str()).collect();
    assert_eq!(skills, vec!["Experience", "COBOL", "SQL", "Go"]);

    // 60 months + 7 months = 5.6 years; 30 months = 2.5 years
    let grace = CandidateId::new("2");
    let ada = CandidateId::new("c-1");
    assert_eq!(matrix.rows[0].get(&grace).unwrap().display(), "5.6");
    assert_eq!(matrix.rows[0].get(&ada).unwrap().display(), "2.5");

    // Matrix totals only use the first entry of each skill
    assert_eq!(matrix.totals.get(&grace), Some("4.40"));
    assert_eq!(matrix.totals.get(&ada), Some("4.50"));

    let view = grid::render(&matrix);
    let scene = view.scene().unwrap();
    assert_eq!(scene.columns(), 2);
    assert_eq!(scene.column_labels[0].text, "G.H");
    assert_eq!(scene.cell(1, 0).unwrap().band, Some(Band::DarkestGreen));
    assert_eq!(scene.cell(2, 0).unwrap().band, Some(Band::White));
    assert_eq!(scene.cell(3, 0).unwrap().text, "0");
    assert_eq!(scene.cell(3, 1).unwrap().band, Some(Band::NormalGreen));
}

#[test]
fn remove_candidate_through_grid() {
    let dir = tempfile::tempdir().unwrap();
    write_roster(dir.path());
    let roster = Roster::load(dir.path()).unwrap();

    let selection = RefCell::new(Selection::from_ids([CandidateId::new("c-1"), CandidateId::new("2")]));
    let view = grid::render(&build_matrix(&selection.borrow().resolve(&roster)).unwrap());

    let mut session = GridSession::new(view, |id: &CandidateId| {
        selection.borrow_mut().remove(id);
    });

    session.pointer_over(HoverTarget::ColumnLabel(0));
    session.pointer_move(Pointer::new(320.0, 40.0), ContainerRect::new(20.0, 10.0));
    let tooltip = session.tooltip();
    assert_eq!(tooltip.content, "Total Score: 4.50");
    assert_eq!(tooltip.mode, AnchorMode::Label);
    assert_eq!((tooltip.x, tooltip.y), (310.0, 20.0));

    let mut asked = String::new();
    let removed = session.click_label(0, &mut |prompt: &str| {
        asked = prompt.to_string();
        true
    });
    assert_eq!(removed, Some(CandidateId::new("c-1")));
    assert_eq!(asked, "Remove Ada Lovelace from selected candidates?");

    let remaining = build_matrix(&selection.borrow().resolve(&roster)).unwrap();
    session.redraw(grid::render(&remaining));
    assert!(!session.tooltip().visible);
    assert_eq!(session.view().scene().unwrap().columns(), 1);

    // Removing the last candidate leaves the empty state
    let mut accept = |_: &str| true;
    session.click_label(0, &mut accept);
    let none = build_matrix(&selection.borrow().resolve(&roster)).unwrap();
    session.redraw(grid::render(&none));
    assert!(matches!(session.view(), View::Empty { message } if message == "No candidates selected."));
}

#[test]
fn write_every_report_format() {
    let dir = tempfile::tempdir().unwrap();
    write_roster(dir.path());
    let roster = Roster::load(dir.path()).unwrap();
    let selection = Selection::from_ids(roster.rank().into_iter().map(|r| r.id));
    let matrix = build_matrix(&selection.resolve(&roster)).unwrap();

    let out = tempfile::tempdir().unwrap();
    for name in ["compare.html", "compare.svg", "compare.json"] {
        report::generate(out.path().join(name), &matrix).unwrap();
    }

    let html = fs::read_to_string(out.path().join("compare.html")).unwrap();
    assert!(html.contains("3 Candidates"));
    assert!(html.contains("A.L"));

    let svg = fs::read_to_string(out.path().join("compare.svg")).unwrap();
    assert_eq!(svg.matches(r#"class="candidate-label""#).count(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("compare.json")).unwrap()).unwrap();
    assert_eq!(json["matrix"]["totals"]["c-3"], "0.00");
    assert_eq!(json["summary"]["leader"]["id"], "c-1");
}

#[test]
fn malformed_employment_date_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let bad = json!({
        "id": "x", "name": "Bad Dates",
        "user_data": { "user": { "workEx": [ { "start_date": "last spring", "end_date": "2020-01-01" } ] } }
    });
    fs::write(dir.path().join("bad.json"), bad.to_string()).unwrap();

    let roster = Roster::load(&dir.path().join("bad.json")).unwrap();
    let err = build_matrix(&Selection::from_ids([CandidateId::new("x")]).resolve(&roster)).unwrap_err();
    assert!(err.to_string().contains("candidate x"));
    assert!(err.to_string().contains("start_date"));
}
