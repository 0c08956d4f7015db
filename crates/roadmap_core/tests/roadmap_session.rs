use roadmap_core::{
    EditOutcome, EditTarget, RoadmapError, RoadmapSession, SchemaViolation, StaleAddress,
    UpstreamError,
};

const PAYLOAD: &str = r#"{
  "title": "Roadmap",
  "subtitle": "FY25",
  "pillars": [{"id": "p1", "name": "Growth"}, {"id": "p2", "name": "Platform"}],
  "timeframes": [
    {"id": "t1", "date": "2025 - Q1", "name": "Start",
     "deliverables": [{"pillarId": "p1", "tasks": ["A", "B"]}]}
  ]
}"#;

fn loaded_session() -> RoadmapSession {
    let mut session = RoadmapSession::new();
    session.load_json(PAYLOAD).expect("payload should load");
    session
}

#[test]
fn new_session_has_no_views() {
    let session = RoadmapSession::new();
    assert!(session.current().is_none());
    assert!(session.pillar_view().is_none());
    assert!(session.timeline_view().is_none());
    assert!(session.image_prompt().is_none());
    assert_eq!(session.revision(), 0);
}

#[test]
fn load_from_parser_accepts_collaborator_payload() {
    let parser = |text: &str| -> Result<String, UpstreamError> {
        assert!(text.contains("Growth"));
        Ok(format!("```json\n{PAYLOAD}\n```"))
    };

    let mut session = RoadmapSession::new();
    let data = session
        .load_from_parser(&parser, "Growth pillar: launch A and B in Q1")
        .expect("load should succeed");
    assert_eq!(data.pillars.len(), 2);
    assert_eq!(session.revision(), 1);
}

#[test]
fn blank_source_never_reaches_collaborator() {
    let parser = |_: &str| -> Result<String, UpstreamError> {
        panic!("collaborator must not be called for blank input")
    };
    let mut session = RoadmapSession::new();
    let err = session.load_from_parser(&parser, "   \n").unwrap_err();
    assert!(matches!(err, RoadmapError::EmptySource));
}

#[test]
fn collaborator_error_is_upstream_failure_and_keeps_previous_record() {
    let mut session = loaded_session();
    let before = session.current().cloned();

    let parser = |_: &str| -> Result<String, UpstreamError> { Err("quota exceeded".into()) };
    let err = session
        .load_from_parser(&parser, "new roadmap")
        .unwrap_err();

    match err {
        RoadmapError::UpstreamFailure(message) => assert!(message.contains("quota exceeded")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.current().cloned(), before);
    assert_eq!(session.revision(), 1);
}

#[test]
fn unusable_payload_is_upstream_failure() {
    let mut session = RoadmapSession::new();
    let err = session.load_json("I could not understand the roadmap.").unwrap_err();
    assert!(matches!(err, RoadmapError::UpstreamFailure(_)));
    assert!(session.current().is_none());
}

#[test]
fn schema_violation_keeps_previous_record() {
    let mut session = loaded_session();
    let err = session
        .load_json(r#"{"title": "broken", "pillars": []}"#)
        .unwrap_err();

    assert!(matches!(
        err,
        RoadmapError::SchemaViolation(SchemaViolation::MissingField("timeframes"))
    ));
    assert_eq!(session.current().unwrap().title, "Roadmap");
}

#[test]
fn successful_load_replaces_record_wholesale() {
    let mut session = loaded_session();
    session
        .load_json(r#"{"title": "Second", "pillars": [], "timeframes": []}"#)
        .unwrap();
    let current = session.current().unwrap();
    assert_eq!(current.title, "Second");
    assert!(current.pillars.is_empty());
    assert_eq!(session.revision(), 2);
}

#[test]
fn on_edit_updates_both_views() {
    let mut session = loaded_session();
    let outcome = session.on_edit("t1", "p1", 1, "B (done)");
    assert_eq!(outcome, EditOutcome::Applied);

    let pillar_view = session.pillar_view().unwrap();
    assert_eq!(
        pillar_view.lane("p1").unwrap().block("t1").unwrap().tasks,
        vec!["A", "B (done)"]
    );
    let timeline = session.timeline_view().unwrap();
    assert_eq!(
        timeline.column("t1").unwrap().entry("p1").unwrap().tasks,
        vec!["A", "B (done)"]
    );
    assert!(session.image_prompt().unwrap().contains("B (done)"));
}

#[test]
fn dropped_edit_still_swaps_in_resolver_copy() {
    let mut session = loaded_session();
    let outcome = session.on_edit("t1", "p2", 0, "New");
    assert!(!outcome.is_applied());

    let t1 = &session.current().unwrap().timeframes[0];
    assert_eq!(t1.group("p2").unwrap().tasks.len(), 0);
    assert!(session
        .timeline_view()
        .unwrap()
        .column("t1")
        .unwrap()
        .entry("p2")
        .is_none());
}

#[test]
fn edits_apply_in_call_order() {
    let mut session = loaded_session();
    session.on_edit("t1", "p1", 0, "first");
    session.on_edit("t1", "p1", 0, "second");
    session.edit(&EditTarget::Title, "Renamed");

    let current = session.current().unwrap();
    assert_eq!(current.timeframes[0].group("p1").unwrap().tasks[0], "second");
    assert_eq!(current.title, "Renamed");
    assert_eq!(session.revision(), 4);
}

#[test]
fn edit_without_record_is_a_no_op() {
    let mut session = RoadmapSession::new();
    let outcome = session.on_edit("t1", "p1", 0, "x");
    assert_eq!(outcome, EditOutcome::Dropped(StaleAddress::NoRecord));
    assert!(session.current().is_none());
    assert_eq!(session.revision(), 0);
}

#[test]
fn sessions_have_distinct_ids() {
    assert_ne!(RoadmapSession::new().id(), RoadmapSession::new().id());
}
