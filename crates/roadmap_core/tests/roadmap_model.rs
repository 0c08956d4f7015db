use roadmap_core::{DeliverableGroup, Pillar, RoadmapData, StructuralIssue, Timeframe};
use serde_json::json;

#[test]
fn serialization_uses_contract_field_names() {
    let mut data = RoadmapData::new("Platform 2025", "Where we are going");
    data.pillars.push(Pillar::new("p1", "Growth"));
    data.timeframes
        .push(Timeframe::new("t1", "2025 - Q1", "Foundations").with_group("p1", &["Hire", "Ship"]));

    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Platform 2025",
            "subtitle": "Where we are going",
            "pillars": [{"id": "p1", "name": "Growth"}],
            "timeframes": [{
                "id": "t1",
                "date": "2025 - Q1",
                "name": "Foundations",
                "deliverables": [{"pillarId": "p1", "tasks": ["Hire", "Ship"]}]
            }]
        })
    );

    let decoded: RoadmapData = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn optional_display_fields_default_to_empty() {
    let data: RoadmapData = serde_json::from_value(json!({
        "pillars": [],
        "timeframes": [{"id": "t1", "deliverables": [{"pillarId": "p1"}]}]
    }))
    .unwrap();

    assert_eq!(data.title, "");
    assert_eq!(data.subtitle, "");
    assert_eq!(data.timeframes[0].date, "");
    assert_eq!(data.timeframes[0].name, "");
    assert!(data.timeframes[0].deliverables[0].is_empty());
}

#[test]
fn lookups_return_first_match_in_order() {
    let mut timeframe = Timeframe::new("t1", "2025", "Now");
    timeframe
        .deliverables
        .push(DeliverableGroup::new("p1", vec!["first".to_string()]));
    timeframe
        .deliverables
        .push(DeliverableGroup::new("p1", vec!["second".to_string()]));

    assert_eq!(timeframe.group("p1").unwrap().tasks, vec!["first"]);
    assert!(timeframe.group("p2").is_none());
}

#[test]
fn record_lookups_resolve_by_id() {
    let mut data = RoadmapData::new("", "");
    data.pillars = vec![Pillar::new("p1", "Growth"), Pillar::new("p1", "Shadow")];
    data.timeframes = vec![Timeframe::new("t1", "2025", "Now")];

    assert_eq!(data.pillar_mut("p1").unwrap().name, "Growth");
    assert!(data.pillar_mut("p2").is_none());
    assert_eq!(data.timeframe_mut("t1").unwrap().date, "2025");
    assert!(data.timeframe_mut("t2").is_none());
}

#[test]
fn timeframe_label_joins_present_parts() {
    assert_eq!(
        Timeframe::new("t1", "2025 - Q1 & Q2", "Build-out").label(),
        "2025 - Q1 & Q2: Build-out"
    );
    assert_eq!(Timeframe::new("t1", "2026", "").label(), "2026");
    assert_eq!(Timeframe::new("t1", "", "Later").label(), "Later");
    assert_eq!(Timeframe::new("t9", "", "").label(), "t9");
}

#[test]
fn structural_issues_report_duplicates_and_dangling_refs() {
    let mut data = RoadmapData::new("", "");
    data.pillars = vec![
        Pillar::new("p1", "Growth"),
        Pillar::new("p1", "Growth again"),
    ];
    data.timeframes = vec![
        Timeframe::new("t1", "", "")
            .with_group("p1", &["A"])
            .with_group("p1", &["B"])
            .with_group("ghost", &["C"]),
        Timeframe::new("t1", "", ""),
    ];

    assert_eq!(
        data.structural_issues(),
        vec![
            StructuralIssue::DuplicatePillarId("p1".to_string()),
            StructuralIssue::DuplicateGroup {
                timeframe_id: "t1".to_string(),
                pillar_id: "p1".to_string(),
            },
            StructuralIssue::DanglingPillarRef {
                timeframe_id: "t1".to_string(),
                pillar_id: "ghost".to_string(),
            },
            StructuralIssue::DuplicateTimeframeId("t1".to_string()),
        ]
    );
}

#[test]
fn task_count_sums_every_group() {
    let mut data = RoadmapData::new("", "");
    data.timeframes = vec![
        Timeframe::new("t1", "", "").with_group("p1", &["A", "B"]),
        Timeframe::new("t2", "", "")
            .with_group("p1", &[])
            .with_group("p2", &["C"]),
    ];
    assert_eq!(data.task_count(), 3);
}
