#![forbid(unsafe_code)]

use rm_core::model::ORPHAN_OBJECTIVE_ID;
use rm_core::{Handle, LayoutError, NodeKind, Roadmap, build_roadmap_layout};
use serde_json::json;

fn roadmap_from_json(value: serde_json::Value) -> Roadmap {
    serde_json::from_value(value).expect("roadmap json")
}

fn two_objective_roadmap() -> Roadmap {
    roadmap_from_json(json!({
        "id": "rm-rust",
        "title": "Learn Rust",
        "objectives": [
            {
                "id": "o1",
                "title": "Getting started",
                "orderIndex": 1,
                "tasks": [
                    { "id": "t1", "title": "Install rustup", "orderIndex": 1 },
                    { "id": "t2", "title": "Hello, world", "orderIndex": 2 },
                    { "id": "t3", "title": "Cargo basics", "orderIndex": 3 }
                ]
            },
            { "id": "o2", "title": "Ownership", "orderIndex": 2, "tasks": [] }
        ]
    }))
}

#[test]
fn two_objectives_three_tasks() {
    let layout = build_roadmap_layout(&two_objective_roadmap(), false).expect("layout");

    let objectives = layout
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Objective)
        .count();
    let tasks = layout
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Task)
        .collect::<Vec<_>>();
    assert_eq!(objectives, 2);
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks.iter().filter(|n| n.position.x < 0.0).count(), 2);
    assert_eq!(tasks.iter().filter(|n| n.position.x > 0.0).count(), 1);

    let task_edges = layout
        .edges
        .iter()
        .filter(|e| e.source == "o1" && e.target.starts_with('t'))
        .count();
    assert_eq!(task_edges, 3);

    let chain = layout
        .edges
        .iter()
        .filter(|e| e.source == "o1" && e.target == "o2")
        .collect::<Vec<_>>();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].source_handle, Some(Handle::Bottom));
    assert_eq!(chain[0].target_handle, Some(Handle::Top));
    assert_eq!(layout.edges.len(), 4);
}

#[test]
fn fresh_layout_is_deterministic() {
    let roadmap = two_objective_roadmap();
    let first = build_roadmap_layout(&roadmap, true).expect("layout");
    let second = build_roadmap_layout(&roadmap, true).expect("layout");
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}

#[test]
fn persisted_layout_with_deleted_task_fails() {
    let mut roadmap = two_objective_roadmap();
    let persisted = build_roadmap_layout(&roadmap, false).expect("layout");
    roadmap.layout = Some(persisted);
    roadmap.objectives[0].tasks.retain(|t| t.id != "t2");

    let err = build_roadmap_layout(&roadmap, false).expect_err("stale task must fail");
    assert_eq!(
        err,
        LayoutError::MissingTask {
            node_id: "t2".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "layout node references unknown task (id=t2)"
    );
}

#[test]
fn persisted_layout_survives_json_and_keeps_positions() {
    let mut roadmap = two_objective_roadmap();
    let mut persisted = build_roadmap_layout(&roadmap, false).expect("layout");
    persisted.nodes[0].position.x = 42.0;
    roadmap.layout = Some(persisted);
    roadmap.objectives[0].title = "Setup".to_string();

    let wire = serde_json::to_value(&roadmap).expect("json");
    assert_eq!(wire["layout"]["nodes"][0]["type"], "Objective");
    assert_eq!(wire["layout"]["edges"][0]["sourceHandle"], "left");
    assert_eq!(wire["objectives"][0]["orderIndex"], 1);

    let reloaded: Roadmap = serde_json::from_value(wire).expect("roadmap json");
    let layout = build_roadmap_layout(&reloaded, true).expect("layout");
    assert_eq!(layout.nodes[0].position.x, 42.0);
    assert_eq!(layout.nodes[0].data.title, "Setup");
    assert_eq!(layout.nodes[0].data.total_tasks, Some(3));
    assert!(layout.nodes.iter().all(|n| n.data.is_editable));
}

#[test]
fn empty_roadmap_is_not_an_error() {
    let roadmap = roadmap_from_json(json!({ "id": "rm-empty", "title": "Nothing yet" }));
    let layout = build_roadmap_layout(&roadmap, true).expect("layout");
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
}

#[test]
fn orphan_objective_never_becomes_a_node() {
    let roadmap = roadmap_from_json(json!({
        "id": "rm",
        "title": "Draft",
        "objectives": [
            { "id": "o1", "title": "One", "orderIndex": 1 },
            {
                "id": ORPHAN_OBJECTIVE_ID,
                "title": "Unassigned tasks",
                "orderIndex": -1,
                "tasks": [{ "id": "loose", "title": "Loose", "orderIndex": 1 }]
            }
        ]
    }));
    let layout = build_roadmap_layout(&roadmap, true).expect("layout");
    let ids = layout.nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["o1", "loose"]);
    assert!(layout.edges.is_empty());
}
