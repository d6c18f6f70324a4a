use super::*;
use crate::model::{Handle, NodeData, Position};

fn node(id: &str, kind: NodeKind) -> LayoutNode {
    LayoutNode::new(
        id,
        kind,
        Position::default(),
        NodeData {
            title: format!("title {id}"),
            ..NodeData::default()
        },
    )
}

fn sample() -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
    let nodes = vec![
        node("o1", NodeKind::Objective),
        node("o2", NodeKind::Objective),
        node("t1", NodeKind::Task),
        node("t2", NodeKind::Task),
        node("title", NodeKind::Title),
    ];
    let edges = vec![
        LayoutEdge::between("o1", Handle::Bottom, "o2", Handle::Top),
        LayoutEdge::between("o1", Handle::Left, "t1", Handle::Right),
        LayoutEdge::between("o2", Handle::Right, "t2", Handle::Left),
    ];
    (nodes, edges)
}

#[test]
fn node_lookup_by_id() {
    let (nodes, _) = sample();
    assert_eq!(find_node_by_id(&nodes, "t1").unwrap().kind, NodeKind::Task);
    assert_eq!(find_node_index_by_id(&nodes, "o2"), Some(1));
    assert!(find_node_by_id(&nodes, "missing").is_none());
    assert_eq!(find_node_index_by_id(&nodes, "missing"), None);
}

#[test]
fn edge_lookup_honours_match_mode() {
    let (_, edges) = sample();
    assert_eq!(
        find_edge_by_node_id(&edges, "o2", EdgeMatch::Source).unwrap().target,
        "t2"
    );
    assert_eq!(
        find_edge_by_node_id(&edges, "o2", EdgeMatch::Target).unwrap().source,
        "o1"
    );
    assert_eq!(
        find_edge_by_node_id(&edges, "o2", EdgeMatch::Any).unwrap().id,
        "e-o1-o2"
    );
    assert!(find_edge_by_node_id(&edges, "t1", EdgeMatch::Source).is_none());
    assert!(find_edge_by_id(&edges, "e-o1-t1").is_some());
}

#[test]
fn removal_helpers_leave_input_untouched() {
    let (nodes, edges) = sample();

    let fewer = remove_node_by_id(&nodes, "t1");
    assert_eq!(fewer.len(), 4);
    assert_eq!(nodes.len(), 5);

    let fewer = remove_nodes_by_ids(&nodes, &["o1", "t1"]);
    let ids = fewer.iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["o2", "t2", "title"]);

    let remaining = remove_edges_connected_to_node(&edges, "o1");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "e-o2-t2");
    assert_eq!(edges.len(), 3);

    let remaining = remove_edges_connected_to_nodes(&edges, &["t1", "t2"]);
    assert_eq!(remaining.len(), 1);

    let remaining = remove_edges_by_ids(&edges, &["e-o1-o2"]);
    assert_eq!(remaining.len(), 2);
}

#[test]
fn kind_discriminators() {
    let (nodes, _) = sample();
    assert!(is_objective_node(&nodes[0]));
    assert!(!is_task_node(&nodes[0]));
    assert!(is_task_node(&nodes[2]));
    assert!(!is_objective_node(&nodes[4]));
    assert!(!is_task_node(&nodes[4]));
}

#[test]
fn chain_connection_checks() {
    let (nodes, edges) = sample();
    assert!(has_outgoing_connection_to_objective("o1", &nodes, &edges));
    assert!(!has_outgoing_connection_to_objective("o2", &nodes, &edges));
    assert!(has_incoming_connection_from_objective("o2", &nodes, &edges));
    assert!(!has_incoming_connection_from_objective("o1", &nodes, &edges));
}

#[test]
fn task_edges_are_not_chain_links() {
    let nodes = vec![node("o1", NodeKind::Objective), node("o2", NodeKind::Objective)];
    let edges = vec![LayoutEdge::between("o1", Handle::Right, "o2", Handle::Left)];
    assert!(!has_outgoing_connection_to_objective("o1", &nodes, &edges));
}

#[test]
fn task_parent_and_children() {
    let (nodes, edges) = sample();
    assert_eq!(parent_objective_of_task_node("t1", &nodes, &edges), Some("o1"));
    assert_eq!(parent_objective_of_task_node("o1", &nodes, &edges), None);
    assert_eq!(task_ids_of_objective("o1", &nodes, &edges), vec!["t1"]);
    assert!(task_ids_of_objective("t1", &nodes, &edges).is_empty());
}

#[test]
fn chain_edges_never_make_a_parent() {
    let (nodes, edges) = sample();
    assert_eq!(parent_objective_of_task_node("o2", &nodes, &edges), None);
    assert_eq!(parent_objective_of_task_node("t2", &nodes, &edges), Some("o2"));

    // A chain edge that lands on a task node is not an ownership link.
    let edges = vec![LayoutEdge::between("o1", Handle::Bottom, "t1", Handle::Top)];
    assert_eq!(parent_objective_of_task_node("t1", &nodes, &edges), None);
    assert!(task_ids_of_objective("o1", &nodes, &edges).is_empty());
}

#[test]
fn chain_run_follows_successors() {
    let nodes = vec![
        node("o1", NodeKind::Objective),
        node("o2", NodeKind::Objective),
        node("o3", NodeKind::Objective),
        node("t1", NodeKind::Task),
    ];
    let edges = vec![
        LayoutEdge::between("o2", Handle::Bottom, "o3", Handle::Top),
        LayoutEdge::between("o1", Handle::Bottom, "o2", Handle::Top),
        LayoutEdge::between("o3", Handle::Right, "t1", Handle::Left),
    ];
    assert_eq!(chain_run_from("o1", &nodes, &edges), vec!["o1", "o2", "o3"]);
    assert_eq!(chain_run_from("o3", &nodes, &edges), vec!["o3"]);
}

#[test]
fn task_count_only_lands_on_objectives() {
    let (mut nodes, _) = sample();
    set_objective_task_count(&mut nodes, "o1", 3);
    set_objective_task_count(&mut nodes, "t1", 3);
    assert_eq!(nodes[0].data.total_tasks, Some(3));
    assert_eq!(nodes[2].data.total_tasks, None);
}

#[test]
fn entities_from_dropped_nodes_are_bare() {
    let mut dropped = node("o9", NodeKind::Objective);
    dropped.data.description = Some("why".to_string());
    let objective = create_objective_from_node(&dropped);
    assert_eq!(objective.id, "o9");
    assert_eq!(objective.title, "title o9");
    assert_eq!(objective.order_index, 0);
    assert!(objective.tasks.is_empty());
    assert!(objective.resources.is_empty());

    let task = create_task_from_node(&node("t9", NodeKind::Task));
    assert_eq!(task.id, "t9");
    assert_eq!(task.order_index, 0);
    assert!(task.resources.is_empty());
}
