#![forbid(unsafe_code)]

//! Lookup and filtering over the presentation graph. Removal helpers never touch their input;
//! they return the surviving nodes/edges as a new `Vec`.

use crate::model::{LayoutEdge, LayoutNode, NodeKind, Objective, Task};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeMatch {
    Source,
    Target,
    Any,
}

impl EdgeMatch {
    fn matches(self, edge: &LayoutEdge, node_id: &str) -> bool {
        match self {
            EdgeMatch::Source => edge.source == node_id,
            EdgeMatch::Target => edge.target == node_id,
            EdgeMatch::Any => edge.touches(node_id),
        }
    }
}

pub fn find_node_by_id<'a>(nodes: &'a [LayoutNode], id: &str) -> Option<&'a LayoutNode> {
    nodes.iter().find(|n| n.id == id)
}

pub fn find_node_by_id_mut<'a>(nodes: &'a mut [LayoutNode], id: &str) -> Option<&'a mut LayoutNode> {
    nodes.iter_mut().find(|n| n.id == id)
}

pub fn find_node_index_by_id(nodes: &[LayoutNode], id: &str) -> Option<usize> {
    nodes.iter().position(|n| n.id == id)
}

pub fn find_edge_by_node_id<'a>(
    edges: &'a [LayoutEdge],
    node_id: &str,
    mode: EdgeMatch,
) -> Option<&'a LayoutEdge> {
    edges.iter().find(|e| mode.matches(e, node_id))
}

pub fn find_edge_by_id<'a>(edges: &'a [LayoutEdge], edge_id: &str) -> Option<&'a LayoutEdge> {
    edges.iter().find(|e| e.id == edge_id)
}

pub fn remove_node_by_id(nodes: &[LayoutNode], id: &str) -> Vec<LayoutNode> {
    nodes.iter().filter(|n| n.id != id).cloned().collect()
}

pub fn remove_nodes_by_ids(nodes: &[LayoutNode], ids: &[&str]) -> Vec<LayoutNode> {
    nodes
        .iter()
        .filter(|n| !ids.contains(&n.id.as_str()))
        .cloned()
        .collect()
}

pub fn remove_edges_connected_to_node(edges: &[LayoutEdge], node_id: &str) -> Vec<LayoutEdge> {
    edges.iter().filter(|e| !e.touches(node_id)).cloned().collect()
}

pub fn remove_edges_connected_to_nodes(edges: &[LayoutEdge], node_ids: &[&str]) -> Vec<LayoutEdge> {
    edges
        .iter()
        .filter(|e| !node_ids.iter().any(|id| e.touches(id)))
        .cloned()
        .collect()
}

pub fn remove_edges_by_ids(edges: &[LayoutEdge], ids: &[&str]) -> Vec<LayoutEdge> {
    edges
        .iter()
        .filter(|e| !ids.contains(&e.id.as_str()))
        .cloned()
        .collect()
}

pub fn is_objective_node(node: &LayoutNode) -> bool {
    match node.kind {
        NodeKind::Objective => true,
        NodeKind::Task | NodeKind::Title => false,
    }
}

pub fn is_task_node(node: &LayoutNode) -> bool {
    match node.kind {
        NodeKind::Task => true,
        NodeKind::Objective | NodeKind::Title => false,
    }
}

fn is_objective_id(nodes: &[LayoutNode], id: &str) -> bool {
    find_node_by_id(nodes, id).is_some_and(is_objective_node)
}

fn is_chain_edge(edge: &LayoutEdge) -> bool {
    // Edges persisted without handles still count as chain links when both ends are objectives.
    !matches!(edge.source_handle, Some(h) if h.is_side())
        && !matches!(edge.target_handle, Some(h) if h.is_side())
}

/// The objective already has a successor in the chain.
pub fn has_outgoing_connection_to_objective(
    node_id: &str,
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
) -> bool {
    edges
        .iter()
        .any(|e| e.source == node_id && is_chain_edge(e) && is_objective_id(nodes, &e.target))
}

/// The objective already has a predecessor in the chain.
pub fn has_incoming_connection_from_objective(
    node_id: &str,
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
) -> bool {
    edges
        .iter()
        .any(|e| e.target == node_id && is_chain_edge(e) && is_objective_id(nodes, &e.source))
}

fn is_task_link(edge: &LayoutEdge) -> bool {
    matches!(edge.source_handle, Some(h) if h.is_side())
        || matches!(edge.target_handle, Some(h) if h.is_side())
}

/// The objective that owns `task_id` through an objective->task edge, if any.
pub fn parent_objective_of_task_node<'a>(
    task_id: &str,
    nodes: &[LayoutNode],
    edges: &'a [LayoutEdge],
) -> Option<&'a str> {
    if !find_node_by_id(nodes, task_id).is_some_and(is_task_node) {
        return None;
    }
    edges.iter().filter(|e| is_task_link(e)).find_map(|e| {
        if e.target == task_id && is_objective_id(nodes, &e.source) {
            Some(e.source.as_str())
        } else if e.source == task_id && is_objective_id(nodes, &e.target) {
            Some(e.target.as_str())
        } else {
            None
        }
    })
}

/// Task nodes hanging off `objective_id`, in edge order.
pub fn task_ids_of_objective<'a>(
    objective_id: &str,
    nodes: &[LayoutNode],
    edges: &'a [LayoutEdge],
) -> Vec<&'a str> {
    if !is_objective_id(nodes, objective_id) {
        return Vec::new();
    }
    edges
        .iter()
        .filter(|e| is_task_link(e))
        .filter_map(|e| {
            let other = if e.source == objective_id {
                e.target.as_str()
            } else if e.target == objective_id {
                e.source.as_str()
            } else {
                return None;
            };
            find_node_by_id(nodes, other)
                .filter(|n| is_task_node(n))
                .map(|_| other)
        })
        .collect()
}

/// `start` followed by every objective reachable from it along chain edges, in chain order.
pub fn chain_run_from<'a>(
    start: &'a str,
    nodes: &[LayoutNode],
    edges: &'a [LayoutEdge],
) -> Vec<&'a str> {
    let mut run = vec![start];
    let mut current = start;
    while let Some(edge) = edges.iter().find(|e| {
        e.source == current && is_chain_edge(e) && is_objective_id(nodes, &e.target)
    }) {
        if run.contains(&edge.target.as_str()) {
            break;
        }
        current = edge.target.as_str();
        run.push(current);
    }
    run
}

pub fn set_objective_task_count(nodes: &mut [LayoutNode], objective_id: &str, count: usize) {
    if let Some(node) = find_node_by_id_mut(nodes, objective_id).filter(|n| is_objective_node(n)) {
        node.data.total_tasks = Some(count);
    }
}

pub fn create_objective_from_node(node: &LayoutNode) -> Objective {
    Objective {
        id: node.id.clone(),
        title: node.data.title.clone(),
        description: node.data.description.clone(),
        order_index: 0,
        ..Objective::default()
    }
}

pub fn create_task_from_node(node: &LayoutNode) -> Task {
    Task {
        id: node.id.clone(),
        title: node.data.title.clone(),
        description: node.data.description.clone(),
        order_index: 0,
        ..Task::default()
    }
}

#[cfg(test)]
mod tests;
