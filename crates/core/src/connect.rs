#![forbid(unsafe_code)]

//! Decides whether a user-drawn connection may become an edge.

use serde::{Deserialize, Serialize};

use crate::graph::{
    find_node_by_id, has_incoming_connection_from_objective, has_outgoing_connection_to_objective,
    parent_objective_of_task_node,
};
use crate::model::{Handle, LayoutEdge, LayoutNode, NodeKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<Handle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<Handle>,
}

impl ConnectionRequest {
    pub fn new(
        source: impl Into<String>,
        source_handle: Handle,
        target: impl Into<String>,
        target_handle: Handle,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: Some(source_handle),
            target_handle: Some(target_handle),
        }
    }
}

/// An accepted connection, normalised so the objective is always the source of a task edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionKind {
    Chain {
        from: String,
        to: String,
    },
    ObjectiveTask {
        objective: String,
        task: String,
        side: Handle,
    },
}

impl ConnectionKind {
    pub fn to_edge(&self) -> LayoutEdge {
        match self {
            Self::Chain { from, to } => LayoutEdge::between(from, Handle::Bottom, to, Handle::Top),
            Self::ObjectiveTask {
                objective,
                task,
                side,
            } => LayoutEdge::between(objective, *side, task, side.opposite()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionRejected {
    UnknownSource,
    UnknownTarget,
    SelfLoop,
    TitleNode,
    TaskToTask,
    ChainHandles,
    TaskHandles,
    SourceHasSuccessor,
    TargetHasPredecessor,
    ChainCycle,
    TaskHasParent,
    DuplicateEdge,
    DetachedChain,
    DetachedObjective,
}

impl ConnectionRejected {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownSource => "source node does not exist",
            Self::UnknownTarget => "target node does not exist",
            Self::SelfLoop => "a node cannot connect to itself",
            Self::TitleNode => "title nodes do not take connections",
            Self::TaskToTask => "tasks can only connect to objectives",
            Self::ChainHandles => "objectives chain from a bottom handle to a top handle",
            Self::TaskHandles => "tasks attach to an objective's left or right handle",
            Self::SourceHasSuccessor => "objective already continues the chain",
            Self::TargetHasPredecessor => "objective already has a predecessor",
            Self::ChainCycle => "connection would close a loop in the chain",
            Self::TaskHasParent => "task already belongs to an objective",
            Self::DuplicateEdge => "nodes are already connected",
            Self::DetachedChain => "neither objective is part of the roadmap yet",
            Self::DetachedObjective => "objective is not part of the roadmap yet",
        }
    }
}

impl std::fmt::Display for ConnectionRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ConnectionRejected {}

pub fn validate_connection(
    request: &ConnectionRequest,
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
) -> Result<ConnectionKind, ConnectionRejected> {
    let source = find_node_by_id(nodes, &request.source).ok_or(ConnectionRejected::UnknownSource)?;
    let target = find_node_by_id(nodes, &request.target).ok_or(ConnectionRejected::UnknownTarget)?;
    if source.id == target.id {
        return Err(ConnectionRejected::SelfLoop);
    }
    if edges.iter().any(|e| e.touches(&source.id) && e.touches(&target.id)) {
        return Err(ConnectionRejected::DuplicateEdge);
    }

    match (source.kind, target.kind) {
        (NodeKind::Title, _) | (_, NodeKind::Title) => Err(ConnectionRejected::TitleNode),
        (NodeKind::Task, NodeKind::Task) => Err(ConnectionRejected::TaskToTask),
        (NodeKind::Objective, NodeKind::Objective) => {
            validate_chain(request, &source.id, &target.id, nodes, edges)
        }
        (NodeKind::Objective, NodeKind::Task) => {
            validate_task_link(request.source_handle, &source.id, &target.id, nodes, edges)
        }
        (NodeKind::Task, NodeKind::Objective) => {
            validate_task_link(request.target_handle, &target.id, &source.id, nodes, edges)
        }
    }
}

fn validate_chain(
    request: &ConnectionRequest,
    from: &str,
    to: &str,
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
) -> Result<ConnectionKind, ConnectionRejected> {
    if request.source_handle != Some(Handle::Bottom) || request.target_handle != Some(Handle::Top) {
        return Err(ConnectionRejected::ChainHandles);
    }
    if has_outgoing_connection_to_objective(from, nodes, edges) {
        return Err(ConnectionRejected::SourceHasSuccessor);
    }
    if has_incoming_connection_from_objective(to, nodes, edges) {
        return Err(ConnectionRejected::TargetHasPredecessor);
    }
    if chain_reaches(to, from, nodes, edges) {
        return Err(ConnectionRejected::ChainCycle);
    }
    Ok(ConnectionKind::Chain {
        from: from.to_string(),
        to: to.to_string(),
    })
}

fn validate_task_link(
    objective_handle: Option<Handle>,
    objective: &str,
    task: &str,
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
) -> Result<ConnectionKind, ConnectionRejected> {
    let side = objective_handle
        .filter(|h| h.is_side())
        .ok_or(ConnectionRejected::TaskHandles)?;
    if parent_objective_of_task_node(task, nodes, edges).is_some() {
        return Err(ConnectionRejected::TaskHasParent);
    }
    Ok(ConnectionKind::ObjectiveTask {
        objective: objective.to_string(),
        task: task.to_string(),
        side,
    })
}

/// Follows bottom->top chain edges from `start` looking for `needle`.
fn chain_reaches(start: &str, needle: &str, nodes: &[LayoutNode], edges: &[LayoutEdge]) -> bool {
    let mut current = start;
    for _ in 0..=nodes.len() {
        if current == needle {
            return true;
        }
        let next = edges.iter().find(|e| {
            e.source == current
                && e.source_handle == Some(Handle::Bottom)
                && find_node_by_id(nodes, &e.target).is_some_and(|n| n.kind == NodeKind::Objective)
        });
        match next {
            Some(edge) => current = edge.target.as_str(),
            None => return false,
        }
    }
    false
}
