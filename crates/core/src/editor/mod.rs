#![forbid(unsafe_code)]

//! Editing session over one roadmap.
//!
//! The session owns both models: the domain (objectives/tasks) and the presentation graph
//! (nodes/edges). Every operation updates both before returning, so they never diverge.
//! Rejected operations leave both untouched.

mod intent;

pub use intent::*;

use crate::connect::{ConnectionKind, ConnectionRejected, ConnectionRequest, validate_connection};
use crate::error::{EditError, StructureError};
use crate::geometry::{estimate_objective_height, estimate_task_height};
use crate::graph::{
    chain_run_from, create_objective_from_node, create_task_from_node, find_edge_by_id,
    find_node_by_id, find_node_by_id_mut, is_objective_node, is_task_node, remove_edges_by_ids,
    remove_edges_connected_to_node, remove_edges_connected_to_nodes, remove_node_by_id,
    remove_nodes_by_ids, set_objective_task_count, task_ids_of_objective,
};
use crate::ids::EntityId;
use crate::labels::{LabelKey, LabelResolver};
use crate::layout::{build_dynamic_layout, build_roadmap_layout, objective_node, task_node};
use crate::model::{Layout, LayoutEdge, LayoutNode, NodeKind, Objective, Position, Roadmap, Task};
use crate::structure::{
    add_task_to_objective, append_objective, count_all_tasks, find_objective_by_id,
    find_objective_by_id_mut, find_task_by_id, find_task_by_id_mut,
    get_or_create_orphan_objective, insert_objective_after, insert_objective_before,
    move_objectives_after, move_task, remove_objective, remove_task_from_objective,
    remove_task_from_orphan_objective,
};

pub struct RoadmapEditor {
    roadmap: Roadmap,
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    steps: usize,
    is_editable: bool,
    labels: Box<dyn LabelResolver>,
}

impl std::fmt::Debug for RoadmapEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadmapEditor")
            .field("roadmap", &self.roadmap.id)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("steps", &self.steps)
            .field("is_editable", &self.is_editable)
            .finish()
    }
}

impl RoadmapEditor {
    pub fn open(
        mut roadmap: Roadmap,
        is_editable: bool,
        labels: impl LabelResolver + 'static,
    ) -> Result<Self, EditError> {
        let Layout { nodes, edges } = build_roadmap_layout(&roadmap, is_editable)?;
        roadmap.layout = None;
        let steps = count_all_tasks(&roadmap.objectives);
        Ok(Self {
            roadmap,
            nodes,
            edges,
            steps,
            is_editable,
            labels: Box::new(labels),
        })
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Total task count shown as the roadmap's "N steps" caption.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn steps_caption(&self) -> String {
        self.labels.resolve(LabelKey::StepsCaption { count: self.steps })
    }

    pub fn is_editable(&self) -> bool {
        self.is_editable
    }

    pub fn snapshot(&self) -> Layout {
        Layout {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Hands the roadmap back with the current graph attached as its persisted layout.
    pub fn into_roadmap(self) -> Roadmap {
        let mut roadmap = self.roadmap;
        roadmap.layout = Some(Layout {
            nodes: self.nodes,
            edges: self.edges,
        });
        roadmap
    }

    pub fn apply(&mut self, intent: EditIntent) -> Result<(), EditError> {
        log::debug!("apply {} on roadmap {}", intent.op(), self.roadmap.id);
        match intent {
            EditIntent::DropNode {
                id,
                kind,
                title,
                position,
            } => self.drop_node(kind, &id, &title, position),
            EditIntent::Connect(request) => self.connect(&request).map(|_| ()),
            EditIntent::Disconnect { edge_id } => self.disconnect(&edge_id),
            EditIntent::DeleteNode { id } => self.delete_node(&id).map(|_| ()),
            EditIntent::RenameNode { id, title } => self.rename_node(&id, &title),
            EditIntent::MoveNode { id, position } => self.move_node(&id, position),
            EditIntent::Relayout => {
                self.relayout();
                Ok(())
            }
        }
    }

    /// Places a new node on the canvas. It joins the domain model once it is connected, except
    /// for the very first objective of an empty roadmap, which heads the chain straight away.
    pub fn drop_node(
        &mut self,
        kind: NodeKind,
        id: &str,
        title: &str,
        position: Position,
    ) -> Result<(), EditError> {
        let id = EntityId::try_new(id)?.into_string();
        if find_node_by_id(&self.nodes, &id).is_some()
            || find_objective_by_id(&self.roadmap.objectives, &id).is_some()
            || find_task_by_id(&self.roadmap.objectives, &id).is_some()
        {
            return Err(EditError::DuplicateNode(id));
        }

        let title = match (title.trim(), kind) {
            ("", NodeKind::Objective) => self.labels.resolve(LabelKey::UntitledObjective),
            ("", NodeKind::Task) => self.labels.resolve(LabelKey::UntitledTask),
            (title, _) => title.to_string(),
        };

        let node = match kind {
            NodeKind::Objective => {
                let objective = Objective::new(id.clone(), title);
                let height = estimate_objective_height(&objective);
                objective_node(&objective, position, height, self.is_editable)
            }
            NodeKind::Task => {
                let task = Task::new(id.clone(), title);
                let height = estimate_task_height(&task);
                task_node(&task, position, height, self.is_editable)
            }
            NodeKind::Title => {
                let mut node = LayoutNode::new(id.clone(), kind, position, Default::default());
                node.data.title = title;
                node.data.is_editable = self.is_editable;
                node
            }
        };

        let heads_empty_roadmap =
            kind == NodeKind::Objective && self.roadmap.objectives.iter().all(|o| o.is_orphan());
        if heads_empty_roadmap {
            append_objective(&mut self.roadmap.objectives, create_objective_from_node(&node));
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn connect(&mut self, request: &ConnectionRequest) -> Result<ConnectionKind, EditError> {
        let kind = validate_connection(request, &self.nodes, &self.edges).inspect_err(|reason| {
            log::debug!(
                "dropping connection {} -> {}: {}",
                request.source,
                request.target,
                reason.message()
            );
        })?;

        match &kind {
            ConnectionKind::Chain { from, to } => self.attach_chain(from, to)?,
            ConnectionKind::ObjectiveTask {
                objective, task, ..
            } => self.attach_task(objective, task)?,
        }

        self.edges.push(kind.to_edge());
        self.refresh_counts();
        Ok(kind)
    }

    /// Mirrors a chain edge `from -> to` into the domain order. A newcomer lands on the side
    /// of its neighbour that the edge points at. When both ends are already in the domain, the
    /// run of objectives starting at `to` moves behind `from`.
    fn attach_chain(&mut self, from: &str, to: &str) -> Result<(), EditError> {
        let objectives = &mut self.roadmap.objectives;
        let from_known = find_objective_by_id(objectives, from).is_some();
        let to_known = find_objective_by_id(objectives, to).is_some();
        match (from_known, to_known) {
            (true, true) => {
                let run = chain_run_from(to, &self.nodes, &self.edges);
                move_objectives_after(objectives, &run, from)?;
            }
            (true, false) => {
                let node = find_node_by_id(&self.nodes, to)
                    .ok_or_else(|| EditError::UnknownNode(to.to_string()))?;
                insert_objective_after(objectives, create_objective_from_node(node), from)?;
            }
            (false, true) => {
                let node = find_node_by_id(&self.nodes, from)
                    .ok_or_else(|| EditError::UnknownNode(from.to_string()))?;
                insert_objective_before(objectives, create_objective_from_node(node), to)?;
            }
            (false, false) => return Err(ConnectionRejected::DetachedChain.into()),
        }
        Ok(())
    }

    fn attach_task(&mut self, objective_id: &str, task_id: &str) -> Result<(), EditError> {
        let objectives = &mut self.roadmap.objectives;
        if find_objective_by_id(objectives, objective_id).is_none() {
            return Err(ConnectionRejected::DetachedObjective.into());
        }

        if let Some(task) = remove_task_from_orphan_objective(objectives, task_id) {
            let target = find_objective_by_id_mut(objectives, objective_id)
                .ok_or_else(|| StructureError::UnknownObjective(objective_id.to_string()))?;
            add_task_to_objective(target, task);
            return Ok(());
        }
        if find_task_by_id(objectives, task_id).is_some() {
            log::warn!("task {task_id} had no parent edge but sat under an objective; moving it");
            move_task(objectives, task_id, objective_id)?;
            return Ok(());
        }

        let node = find_node_by_id(&self.nodes, task_id)
            .ok_or_else(|| EditError::UnknownNode(task_id.to_string()))?;
        let task = create_task_from_node(node);
        let target = find_objective_by_id_mut(objectives, objective_id)
            .ok_or_else(|| StructureError::UnknownObjective(objective_id.to_string()))?;
        add_task_to_objective(target, task);
        Ok(())
    }

    /// Removes an edge. A task cut loose from its objective is parked on the orphan objective.
    pub fn disconnect(&mut self, edge_id: &str) -> Result<(), EditError> {
        let edge = find_edge_by_id(&self.edges, edge_id)
            .cloned()
            .ok_or_else(|| EditError::UnknownEdge(edge_id.to_string()))?;

        let objective_task = match (
            find_node_by_id(&self.nodes, &edge.source),
            find_node_by_id(&self.nodes, &edge.target),
        ) {
            (Some(a), Some(b)) if is_objective_node(a) && is_task_node(b) => {
                Some((a.id.clone(), b.id.clone()))
            }
            (Some(a), Some(b)) if is_task_node(a) && is_objective_node(b) => {
                Some((b.id.clone(), a.id.clone()))
            }
            _ => None,
        };

        if let Some((objective_id, task_id)) = objective_task {
            let objectives = &mut self.roadmap.objectives;
            let detached = find_objective_by_id_mut(objectives, &objective_id)
                .and_then(|objective| remove_task_from_objective(objective, &task_id));
            if let Some(task) = detached {
                let orphan = get_or_create_orphan_objective(objectives, &*self.labels);
                add_task_to_objective(orphan, task);
            }
        }

        self.edges = remove_edges_by_ids(&self.edges, &[edge_id]);
        self.refresh_counts();
        Ok(())
    }

    /// Deletes a node and cascades: a task leaves its objective, an objective takes its tasks
    /// with it. Returns the ids of every removed node.
    pub fn delete_node(&mut self, node_id: &str) -> Result<Vec<String>, EditError> {
        let kind = find_node_by_id(&self.nodes, node_id)
            .map(|node| node.kind)
            .ok_or_else(|| EditError::UnknownNode(node_id.to_string()))?;

        let removed = match kind {
            NodeKind::Task => {
                let objectives = &mut self.roadmap.objectives;
                if remove_task_from_orphan_objective(objectives, node_id).is_none() {
                    for objective in objectives.iter_mut() {
                        if remove_task_from_objective(objective, node_id).is_some() {
                            break;
                        }
                    }
                }
                self.nodes = remove_node_by_id(&self.nodes, node_id);
                self.edges = remove_edges_connected_to_node(&self.edges, node_id);
                vec![node_id.to_string()]
            }
            NodeKind::Objective => {
                let mut ids = vec![node_id.to_string()];
                for task_id in task_ids_of_objective(node_id, &self.nodes, &self.edges) {
                    ids.push(task_id.to_string());
                }
                if let Some(objective) = remove_objective(&mut self.roadmap.objectives, node_id) {
                    for task in objective.tasks {
                        if !ids.contains(&task.id) {
                            ids.push(task.id);
                        }
                    }
                }
                let id_refs = ids.iter().map(String::as_str).collect::<Vec<_>>();
                self.nodes = remove_nodes_by_ids(&self.nodes, &id_refs);
                self.edges = remove_edges_connected_to_nodes(&self.edges, &id_refs);
                ids
            }
            NodeKind::Title => {
                self.nodes = remove_node_by_id(&self.nodes, node_id);
                self.edges = remove_edges_connected_to_node(&self.edges, node_id);
                vec![node_id.to_string()]
            }
        };

        let before = self.steps;
        self.refresh_counts();
        log::debug!(
            "deleted {} node(s) from {node_id}; steps {before} -> {}",
            removed.len(),
            self.steps
        );
        Ok(removed)
    }

    pub fn rename_node(&mut self, node_id: &str, title: &str) -> Result<(), EditError> {
        let node = find_node_by_id_mut(&mut self.nodes, node_id)
            .ok_or_else(|| EditError::UnknownNode(node_id.to_string()))?;
        node.data.title = title.to_string();

        let objectives = &mut self.roadmap.objectives;
        match node.kind {
            NodeKind::Objective => {
                if let Some(objective) = find_objective_by_id_mut(objectives, node_id) {
                    objective.title = title.to_string();
                }
            }
            NodeKind::Task => {
                if let Some(task) = find_task_by_id_mut(objectives, node_id) {
                    task.title = title.to_string();
                }
            }
            NodeKind::Title => self.roadmap.title = title.to_string(),
        }
        Ok(())
    }

    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), EditError> {
        let node = find_node_by_id_mut(&mut self.nodes, node_id)
            .ok_or_else(|| EditError::UnknownNode(node_id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Throws away node positions and lays the domain model out from scratch. Canvas-only
    /// nodes that never joined the domain are dropped.
    pub fn relayout(&mut self) {
        let Layout { nodes, edges } = build_dynamic_layout(&self.roadmap, self.is_editable);
        self.nodes = nodes;
        self.edges = edges;
        self.refresh_counts();
    }

    fn refresh_counts(&mut self) {
        for objective in self.roadmap.objectives.iter().filter(|o| !o.is_orphan()) {
            set_objective_task_count(&mut self.nodes, &objective.id, objective.tasks.len());
        }
        self.steps = count_all_tasks(&self.roadmap.objectives);
    }
}
