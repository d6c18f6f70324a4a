#![forbid(unsafe_code)]

use super::*;
use crate::geometry::{estimate_objective_height, estimate_task_height};
use crate::model::{Handle, LayoutEdge, LayoutNode, NodeData, NodeKind, Objective, Position, Task};
use crate::structure::{chain_order, find_orphan_objective};

/// Vertical band reserved for one objective and its two task columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectiveBlock {
    pub top_y: f64,
    pub height: f64,
    pub objective_y: f64,
    pub objective_height: f64,
}

impl ObjectiveBlock {
    pub fn bottom_y(&self) -> f64 {
        self.top_y + self.height
    }
}

/// First `ceil(n/2)` tasks go left, the rest go right. Order is preserved on both sides.
pub fn split_tasks(tasks: &[Task]) -> (&[Task], &[Task]) {
    tasks.split_at(tasks.len().div_ceil(2))
}

/// Sum of task heights plus spacing between neighbours (none after the last).
pub fn column_height(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let heights: f64 = tasks.iter().map(estimate_task_height).sum();
    heights + TASK_SPACING * (tasks.len() - 1) as f64
}

pub fn objective_block(objective: &Objective, previous_bottom_y: f64) -> ObjectiveBlock {
    let (left, right) = split_tasks(&objective.tasks);
    let objective_height = estimate_objective_height(objective);
    let top_y = previous_bottom_y + OBJECTIVE_GAP;
    let height = objective_height.max(column_height(left).max(column_height(right)));
    let center_y = top_y + height / 2.0;
    ObjectiveBlock {
        top_y,
        height,
        objective_y: center_y - objective_height / 2.0,
        objective_height,
    }
}

pub fn objective_node(
    objective: &Objective,
    position: Position,
    height: f64,
    is_editable: bool,
) -> LayoutNode {
    LayoutNode::new(
        objective.id.clone(),
        NodeKind::Objective,
        position,
        NodeData {
            title: objective.title.clone(),
            description: objective.description.clone(),
            total_tasks: Some(objective.tasks.len()),
            font_size: Some(OBJECTIVE_FONT_SIZE),
            background_color: Some(OBJECTIVE_BACKGROUND.to_string()),
            width: Some(NODE_WIDTH),
            height: Some(height),
            is_editable,
        },
    )
}

pub fn task_node(task: &Task, position: Position, height: f64, is_editable: bool) -> LayoutNode {
    LayoutNode::new(
        task.id.clone(),
        NodeKind::Task,
        position,
        NodeData {
            title: task.title.clone(),
            description: task.description.clone(),
            total_tasks: None,
            font_size: Some(TASK_FONT_SIZE),
            background_color: Some(TASK_BACKGROUND.to_string()),
            width: Some(NODE_WIDTH),
            height: Some(height),
            is_editable,
        },
    )
}

/// Stacks `tasks` downward from `top_y`, returning the task nodes in order.
fn place_column(tasks: &[Task], x: f64, top_y: f64, is_editable: bool) -> Vec<LayoutNode> {
    let mut y = top_y;
    let mut out = Vec::with_capacity(tasks.len());
    for task in tasks {
        let height = estimate_task_height(task);
        out.push(task_node(task, Position::new(x, y), height, is_editable));
        y += height + TASK_SPACING;
    }
    out
}

/// Lays a roadmap out from scratch. Pure function of the objective/task order.
pub fn build_dynamic_layout(roadmap: &Roadmap, is_editable: bool) -> Layout {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut previous_bottom_y = 0.0;
    let mut previous_id: Option<&str> = None;

    for objective in chain_order(&roadmap.objectives) {
        let (left, right) = split_tasks(&objective.tasks);
        let block = objective_block(objective, previous_bottom_y);

        nodes.push(objective_node(
            objective,
            Position::new(0.0, block.objective_y),
            block.objective_height,
            is_editable,
        ));
        nodes.extend(place_column(left, -TASK_COLUMN_OFFSET, block.top_y, is_editable));
        nodes.extend(place_column(right, TASK_COLUMN_OFFSET, block.top_y, is_editable));

        for task in left {
            edges.push(LayoutEdge::between(
                &objective.id,
                Handle::Left,
                &task.id,
                Handle::Right,
            ));
        }
        for task in right {
            edges.push(LayoutEdge::between(
                &objective.id,
                Handle::Right,
                &task.id,
                Handle::Left,
            ));
        }
        if let Some(previous) = previous_id {
            edges.push(LayoutEdge::between(
                previous,
                Handle::Bottom,
                &objective.id,
                Handle::Top,
            ));
        }

        previous_bottom_y = block.bottom_y();
        previous_id = Some(objective.id.as_str());
    }

    if let Some(orphan) = find_orphan_objective(&roadmap.objectives) {
        nodes.extend(place_column(&orphan.tasks, ORPHAN_COLUMN_X, 0.0, is_editable));
    }

    log::debug!(
        "dynamic layout for roadmap {}: {} nodes, {} edges",
        roadmap.id,
        nodes.len(),
        edges.len()
    );
    Layout { nodes, edges }
}
