#![forbid(unsafe_code)]

use super::*;
use crate::model::{LayoutNode, NodeKind};
use crate::structure::{find_objective_by_id, find_task_by_id};

/// Overlays live roadmap text onto persisted nodes. Positions and visual fields are kept;
/// edges pass through unchanged.
pub fn rehydrate_layout(
    roadmap: &Roadmap,
    persisted: &Layout,
    is_editable: bool,
) -> Result<Layout, LayoutError> {
    let nodes = persisted
        .nodes
        .iter()
        .map(|node| rehydrate_node(roadmap, node, is_editable))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "rehydrated layout for roadmap {}: {} nodes, {} edges",
        roadmap.id,
        nodes.len(),
        persisted.edges.len()
    );
    Ok(Layout {
        nodes,
        edges: persisted.edges.clone(),
    })
}

fn rehydrate_node(
    roadmap: &Roadmap,
    node: &LayoutNode,
    is_editable: bool,
) -> Result<LayoutNode, LayoutError> {
    let mut out = node.clone();
    out.data.is_editable = is_editable;
    match node.kind {
        NodeKind::Objective => {
            let objective = find_objective_by_id(&roadmap.objectives, &node.id).ok_or_else(|| {
                LayoutError::MissingObjective {
                    node_id: node.id.clone(),
                }
            })?;
            out.data.title = objective.title.clone();
            out.data.description = objective.description.clone();
            out.data.total_tasks = Some(objective.tasks.len());
        }
        NodeKind::Task => {
            let task = find_task_by_id(&roadmap.objectives, &node.id).ok_or_else(|| {
                LayoutError::MissingTask {
                    node_id: node.id.clone(),
                }
            })?;
            out.data.title = task.title.clone();
        }
        NodeKind::Title => {
            out.data.title = roadmap.title.clone();
        }
    }
    Ok(out)
}
