#![forbid(unsafe_code)]

use serde::Serialize;

use crate::model::Roadmap;
use crate::structure::{chain_order, find_orphan_objective};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublishError {
    pub code: &'static str,
    pub message: String,
    pub key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublishCheck {
    pub ok: bool,
    pub objectives: usize,
    pub tasks: usize,
    pub errors: Vec<PublishError>,
}

/// Checks that a roadmap is complete enough to publish. The orphan objective only matters
/// when it still holds tasks.
pub fn check_ready_to_publish(roadmap: &Roadmap) -> PublishCheck {
    let mut errors = Vec::new();

    if roadmap.title.trim().is_empty() {
        errors.push(PublishError {
            code: "ROADMAP_TITLE_EMPTY",
            message: "roadmap title must not be empty".to_string(),
            key: roadmap.id.clone(),
        });
    }

    let chain = chain_order(&roadmap.objectives);
    if chain.is_empty() {
        errors.push(PublishError {
            code: "NO_OBJECTIVES",
            message: "roadmap needs at least one objective".to_string(),
            key: roadmap.id.clone(),
        });
    }

    for (idx, objective) in chain.iter().enumerate() {
        if objective.order_index != idx as i32 + 1 {
            errors.push(PublishError {
                code: "ORDER_INDEX_GAP",
                message: format!(
                    "objective order index is {} but should be {}",
                    objective.order_index,
                    idx + 1
                ),
                key: objective.id.clone(),
            });
        }
        if objective.title.trim().is_empty() {
            errors.push(PublishError {
                code: "OBJECTIVE_TITLE_EMPTY",
                message: "objective title must not be empty".to_string(),
                key: objective.id.clone(),
            });
        }
        for task in &objective.tasks {
            if task.title.trim().is_empty() {
                errors.push(PublishError {
                    code: "TASK_TITLE_EMPTY",
                    message: "task title must not be empty".to_string(),
                    key: task.id.clone(),
                });
            }
        }
    }

    if let Some(orphan) = find_orphan_objective(&roadmap.objectives) {
        if !orphan.tasks.is_empty() {
            errors.push(PublishError {
                code: "UNASSIGNED_TASKS",
                message: format!(
                    "{} task(s) are not connected to an objective",
                    orphan.tasks.len()
                ),
                key: orphan.id.clone(),
            });
        }
    }

    PublishCheck {
        ok: errors.is_empty(),
        objectives: chain.len(),
        tasks: chain.iter().map(|o| o.tasks.len()).sum(),
        errors,
    }
}
