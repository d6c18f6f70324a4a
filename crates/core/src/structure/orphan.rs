#![forbid(unsafe_code)]

use crate::labels::{LabelKey, LabelResolver};
use crate::model::{ORPHAN_OBJECTIVE_ID, ORPHAN_ORDER_INDEX, Objective, Task};

use super::reindex_tasks;

pub fn is_orphan_objective(objective: &Objective) -> bool {
    objective.is_orphan()
}

pub fn find_orphan_objective(objectives: &[Objective]) -> Option<&Objective> {
    objectives.iter().find(|o| o.is_orphan())
}

/// The sentinel lives at the end of the list and is created on first use.
pub fn get_or_create_orphan_objective<'a>(
    objectives: &'a mut Vec<Objective>,
    labels: &dyn LabelResolver,
) -> &'a mut Objective {
    let idx = match objectives.iter().position(|o| o.is_orphan()) {
        Some(idx) => idx,
        None => {
            log::debug!("creating orphan objective");
            objectives.push(Objective {
                id: ORPHAN_OBJECTIVE_ID.to_string(),
                title: labels.resolve(LabelKey::OrphanObjectiveTitle),
                order_index: ORPHAN_ORDER_INDEX,
                ..Objective::default()
            });
            objectives.len() - 1
        }
    };
    &mut objectives[idx]
}

/// Takes a reconnected task out of the sentinel. The sentinel itself goes away once empty.
pub fn remove_task_from_orphan_objective(
    objectives: &mut Vec<Objective>,
    task_id: &str,
) -> Option<Task> {
    let idx = objectives.iter().position(|o| o.is_orphan())?;
    let orphan = &mut objectives[idx];
    let task_idx = orphan.tasks.iter().position(|t| t.id == task_id)?;
    let task = orphan.tasks.remove(task_idx);
    reindex_tasks(&mut orphan.tasks);
    if orphan.tasks.is_empty() {
        objectives.remove(idx);
    }
    Some(task)
}
