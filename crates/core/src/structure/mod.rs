#![forbid(unsafe_code)]

//! Objective/task bookkeeping for the roadmap editor.
//!
//! Functions taking `&mut` are commands: they edit the passed collection in place and leave
//! every `order_index` dense (1..n) before returning. Everything else is a query.

mod orphan;

pub use orphan::*;

use crate::error::StructureError;
use crate::model::{ORPHAN_ORDER_INDEX, Objective, Task};

pub fn reindex_objectives(objectives: &mut [Objective]) {
    let mut next = 1;
    for objective in objectives.iter_mut() {
        if objective.is_orphan() {
            objective.order_index = ORPHAN_ORDER_INDEX;
            continue;
        }
        objective.order_index = next;
        next += 1;
    }
}

pub fn reindex_tasks(tasks: &mut [Task]) {
    for (idx, task) in tasks.iter_mut().enumerate() {
        task.order_index = idx as i32 + 1;
    }
}

fn objective_index(objectives: &[Objective], id: &str) -> Result<usize, StructureError> {
    objectives
        .iter()
        .position(|o| o.id == id)
        .ok_or_else(|| StructureError::UnknownObjective(id.to_string()))
}

fn insert_objective_at(objectives: &mut Vec<Objective>, objective: Objective, at: usize) {
    log::debug!("insert objective {} at {at}", objective.id);
    objectives.insert(at, objective);
    reindex_objectives(objectives);
}

/// Inserts `objective` next to `target_id`: before it when the target heads the chain,
/// after it otherwise.
pub fn insert_objective_relative_to_target(
    objectives: &mut Vec<Objective>,
    objective: Objective,
    target_id: &str,
) -> Result<(), StructureError> {
    let target_idx = objective_index(objectives, target_id)?;
    let head_idx = objectives.iter().position(|o| !o.is_orphan());
    let at = if head_idx == Some(target_idx) {
        target_idx
    } else {
        target_idx + 1
    };
    insert_objective_at(objectives, objective, at);
    Ok(())
}

pub fn insert_objective_before(
    objectives: &mut Vec<Objective>,
    objective: Objective,
    anchor_id: &str,
) -> Result<(), StructureError> {
    let at = objective_index(objectives, anchor_id)?;
    insert_objective_at(objectives, objective, at);
    Ok(())
}

pub fn insert_objective_after(
    objectives: &mut Vec<Objective>,
    objective: Objective,
    anchor_id: &str,
) -> Result<(), StructureError> {
    let at = objective_index(objectives, anchor_id)? + 1;
    insert_objective_at(objectives, objective, at);
    Ok(())
}

/// Moves the objectives named in `run` so they follow `anchor_id` directly, keeping the order
/// of `run`. Ids not in the list and the anchor itself are skipped.
pub fn move_objectives_after(
    objectives: &mut Vec<Objective>,
    run: &[&str],
    anchor_id: &str,
) -> Result<(), StructureError> {
    objective_index(objectives, anchor_id)?;
    let mut moved = Vec::with_capacity(run.len());
    for id in run.iter().filter(|id| **id != anchor_id) {
        if let Some(idx) = objectives.iter().position(|o| o.id == *id && !o.is_orphan()) {
            moved.push(objectives.remove(idx));
        }
    }
    let at = objective_index(objectives, anchor_id)? + 1;
    log::debug!("move {} objective(s) after {anchor_id}", moved.len());
    for (offset, objective) in moved.into_iter().enumerate() {
        objectives.insert(at + offset, objective);
    }
    reindex_objectives(objectives);
    Ok(())
}

/// Appends to the end of the real chain, ahead of the orphan sentinel if there is one.
pub fn append_objective(objectives: &mut Vec<Objective>, objective: Objective) {
    let insert_at = objectives
        .iter()
        .position(Objective::is_orphan)
        .unwrap_or(objectives.len());
    objectives.insert(insert_at, objective);
    reindex_objectives(objectives);
}

pub fn remove_objective(objectives: &mut Vec<Objective>, objective_id: &str) -> Option<Objective> {
    let idx = objectives.iter().position(|o| o.id == objective_id)?;
    let removed = objectives.remove(idx);
    reindex_objectives(objectives);
    Some(removed)
}

/// Returns `false` when a task with the same id is already present.
pub fn add_task_to_objective(objective: &mut Objective, task: Task) -> bool {
    if objective.tasks.iter().any(|t| t.id == task.id) {
        return false;
    }
    objective.tasks.push(task);
    reindex_tasks(&mut objective.tasks);
    true
}

pub fn remove_task_from_objective(objective: &mut Objective, task_id: &str) -> Option<Task> {
    let idx = objective.tasks.iter().position(|t| t.id == task_id)?;
    let removed = objective.tasks.remove(idx);
    reindex_tasks(&mut objective.tasks);
    Some(removed)
}

/// Detaches a task from whichever objective holds it and appends it to `to_objective_id`.
pub fn move_task(
    objectives: &mut [Objective],
    task_id: &str,
    to_objective_id: &str,
) -> Result<(), StructureError> {
    if find_objective_by_id(objectives, to_objective_id).is_none() {
        return Err(StructureError::UnknownObjective(to_objective_id.to_string()));
    }
    let task = objectives
        .iter_mut()
        .find_map(|o| remove_task_from_objective(o, task_id))
        .ok_or_else(|| StructureError::UnknownTask(task_id.to_string()))?;
    let target = find_objective_by_id_mut(objectives, to_objective_id)
        .ok_or_else(|| StructureError::UnknownObjective(to_objective_id.to_string()))?;
    add_task_to_objective(target, task);
    Ok(())
}

pub fn count_all_tasks(objectives: &[Objective]) -> usize {
    objectives.iter().map(|o| o.tasks.len()).sum()
}

pub fn find_objective_by_id<'a>(objectives: &'a [Objective], id: &str) -> Option<&'a Objective> {
    objectives.iter().find(|o| o.id == id)
}

pub fn find_objective_by_id_mut<'a>(
    objectives: &'a mut [Objective],
    id: &str,
) -> Option<&'a mut Objective> {
    objectives.iter_mut().find(|o| o.id == id)
}

pub fn find_task_by_id<'a>(objectives: &'a [Objective], task_id: &str) -> Option<&'a Task> {
    objectives
        .iter()
        .flat_map(|o| o.tasks.iter())
        .find(|t| t.id == task_id)
}

pub fn find_task_by_id_mut<'a>(
    objectives: &'a mut [Objective],
    task_id: &str,
) -> Option<&'a mut Task> {
    objectives
        .iter_mut()
        .flat_map(|o| o.tasks.iter_mut())
        .find(|t| t.id == task_id)
}

pub fn find_parent_objective_of_task<'a>(
    objectives: &'a [Objective],
    task_id: &str,
) -> Option<&'a Objective> {
    objectives
        .iter()
        .find(|o| o.tasks.iter().any(|t| t.id == task_id))
}

/// Real objectives sorted by `order_index`; the orphan sentinel is left out.
pub fn chain_order(objectives: &[Objective]) -> Vec<&Objective> {
    let mut chain = objectives
        .iter()
        .filter(|o| !o.is_orphan())
        .collect::<Vec<_>>();
    chain.sort_by_key(|o| o.order_index);
    chain
}
