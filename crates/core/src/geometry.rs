#![forbid(unsafe_code)]

//! Text-driven node height estimates. The rendering surface wraps text at roughly
//! `CHARS_PER_LINE` characters, so heights are derived from line counts alone.

use crate::model::{Objective, Task};

pub const CHARS_PER_LINE: usize = 30;
pub const NODE_VERTICAL_PADDING: f64 = 32.0;
pub const TITLE_LINE_HEIGHT: f64 = 24.0;
pub const DESCRIPTION_LINE_HEIGHT: f64 = 20.0;
pub const TASK_COUNT_CAPTION_HEIGHT: f64 = 18.0;

pub fn line_count(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_LINE)
}

pub fn estimate_objective_height(objective: &Objective) -> f64 {
    let title_lines = line_count(&objective.title);
    let description_lines = objective.description.as_deref().map_or(0, line_count);
    NODE_VERTICAL_PADDING
        + title_lines as f64 * TITLE_LINE_HEIGHT
        + description_lines as f64 * DESCRIPTION_LINE_HEIGHT
        + TASK_COUNT_CAPTION_HEIGHT
}

pub fn estimate_task_height(task: &Task) -> f64 {
    NODE_VERTICAL_PADDING + line_count(&task.title) as f64 * TITLE_LINE_HEIGHT
}
