#![forbid(unsafe_code)]

//! Roadmap -> node/edge layout.
//!
//! Objectives form one vertical chain at `x = 0`. Each objective's tasks are split into a
//! left and a right column at `x = ∓(NODE_WIDTH + COLUMN_GAP)`. A roadmap that already carries
//! persisted nodes keeps their positions and only has its live text overlaid.

mod dynamic;
mod rehydrate;

pub use dynamic::*;
pub use rehydrate::*;

use crate::error::LayoutError;
use crate::model::{Layout, Roadmap};

pub const NODE_WIDTH: f64 = 250.0;
pub const COLUMN_GAP: f64 = 100.0;
pub const TASK_COLUMN_OFFSET: f64 = NODE_WIDTH + COLUMN_GAP;
pub const OBJECTIVE_GAP: f64 = 75.0;
pub const TASK_SPACING: f64 = 25.0;
/// Tasks parked on the orphan objective are stacked here, clear of both task columns.
pub const ORPHAN_COLUMN_X: f64 = 2.0 * TASK_COLUMN_OFFSET;

pub const OBJECTIVE_FONT_SIZE: u32 = 16;
pub const TASK_FONT_SIZE: u32 = 14;
pub const OBJECTIVE_BACKGROUND: &str = "#E3F2FD";
pub const TASK_BACKGROUND: &str = "#FFFFFF";

pub fn build_roadmap_layout(roadmap: &Roadmap, is_editable: bool) -> Result<Layout, LayoutError> {
    match roadmap.layout.as_ref().filter(|layout| !layout.nodes.is_empty()) {
        Some(persisted) => rehydrate_layout(roadmap, persisted, is_editable),
        None => Ok(build_dynamic_layout(roadmap, is_editable)),
    }
}
