#![forbid(unsafe_code)]

//! Layout and structure engine for learning roadmaps.
//!
//! A roadmap is a chain of objectives, each holding ordered tasks. This crate turns that
//! domain model into a node/edge graph for an external graph surface and keeps the two in
//! sync while the user edits the graph.

pub mod connect;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod labels;
pub mod layout;
pub mod model;
pub mod publish;
pub mod structure;

pub use editor::{EditIntent, RoadmapEditor};
pub use error::{EditError, LayoutError, StructureError};
pub use labels::{DefaultLabels, LabelKey, LabelResolver};
pub use layout::build_roadmap_layout;
pub use model::{
    Handle, Layout, LayoutEdge, LayoutNode, NodeData, NodeKind, Objective, Position, Resource,
    Roadmap, Task,
};
