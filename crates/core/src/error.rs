#![forbid(unsafe_code)]

use crate::connect::ConnectionRejected;
use crate::ids::EntityIdError;

/// Rehydrating a persisted layout found a node whose domain entity no longer exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    MissingObjective { node_id: String },
    MissingTask { node_id: String },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingObjective { node_id } => {
                write!(f, "layout node references unknown objective (id={node_id})")
            }
            Self::MissingTask { node_id } => {
                write!(f, "layout node references unknown task (id={node_id})")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureError {
    UnknownObjective(String),
    UnknownTask(String),
}

impl std::fmt::Display for StructureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownObjective(id) => write!(f, "unknown objective (id={id})"),
            Self::UnknownTask(id) => write!(f, "unknown task (id={id})"),
        }
    }
}

impl std::error::Error for StructureError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    UnknownNode(String),
    UnknownEdge(String),
    DuplicateNode(String),
    InvalidId(EntityIdError),
    Rejected(ConnectionRejected),
    Structure(StructureError),
    Layout(LayoutError),
}

impl EditError {
    /// Stable machine-readable code for callers that report failures as data.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownNode(_) => "UNKNOWN_NODE",
            Self::UnknownEdge(_) => "UNKNOWN_EDGE",
            Self::DuplicateNode(_) => "DUPLICATE_NODE",
            Self::InvalidId(_) => "INVALID_ID",
            Self::Rejected(_) => "CONNECTION_REJECTED",
            Self::Structure(_) => "STRUCTURE",
            Self::Layout(_) => "LAYOUT",
        }
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node (id={id})"),
            Self::UnknownEdge(id) => write!(f, "unknown edge (id={id})"),
            Self::DuplicateNode(id) => write!(f, "node already exists (id={id})"),
            Self::InvalidId(err) => write!(f, "invalid id: {}", err.message()),
            Self::Rejected(reason) => write!(f, "connection rejected: {}", reason.message()),
            Self::Structure(err) => write!(f, "structure: {err}"),
            Self::Layout(err) => write!(f, "layout: {err}"),
        }
    }
}

impl std::error::Error for EditError {}

impl From<EntityIdError> for EditError {
    fn from(value: EntityIdError) -> Self {
        Self::InvalidId(value)
    }
}

impl From<ConnectionRejected> for EditError {
    fn from(value: ConnectionRejected) -> Self {
        Self::Rejected(value)
    }
}

impl From<StructureError> for EditError {
    fn from(value: StructureError) -> Self {
        Self::Structure(value)
    }
}

impl From<LayoutError> for EditError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}
