#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::connect::ConnectionRequest;
use crate::model::{NodeKind, Position};

/// One user action coming off the graph surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EditIntent {
    DropNode {
        id: String,
        kind: NodeKind,
        #[serde(default)]
        title: String,
        #[serde(default)]
        position: Position,
    },
    Connect(ConnectionRequest),
    Disconnect {
        edge_id: String,
    },
    DeleteNode {
        id: String,
    },
    RenameNode {
        id: String,
        title: String,
    },
    MoveNode {
        id: String,
        position: Position,
    },
    Relayout,
}

impl EditIntent {
    pub fn op(&self) -> &'static str {
        match self {
            Self::DropNode { .. } => "drop_node",
            Self::Connect(_) => "connect",
            Self::Disconnect { .. } => "disconnect",
            Self::DeleteNode { .. } => "delete_node",
            Self::RenameNode { .. } => "rename_node",
            Self::MoveNode { .. } => "move_node",
            Self::Relayout => "relayout",
        }
    }
}
