// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (attachment point) definitions for the block canvas.

use crate::point::WorkspacePoint;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The four kinds of attachment point a block can carry.
///
/// Each kind connects to exactly one opposite kind: the vertical statement
/// pair (`Previous`/`Next`) and the horizontal value pair (`Input`/`Output`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// Socket on top of a statement block
    Previous,
    /// Plug on the bottom of a statement block
    Next,
    /// Socket on a value slot
    Input,
    /// Plug on a value block
    Output,
}

impl ConnectionKind {
    /// All kinds, in wire-code order.
    pub const ALL: [Self; 4] = [Self::Previous, Self::Next, Self::Input, Self::Output];

    /// The one kind this kind may connect to.
    pub fn opposite(self) -> Self {
        match self {
            Self::Previous => Self::Next,
            Self::Next => Self::Previous,
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }

    /// Integer code used in the serialized editor format.
    pub fn code(self) -> u8 {
        match self {
            Self::Previous => 0,
            Self::Next => 1,
            Self::Input => 2,
            Self::Output => 3,
        }
    }
}

impl TryFrom<u8> for ConnectionKind {
    type Error = UnknownKindError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Previous),
            1 => Ok(Self::Next),
            2 => Ok(Self::Input),
            3 => Ok(Self::Output),
            other => Err(UnknownKindError(other)),
        }
    }
}

/// Error when decoding a connection kind code
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown connection kind code: {0}")]
pub struct UnknownKindError(pub u8);

/// An attachment point on a block.
///
/// This is the capability surface the proximity index needs: a kind, a
/// mutable workspace position, the connected/drag predicates, and a distance
/// function. The block model that owns these decides what connecting
/// actually means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Kind of attachment point
    pub kind: ConnectionKind,
    /// Position in workspace coordinates
    pub position: WorkspacePoint,
    /// The connection this one is attached to, if any
    pub target: Option<ConnectionId>,
    /// Whether the owning block is currently being dragged
    pub drag_mode: bool,
}

impl Connection {
    /// Create a new unconnected connection.
    pub fn new(kind: ConnectionKind, position: WorkspacePoint) -> Self {
        Self {
            id: ConnectionId::new(),
            kind,
            position,
            target: None,
            drag_mode: false,
        }
    }

    /// Whether this connection is attached to another one.
    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the owning block is in an active drag gesture.
    pub fn in_drag_mode(&self) -> bool {
        self.drag_mode
    }

    /// Euclidean distance to another connection.
    pub fn distance_from(&self, other: &Connection) -> f64 {
        self.position.distance_to(other.position)
    }
}

/// Identity-preserving arena of connections, owned by the workspace model.
///
/// The proximity index stores only [`ConnectionId`] handles and reads live
/// positions through a borrowed map, so it never owns or destroys a
/// connection.
pub type ConnectionMap = IndexMap<ConnectionId, Connection>;
