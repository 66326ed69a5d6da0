// SPDX-License-Identifier: MIT OR Apache-2.0
//! Proximity index over all connections on the block canvas.

use crate::connection::{ConnectionId, ConnectionKind, ConnectionMap};
use crate::point::WorkspacePoint;
use crate::sorted_list::YSortedList;

/// Kind-partitioned proximity index for the connections of one workspace.
///
/// Keeps one [`YSortedList`] per [`ConnectionKind`] so that the drag loop
/// can ask, once per pointer-move frame, which unconnected opposite-kind
/// connection is nearest to the point being dragged. Connections live in the
/// caller's [`ConnectionMap`]; the index stores handles only and never
/// destroys a connection.
#[derive(Debug, Default)]
pub struct ConnectionIndex {
    previous: YSortedList,
    next: YSortedList,
    input: YSortedList,
    output: YSortedList,
}

impl ConnectionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a connection into the list for its kind.
    ///
    /// No-op if the id is not in the map.
    pub fn add(&mut self, conns: &ConnectionMap, id: ConnectionId) {
        let Some(conn) = conns.get(&id) else {
            return;
        };
        tracing::trace!("Indexing {:?} connection {:?}", conn.kind, id);
        self.list_mut(conn.kind).insert(conns, id);
    }

    /// Remove a connection from the list for its kind.
    ///
    /// Silent no-op if the connection is not indexed.
    pub fn remove(&mut self, conns: &ConnectionMap, id: ConnectionId) {
        let Some(conn) = conns.get(&id) else {
            return;
        };
        tracing::trace!("Unindexing {:?} connection {:?}", conn.kind, id);
        self.list_mut(conn.kind).remove(conns, id);
    }

    /// Move a connection to `new_location + offset` and keep its list
    /// ordered, where `offset` is usually the owning block view's position
    /// in the workspace view.
    ///
    /// While the connection is in drag mode only its position is updated;
    /// reordering is deferred so that every other pointer frame stays cheap.
    /// Order is restored by the first non-drag move, or by the caller
    /// removing the connection before the drag and re-adding it after (the
    /// dragger does the latter). The index never resorts on its own.
    pub fn move_connection_to(
        &mut self,
        conns: &mut ConnectionMap,
        id: ConnectionId,
        new_location: WorkspacePoint,
        offset: WorkspacePoint,
    ) {
        let target = new_location.offset_by(offset);
        self.move_to(conns, id, target.x, target.y);
    }

    fn move_to(&mut self, conns: &mut ConnectionMap, id: ConnectionId, new_x: i32, new_y: i32) {
        let target = WorkspacePoint::new(new_x, new_y);
        let Some(conn) = conns.get(&id) else {
            return;
        };
        // Avoid list traversals if it is not actually moving.
        if conn.position == target {
            return;
        }
        if conn.in_drag_mode() {
            if let Some(conn) = conns.get_mut(&id) {
                conn.position = target;
            }
        } else {
            self.remove(conns, id);
            if let Some(conn) = conns.get_mut(&id) {
                conn.position = target;
            }
            self.add(conns, id);
        }
    }

    /// Find the closest compatible connection within `max_radius`.
    ///
    /// Returns `None` when the source connection is already connected, and
    /// otherwise searches the list of the opposite kind. Candidates are
    /// gated on distance only.
    pub fn closest_connection(
        &self,
        conns: &ConnectionMap,
        id: ConnectionId,
        max_radius: f64,
    ) -> Option<ConnectionId> {
        let conn = conns.get(&id)?;
        if conn.is_connected() {
            // Don't offer to connect when already connected.
            return None;
        }
        self.list(conn.kind.opposite())
            .search_for_closest(conns, id, max_radius)
    }

    /// Empty all four lists.
    pub fn clear(&mut self) {
        tracing::debug!("Clearing connection index");
        self.previous.clear();
        self.next.clear();
        self.input.clear();
        self.output.clear();
    }

    /// The list holding connections of the given kind.
    ///
    /// Read access for tests and diagnostics.
    pub fn connections_of_kind(&self, kind: ConnectionKind) -> &YSortedList {
        self.list(kind)
    }

    fn list(&self, kind: ConnectionKind) -> &YSortedList {
        match kind {
            ConnectionKind::Previous => &self.previous,
            ConnectionKind::Next => &self.next,
            ConnectionKind::Input => &self.input,
            ConnectionKind::Output => &self.output,
        }
    }

    fn list_mut(&mut self, kind: ConnectionKind) -> &mut YSortedList {
        match kind {
            ConnectionKind::Previous => &mut self.previous,
            ConnectionKind::Next => &mut self.next,
            ConnectionKind::Input => &mut self.input,
            ConnectionKind::Output => &mut self.output,
        }
    }
}
