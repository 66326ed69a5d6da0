// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integer coordinates in workspace space.

use serde::{Deserialize, Serialize};

/// A point in workspace coordinates.
///
/// Block canvases measure in whole workspace units; view-space positions are
/// converted by the caller before they reach this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspacePoint {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl WorkspacePoint {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a point from its coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum, used to apply a parent-view offset.
    pub fn offset_by(self, offset: Self) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Self) -> f64 {
        f64::from(self.x - other.x).hypot(f64::from(self.y - other.y))
    }
}
