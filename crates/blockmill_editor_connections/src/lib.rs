// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection layer for the `BlockMill` block canvas.
//!
//! This crate keeps track of every plug and socket ("connection") on the
//! canvas and answers the drag loop's question: which unconnected,
//! compatible connection is nearest to the point being dragged?
//!
//! ## Architecture
//!
//! - A minimal connection model: four fixed kinds, each with exactly one
//!   opposite kind it may attach to, identified by stable ids in a
//!   caller-owned arena
//! - One y-sorted handle list per kind, supporting ordered insertion,
//!   identity-based removal, and a radius-bounded nearest-neighbor scan
//! - A [`ConnectionIndex`] routing add/remove/move/search to the right list
//!
//! The index is deliberately one-dimensional: connections are sorted on y
//! only, which trades asymptotics for simplicity since per-canvas connection
//! counts are small. Everything is single-threaded and synchronous; the
//! editor's event loop owns all mutation.

pub mod connection;
pub mod index;
pub mod point;
pub mod sorted_list;

pub use connection::{Connection, ConnectionId, ConnectionKind, ConnectionMap, UnknownKindError};
pub use index::ConnectionIndex;
pub use point::WorkspacePoint;
pub use sorted_list::YSortedList;
