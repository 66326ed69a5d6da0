// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence of connections kept sorted by y coordinate.

use crate::connection::{ConnectionId, ConnectionMap};

/// List of connection handles ordered by y position.
///
/// Optimized for quickly finding the nearest connection while a block is
/// being dragged. Connections are not ordered on x, and several connections
/// may share the same y position. Positions are read live through the
/// [`ConnectionMap`] passed into each call; every id stored here must be
/// present in that map.
#[derive(Debug, Default, Clone)]
pub struct YSortedList {
    ids: Vec<ConnectionId>,
}

impl YSortedList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the given connection, preserving y order.
    pub fn insert(&mut self, conns: &ConnectionMap, id: ConnectionId) {
        let index = self.insertion_index(conns, conns[&id].position.y);
        self.ids.insert(index, id);
    }

    /// Remove the given connection. Silent no-op when it is not present;
    /// callers remove speculatively and rely on that.
    pub fn remove(&mut self, conns: &ConnectionMap, id: ConnectionId) {
        if let Some(index) = self.find_index(conns, id) {
            self.ids.remove(index);
        }
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Ordered position of the given connection, or `None` if absent.
    ///
    /// Binary search lands somewhere in the equal-y band, then the band is
    /// scanned outward in both directions testing identity.
    pub fn find_index(&self, conns: &ConnectionMap, id: ConnectionId) -> Option<usize> {
        if self.ids.is_empty() {
            return None;
        }
        let y = conns.get(&id)?.position.y;
        let guess = self.insertion_index(conns, y);
        if guess >= self.ids.len() {
            return None;
        }

        for i in (0..=guess).rev() {
            if self.y_at(conns, i) != y {
                break;
            }
            if self.ids[i] == id {
                return Some(i);
            }
        }
        for i in guess + 1..self.ids.len() {
            if self.y_at(conns, i) != y {
                break;
            }
            if self.ids[i] == id {
                return Some(i);
            }
        }
        None
    }

    /// Closest connection to `target_id` within `max_radius`, or `None`.
    ///
    /// Locates the target's y in the list, then walks down and up while the
    /// visited y stays within the radius band, tightening the running best
    /// radius with each accepted candidate. The acceptance test is
    /// distance-only; a candidate that is itself already connected is still
    /// offered.
    // TODO: skip candidates whose own target is occupied once the block
    // model exposes that here.
    pub fn search_for_closest(
        &self,
        conns: &ConnectionMap,
        target_id: ConnectionId,
        max_radius: f64,
    ) -> Option<ConnectionId> {
        if self.ids.is_empty() {
            return None;
        }
        let target = conns.get(&target_id)?;
        let base_y = target.position.y;
        // The insertion index may be one past the end of the list.
        let start = self.insertion_index(conns, base_y).min(self.ids.len() - 1);

        let mut best: Option<ConnectionId> = None;
        let mut best_radius = max_radius;
        let mut consider = |id: ConnectionId| {
            let distance = target.distance_from(&conns[&id]);
            // Exclusive against the caller's radius, inclusive once a
            // running best exists; an equal-distance candidate visited
            // later replaces the best. The two comparisons are
            // deliberately different.
            let allowed = match best {
                None => distance < best_radius,
                Some(_) => distance <= best_radius,
            };
            if allowed {
                best = Some(id);
                best_radius = distance;
            }
        };

        // Everything below the start index has y < base_y, so the downward
        // walk only bounds how far below the band it has gone. The start
        // element itself may sit above the band; the distance test rejects
        // it.
        for i in (0..=start).rev() {
            if f64::from(base_y - self.y_at(conns, i)) > max_radius {
                break;
            }
            consider(self.ids[i]);
        }
        for i in start + 1..self.ids.len() {
            if f64::from(self.y_at(conns, i) - base_y) > max_radius {
                break;
            }
            consider(self.ids[i]);
        }
        best
    }

    /// Whether the list holds the given connection.
    pub fn contains(&self, conns: &ConnectionMap, id: ConnectionId) -> bool {
        self.find_index(conns, id).is_some()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of connections in the list.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Connection handle at the given ordered position.
    pub fn get(&self, index: usize) -> Option<ConnectionId> {
        self.ids.get(index).copied()
    }

    /// Candidate slot for inserting a connection with the given y.
    ///
    /// In y order but with no guarantee about order within an equal-y band:
    /// the search breaks on the first equal y it probes. Empty list yields 0
    /// and a y greater than every element yields `len`.
    fn insertion_index(&self, conns: &ConnectionMap, y: i32) -> usize {
        let mut min = 0;
        let mut max = self.ids.len();
        while min < max {
            let mid = (min + max) / 2;
            let mid_y = self.y_at(conns, mid);
            if mid_y < y {
                min = mid + 1;
            } else if mid_y > y {
                max = mid;
            } else {
                min = mid;
                break;
            }
        }
        min
    }

    fn y_at(&self, conns: &ConnectionMap, index: usize) -> i32 {
        conns[&self.ids[index]].position.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Connection, ConnectionKind};
    use crate::point::WorkspacePoint;

    fn add(conns: &mut ConnectionMap, list: &mut YSortedList, x: i32, y: i32) -> ConnectionId {
        let conn = Connection::new(ConnectionKind::Input, WorkspacePoint::new(x, y));
        let id = conn.id;
        conns.insert(id, conn);
        list.insert(conns, id);
        id
    }

    fn ys(conns: &ConnectionMap, list: &YSortedList) -> Vec<i32> {
        (0..list.len())
            .map(|i| conns[&list.get(i).unwrap()].position.y)
            .collect()
    }

    fn ids(list: &YSortedList) -> Vec<ConnectionId> {
        (0..list.len()).map(|i| list.get(i).unwrap()).collect()
    }

    #[test]
    fn test_insert_into_empty() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        assert!(list.is_empty());
        let id = add(&mut conns, &mut list, 0, 42);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Some(id));
    }

    #[test]
    fn test_insert_keeps_y_order() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        for y in [5, 1, 3, 2, 9, 0, 3, -4] {
            add(&mut conns, &mut list, 0, y);
        }
        assert_eq!(ys(&conns, &list), vec![-4, 0, 1, 2, 3, 3, 5, 9]);
    }

    #[test]
    fn test_insert_tie_lands_in_band() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        for y in [10, 10, 20, 30] {
            add(&mut conns, &mut list, 0, y);
        }
        let id = add(&mut conns, &mut list, 7, 10);
        assert_eq!(ys(&conns, &list), vec![10, 10, 10, 20, 30]);
        let index = list.find_index(&conns, id).unwrap();
        assert!(index < 3, "tie insert left the equal-y band: {index}");
    }

    #[test]
    fn test_find_index_among_ties() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        let mut inserted = Vec::new();
        for x in 0..6 {
            inserted.push(add(&mut conns, &mut list, x, 15));
        }
        add(&mut conns, &mut list, 0, 5);
        add(&mut conns, &mut list, 0, 25);
        for id in inserted {
            let index = list.find_index(&conns, id).unwrap();
            assert_eq!(list.get(index), Some(id));
        }
    }

    #[test]
    fn test_find_index_absent() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        add(&mut conns, &mut list, 0, 10);

        // In the map but never inserted into the list.
        let stray = Connection::new(ConnectionKind::Input, WorkspacePoint::new(0, 10));
        let stray_id = stray.id;
        conns.insert(stray_id, stray);
        assert_eq!(list.find_index(&conns, stray_id), None);
        assert!(!list.contains(&conns, stray_id));

        // Not even in the map.
        assert_eq!(list.find_index(&conns, ConnectionId::new()), None);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        add(&mut conns, &mut list, 0, 10);
        list.remove(&conns, ConnectionId::new());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        for y in [10, 10, 20, 30] {
            add(&mut conns, &mut list, 0, y);
        }
        let before = ids(&list);
        let id = add(&mut conns, &mut list, 3, 10);
        list.remove(&conns, id);
        assert_eq!(ids(&list), before);
    }

    #[test]
    fn test_closest_empty_is_none() {
        let mut conns = ConnectionMap::new();
        let list = YSortedList::new();
        let target = Connection::new(ConnectionKind::Output, WorkspacePoint::ZERO);
        let target_id = target.id;
        conns.insert(target_id, target);
        assert_eq!(list.search_for_closest(&conns, target_id, 100.0), None);
    }

    #[test]
    fn test_closest_y_band_example() {
        // ys {10, 10, 20, 30}, searching from y = 21 with radius 5: only the
        // y = 20 element is in the band.
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        for y in [10, 10, 30] {
            add(&mut conns, &mut list, 0, y);
        }
        let in_band = add(&mut conns, &mut list, 0, 20);

        let target = Connection::new(ConnectionKind::Output, WorkspacePoint::new(0, 21));
        let target_id = target.id;
        conns.insert(target_id, target);

        assert_eq!(
            list.search_for_closest(&conns, target_id, 5.0),
            Some(in_band)
        );
    }

    #[test]
    fn test_closest_band_element_too_far_on_x() {
        // Same band as above, but the y = 20 element is 10 units away on x,
        // putting its true distance past the radius.
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        for y in [10, 10, 30] {
            add(&mut conns, &mut list, 0, y);
        }
        add(&mut conns, &mut list, 10, 20);

        let target = Connection::new(ConnectionKind::Output, WorkspacePoint::new(0, 21));
        let target_id = target.id;
        conns.insert(target_id, target);

        assert_eq!(list.search_for_closest(&conns, target_id, 5.0), None);
    }

    #[test]
    fn test_closest_initial_radius_is_exclusive() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        add(&mut conns, &mut list, 0, 5);

        let target = Connection::new(ConnectionKind::Output, WorkspacePoint::ZERO);
        let target_id = target.id;
        conns.insert(target_id, target);

        // Exactly at the radius: rejected.
        assert_eq!(list.search_for_closest(&conns, target_id, 5.0), None);
        assert!(list.search_for_closest(&conns, target_id, 5.1).is_some());
    }

    #[test]
    fn test_closest_equal_distance_later_visit_wins() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        // Both at distance 5 from the origin, same y, so the upward scan
        // visits index 1 after the downward scan accepted index 0.
        add(&mut conns, &mut list, 3, 4);
        add(&mut conns, &mut list, -3, 4);

        let target = Connection::new(ConnectionKind::Output, WorkspacePoint::ZERO);
        let target_id = target.id;
        conns.insert(target_id, target);

        assert_eq!(
            list.search_for_closest(&conns, target_id, 6.0),
            list.get(1)
        );
    }

    #[test]
    fn test_closest_picks_true_nearest() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        add(&mut conns, &mut list, 0, 4);
        let nearest = add(&mut conns, &mut list, 0, -2);
        add(&mut conns, &mut list, 1, 8);

        let target = Connection::new(ConnectionKind::Output, WorkspacePoint::ZERO);
        let target_id = target.id;
        conns.insert(target_id, target);

        assert_eq!(
            list.search_for_closest(&conns, target_id, 10.0),
            Some(nearest)
        );
    }

    #[test]
    fn test_clear() {
        let mut conns = ConnectionMap::new();
        let mut list = YSortedList::new();
        for y in [1, 2, 3] {
            add(&mut conns, &mut list, 0, y);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.get(0), None);
    }
}
