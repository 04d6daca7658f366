//! Bring back minor rooms crossed by corridors

use log::debug;

use crate::geometry::Rect;

use super::room::{Room, RoomKind};

/// Reactivates minor rooms touching any corridor or elbow
///
/// Single pass: a room brought back does not in turn bring back its
/// neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinorRoomReactivator;

impl MinorRoomReactivator {
    /// Returns the number of rooms reactivated
    pub fn reactivate(&self, rooms: &mut [Room]) -> usize {
        let passages: Vec<Rect> = rooms
            .iter()
            .filter(|r| r.kind.is_passage())
            .map(Room::rect)
            .collect();

        let mut count = 0;
        for room in rooms.iter_mut().filter(|r| !r.active && r.kind == RoomKind::Minor) {
            let rect = room.rect();
            if passages.iter().any(|p| p.touches(&rect)) {
                room.active = true;
                count += 1;
            }
        }

        debug!("{} minor rooms reactivated by corridors", count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minor(id: u32, x: i32, y: i32, w: i32, h: i32) -> Room {
        let mut room = Room::with_kind(id, Rect::new(x, y, w, h), RoomKind::Minor);
        room.active = false;
        room
    }

    #[test]
    fn test_touching_counts() {
        let mut rooms = vec![
            Room::with_kind(0, Rect::new(0, 0, 10, 2), RoomKind::Corridor),
            minor(1, 10, 0, 3, 3),
            minor(2, 4, 2, 3, 3),
            minor(3, 11, 0, 3, 3),
        ];
        let count = MinorRoomReactivator.reactivate(&mut rooms);

        assert_eq!(count, 2);
        assert!(rooms[1].active);
        assert!(rooms[2].active);
        assert!(!rooms[3].active);
    }

    #[test]
    fn test_single_pass_only() {
        // Room 2 touches only room 1, which touches the elbow.
        let mut rooms = vec![
            Room::with_kind(0, Rect::new(0, 0, 2, 2), RoomKind::Elbow),
            minor(1, 2, 0, 4, 4),
            minor(2, 6, 0, 4, 4),
        ];
        assert_eq!(MinorRoomReactivator.reactivate(&mut rooms), 1);
        assert!(rooms[1].active);
        assert!(!rooms[2].active);
    }

    #[test]
    fn test_main_rooms_do_not_reactivate() {
        let mut rooms = vec![
            Room::with_kind(0, Rect::new(0, 0, 8, 8), RoomKind::Main),
            minor(1, 8, 0, 4, 4),
        ];
        assert_eq!(MinorRoomReactivator.reactivate(&mut rooms), 0);
        assert!(!rooms[1].active);
    }
}
