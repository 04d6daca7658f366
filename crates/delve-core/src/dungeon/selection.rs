//! Main room classification

use log::debug;

use super::room::{Room, RoomKind};

/// Splits rooms into main rooms and (inactive) minor rooms by area
#[derive(Debug, Clone, Copy)]
pub struct MainRoomSelector {
    area_threshold: f64,
}

impl MainRoomSelector {
    pub fn new(area_threshold: f64) -> Self {
        Self { area_threshold }
    }

    pub fn area_threshold(&self) -> f64 {
        self.area_threshold
    }

    /// Mark rooms main or minor; returns the ids of the main rooms
    pub fn select(&self, rooms: &mut [Room]) -> Vec<u32> {
        let mut main = Vec::new();
        for room in rooms.iter_mut() {
            if room.area() as f64 >= self.area_threshold {
                room.kind = RoomKind::Main;
                room.active = true;
                main.push(room.id);
            } else {
                room.kind = RoomKind::Minor;
                room.active = false;
            }
        }
        debug!(
            "{} of {} rooms reach the main area threshold {:.1}",
            main.len(),
            rooms.len(),
            self.area_threshold
        );
        main
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let mut rooms = vec![
            Room::new(0, 0.0, 0.0, 10, 10),
            Room::new(1, 20.0, 0.0, 9, 11),
            Room::new(2, 40.0, 0.0, 20, 5),
            Room::new(3, 60.0, 0.0, 4, 4),
        ];
        let main = MainRoomSelector::new(100.0).select(&mut rooms);

        assert_eq!(main, vec![0, 2]);
        assert!(rooms[0].is_main() && rooms[0].active);
        assert_eq!(rooms[1].kind, RoomKind::Minor);
        assert!(!rooms[1].active);
        assert!(rooms[2].is_main());
        assert!(!rooms[3].active);
    }

    #[test]
    fn test_rooms_are_kept_when_minor() {
        let mut rooms = vec![Room::new(0, 0.0, 0.0, 2, 2)];
        let main = MainRoomSelector::new(1000.0).select(&mut rooms);
        assert!(main.is_empty());
        assert_eq!(rooms.len(), 1);
    }
}
