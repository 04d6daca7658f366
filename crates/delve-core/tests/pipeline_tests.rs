use delve_core::dungeon::{
    BowyerWatson, ConnectivityGraphBuilder, CorridorRouter, Orientation, RouteOutcome, SpanningTreeReducer,
};
use delve_core::config::MAX_PLACEMENT_RADIUS;
use delve_core::{
    ConfigError, DungeonGenerator, GenError, GenRng, GenerationWarning, GeneratorConfig, Point, Rect, Room, RoomKind,
};
use proptest::prelude::*;

fn main_room(id: u32, x: i32, y: i32, w: i32, h: i32) -> Room {
    Room::with_kind(id, Rect::new(x, y, w, h), RoomKind::Main)
}

fn config(seed: u64, room_count: u32) -> GeneratorConfig {
    GeneratorConfig {
        room_count,
        placement_radius: 30.0,
        seed,
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_square_with_centre_scenario() {
    let centres = [(0, 0), (10, 0), (10, 10), (0, 10), (5, 5)];
    let mut rooms: Vec<Room> = centres
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| main_room(i as u32, x - 1, y - 1, 2, 2))
        .collect();
    let ids: Vec<u32> = (0..5).collect();

    let build = ConnectivityGraphBuilder::new(BowyerWatson).build(&mut rooms, &ids);
    assert!(build.warnings.is_empty());
    assert_eq!(build.graph.vertex_count(), 5);
    assert_eq!(build.graph.edge_count(), 8);
    let centre = Point::new(5, 5);
    assert_eq!(build.graph.neighbors(centre).count(), 4);

    for seed in 0..8 {
        let tree = SpanningTreeReducer::new(0.0).reduce(&build.graph, &mut GenRng::new(seed));
        assert_eq!(tree.len(), 4);
        assert!(tree.edges().iter().all(|e| e.contains(centre)));
        assert!((tree.total_weight() - 20.0 * 2f64.sqrt()).abs() < 1e-9);
    }
}

#[test]
fn test_aligned_rooms_get_one_straight_corridor() {
    let mut rooms = vec![main_room(0, 0, 0, 4, 4), main_room(1, 10, 0, 4, 4)];
    let build = ConnectivityGraphBuilder::new(BowyerWatson).build(&mut rooms, &[0, 1]);
    let mut rng = GenRng::new(17);
    let tree = SpanningTreeReducer::new(0.0).reduce(&build.graph, &mut rng);
    assert_eq!(tree.len(), 1);

    let report = CorridorRouter::new(1).route_all(&mut rooms, &tree, &build.index, &mut rng);

    assert_eq!(report.routes.len(), 1);
    assert_eq!(report.routes[0].outcome, RouteOutcome::Straight);
    assert_eq!(report.corridors_created, 1);
    assert_eq!(rooms.len(), 3);
    let corridor = &rooms[2];
    assert_eq!(corridor.kind, RoomKind::Corridor);
    assert_eq!(corridor.id, 2);
    let rect = corridor.rect();
    assert_eq!((rect.x, rect.width, rect.height), (4, 6, 1));
}

#[test]
fn test_blocked_elbow_retries_opposite_orientation() {
    // C sits exactly where a horizontal-first elbow would go.
    let mut rooms = vec![
        main_room(0, 0, 0, 4, 4),
        main_room(1, 20, 20, 4, 4),
        main_room(2, 20, 0, 4, 4),
    ];
    let build = ConnectivityGraphBuilder::new(BowyerWatson).build(&mut rooms, &[0, 1]);
    let mut rng = GenRng::new(3);
    let tree = SpanningTreeReducer::new(0.0).reduce(&build.graph, &mut rng);

    let report = CorridorRouter::new(1).route_all(&mut rooms, &tree, &build.index, &mut rng);

    assert_eq!(
        report.routes[0].outcome,
        RouteOutcome::Elbow {
            orientation: Orientation::VerticalFirst,
            retried: true
        }
    );
    assert!(report.warnings.is_empty());
    assert_eq!(rooms.len(), 6);
    let blocker = rooms[2].rect();
    let pieces = &rooms[3..];
    assert_eq!(pieces[0].kind, RoomKind::Elbow);
    assert!(pieces.iter().all(|p| p.kind.is_passage()));
    assert!(pieces.iter().all(|p| !p.rect().overlaps(&blocker)));
    // Rejected pieces never consumed ids.
    assert_eq!(pieces.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 4, 5]);
}

#[test]
fn test_unroutable_edge_is_reported() {
    // A ring of blockers around the diagonal pair leaves no L route.
    let mut rooms = vec![
        main_room(0, 0, 0, 4, 4),
        main_room(1, 20, 20, 4, 4),
        main_room(2, 20, 0, 4, 4),
        main_room(3, 0, 20, 4, 4),
    ];
    let build = ConnectivityGraphBuilder::new(BowyerWatson).build(&mut rooms, &[0, 1]);
    let mut rng = GenRng::new(5);
    let tree = SpanningTreeReducer::new(0.0).reduce(&build.graph, &mut rng);

    let report = CorridorRouter::new(1).route_all(&mut rooms, &tree, &build.index, &mut rng);

    assert_eq!(report.routes[0].outcome, RouteOutcome::Unroutable);
    assert_eq!(rooms.len(), 4);
    assert_eq!(
        report.warnings,
        vec![GenerationWarning::UnroutableCorridor {
            from: Point::new(2, 2),
            to: Point::new(22, 22),
        }]
    );
}

#[test]
fn test_default_config_generates() {
    let dungeon = DungeonGenerator::new(GeneratorConfig::default()).unwrap().generate();
    assert!(dungeon.main_rooms().count() > 0);
    assert!(dungeon.corridors().all(|r| r.active));
    for room in dungeon.rooms.iter().filter(|r| !r.kind.is_passage()) {
        assert!(room.width >= 4 && room.height >= 4);
        let (long, short) = (room.width.max(room.height), room.width.min(room.height));
        assert!(f64::from(long) <= f64::from(short) * 2.0);
    }
}

#[test]
fn test_out_of_range_extents_are_rejected() {
    let wide = GeneratorConfig {
        room_count: 8,
        placement_radius: 1e7,
        room_size_std_dev: 0.0,
        main_room_threshold: 0.5,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        DungeonGenerator::new(wide),
        Err(GenError::InvalidConfiguration(ConfigError::InvalidRadius { .. }))
    ));

    let huge = GeneratorConfig {
        room_size_mean: 3e9,
        room_size_std_dev: 0.0,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        DungeonGenerator::new(huge),
        Err(GenError::InvalidConfiguration(ConfigError::RoomSizeTooLarge { .. }))
    ));
}

#[test]
fn test_widest_accepted_disk_generates() {
    let config = GeneratorConfig {
        room_count: 8,
        placement_radius: MAX_PLACEMENT_RADIUS,
        room_size_std_dev: 0.0,
        main_room_threshold: 0.5,
        ..GeneratorConfig::default()
    };
    let dungeon = DungeonGenerator::new(config).unwrap().generate();
    assert_eq!(dungeon.main_rooms().count(), 8);
    for room in &dungeon.rooms {
        let rect = room.rect();
        assert!(rect.width > 0 && rect.height > 0, "{:?}", rect);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn test_same_seed_same_dungeon(seed in any::<u64>(), rooms in 5u32..40) {
        let generator = DungeonGenerator::new(config(seed, rooms)).unwrap();
        let first = generator.generate();
        let second = generator.generate();
        prop_assert_eq!(&first.rooms, &second.rooms);
        prop_assert_eq!(&first.tree, &second.tree);
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_main_rooms_never_overlap(seed in any::<u64>(), rooms in 5u32..40) {
        let dungeon = DungeonGenerator::new(config(seed, rooms)).unwrap().generate();
        prop_assume!(dungeon.separation.converged);

        let main: Vec<&Room> = dungeon.main_rooms().collect();
        for (i, a) in main.iter().enumerate() {
            for b in &main[i + 1..] {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a.rect(), b.rect());
            }
        }
    }

    #[test]
    fn test_every_kept_edge_is_routed(seed in any::<u64>(), rooms in 5u32..40) {
        let dungeon = DungeonGenerator::new(config(seed, rooms)).unwrap().generate();
        prop_assert_eq!(dungeon.routes.len(), dungeon.tree.len());
        for route in &dungeon.routes {
            prop_assert!(dungeon.tree.contains(&route.edge));
        }

        let unroutable = dungeon
            .warnings
            .iter()
            .filter(|w| matches!(w, GenerationWarning::UnroutableCorridor { .. }))
            .count();
        prop_assert_eq!(
            unroutable,
            dungeon.routes.iter().filter(|r| r.outcome == RouteOutcome::Unroutable).count()
        );
    }
}
