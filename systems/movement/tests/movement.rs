use slide_merge_core::{
    Axis, CellCoord, Command, Direction, Event, GameError, MovementDescriptor, SwipeCommand,
    TileId, TileValue, MERGE_COMPLETION_DELAY,
};
use slide_merge_system_movement::Movement;
use slide_merge_world::{self as world, query, World};

#[test]
fn single_tile_slides_to_each_edge() {
    let cases = [
        (SwipeCommand::Up, CellCoord::new(1, 0)),
        (SwipeCommand::Down, CellCoord::new(1, 3)),
        (SwipeCommand::Left, CellCoord::new(0, 1)),
        (SwipeCommand::Right, CellCoord::new(3, 1)),
    ];

    for (swipe, expected) in cases {
        let mut world = configured_world(4);
        let tile = spawn(&mut world, CellCoord::new(1, 1), 1);
        let mut movement = Movement::default();

        let moved = swipe_and_settle(&mut world, &mut movement, swipe.movement());

        let board = query::board(&world).expect("board");
        assert!(moved, "{swipe:?} should move the tile");
        assert_eq!(board.occupant(expected), Some(tile), "{swipe:?}");
        assert_eq!(board.occupant(CellCoord::new(1, 1)), None, "{swipe:?}");
        assert_eq!(
            board.tile(tile).map(|snapshot| snapshot.cell),
            Some(expected),
            "{swipe:?} should update the tile's own coordinates"
        );
    }
}

#[test]
fn equal_tiles_merge_into_one() {
    let mut world = configured_world(4);
    let _ = spawn(&mut world, CellCoord::new(1, 1), 1);
    let _ = spawn(&mut world, CellCoord::new(1, 3), 1);
    assert_eq!(live_tiles(&world), 2);

    let mut movement = Movement::default();
    let moved = swipe_and_settle(
        &mut world,
        &mut movement,
        MovementDescriptor::new(Axis::Y, Direction::Start),
    );

    let board = query::board(&world).expect("board");
    assert!(moved);
    assert_eq!(board.value_at(CellCoord::new(1, 0)), Some(value(2)));
    assert_eq!(board.occupant(CellCoord::new(1, 1)), None);
    assert_eq!(board.occupant(CellCoord::new(1, 3)), None);
    assert_eq!(live_tiles(&world), 1);
    assert_eq!(query::tile_view(&world).iter().count(), 1);
}

#[test]
fn different_values_stack_without_merging() {
    let mut world = configured_world(4);
    let first = spawn(&mut world, CellCoord::new(1, 1), 1);
    let second = spawn(&mut world, CellCoord::new(1, 3), 2);

    let mut movement = Movement::default();
    let moved = swipe_and_settle(&mut world, &mut movement, SwipeCommand::Up.movement());

    let board = query::board(&world).expect("board");
    assert!(moved);
    assert_eq!(board.occupant(CellCoord::new(1, 0)), Some(first));
    assert_eq!(board.occupant(CellCoord::new(1, 1)), Some(second));
    assert_eq!(board.value_at(CellCoord::new(1, 0)), Some(value(1)));
    assert_eq!(board.value_at(CellCoord::new(1, 1)), Some(value(2)));
    assert_eq!(board.occupant(CellCoord::new(1, 3)), None);
    assert_eq!(live_tiles(&world), 2);
}

#[test]
fn compacted_board_reports_no_movement() {
    let mut world = configured_world(4);
    let _ = spawn(&mut world, CellCoord::new(0, 0), 2);
    let _ = spawn(&mut world, CellCoord::new(1, 0), 4);
    let _ = spawn(&mut world, CellCoord::new(0, 1), 8);
    let before = query::tile_view(&world).into_vec();

    let mut movement = Movement::default();
    let mut commands = Vec::new();
    let moved = movement
        .handle(
            SwipeCommand::Up.movement(),
            query::board(&world),
            query::pending_merges(&world),
            &mut commands,
        )
        .expect("plan");

    assert!(!moved);
    assert!(commands.is_empty());
    assert_eq!(query::tile_view(&world).into_vec(), before);
}

#[test]
fn four_equal_tiles_merge_pairwise() {
    let mut world = configured_world(4);
    for x in 0..4 {
        let _ = spawn(&mut world, CellCoord::new(x, 2), 2);
    }

    let mut movement = Movement::default();
    let moved = swipe_and_settle(&mut world, &mut movement, SwipeCommand::Right.movement());

    let board = query::board(&world).expect("board");
    assert!(moved);
    assert_eq!(row_values(&world, 2), vec![None, None, Some(4), Some(4)]);
    assert_eq!(board.live_tile_count(), 2);
}

#[test]
fn merged_tile_does_not_merge_again_in_the_same_move() {
    let mut world = configured_world(4);
    let _ = spawn(&mut world, CellCoord::new(3, 0), 4);
    let _ = spawn(&mut world, CellCoord::new(3, 2), 2);
    let _ = spawn(&mut world, CellCoord::new(3, 3), 2);

    let mut movement = Movement::default();
    let moved = swipe_and_settle(&mut world, &mut movement, SwipeCommand::Up.movement());

    assert!(moved);
    assert_eq!(
        column_values(&world, 3),
        vec![Some(4), Some(4), None, None]
    );
}

#[test]
fn three_equal_tiles_merge_the_leading_pair() {
    let mut world = configured_world(4);
    for y in 0..3 {
        let _ = spawn(&mut world, CellCoord::new(0, y), 8);
    }

    let mut movement = Movement::default();
    let moved = swipe_and_settle(&mut world, &mut movement, SwipeCommand::Up.movement());

    assert!(moved);
    assert_eq!(
        column_values(&world, 0),
        vec![Some(16), Some(8), None, None]
    );
}

#[test]
fn merge_completes_only_after_tick() {
    let mut world = configured_world(4);
    let _ = spawn(&mut world, CellCoord::new(2, 0), 2);
    let _ = spawn(&mut world, CellCoord::new(2, 1), 2);

    let mut movement = Movement::default();
    let mut commands = Vec::new();
    let moved = movement
        .handle(
            SwipeCommand::Up.movement(),
            query::board(&world),
            query::pending_merges(&world),
            &mut commands,
        )
        .expect("plan");
    assert!(moved);
    apply_all(&mut world, commands);

    assert_eq!(query::pending_merges(&world), 1);
    assert_eq!(column_values(&world, 2)[0], Some(2));
    assert_eq!(query::tile_view(&world).iter().count(), 2);
    assert_eq!(live_tiles(&world), 1);

    let mut blocked = Vec::new();
    assert_eq!(
        movement.handle(
            SwipeCommand::Down.movement(),
            query::board(&world),
            query::pending_merges(&world),
            &mut blocked,
        ),
        Err(GameError::MergesPending(1))
    );
    assert!(blocked.is_empty());

    tick(&mut world);
    assert_eq!(query::pending_merges(&world), 0);
    assert_eq!(column_values(&world, 2)[0], Some(4));
    assert_eq!(query::tile_view(&world).iter().count(), 1);
}

#[test]
fn unconfigured_world_rejects_movement() {
    let world = World::new();
    let mut movement = Movement::default();
    let mut commands = Vec::new();
    assert_eq!(
        movement.handle(
            SwipeCommand::Left.movement(),
            query::board(&world),
            query::pending_merges(&world),
            &mut commands,
        ),
        Err(GameError::UninitializedState)
    );
}

#[test]
fn occupied_cells_always_match_live_tiles() {
    let mut world = configured_world(4);
    let layout = [
        (0, 0, 2),
        (0, 1, 2),
        (1, 1, 4),
        (2, 1, 4),
        (3, 3, 8),
        (2, 2, 8),
        (1, 3, 2),
    ];
    for (x, y, raw) in layout {
        let _ = spawn(&mut world, CellCoord::new(x, y), raw);
    }

    let mut movement = Movement::default();
    for swipe in [
        SwipeCommand::Left,
        SwipeCommand::Up,
        SwipeCommand::Right,
        SwipeCommand::Down,
        SwipeCommand::Left,
    ] {
        let _ = swipe_and_settle(&mut world, &mut movement, swipe.movement());
        let board = query::board(&world).expect("board");
        assert_eq!(board.occupied_cell_count(), board.live_tile_count());
        for snapshot in board.tile_view().live() {
            assert_eq!(board.occupant(snapshot.cell), Some(snapshot.id));
        }
    }
}

fn configured_world(size: u32) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureBoard { size }, &mut events).expect("configure");
    world
}

fn value(raw: u32) -> TileValue {
    TileValue::new(raw).expect("valid tile value")
}

fn spawn(world: &mut World, cell: CellCoord, raw: u32) -> TileId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnTile {
            cell,
            value: value(raw),
        },
        &mut events,
    )
    .expect("spawn");
    events
        .iter()
        .find_map(|event| match event {
            Event::TileSpawned { tile, .. } => Some(*tile),
            _ => None,
        })
        .expect("spawn event")
}

fn apply_all(world: &mut World, commands: Vec<Command>) {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events).expect("apply");
    }
}

fn tick(world: &mut World) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: MERGE_COMPLETION_DELAY,
        },
        &mut events,
    )
    .expect("tick");
}

fn swipe_and_settle(
    world: &mut World,
    movement: &mut Movement,
    descriptor: MovementDescriptor,
) -> bool {
    let mut commands = Vec::new();
    let moved = movement
        .handle(
            descriptor,
            query::board(world),
            query::pending_merges(world),
            &mut commands,
        )
        .expect("plan");
    apply_all(world, commands);
    tick(world);
    moved
}

fn live_tiles(world: &World) -> usize {
    query::board(world).map_or(0, |board| board.live_tile_count())
}

fn row_values(world: &World, y: u32) -> Vec<Option<u32>> {
    let board = query::board(world).expect("board");
    (0..board.size())
        .map(|x| board.value_at(CellCoord::new(x, y)).map(|value| value.get()))
        .collect()
}

fn column_values(world: &World, x: u32) -> Vec<Option<u32>> {
    let board = query::board(world).expect("board");
    (0..board.size())
        .map(|y| board.value_at(CellCoord::new(x, y)).map(|value| value.get()))
        .collect()
}
