/// Built-in demo world: a kitchen and the street below it, joined by a
/// doorway. Both maps share one coordinate space, since a map change
/// transplants the player's cell; each map's doorway trigger cell is a
/// plain floor cell in the other map, so crossing never bounces back.
pub(crate) fn demo_world() -> WorldContent {
    WorldContent {
        start_map: MapId::new("kitchen"),
        maps: vec![kitchen_map(), street_map()],
    }
}

/// Rows 0..=7, cols 0..=9. The doorway gap at (5, 7) carries the exit
/// trigger; stepping onto it lands the player in the street.
fn kitchen_map() -> MapConfig {
    let doorway = tile(5, 7);
    let mut walls = room_walls(0, 0, 10, 8, &[doorway]);
    // Counter along the back wall.
    walls.extend([tile(2, 2), tile(3, 2), tile(4, 2)]);

    MapConfig {
        id: MapId::new("kitchen"),
        lower_layer: "maps/kitchen/lower".to_string(),
        upper_layer: "maps/kitchen/upper".to_string(),
        walls,
        actors: vec![
            ActorConfig {
                id: ActorId::new("hero"),
                start: tile(3, 4),
                facing: Direction::Down,
                is_player: true,
                behavior_loop: Vec::new(),
                talk: Vec::new(),
            },
            ActorConfig {
                id: ActorId::new("cook"),
                start: tile(6, 3),
                facing: Direction::Down,
                is_player: false,
                behavior_loop: vec![
                    BehaviorStep::Stand {
                        direction: Direction::Down,
                        duration_ms: 1800,
                    },
                    BehaviorStep::Walk {
                        direction: Direction::Left,
                    },
                    BehaviorStep::Stand {
                        direction: Direction::Left,
                        duration_ms: 1200,
                    },
                    BehaviorStep::Walk {
                        direction: Direction::Right,
                    },
                ],
                talk: vec![
                    CutsceneEvent::TextMessage {
                        text: "Mind the trays, they are straight out of the oven.".to_string(),
                        face_player: Some(ActorId::new("cook")),
                    },
                    CutsceneEvent::TextMessage {
                        text: "The street door sticks. Give it a shove.".to_string(),
                        face_player: None,
                    },
                ],
            },
        ],
        footstep_triggers: vec![TriggerConfig {
            cell: doorway,
            events: vec![CutsceneEvent::ChangeMap {
                map: MapId::new("street"),
            }],
        }],
    }
}

/// Rows 7..=14, cols 0..=13, sharing the kitchen's doorway column. The
/// gap at (5, 7) is the arrival cell; the return trigger sits one cell
/// up at (5, 6), inside a small alcove, back in kitchen territory.
fn street_map() -> MapConfig {
    let doorway = tile(5, 7);
    let mut walls = room_walls(0, 7, 14, 8, &[doorway]);
    // Doorway alcove and lamp posts.
    walls.extend([tile(4, 6), tile(6, 6), tile(5, 5)]);
    walls.extend([tile(8, 9), tile(11, 12)]);

    MapConfig {
        id: MapId::new("street"),
        lower_layer: "maps/street/lower".to_string(),
        upper_layer: "maps/street/upper".to_string(),
        walls,
        actors: vec![
            ActorConfig {
                id: ActorId::new("hero"),
                start: tile(5, 8),
                facing: Direction::Down,
                is_player: true,
                behavior_loop: Vec::new(),
                talk: Vec::new(),
            },
            ActorConfig {
                id: ActorId::new("vendor"),
                start: tile(9, 11),
                facing: Direction::Left,
                is_player: false,
                behavior_loop: vec![
                    BehaviorStep::Stand {
                        direction: Direction::Left,
                        duration_ms: 2400,
                    },
                    BehaviorStep::Stand {
                        direction: Direction::Down,
                        duration_ms: 1600,
                    },
                ],
                talk: vec![CutsceneEvent::TextMessage {
                    text: "All the good stuff sold out an hour ago.".to_string(),
                    face_player: Some(ActorId::new("vendor")),
                }],
            },
        ],
        footstep_triggers: vec![TriggerConfig {
            cell: tile(5, 6),
            events: vec![CutsceneEvent::ChangeMap {
                map: MapId::new("kitchen"),
            }],
        }],
    }
}

fn tile(col: i32, row: i32) -> CellPx {
    CellPx::new(with_grid(col), with_grid(row))
}

/// Perimeter of a `width` by `height` tile room with its top-left tile
/// at (`col`, `row`), minus the doorway cells.
fn room_walls(col: i32, row: i32, width: i32, height: i32, doorways: &[CellPx]) -> Vec<CellPx> {
    let mut cells = Vec::new();
    for c in col..col + width {
        cells.push(tile(c, row));
        cells.push(tile(c, row + height - 1));
    }
    for r in row + 1..row + height - 1 {
        cells.push(tile(col, r));
        cells.push(tile(col + width - 1, r));
    }
    cells.retain(|cell| !doorways.contains(cell));
    cells
}
