use super::*;

fn save_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn hero_at(col: i32, row: i32, facing: Direction) -> ActorConfig {
    ActorConfig {
        id: ActorId::new("hero"),
        start: tile(col, row),
        facing,
        is_player: true,
        behavior_loop: Vec::new(),
        talk: Vec::new(),
    }
}

fn npc_at(id: &str, col: i32, row: i32) -> ActorConfig {
    ActorConfig {
        id: ActorId::new(id),
        start: tile(col, row),
        facing: Direction::Up,
        is_player: false,
        behavior_loop: Vec::new(),
        talk: Vec::new(),
    }
}

fn map_of(id: &str, actors: Vec<ActorConfig>) -> MapConfig {
    MapConfig {
        id: MapId::new(id),
        lower_layer: format!("maps/{id}/lower"),
        upper_layer: format!("maps/{id}/upper"),
        walls: Vec::new(),
        actors,
        footstep_triggers: Vec::new(),
    }
}

fn content_of(maps: Vec<MapConfig>) -> WorldContent {
    WorldContent {
        start_map: maps[0].id.clone(),
        maps,
    }
}

fn hold(direction: Direction) -> InputSnapshot {
    InputSnapshot::empty().with_direction(Some(direction))
}

fn interact() -> InputSnapshot {
    InputSnapshot::empty().with_interact_pressed(true)
}

fn escape() -> InputSnapshot {
    InputSnapshot::empty().with_escape_pressed(true)
}

fn idle() -> InputSnapshot {
    InputSnapshot::empty()
}

fn tick_n(world: &mut Overworld, input: &InputSnapshot, ticks: u32) {
    for _ in 0..ticks {
        world.advance(input);
    }
}

fn actor<'a>(world: &'a Overworld, id: &str) -> &'a Actor {
    world
        .map
        .actors
        .get(&ActorId::new(id))
        .expect("actor exists")
}

#[test]
fn player_crosses_one_tile_in_sixteen_ticks() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Up)])]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.advance(&hold(Direction::Right));
    // Destination reserved at step start.
    assert_eq!(actor(&world, "hero").cell, tile(3, 2));
    assert!(!actor(&world, "hero").is_idle());

    tick_n(&mut world, &hold(Direction::Right), 15);
    assert_eq!(actor(&world, "hero").cell, tile(3, 2));

    // Still holding: the next step begins immediately.
    world.advance(&hold(Direction::Right));
    assert_eq!(actor(&world, "hero").cell, tile(4, 2));
}

#[test]
fn held_direction_turns_but_does_not_enter_walls() {
    let dir = save_dir();
    let mut room = map_of("room", vec![hero_at(2, 2, Direction::Up)]);
    room.walls.push(tile(3, 2));
    let mut world = Overworld::new(content_of(vec![room]), dir.path()).expect("world");

    tick_n(&mut world, &hold(Direction::Right), 4);
    assert_eq!(actor(&world, "hero").cell, tile(2, 2));
    assert_eq!(actor(&world, "hero").facing, Direction::Right);
    assert!(actor(&world, "hero").is_idle());
}

#[test]
fn stepping_reserves_the_destination_and_frees_the_origin() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Up)])]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.advance(&hold(Direction::Right));
    assert!(world.map.walls.contains(tile(3, 2)));
    assert!(!world.map.walls.contains(tile(2, 2)));

    // Drawn position trails one pixel behind the reserved cell.
    let (x_px, _) = actor(&world, "hero").position_px();
    assert_eq!(x_px, tile(2, 2).x + WALK_SPEED_PX_PER_TICK);
}

#[test]
fn actors_block_each_other() {
    let dir = save_dir();
    let content = content_of(vec![map_of(
        "room",
        vec![hero_at(2, 2, Direction::Up), npc_at("guide", 3, 2)],
    )]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    tick_n(&mut world, &hold(Direction::Right), 4);
    assert_eq!(actor(&world, "hero").cell, tile(2, 2));
    assert_eq!(actor(&world, "hero").facing, Direction::Right);
}

#[test]
fn talking_faces_the_speaker_gates_movement_and_rearms_behaviors() {
    let dir = save_dir();
    let mut guide = npc_at("guide", 3, 2);
    guide.talk = vec![
        CutsceneEvent::TextMessage {
            text: "First line.".to_string(),
            face_player: Some(ActorId::new("guide")),
        },
        CutsceneEvent::TextMessage {
            text: "Second line.".to_string(),
            face_player: None,
        },
    ];
    let content = content_of(vec![map_of(
        "room",
        vec![hero_at(2, 2, Direction::Right), guide],
    )]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.advance(&interact());
    assert!(world.map.cutscene_playing);
    assert_eq!(world.frame().dialog.as_deref(), Some("First line."));
    // Hero faces right, so the speaker turns left to meet them.
    assert_eq!(actor(&world, "guide").facing, Direction::Left);

    // Held directions are ignored while the scenario plays.
    tick_n(&mut world, &hold(Direction::Down), 20);
    assert_eq!(actor(&world, "hero").cell, tile(2, 2));
    assert_eq!(world.frame().dialog.as_deref(), Some("First line."));

    world.advance(&interact());
    assert_eq!(world.frame().dialog.as_deref(), Some("Second line."));

    world.advance(&interact());
    assert!(!world.map.cutscene_playing);
    assert_eq!(world.frame().dialog, None);
    assert_eq!(actor(&world, "guide").behavior_index, 0);
}

#[test]
fn interact_with_nobody_ahead_is_a_noop() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Up)])]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    assert_eq!(world.advance(&interact()), SimCommand::Continue);
    assert!(!world.map.cutscene_playing);
}

#[test]
fn scripted_walk_completes_before_the_next_event_begins() {
    let dir = save_dir();
    let content = content_of(vec![map_of(
        "room",
        vec![hero_at(2, 2, Direction::Up), npc_at("guide", 4, 4)],
    )]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.cutscene.start(
        vec![
            CutsceneEvent::Walk {
                who: Some(ActorId::new("guide")),
                direction: Direction::Down,
            },
            CutsceneEvent::TextMessage {
                text: "Made it.".to_string(),
                face_player: None,
            },
        ],
        &mut world.map,
    );

    let mut ticks = 0;
    while world.frame().dialog.is_none() {
        assert!(ticks < 64, "dialog never appeared");
        world.advance(&idle());
        ticks += 1;
    }
    // The walk ran to completion first.
    assert_eq!(actor(&world, "guide").cell, tile(4, 5));
    assert!(actor(&world, "guide").is_idle());
    assert!(world.map.cutscene_playing);

    world.advance(&interact());
    assert!(!world.map.cutscene_playing);
}

#[test]
fn blocked_scripted_walk_retries_until_the_cell_frees() {
    let dir = save_dir();
    let mut room = map_of(
        "room",
        vec![hero_at(2, 2, Direction::Up), npc_at("guide", 4, 4)],
    );
    room.walls.push(tile(4, 5));
    let mut world = Overworld::new(content_of(vec![room]), dir.path()).expect("world");

    world.cutscene.start(
        vec![CutsceneEvent::Walk {
            who: Some(ActorId::new("guide")),
            direction: Direction::Down,
        }],
        &mut world.map,
    );

    tick_n(&mut world, &idle(), 5);
    assert_eq!(actor(&world, "guide").cell, tile(4, 4));
    assert!(world.map.cutscene_playing);

    world.map.walls.remove(tile(4, 5));
    tick_n(&mut world, &idle(), 20);
    assert_eq!(actor(&world, "guide").cell, tile(4, 5));
    assert!(!world.map.cutscene_playing);
}

#[test]
fn scripted_stand_holds_its_facing_for_the_duration() {
    let dir = save_dir();
    let content = content_of(vec![map_of(
        "room",
        vec![hero_at(2, 2, Direction::Up), npc_at("guide", 4, 4)],
    )]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.cutscene.start(
        vec![
            CutsceneEvent::Stand {
                who: Some(ActorId::new("guide")),
                direction: Direction::Left,
                duration_ms: 3 * MS_PER_TICK,
            },
            CutsceneEvent::Noop,
        ],
        &mut world.map,
    );

    // The stand begins on the first tick and turns the actor.
    world.advance(&idle());
    assert_eq!(actor(&world, "guide").facing, Direction::Left);
    assert!(world.map.cutscene_playing);

    // Held for the full three-tick duration.
    tick_n(&mut world, &idle(), 2);
    assert!(world.map.cutscene_playing);

    // The stand elapses, the trailing no-op completes immediately, and
    // the scenario ends on the same tick.
    world.advance(&idle());
    assert!(!world.map.cutscene_playing);
    assert_eq!(actor(&world, "guide").facing, Direction::Left);
}

#[test]
fn footstep_trigger_swaps_maps_and_saves_progress() {
    let dir = save_dir();
    let mut room = map_of("room", vec![hero_at(2, 2, Direction::Right)]);
    room.footstep_triggers.push(TriggerConfig {
        cell: tile(3, 2),
        events: vec![CutsceneEvent::ChangeMap {
            map: MapId::new("annex"),
        }],
    });
    let annex = map_of("annex", vec![hero_at(1, 1, Direction::Down)]);
    let mut world = Overworld::new(content_of(vec![room, annex]), dir.path()).expect("world");

    tick_n(&mut world, &hold(Direction::Right), 16);
    assert_eq!(world.map.id, MapId::new("annex"));
    // Cell and facing carry across the transition.
    assert_eq!(actor(&world, "hero").cell, tile(3, 2));
    assert_eq!(actor(&world, "hero").facing, Direction::Right);
    assert!(world.map.walls.contains(tile(3, 2)));

    let progress = load_progress(&world.save_path).expect("progress saved");
    assert_eq!(progress.map_id, "annex");
    assert_eq!(progress.x, tile(3, 2).x);
    assert_eq!(progress.y, tile(3, 2).y);
}

#[test]
fn entry_trigger_on_the_arrival_cell_fires_after_a_map_change() {
    let dir = save_dir();
    let mut room = map_of("room", vec![hero_at(2, 2, Direction::Right)]);
    room.footstep_triggers.push(TriggerConfig {
        cell: tile(3, 2),
        events: vec![CutsceneEvent::ChangeMap {
            map: MapId::new("annex"),
        }],
    });
    // The arrival cell is the transplanted player cell, not the
    // configured start.
    let mut annex = map_of("annex", vec![hero_at(1, 1, Direction::Down)]);
    annex.footstep_triggers.push(TriggerConfig {
        cell: tile(3, 2),
        events: vec![CutsceneEvent::TextMessage {
            text: "Welcome in.".to_string(),
            face_player: None,
        }],
    });
    let mut world = Overworld::new(content_of(vec![room, annex]), dir.path()).expect("world");

    tick_n(&mut world, &hold(Direction::Right), 16);
    assert_eq!(world.map.id, MapId::new("annex"));

    world.advance(&idle());
    assert_eq!(world.frame().dialog.as_deref(), Some("Welcome in."));
}

#[test]
fn footstep_trigger_survives_an_escape_on_the_landing_tick() {
    let dir = save_dir();
    let mut room = map_of("room", vec![hero_at(2, 2, Direction::Right)]);
    room.footstep_triggers.push(TriggerConfig {
        cell: tile(3, 2),
        events: vec![CutsceneEvent::TextMessage {
            text: "Pressure plate.".to_string(),
            face_player: None,
        }],
    });
    let mut world = Overworld::new(content_of(vec![room]), dir.path()).expect("world");

    tick_n(&mut world, &hold(Direction::Right), 15);
    // The pause request and the landing share a tick; the pause wins.
    let both = hold(Direction::Right).with_escape_pressed(true);
    assert_eq!(world.advance(&both), SimCommand::EnterPause);
    assert_eq!(actor(&world, "hero").cell, tile(3, 2));

    world.resume_from_pause();
    world.advance(&idle());
    assert!(!world.map.cutscene_playing);

    // The landing's trigger still fires once the pause scenario is done.
    world.advance(&idle());
    assert_eq!(world.frame().dialog.as_deref(), Some("Pressure plate."));
}

#[test]
fn escape_requests_pause_and_saves_progress() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Up)])]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    assert_eq!(world.advance(&escape()), SimCommand::EnterPause);
    assert!(load_progress(&world.save_path).is_some());

    world.resume_from_pause();
    assert_eq!(world.advance(&idle()), SimCommand::Continue);
    assert!(!world.map.cutscene_playing);
}

#[test]
fn escape_during_a_cutscene_is_ignored() {
    let dir = save_dir();
    let mut guide = npc_at("guide", 3, 2);
    guide.talk = vec![CutsceneEvent::TextMessage {
        text: "Busy.".to_string(),
        face_player: None,
    }];
    let content = content_of(vec![map_of(
        "room",
        vec![hero_at(2, 2, Direction::Right), guide],
    )]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.advance(&interact());
    assert!(world.map.cutscene_playing);
    assert_eq!(world.advance(&escape()), SimCommand::Continue);
    assert!(world.map.cutscene_playing);
}

#[test]
fn empty_scenario_is_a_noop() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Up)])]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    world.cutscene.start(Vec::new(), &mut world.map);
    assert!(!world.map.cutscene_playing);
    assert_eq!(world.advance(&idle()), SimCommand::Continue);
}

#[test]
fn idle_routine_cycles_and_is_suspended_by_cutscenes() {
    let dir = save_dir();
    let mut guide = npc_at("guide", 4, 4);
    guide.behavior_loop = vec![
        BehaviorStep::Stand {
            direction: Direction::Down,
            duration_ms: 2 * MS_PER_TICK,
        },
        BehaviorStep::Walk {
            direction: Direction::Right,
        },
        BehaviorStep::Stand {
            direction: Direction::Up,
            duration_ms: 320,
        },
    ];
    let content = content_of(vec![map_of(
        "room",
        vec![hero_at(2, 2, Direction::Up), guide],
    )]);
    let mut world = Overworld::new(content, dir.path()).expect("world");

    // Two ticks of standing, then the walk starts on the third.
    tick_n(&mut world, &idle(), 2);
    assert_eq!(actor(&world, "guide").cell, tile(4, 4));
    assert_eq!(actor(&world, "guide").facing, Direction::Down);
    world.advance(&idle());
    assert_eq!(actor(&world, "guide").cell, tile(5, 4));

    // The walk finishes, then the long stand holds the actor in place.
    tick_n(&mut world, &idle(), 20);
    assert_eq!(actor(&world, "guide").cell, tile(5, 4));
    assert_eq!(actor(&world, "guide").facing, Direction::Up);
    assert_eq!(actor(&world, "guide").behavior_index, 2);

    world.cutscene.start(
        vec![CutsceneEvent::TextMessage {
            text: "Hold it.".to_string(),
            face_player: None,
        }],
        &mut world.map,
    );
    tick_n(&mut world, &idle(), 30);
    assert_eq!(actor(&world, "guide").cell, tile(5, 4));

    world.advance(&interact());
    assert!(!world.map.cutscene_playing);
    assert_eq!(actor(&world, "guide").behavior_index, 0);
}

#[test]
fn progress_round_trips_through_the_save_file() {
    let dir = save_dir();
    let path = dir.path().join(PROGRESS_FILE_NAME);
    let progress = Progress {
        save_version: PROGRESS_SAVE_VERSION,
        map_id: "room".to_string(),
        x: tile(4, 2).x,
        y: tile(4, 2).y,
        facing: Direction::Up,
    };

    save_progress(&path, &progress);
    assert_eq!(load_progress(&path), Some(progress));
}

#[test]
fn corrupt_or_stale_progress_loads_as_none() {
    let dir = save_dir();
    let path = dir.path().join(PROGRESS_FILE_NAME);

    assert_eq!(load_progress(&path), None);

    fs::write(&path, "{oops").expect("write");
    assert_eq!(load_progress(&path), None);

    let stale = Progress {
        save_version: PROGRESS_SAVE_VERSION + 1,
        map_id: "room".to_string(),
        x: 0,
        y: 0,
        facing: Direction::Down,
    };
    save_progress(&path, &stale);
    assert_eq!(load_progress(&path), None);
}

#[test]
fn saved_progress_restores_the_player_placement() {
    let dir = save_dir();
    let path = dir.path().join(PROGRESS_FILE_NAME);
    save_progress(
        &path,
        &Progress {
            save_version: PROGRESS_SAVE_VERSION,
            map_id: "room".to_string(),
            x: tile(4, 2).x,
            y: tile(4, 2).y,
            facing: Direction::Up,
        },
    );

    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Right)])]);
    let world = Overworld::new(content, dir.path()).expect("world");
    assert_eq!(actor(&world, "hero").cell, tile(4, 2));
    assert_eq!(actor(&world, "hero").facing, Direction::Up);
    assert!(world.map.walls.contains(tile(4, 2)));
    assert!(!world.map.walls.contains(tile(2, 2)));
}

#[test]
fn misaligned_saved_position_falls_back_to_the_map_start() {
    let dir = save_dir();
    let path = dir.path().join(PROGRESS_FILE_NAME);
    save_progress(
        &path,
        &Progress {
            save_version: PROGRESS_SAVE_VERSION,
            map_id: "room".to_string(),
            x: tile(4, 2).x + 3,
            y: tile(4, 2).y,
            facing: Direction::Up,
        },
    );

    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Right)])]);
    let world = Overworld::new(content, dir.path()).expect("world");
    assert_eq!(actor(&world, "hero").cell, tile(2, 2));
    assert_eq!(actor(&world, "hero").facing, Direction::Right);
}

#[test]
fn world_without_a_player_is_rejected() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![npc_at("guide", 2, 2)])]);
    let err = Overworld::new(content, dir.path()).expect_err("should reject");
    assert!(matches!(err, ConfigError::MissingPlayer { .. }));
}

#[test]
fn misaligned_wall_is_rejected() {
    let dir = save_dir();
    let mut room = map_of("room", vec![hero_at(2, 2, Direction::Up)]);
    room.walls.push(CellPx::new(tile(3, 2).x + 1, tile(3, 2).y));
    let err = Overworld::new(content_of(vec![room]), dir.path()).expect_err("should reject");
    assert!(matches!(err, ConfigError::MisalignedCell { kind: "wall", .. }));
}

#[test]
fn duplicate_actor_ids_are_rejected() {
    let dir = save_dir();
    let content = content_of(vec![map_of(
        "room",
        vec![
            hero_at(2, 2, Direction::Up),
            npc_at("guide", 3, 3),
            npc_at("guide", 4, 4),
        ],
    )]);
    let err = Overworld::new(content, dir.path()).expect_err("should reject");
    assert!(matches!(err, ConfigError::DuplicateActor { .. }));
}

#[test]
fn change_map_to_an_unknown_map_is_rejected() {
    let dir = save_dir();
    let mut room = map_of("room", vec![hero_at(2, 2, Direction::Up)]);
    room.footstep_triggers.push(TriggerConfig {
        cell: tile(3, 2),
        events: vec![CutsceneEvent::ChangeMap {
            map: MapId::new("nowhere"),
        }],
    });
    let err = Overworld::new(content_of(vec![room]), dir.path()).expect_err("should reject");
    assert!(matches!(err, ConfigError::UnknownMapTarget { .. }));
}

#[test]
fn frame_centers_the_camera_on_the_player() {
    let dir = save_dir();
    let content = content_of(vec![map_of("room", vec![hero_at(2, 2, Direction::Up)])]);
    let world = Overworld::new(content, dir.path()).expect("world");

    let frame = world.frame();
    assert_eq!(
        frame.camera_px,
        (tile(2, 2).x + TILE_SIZE_PX / 2, tile(2, 2).y + TILE_SIZE_PX / 2)
    );
    assert_eq!(frame.sprites.len(), 1);
    assert!(frame.sprites[0].is_player);
    assert_eq!(frame.dialog, None);
}

#[test]
fn demo_world_passes_validation() {
    let content = demo_world();
    assert!(validate_content(&content).is_ok());

    let dir = save_dir();
    let world = Overworld::new(content, dir.path()).expect("world");
    assert_eq!(world.map.id, MapId::new("kitchen"));
    assert!(world.map.actors.len() >= 2);
}
