#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ActorId(String);

impl ActorId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MapId(String);

impl MapId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of an actor's idle routine. The routine cycles while no
/// cutscene is running and restarts from the first entry afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BehaviorStep {
    Stand {
        direction: Direction,
        duration_ms: u64,
    },
    Walk {
        direction: Direction,
    },
}

/// One scripted cutscene event. `who: None` targets the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CutsceneEvent {
    TextMessage {
        text: String,
        face_player: Option<ActorId>,
    },
    Walk {
        who: Option<ActorId>,
        direction: Direction,
    },
    Stand {
        who: Option<ActorId>,
        direction: Direction,
        duration_ms: u64,
    },
    ChangeMap {
        map: MapId,
    },
    Pause,
    Noop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActorConfig {
    pub(crate) id: ActorId,
    pub(crate) start: CellPx,
    pub(crate) facing: Direction,
    pub(crate) is_player: bool,
    pub(crate) behavior_loop: Vec<BehaviorStep>,
    pub(crate) talk: Vec<CutsceneEvent>,
}

/// A cell that starts its events when the player finishes a step onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TriggerConfig {
    pub(crate) cell: CellPx,
    pub(crate) events: Vec<CutsceneEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MapConfig {
    pub(crate) id: MapId,
    pub(crate) lower_layer: String,
    pub(crate) upper_layer: String,
    pub(crate) walls: Vec<CellPx>,
    pub(crate) actors: Vec<ActorConfig>,
    pub(crate) footstep_triggers: Vec<TriggerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorldContent {
    pub(crate) start_map: MapId,
    pub(crate) maps: Vec<MapConfig>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("start map {map} is not defined")]
    UnknownStartMap { map: String },
    #[error("map {map}: no actor is flagged as the player")]
    MissingPlayer { map: String },
    #[error("map {map}: more than one actor is flagged as the player")]
    MultiplePlayers { map: String },
    #[error("map {map}: duplicate actor id {actor}")]
    DuplicateActor { map: String, actor: String },
    #[error("map {map}: {kind} cell ({x}, {y}) is not tile aligned")]
    MisalignedCell {
        map: String,
        kind: &'static str,
        x: i32,
        y: i32,
    },
    #[error("map {map}: change_map event targets unknown map {target}")]
    UnknownMapTarget { map: String, target: String },
}

/// Rejects a world that could not mount or run cleanly. Runs once at
/// startup so everything after it can treat the configs as sound.
fn validate_content(content: &WorldContent) -> Result<(), ConfigError> {
    let known: HashSet<&MapId> = content.maps.iter().map(|map| &map.id).collect();
    if !known.contains(&content.start_map) {
        return Err(ConfigError::UnknownStartMap {
            map: content.start_map.to_string(),
        });
    }

    for map in &content.maps {
        let mut players = 0usize;
        let mut seen_ids = HashSet::new();
        for actor in &map.actors {
            if !seen_ids.insert(&actor.id) {
                return Err(ConfigError::DuplicateActor {
                    map: map.id.to_string(),
                    actor: actor.id.to_string(),
                });
            }
            if actor.is_player {
                players += 1;
            }
            if !is_tile_aligned(actor.start) {
                return Err(ConfigError::MisalignedCell {
                    map: map.id.to_string(),
                    kind: "actor start",
                    x: actor.start.x,
                    y: actor.start.y,
                });
            }
        }
        if players == 0 {
            return Err(ConfigError::MissingPlayer {
                map: map.id.to_string(),
            });
        }
        if players > 1 {
            return Err(ConfigError::MultiplePlayers {
                map: map.id.to_string(),
            });
        }

        for wall in &map.walls {
            if !is_tile_aligned(*wall) {
                return Err(ConfigError::MisalignedCell {
                    map: map.id.to_string(),
                    kind: "wall",
                    x: wall.x,
                    y: wall.y,
                });
            }
        }
        for trigger in &map.footstep_triggers {
            if !is_tile_aligned(trigger.cell) {
                return Err(ConfigError::MisalignedCell {
                    map: map.id.to_string(),
                    kind: "trigger",
                    x: trigger.cell.x,
                    y: trigger.cell.y,
                });
            }
        }

        for event in map_events(map) {
            if let CutsceneEvent::ChangeMap { map: target } = event {
                if !known.contains(target) {
                    return Err(ConfigError::UnknownMapTarget {
                        map: map.id.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn map_events(map: &MapConfig) -> impl Iterator<Item = &CutsceneEvent> {
    map.footstep_triggers
        .iter()
        .flat_map(|trigger| trigger.events.iter())
        .chain(map.actors.iter().flat_map(|actor| actor.talk.iter()))
}
